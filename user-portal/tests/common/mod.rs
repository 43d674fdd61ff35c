use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use user_portal::domain::user::service::UserService;
use user_portal::inbound::http::router::create_router;
use user_portal::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application driving the real router in-process
pub struct TestApp {
    pub router: Router,
    pub jwt_handler: JwtHandler,
}

/// Buffered response with the bits the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestApp {
    /// Build the application on top of an empty in-memory store
    pub fn spawn() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let authenticator =
            Arc::new(Authenticator::new(TEST_SECRET).expect("Failed to create authenticator"));
        let gate = authenticator.gate();
        let user_service = Arc::new(UserService::new(repository, authenticator));

        Self {
            router: create_router(user_service, gate),
            jwt_handler: JwtHandler::new(TEST_SECRET).expect("Failed to create jwt handler"),
        }
    }

    /// Helper to make GET request, optionally carrying a session cookie
    pub async fn get(&self, path: &str, session: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(token) = session {
            builder = builder.header(header::COOKIE, format!("Authorization={}", token));
        }

        self.send(builder.body(Body::empty()).expect("Failed to build request"))
            .await
    }

    /// Helper to POST an urlencoded form
    pub async fn post_form(&self, path: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Register through the form and return the issued session token
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/api/v1/user/register",
                &format!("username={}&password={}", username, password),
            )
            .await;

        assert_eq!(response.status, StatusCode::SEE_OTHER);
        response
            .session_cookie()
            .expect("Registration did not set a session cookie")
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
        }
    }
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Raw `Set-Cookie` header for the session cookie, if one was sent
    pub fn session_set_cookie(&self) -> Option<&str> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with("Authorization="))
    }

    /// Token placed in the session cookie, if a non-empty one was set
    pub fn session_cookie(&self) -> Option<String> {
        let header = self.session_set_cookie()?;
        let value = header
            .split(';')
            .next()?
            .trim_start_matches("Authorization=");

        (!value.is_empty()).then(|| value.to_string())
    }

    /// True when the response tells the browser to drop the session cookie
    pub fn clears_session_cookie(&self) -> bool {
        self.session_set_cookie()
            .is_some_and(|header| header.starts_with("Authorization=;") && header.contains("Max-Age=0"))
    }
}
