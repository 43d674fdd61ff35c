use auth::CredentialGate;
use auth::GateResult;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use chrono::Utc;

use super::handlers::expired_session_cookie;
use super::handlers::session_token;
use super::router::LOGIN_PATH;

/// Middleware that lets a request through only with a valid session cookie.
///
/// On success the validated [`auth::Claims`] are placed in the request
/// extensions for the handler. Otherwise the visitor is sent to the login page
/// and the cookie is dropped, so the login form's presence check cannot bounce
/// them straight back here.
pub async fn require_session(
    State(gate): State<CredentialGate>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    match gate.authorize(session_token(&jar).as_deref(), Utc::now()) {
        GateResult::Authenticated(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        GateResult::Unauthenticated => (
            jar.remove(expired_session_cookie()),
            Redirect::to(LOGIN_PATH),
        )
            .into_response(),
    }
}
