use auth::AUTH_COOKIE_NAME;
use auth::TOKEN_TTL_SECONDS;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::pages;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

pub mod add_user;
pub mod home;
pub mod login;
pub mod register;

/// Failure rendered as an HTML error page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    InternalServerError(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PageError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            PageError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            PageError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Html(pages::error(&message))).into_response()
    }
}

impl From<UserError> for PageError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateUser(_) => PageError::Conflict(err.to_string()),
            UserError::InvalidCredentials => PageError::Unauthorized(err.to_string()),
            UserError::Password(_)
            | UserError::Signing(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                PageError::InternalServerError("Something went wrong, please try again".to_string())
            }
        }
    }
}

/// Username/password pair posted by the login and registration forms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsForm {
    username: String,
    password: String,
}

impl CredentialsForm {
    fn into_register_command(self) -> RegisterUserCommand {
        RegisterUserCommand::new(Username::new(self.username), self.password)
    }

    fn into_login_command(self) -> LoginCommand {
        LoginCommand::new(Username::new(self.username), self.password)
    }
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(TOKEN_TTL_SECONDS))
        .build()
}

/// Cookie matching the session cookie's name and path, for removal.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE_NAME).path("/").build()
}

/// Raw session token presented with the request, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(AUTH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}
