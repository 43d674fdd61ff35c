use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::Form;
use axum_extra::extract::CookieJar;
use chrono::Utc;

use super::session_cookie;
use super::session_token;
use super::CredentialsForm;
use super::PageError;
use crate::inbound::http::pages;
use crate::inbound::http::router::AppState;
use crate::inbound::http::router::HOME_PATH;

pub async fn register_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    if state
        .gate
        .already_authenticated(session_token(&jar).as_deref())
    {
        return Redirect::to(HOME_PATH).into_response();
    }

    Html(pages::register()).into_response()
}

/// Registers the account and signs the new user in straight away.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), PageError> {
    let user = state
        .user_service
        .register(form.into_register_command())
        .await?;
    let token = state.user_service.issue_token(&user, Utc::now())?;

    Ok((jar.add(session_cookie(token)), Redirect::to(HOME_PATH)))
}
