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

pub async fn login_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    if state
        .gate
        .already_authenticated(session_token(&jar).as_deref())
    {
        return Redirect::to(HOME_PATH).into_response();
    }

    Html(pages::login()).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), PageError> {
    let token = state
        .user_service
        .login(form.into_login_command(), Utc::now())
        .await?;

    Ok((jar.add(session_cookie(token)), Redirect::to(HOME_PATH)))
}
