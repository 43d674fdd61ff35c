use axum::extract::State;
use axum::response::Redirect;
use axum::Form;

use super::CredentialsForm;
use super::PageError;
use crate::inbound::http::router::AppState;
use crate::inbound::http::router::HOME_PATH;

/// Creates an account without touching the caller's session.
pub async fn add_user(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, PageError> {
    state
        .user_service
        .register(form.into_register_command())
        .await?;

    Ok(Redirect::to(HOME_PATH))
}
