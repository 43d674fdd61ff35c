use auth::Claims;
use axum::extract::State;
use axum::response::Html;
use axum::Extension;

use super::PageError;
use crate::inbound::http::pages;
use crate::inbound::http::router::AppState;

/// Listing page; only reachable behind the session gate, which supplies the claims.
pub async fn home(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Html<String>, PageError> {
    let users = state.user_service.list_users().await?;

    Ok(Html(pages::home(&claims.username, &users)))
}
