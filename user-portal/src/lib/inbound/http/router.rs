use std::sync::Arc;
use std::time::Duration;

use auth::CredentialGate;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_user::add_user;
use super::handlers::home::home;
use super::handlers::login::login;
use super::handlers::login::login_form;
use super::handlers::register::register;
use super::handlers::register::register_form;
use super::middleware::require_session;
use crate::domain::user::ports::UserServicePort;

pub const BASE_PATH: &str = "/api/v1/user";
pub const HOME_PATH: &str = "/api/v1/user/home";
pub const LOGIN_PATH: &str = "/api/v1/user/login";
pub const REGISTER_PATH: &str = "/api/v1/user/register";
pub const ADD_USER_PATH: &str = "/api/v1/user/add";

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub gate: CredentialGate,
}

pub fn create_router(user_service: Arc<dyn UserServicePort>, gate: CredentialGate) -> Router {
    let state = AppState { user_service, gate };

    let public_routes = Router::new()
        .route("/login", get(login_form).post(login))
        .route("/register", get(register_form).post(register))
        .route("/add", post(add_user));

    let protected_routes = Router::new()
        .route("/home", get(home))
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            require_session,
        ));

    // Headers are left out of the span: they carry the session cookie.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .nest(
            BASE_PATH,
            Router::new().merge(public_routes).merge(protected_routes),
        )
        .layer(trace_layer)
        .with_state(state)
}
