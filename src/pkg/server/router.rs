use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;

use super::handlers;
use super::handlers::auth::{login, register};
use super::handlers::probes::{healthz, livez};
use super::middlewares::authn;
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route("/users", get(handlers::users::list))
        .route("/users/{id}", get(handlers::users::retrieve))
        .route("/jobs", post(handlers::jobs::create))
        .route("/jobs", get(handlers::jobs::list))
        .route("/jobs/{id}", get(handlers::jobs::retrieve))
        .route("/jobs/{id}", put(handlers::jobs::update))
        .route("/jobs/{id}", delete(handlers::jobs::delete))
        .route(
            "/jobs/employer/{employer_id}",
            get(handlers::jobs::list_by_employer),
        )
        .route("/applications", post(handlers::applications::create))
        .route("/applications", get(handlers::applications::list))
        .route("/applications/{id}", get(handlers::applications::retrieve))
        .route(
            "/applications/{id}/status",
            put(handlers::applications::update_status),
        )
        .route("/applications/{id}", delete(handlers::applications::delete))
        .layer(from_fn_with_state(state.clone(), authn::authenticate))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
