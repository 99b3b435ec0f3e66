//! Router assembly, shared by the binary and integration tests.

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware::auth, state::AppState};

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/logout", get(handlers::auth::logout))
        // The handshake does its own session check before upgrading.
        .route("/ws", get(handlers::ws::upgrade));

    let protected_routes = Router::new()
        .route("/", get(handlers::pages::index))
        .route("/chat/{friend_id}", get(handlers::pages::chat))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
