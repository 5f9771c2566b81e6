//! Router assembly.

pub mod api;
pub mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// The served application. Serve it with `axum::ServiceExt::into_make_service`.
pub type App = NormalizePath<Router>;

/// The whole application: service routes at the root, the API under `/v0`.
/// `/v0/players/` and `/v0/players` reach the same handler.
pub fn app(state: AppState) -> App {
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .nest("/v0", api_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http());
    // Must wrap the router: a route layer runs only after a path has matched.
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
