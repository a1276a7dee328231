//! # packstack-api: Shared Pack View Service
//!
//! Serves the derived view of a shared packing list. Each request fetches
//! the pack document from the configured [`source::PackSource`], runs the
//! aggregation engine for the requested unit system, and returns JSON.
//!
//! ## API Surface
//!
//! | Method | Path                     | Response                          |
//! |--------|--------------------------|-----------------------------------|
//! | GET    | `/v1/packs/{id}`         | [`packstack_core::PackView`]      |
//! | GET    | `/v1/packs/{id}/stats`   | [`routes::packs::StatsResponse`]  |
//! | GET    | `/health/liveness`       | `ok`                              |
//! | GET    | `/health/readiness`      | `ready`                           |
//!
//! Both pack routes take `?unit=metric|imperial` (default `metric`); the view
//! route also takes `?compact=true|false`. An unknown pack, or a source that
//! cannot be reached, is a 404. Malformed pack data or an unknown unit
//! system is a 422.

pub mod cache;
pub mod error;
pub mod routes;
pub mod source;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::packs::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe.
async fn readiness() -> &'static str {
    "ready"
}
