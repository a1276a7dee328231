//! # Pack View Routes
//!
//! `GET /v1/packs/{id}` returns the full page model; `GET /v1/packs/{id}/stats`
//! returns only the sidebar stats and pack totals. The unit system arrives
//! as a query parameter and is re-applied from scratch on every request.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use packstack_core::{CategoryStat, PackData, PackId, PackTotals, PackView, UnitSystem};

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters accepted by the pack routes.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// `metric` or `imperial`. Absent means metric.
    #[serde(default)]
    pub unit: Option<String>,
    /// Round gram values to whole grams.
    #[serde(default)]
    pub compact: Option<bool>,
}

impl ViewQuery {
    /// Resolve the unit system, rejecting unknown values.
    fn unit_system(&self) -> Result<UnitSystem, AppError> {
        match self.unit.as_deref() {
            None => Ok(UnitSystem::default()),
            Some(raw) => raw.parse::<UnitSystem>().map_err(AppError::from),
        }
    }
}

/// Sidebar payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub id: PackId,
    pub unit_system: UnitSystem,
    pub stats: Vec<CategoryStat>,
    pub totals: PackTotals,
}

/// Build the pack router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/packs/{id}", get(get_pack_view))
        .route("/v1/packs/{id}/stats", get(get_pack_stats))
}

fn extract_query(query: Result<Query<ViewQuery>, QueryRejection>) -> Result<ViewQuery, AppError> {
    query
        .map(|Query(q)| q)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Fetch a pack, mapping both absence and source failures to 404.
async fn load_pack(state: &AppState, id: &PackId) -> Result<PackData, AppError> {
    match state.source.fetch(id).await {
        Ok(Some(data)) => Ok(data),
        Ok(None) => Err(AppError::NotFound(format!("pack {id}"))),
        Err(e) => {
            tracing::warn!(pack_id = %id, error = %e, "pack source failed");
            Err(AppError::NotFound(format!("pack {id}")))
        }
    }
}

/// GET /v1/packs/{id}: Full pack view.
async fn get_pack_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> Result<Json<PackView>, AppError> {
    let query = extract_query(query)?;
    let system = query.unit_system()?;
    let compact = query.compact.unwrap_or(false);
    let id = PackId::from(id);

    let data = load_pack(&state, &id).await?;
    let view = state.cache.get_or_build(&data, system, compact)?;
    tracing::debug!(pack_id = %id, unit = %system, compact, "built pack view");
    Ok(Json(view))
}

/// GET /v1/packs/{id}/stats: Sidebar stats and pack totals.
async fn get_pack_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let query = extract_query(query)?;
    let system = query.unit_system()?;
    let id = PackId::from(id);

    let data = load_pack(&state, &id).await?;
    let view = state.cache.get_or_build(&data, system, false)?;
    Ok(Json(StatsResponse {
        id: view.id,
        unit_system: view.unit_system,
        stats: view.stats,
        totals: view.totals,
    }))
}
