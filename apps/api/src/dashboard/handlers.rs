use axum::{extract::State, Json};
use chrono::Utc;

use crate::dashboard::stats::compute_stats;
use crate::errors::AppError;
use crate::models::dashboard::DashboardStats;
use crate::state::AppState;

/// GET /api/admin/dashboard/stats
/// Recomputes the full snapshot on every request; nothing is cached.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let jobs = state.store.all().await?;
    Ok(Json(compute_stats(&jobs, Utc::now())))
}
