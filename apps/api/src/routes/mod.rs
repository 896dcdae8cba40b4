pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai;
use crate::dashboard::handlers as dashboard;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public listing
        .route("/api/jobs", get(jobs::list_jobs))
        // Admin job CRUD
        .route("/api/admin/jobs", post(jobs::create_job))
        .route(
            "/api/admin/jobs/:id",
            get(jobs::get_job)
                .put(jobs::update_job)
                .delete(jobs::delete_job),
        )
        // Admin dashboard
        .route("/api/admin/dashboard/stats", get(dashboard::get_stats))
        // AI proxies
        .route("/api/ai-insights", post(ai::ai_insights))
        .route("/api/referral-suggestions", post(ai::referral_suggestions))
        .with_state(state)
}
