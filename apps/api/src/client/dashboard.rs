//! Dashboard resource service: a single read-only snapshot fetch.

use crate::client::{ApiClient, ApiError};
use crate::models::dashboard::DashboardStats;

#[derive(Clone)]
pub struct DashboardService {
    client: ApiClient,
}

impl DashboardService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_stats(&self) -> Result<DashboardStats, ApiError> {
        self.client.get("/api/admin/dashboard/stats").await
    }
}
