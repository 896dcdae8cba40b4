//! Job resource service: domain operations mapped onto the transport client.

use uuid::Uuid;

use crate::client::{ApiClient, ApiError};
use crate::models::job::{Job, JobFilters, JobRequest, PageResponse};

#[derive(Clone)]
pub struct JobService {
    client: ApiClient,
}

impl JobService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lists jobs with pagination and filters. Undefined filter fields are
    /// omitted from the query string entirely.
    pub async fn list(&self, filters: &JobFilters) -> Result<PageResponse<Job>, ApiError> {
        let query = filters.query_string();
        let endpoint = if query.is_empty() {
            "/api/jobs".to_string()
        } else {
            format!("/api/jobs?{query}")
        };
        self.client.get(&endpoint).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job, ApiError> {
        self.client.get(&format!("/api/admin/jobs/{id}")).await
    }

    pub async fn create(&self, job: &JobRequest) -> Result<Job, ApiError> {
        self.client.post("/api/admin/jobs", job).await
    }

    pub async fn update(&self, id: Uuid, job: &JobRequest) -> Result<Job, ApiError> {
        self.client.put(&format!("/api/admin/jobs/{id}"), job).await
    }

    /// Routed through the shared client like every other operation, so a
    /// failed delete surfaces the same normalized error.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete(&format!("/api/admin/jobs/{id}")).await
    }
}

#[cfg(test)]
pub(crate) mod harness {
    use std::sync::Arc;

    use crate::ai::GenAiClient;
    use crate::client::ApiClient;
    use crate::config::Config;
    use crate::models::job::Job;
    use crate::routes::build_router;
    use crate::state::AppState;
    use crate::store::MemoryJobStore;

    /// Serves the real router on an ephemeral port and returns a client
    /// pointed at it.
    pub async fn spawn_api(jobs: Vec<Job>) -> ApiClient {
        let state = AppState {
            store: Arc::new(MemoryJobStore::with_jobs(jobs)),
            ai: GenAiClient::new(None),
            config: Config::for_tests(),
        };
        let app = build_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ApiClient::new(format!("http://{addr}"))
    }
}
