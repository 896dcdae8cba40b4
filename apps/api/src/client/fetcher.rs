//! Fetch-state wrappers over the resource services: the `data`/`loading`/
//! `error` triple a UI observes, plus refetch. A monotonic generation
//! counter discards responses from superseded fetches so a slow stale
//! response can never overwrite a newer filter's result.

use uuid::Uuid;

use crate::client::dashboard::DashboardService;
use crate::client::jobs::JobService;
use crate::client::ApiError;
use crate::models::dashboard::DashboardStats;
use crate::models::job::{Job, JobFilters, JobRequest, PageResponse};

/// Observable state of one read fetch.
#[derive(Debug)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl<T> FetchState<T> {
    /// Read fetchers start loading; they fetch as soon as they are driven.
    pub fn loading() -> Self {
        FetchState {
            data: None,
            loading: true,
            error: None,
            generation: 0,
        }
    }

    /// Marks a fetch as started and returns its generation token.
    /// Clears any previous error; existing data stays visible while loading.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Applies a settled fetch. Returns false (and changes nothing) when a
    /// newer fetch has begun since `generation` was issued. On failure the
    /// previous data is left untouched (stale-while-error).
    pub fn resolve(&mut self, generation: u64, result: Result<T, ApiError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => self.data = Some(data),
            Err(e) => self.error = Some(e.message),
        }
        true
    }
}

/// Job-list fetcher. Re-fetches when the filter set changes by value,
/// compared on the encoded query string, not by reference or identity.
pub struct JobsFetcher {
    service: JobService,
    filters: JobFilters,
    filter_key: String,
    pub state: FetchState<PageResponse<Job>>,
}

impl JobsFetcher {
    pub fn new(service: JobService, filters: JobFilters) -> Self {
        let filter_key = filters.query_string();
        Self {
            service,
            filters,
            filter_key,
            state: FetchState::loading(),
        }
    }

    pub fn filters(&self) -> &JobFilters {
        &self.filters
    }

    pub async fn refetch(&mut self) {
        let generation = self.state.begin();
        let result = self.service.list(&self.filters).await;
        self.state.resolve(generation, result);
    }

    /// Adopts a new filter set. Returns true when a fetch was issued; an
    /// equal-by-value filter set is a no-op.
    pub async fn set_filters(&mut self, filters: JobFilters) -> bool {
        let key = filters.query_string();
        if key == self.filter_key {
            return false;
        }
        self.filters = filters;
        self.filter_key = key;
        self.refetch().await;
        true
    }
}

/// Dashboard snapshot fetcher.
pub struct DashboardFetcher {
    service: DashboardService,
    pub state: FetchState<DashboardStats>,
}

impl DashboardFetcher {
    pub fn new(service: DashboardService) -> Self {
        Self {
            service,
            state: FetchState::loading(),
        }
    }

    pub async fn refetch(&mut self) {
        let generation = self.state.begin();
        let result = self.service.get_stats().await;
        self.state.resolve(generation, result);
    }
}

/// Write wrapper for job creation: runs only on explicit invocation, hands
/// the created job back to the caller, and records failures in `error`.
pub struct CreateJob {
    service: JobService,
    pub loading: bool,
    pub error: Option<String>,
}

impl CreateJob {
    pub fn new(service: JobService) -> Self {
        Self {
            service,
            loading: false,
            error: None,
        }
    }

    pub async fn run(&mut self, job: &JobRequest) -> Option<Job> {
        self.loading = true;
        self.error = None;
        let result = self.service.create(job).await;
        self.loading = false;
        match result {
            Ok(job) => Some(job),
            Err(e) => {
                self.error = Some(e.message);
                None
            }
        }
    }
}

/// Write wrapper for job deletion; resolves to whether the delete succeeded.
pub struct DeleteJob {
    service: JobService,
    pub loading: bool,
    pub error: Option<String>,
}

impl DeleteJob {
    pub fn new(service: JobService) -> Self {
        Self {
            service,
            loading: false,
            error: None,
        }
    }

    pub async fn run(&mut self, id: Uuid) -> bool {
        self.loading = true;
        self.error = None;
        let result = self.service.delete(id).await;
        self.loading = false;
        match result {
            Ok(()) => true,
            Err(e) => {
                self.error = Some(e.message);
                false
            }
        }
    }
}
