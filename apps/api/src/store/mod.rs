//! Job repository abstraction. Handlers only ever see `Arc<dyn JobStore>`;
//! the in-memory and Postgres implementations are interchangeable.

pub mod memory;
pub mod postgres;

pub use memory::MemoryJobStore;
pub use postgres::PgJobStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobRequest, PageResponse, SortDir};

/// Fields the listing endpoint may sort on. Unknown `sortBy` values fall back
/// to `PostedAt` rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    PostedAt,
    CreatedAt,
    Title,
    Company,
    Location,
    SalaryRange,
}

impl SortField {
    pub fn from_param(param: &str) -> Self {
        match param {
            "createdAt" => SortField::CreatedAt,
            "title" => SortField::Title,
            "company" => SortField::Company,
            "location" => SortField::Location,
            "salaryRange" => SortField::SalaryRange,
            _ => SortField::PostedAt,
        }
    }

    /// Column name for the SQL-backed store.
    pub fn column(self) -> &'static str {
        match self {
            SortField::PostedAt => "posted_at",
            SortField::CreatedAt => "created_at",
            SortField::Title => "title",
            SortField::Company => "company",
            SortField::Location => "location",
            SortField::SalaryRange => "salary_range",
        }
    }
}

/// Normalized listing query: defaults already applied, tags already split.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: SortField,
    pub sort_dir: SortDir,
    pub company: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    /// A job matches when any of its tags equals any entry here.
    pub tags: Vec<String>,
}

impl Default for JobQuery {
    fn default() -> Self {
        JobQuery {
            page: 0,
            size: 10,
            sort_by: SortField::PostedAt,
            sort_dir: SortDir::Desc,
            company: None,
            location: None,
            title: None,
            tags: Vec::new(),
        }
    }
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Filtered, sorted, paginated listing.
    async fn list(&self, query: &JobQuery) -> Result<PageResponse<Job>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Job, AppError>;

    async fn create(&self, req: &JobRequest) -> Result<Job, AppError>;

    /// Full-payload replace; no partial-update merge semantics.
    async fn update(&self, id: Uuid, req: &JobRequest) -> Result<Job, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Every job, unfiltered. Used by the dashboard aggregation.
    async fn all(&self) -> Result<Vec<Job>, AppError>;
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Job not found with id: {id}"))
}
