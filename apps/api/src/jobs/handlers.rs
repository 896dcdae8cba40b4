//! Public listing and admin CRUD handlers for jobs.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobRequest, PageResponse, SortDir};
use crate::state::AppState;
use crate::store::{JobQuery, SortField};

fn default_size() -> u32 {
    10
}

fn default_sort_by() -> String {
    "postedAt".to_string()
}

/// Raw query parameters of `GET /api/jobs`, with the listing defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default)]
    pub sort_dir: SortDir,
    pub company: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    /// Comma-separated; split before matching.
    pub tags: Option<String>,
}

impl From<ListParams> for JobQuery {
    fn from(params: ListParams) -> Self {
        let tags = params
            .tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        JobQuery {
            page: params.page,
            size: params.size.max(1),
            sort_by: SortField::from_param(&params.sort_by),
            sort_dir: params.sort_dir,
            company: params.company,
            location: params.location,
            title: params.title,
            tags,
        }
    }
}

fn validate(req: &JobRequest) -> Result<(), AppError> {
    req.validate()
        .map_err(|errors| AppError::Validation(errors.join("; ")))
}

/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse<Job>>, AppError> {
    let query = JobQuery::from(params);
    let page = state.store.list(&query).await?;
    Ok(Json(page))
}

/// GET /api/admin/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let job = state.store.get(id).await?;
    Ok(Json(job))
}

/// POST /api/admin/jobs
pub async fn create_job(
    State(state): State<AppState>,
    Json(req): Json<JobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    validate(&req)?;
    let job = state.store.create(&req).await?;
    info!("Created new job: {} at {}", job.title, job.company);
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/admin/jobs/:id
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobRequest>,
) -> Result<Json<Job>, AppError> {
    validate(&req)?;
    let job = state.store.update(id, &req).await?;
    info!("Updated job: {} (ID: {id})", job.title);
    Ok(Json(job))
}

/// DELETE /api/admin/jobs/:id — 204 on success.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    info!("Deleted job with ID: {id}");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(tags: Option<&str>) -> ListParams {
        ListParams {
            page: 0,
            size: 10,
            sort_by: "postedAt".to_string(),
            sort_dir: SortDir::Desc,
            company: None,
            location: None,
            title: None,
            tags: tags.map(str::to_string),
        }
    }

    #[test]
    fn test_tags_param_splits_on_commas_and_trims() {
        let query = JobQuery::from(params(Some("Java, Spring Boot ,,React")));
        assert_eq!(query.tags, vec!["Java", "Spring Boot", "React"]);
    }

    #[test]
    fn test_absent_tags_param_means_no_constraint() {
        let query = JobQuery::from(params(None));
        assert!(query.tags.is_empty());
    }

    #[test]
    fn test_unknown_sort_field_falls_back_to_posted_at() {
        let mut p = params(None);
        p.sort_by = "dropTables".to_string();
        let query = JobQuery::from(p);
        assert_eq!(query.sort_by, SortField::PostedAt);
    }

    #[test]
    fn test_zero_size_is_clamped_to_one() {
        let mut p = params(None);
        p.size = 0;
        let query = JobQuery::from(p);
        assert_eq!(query.size, 1);
    }

    #[test]
    fn test_list_params_parse_from_query_string() {
        let p: ListParams =
            serde_urlencoded::from_str("page=1&size=5&sortBy=title&sortDir=ASC&tags=Go").unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.size, 5);
        assert_eq!(p.sort_dir, SortDir::Asc);
        let query = JobQuery::from(p);
        assert_eq!(query.sort_by, SortField::Title);
        assert_eq!(query.tags, vec!["Go"]);
    }
}
