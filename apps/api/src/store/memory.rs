//! In-memory `JobStore`. Backs tests and keyless demo runs; the filter,
//! sort, and pagination semantics here define the contract the Postgres
//! store must match.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobRequest, PageResponse, SortDir};
use crate::store::{not_found, JobQuery, JobStore, SortField};

#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<Vec<Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, mainly for tests.
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            jobs: RwLock::new(jobs),
        }
    }
}

fn materialize(req: &JobRequest) -> Job {
    Job {
        id: Uuid::new_v4(),
        title: req.title.clone(),
        company: req.company.clone(),
        location: req.location.clone(),
        description: req.description.clone(),
        salary_range: req.salary_range.clone(),
        posted_at: req.posted_at,
        source_url: req.source_url.clone(),
        tags: req.tags.clone(),
        created_at: Utc::now(),
    }
}

/// Case-insensitive substring match; a blank needle constrains nothing.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Conjunction of independent per-field predicates: substring matches on
/// company/location/title, any-tag equality for the tag list.
fn matches(job: &Job, query: &JobQuery) -> bool {
    if let Some(company) = &query.company {
        if !contains_ci(&job.company, company) {
            return false;
        }
    }
    if let Some(location) = &query.location {
        if !contains_ci(&job.location, location) {
            return false;
        }
    }
    if let Some(title) = &query.title {
        if !contains_ci(&job.title, title) {
            return false;
        }
    }
    if !query.tags.is_empty() {
        let any = query
            .tags
            .iter()
            .any(|t| job.tags.iter().any(|jt| jt == t.trim()));
        if !any {
            return false;
        }
    }
    true
}

fn compare(a: &Job, b: &Job, field: SortField) -> Ordering {
    match field {
        SortField::PostedAt => a.posted_at.cmp(&b.posted_at),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Company => a.company.cmp(&b.company),
        SortField::Location => a.location.cmp(&b.location),
        SortField::SalaryRange => a.salary_range.cmp(&b.salary_range),
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn list(&self, query: &JobQuery) -> Result<PageResponse<Job>, AppError> {
        let jobs = self.jobs.read().await;

        let mut filtered: Vec<Job> = jobs.iter().filter(|j| matches(j, query)).cloned().collect();
        filtered.sort_by(|a, b| {
            let ord = compare(a, b, query.sort_by);
            match query.sort_dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });

        let total = filtered.len() as u64;
        let size = query.size.max(1);
        let start = (query.page as usize).saturating_mul(size as usize);
        let content: Vec<Job> = filtered
            .into_iter()
            .skip(start)
            .take(size as usize)
            .collect();

        Ok(PageResponse::new(content, query.page, size, total))
    }

    async fn get(&self, id: Uuid) -> Result<Job, AppError> {
        let jobs = self.jobs.read().await;
        jobs.iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, req: &JobRequest) -> Result<Job, AppError> {
        let job = materialize(req);
        let mut jobs = self.jobs.write().await;
        jobs.push(job.clone());
        Ok(job)
    }

    async fn update(&self, id: Uuid, req: &JobRequest) -> Result<Job, AppError> {
        let mut jobs = self.jobs.write().await;
        let existing = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| not_found(id))?;

        existing.title = req.title.clone();
        existing.company = req.company.clone();
        existing.location = req.location.clone();
        existing.description = req.description.clone();
        existing.salary_range = req.salary_range.clone();
        existing.posted_at = req.posted_at;
        existing.source_url = req.source_url.clone();
        existing.tags = req.tags.clone();

        Ok(existing.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        if jobs.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Job>, AppError> {
        Ok(self.jobs.read().await.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{job, request};
    use super::*;

    fn seeded() -> MemoryJobStore {
        MemoryJobStore::with_jobs(vec![
            job("Senior Frontend Engineer", "Acme", "Remote", &["React"], 2),
            job("Backend Developer", "Beta Labs", "New York, NY", &["Java", "AWS"], 1),
            job("Data Engineer", "Acme", "Austin, TX", &["Python"], 5),
        ])
    }

    #[tokio::test]
    async fn test_company_filter_is_case_insensitive_substring() {
        let store = seeded();
        let query = JobQuery {
            company: Some("ac".to_string()),
            ..Default::default()
        };
        let page = store.list(&query).await.unwrap();
        assert_eq!(page.total_elements, 2);
        assert!(page.content.iter().all(|j| j.company == "Acme"));
    }

    #[tokio::test]
    async fn test_filters_combine_as_conjunction() {
        let store = seeded();
        let query = JobQuery {
            company: Some("acme".to_string()),
            title: Some("frontend".to_string()),
            ..Default::default()
        };
        let page = store.list(&query).await.unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].title, "Senior Frontend Engineer");
    }

    #[tokio::test]
    async fn test_tag_filter_matches_any_listed_tag() {
        let store = seeded();
        let query = JobQuery {
            tags: vec!["AWS".to_string(), "Python".to_string()],
            ..Default::default()
        };
        let page = store.list(&query).await.unwrap();
        assert_eq!(page.total_elements, 2);
    }

    #[tokio::test]
    async fn test_default_sort_is_posted_at_desc() {
        let store = seeded();
        let page = store.list(&JobQuery::default()).await.unwrap();
        let titles: Vec<&str> = page.content.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Backend Developer", "Senior Frontend Engineer", "Data Engineer"]
        );
    }

    #[tokio::test]
    async fn test_sort_by_title_ascending() {
        let store = seeded();
        let query = JobQuery {
            sort_by: SortField::Title,
            sort_dir: SortDir::Asc,
            ..Default::default()
        };
        let page = store.list(&query).await.unwrap();
        let titles: Vec<&str> = page.content.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Backend Developer", "Data Engineer", "Senior Frontend Engineer"]
        );
    }

    #[tokio::test]
    async fn test_pagination_scenario_twelve_jobs_size_five() {
        let mut jobs = Vec::new();
        for i in 0..12 {
            jobs.push(job(
                &format!("Engineer {i}"),
                "Acme",
                "Remote",
                &[],
                i,
            ));
        }
        let store = MemoryJobStore::with_jobs(jobs);

        let query = JobQuery {
            title: Some("engineer".to_string()),
            page: 0,
            size: 5,
            ..Default::default()
        };
        let page = store.list(&query).await.unwrap();
        assert_eq!(page.content.len(), 5);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 3);
        assert!(page.first);
        assert!(!page.last);

        let last = store
            .list(&JobQuery {
                page: 2,
                ..query.clone()
            })
            .await
            .unwrap();
        assert_eq!(last.content.len(), 2);
        assert!(last.last);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_but_well_formed() {
        let store = seeded();
        let query = JobQuery {
            page: 9,
            size: 5,
            ..Default::default()
        };
        let page = store.list(&query).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_created_at() {
        let store = MemoryJobStore::new();
        let created = store.create(&request("Platform Engineer", "Acme")).await.unwrap();
        assert_eq!(created.title, "Platform Engineer");

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.company, "Acme");
    }

    #[tokio::test]
    async fn test_update_replaces_full_payload() {
        let store = MemoryJobStore::new();
        let created = store.create(&request("Old Title", "Acme")).await.unwrap();

        let mut req = request("New Title", "Acme");
        req.tags = vec!["Go".to_string()];
        let updated = store.update(created.id, &req).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "New Title");
        assert_eq!(updated.tags, vec!["Go".to_string()]);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = MemoryJobStore::new();
        let created = store.create(&request("Ephemeral", "Acme")).await.unwrap();
        store.delete(created.id).await.unwrap();

        let err = store.get(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let store = MemoryJobStore::new();
        let err = store.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_filter_value_constrains_nothing() {
        let store = seeded();
        let query = JobQuery {
            company: Some("   ".to_string()),
            ..Default::default()
        };
        let page = store.list(&query).await.unwrap();
        assert_eq!(page.total_elements, 3);
    }
}
