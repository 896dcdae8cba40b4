//! Client-side filtering and pagination over a locally held job list, for
//! pages that never touch the backend. Filtering is a conjunction of
//! independent per-field predicates; pagination is 1-based over a fixed page
//! size, and any filter change snaps the view back to page 1.

use chrono::{DateTime, Duration, Utc};

use crate::models::job::Job;

pub const PAGE_SIZE: usize = 5;

/// Local filter set. Blank text fields constrain nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseFilters {
    /// Case-insensitive substring match on the company name.
    pub company: String,
    /// Case-insensitive substring match on the job title.
    pub title: String,
    /// Exact match against any of the job's tags.
    pub category: Option<String>,
    /// Keep only jobs posted within the last N days.
    pub posted_within_days: Option<i64>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.trim().is_empty() || haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn matches(job: &Job, filters: &BrowseFilters, now: DateTime<Utc>) -> bool {
    if !contains_ci(&job.company, &filters.company) {
        return false;
    }
    if !contains_ci(&job.title, &filters.title) {
        return false;
    }
    if let Some(category) = &filters.category {
        if !job.tags.iter().any(|t| t == category) {
            return false;
        }
    }
    if let Some(days) = filters.posted_within_days {
        if job.posted_at < now - Duration::days(days) {
            return false;
        }
    }
    true
}

/// A filtered, paginated view over a job list.
pub struct JobBrowser {
    jobs: Vec<Job>,
    filters: BrowseFilters,
    page: usize,
    page_size: usize,
}

impl JobBrowser {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self::with_page_size(jobs, PAGE_SIZE)
    }

    pub fn with_page_size(jobs: Vec<Job>, page_size: usize) -> Self {
        Self {
            jobs,
            filters: BrowseFilters::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filters(&self) -> &BrowseFilters {
        &self.filters
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Replaces the filter set. Any change by value resets the page to 1;
    /// setting an equal filter set leaves the page alone.
    pub fn set_filters(&mut self, filters: BrowseFilters) {
        if filters != self.filters {
            self.filters = filters;
            self.page = 1;
        }
    }

    fn filtered(&self, now: DateTime<Utc>) -> Vec<&Job> {
        self.jobs
            .iter()
            .filter(|j| matches(j, &self.filters, now))
            .collect()
    }

    pub fn filtered_count(&self, now: DateTime<Utc>) -> usize {
        self.filtered(now).len()
    }

    pub fn total_pages(&self, now: DateTime<Utc>) -> usize {
        self.filtered_count(now).div_ceil(self.page_size)
    }

    /// Moves to `page` if it is within range; out-of-range requests
    /// (page 0, or past the last page) are ignored rather than clamped.
    pub fn go_to_page(&mut self, page: usize, now: DateTime<Utc>) {
        if page >= 1 && page <= self.total_pages(now) {
            self.page = page;
        }
    }

    /// The slice of filtered jobs visible on the current page.
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Job> {
        let start = (self.page - 1) * self.page_size;
        self.filtered(now)
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }
}
