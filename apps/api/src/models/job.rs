//! Job domain types shared by the REST surface and the typed API consumer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A posted job as stored and served by the backend.
/// `description` is rich-text HTML produced by the admin editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary_range: String,
    pub posted_at: DateTime<Utc>,
    pub source_url: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Creation/update payload: a `Job` minus the server-assigned fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub salary_range: String,
    pub posted_at: DateTime<Utc>,
    pub source_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl JobRequest {
    /// Validates required fields and the rich-text description.
    /// Returns every violation, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title is required".to_string());
        }
        if self.company.trim().is_empty() {
            errors.push("Company is required".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("Description is required".to_string());
        } else if !is_valid_rich_text(&self.description) {
            errors.push("Description must be valid rich text content".to_string());
        }
        if self.source_url.trim().is_empty() {
            errors.push("Source URL is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Rejects rich-text HTML carrying script tags or inline event handlers.
/// Empty content is considered valid; the blank check is separate.
pub fn is_valid_rich_text(html: &str) -> bool {
    let lower = html.to_lowercase();
    !(lower.contains("<script")
        || lower.contains("javascript:")
        || lower.contains("onerror=")
        || lower.contains("onclick="))
}

/// Sort direction accepted by the listing endpoint. `DESC` on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDir {
    #[serde(alias = "asc")]
    Asc,
    #[default]
    #[serde(alias = "desc")]
    Desc,
}

/// Filter set accepted by the job listing endpoint. Every field is optional;
/// absent fields are omitted from the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<SortDir>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl JobFilters {
    /// Encodes the defined fields as a URL query string, e.g. `page=0&size=5`.
    /// Returns an empty string when no field is set.
    pub fn query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

/// The paginated-list envelope returned by listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> PageResponse<T> {
    /// Builds an envelope with the derived fields computed from the totals:
    /// `total_pages = ceil(total_elements / page_size)` (0 when empty),
    /// `first` iff page 0, `last` iff the final page (or no pages at all).
    pub fn new(content: Vec<T>, page_number: u32, page_size: u32, total_elements: u64) -> Self {
        let size = u64::from(page_size.max(1));
        let total_pages = if total_elements == 0 {
            0
        } else {
            ((total_elements + size - 1) / size) as u32
        };
        Self {
            content,
            page_number,
            page_size,
            total_elements,
            total_pages,
            first: page_number == 0,
            last: total_pages == 0 || page_number == total_pages - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> JobRequest {
        JobRequest {
            title: "Backend Developer".to_string(),
            company: "DataCorp".to_string(),
            location: "Remote".to_string(),
            description: "<p>Strong Java and Spring Boot skills</p>".to_string(),
            salary_range: "$120k - $150k".to_string(),
            posted_at: Utc.with_ymd_and_hms(2026, 8, 20, 9, 0, 0).unwrap(),
            source_url: "https://example.com/jobs/42".to_string(),
            tags: vec!["Java".to_string(), "AWS".to_string()],
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_blank_required_fields_are_all_reported() {
        let mut req = request();
        req.title = "  ".to_string();
        req.company = String::new();
        req.source_url = String::new();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&"Title is required".to_string()));
        assert!(errors.contains(&"Company is required".to_string()));
        assert!(errors.contains(&"Source URL is required".to_string()));
    }

    #[test]
    fn test_script_bearing_description_is_rejected() {
        let mut req = request();
        req.description = "<p>hi</p><script>alert(1)</script>".to_string();
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors,
            vec!["Description must be valid rich text content".to_string()]
        );
    }

    #[test]
    fn test_rich_text_rejects_event_handlers() {
        assert!(!is_valid_rich_text(r#"<img src=x onerror=alert(1)>"#));
        assert!(!is_valid_rich_text(r#"<a href="javascript:void(0)">x</a>"#));
        assert!(is_valid_rich_text("<p><strong>bold</strong> and <em>em</em></p>"));
    }

    #[test]
    fn test_query_string_page_and_size_only() {
        let filters = JobFilters {
            page: Some(0),
            size: Some(5),
            ..Default::default()
        };
        assert_eq!(filters.query_string(), "page=0&size=5");
    }

    #[test]
    fn test_query_string_empty_when_nothing_set() {
        assert_eq!(JobFilters::default().query_string(), "");
    }

    #[test]
    fn test_query_string_full_filter_set() {
        let filters = JobFilters {
            page: Some(2),
            size: Some(10),
            sort_by: Some("postedAt".to_string()),
            sort_dir: Some(SortDir::Desc),
            company: Some("Acme".to_string()),
            location: Some("Remote".to_string()),
            title: Some("engineer".to_string()),
            tags: Some("Java,React".to_string()),
        };
        assert_eq!(
            filters.query_string(),
            "page=2&size=10&sortBy=postedAt&sortDir=DESC&company=Acme&location=Remote&title=engineer&tags=Java%2CReact"
        );
    }

    #[test]
    fn test_page_response_totals() {
        let page = PageResponse::new(vec![1, 2, 3], 0, 5, 12);
        assert_eq!(page.total_pages, 3);
        assert!(page.first);
        assert!(!page.last);
    }

    #[test]
    fn test_page_response_empty() {
        let page: PageResponse<i32> = PageResponse::new(vec![], 0, 10, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
    }

    #[test]
    fn test_page_response_last_page() {
        let page = PageResponse::new(vec![1, 2], 2, 5, 12);
        assert!(!page.first);
        assert!(page.last);
    }

    #[test]
    fn test_page_response_exact_multiple() {
        let page: PageResponse<i32> = PageResponse::new(vec![], 1, 5, 10);
        assert_eq!(page.total_pages, 2);
        assert!(page.last);
    }

    #[test]
    fn test_sort_dir_accepts_lowercase() {
        let dir: SortDir = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(dir, SortDir::Desc);
        let dir: SortDir = serde_json::from_str("\"ASC\"").unwrap();
        assert_eq!(dir, SortDir::Asc);
    }

    #[test]
    fn test_job_serializes_camel_case() {
        let job = Job {
            id: Uuid::nil(),
            title: "t".to_string(),
            company: "c".to_string(),
            location: "l".to_string(),
            description: "d".to_string(),
            salary_range: "s".to_string(),
            posted_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            source_url: "u".to_string(),
            tags: vec![],
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(&job).unwrap();
        assert!(value.get("salaryRange").is_some());
        assert!(value.get("postedAt").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("sourceUrl").is_some());
    }
}
