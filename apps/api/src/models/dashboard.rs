use serde::{Deserialize, Serialize};

/// Full dashboard snapshot. Read-only; recomputed server-side per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_jobs: u64,
    pub jobs_posted_today: u64,
    pub jobs_posted_this_month: u64,
    pub total_visitors: u64,
    pub active_applications: u64,
    pub jobs_growth_percentage: f64,
    pub visitors_growth_percentage: f64,
    pub applications_growth_percentage: f64,
    pub top_locations: Vec<LocationStats>,
    pub top_companies: Vec<CompanyStats>,
    pub recent_activities: Vec<RecentActivity>,
}

/// Per-location breakdown entry. `percentage` is `count / total_jobs * 100`,
/// computed independently; entries are not expected to sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStats {
    pub location: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStats {
    pub company: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Job,
    User,
    System,
    Alert,
}

/// One feed line on the admin dashboard, e.g. "New job posted: X at Y".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub message: String,
    pub time: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
}
