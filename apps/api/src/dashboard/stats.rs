//! Dashboard aggregation over the full job list. Pure functions; `now` is
//! injected so the date-bucket math is deterministic under test.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Months, TimeZone, Utc};

use crate::models::dashboard::{
    ActivityType, CompanyStats, DashboardStats, LocationStats, RecentActivity,
};
use crate::models::job::Job;

// Demo counters for metrics the job table cannot answer.
const TOTAL_VISITORS: u64 = 12_345;
const ACTIVE_APPLICATIONS: u64 = 156;
const VISITORS_GROWTH: f64 = 12.0;
const APPLICATIONS_GROWTH: f64 = 23.0;

const TOP_N: usize = 5;

pub fn compute_stats(jobs: &[Job], now: DateTime<Utc>) -> DashboardStats {
    let start_of_today = start_of_day(now);
    let start_of_month = start_of_month(now);
    let start_of_last_month = start_of_month
        .checked_sub_months(Months::new(1))
        .unwrap_or(start_of_month);

    let total_jobs = jobs.len() as u64;
    let jobs_posted_today = jobs.iter().filter(|j| j.created_at > start_of_today).count() as u64;
    let jobs_posted_this_month =
        jobs.iter().filter(|j| j.created_at > start_of_month).count() as u64;
    let jobs_posted_last_month = jobs
        .iter()
        .filter(|j| j.created_at > start_of_last_month && j.created_at < start_of_month)
        .count() as u64;

    DashboardStats {
        total_jobs,
        jobs_posted_today,
        jobs_posted_this_month,
        total_visitors: TOTAL_VISITORS,
        active_applications: ACTIVE_APPLICATIONS,
        jobs_growth_percentage: growth_percentage(jobs_posted_this_month, jobs_posted_last_month),
        visitors_growth_percentage: VISITORS_GROWTH,
        applications_growth_percentage: APPLICATIONS_GROWTH,
        top_locations: top_locations(jobs),
        top_companies: top_companies(jobs),
        recent_activities: recent_activities(jobs, now),
    }
}

/// Month-over-month growth. A zero baseline maps to 100% when anything was
/// posted this month, 0% otherwise.
pub fn growth_percentage(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    (current as f64 - previous as f64) / previous as f64 * 100.0
}

fn counted<F>(jobs: &[Job], key: F) -> Vec<(String, u64)>
where
    F: Fn(&Job) -> &str,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for job in jobs {
        *counts.entry(key(job)).or_default() += 1;
    }
    let mut entries: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    // Count descending, name ascending for a stable order on ties.
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(TOP_N);
    entries
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn top_locations(jobs: &[Job]) -> Vec<LocationStats> {
    let total = jobs.len() as u64;
    counted(jobs, |j| &j.location)
        .into_iter()
        .map(|(location, count)| LocationStats {
            location,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

fn top_companies(jobs: &[Job]) -> Vec<CompanyStats> {
    let total = jobs.len() as u64;
    counted(jobs, |j| &j.company)
        .into_iter()
        .map(|(company, count)| CompanyStats {
            company,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

fn recent_activities(jobs: &[Job], now: DateTime<Utc>) -> Vec<RecentActivity> {
    let mut recent: Vec<&Job> = jobs.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent
        .into_iter()
        .take(TOP_N)
        .map(|job| RecentActivity {
            message: format!("New job posted: {} at {}", job.title, job.company),
            time: time_ago(job.created_at, now),
            activity_type: ActivityType::Job,
        })
        .collect()
}

/// Human "time ago" string: minutes under an hour, hours under a day,
/// days under 30, then months.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    let minutes = delta.num_minutes().max(0);
    let hours = delta.num_hours().max(0);
    let days = delta.num_days().max(0);

    if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 30 {
        plural(days, "day")
    } else {
        plural(days / 30, "month")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
        .single()
        .unwrap_or(now)
}

fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn job_created(company: &str, location: &str, created_at: DateTime<Utc>) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: "Engineer".to_string(),
            company: company.to_string(),
            location: location.to_string(),
            description: "<p>desc</p>".to_string(),
            salary_range: "$100k".to_string(),
            posted_at: created_at,
            source_url: "https://example.com".to_string(),
            tags: vec![],
            created_at,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_growth_percentage_zero_baseline() {
        assert_eq!(growth_percentage(3, 0), 100.0);
        assert_eq!(growth_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_growth_percentage_regular_cases() {
        assert_eq!(growth_percentage(6, 4), 50.0);
        assert_eq!(growth_percentage(2, 4), -50.0);
    }

    #[test]
    fn test_date_buckets() {
        let now = now();
        let jobs = vec![
            job_created("A", "Remote", now - Duration::hours(2)), // today + this month
            job_created("B", "Remote", now - Duration::days(10)), // this month
            job_created("C", "Remote", now - Duration::days(20)), // last month (Jul 26)
            job_created("D", "Remote", now - Duration::days(90)), // older
        ];
        let stats = compute_stats(&jobs, now);
        assert_eq!(stats.total_jobs, 4);
        assert_eq!(stats.jobs_posted_today, 1);
        assert_eq!(stats.jobs_posted_this_month, 2);
        // 2 this month vs 1 last month
        assert_eq!(stats.jobs_growth_percentage, 100.0);
    }

    #[test]
    fn test_top_locations_counts_and_percentages() {
        let now = now();
        let jobs = vec![
            job_created("A", "Remote", now),
            job_created("B", "Remote", now),
            job_created("C", "Austin, TX", now),
            job_created("D", "New York, NY", now),
        ];
        let stats = compute_stats(&jobs, now);
        assert_eq!(stats.top_locations[0].location, "Remote");
        assert_eq!(stats.top_locations[0].count, 2);
        assert_eq!(stats.top_locations[0].percentage, 50.0);
        assert_eq!(stats.top_locations.len(), 3);
    }

    #[test]
    fn test_top_companies_limited_to_five() {
        let now = now();
        let jobs: Vec<Job> = (0..8)
            .map(|i| job_created(&format!("Company{i}"), "Remote", now))
            .collect();
        let stats = compute_stats(&jobs, now);
        assert_eq!(stats.top_companies.len(), 5);
    }

    #[test]
    fn test_recent_activities_newest_first() {
        let now = now();
        let jobs = vec![
            job_created("Old Corp", "Remote", now - Duration::days(3)),
            job_created("New Corp", "Remote", now - Duration::minutes(5)),
        ];
        let stats = compute_stats(&jobs, now);
        assert_eq!(stats.recent_activities.len(), 2);
        assert_eq!(
            stats.recent_activities[0].message,
            "New job posted: Engineer at New Corp"
        );
        assert_eq!(stats.recent_activities[0].time, "5 minutes ago");
        assert_eq!(stats.recent_activities[0].activity_type, ActivityType::Job);
    }

    #[test]
    fn test_time_ago_units() {
        let now = now();
        assert_eq!(time_ago(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "2 days ago");
        assert_eq!(time_ago(now - Duration::days(65), now), "2 months ago");
    }

    #[test]
    fn test_empty_store_yields_zeroed_stats() {
        let stats = compute_stats(&[], now());
        assert_eq!(stats.total_jobs, 0);
        assert_eq!(stats.jobs_growth_percentage, 0.0);
        assert!(stats.top_locations.is_empty());
        assert!(stats.recent_activities.is_empty());
    }
}
