//! Postgres-backed `JobStore` using sqlx. Selected when `DATABASE_URL` is set.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobRequest, PageResponse, SortDir};
use crate::store::{not_found, JobQuery, JobStore};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS jobs (
    id           UUID PRIMARY KEY,
    title        TEXT NOT NULL,
    company      TEXT NOT NULL,
    location     TEXT NOT NULL DEFAULT '',
    description  TEXT NOT NULL,
    salary_range TEXT NOT NULL DEFAULT '',
    posted_at    TIMESTAMPTZ NOT NULL,
    source_url   TEXT NOT NULL,
    tags         TEXT[] NOT NULL DEFAULT '{}',
    created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    company: String,
    location: String,
    description: String,
    salary_range: String,
    posted_at: DateTime<Utc>,
    source_url: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            title: row.title,
            company: row.company,
            location: row.location,
            description: row.description,
            salary_range: row.salary_range,
            posted_at: row.posted_at,
            source_url: row.source_url,
            tags: row.tags,
            created_at: row.created_at,
        }
    }
}

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    /// Connects and bootstraps the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        sqlx::query(SCHEMA).execute(&pool).await?;
        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

/// Appends the WHERE clause shared by the listing and count queries.
/// Mirrors the in-memory semantics: ILIKE substring matches, tag overlap.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &JobQuery) {
    builder.push(" WHERE 1=1");
    if let Some(company) = query.company.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        builder.push(" AND company ILIKE '%' || ");
        builder.push_bind(company.to_string());
        builder.push(" || '%'");
    }
    if let Some(location) = query.location.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        builder.push(" AND location ILIKE '%' || ");
        builder.push_bind(location.to_string());
        builder.push(" || '%'");
    }
    if let Some(title) = query.title.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        builder.push(" AND title ILIKE '%' || ");
        builder.push_bind(title.to_string());
        builder.push(" || '%'");
    }
    if !query.tags.is_empty() {
        let tags: Vec<String> = query.tags.iter().map(|t| t.trim().to_string()).collect();
        builder.push(" AND tags && ");
        builder.push_bind(tags);
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn list(&self, query: &JobQuery) -> Result<PageResponse<Job>, AppError> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) AS total FROM jobs");
        push_filters(&mut count, query);
        let total: i64 = count
            .build()
            .fetch_one(&self.pool)
            .await?
            .try_get("total")?;

        let size = query.size.max(1);
        let offset = i64::from(query.page) * i64::from(size);

        let mut select = QueryBuilder::new("SELECT * FROM jobs");
        push_filters(&mut select, query);
        select.push(format!(
            " ORDER BY {} {}",
            query.sort_by.column(),
            match query.sort_dir {
                SortDir::Asc => "ASC",
                SortDir::Desc => "DESC",
            }
        ));
        select.push(" LIMIT ");
        select.push_bind(i64::from(size));
        select.push(" OFFSET ");
        select.push_bind(offset);

        let rows: Vec<JobRow> = select.build_query_as().fetch_all(&self.pool).await?;
        let content = rows.into_iter().map(Job::from).collect();

        Ok(PageResponse::new(content, query.page, size, total as u64))
    }

    async fn get(&self, id: Uuid) -> Result<Job, AppError> {
        let row: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Job::from).ok_or_else(|| not_found(id))
    }

    async fn create(&self, req: &JobRequest) -> Result<Job, AppError> {
        let row: JobRow = sqlx::query_as(
            r#"
            INSERT INTO jobs (id, title, company, location, description, salary_range,
                              posted_at, source_url, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.title)
        .bind(&req.company)
        .bind(&req.location)
        .bind(&req.description)
        .bind(&req.salary_range)
        .bind(req.posted_at)
        .bind(&req.source_url)
        .bind(&req.tags)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, req: &JobRequest) -> Result<Job, AppError> {
        let row: Option<JobRow> = sqlx::query_as(
            r#"
            UPDATE jobs
            SET title = $2, company = $3, location = $4, description = $5,
                salary_range = $6, posted_at = $7, source_url = $8, tags = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.company)
        .bind(&req.location)
        .bind(&req.description)
        .bind(&req.salary_range)
        .bind(req.posted_at)
        .bind(&req.source_url)
        .bind(&req.tags)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Job::from).ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Job>, AppError> {
        let rows: Vec<JobRow> = sqlx::query_as("SELECT * FROM jobs ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }
}
