//! Job repository

use chrono::Utc;
use sqlx::SqlitePool;

use sitectl_core::models::Job;

use crate::db::DbError;

const SELECT_COLUMNS: &str = r#"
    id,
    COALESCE(title, '') AS title,
    COALESCE(company, '') AS company,
    COALESCE(location, '') AS location,
    COALESCE(country, '') AS country,
    COALESCE(city, '') AS city,
    COALESCE(domain, '') AS domain,
    COALESCE(experience, '') AS experience,
    COALESCE(minExperience, 0) AS minExperience,
    COALESCE(time, '') AS time,
    COALESCE(tags, '') AS tags,
    COALESCE(salary, '') AS salary,
    COALESCE("type", '') AS "type",
    COALESCE(level, '') AS level
"#;

/// Job repository
pub struct JobRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> JobRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Job>, DbError> {
        let sql = format!("SELECT {} FROM jobs ORDER BY id", SELECT_COLUMNS);
        Ok(sqlx::query_as::<_, Job>(&sql).fetch_all(self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Job, DbError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = ?", SELECT_COLUMNS);
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("job", id))
    }

    /// Insert a job under its client-chosen id, or the current time in
    /// milliseconds when none was sent.
    pub async fn create(&self, job: &Job) -> Result<Job, DbError> {
        let id = job.id.unwrap_or_else(|| Utc::now().timestamp_millis());

        sqlx::query(
            r#"
            INSERT INTO jobs
            (id, title, company, location, country, city, domain, experience,
             minExperience, time, tags, salary, "type", level)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.country)
        .bind(&job.city)
        .bind(&job.domain)
        .bind(&job.experience)
        .bind(job.min_experience)
        .bind(&job.time)
        .bind(job.tags.joined())
        .bind(&job.salary)
        .bind(&job.job_type)
        .bind(&job.level)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::from_write("job", id, e))?;

        self.get(id).await
    }

    /// Replace every field of the job with `id`.
    pub async fn update(&self, id: i64, job: &Job) -> Result<Job, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE jobs SET
                title = ?, company = ?, location = ?, country = ?, city = ?, domain = ?,
                experience = ?, minExperience = ?, time = ?, tags = ?, salary = ?,
                "type" = ?, level = ?
            WHERE id = ?
            "#,
        )
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.country)
        .bind(&job.city)
        .bind(&job.domain)
        .bind(&job.experience)
        .bind(job.min_experience)
        .bind(&job.time)
        .bind(job.tags.joined())
        .bind(&job.salary)
        .bind(&job.job_type)
        .bind(&job.level)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("job", id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("job", id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(self.pool)
            .await?)
    }
}
