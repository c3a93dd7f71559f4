//! News repository
//!
//! Articles are keyed by slug at the API. The slug is written once at
//! creation and never changed by an update.

use sqlx::SqlitePool;

use sitectl_core::models::NewsItem;

use crate::db::DbError;

const SELECT_COLUMNS: &str = r#"
    id,
    COALESCE(title, '') AS title,
    slug,
    COALESCE(summary, '') AS summary,
    COALESCE(image, '') AS image,
    COALESCE(tag, '') AS tag,
    COALESCE(time, '') AS time,
    COALESCE(readTime, '') AS readTime,
    COALESCE(content, '') AS content
"#;

/// News repository
pub struct NewsRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> NewsRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All articles, newest first.
    pub async fn list(&self) -> Result<Vec<NewsItem>, DbError> {
        let sql = format!("SELECT {} FROM news ORDER BY id DESC", SELECT_COLUMNS);
        Ok(sqlx::query_as::<_, NewsItem>(&sql).fetch_all(self.pool).await?)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<NewsItem, DbError> {
        let sql = format!("SELECT {} FROM news WHERE slug = ?", SELECT_COLUMNS);
        sqlx::query_as::<_, NewsItem>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("news", slug))
    }

    /// Insert an article under `slug`.
    pub async fn create(&self, slug: &str, item: &NewsItem) -> Result<NewsItem, DbError> {
        sqlx::query(
            r#"
            INSERT INTO news (title, slug, summary, image, tag, time, readTime, content)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.title)
        .bind(slug)
        .bind(&item.summary)
        .bind(&item.image)
        .bind(&item.tag)
        .bind(&item.time)
        .bind(&item.read_time)
        .bind(&item.content)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::from_write("news", slug, e))?;

        self.get_by_slug(slug).await
    }

    /// Replace the mutable fields of the article at `slug`. The slug stays
    /// as it was, whatever the new title.
    pub async fn update(&self, slug: &str, item: &NewsItem) -> Result<NewsItem, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE news SET
                title = ?, summary = ?, image = ?, tag = ?, time = ?, readTime = ?, content = ?
            WHERE slug = ?
            "#,
        )
        .bind(&item.title)
        .bind(&item.summary)
        .bind(&item.image)
        .bind(&item.tag)
        .bind(&item.time)
        .bind(&item.read_time)
        .bind(&item.content)
        .bind(slug)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("news", slug));
        }
        self.get_by_slug(slug).await
    }

    pub async fn delete(&self, slug: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM news WHERE slug = ?")
            .bind(slug)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("news", slug));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news")
            .fetch_one(self.pool)
            .await?)
    }
}
