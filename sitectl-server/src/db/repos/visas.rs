//! Visa repository, shared by the `visas` and `investor_visa` tables

use sqlx::SqlitePool;

use sitectl_core::models::{Visa, VisaKind};

use crate::db::DbError;

/// Column list with NULLs from legacy rows mapped to empty strings
const SELECT_COLUMNS: &str = r#"
    id,
    COALESCE(name, '') AS name,
    COALESCE(slug, '') AS slug,
    COALESCE(description, '') AS description,
    COALESCE(descriptionImage, '') AS descriptionImage,
    COALESCE(descriptionImageWidth, '') AS descriptionImageWidth,
    COALESCE(descriptionImageHeight, '') AS descriptionImageHeight,
    COALESCE(descriptionImagePosition, '') AS descriptionImagePosition,
    COALESCE(info, '') AS info,
    COALESCE(metaTitle, '') AS metaTitle,
    COALESCE(metaDescription, '') AS metaDescription,
    COALESCE(metaKeywords, '') AS metaKeywords,
    COALESCE(image, '') AS image,
    COALESCE(addonHeading, '') AS addonHeading,
    COALESCE(addonDescription, '') AS addonDescription
"#;

/// Visa repository
pub struct VisaRepo<'a> {
    pool: &'a SqlitePool,
    kind: VisaKind,
}

impl<'a> VisaRepo<'a> {
    pub fn new(pool: &'a SqlitePool, kind: VisaKind) -> Self {
        Self { pool, kind }
    }

    fn resource(&self) -> &'static str {
        match self.kind {
            VisaKind::Standard => "visa",
            VisaKind::Investor => "investor visa",
        }
    }

    /// All visas in insertion order.
    pub async fn list(&self) -> Result<Vec<Visa>, DbError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", SELECT_COLUMNS, self.kind.table());
        Ok(sqlx::query_as::<_, Visa>(&sql).fetch_all(self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Visa, DbError> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", SELECT_COLUMNS, self.kind.table());
        sqlx::query_as::<_, Visa>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(self.resource(), id))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Visa, DbError> {
        let sql = format!("SELECT {} FROM {} WHERE slug = ?", SELECT_COLUMNS, self.kind.table());
        sqlx::query_as::<_, Visa>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(self.resource(), slug))
    }

    /// Insert a visa; the store assigns the id. Any `id` on the input is ignored.
    pub async fn create(&self, visa: &Visa) -> Result<Visa, DbError> {
        let sql = format!(
            r#"
            INSERT INTO {}
            (name, slug, description, descriptionImage, descriptionImageWidth, descriptionImageHeight,
             descriptionImagePosition, info, metaTitle, metaDescription, metaKeywords, image,
             addonHeading, addonDescription)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            self.kind.table()
        );

        let result = bind_fields(sqlx::query(&sql), visa)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::from_write(self.resource(), &visa.slug, e))?;

        self.get(result.last_insert_rowid()).await
    }

    /// Replace every field of the visa with `id`.
    pub async fn update(&self, id: i64, visa: &Visa) -> Result<Visa, DbError> {
        let sql = format!(
            r#"
            UPDATE {} SET
                name = ?, slug = ?, description = ?, descriptionImage = ?, descriptionImageWidth = ?,
                descriptionImageHeight = ?, descriptionImagePosition = ?, info = ?, metaTitle = ?,
                metaDescription = ?, metaKeywords = ?, image = ?, addonHeading = ?, addonDescription = ?
            WHERE id = ?
            "#,
            self.kind.table()
        );

        let result = bind_fields(sqlx::query(&sql), visa)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::from_write(self.resource(), &visa.slug, e))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(self.resource(), id));
        }
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.kind.table());
        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(self.resource(), id));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, DbError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.kind.table());
        Ok(sqlx::query_scalar::<_, i64>(&sql).fetch_one(self.pool).await?)
    }
}

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>;

fn bind_fields<'q>(query: SqliteQuery<'q>, visa: &'q Visa) -> SqliteQuery<'q> {
    query
        .bind(&visa.name)
        .bind(visa.slug.trim())
        .bind(&visa.description)
        .bind(&visa.description_image)
        .bind(&visa.description_image_width)
        .bind(&visa.description_image_height)
        .bind(&visa.description_image_position)
        .bind(&visa.info)
        .bind(&visa.meta_title)
        .bind(&visa.meta_description)
        .bind(&visa.meta_keywords)
        .bind(&visa.image)
        .bind(&visa.addon_heading)
        .bind(&visa.addon_description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, migrations};

    async fn pool() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        migrations::run(&pool).await.unwrap();
        pool
    }

    fn visa(slug: &str) -> Visa {
        Visa {
            name: format!("Visa {}", slug),
            slug: slug.to_string(),
            description: "Work and live abroad".into(),
            ..Visa::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_round_trips() {
        let pool = pool().await;
        let repo = VisaRepo::new(&pool, VisaKind::Standard);

        let created = repo.create(&visa("golden-visa")).await.unwrap();
        assert!(created.id.is_some());
        assert_eq!(created.slug, "golden-visa");
        assert_eq!(repo.get_by_slug("golden-visa").await.unwrap(), created);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_slug_is_conflict() {
        let pool = pool().await;
        let repo = VisaRepo::new(&pool, VisaKind::Standard);
        repo.create(&visa("skilled-worker")).await.unwrap();

        let err = repo.create(&visa("skilled-worker")).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found_and_keeps_rows() {
        let pool = pool().await;
        let repo = VisaRepo::new(&pool, VisaKind::Standard);
        repo.create(&visa("a")).await.unwrap();
        repo.create(&visa("b")).await.unwrap();

        let err = repo.delete(999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn repeated_delete_reports_not_found() {
        let pool = pool().await;
        let repo = VisaRepo::new(&pool, VisaKind::Standard);
        let id = repo.create(&visa("once")).await.unwrap().id.unwrap();

        repo.delete(id).await.unwrap();
        assert!(matches!(repo.delete(id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let pool = pool().await;
        let repo = VisaRepo::new(&pool, VisaKind::Standard);
        let id = repo.create(&visa("blue-card")).await.unwrap().id.unwrap();

        let mut changed = visa("eu-blue-card");
        changed.addon_heading = "Eligibility".into();
        let updated = repo.update(id, &changed).await.unwrap();

        assert_eq!(updated.slug, "eu-blue-card");
        assert_eq!(updated.addon_heading, "Eligibility");
        assert!(matches!(repo.update(id + 100, &changed).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn tables_are_independent() {
        let pool = pool().await;
        VisaRepo::new(&pool, VisaKind::Standard)
            .create(&visa("shared-slug"))
            .await
            .unwrap();

        let investor = VisaRepo::new(&pool, VisaKind::Investor);
        investor.create(&visa("shared-slug")).await.unwrap();
        assert_eq!(investor.count().await.unwrap(), 1);
    }
}
