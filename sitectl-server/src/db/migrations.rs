//! Versioned schema migrations
//!
//! Applied versions are recorded in `schema_migrations`. Each step is
//! idempotent on its own (`IF NOT EXISTS`, column-existence checks) so a
//! database created by an older deployment without the version table is
//! adopted cleanly.

use chrono::Utc;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::DbError;

/// What a migration does
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Idempotent SQL statement
    Sql(&'static str),
    /// `ALTER TABLE ... ADD COLUMN`, skipped when the column exists
    AddColumn {
        table: &'static str,
        column: &'static str,
        definition: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub step: Step,
}

/// All migrations, in application order
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_visas",
        step: Step::Sql(
            r#"
            CREATE TABLE IF NOT EXISTS visas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL DEFAULT '',
                slug TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL DEFAULT '',
                descriptionImage TEXT NOT NULL DEFAULT '',
                descriptionImageWidth TEXT NOT NULL DEFAULT '',
                descriptionImageHeight TEXT NOT NULL DEFAULT '',
                descriptionImagePosition TEXT NOT NULL DEFAULT '',
                info TEXT NOT NULL DEFAULT '',
                metaTitle TEXT NOT NULL DEFAULT '',
                metaDescription TEXT NOT NULL DEFAULT '',
                metaKeywords TEXT NOT NULL DEFAULT '',
                image TEXT NOT NULL DEFAULT ''
            )
            "#,
        ),
    },
    Migration {
        version: 2,
        name: "visas_add_addon_heading",
        step: Step::AddColumn {
            table: "visas",
            column: "addonHeading",
            definition: "TEXT NOT NULL DEFAULT ''",
        },
    },
    Migration {
        version: 3,
        name: "visas_add_addon_description",
        step: Step::AddColumn {
            table: "visas",
            column: "addonDescription",
            definition: "TEXT NOT NULL DEFAULT ''",
        },
    },
    Migration {
        version: 4,
        name: "create_news",
        step: Step::Sql(
            r#"
            CREATE TABLE IF NOT EXISTS news (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL DEFAULT '',
                slug TEXT NOT NULL UNIQUE,
                summary TEXT NOT NULL DEFAULT '',
                image TEXT NOT NULL DEFAULT '',
                tag TEXT NOT NULL DEFAULT '',
                time TEXT NOT NULL DEFAULT '',
                readTime TEXT NOT NULL DEFAULT '',
                content TEXT NOT NULL DEFAULT ''
            )
            "#,
        ),
    },
    Migration {
        version: 5,
        name: "create_investor_visa",
        step: Step::Sql(
            r#"
            CREATE TABLE IF NOT EXISTS investor_visa (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL DEFAULT '',
                slug TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL DEFAULT '',
                descriptionImage TEXT NOT NULL DEFAULT '',
                descriptionImageWidth TEXT NOT NULL DEFAULT '',
                descriptionImageHeight TEXT NOT NULL DEFAULT '',
                descriptionImagePosition TEXT NOT NULL DEFAULT '',
                info TEXT NOT NULL DEFAULT '',
                metaTitle TEXT NOT NULL DEFAULT '',
                metaDescription TEXT NOT NULL DEFAULT '',
                metaKeywords TEXT NOT NULL DEFAULT '',
                image TEXT NOT NULL DEFAULT '',
                addonHeading TEXT NOT NULL DEFAULT '',
                addonDescription TEXT NOT NULL DEFAULT ''
            )
            "#,
        ),
    },
    Migration {
        version: 6,
        name: "create_jobs",
        step: Step::Sql(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL DEFAULT '',
                company TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '',
                country TEXT NOT NULL DEFAULT '',
                city TEXT NOT NULL DEFAULT '',
                domain TEXT NOT NULL DEFAULT '',
                experience TEXT NOT NULL DEFAULT '',
                minExperience INTEGER NOT NULL DEFAULT 0,
                time TEXT NOT NULL DEFAULT '',
                tags TEXT NOT NULL DEFAULT '',
                salary TEXT NOT NULL DEFAULT '',
                "type" TEXT NOT NULL DEFAULT '',
                level TEXT NOT NULL DEFAULT ''
            )
            "#,
        ),
    },
    Migration {
        version: 7,
        name: "index_jobs_country",
        step: Step::Sql("CREATE INDEX IF NOT EXISTS idx_jobs_country ON jobs(country)"),
    },
];

/// A row of `schema_migrations`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub applied_at: String,
}

/// Apply every pending migration in order. Returns the versions applied by
/// this call (empty when the schema was already current).
pub async fn run(pool: &SqlitePool) -> Result<Vec<i64>, DbError> {
    run_migrations(pool, MIGRATIONS).await
}

pub async fn run_migrations(
    pool: &SqlitePool,
    migrations: &[Migration],
) -> Result<Vec<i64>, DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    let done: Vec<i64> = applied(pool).await?.into_iter().map(|m| m.version).collect();
    let mut newly_applied = Vec::new();

    for migration in migrations {
        if done.contains(&migration.version) {
            continue;
        }

        let mut tx = pool.begin().await?;
        apply_step(&mut *tx, migration.step)
            .await
            .map_err(|source| DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            })?;

        sqlx::query("INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)")
            .bind(migration.version)
            .bind(migration.name)
            .bind(Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(version = migration.version, name = migration.name, "applied migration");
        newly_applied.push(migration.version);
    }

    tracing::info!(applied = newly_applied.len(), "Migrations complete");
    Ok(newly_applied)
}

/// Recorded migrations, oldest first.
pub async fn applied(pool: &SqlitePool) -> Result<Vec<AppliedMigration>, DbError> {
    let rows = sqlx::query("SELECT version, name, applied_at FROM schema_migrations ORDER BY version")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| AppliedMigration {
            version: r.get("version"),
            name: r.get("name"),
            applied_at: r.get("applied_at"),
        })
        .collect())
}

/// Recorded migrations, or none when the database has never been migrated.
///
/// Only a missing `schema_migrations` table counts as "never migrated"; any
/// other failure is returned.
pub async fn status(pool: &SqlitePool) -> Result<Vec<AppliedMigration>, DbError> {
    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations'",
    )
    .fetch_one(pool)
    .await?;

    if tracked == 0 {
        return Ok(Vec::new());
    }
    applied(pool).await
}

async fn apply_step(conn: &mut SqliteConnection, step: Step) -> Result<(), sqlx::Error> {
    match step {
        Step::Sql(sql) => {
            sqlx::query(sql).execute(&mut *conn).await?;
        }
        Step::AddColumn {
            table,
            column,
            definition,
        } => {
            if column_exists(&mut *conn, table, column).await? {
                tracing::debug!(table, column, "column already present");
                return Ok(());
            }
            let sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition);
            sqlx::query(&sql).execute(&mut *conn).await?;
        }
    }
    Ok(())
}

async fn column_exists(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_one(&mut *conn)
            .await?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    async fn table_columns(pool: &SqlitePool, table: &str) -> Vec<String> {
        sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
            .bind(table)
            .fetch_all(pool)
            .await
            .unwrap()
    }

    #[test]
    fn versions_are_strictly_increasing() {
        for pair in MIGRATIONS.windows(2) {
            assert!(pair[0].version < pair[1].version);
        }
    }

    #[tokio::test]
    async fn fresh_database_gets_every_migration() {
        let pool = create_memory_pool().await.unwrap();
        let applied_now = run(&pool).await.unwrap();

        assert_eq!(applied_now.len(), MIGRATIONS.len());
        let visa_cols = table_columns(&pool, "visas").await;
        assert!(visa_cols.contains(&"addonHeading".to_string()));
        assert!(visa_cols.contains(&"addonDescription".to_string()));
        assert!(!table_columns(&pool, "jobs").await.is_empty());
        assert!(!table_columns(&pool, "news").await.is_empty());
        assert!(!table_columns(&pool, "investor_visa").await.is_empty());
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let pool = create_memory_pool().await.unwrap();
        run(&pool).await.unwrap();
        let again = run(&pool).await.unwrap();

        assert!(again.is_empty());
        assert_eq!(applied(&pool).await.unwrap().len(), MIGRATIONS.len());
    }

    #[tokio::test]
    async fn status_of_unmigrated_database_is_empty() {
        let pool = create_memory_pool().await.unwrap();
        assert!(status(&pool).await.unwrap().is_empty());

        run(&pool).await.unwrap();
        assert_eq!(status(&pool).await.unwrap().len(), MIGRATIONS.len());
    }

    #[tokio::test]
    async fn status_propagates_other_failures() {
        let pool = create_memory_pool().await.unwrap();
        pool.close().await;
        assert!(status(&pool).await.is_err());
    }

    #[tokio::test]
    async fn adopts_legacy_visas_table() {
        let pool = create_memory_pool().await.unwrap();
        // Older deployments created the table already holding the addon column
        sqlx::query(
            "CREATE TABLE visas (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, slug TEXT UNIQUE, \
             description TEXT, descriptionImage TEXT, descriptionImageWidth TEXT, \
             descriptionImageHeight TEXT, descriptionImagePosition TEXT, info TEXT, metaTitle TEXT, \
             metaDescription TEXT, metaKeywords TEXT, image TEXT, addonHeading TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();

        run(&pool).await.unwrap();

        let cols = table_columns(&pool, "visas").await;
        assert_eq!(cols.iter().filter(|c| *c == "addonHeading").count(), 1);
        assert!(cols.contains(&"addonDescription".to_string()));
    }
}
