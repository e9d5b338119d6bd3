//! PostgreSQL Repository Implementation
//!
//! One row per user; links are a JSONB array on that row. `link_slugs`
//! mirrors every embedded slug so global uniqueness is enforced by a primary
//! key, written in the same transaction as the array.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;

use crate::error::{StoreError, StoreResult};
use crate::model::{Link, User};
use crate::repository::{LinkRepository, UserRepository};

/// Default per-operation deadline
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Deadline applied to every repository call
    pub query_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    config: StoreConfig,
}

impl PgStore {
    pub fn new(pool: PgPool, config: StoreConfig) -> Self {
        Self { pool, config }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn with_timeout<T, F>(&self, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        tokio::time::timeout(self.config.query_timeout, fut)
            .await
            .map_err(|_| StoreError::Timeout(self.config.query_timeout))?
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgStore {
    async fn create_user(&self, user: &User) -> StoreResult<()> {
        self.with_timeout(async {
            let mut tx = self.pool.begin().await?;

            let inserted = sqlx::query(
                r#"
                INSERT INTO users (email, username, password_hash, created_at, links)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (email) DO NOTHING
                "#,
            )
            .bind(&user.email)
            .bind(&user.username)
            .bind(user.password.as_phc_string())
            .bind(user.created_at)
            .bind(Json(&user.links))
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if inserted == 0 {
                return Err(StoreError::DuplicateEmail);
            }

            for link in &user.links {
                claim_slug(&mut tx, &link.slug, &user.email).await?;
            }

            tx.commit().await?;

            tracing::debug!(email = %user.email, "User document created");
            Ok(())
        })
        .await
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.with_timeout(async {
            let row = sqlx::query_as::<_, UserRow>(
                r#"
                SELECT email, username, password_hash, created_at, links
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

            row.map(UserRow::into_user).transpose()
        })
        .await
    }

    async fn update_user(&self, user: &User) -> StoreResult<()> {
        self.with_timeout(async {
            let updated = sqlx::query(
                r#"
                UPDATE users
                SET username = $2, password_hash = $3
                WHERE email = $1
                "#,
            )
            .bind(&user.email)
            .bind(&user.username)
            .bind(user.password.as_phc_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

            if updated == 0 {
                return Err(StoreError::UserNotFound);
            }
            Ok(())
        })
        .await
    }

    async fn delete_user_by_email(&self, email: &str) -> StoreResult<()> {
        self.with_timeout(async {
            // link_slugs rows go with the user (ON DELETE CASCADE)
            let deleted = sqlx::query("DELETE FROM users WHERE email = $1")
                .bind(email)
                .execute(&self.pool)
                .await?
                .rows_affected();

            if deleted == 0 {
                return Err(StoreError::UserNotFound);
            }
            Ok(())
        })
        .await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.with_timeout(async {
            let rows = sqlx::query_as::<_, UserRow>(
                r#"
                SELECT email, username, password_hash, created_at, links
                FROM users
                ORDER BY created_at, email
                "#,
            )
            .fetch_all(&self.pool)
            .await?;

            rows.into_iter().map(UserRow::into_user).collect()
        })
        .await
    }
}

// ============================================================================
// Link Repository Implementation
// ============================================================================

impl LinkRepository for PgStore {
    async fn create_link(&self, owner_email: &str, link: &Link) -> StoreResult<()> {
        self.with_timeout(async {
            let mut tx = self.pool.begin().await?;

            // Locks the owner row for the rest of the transaction
            let appended = sqlx::query(
                r#"
                UPDATE users
                SET links = links || $2
                WHERE email = $1
                "#,
            )
            .bind(owner_email)
            .bind(Json([link]))
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if appended == 0 {
                return Err(StoreError::UserNotFound);
            }

            claim_slug(&mut tx, &link.slug, owner_email).await?;

            tx.commit().await?;
            Ok(())
        })
        .await
    }

    async fn get_link_by_slug(&self, slug: &str) -> StoreResult<Option<Link>> {
        self.with_timeout(async {
            let row = sqlx::query_as::<_, (Json<Link>,)>(
                r#"
                SELECT elem
                FROM link_slugs s
                JOIN users u ON u.email = s.owner_email
                CROSS JOIN LATERAL jsonb_array_elements(u.links) AS elem
                WHERE s.slug = $1
                  AND elem->>'slug' = $1
                LIMIT 1
                "#,
            )
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.map(|(Json(link),)| link))
        })
        .await
    }

    async fn list_links(&self, owner_email: &str) -> StoreResult<Vec<Link>> {
        self.with_timeout(async {
            let row = sqlx::query_as::<_, (Json<Vec<Link>>,)>(
                "SELECT links FROM users WHERE email = $1",
            )
            .bind(owner_email)
            .fetch_optional(&self.pool)
            .await?;

            match row {
                Some((Json(links),)) => Ok(links),
                None => Err(StoreError::UserNotFound),
            }
        })
        .await
    }

    async fn delete_link_by_slug(&self, owner_email: &str, slug: &str) -> StoreResult<()> {
        self.with_timeout(async {
            let mut tx = self.pool.begin().await?;

            let released = sqlx::query(
                "DELETE FROM link_slugs WHERE slug = $1 AND owner_email = $2",
            )
            .bind(slug)
            .bind(owner_email)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if released == 0 {
                return Err(StoreError::LinkNotFound);
            }

            sqlx::query(
                r#"
                UPDATE users
                SET links = COALESCE(
                    (
                        SELECT jsonb_agg(e ORDER BY ord)
                        FROM jsonb_array_elements(links) WITH ORDINALITY AS t(e, ord)
                        WHERE e->>'slug' <> $2
                    ),
                    '[]'::jsonb
                )
                WHERE email = $1
                "#,
            )
            .bind(owner_email)
            .bind(slug)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(())
        })
        .await
    }

    async fn update_link_by_slug(&self, owner_email: &str, link: &Link) -> StoreResult<()> {
        let patch = json!({
            "original_url": link.original_url,
            "expired_date": link.expired_date,
        });

        self.with_timeout(async {
            let updated = sqlx::query(
                r#"
                UPDATE users
                SET links = (
                    SELECT jsonb_agg(
                        CASE WHEN e->>'slug' = $2 THEN e || $3 ELSE e END
                        ORDER BY ord
                    )
                    FROM jsonb_array_elements(links) WITH ORDINALITY AS t(e, ord)
                )
                WHERE email = $1
                  AND links @> jsonb_build_array(jsonb_build_object('slug', $2::text))
                "#,
            )
            .bind(owner_email)
            .bind(&link.slug)
            .bind(Json(&patch))
            .execute(&self.pool)
            .await?
            .rows_affected();

            if updated == 0 {
                return Err(StoreError::LinkNotFound);
            }
            Ok(())
        })
        .await
    }
}

/// Reserve `slug` for `owner_email` inside `tx`.
async fn claim_slug(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    slug: &str,
    owner_email: &str,
) -> StoreResult<()> {
    let claimed = sqlx::query(
        r#"
        INSERT INTO link_slugs (slug, owner_email)
        VALUES ($1, $2)
        ON CONFLICT (slug) DO NOTHING
        "#,
    )
    .bind(slug)
    .bind(owner_email)
    .execute(&mut **tx)
    .await?
    .rows_affected();

    if claimed == 0 {
        return Err(StoreError::DuplicateSlug);
    }
    Ok(())
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    email: String,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    links: Json<Vec<Link>>,
}

impl UserRow {
    fn into_user(self) -> StoreResult<User> {
        let password = HashedPassword::from_phc_string(self.password_hash).map_err(|e| {
            StoreError::Corrupt(format!("password_hash for {}: {}", self.email, e))
        })?;

        Ok(User {
            username: self.username,
            email: self.email,
            password,
            created_at: self.created_at,
            links: self.links.0,
        })
    }
}
