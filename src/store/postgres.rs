use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool, Row};

use crate::model::{normalize_email, Id, Post, Profile, User};
use crate::store::error::StoreError;
use crate::store::traits::{PostStore, ProfileStore, Store, UserStore};

/// Document store on PostgreSQL: each entity is a JSONB document, with the
/// lookup keys and the optimistic `version` mirrored into plain columns.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run the embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn profile_from_row(row: &sqlx::postgres::PgRow) -> Result<Profile> {
    let Json(mut profile): Json<Profile> = row
        .try_get("document")
        .context("Failed to decode profile document")?;
    profile.version = row.try_get("version")?;
    Ok(profile)
}

fn post_from_row(row: &sqlx::postgres::PgRow) -> Result<Post> {
    let Json(mut post): Json<Post> = row
        .try_get("document")
        .context("Failed to decode post document")?;
    post.version = row.try_get("version")?;
    Ok(post)
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> Result<User> {
    let Json(user): Json<User> = row
        .try_get("document")
        .context("Failed to decode user document")?;
    Ok(user)
}

#[async_trait::async_trait]
impl UserStore for PostgresStore {
    async fn get_user(&self, id: &Id) -> Result<Option<User>> {
        let row = sqlx::query("SELECT document FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user")?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT document FROM users WHERE email = $1")
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch user by email")?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn insert_user(&self, user: User) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, document, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(Json(&user))
        .bind(user.date)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => {
                Err(StoreError::duplicate("User", user.email).into())
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to insert user")),
        }
    }
}

#[async_trait::async_trait]
impl ProfileStore for PostgresStore {
    async fn get_profile_by_user(&self, user_id: &Id) -> Result<Option<Profile>> {
        let row = sqlx::query("SELECT document, version FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch profile")?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let rows = sqlx::query("SELECT document, version FROM profiles ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list profiles")?;

        rows.iter().map(profile_from_row).collect()
    }

    async fn insert_profile(&self, mut profile: Profile) -> Result<Profile> {
        profile.version = 1;
        let result = sqlx::query(
            r#"
            INSERT INTO profiles (id, user_id, document, version, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.user)
        .bind(Json(&profile))
        .bind(profile.version)
        .bind(profile.date)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(profile),
            Err(e) if is_unique_violation(&e) => {
                Err(StoreError::duplicate("Profile", profile.user).into())
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to insert profile")),
        }
    }

    async fn save_profile(&self, mut profile: Profile) -> Result<Profile> {
        let expected = profile.version;
        profile.version = expected + 1;

        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET document = $1, version = $2, updated_at = NOW()
            WHERE id = $3 AND version = $4
            "#,
        )
        .bind(Json(&profile))
        .bind(profile.version)
        .bind(&profile.id)
        .bind(expected)
        .execute(&self.pool)
        .await
        .context("Failed to save profile")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::version_conflict("Profile", profile.id, expected).into());
        }
        Ok(profile)
    }
}

#[async_trait::async_trait]
impl PostStore for PostgresStore {
    async fn get_post(&self, id: &Id) -> Result<Option<Post>> {
        let row = sqlx::query("SELECT document, version FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch post")?;

        row.as_ref().map(post_from_row).transpose()
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query("SELECT document, version FROM posts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list posts")?;

        rows.iter().map(post_from_row).collect()
    }

    async fn insert_post(&self, mut post: Post) -> Result<Post> {
        post.version = 1;
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, document, version, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&post.id)
        .bind(&post.user)
        .bind(Json(&post))
        .bind(post.version)
        .bind(post.date)
        .execute(&self.pool)
        .await
        .context("Failed to insert post")?;

        Ok(post)
    }

    async fn save_post(&self, mut post: Post) -> Result<Post> {
        let expected = post.version;
        post.version = expected + 1;

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET document = $1, version = $2, updated_at = NOW()
            WHERE id = $3 AND version = $4
            "#,
        )
        .bind(Json(&post))
        .bind(post.version)
        .bind(&post.id)
        .bind(expected)
        .execute(&self.pool)
        .await
        .context("Failed to save post")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::version_conflict("Post", post.id, expected).into());
        }
        Ok(post)
    }

    async fn delete_post(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete post")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    async fn delete_account(&self, user_id: &Id) -> Result<Option<u64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin account deletion")?;

        let posts = sqlx::query("DELETE FROM posts WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete posts for user")?
            .rows_affected();

        sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete profile")?;

        let users = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete user")?
            .rows_affected();

        if users == 0 {
            tx.rollback()
                .await
                .context("Failed to roll back account deletion")?;
            return Ok(None);
        }

        tx.commit()
            .await
            .context("Failed to commit account deletion")?;
        Ok(Some(posts))
    }
}
