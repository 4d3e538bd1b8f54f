use crate::domain::meditation::Meditation;
use crate::error::AppResult;
use crate::infrastructure::db::{self, DbPool};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for generated meditation scripts
#[async_trait]
pub trait MeditationRepository: Send + Sync {
    async fn create(&self, prompt: &str, content: &str) -> AppResult<Meditation>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Meditation>>;

    /// All meditations, oldest first
    async fn list(&self) -> AppResult<Vec<Meditation>>;

    /// Returns `None` when no meditation has this id
    async fn rate(&self, id: i32, rating: i32) -> AppResult<Option<Meditation>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn ping(&self) -> AppResult<()>;
}

pub struct PgMeditationRepository {
    pool: Arc<DbPool>,
}

impl PgMeditationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeditationRepository for PgMeditationRepository {
    async fn create(&self, prompt: &str, content: &str) -> AppResult<Meditation> {
        let pool = self.pool.as_ref();
        let meditation = sqlx::query_as::<_, Meditation>(
            r#"
            INSERT INTO meditations (prompt, content)
            VALUES ($1, $2)
            RETURNING id, prompt, content, rating, created_at
            "#,
        )
        .bind(prompt)
        .bind(content)
        .fetch_one(pool)
        .await?;

        Ok(meditation)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Meditation>> {
        let pool = self.pool.as_ref();
        let meditation = sqlx::query_as::<_, Meditation>(
            r#"
            SELECT id, prompt, content, rating, created_at
            FROM meditations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(meditation)
    }

    async fn list(&self) -> AppResult<Vec<Meditation>> {
        let pool = self.pool.as_ref();
        let meditations = sqlx::query_as::<_, Meditation>(
            r#"
            SELECT id, prompt, content, rating, created_at
            FROM meditations
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(meditations)
    }

    async fn rate(&self, id: i32, rating: i32) -> AppResult<Option<Meditation>> {
        let pool = self.pool.as_ref();
        let meditation = sqlx::query_as::<_, Meditation>(
            r#"
            UPDATE meditations
            SET rating = $2
            WHERE id = $1
            RETURNING id, prompt, content, rating, created_at
            "#,
        )
        .bind(id)
        .bind(rating)
        .fetch_optional(pool)
        .await?;

        Ok(meditation)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM meditations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        db::check_connection(self.pool.as_ref()).await?;
        Ok(())
    }
}
