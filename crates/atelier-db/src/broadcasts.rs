//! Broadcast log repository.

use async_trait::async_trait;
use atelier_core::models::Broadcast;
use atelier_core::query::{Predicate, SortOrder};
use atelier_core::repository::BroadcastRepository;
use atelier_core::AppResult;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::predicate::{push_order_page, push_where};

#[derive(Clone)]
pub struct PgBroadcastRepository {
    pool: PgPool,
}

impl PgBroadcastRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BroadcastRepository for PgBroadcastRepository {
    async fn insert(&self, email: &str, subject: &str, html: &str) -> AppResult<Broadcast> {
        let broadcast = sqlx::query_as::<_, Broadcast>(
            "INSERT INTO broadcasts (email, subject, html) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(email)
        .bind(subject)
        .bind(html)
        .fetch_one(&self.pool)
        .await?;
        Ok(broadcast)
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<Broadcast>> {
        let broadcast = sqlx::query_as::<_, Broadcast>("SELECT * FROM broadcasts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(broadcast)
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM broadcasts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<Broadcast>> {
        let mut qb = QueryBuilder::new("SELECT * FROM broadcasts");
        push_where(&mut qb, predicate);
        push_order_page(&mut qb, sort, offset, limit);
        let broadcasts = qb
            .build_query_as::<Broadcast>()
            .fetch_all(&self.pool)
            .await?;
        Ok(broadcasts)
    }

    async fn count(&self, predicate: &Predicate) -> AppResult<u64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM broadcasts");
        push_where(&mut qb, predicate);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total.max(0) as u64)
    }
}
