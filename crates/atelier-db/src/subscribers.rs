//! Subscriber repository.

use async_trait::async_trait;
use atelier_core::models::Subscriber;
use atelier_core::query::{Predicate, SortOrder};
use atelier_core::repository::SubscriberRepository;
use atelier_core::AppResult;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::predicate::{push_order_page, push_where};

#[derive(Clone)]
pub struct PgSubscriberRepository {
    pool: PgPool,
}

impl PgSubscriberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberRepository for PgSubscriberRepository {
    async fn insert(&self, email: &str) -> AppResult<Subscriber> {
        let subscriber = sqlx::query_as::<_, Subscriber>(
            "INSERT INTO subscribers (email) VALUES ($1) RETURNING *",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(subscriber)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscriber>> {
        let subscriber = sqlx::query_as::<_, Subscriber>(
            "SELECT * FROM subscribers WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(subscriber)
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<Subscriber>> {
        let subscriber = sqlx::query_as::<_, Subscriber>("SELECT * FROM subscribers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subscriber)
    }

    async fn all(&self) -> AppResult<Vec<Subscriber>> {
        let subscribers =
            sqlx::query_as::<_, Subscriber>("SELECT * FROM subscribers ORDER BY created_at")
                .fetch_all(&self.pool)
                .await?;
        Ok(subscribers)
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
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
    ) -> AppResult<Vec<Subscriber>> {
        let mut qb = QueryBuilder::new("SELECT * FROM subscribers");
        push_where(&mut qb, predicate);
        push_order_page(&mut qb, sort, offset, limit);
        let subscribers = qb
            .build_query_as::<Subscriber>()
            .fetch_all(&self.pool)
            .await?;
        Ok(subscribers)
    }

    async fn count(&self, predicate: &Predicate) -> AppResult<u64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM subscribers");
        push_where(&mut qb, predicate);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total.max(0) as u64)
    }
}
