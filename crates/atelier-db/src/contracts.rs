//! Contract repository.

use async_trait::async_trait;
use atelier_core::models::{Contract, ContractDraft};
use atelier_core::query::{Predicate, SortOrder};
use atelier_core::repository::ContractRepository;
use atelier_core::AppResult;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::predicate::{push_order_page, push_where};

#[derive(Clone)]
pub struct PgContractRepository {
    pool: PgPool,
}

impl PgContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractRepository for PgContractRepository {
    async fn insert(&self, draft: &ContractDraft) -> AppResult<Contract> {
        let contract = sqlx::query_as::<_, Contract>(
            "INSERT INTO contracts (full_name, email, phone_number, occupation, message) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&draft.full_name)
        .bind(&draft.email)
        .bind(&draft.phone_number)
        .bind(&draft.occupation)
        .bind(&draft.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(contract)
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<Contract>> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contract)
    }

    async fn save(&self, contract: &Contract) -> AppResult<Contract> {
        let saved = sqlx::query_as::<_, Contract>(
            "UPDATE contracts SET full_name = $1, email = $2, phone_number = $3, \
             occupation = $4, message = $5, status = $6, updated_at = now() \
             WHERE id = $7 RETURNING *",
        )
        .bind(&contract.full_name)
        .bind(&contract.email)
        .bind(&contract.phone_number)
        .bind(&contract.occupation)
        .bind(&contract.message)
        .bind(contract.status)
        .bind(contract.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
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
    ) -> AppResult<Vec<Contract>> {
        let mut qb = QueryBuilder::new("SELECT * FROM contracts");
        push_where(&mut qb, predicate);
        push_order_page(&mut qb, sort, offset, limit);
        let contracts = qb
            .build_query_as::<Contract>()
            .fetch_all(&self.pool)
            .await?;
        Ok(contracts)
    }

    async fn count(&self, predicate: &Predicate) -> AppResult<u64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM contracts");
        push_where(&mut qb, predicate);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total.max(0) as u64)
    }
}
