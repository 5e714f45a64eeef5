//! Repository ports.
//!
//! Services receive these as `Arc<dyn ...>` so storage can be swapped for
//! in-memory fakes in tests. The Postgres implementations live in
//! `atelier-db`; nothing here knows about SQL.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    Broadcast, Contract, ContractDraft, ContentEntity, Profile, Subscriber,
};
use crate::query::{Predicate, SortOrder};

/// CRUD + filtered listing for one media-carrying content entity.
#[async_trait]
pub trait ContentRepository<E: ContentEntity>: Send + Sync {
    async fn insert(&self, draft: &E::Draft) -> AppResult<E>;
    async fn fetch(&self, id: Uuid) -> AppResult<Option<E>>;
    /// Persist the current state of an already-inserted entity.
    async fn save(&self, entity: &E) -> AppResult<E>;
    /// Returns `false` when no row existed.
    async fn remove(&self, id: Uuid) -> AppResult<bool>;
    async fn search(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<E>>;
    async fn count(&self, predicate: &Predicate) -> AppResult<u64>;
}

#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn insert(&self, draft: &ContractDraft) -> AppResult<Contract>;
    async fn fetch(&self, id: Uuid) -> AppResult<Option<Contract>>;
    async fn save(&self, contract: &Contract) -> AppResult<Contract>;
    async fn remove(&self, id: Uuid) -> AppResult<bool>;
    async fn search(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<Contract>>;
    async fn count(&self, predicate: &Predicate) -> AppResult<u64>;
}

#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    async fn insert(&self, email: &str) -> AppResult<Subscriber>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscriber>>;
    async fn fetch(&self, id: Uuid) -> AppResult<Option<Subscriber>>;
    /// Every subscriber, for broadcast fan-out.
    async fn all(&self) -> AppResult<Vec<Subscriber>>;
    async fn remove(&self, id: Uuid) -> AppResult<bool>;
    async fn search(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<Subscriber>>;
    async fn count(&self, predicate: &Predicate) -> AppResult<u64>;
}

#[async_trait]
pub trait BroadcastRepository: Send + Sync {
    async fn insert(&self, email: &str, subject: &str, html: &str) -> AppResult<Broadcast>;
    async fn fetch(&self, id: Uuid) -> AppResult<Option<Broadcast>>;
    async fn remove(&self, id: Uuid) -> AppResult<bool>;
    async fn search(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<Broadcast>>;
    async fn count(&self, predicate: &Predicate) -> AppResult<u64>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn fetch_by_user(&self, user_id: Uuid) -> AppResult<Option<Profile>>;
    /// Insert a blank profile row for `user_id`.
    async fn create(&self, user_id: Uuid) -> AppResult<Profile>;
    async fn save(&self, profile: &Profile) -> AppResult<Profile>;
}

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Subscriber signups grouped by calendar month (1-12) of `year`.
    /// Months with no signups are absent from the result.
    async fn monthly_signups(&self, year: i32) -> AppResult<Vec<(u32, i64)>>;
}
