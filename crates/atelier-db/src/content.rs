//! Generic Postgres repository for media-carrying content entities.
//!
//! Blog, Podcast and Offering tables share the same lifecycle, so one
//! repository spans all three; each entity contributes its table name and
//! insert/update statements through [`ContentRecord`].

use async_trait::async_trait;
use atelier_core::models::ContentEntity;
use atelier_core::query::{Predicate, SortOrder};
use atelier_core::repository::ContentRepository;
use atelier_core::AppResult;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::predicate::{push_order_page, push_where};

/// SQL mapping for one content entity.
pub trait ContentRecord:
    ContentEntity + Unpin + for<'r> sqlx::FromRow<'r, PgRow>
{
    const TABLE: &'static str;

    /// Build `INSERT ... RETURNING *` for a draft.
    fn push_insert(qb: &mut QueryBuilder<'_, Postgres>, draft: &Self::Draft);

    /// Build `UPDATE ... RETURNING *` persisting the entity's current state,
    /// including the media columns as a unit.
    fn push_update(qb: &mut QueryBuilder<'_, Postgres>, entity: &Self);
}

#[derive(Clone)]
pub struct PgContentRepository<E> {
    pool: PgPool,
    _marker: PhantomData<fn() -> E>,
}

impl<E> PgContentRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<E: ContentRecord> ContentRepository<E> for PgContentRepository<E> {
    async fn insert(&self, draft: &E::Draft) -> AppResult<E> {
        let mut qb = QueryBuilder::new("");
        E::push_insert(&mut qb, draft);
        let entity = qb.build_query_as::<E>().fetch_one(&self.pool).await?;
        Ok(entity)
    }

    async fn fetch(&self, id: Uuid) -> AppResult<Option<E>> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE id = ", E::TABLE));
        qb.push_bind(id);
        let entity = qb.build_query_as::<E>().fetch_optional(&self.pool).await?;
        Ok(entity)
    }

    async fn save(&self, entity: &E) -> AppResult<E> {
        let mut qb = QueryBuilder::new("");
        E::push_update(&mut qb, entity);
        let saved = qb.build_query_as::<E>().fetch_one(&self.pool).await?;
        Ok(saved)
    }

    async fn remove(&self, id: Uuid) -> AppResult<bool> {
        let mut qb = QueryBuilder::new(format!("DELETE FROM {} WHERE id = ", E::TABLE));
        qb.push_bind(id);
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(
        &self,
        predicate: &Predicate,
        sort: SortOrder,
        offset: u64,
        limit: u32,
    ) -> AppResult<Vec<E>> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", E::TABLE));
        push_where(&mut qb, predicate);
        push_order_page(&mut qb, sort, offset, limit);
        let items = qb.build_query_as::<E>().fetch_all(&self.pool).await?;
        Ok(items)
    }

    async fn count(&self, predicate: &Predicate) -> AppResult<u64> {
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
        push_where(&mut qb, predicate);
        let total: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total.max(0) as u64)
    }
}

/// Bind the six media columns (all NULL when no media is attached).
fn push_media_columns<E: ContentEntity>(qb: &mut QueryBuilder<'_, Postgres>, entity: &E) {
    let media = entity.media_ref();
    qb.push(", media_url = ")
        .push_bind(media.map(|m| m.url.clone()))
        .push(", media_provider_id = ")
        .push_bind(media.map(|m| m.provider_id.clone()))
        .push(", media_kind = ")
        .push_bind(media.map(|m| m.kind))
        .push(", media_content_type = ")
        .push_bind(media.map(|m| m.content_type.clone()))
        .push(", media_size_bytes = ")
        .push_bind(media.map(|m| m.size_bytes))
        .push(", media_uploaded_at = ")
        .push_bind(media.map(|m| m.uploaded_at));
}

mod records {
    use super::*;
    use atelier_core::models::{Blog, Offering, Podcast};

    impl ContentRecord for Blog {
        const TABLE: &'static str = "blogs";

        fn push_insert(qb: &mut QueryBuilder<'_, Postgres>, draft: &Self::Draft) {
            qb.push("INSERT INTO blogs (title, read_time, description, featured, status) VALUES (")
                .push_bind(draft.title.clone())
                .push(", ")
                .push_bind(draft.read_time.clone())
                .push(", ")
                .push_bind(draft.description.clone())
                .push(", ")
                .push_bind(draft.featured)
                .push(", ")
                .push_bind(draft.status)
                .push(") RETURNING *");
        }

        fn push_update(qb: &mut QueryBuilder<'_, Postgres>, entity: &Self) {
            qb.push("UPDATE blogs SET title = ")
                .push_bind(entity.title.clone())
                .push(", read_time = ")
                .push_bind(entity.read_time.clone())
                .push(", description = ")
                .push_bind(entity.description.clone())
                .push(", featured = ")
                .push_bind(entity.featured)
                .push(", status = ")
                .push_bind(entity.status);
            push_media_columns(qb, entity);
            qb.push(", updated_at = now() WHERE id = ")
                .push_bind(entity.id)
                .push(" RETURNING *");
        }
    }

    impl ContentRecord for Podcast {
        const TABLE: &'static str = "podcasts";

        fn push_insert(qb: &mut QueryBuilder<'_, Postgres>, draft: &Self::Draft) {
            qb.push(
                "INSERT INTO podcasts (title, channel, description, link_name, link_url, creator_name) VALUES (",
            )
            .push_bind(draft.title.clone())
            .push(", ")
            .push_bind(draft.channel)
            .push(", ")
            .push_bind(draft.description.clone())
            .push(", ")
            .push_bind(draft.link_name.clone())
            .push(", ")
            .push_bind(draft.link_url.clone())
            .push(", ")
            .push_bind(draft.creator_name.clone())
            .push(") RETURNING *");
        }

        fn push_update(qb: &mut QueryBuilder<'_, Postgres>, entity: &Self) {
            qb.push("UPDATE podcasts SET title = ")
                .push_bind(entity.title.clone())
                .push(", channel = ")
                .push_bind(entity.channel)
                .push(", description = ")
                .push_bind(entity.description.clone())
                .push(", link_name = ")
                .push_bind(entity.link_name.clone())
                .push(", link_url = ")
                .push_bind(entity.link_url.clone())
                .push(", creator_name = ")
                .push_bind(entity.creator_name.clone());
            push_media_columns(qb, entity);
            qb.push(", updated_at = now() WHERE id = ")
                .push_bind(entity.id)
                .push(" RETURNING *");
        }
    }

    impl ContentRecord for Offering {
        const TABLE: &'static str = "offerings";

        fn push_insert(qb: &mut QueryBuilder<'_, Postgres>, draft: &Self::Draft) {
            qb.push("INSERT INTO offerings (name, session_info, description) VALUES (")
                .push_bind(draft.name.clone())
                .push(", ")
                .push_bind(draft.session_info.clone())
                .push(", ")
                .push_bind(draft.description.clone())
                .push(") RETURNING *");
        }

        fn push_update(qb: &mut QueryBuilder<'_, Postgres>, entity: &Self) {
            qb.push("UPDATE offerings SET name = ")
                .push_bind(entity.name.clone())
                .push(", session_info = ")
                .push_bind(entity.session_info.clone())
                .push(", description = ")
                .push_bind(entity.description.clone());
            push_media_columns(qb, entity);
            qb.push(", updated_at = now() WHERE id = ")
                .push_bind(entity.id)
                .push(" RETURNING *");
        }
    }
}
