//! Route table and shared middleware.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, blogs, broadcasts, contracts, health, offerings, podcasts, profiles};
use crate::state::AppState;

/// Uploads are capped well above any realistic cover image or thumbnail.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/blogs", get(blogs::list).post(blogs::create))
        .route(
            "/api/blogs/{id}",
            get(blogs::get).put(blogs::update).delete(blogs::remove),
        )
        .route("/api/podcasts", get(podcasts::list).post(podcasts::create))
        .route(
            "/api/podcasts/{id}",
            get(podcasts::get)
                .put(podcasts::update)
                .delete(podcasts::remove),
        )
        .route(
            "/api/offerings",
            get(offerings::list).post(offerings::create),
        )
        .route(
            "/api/offerings/{id}",
            get(offerings::get)
                .put(offerings::update)
                .delete(offerings::remove),
        )
        .route(
            "/api/contracts",
            get(contracts::list).post(contracts::create),
        )
        .route(
            "/api/contracts/{id}",
            get(contracts::get).delete(contracts::remove),
        )
        .route("/api/contracts/{id}/respond", post(contracts::respond))
        .route(
            "/api/subscribers",
            get(broadcasts::list_subscribers).post(broadcasts::subscribe),
        )
        .route(
            "/api/subscribers/{id}",
            get(broadcasts::get_subscriber).delete(broadcasts::unsubscribe),
        )
        .route(
            "/api/broadcasts",
            get(broadcasts::list).post(broadcasts::send_one),
        )
        .route("/api/broadcasts/send-all", post(broadcasts::send_to_all))
        .route(
            "/api/broadcasts/{id}",
            get(broadcasts::get).delete(broadcasts::remove),
        )
        .route(
            "/api/profiles/{user_id}",
            get(profiles::get).put(profiles::update),
        )
        .route("/api/admin/stats/monthly-signups", get(admin::monthly_signups))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
