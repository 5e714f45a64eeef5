//! Newsletter subscriptions and broadcast mail.
//!
//! Broadcast-to-all fans out over a bounded worker pool. Each recipient is
//! isolated: a failed send or log insert marks that recipient as failed in
//! the report and the run continues.

use std::sync::Arc;

use atelier_core::models::{Broadcast, BroadcastFailure, BroadcastReport, Subscriber};
use atelier_core::pagination::{Page, PageInfo};
use atelier_core::repository::{BroadcastRepository, SubscriberRepository};
use atelier_core::{validation, AppError, AppResult, Filter, MailError};
use futures::stream::{self, StreamExt};

use crate::content::{parse_id, ListQuery};
use crate::mailer::{Mailer, OutboundEmail};

const SUBSCRIBER_SEARCH_FIELDS: &[&str] = &["email"];
const BROADCAST_SEARCH_FIELDS: &[&str] = &["subject", "email"];

pub struct BroadcastService {
    subscribers: Arc<dyn SubscriberRepository>,
    broadcasts: Arc<dyn BroadcastRepository>,
    mailer: Arc<dyn Mailer>,
    concurrency: usize,
    default_limit: u32,
}

impl BroadcastService {
    pub fn new(
        subscribers: Arc<dyn SubscriberRepository>,
        broadcasts: Arc<dyn BroadcastRepository>,
        mailer: Arc<dyn Mailer>,
        concurrency: usize,
        default_limit: u32,
    ) -> Self {
        Self {
            subscribers,
            broadcasts,
            mailer,
            concurrency: concurrency.max(1),
            default_limit,
        }
    }

    pub async fn subscribe(&self, email: &str) -> AppResult<Subscriber> {
        let email = email.trim();
        validation::require("email", Some(email))?;
        validation::email("email", email)?;

        if self.subscribers.find_by_email(email).await?.is_some() {
            return Err(AppError::Validation(
                "Email is already subscribed".to_string(),
            ));
        }

        let subscriber = self.subscribers.insert(email).await?;
        tracing::info!(id = %subscriber.id, "New subscriber");
        Ok(subscriber)
    }

    pub async fn list_subscribers(&self, query: ListQuery) -> AppResult<Page<Subscriber>> {
        let predicate = Filter::build(
            query.search.as_deref(),
            query.date.as_deref(),
            SUBSCRIBER_SEARCH_FIELDS,
        )?;
        let (page, limit) = query.page.normalize(self.default_limit);
        let total = self.subscribers.count(&predicate).await?;
        let pagination = PageInfo::compute(page, limit, total);
        let items = self
            .subscribers
            .search(&predicate, query.sort, pagination.offset(), limit)
            .await?;
        Ok(Page { items, pagination })
    }

    pub async fn get_subscriber(&self, id: &str) -> AppResult<Subscriber> {
        let id = parse_id(id, "subscriber")?;
        self.subscribers
            .fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound("subscriber not found".to_string()))
    }

    pub async fn unsubscribe(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "subscriber")?;
        if !self.subscribers.remove(id).await? {
            return Err(AppError::NotFound("subscriber not found".to_string()));
        }
        Ok(())
    }

    /// Send one email and log it as a broadcast record.
    pub async fn send_one(&self, to: &str, subject: &str, html: &str) -> AppResult<Broadcast> {
        let email = OutboundEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        };
        self.mailer.send(&email).await?;
        let record = self.broadcasts.insert(to, subject, html).await?;
        Ok(record)
    }

    /// Fan the email out to every subscriber over a bounded pool.
    ///
    /// Returns the per-run report; the overall call only errors when the
    /// input is unusable (blank subject/body, no subscribers at all).
    pub async fn send_to_all(&self, subject: &str, html: &str) -> AppResult<BroadcastReport> {
        if subject.trim().is_empty() {
            return Err(MailError::MissingField("subject").into());
        }
        if html.trim().is_empty() {
            return Err(MailError::MissingField("html").into());
        }

        let subscribers = self.subscribers.all().await?;
        if subscribers.is_empty() {
            return Err(AppError::NotFound("No subscribers to send to".to_string()));
        }
        let total = subscribers.len();

        let results: Vec<Result<(), BroadcastFailure>> = stream::iter(subscribers)
            .map(|subscriber| {
                let mailer = Arc::clone(&self.mailer);
                let log = Arc::clone(&self.broadcasts);
                let subject = subject.to_string();
                let html = html.to_string();
                async move {
                    let email = OutboundEmail {
                        to: subscriber.email.clone(),
                        subject: subject.clone(),
                        html: html.clone(),
                    };
                    let outcome = async {
                        mailer.send(&email).await?;
                        log.insert(&subscriber.email, &subject, &html)
                            .await
                            .map_err(|err| MailError::Send(err.to_string()))?;
                        Ok::<(), MailError>(())
                    }
                    .await;
                    outcome.map_err(|err| BroadcastFailure {
                        email: subscriber.email,
                        error: err.to_string(),
                    })
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut sent = 0;
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(()) => sent += 1,
                Err(failure) => {
                    tracing::warn!(
                        recipient = %failure.email,
                        error = %failure.error,
                        "Broadcast recipient failed"
                    );
                    errors.push(failure);
                }
            }
        }

        tracing::info!(total, sent, failed = errors.len(), "Broadcast run finished");
        Ok(BroadcastReport {
            total,
            sent,
            failed: errors.len(),
            errors,
        })
    }

    pub async fn list_broadcasts(&self, query: ListQuery) -> AppResult<Page<Broadcast>> {
        let predicate = Filter::build(
            query.search.as_deref(),
            query.date.as_deref(),
            BROADCAST_SEARCH_FIELDS,
        )?;
        let (page, limit) = query.page.normalize(self.default_limit);
        let total = self.broadcasts.count(&predicate).await?;
        let pagination = PageInfo::compute(page, limit, total);
        let items = self
            .broadcasts
            .search(&predicate, query.sort, pagination.offset(), limit)
            .await?;
        Ok(Page { items, pagination })
    }

    pub async fn get_broadcast(&self, id: &str) -> AppResult<Broadcast> {
        let id = parse_id(id, "broadcast")?;
        self.broadcasts
            .fetch(id)
            .await?
            .ok_or_else(|| AppError::NotFound("broadcast not found".to_string()))
    }

    pub async fn delete_broadcast(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "broadcast")?;
        if !self.broadcasts.remove(id).await? {
            return Err(AppError::NotFound("broadcast not found".to_string()));
        }
        Ok(())
    }
}
