use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A newsletter subscriber.
#[derive(Debug, Clone, Serialize)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// One sent broadcast email, kept as a log record.
#[derive(Debug, Clone, Serialize)]
pub struct Broadcast {
    pub id: Uuid,
    pub email: String,
    pub subject: String,
    pub html: String,
    pub created_at: DateTime<Utc>,
}

/// Per-recipient failure inside a broadcast-to-all run.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastFailure {
    pub email: String,
    pub error: String,
}

/// Outcome of a broadcast-to-all fan-out. Individual failures never abort
/// the run; they are collected here.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastReport {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub errors: Vec<BroadcastFailure>,
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Subscriber {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        Ok(Subscriber {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Broadcast {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        Ok(Broadcast {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            subject: row.try_get("subject")?,
            html: row.try_get("html")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
