use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::validation;

pub const CONTRACT_NAME_MIN: usize = 3;
pub const CONTRACT_NAME_MAX: usize = 200;
pub const CONTRACT_MESSAGE_MIN: usize = 3;
pub const CONTRACT_MESSAGE_MAX: usize = 300;

/// A contact/contract request from a visitor. `Responded` once an admin has
/// replied by email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "contract_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    #[default]
    New,
    Responded,
}

impl ContractStatus {
    pub fn parse(s: &str) -> Option<ContractStatus> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Some(ContractStatus::New),
            // "respond" is what the legacy clients send
            "responded" | "respond" => Some(ContractStatus::Responded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::New => "new",
            ContractStatus::Responded => "responded",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Contract {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub occupation: String,
    pub message: String,
    pub status: ContractStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ContractDraft {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub occupation: String,
    pub message: String,
}

impl ContractDraft {
    pub fn validate(&self) -> AppResult<()> {
        validation::required_length(
            "full_name",
            Some(&self.full_name),
            CONTRACT_NAME_MIN,
            CONTRACT_NAME_MAX,
        )?;
        validation::require("email", Some(&self.email))?;
        validation::email("email", &self.email)?;
        validation::required_length(
            "message",
            Some(&self.message),
            CONTRACT_MESSAGE_MIN,
            CONTRACT_MESSAGE_MAX,
        )?;
        Ok(())
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for Contract {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        Ok(Contract {
            id: row.try_get("id")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            phone_number: row.try_get("phone_number")?,
            occupation: row.try_get("occupation")?,
            message: row.try_get("message")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
