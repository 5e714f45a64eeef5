//! Atelier Core Library
//!
//! This crate provides the domain models, typed query predicates, pagination
//! math, error taxonomy, configuration and repository ports shared across all
//! Atelier components.

pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, SmtpConfig, StorageBackend};
pub use error::{AppError, AppResult, LogLevel, MailError};
pub use pagination::{PageInfo, PageRequest};
pub use query::{Filter, Predicate, SortOrder};
pub use repository::{
    BroadcastRepository, ContentRepository, ContractRepository, ProfileRepository,
    StatsRepository, SubscriberRepository,
};
