//! Atelier service layer.
//!
//! Orchestrators that sit between the HTTP handlers and the repository/storage
//! ports: generic content CRUD with the media-replacement lifecycle, contact
//! requests with email responses, broadcast mail fan-out, profiles and admin
//! statistics. Everything here is written against `Arc<dyn ...>` ports so
//! tests can run with in-memory fakes.

pub mod admin;
pub mod broadcast;
pub mod content;
pub mod contract;
pub mod mailer;
pub mod media;
pub mod profile;
pub mod templates;

pub use admin::AdminService;
pub use broadcast::BroadcastService;
pub use content::{BlogService, ContentService, ListQuery, OfferingService, PodcastService};
pub use contract::ContractService;
pub use mailer::{DisabledMailer, Mailer, OutboundEmail, SmtpMailer};
pub use media::{CleanupOutcome, MediaAttachments};
pub use profile::ProfileService;
