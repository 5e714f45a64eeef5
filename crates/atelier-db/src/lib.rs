//! Database repositories for the data access layer.
//!
//! Postgres implementations of the repository ports defined in
//! `atelier-core`. Typed predicates are translated to SQL here and nowhere
//! else.

mod broadcasts;
mod content;
mod contracts;
mod pool;
mod predicate;
mod profiles;
mod stats;
mod subscribers;

pub use broadcasts::PgBroadcastRepository;
pub use content::{ContentRecord, PgContentRepository};
pub use contracts::PgContractRepository;
pub use pool::connect;
pub use predicate::{push_order_page, push_where};
pub use profiles::PgProfileRepository;
pub use stats::PgStatsRepository;
pub use subscribers::PgSubscriberRepository;
