//! Data models, organized by domain.

mod blog;
mod broadcast;
mod content;
mod contract;
mod media;
mod offering;
mod podcast;
mod profile;
mod stats;

pub use blog::*;
pub use broadcast::*;
pub use content::*;
pub use contract::*;
pub use media::*;
pub use offering::*;
pub use podcast::*;
pub use profile::*;
pub use stats::*;
