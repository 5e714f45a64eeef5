pub mod admin;
pub mod blogs;
pub mod broadcasts;
pub mod contracts;
pub mod health;
pub mod offerings;
pub mod podcasts;
pub mod profiles;

use atelier_core::pagination::PageRequest;
use atelier_core::SortOrder;
use atelier_services::ListQuery;
use serde::Deserialize;

/// Query parameters shared by every list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub date: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
    /// Only meaningful for contracts.
    pub status: Option<String>,
}

impl ListParams {
    pub fn into_query(self) -> ListQuery {
        ListQuery {
            search: self.search,
            date: self.date,
            page: PageRequest {
                page: self.page,
                limit: self.limit,
            },
            sort: self
                .sort
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
        }
    }
}
