//! Shared application state handed to every handler.

use atelier_core::Config;
use atelier_services::{
    AdminService, BlogService, BroadcastService, ContractService, OfferingService,
    PodcastService, ProfileService,
};

pub struct AppState {
    pub config: Config,
    pub blogs: BlogService,
    pub podcasts: PodcastService,
    pub offerings: OfferingService,
    pub contracts: ContractService,
    pub broadcasts: BroadcastService,
    pub profiles: ProfileService,
    pub admin: AdminService,
}
