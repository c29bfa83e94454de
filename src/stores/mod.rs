//! Stores Module
//!
//! Client-side stores for the console's collections, all sharing one
//! `ApiClient` and therefore one request cache.

mod resource;

use std::time::Duration;

pub use resource::{ListQuery, ResourceStore};

use crate::config::Config;
use crate::http::ApiClient;
use crate::models::{Campaign, Category, Faq, Property, Role, User};

// == Console Stores ==
/// One store per console collection.
#[derive(Clone)]
pub struct ConsoleStores {
    pub campaigns: ResourceStore<Campaign>,
    pub properties: ResourceStore<Property>,
    pub categories: ResourceStore<Category>,
    pub faqs: ResourceStore<Faq>,
    pub users: ResourceStore<User>,
    pub roles: ResourceStore<Role>,
}

impl ConsoleStores {
    pub fn new(client: &ApiClient, ttl: Duration) -> Self {
        Self {
            campaigns: ResourceStore::new(client.clone(), ttl),
            properties: ResourceStore::new(client.clone(), ttl),
            categories: ResourceStore::new(client.clone(), ttl),
            faqs: ResourceStore::new(client.clone(), ttl),
            users: ResourceStore::new(client.clone(), ttl),
            roles: ResourceStore::new(client.clone(), ttl),
        }
    }

    pub fn from_config(client: &ApiClient, config: &Config) -> Self {
        Self::new(client, config.default_ttl())
    }
}
