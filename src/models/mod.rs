//! Console data models
//!
//! Entities managed from the console and the list envelope they arrive in.

pub mod page;
pub mod resources;

// Re-export commonly used types
pub use page::Page;
pub use resources::{
    Campaign, CampaignStatus, Category, Faq, Property, Resource, Role, User, MAX_NAME_LENGTH,
};
