//! Console entities
//!
//! The records managed from the ad-booking console. Each implements
//! `Resource`, which ties it to its REST collection and its form checks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Maximum length of names and titles accepted by the console forms.
pub const MAX_NAME_LENGTH: usize = 255;

// == Resource Trait ==
/// A record type served from `/<COLLECTION>` and `/<COLLECTION>/<id>`.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection path segment, also used as the cache key namespace
    const COLLECTION: &'static str;

    fn id(&self) -> Option<u64>;

    /// Client-side form checks run before a create or update is sent.
    ///
    /// Returns an error message if validation fails, None if valid.
    fn validate(&self) -> Option<String> {
        None
    }
}

fn check_name(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{} cannot be empty", field));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_NAME_LENGTH
        ));
    }
    None
}

// == Campaign ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Campaign {
    const COLLECTION: &'static str = "campaigns";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn validate(&self) -> Option<String> {
        if let Some(msg) = check_name("Campaign name", &self.name) {
            return Some(msg);
        }
        if matches!(self.budget, Some(budget) if !budget.is_finite() || budget < 0.0) {
            return Some("Budget must be a non-negative amount".to_string());
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end < start => {
                Some("End date must not be before start date".to_string())
            }
            _ => None,
        }
    }
}

// == Property ==
/// A site or placement inventory that campaigns are booked on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for Property {
    const COLLECTION: &'static str = "properties";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn validate(&self) -> Option<String> {
        if let Some(msg) = check_name("Property name", &self.name) {
            return Some(msg);
        }
        match &self.url {
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                Some("Property URL must start with http:// or https://".to_string())
            }
            _ => None,
        }
    }
}

// == Category ==
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl Resource for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn validate(&self) -> Option<String> {
        check_name("Category name", &self.name)
    }
}

// == Faq ==
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Resource for Faq {
    const COLLECTION: &'static str = "faqs";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn validate(&self) -> Option<String> {
        if self.question.trim().is_empty() {
            return Some("Question cannot be empty".to_string());
        }
        if self.answer.trim().is_empty() {
            return Some("Answer cannot be empty".to_string());
        }
        None
    }
}

// == User ==
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<u64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Resource for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn validate(&self) -> Option<String> {
        if let Some(msg) = check_name("User name", &self.name) {
            return Some(msg);
        }
        let valid_email = match self.email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            }
            None => false,
        };
        if !valid_email {
            return Some(format!("Invalid email address: {}", self.email));
        }
        None
    }
}

// == Role ==
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Resource for Role {
    const COLLECTION: &'static str = "roles";

    fn id(&self) -> Option<u64> {
        self.id
    }

    fn validate(&self) -> Option<String> {
        check_name("Role name", &self.name)
    }
}
