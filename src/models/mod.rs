pub mod interaction;

pub use interaction::Interaction;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing identifier assigned by the MLS feed. Opaque to us.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Owner of a ledger document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listing status as reported by the feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ListingStatus {
    Active,
    Pending,
    Sold,
    Closed,
    Other(String),
}

impl ListingStatus {
    /// Parse the feed's free-text status, ignoring case and surrounding space
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "pending" => Self::Pending,
            "sold" => Self::Sold,
            "closed" => Self::Closed,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("Active"),
            Self::Pending => f.write_str("Pending"),
            Self::Sold => f.write_str("Sold"),
            Self::Closed => f.write_str("Closed"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub price: i64,
    pub beds: u32,
    pub baths: f32,
    pub sqft: u32,
    pub address: String,
    pub images: Vec<String>,
    pub status: ListingStatus,
    pub year_built: Option<u16>,
    pub listing_office: Option<String>,
    pub loved: bool,
    /// Set when the record was synthesized because the feed could not be reached
    pub is_placeholder: bool,
    pub fetched_at: DateTime<Utc>,
}

impl Property {
    /// Bare record with only an id, used by callers that fill in the rest
    pub fn new(id: impl Into<PropertyId>) -> Self {
        Self {
            id: id.into(),
            price: 0,
            beds: 0,
            baths: 0.0,
            sqft: 0,
            address: String::new(),
            images: Vec::new(),
            status: ListingStatus::Active,
            year_built: None,
            listing_office: None,
            loved: false,
            is_placeholder: false,
            fetched_at: Utc::now(),
        }
    }
}
