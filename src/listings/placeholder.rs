use crate::listings::traits::ListingSource;
use crate::models::{ListingStatus, Property, PropertyId};
use chrono::Utc;
use tracing::warn;

/// Price shown on synthesized records
pub const PLACEHOLDER_PRICE: i64 = 245_000;

pub const PLACEHOLDER_ADDRESS: &str = "123 Placeholder Ave (listing unavailable)";

/// Stand-in record for a listing the feed could not return.
/// Marked with `is_placeholder` so views can tell it apart from real data.
pub fn placeholder(id: &PropertyId) -> Property {
    Property {
        id: id.clone(),
        price: PLACEHOLDER_PRICE,
        beds: 0,
        baths: 0.0,
        sqft: 0,
        address: PLACEHOLDER_ADDRESS.to_string(),
        images: Vec::new(),
        status: ListingStatus::Other("Unavailable".to_string()),
        year_built: None,
        listing_office: None,
        loved: false,
        is_placeholder: true,
        fetched_at: Utc::now(),
    }
}

/// Fetch a listing, substituting a placeholder on any failure
pub async fn fetch_or_placeholder(source: &dyn ListingSource, id: &PropertyId) -> Property {
    match source.fetch(id).await {
        Ok(property) => property,
        Err(e) => {
            warn!("{} fetch for {} failed, using placeholder: {}", source.source_name(), id, e);
            placeholder(id)
        }
    }
}
