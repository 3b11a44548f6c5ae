use crate::error::ListingsError;
use crate::models::{Property, PropertyId};
use async_trait::async_trait;

/// Anything that can resolve a listing id into a full property record.
/// The HTTP feed is one implementation; tests plug in their own.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch a single listing. Attempted once, never retried.
    async fn fetch(&self, id: &PropertyId) -> Result<Property, ListingsError>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
