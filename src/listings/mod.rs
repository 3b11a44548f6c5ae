pub mod batch;
pub mod client;
pub mod placeholder;
pub mod traits;

pub use batch::{BatchFetcher, FetchOutcome};
pub use client::ListingsClient;
pub use placeholder::{fetch_or_placeholder, placeholder, PLACEHOLDER_PRICE};
pub use traits::ListingSource;
