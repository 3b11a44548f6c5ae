//! Saved homes: reconciles a user's liked and loved listings across the
//! current session, their remote ledger, and the MLS listings feed.

pub mod cancel;
pub mod config;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod listings;
pub mod models;
pub mod reconcile;
pub mod saved_homes;
pub mod session;

pub use cancel::CancellationToken;
pub use config::Config;
pub use filter::{filter_loved, FilterChange, SavedView, ViewState};
pub use models::{Interaction, ListingStatus, Property, PropertyId, UserId};
pub use reconcile::{Reconciled, Reconciler};
pub use saved_homes::{SavedHomes, SwipeKind};
pub use session::SessionStore;
