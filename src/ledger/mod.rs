pub mod file;
pub mod memory;
pub mod traits;
pub mod types;

pub use file::FileLedgerStore;
pub use memory::MemoryLedgerStore;
pub use traits::LedgerStore;
pub use types::{LedgerDocument, LedgerEntry};

use crate::error::LedgerError;
use crate::models::{Interaction, PropertyId, UserId};
use tracing::{debug, info};

/// Read a user's ledger, apply one transition to `id`, and write it back.
///
/// A missing document is treated as empty and created on first write.
/// Nothing is written when the transition leaves the state unchanged,
/// unless the stored document needed repair.
/// Returns the property's new state.
pub async fn update_interaction(
    store: &dyn LedgerStore,
    user: &UserId,
    id: &PropertyId,
    transition: fn(Interaction) -> Interaction,
) -> Result<Interaction, LedgerError> {
    let mut document = store.load(user).await?.unwrap_or_default();
    let repaired = document.normalize();

    let current = document.state_of(id);
    let next = transition(current);
    let changed = document.apply(id, next);
    if !changed && !repaired {
        debug!("{} already {:?} for {}", id, next, user);
        return Ok(next);
    }

    store.save(user, &document).await?;
    info!(
        "Ledger ({}) {}: {:?} -> {:?} for {}",
        store.backend_name(),
        id,
        current,
        next,
        user
    );
    Ok(next)
}
