//! Merges this run's session with the user's remote ledger into the single
//! list the saved-homes screen shows.
//!
//! Session entries come first, in session order, followed by ledger-only
//! properties newest first. Session data wins for display fields, except
//! when the session only holds a placeholder; the ledger wins for the loved
//! flag whenever it knows the property.

use crate::cancel::CancellationToken;
use crate::error::ReconcileError;
use crate::ledger::{LedgerDocument, LedgerStore};
use crate::listings::batch::{BatchCallback, BatchFetcher};
use crate::models::{Property, PropertyId, UserId};
use crate::session::SessionStore;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Output of one reconciliation pass
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub properties: Vec<Property>,
    /// Entries synthesized because the feed could not return them
    pub placeholders: usize,
    /// False when the list is session-only (signed out, or no ledger)
    pub ledger_loaded: bool,
}

impl Reconciled {
    fn session_only(session: &SessionStore) -> Self {
        Self {
            properties: session.entries().to_vec(),
            placeholders: 0,
            ledger_loaded: false,
        }
    }
}

pub struct Reconciler {
    ledger: Arc<dyn LedgerStore>,
    fetcher: BatchFetcher,
}

impl Reconciler {
    pub fn new(ledger: Arc<dyn LedgerStore>, fetcher: BatchFetcher) -> Self {
        Self { ledger, fetcher }
    }

    pub fn ledger(&self) -> &Arc<dyn LedgerStore> {
        &self.ledger
    }

    /// Build the combined list for `user`.
    ///
    /// `None` means signed out. A missing or unreadable ledger degrades to the
    /// session list without an error. `on_reveal` receives the growing list
    /// after every fetch batch. A cancelled pass returns
    /// [`ReconcileError::Cancelled`] and its partial data is dropped.
    pub async fn reconcile(
        &self,
        user: Option<&UserId>,
        session: &SessionStore,
        cancel: &CancellationToken,
        on_reveal: BatchCallback<'_>,
    ) -> Result<Reconciled, ReconcileError> {
        let Some(user) = user else {
            debug!("Not signed in, showing session only");
            return Ok(Reconciled::session_only(session));
        };

        let mut ledger = match self.ledger.load(user).await {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!("No ledger for {}, showing session only", user);
                return Ok(Reconciled::session_only(session));
            }
            Err(e) => {
                warn!("Could not read ledger for {}: {}", user, e);
                return Ok(Reconciled::session_only(session));
            }
        };
        if ledger.normalize() {
            warn!("Ledger for {} had overlapping or repeated ids", user);
        }

        let head: Vec<Property> = session
            .entries()
            .iter()
            .cloned()
            .map(|p| with_ledger_flag(&ledger, p))
            .collect();
        // Placeholders in the session get another try at the feed, ahead of
        // the ledger-only tail.
        let mut wanted: Vec<PropertyId> = head
            .iter()
            .filter(|p| p.is_placeholder)
            .map(|p| p.id.clone())
            .collect();
        let retried = wanted.len();
        wanted.extend(ledger_only_ids(&ledger, session));
        info!(
            "Reconciling {} session ({} placeholders) and {} ledger-only properties for {}",
            head.len(),
            retried,
            wanted.len() - retried,
            user
        );

        let mut on_batch = |so_far: &[Property]| {
            let combined = combine(&head, so_far, &ledger);
            on_reveal(&combined);
        };
        let outcome = self.fetcher.fetch_all(&wanted, cancel, &mut on_batch).await;
        if outcome.cancelled {
            return Err(ReconcileError::Cancelled);
        }

        let properties = combine(&head, &outcome.properties, &ledger);
        let placeholders = properties.iter().filter(|p| p.is_placeholder).count();
        if placeholders > 0 {
            warn!("{} of {} saved homes are placeholders", placeholders, properties.len());
        }
        Ok(Reconciled {
            properties,
            placeholders,
            ledger_loaded: true,
        })
    }
}

/// Ledger ids newest first, minus anything already in the session
fn ledger_only_ids(ledger: &LedgerDocument, session: &SessionStore) -> Vec<PropertyId> {
    let in_session: HashSet<&PropertyId> = session.entries().iter().map(|p| &p.id).collect();
    ledger
        .recent_first()
        .into_iter()
        .filter(|id| !in_session.contains(id))
        .collect()
}

fn with_ledger_flag(ledger: &LedgerDocument, mut property: Property) -> Property {
    let state = ledger.state_of(&property.id);
    if state.is_saved() {
        property.loved = state.is_loved();
    }
    property
}

/// Session entries (placeholders swapped for fresh data, loved flag kept)
/// followed by fetched properties the session does not have
fn combine(head: &[Property], fetched: &[Property], ledger: &LedgerDocument) -> Vec<Property> {
    let by_id: HashMap<&PropertyId, &Property> = fetched.iter().map(|p| (&p.id, p)).collect();
    let in_head: HashSet<&PropertyId> = head.iter().map(|p| &p.id).collect();

    let mut combined: Vec<Property> = head
        .iter()
        .map(|p| match by_id.get(&p.id) {
            Some(&fresh) if p.is_placeholder => Property {
                loved: p.loved,
                ..fresh.clone()
            },
            _ => p.clone(),
        })
        .collect();
    combined.extend(
        fetched
            .iter()
            .filter(|p| !in_head.contains(&p.id))
            .cloned()
            .map(|p| with_ledger_flag(ledger, p)),
    );
    combined
}
