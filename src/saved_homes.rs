use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::error::{ListingsError, ReconcileError};
use crate::filter::{FilterChange, SavedView};
use crate::ledger::{update_interaction, FileLedgerStore, LedgerStore};
use crate::listings::{BatchFetcher, ListingsClient};
use crate::models::{Interaction, Property, PropertyId, UserId};
use crate::reconcile::{Reconciled, Reconciler};
use crate::session::SessionStore;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeKind {
    /// Swipe right
    Like,
    /// Swipe up
    Love,
}

/// Everything the saved-homes screen needs for one signed-in (or signed-out) user
pub struct SavedHomes {
    user: Option<UserId>,
    session: SessionStore,
    view: SavedView,
    reconciler: Reconciler,
}

impl SavedHomes {
    pub fn new(user: Option<UserId>, reconciler: Reconciler) -> Self {
        Self {
            user,
            session: SessionStore::new(),
            view: SavedView::new(),
            reconciler,
        }
    }

    /// Wire up the HTTP feed and the file ledger from config
    pub fn from_config(config: &Config, user: Option<UserId>) -> Result<Self, ListingsError> {
        let client = ListingsClient::new(&config.listings_base_url, &config.listings_token)?;
        let fetcher =
            BatchFetcher::with_batching(Arc::new(client), config.batch_size, config.batch_delay);
        let ledger: Arc<dyn LedgerStore> = Arc::new(FileLedgerStore::new(&config.ledger_dir));
        Ok(Self::new(user, Reconciler::new(ledger, fetcher)))
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn view(&self) -> &SavedView {
        &self.view
    }

    /// Reconcile and publish into the view.
    ///
    /// If `cancel` trips, the view is left as it was before the call (or back
    /// to idle if this was the first load).
    pub async fn refresh(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Reconciled, ReconcileError> {
        self.view.begin_load();

        let view = &mut self.view;
        let mut on_reveal = |partial: &[Property]| view.reveal(partial);
        let result = self
            .reconciler
            .reconcile(self.user.as_ref(), &self.session, cancel, &mut on_reveal)
            .await;

        match result {
            Ok(reconciled) if !cancel.is_cancelled() => {
                let filled = self.session.fill_placeholders(&reconciled.properties);
                if filled > 0 {
                    info!("Replaced {} placeholder(s) in the session with feed data", filled);
                }
                self.view.finish_load(reconciled.properties.clone());
                Ok(reconciled)
            }
            Ok(_) | Err(ReconcileError::Cancelled) => {
                info!("Refresh cancelled, discarding results");
                self.view.abort_load();
                Err(ReconcileError::Cancelled)
            }
        }
    }

    pub fn set_filter(&mut self, loved_only: bool) -> FilterChange {
        self.view.set_filter(loved_only)
    }

    pub fn visible(&self) -> Vec<Property> {
        self.view.visible()
    }

    /// Record a swipe from the browse deck
    pub async fn swipe(&mut self, property: Property, kind: SwipeKind) -> Interaction {
        let id = property.id.clone();
        let transition = match kind {
            SwipeKind::Like => Interaction::like,
            SwipeKind::Love => Interaction::love,
        };
        // The ledger decides when it is reachable; the session only stands in
        // for it when signed out or when the write fails.
        let local = transition(self.session_state(&id));
        let state = self.write_ledger(&id, transition).await.unwrap_or(local);
        self.session.record(property, state.is_loved());
        state
    }

    /// Heart tapped on a saved home. Returns the new loved value, or `None`
    /// when the id is not in the view.
    ///
    /// A failed ledger write is logged; the local change stands.
    pub async fn toggle_loved(&mut self, id: &PropertyId) -> Option<bool> {
        let property = self.view.get(id)?.clone();
        let loved = self.view.toggle_loved(id)?;
        self.session.upsert_loved(&property, loved);

        let transition = if loved {
            Interaction::love
        } else {
            Interaction::unlove
        };
        self.write_ledger(id, transition).await;
        Some(loved)
    }

    /// Drop all per-user state
    pub fn sign_out(&mut self) {
        self.user = None;
        self.session.clear();
        self.view.reset();
    }

    pub fn sign_in(&mut self, user: UserId) {
        self.sign_out();
        self.user = Some(user);
    }

    fn session_state(&self, id: &PropertyId) -> Interaction {
        match self.session.get(id) {
            Some(p) if p.loved => Interaction::Loved,
            Some(_) => Interaction::Liked,
            None => Interaction::Unseen,
        }
    }

    async fn write_ledger(
        &self,
        id: &PropertyId,
        transition: fn(Interaction) -> Interaction,
    ) -> Option<Interaction> {
        let user = self.user.as_ref()?;
        match update_interaction(self.reconciler.ledger().as_ref(), user, id, transition).await {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Ledger write for {} failed, keeping local state: {}", id, e);
                None
            }
        }
    }
}
