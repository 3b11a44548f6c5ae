use crate::models::{Interaction, PropertyId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-user remote record of saved properties.
///
/// Position within a list is the recency proxy: later entries are newer.
/// An id is in at most one of the two lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDocument {
    #[serde(default)]
    pub liked: Vec<PropertyId>,
    #[serde(default)]
    pub loved: Vec<PropertyId>,
}

/// One row of a ledger, as seen by readers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: PropertyId,
    pub position: usize,
    pub kind: Interaction,
}

impl LedgerDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_of(&self, id: &PropertyId) -> Interaction {
        if self.loved.contains(id) {
            Interaction::Loved
        } else if self.liked.contains(id) {
            Interaction::Liked
        } else {
            Interaction::Unseen
        }
    }

    pub fn contains(&self, id: &PropertyId) -> bool {
        self.state_of(id).is_saved()
    }

    /// Move `id` into the list for `state`, appending it as the newest entry.
    /// Returns false when the id was already in that state.
    pub fn apply(&mut self, id: &PropertyId, state: Interaction) -> bool {
        if self.state_of(id) == state {
            return false;
        }
        self.liked.retain(|x| x != id);
        self.loved.retain(|x| x != id);
        match state {
            Interaction::Liked => self.liked.push(id.clone()),
            Interaction::Loved => self.loved.push(id.clone()),
            Interaction::Unseen => {}
        }
        true
    }

    /// Ledger ids newest first: `reverse(liked ++ loved)`, each id once.
    pub fn recent_first(&self) -> Vec<PropertyId> {
        let mut seen = HashSet::new();
        self.liked
            .iter()
            .chain(self.loved.iter())
            .rev()
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> Vec<LedgerEntry> {
        let rows = |ids: &[PropertyId], kind: Interaction| {
            ids.iter()
                .enumerate()
                .map(move |(position, id)| LedgerEntry {
                    id: id.clone(),
                    position,
                    kind,
                })
                .collect::<Vec<_>>()
        };
        let mut entries = rows(&self.liked, Interaction::Liked);
        entries.extend(rows(&self.loved, Interaction::Loved));
        entries
    }

    /// Repair a document written by an older client.
    ///
    /// Duplicates inside a list keep their newest position, and an id
    /// present in both lists keeps only its loved entry.
    pub fn normalize(&mut self) -> bool {
        let before = self.clone();
        dedup_keep_last(&mut self.loved);
        dedup_keep_last(&mut self.liked);
        let loved: HashSet<_> = self.loved.iter().cloned().collect();
        self.liked.retain(|id| !loved.contains(id));
        *self != before
    }
}

fn dedup_keep_last(ids: &mut Vec<PropertyId>) {
    let mut seen = HashSet::new();
    let mut kept: Vec<_> = ids.drain(..).rev().filter(|id| seen.insert(id.clone())).collect();
    kept.reverse();
    *ids = kept;
}
