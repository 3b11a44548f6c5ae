use crate::models::{Property, PropertyId};

/// Properties the user interacted with during this run, not yet confirmed
/// against the ledger. Order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    entries: Vec<Property>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a swipe. An existing entry with the same id is replaced in place.
    pub fn record(&mut self, mut property: Property, loved: bool) {
        property.loved = loved;
        match self.position(&property.id) {
            Some(i) => self.entries[i] = property,
            None => self.entries.push(property),
        }
    }

    /// Flip the loved flag on an entry already in the session.
    /// Returns false when the id is unknown.
    pub fn set_loved(&mut self, id: &PropertyId, loved: bool) -> bool {
        match self.entries.iter_mut().find(|p| &p.id == id) {
            Some(entry) => {
                entry.loved = loved;
                true
            }
            None => false,
        }
    }

    /// Like `set_loved`, but adds the property when it came from the ledger
    /// rather than this session.
    pub fn upsert_loved(&mut self, property: &Property, loved: bool) {
        if !self.set_loved(&property.id, loved) {
            self.record(property.clone(), loved);
        }
    }

    /// Swap placeholder entries for real records found in `fresh`.
    /// Position and the loved flag stay as the session had them.
    pub fn fill_placeholders(&mut self, fresh: &[Property]) -> usize {
        let mut filled = 0;
        for entry in self.entries.iter_mut().filter(|p| p.is_placeholder) {
            if let Some(real) = fresh.iter().find(|p| p.id == entry.id && !p.is_placeholder) {
                *entry = Property {
                    loved: entry.loved,
                    ..real.clone()
                };
                filled += 1;
            }
        }
        filled
    }

    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.entries.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PropertyId) -> bool {
        self.position(id).is_some()
    }

    pub fn entries(&self) -> &[Property] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, id: &PropertyId) -> Option<usize> {
        self.entries.iter().position(|p| &p.id == id)
    }
}
