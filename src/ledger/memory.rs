use crate::error::LedgerError;
use crate::ledger::traits::LedgerStore;
use crate::ledger::types::LedgerDocument;
use crate::models::UserId;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process ledger backend
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    documents: RwLock<HashMap<UserId, LedgerDocument>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing documents
    pub fn with_documents(documents: impl IntoIterator<Item = (UserId, LedgerDocument)>) -> Self {
        Self {
            documents: RwLock::new(documents.into_iter().collect()),
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn load(&self, user: &UserId) -> Result<Option<LedgerDocument>, LedgerError> {
        Ok(self.documents.read().await.get(user).cloned())
    }

    async fn save(&self, user: &UserId, document: &LedgerDocument) -> Result<(), LedgerError> {
        self.documents
            .write()
            .await
            .insert(user.clone(), document.clone());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
