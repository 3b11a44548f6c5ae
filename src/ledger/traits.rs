use crate::error::LedgerError;
use crate::ledger::types::LedgerDocument;
use crate::models::UserId;
use async_trait::async_trait;

/// Storage backend for per-user ledger documents.
///
/// Writes overwrite the whole document; there is no transaction around a
/// load followed by a save, so concurrent writers race and the last one wins.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// `Ok(None)` when the user has never saved anything
    async fn load(&self, user: &UserId) -> Result<Option<LedgerDocument>, LedgerError>;

    async fn save(&self, user: &UserId, document: &LedgerDocument) -> Result<(), LedgerError>;

    /// Name of the backend, for logs
    fn backend_name(&self) -> &'static str;
}
