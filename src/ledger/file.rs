use crate::error::LedgerError;
use crate::ledger::traits::LedgerStore;
use crate::ledger::types::LedgerDocument;
use crate::models::UserId;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Ledger backend storing one pretty-printed JSON document per user
pub struct FileLedgerStore {
    dir: PathBuf,
}

impl FileLedgerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, user: &UserId) -> Result<PathBuf, LedgerError> {
        let name = user.as_str();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(LedgerError::Backend(format!("unusable user id {name:?}")));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

#[async_trait]
impl LedgerStore for FileLedgerStore {
    async fn load(&self, user: &UserId) -> Result<Option<LedgerDocument>, LedgerError> {
        let path = self.path_for(user)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No ledger at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    async fn save(&self, user: &UserId, document: &LedgerDocument) -> Result<(), LedgerError> {
        let path = self.path_for(user)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&path, json).await?;
        debug!("Wrote ledger to {}", path.display());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
