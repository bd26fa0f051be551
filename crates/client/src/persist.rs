//! Best-effort local persistence for reload survival.
//!
//! A subset of the store (user, cart lines, totals, recently viewed, session)
//! is serialized as JSON under a fixed key. Loading is forgiving: any read or
//! parse failure is logged and treated as "nothing persisted".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vitrine_core::{CartItem, Product, ShoppingSession, User};

use crate::store::StoreState;

/// Fixed storage key; the on-disk file is `<dir>/<key>.json`.
pub const STORAGE_KEY: &str = "vitrine-store";

/// Error writing persisted state.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The persisted subset of [`StoreState`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub cart_items: Vec<CartItem>,
    pub cart_total: Decimal,
    pub recently_viewed: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<ShoppingSession>,
}

impl PersistedState {
    /// Capture the persisted subset from a store.
    #[must_use]
    pub fn capture(store: &StoreState) -> Self {
        Self {
            user: store.user().cloned(),
            cart_items: store.cart_items().to_vec(),
            cart_total: store.total_price(),
            recently_viewed: store.recently_viewed().to_vec(),
            session: Some(store.session().clone()),
        }
    }
}

/// File-backed key/value storage standing in for the browser's local storage.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Create a storage rooted at `dir`. The directory is created on first
    /// save, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }

    /// Write the persisted subset.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` when the directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, state: &PersistedState) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(state)?;
        fs::write(self.path(), json)?;
        Ok(())
    }

    /// Read back persisted state, if any.
    ///
    /// A missing file is a normal first-run condition; corrupt or unreadable
    /// state is logged and discarded rather than surfaced.
    #[must_use]
    pub fn load(&self) -> Option<PersistedState> {
        let path = self.path();
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read persisted state");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "discarding corrupt persisted state");
                None
            }
        }
    }

    /// The directory backing this storage.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
