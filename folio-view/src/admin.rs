//! The admin flag that unlocks editing controls.
//!
//! This is a UI convenience, not an access control mechanism: anyone who
//! knows the identifier can elevate, and the services behind the fetchers do
//! their own authorization.

use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub const ADMIN_IDENTIFIER: &str = "admin@example.com";

#[derive(Debug, Error)]
pub enum FlagStoreError {
    #[error("Failed to access the flag file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to (de)serialize the flag file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable storage for the admin flag.
pub trait FlagStore: Send + Sync {
    fn load(&self) -> Result<bool, FlagStoreError>;
    fn store(&self) -> Result<(), FlagStoreError>;
    fn clear(&self) -> Result<(), FlagStoreError>;
}

/// Keeps the flag in memory. Clones share the flag, so a gate built on a
/// clone observes what another gate stored.
#[derive(Clone, Debug, Default)]
pub struct MemoryFlagStore {
    flag: Arc<AtomicBool>,
}

impl FlagStore for MemoryFlagStore {
    fn load(&self) -> Result<bool, FlagStoreError> {
        Ok(self.flag.load(Ordering::Acquire))
    }

    fn store(&self) -> Result<(), FlagStoreError> {
        self.flag.store(true, Ordering::Release);
        Ok(())
    }

    fn clear(&self) -> Result<(), FlagStoreError> {
        self.flag.store(false, Ordering::Release);
        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct FlagFile {
    is_admin: bool,
}

/// Keeps the flag in a small JSON file. A missing file means not elevated.
#[derive(Clone, Debug)]
pub struct FileFlagStore {
    path: PathBuf,
}

impl FileFlagStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FlagStore for FileFlagStore {
    fn load(&self) -> Result<bool, FlagStoreError> {
        match fs::read(&self.path) {
            Ok(contents) => Ok(serde_json::from_slice::<FlagFile>(&contents)?.is_admin),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    fn store(&self) -> Result<(), FlagStoreError> {
        let contents = serde_json::to_vec(&FlagFile { is_admin: true })?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), FlagStoreError> {
        match fs::remove_file(&self.path) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }
}

/// Access to the mutating operations of the view controller.
///
/// Only [`AdminGate`] hands these out. A capability follows its gate: once
/// the gate is revoked, every capability it issued stops being active.
#[derive(Clone, Debug)]
pub struct AdminCapability {
    elevated: watch::Receiver<bool>,
}

impl AdminCapability {
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self.elevated.borrow()
    }
}

struct GateInner {
    store: Box<dyn FlagStore>,
    sender: watch::Sender<bool>,
}

/// Shared admin flag. Clones refer to the same flag and notify the same
/// subscribers.
#[derive(Clone)]
pub struct AdminGate {
    inner: Arc<GateInner>,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("elevated", &self.is_elevated())
            .finish_non_exhaustive()
    }
}

impl AdminGate {
    /// Restores the flag from `store`. An unreadable store starts the gate
    /// unelevated.
    pub fn new(store: impl FlagStore + 'static) -> Self {
        let elevated = store.load().unwrap_or_else(|error| {
            warn!(%error, "Unable to read the admin flag. Starting unelevated.");
            false
        });
        debug!(elevated, "Restored admin flag");

        Self {
            inner: Arc::new(GateInner {
                store: Box::new(store),
                sender: watch::Sender::new(elevated),
            }),
        }
    }

    #[must_use]
    pub fn is_elevated(&self) -> bool {
        *self.inner.sender.borrow()
    }

    /// Elevates if `credential` is the admin identifier.
    ///
    /// Persisting the flag is best effort: a store failure is logged and the
    /// gate stays elevated for as long as it lives.
    pub fn elevate(&self, credential: &str) -> Option<AdminCapability> {
        if credential != ADMIN_IDENTIFIER {
            warn!("Rejected admin credential");
            return None;
        }

        if let Err(error) = self.inner.store.store() {
            error!(%error, "Failed to persist admin flag");
        }
        self.publish(true);
        info!("Admin mode enabled");

        Some(self.issue())
    }

    pub fn revoke(&self) {
        if let Err(error) = self.inner.store.clear() {
            error!(%error, "Failed to clear persisted admin flag");
        }
        self.publish(false);
        info!("Admin mode disabled");
    }

    /// A capability for a gate that is already elevated, e.g. after a reload.
    #[must_use]
    pub fn capability(&self) -> Option<AdminCapability> {
        self.is_elevated().then(|| self.issue())
    }

    fn issue(&self) -> AdminCapability {
        AdminCapability {
            elevated: self.inner.sender.subscribe(),
        }
    }

    /// Re-reads the store and publishes the flag if another writer changed it.
    pub fn sync(&self) -> Result<bool, FlagStoreError> {
        let elevated = self.inner.store.load()?;
        self.publish(elevated);
        Ok(elevated)
    }

    /// Receives every change of the flag.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.sender.subscribe()
    }

    fn publish(&self, elevated: bool) {
        self.inner.sender.send_if_modified(|current| {
            let changed = *current != elevated;
            *current = elevated;
            changed
        });
    }
}
