//! The last known state of the watched channel, mirrored to disk.
use crate::twitch::StreamInfo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

pub mod error;
pub mod io;
pub mod query;

pub use error::StoreError;
pub use query::StatusSummary;

/// Channel login to the stream it was last seen running.
///
/// A channel with an entry is believed live; a channel without one is
/// believed offline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamStatus(HashMap<String, StreamInfo>);

pub type SharedStatus = Arc<RwLock<StreamStatus>>;

impl StreamStatus {
    #[must_use]
    pub fn get(&self, channel: &str) -> Option<&StreamInfo> {
        self.0.get(channel)
    }
    #[must_use]
    pub fn is_live(&self, channel: &str) -> bool {
        self.0.contains_key(channel)
    }
    pub fn insert<S: Into<String>>(&mut self, channel: S, info: StreamInfo) -> Option<StreamInfo> {
        self.0.insert(channel.into(), info)
    }
    pub fn remove(&mut self, channel: &str) -> Option<StreamInfo> {
        self.0.remove(channel)
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The shared [StreamStatus] together with the file it is persisted to.
///
/// Can be reused by cloning.
#[derive(Debug, Clone)]
pub struct StatusStore {
    path: PathBuf,
    shared: SharedStatus,
}

impl StatusStore {
    /// Loads the persisted status at `path`. An unreadable or malformed file
    /// yields an empty status.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let status = io::load(&path).await;
        Self {
            path,
            shared: Arc::new(RwLock::new(status)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A handle to the in-memory status, for readers.
    #[must_use]
    pub fn shared(&self) -> SharedStatus {
        self.shared.clone()
    }

    /// Writes `status` to disk, logging the outcome. Failures leave the
    /// in-memory status as it is.
    pub async fn persist(&self, status: &StreamStatus) {
        match io::save(&self.path, status).await {
            Ok(()) => info!("Saved stream status to {}", self.path.display()),
            Err(err) => error!("Error saving stream status to {}: {err}", self.path.display()),
        }
    }
}
