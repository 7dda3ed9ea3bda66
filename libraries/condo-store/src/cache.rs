//! Durable local cache.
//!
//! Two independent keys survive process restarts, stored as plain files
//! under a data directory:
//!
//! - the last-known remote document id, read at startup and rewritten
//!   whenever a new or recovered id is obtained;
//! - the session mirror `{user, houses, payments, expenses, suggestions}`,
//!   rewritten on every state change while a user is logged in.
//!
//! The mirror is a device-local fallback only; it is never pushed to the
//! remote store on its own.

use crate::error::Result;
use condo_core::{Snapshot, User};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

const DOCUMENT_ID_FILE: &str = "document_id";
const SESSION_FILE: &str = "session.json";

/// Full local mirror of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMirror {
    pub user: Option<User>,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

/// File-backed store for the durable keys.
#[derive(Debug, Clone)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    /// Open (creating if needed) the cache under `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Last-known document id, if any.
    pub fn document_id(&self) -> Option<String> {
        match fs::read_to_string(self.dir.join(DOCUMENT_ID_FILE)) {
            Ok(raw) => {
                let id = raw.trim().to_string();
                (!id.is_empty()).then_some(id)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(error = %e, "Failed to read cached document id");
                None
            }
        }
    }

    pub fn store_document_id(&self, id: &str) -> Result<()> {
        debug!(id = %id, "Storing document id");
        fs::write(self.dir.join(DOCUMENT_ID_FILE), id)?;
        Ok(())
    }

    /// Forget a stale document id; no-op if none is stored.
    pub fn clear_document_id(&self) -> Result<()> {
        match fs::remove_file(self.dir.join(DOCUMENT_ID_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write_session(&self, mirror: &SessionMirror) -> Result<()> {
        let json = serde_json::to_vec(mirror)?;
        fs::write(self.dir.join(SESSION_FILE), json)?;
        Ok(())
    }

    pub fn read_session(&self) -> Result<Option<SessionMirror>> {
        match fs::read(self.dir.join(SESSION_FILE)) {
            Ok(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
