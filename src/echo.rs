//! Echo Chamber - the community guestbook
//!
//! Entries live in a single JSON file. Writes go to a sibling temp file that
//! is then renamed over the original.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{PrismError, Result};
use crate::mode::Mode;
use crate::sanitize::sanitize_input;

/// Longest display name kept
pub const MAX_NAME_LEN: usize = 40;

/// Longest message kept
pub const MAX_MESSAGE_LEN: usize = 280;

/// Name shown when a visitor leaves none
pub const ANONYMOUS: &str = "Anonymous";

/// A guestbook entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoEntry {
    pub id: Uuid,
    pub name: String,
    pub message: String,
    pub mode: Mode,
    pub created_at: DateTime<Utc>,
}

/// File-backed guestbook
#[derive(Debug)]
pub struct EchoChamber {
    path: PathBuf,
    entries: Vec<EchoEntry>,
}

impl EchoChamber {
    /// Open the guestbook at `path`; a missing file is an empty guestbook
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };

        debug!("Opened echo chamber {} ({} entries)", path.display(), entries.len());

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Post a new entry and persist it
    pub fn post(&mut self, name: &str, message: &str, mode: Mode) -> Result<EchoEntry> {
        let message = sanitize_input(message, MAX_MESSAGE_LEN);
        if message.is_empty() {
            return Err(PrismError::InvalidEntry {
                reason: "message is empty".to_string(),
            });
        }

        let name = sanitize_input(name, MAX_NAME_LEN);
        let name = if name.is_empty() {
            ANONYMOUS.to_string()
        } else {
            name
        };

        let entry = EchoEntry {
            id: Uuid::new_v4(),
            name,
            message,
            mode,
            created_at: Utc::now(),
        };

        self.entries.push(entry.clone());
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }

        info!("Echo posted by {} in {} mode", entry.name, entry.mode);
        Ok(entry)
    }

    /// Newest entries first
    pub fn recent(&self, limit: usize) -> Vec<&EchoEntry> {
        let mut entries: Vec<&EchoEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit);
        entries
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
