use crate::entry::FitnessEntry;
use crate::entry_list::EntryList;
use crate::error::StoreError;
use log::{debug, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const INDENT: &[u8] = b"    ";

/// reads and rewrites the whole entry collection as a single json document
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// returns every stored entry, or nothing if the file is missing or unreadable
    pub fn load(&self) -> Vec<FitnessEntry> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found, starting empty", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("could not read {}: {e}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("ignoring malformed {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// overwrites the file with `entries`. not atomic: a crash mid-write can truncate it.
    pub fn save(&self, entries: &[FitnessEntry]) -> Result<(), StoreError> {
        let mut buf = Vec::with_capacity(128 * entries.len() + 2);
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        entries.serialize(&mut ser)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_err(source))?;
        }

        fs::write(&self.path, buf).map_err(|source| self.io_err(source))?;
        debug!("wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    pub fn load_list(&self) -> EntryList {
        EntryList::from(self.load())
    }

    pub fn save_list(&self, list: &EntryList) -> Result<(), StoreError> {
        self.save(list.as_slice())
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
