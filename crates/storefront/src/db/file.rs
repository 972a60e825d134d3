//! File-backed key-value store.
//!
//! All entries live in one JSON object on disk. Every operation reads the
//! file, so separate processes (or separate stores on the same path) observe
//! each other's writes.
//!
//! Writers take an exclusive advisory lock on a sibling `.lock` file for the
//! whole load-modify-save cycle, then write a uniquely named temp file in the
//! same directory and persist it over the document. Readers never lock: the
//! rename is atomic, so they see either the old or the new document.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{KeyValueStore, StoreError, Update};

type Document = BTreeMap<String, String>;

/// Store persisted to a single JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// The parent directory is created if missing. The file itself is only
    /// created on the first write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created, or
    /// `StoreError::Serialization` if an existing file is not a JSON object
    /// of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut lock_path = OsString::from(path.as_os_str());
        lock_path.push(".lock");

        let store = Self {
            path,
            lock_path: PathBuf::from(lock_path),
        };
        // Fail early on a corrupt document rather than on first use.
        store.load()?;
        Ok(store)
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    fn load(&self) -> Result<Document, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Document::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        let tmp = NamedTempFile::new_in(self.dir())?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, document)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Exclusive writer lock, released when the returned handle is dropped.
    fn lock(&self) -> Result<File, StoreError> {
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        lock.lock()?;
        Ok(lock)
    }

    fn modify(
        &self,
        apply: impl FnOnce(&mut Document) -> Result<bool, StoreError>,
    ) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        let mut document = self.load()?;
        if apply(&mut document)? {
            self.save(&document)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.modify(|document| {
            document.insert(key.to_owned(), value);
            Ok(true)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.modify(|document| Ok(document.remove(key).is_some()))
    }

    fn update(&self, key: &str, apply: Update<'_>) -> Result<(), StoreError> {
        self.modify(|document| match apply(document.get(key).map(String::as_str))? {
            Some(value) => {
                document.insert(key.to_owned(), value);
                Ok(true)
            }
            None => Ok(false),
        })
    }
}
