//! JSON file backend for the document store.
//!
//! # Responsibility
//! - Map `load`/`flush` onto a single pretty-printed JSON file.
//! - Replace the file atomically via a sibling temp file and rename.
//!
//! # Invariants
//! - The parent directory is created on demand.
//! - A failed flush leaves the previous file content in place.

use super::{decode_document, encode_document, DocumentStore, StoreError, StoreResult};
use crate::model::document::Document;
use log::{error, info};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Document store persisted as one JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the durable image.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_or_init(&self) -> StoreResult<Document> {
        match fs::read(&self.path) {
            Ok(bytes) => decode_document(&self.path, &bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let document = Document::default();
                self.replace_image(&document)?;
                info!("event=store_init module=store status=ok mode=file");
                Ok(document)
            }
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn replace_image(&self, document: &Document) -> StoreResult<()> {
        let bytes = encode_document(document)?;
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;

        let mut staged = NamedTempFile::new_in(parent).map_err(|source| self.io_error(source))?;
        staged
            .write_all(&bytes)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|source| self.io_error(source))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> StoreResult<Document> {
        let started_at = Instant::now();
        match self.read_or_init() {
            Ok(document) => {
                info!(
                    "event=store_load module=store status=ok mode=file users={} todos={} duration_ms={}",
                    document.users.len(),
                    document.todos.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(document)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn flush(&self, document: &Document) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.replace_image(document) {
            Ok(()) => {
                info!(
                    "event=store_flush module=store status=ok mode=file users={} todos={} duration_ms={}",
                    document.users.len(),
                    document.todos.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_flush module=store status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
