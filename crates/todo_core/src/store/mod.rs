//! Document store: durable image load/flush.
//!
//! # Responsibility
//! - Read the whole document image on every `load`, creating an empty image
//!   when none exists.
//! - Replace the whole image on every `flush`.
//!
//! # Invariants
//! - No document state is cached between calls; each `load` observes the
//!   latest durable image.
//! - A `flush` either replaces the image completely or leaves the previous
//!   image untouched.
//! - Concurrent load/flush cycles are not coordinated; the last flush wins.

use crate::model::document::Document;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-boundary failure for document load/flush.
#[derive(Debug)]
pub enum StoreError {
    /// Reading, creating or replacing the image failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The image exists but is not a valid document.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The in-memory document could not be serialized.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "document image `{}` is inaccessible: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "document image `{}` is corrupt: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Durable home of the document.
///
/// Implementations must not hand out shared mutable state: every `load`
/// returns a fresh, caller-owned `Document`.
pub trait DocumentStore {
    /// Reads the latest durable image, initializing an empty one if absent.
    fn load(&self) -> StoreResult<Document>;
    /// Overwrites the durable image with `document`.
    fn flush(&self, document: &Document) -> StoreResult<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn load(&self) -> StoreResult<Document> {
        (**self).load()
    }

    fn flush(&self, document: &Document) -> StoreResult<()> {
        (**self).flush(document)
    }
}

pub(crate) fn encode_document(document: &Document) -> StoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(document).map_err(StoreError::Encode)
}

pub(crate) fn decode_document(path: &Path, bytes: &[u8]) -> StoreResult<Document> {
    let document: Document =
        serde_json::from_slice(bytes).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

    // Length-based allocation and uncoordinated writers can both produce
    // repeated ids; lookups resolve to the first match.
    if let Some(id) = document.duplicate_user_id() {
        warn!("event=store_load module=store status=warn duplicate_user_id={id}");
    }
    if let Some(id) = document.duplicate_todo_id() {
        warn!("event=store_load module=store status=warn duplicate_todo_id={id}");
    }

    Ok(document)
}
