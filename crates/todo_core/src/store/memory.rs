//! In-memory backend for the document store.
//!
//! Holds the serialized image rather than a live `Document`, so every
//! `load` decodes a fresh copy exactly like the file backend does.

use super::{decode_document, encode_document, DocumentStore, StoreResult};
use crate::model::document::Document;
use log::info;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const MEMORY_LOCATION: &str = ":memory:";

/// Document store whose durable image lives in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    image: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    /// Creates a store with no image; the first `load` initializes it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with raw image bytes (which may be invalid).
    pub fn with_image(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            image: Mutex::new(Some(bytes.into())),
        }
    }

    /// Returns a copy of the current raw image, if one was written.
    pub fn image(&self) -> Option<Vec<u8>> {
        self.lock_image().clone()
    }

    fn lock_image(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        self.image.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> StoreResult<Document> {
        let mut image = self.lock_image();
        match image.as_deref() {
            Some(bytes) => decode_document(Path::new(MEMORY_LOCATION), bytes),
            None => {
                let document = Document::default();
                *image = Some(encode_document(&document)?);
                info!("event=store_init module=store status=ok mode=memory");
                Ok(document)
            }
        }
    }

    fn flush(&self, document: &Document) -> StoreResult<()> {
        let bytes = encode_document(document)?;
        *self.lock_image() = Some(bytes);
        Ok(())
    }
}
