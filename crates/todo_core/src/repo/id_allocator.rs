//! Identifier allocation for new records.
//!
//! # Invariants
//! - `CollectionLength` returns `len + 1`. After a deletion that is not at
//!   the tail it can hand out an id still held by a surviving record.
//! - `HighWaterMark` returns `max(id) + 1` over the loaded collection. It
//!   avoids reuse after deletions but not duplicates from concurrent writers.

use crate::model::id::{Identified, RecordId};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Policy used to derive the next id of a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// `collection.len() + 1`; matches images written by existing deployments.
    #[default]
    CollectionLength,
    /// `max(existing ids) + 1`, or `1` for an empty collection.
    HighWaterMark,
}

impl IdPolicy {
    pub fn next_id<T: Identified>(self, collection: &[T]) -> RecordId {
        match self {
            Self::CollectionLength => RecordId::try_from(collection.len())
                .map_or(RecordId::MAX, |len| len.saturating_add(1)),
            Self::HighWaterMark => collection
                .iter()
                .map(Identified::id)
                .max()
                .map_or(1, |max| max.saturating_add(1).max(1)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CollectionLength => "length",
            Self::HighWaterMark => "high_water_mark",
        }
    }
}

impl Display for IdPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "length" | "collection_length" => Ok(Self::CollectionLength),
            "high_water_mark" | "hwm" => Ok(Self::HighWaterMark),
            other => Err(format!(
                "unsupported id policy `{other}`; expected length|high_water_mark"
            )),
        }
    }
}
