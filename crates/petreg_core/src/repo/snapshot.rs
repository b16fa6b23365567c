//! JSON snapshot codec for the pet list.
//!
//! # Invariants
//! - A snapshot is one JSON array; it decodes wholly or not at all.
//! - Decoded pets always carry a non-empty id unique within the snapshot.

use crate::model::pet::{Pet, PetId};
use serde::Deserialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct SnapshotError(serde_json::Error);

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid pet snapshot: {}", self.0)
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self(value)
    }
}

/// Result of decoding a stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub pets: Vec<Pet>,
    /// Records that had a missing, empty or repeated id and got a fresh one.
    pub assigned_ids: usize,
    /// Records whose name is blank. Kept as stored.
    pub blank_names: usize,
    /// Records whose name repeats an earlier one ignoring case. Kept as stored.
    pub shared_names: usize,
}

// Wire shape tolerating records written without an id.
#[derive(Deserialize)]
struct StoredPet {
    #[serde(default)]
    id: Option<String>,
    name: String,
    age: u32,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    photo: Option<String>,
}

/// Serializes the full list as one JSON array.
pub fn encode_snapshot(pets: &[Pet]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(pets)?)
}

/// Parses a snapshot, repairing missing or repeated ids.
///
/// Blank and case-insensitively repeated names are counted but not changed.
pub fn decode_snapshot(blob: &str) -> Result<DecodedSnapshot, SnapshotError> {
    let stored: Vec<StoredPet> = serde_json::from_str(blob)?;
    let mut seen = HashSet::with_capacity(stored.len());
    let mut seen_names = HashSet::with_capacity(stored.len());
    let mut assigned_ids = 0;
    let mut blank_names = 0;
    let mut shared_names = 0;

    let pets = stored
        .into_iter()
        .map(|record| {
            let id = match record.id.and_then(|raw| PetId::parse(raw).ok()) {
                Some(id) if !seen.contains(&id) => id,
                _ => {
                    assigned_ids += 1;
                    PetId::generate()
                }
            };
            seen.insert(id.clone());
            if record.name.trim().is_empty() {
                blank_names += 1;
            } else if !seen_names.insert(record.name.to_lowercase()) {
                shared_names += 1;
            }
            Pet {
                id,
                name: record.name,
                age: record.age,
                description: record.description,
                photo: record.photo,
            }
        })
        .collect();

    Ok(DecodedSnapshot {
        pets,
        assigned_ids,
        blank_names,
        shared_names,
    })
}
