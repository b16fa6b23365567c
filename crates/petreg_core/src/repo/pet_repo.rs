//! Pet registry: the in-memory list plus snapshot synchronization.
//!
//! # Responsibility
//! - Hydrate once from the key-value store when opened.
//! - Apply add/update/delete synchronously, then queue one snapshot write.
//! - Serve list and name-search reads from memory.
//!
//! # Invariants
//! - Insertion order is preserved; updates keep position, deletes remove in
//!   place.
//! - Rejected mutations leave the list untouched and write nothing.
//! - Load and save failures are logged and never surfaced as errors.

use crate::config::RegistryConfig;
use crate::model::pet::{Pet, PetDraft, PetId};
use crate::notify::{Notifier, DUPLICATE_PET_MESSAGE, DUPLICATE_PET_UPDATE_MESSAGE};
use crate::repo::snapshot::{decode_snapshot, encode_snapshot};
use crate::repo::writer::SnapshotWriter;
use crate::search::filter::search_by_name;
use crate::store::KeyValueStore;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Rejection reasons for registry mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Another pet already uses this name, ignoring case.
    DuplicateName { name: String },
    /// A caller-supplied id is already taken.
    DuplicateId(PetId),
    NotFound(PetId),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName { name } => write!(f, "a pet named `{name}` already exists"),
            Self::DuplicateId(id) => write!(f, "pet id already in use: {id}"),
            Self::NotFound(id) => write!(f, "pet not found: {id}"),
        }
    }
}

impl Error for RegistryError {}

/// How the initial load from storage went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot was found and decoded.
    Restored {
        count: usize,
        assigned_ids: usize,
        /// Stored records with a blank name.
        blank_names: usize,
        /// Stored records sharing a name, ignoring case, with an earlier one.
        shared_names: usize,
    },
    /// Nothing stored under the key yet.
    Empty,
    /// Read or decode failed; the registry started empty.
    Failed,
}

/// Owned pet registry for one session.
pub struct PetRegistry {
    pets: Vec<Pet>,
    config: RegistryConfig,
    notifier: Arc<dyn Notifier>,
    writer: SnapshotWriter,
    load_outcome: LoadOutcome,
}

impl PetRegistry {
    /// Opens a registry backed by `store`, loading any stored snapshot.
    ///
    /// Must run inside a tokio runtime; the persistence writer is spawned
    /// on it.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        config: RegistryConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let writer = SnapshotWriter::spawn(Arc::clone(&store), config.storage_key().to_string());
        let mut registry = Self {
            pets: Vec::new(),
            config,
            notifier,
            writer,
            load_outcome: LoadOutcome::Empty,
        };
        registry.load(store.as_ref()).await;
        registry
    }

    async fn load(&mut self, store: &dyn KeyValueStore) {
        let key = self.config.storage_key();
        let started_at = Instant::now();
        info!("event=pets_load module=repo status=start key={key}");

        let blob = match store.get(key).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                info!(
                    "event=pets_load module=repo status=ok key={key} count=0 stored=false duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                self.load_outcome = LoadOutcome::Empty;
                return;
            }
            Err(err) => {
                error!(
                    "event=pets_load module=repo status=error key={key} error_code=read_failed error={err}"
                );
                self.load_outcome = LoadOutcome::Failed;
                return;
            }
        };

        match decode_snapshot(&blob) {
            Ok(decoded) => {
                if decoded.assigned_ids > 0 {
                    warn!(
                        "event=pets_load module=repo status=repaired key={key} assigned_ids={}",
                        decoded.assigned_ids
                    );
                }
                if decoded.blank_names > 0 || decoded.shared_names > 0 {
                    warn!(
                        "event=pets_load module=repo status=inconsistent key={key} blank_names={} shared_names={}",
                        decoded.blank_names, decoded.shared_names
                    );
                }
                info!(
                    "event=pets_load module=repo status=ok key={key} count={} stored=true duration_ms={}",
                    decoded.pets.len(),
                    started_at.elapsed().as_millis()
                );
                self.load_outcome = LoadOutcome::Restored {
                    count: decoded.pets.len(),
                    assigned_ids: decoded.assigned_ids,
                    blank_names: decoded.blank_names,
                    shared_names: decoded.shared_names,
                };
                self.pets = decoded.pets;
            }
            Err(err) => {
                error!(
                    "event=pets_load module=repo status=error key={key} error_code=decode_failed error={err}"
                );
                self.load_outcome = LoadOutcome::Failed;
            }
        }
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Full list in insertion order.
    pub fn list(&self) -> &[Pet] {
        &self.pets
    }

    pub fn get(&self, id: &PetId) -> Option<&Pet> {
        self.pets.iter().find(|pet| &pet.id == id)
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Pets whose name contains `query`, ignoring case, in list order.
    pub fn search(&self, query: &str) -> Vec<&Pet> {
        search_by_name(&self.pets, query)
    }

    /// Appends a new pet and returns its id.
    ///
    /// # Errors
    /// - `DuplicateName` when the name collides ignoring case; the user is
    ///   alerted.
    /// - `DuplicateId` when a pre-assigned id is already in use.
    pub fn add(&mut self, draft: PetDraft) -> RegistryResult<PetId> {
        if self.pets.iter().any(|pet| pet.name_collides_with(&draft.name)) {
            info!("event=pet_add module=repo status=rejected reason=duplicate_name");
            self.notifier.alert(DUPLICATE_PET_MESSAGE);
            return Err(RegistryError::DuplicateName { name: draft.name });
        }
        if let Some(id) = draft.id.as_ref().filter(|id| self.get(id).is_some()) {
            info!("event=pet_add module=repo status=rejected reason=duplicate_id");
            return Err(RegistryError::DuplicateId(id.clone()));
        }

        let pet = draft.into_pet();
        let id = pet.id.clone();
        self.pets.push(pet);
        info!("event=pet_add module=repo status=ok count={}", self.pets.len());
        self.persist();
        Ok(id)
    }

    /// Replaces the record with the same id wholesale, keeping its position.
    ///
    /// # Errors
    /// - `NotFound` when no record has `pet.id`.
    /// - `DuplicateName` when the name changes (ignoring case) to one another
    ///   pet already uses. Keeping the current name is always accepted, even
    ///   when a stored snapshot already held a same-named twin.
    pub fn update(&mut self, pet: Pet) -> RegistryResult<()> {
        let Some(index) = self.position(&pet.id) else {
            return Err(RegistryError::NotFound(pet.id));
        };
        let renamed = !self.pets[index].name_collides_with(&pet.name);
        if renamed
            && self
                .pets
                .iter()
                .any(|other| other.id != pet.id && other.name_collides_with(&pet.name))
        {
            info!("event=pet_update module=repo status=rejected reason=duplicate_name");
            self.notifier.alert(DUPLICATE_PET_UPDATE_MESSAGE);
            return Err(RegistryError::DuplicateName { name: pet.name });
        }

        self.pets[index] = pet;
        info!("event=pet_update module=repo status=ok index={index}");
        self.persist();
        Ok(())
    }

    /// Removes the record with `id` and returns it.
    pub fn delete(&mut self, id: &PetId) -> RegistryResult<Pet> {
        let index = self
            .position(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        let removed = self.pets.remove(index);
        info!("event=pet_delete module=repo status=ok count={}", self.pets.len());
        self.persist();
        Ok(removed)
    }

    /// Waits until every snapshot queued so far has been attempted.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Stops the persistence writer after draining queued snapshots.
    pub async fn close(self) {
        self.writer.shutdown().await;
    }

    fn position(&self, id: &PetId) -> Option<usize> {
        self.pets.iter().position(|pet| &pet.id == id)
    }

    fn persist(&self) {
        let key = self.config.storage_key();
        let snapshot = match encode_snapshot(&self.pets) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("event=pets_save module=repo status=error key={key} error_code=encode_failed error={err}");
                return;
            }
        };
        if !self.writer.enqueue(snapshot) {
            error!("event=pets_save module=repo status=error key={key} error_code=writer_closed");
        }
    }
}
