//! The appointment store: single source of truth for pets and appointments.
//!
//! Every mutating operation writes the affected collection back through the
//! injected [`StoragePort`] before returning.

use super::errors::{DomainError, DomainResult};
use super::models::{Appointment, AppointmentDraft, AppointmentPatch, AppointmentStatus, Pet, StatusCounts};
use super::ports::{StoragePort, APPOINTMENTS_KEY, PETS_KEY};
use super::seed::seed_pets;
use chrono::Utc;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// How the pet collection is prepared when the store starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PetSeeding {
    /// Always overwrite the stored pets with the seed list.
    #[default]
    ResetOnStart,
    /// Keep stored pets; seed only when nothing usable is stored.
    SeedIfAbsent,
}

impl std::str::FromStr for PetSeeding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" | "reset-on-start" => Ok(PetSeeding::ResetOnStart),
            "seed-if-absent" | "keep" => Ok(PetSeeding::SeedIfAbsent),
            other => Err(format!("unknown pet seeding policy: {}", other)),
        }
    }
}

/// Owns the pet and appointment collections and keeps storage in sync.
///
/// # Examples
///
/// ```
/// use pawbook::domain::{AppointmentStore, PetSeeding};
/// use pawbook::infrastructure::MemoryStorage;
///
/// let mut store = AppointmentStore::new(MemoryStorage::default(), PetSeeding::ResetOnStart);
/// store.initialize().unwrap();
/// assert_eq!(store.pets().len(), 6);
/// assert!(store.appointments().is_empty());
/// ```
#[derive(Debug)]
pub struct AppointmentStore<S: StoragePort> {
    storage: S,
    seeding: PetSeeding,
    pets: Vec<Pet>,
    appointments: Vec<Appointment>,
    last_issued_id: i64,
}

impl<S: StoragePort> AppointmentStore<S> {
    /// Creates an empty store. Call [`initialize`](Self::initialize) to load state.
    pub fn new(storage: S, seeding: PetSeeding) -> Self {
        Self {
            storage,
            seeding,
            pets: Vec::new(),
            appointments: Vec::new(),
            last_issued_id: 0,
        }
    }

    /// Loads appointments from storage and prepares the pet list.
    ///
    /// Stored records that cannot be parsed are treated as missing: the
    /// appointment list starts empty and the pets are re-seeded. The only
    /// error returned is a failure to write the seeded pets.
    pub fn initialize(&mut self) -> DomainResult<()> {
        self.appointments = self.load_collection(APPOINTMENTS_KEY).unwrap_or_default();
        info!("loaded {} appointment(s)", self.appointments.len());

        let stored_pets = match self.seeding {
            PetSeeding::ResetOnStart => None,
            PetSeeding::SeedIfAbsent => self.load_collection::<Pet>(PETS_KEY),
        };

        match stored_pets {
            Some(pets) => {
                info!("keeping {} stored pet(s)", pets.len());
                self.pets = pets;
                Ok(())
            }
            None => {
                self.pets = seed_pets();
                info!("seeded {} pet(s)", self.pets.len());
                self.persist_pets()
            }
        }
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn available_pets(&self) -> Vec<&Pet> {
        self.pets.iter().filter(|p| p.available).collect()
    }

    pub fn pet(&self, id: &str) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == id)
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts {
            total: self.appointments.len(),
            scheduled: self.count_with_status(AppointmentStatus::Scheduled),
            completed: self.count_with_status(AppointmentStatus::Completed),
        }
    }

    fn count_with_status(&self, status: AppointmentStatus) -> usize {
        self.appointments.iter().filter(|a| a.status == status).count()
    }

    /// Stores a new appointment and returns it with its assigned id.
    ///
    /// The appointment stays in memory even if the write fails; the error is
    /// still returned so the caller can report it.
    ///
    /// # Arguments
    ///
    /// * `draft` - The appointment without an id
    pub fn add_appointment(&mut self, draft: AppointmentDraft) -> DomainResult<Appointment> {
        let id = self.next_id(Utc::now().timestamp_millis());
        let appointment = draft.into_appointment(id);
        info!(
            "adding appointment {} for pet {} on {} {}",
            appointment.id, appointment.pet_id, appointment.date, appointment.time
        );
        self.appointments.push(appointment.clone());
        self.persist_appointments()?;
        Ok(appointment)
    }

    /// Merges `patch` into the appointment with `id`. Unknown ids are ignored.
    pub fn update_appointment(&mut self, id: &str, patch: AppointmentPatch) -> DomainResult<()> {
        match self.appointments.iter_mut().find(|a| a.id == id) {
            Some(appointment) => {
                if let Some(status) = patch.status {
                    info!("appointment {} status -> {}", id, status);
                }
                patch.apply_to(appointment);
            }
            None => debug!("update of unknown appointment {} ignored", id),
        }
        self.persist_appointments()
    }

    /// Removes the appointment with `id`. Unknown ids are ignored.
    pub fn delete_appointment(&mut self, id: &str) -> DomainResult<()> {
        let before = self.appointments.len();
        self.appointments.retain(|a| a.id != id);
        if self.appointments.len() < before {
            info!("deleted appointment {}", id);
        } else {
            debug!("delete of unknown appointment {} ignored", id);
        }
        self.persist_appointments()
    }

    pub fn update_pet_availability(&mut self, pet_id: &str, available: bool) -> DomainResult<()> {
        match self.pets.iter_mut().find(|p| p.id == pet_id) {
            Some(pet) => {
                info!("pet {} available -> {}", pet_id, available);
                pet.available = available;
            }
            None => debug!("availability change for unknown pet {} ignored", pet_id),
        }
        self.persist_pets()
    }

    /// Returns a time-based id strictly greater than any numeric id issued or
    /// stored, or a `<millis>-<n>` id once no larger number is left.
    fn next_id(&mut self, now_millis: i64) -> String {
        let floor = self
            .appointments
            .iter()
            .filter_map(|a| a.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            .max(self.last_issued_id);
        let id = if now_millis > floor { Some(now_millis) } else { floor.checked_add(1) };
        match id {
            Some(id) => {
                self.last_issued_id = id;
                id.to_string()
            }
            None => {
                warn!("numeric appointment ids exhausted, issuing a suffixed id");
                (1u64..)
                    .map(|n| format!("{}-{}", now_millis, n))
                    .find(|candidate| self.appointments.iter().all(|a| &a.id != candidate))
                    .unwrap_or_default()
            }
        }
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let raw = match self.storage.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("could not read '{}': {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Some(items),
            Err(e) => {
                warn!("stored '{}' is corrupt, ignoring it: {}", key, e);
                None
            }
        }
    }

    fn persist_appointments(&mut self) -> DomainResult<()> {
        Self::persist(&mut self.storage, APPOINTMENTS_KEY, &self.appointments)
    }

    fn persist_pets(&mut self) -> DomainResult<()> {
        Self::persist(&mut self.storage, PETS_KEY, &self.pets)
    }

    fn persist<T: Serialize>(storage: &mut S, key: &str, items: &[T]) -> DomainResult<()> {
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;
        storage.save(key, &json).inspect_err(|e| {
            error!("failed to save '{}': {}", key, e);
        })
    }

    /// Gives access to the underlying storage, e.g. to reload it in tests.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
