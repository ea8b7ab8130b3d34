//! Repositories for clinic records.
//!
//! The view layer consumes records only through the `Repository` trait, so
//! the in-memory demo implementation can be swapped for the hosted row
//! store without touching view code.

pub mod seed;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

use crate::models::{Appointment, InventoryItem, Invoice, Message, Patient, StaffMember};

/// A record with a numeric identity managed by its repository.
pub trait Record: Clone {
    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
}

macro_rules! impl_record {
    ($($ty:ty),+) => {
        $(impl Record for $ty {
            fn id(&self) -> u32 {
                self.id
            }
            fn set_id(&mut self, id: u32) {
                self.id = id;
            }
        })+
    };
}

impl_record!(Patient, Appointment, Invoice, InventoryItem, StaffMember, Message);

/// Read/write access to one collection of clinic records.
pub trait Repository<T: Record>: Send + Sync {
    fn list(&self) -> Vec<T>;
    fn get(&self, id: u32) -> Option<T>;
    /// Insert a record, assigning and returning its id.
    fn create(&self, item: T) -> u32;
    /// Replace the record with the same id. Returns false if absent.
    fn update(&self, item: T) -> bool;
}

/// In-memory repository, the mock-data stand-in for the hosted row store.
pub struct InMemoryRepository<T: Record> {
    rows: RwLock<Vec<T>>,
    next_id: AtomicU32,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new(rows: Vec<T>) -> Self {
        let next_id = rows.iter().map(Record::id).max().unwrap_or(0) + 1;
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicU32::new(next_id),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record + Send + Sync> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> Vec<T> {
        self.rows.read().unwrap().clone()
    }

    fn get(&self, id: u32) -> Option<T> {
        self.rows.read().unwrap().iter().find(|r| r.id() == id).cloned()
    }

    fn create(&self, mut item: T) -> u32 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        item.set_id(id);
        self.rows.write().unwrap().push(item);
        id
    }

    fn update(&self, item: T) -> bool {
        let mut rows = self.rows.write().unwrap();
        match rows.iter_mut().find(|r| r.id() == item.id()) {
            Some(row) => {
                *row = item;
                true
            }
            None => false,
        }
    }
}

/// All clinic repositories, one per entity.
pub struct Clinic {
    pub patients: InMemoryRepository<Patient>,
    pub appointments: InMemoryRepository<Appointment>,
    pub invoices: InMemoryRepository<Invoice>,
    pub inventory: InMemoryRepository<InventoryItem>,
    pub staff: InMemoryRepository<StaffMember>,
    pub messages: InMemoryRepository<Message>,
}

impl Clinic {
    /// Clinic seeded with the demo data set.
    pub fn demo() -> Self {
        Self {
            patients: InMemoryRepository::new(seed::patients()),
            appointments: InMemoryRepository::new(seed::appointments()),
            invoices: InMemoryRepository::new(seed::invoices()),
            inventory: InMemoryRepository::new(seed::inventory()),
            staff: InMemoryRepository::new(seed::staff()),
            messages: InMemoryRepository::new(seed::messages()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Owner, PatientStatus, Species};

    fn patient(name: &str) -> Patient {
        Patient {
            id: 0,
            name: name.into(),
            species: Species::Dog,
            breed: None,
            age_years: None,
            gender: None,
            weight_kg: None,
            owner: Owner {
                name: "Owner".into(),
                phone: "+91 00000 00000".into(),
                email: None,
                address: None,
            },
            status: PatientStatus::Healthy,
            last_visit: None,
            next_vaccination: None,
            microchip: None,
            medical: Default::default(),
            visits: Vec::new(),
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let repo = InMemoryRepository::new(Vec::new());
        let a = repo.create(patient("Buddy"));
        let b = repo.create(patient("Whiskers"));
        assert!(b > a);
        assert_eq!(repo.get(a).unwrap().name, "Buddy");
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_create_ids_continue_after_seed() {
        let mut seeded = patient("Buddy");
        seeded.id = 7;
        let repo = InMemoryRepository::new(vec![seeded]);
        let id = repo.create(patient("Whiskers"));
        assert_eq!(id, 8);
    }

    #[test]
    fn test_update_replaces_matching_row() {
        let repo = InMemoryRepository::new(Vec::new());
        let id = repo.create(patient("Buddy"));

        let mut updated = repo.get(id).unwrap();
        updated.status = PatientStatus::Treatment;
        assert!(repo.update(updated));
        assert_eq!(repo.get(id).unwrap().status, PatientStatus::Treatment);

        let mut missing = patient("Ghost");
        missing.id = 999;
        assert!(!repo.update(missing));
    }

    #[test]
    fn test_demo_clinic_is_populated() {
        let clinic = Clinic::demo();
        assert!(!clinic.patients.is_empty());
        assert!(!clinic.appointments.is_empty());
        assert!(!clinic.invoices.is_empty());
        assert!(!clinic.inventory.is_empty());
        assert!(!clinic.staff.is_empty());
        assert!(!clinic.messages.is_empty());
    }
}
