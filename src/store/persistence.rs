//! Mirrors the store's collections into a [`KeyValueStore`], one JSON array
//! per key, and seeds sample data into an empty register.

use chrono::{Duration, Local, NaiveDate, NaiveTime};

use crate::db::{KeyValueStore, PersistenceError};
use crate::models::*;

/// Full contents of the register as read from or written to storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub appointments: Vec<Appointment>,
    pub bills: Vec<Bill>,
}

impl Snapshot {
    fn core_is_empty(&self) -> bool {
        self.patients.is_empty() && self.doctors.is_empty() && self.appointments.is_empty()
    }
}

pub struct Persistence<S> {
    kv: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.kv
    }

    #[cfg(test)]
    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Write every collection under its own key. Stops at the first
    /// rejected write and returns it.
    pub fn save_all(
        &mut self,
        patients: &[Patient],
        doctors: &[Doctor],
        appointments: &[Appointment],
        bills: &[Bill],
    ) -> Result<(), PersistenceError> {
        self.save_collection(patients)?;
        self.save_collection(doctors)?;
        self.save_collection(appointments)?;
        self.save_collection(bills)?;
        Ok(())
    }

    fn save_collection<T: Record>(&mut self, items: &[T]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(items).map_err(|source| PersistenceError::Encoding {
            key: T::STORAGE_KEY.to_string(),
            source,
        })?;
        self.kv.set(T::STORAGE_KEY, &json)
    }

    /// Missing or unreadable keys load as empty collections.
    fn load_collection<T: Record>(&self) -> Result<Vec<T>, PersistenceError> {
        let Some(raw) = self.kv.get(T::STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(key = T::STORAGE_KEY, error = %e, "Malformed collection, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Load with sample dates relative to the local calendar date.
    pub fn load_all(&mut self) -> Result<Snapshot, PersistenceError> {
        self.load_all_as_of(Local::now().date_naive())
    }

    /// Load every collection. An empty register (no patients, doctors or
    /// appointments) is seeded from [`sample_data`] and written back at once.
    pub fn load_all_as_of(&mut self, today: NaiveDate) -> Result<Snapshot, PersistenceError> {
        let mut snapshot = Snapshot {
            patients: self.load_collection()?,
            doctors: self.load_collection()?,
            appointments: self.load_collection()?,
            bills: self.load_collection()?,
        };

        if snapshot.core_is_empty() {
            let sample = sample_data(today);
            snapshot.patients = sample.patients;
            snapshot.doctors = sample.doctors;
            snapshot.appointments = sample.appointments;
            if snapshot.bills.is_empty() {
                snapshot.bills = sample.bills;
            }
            tracing::info!(%today, "Seeding sample register");
            self.save_all(
                &snapshot.patients,
                &snapshot.doctors,
                &snapshot.appointments,
                &snapshot.bills,
            )?;
        }

        tracing::debug!(
            patients = snapshot.patients.len(),
            doctors = snapshot.doctors.len(),
            appointments = snapshot.appointments.len(),
            bills = snapshot.bills.len(),
            "Register loaded"
        );
        Ok(snapshot)
    }
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Demo register: three patients, three doctors, two upcoming appointments
/// (today + 5 and + 7 days) and two recent bills.
pub fn sample_data(today: NaiveDate) -> Snapshot {
    let patient = |id, name: &str, age, gender, contact: &str, blood, address: &str| Patient {
        id,
        name: name.into(),
        age,
        gender,
        contact: contact.into(),
        blood: Some(blood),
        address: Some(address.into()),
    };
    let doctor = |id, name: &str, specialization: &str, contact: &str, email: &str| Doctor {
        id,
        name: name.into(),
        specialization: specialization.into(),
        contact: contact.into(),
        email: email.into(),
    };

    Snapshot {
        patients: vec![
            patient(1, "John Doe", 45, Gender::Male, "123-456-7890", BloodGroup::OPositive, "123 Main St"),
            patient(2, "Jane Smith", 32, Gender::Female, "098-765-4321", BloodGroup::APositive, "456 Oak Ave"),
            patient(3, "Robert Johnson", 58, Gender::Male, "555-123-4567", BloodGroup::BPositive, "789 Pine Rd"),
        ],
        doctors: vec![
            doctor(1, "Dr. Sarah Wilson", "Cardiology", "555-111-2222", "sarah.wilson@hospital.com"),
            doctor(2, "Dr. Michael Brown", "Neurology", "555-333-4444", "michael.brown@hospital.com"),
            doctor(3, "Dr. Emily Davis", "Pediatrics", "555-555-6666", "emily.davis@hospital.com"),
        ],
        appointments: vec![
            Appointment {
                id: 1,
                patient_id: 1,
                doctor_id: 1,
                date: today + Duration::days(5),
                time: at(10, 0),
                status: AppointmentStatus::Scheduled,
                notes: Some("Regular checkup".into()),
            },
            Appointment {
                id: 2,
                patient_id: 2,
                doctor_id: 3,
                date: today + Duration::days(7),
                time: at(14, 30),
                status: AppointmentStatus::Scheduled,
                notes: Some("Follow-up visit".into()),
            },
        ],
        bills: vec![
            Bill {
                id: 1,
                patient_id: 1,
                doctor_id: 2,
                amount: 1200.0,
                status: BillStatus::Paid,
                date: today - Duration::days(10),
            },
            Bill {
                id: 2,
                patient_id: 3,
                doctor_id: 1,
                amount: 850.0,
                status: BillStatus::Unpaid,
                date: today - Duration::days(6),
            },
        ],
    }
}
