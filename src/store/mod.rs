//! The register: owns every collection, applies mutations, and writes the
//! result through to durable storage after each one.

pub mod collection;
pub mod export;
pub mod ids;
pub mod persistence;
pub mod query;

pub use collection::Collection;
pub use persistence::{sample_data, Persistence, Snapshot};
pub use query::UNKNOWN_NAME;

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{KeyValueStore, PersistenceError};
use crate::error::StoreError;
use crate::models::*;

/// Dashboard counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub patients: usize,
    pub doctors: usize,
    pub appointments: usize,
    pub bills: usize,
    pub outstanding_amount: f64,
}

pub struct HospitalStore<S> {
    patients: Collection<Patient>,
    doctors: Collection<Doctor>,
    appointments: Collection<Appointment>,
    bills: Collection<Bill>,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> HospitalStore<S> {
    /// Load the register from `kv`, seeding it when empty.
    pub fn open(kv: S) -> Result<Self, StoreError> {
        let mut persistence = Persistence::new(kv);
        let snapshot = persistence.load_all()?;
        Ok(Self::from_snapshot(snapshot, persistence))
    }

    /// As [`HospitalStore::open`], with sample dates relative to `today`.
    pub fn open_as_of(kv: S, today: NaiveDate) -> Result<Self, StoreError> {
        let mut persistence = Persistence::new(kv);
        let snapshot = persistence.load_all_as_of(today)?;
        Ok(Self::from_snapshot(snapshot, persistence))
    }

    fn from_snapshot(snapshot: Snapshot, persistence: Persistence<S>) -> Self {
        Self {
            patients: Collection::new(snapshot.patients),
            doctors: Collection::new(snapshot.doctors),
            appointments: Collection::new(snapshot.appointments),
            bills: Collection::new(snapshot.bills),
            persistence,
        }
    }

    /// Write the current state out again, e.g. after a `NotPersisted` error.
    pub fn persist(&mut self) -> Result<(), PersistenceError> {
        self.persistence.save_all(
            self.patients.list(),
            self.doctors.list(),
            self.appointments.list(),
            self.bills.list(),
        )
    }

    fn commit(&mut self, entity_type: &'static str, id: u64) -> Result<(), StoreError> {
        self.persist().map_err(|source| {
            tracing::error!(entity_type, id, error = %source, "Change kept in memory but not saved");
            StoreError::NotPersisted {
                entity_type,
                id,
                source,
            }
        })
    }

    fn add<T: Record>(
        &mut self,
        select: fn(&mut Self) -> &mut Collection<T>,
        draft: T::Draft,
    ) -> Result<T, StoreError> {
        let created = select(self).insert(draft)?.clone();
        tracing::info!(entity_type = T::ENTITY_TYPE, id = created.id(), "Record added");
        self.commit(T::ENTITY_TYPE, created.id())?;
        Ok(created)
    }

    fn update<T: Record>(
        &mut self,
        select: fn(&mut Self) -> &mut Collection<T>,
        id: u64,
        patch: T::Patch,
    ) -> Result<T, StoreError> {
        let updated = select(self).update(id, patch)?.clone();
        tracing::info!(entity_type = T::ENTITY_TYPE, id, "Record updated");
        self.commit(T::ENTITY_TYPE, id)?;
        Ok(updated)
    }

    /// Drops appointments and bills whose patient or doctor matches.
    fn cascade(&mut self, refers: impl Fn(&dyn CareLink) -> bool) -> (usize, usize) {
        let appointments = self.appointments.remove_where(|a| refers(a as &dyn CareLink));
        let bills = self.bills.remove_where(|b| refers(b as &dyn CareLink));
        (appointments, bills)
    }

    // ── Patients ────────────────────────────────────────────

    pub fn patients(&self) -> &[Patient] {
        self.patients.list()
    }

    pub fn find_patient(&self, id: u64) -> Option<&Patient> {
        self.patients.find_by_id(id)
    }

    pub fn add_patient(&mut self, draft: NewPatient) -> Result<Patient, StoreError> {
        self.add(|s| &mut s.patients, draft)
    }

    pub fn update_patient(&mut self, id: u64, patch: PatientPatch) -> Result<Patient, StoreError> {
        self.update(|s| &mut s.patients, id, patch)
    }

    /// Remove a patient together with their appointments and bills.
    pub fn remove_patient(&mut self, id: u64) -> Result<(), StoreError> {
        self.patients.remove(id)?;
        let (appointments, bills) = self.cascade(|r| r.patient_id() == id);
        tracing::info!(id, appointments, bills, "Patient removed");
        self.commit(Patient::ENTITY_TYPE, id)
    }

    pub fn search_patients(&self, text: &str) -> Vec<&Patient> {
        query::search_patients(self.patients.list(), text)
    }

    pub fn patient_name(&self, id: u64) -> String {
        query::resolve_name(id, self.patients.list())
    }

    // ── Doctors ─────────────────────────────────────────────

    pub fn doctors(&self) -> &[Doctor] {
        self.doctors.list()
    }

    pub fn find_doctor(&self, id: u64) -> Option<&Doctor> {
        self.doctors.find_by_id(id)
    }

    pub fn add_doctor(&mut self, draft: NewDoctor) -> Result<Doctor, StoreError> {
        self.add(|s| &mut s.doctors, draft)
    }

    pub fn update_doctor(&mut self, id: u64, patch: DoctorPatch) -> Result<Doctor, StoreError> {
        self.update(|s| &mut s.doctors, id, patch)
    }

    /// Remove a doctor together with their appointments and bills.
    pub fn remove_doctor(&mut self, id: u64) -> Result<(), StoreError> {
        self.doctors.remove(id)?;
        let (appointments, bills) = self.cascade(|r| r.doctor_id() == id);
        tracing::info!(id, appointments, bills, "Doctor removed");
        self.commit(Doctor::ENTITY_TYPE, id)
    }

    pub fn search_doctors(&self, text: &str) -> Vec<&Doctor> {
        query::search_doctors(self.doctors.list(), text)
    }

    pub fn doctor_name(&self, id: u64) -> String {
        query::resolve_name(id, self.doctors.list())
    }

    // ── Appointments ────────────────────────────────────────

    pub fn appointments(&self) -> &[Appointment] {
        self.appointments.list()
    }

    pub fn find_appointment(&self, id: u64) -> Option<&Appointment> {
        self.appointments.find_by_id(id)
    }

    pub fn add_appointment(&mut self, draft: NewAppointment) -> Result<Appointment, StoreError> {
        self.add(|s| &mut s.appointments, draft)
    }

    pub fn update_appointment(
        &mut self,
        id: u64,
        patch: AppointmentPatch,
    ) -> Result<Appointment, StoreError> {
        self.update(|s| &mut s.appointments, id, patch)
    }

    pub fn remove_appointment(&mut self, id: u64) -> Result<(), StoreError> {
        self.appointments.remove(id)?;
        tracing::info!(id, "Appointment removed");
        self.commit(Appointment::ENTITY_TYPE, id)
    }

    pub fn search_appointments(&self, text: &str) -> Vec<&Appointment> {
        query::search_linked(
            self.appointments.list(),
            self.patients.list(),
            self.doctors.list(),
            text,
        )
    }

    pub fn upcoming_appointments(&self, today: NaiveDate) -> Vec<&Appointment> {
        query::upcoming_appointments(self.appointments.list(), today)
    }

    // ── Bills ───────────────────────────────────────────────

    pub fn bills(&self) -> &[Bill] {
        self.bills.list()
    }

    pub fn find_bill(&self, id: u64) -> Option<&Bill> {
        self.bills.find_by_id(id)
    }

    pub fn add_bill(&mut self, draft: NewBill) -> Result<Bill, StoreError> {
        self.add(|s| &mut s.bills, draft)
    }

    pub fn update_bill(&mut self, id: u64, patch: BillPatch) -> Result<Bill, StoreError> {
        self.update(|s| &mut s.bills, id, patch)
    }

    pub fn remove_bill(&mut self, id: u64) -> Result<(), StoreError> {
        self.bills.remove(id)?;
        tracing::info!(id, "Bill removed");
        self.commit(Bill::ENTITY_TYPE, id)
    }

    pub fn search_bills(&self, text: &str) -> Vec<&Bill> {
        query::search_linked(
            self.bills.list(),
            self.patients.list(),
            self.doctors.list(),
            text,
        )
    }

    // ── Reports ─────────────────────────────────────────────

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            patients: self.patients.len(),
            doctors: self.doctors.len(),
            appointments: self.appointments.len(),
            bills: self.bills.len(),
            outstanding_amount: self
                .bills
                .list()
                .iter()
                .filter(|b| b.status == BillStatus::Unpaid)
                .map(|b| b.amount)
                .sum(),
        }
    }

    pub fn export_patients(&self) -> Result<String, StoreError> {
        export::export_patients(self.patients.list())
    }

    pub fn export_doctors(&self) -> Result<String, StoreError> {
        export::export_doctors(self.doctors.list())
    }

    pub fn export_appointments(&self) -> Result<String, StoreError> {
        export::export_appointments(
            self.appointments.list(),
            self.patients.list(),
            self.doctors.list(),
        )
    }

    pub fn export_bills(&self) -> Result<String, StoreError> {
        export::export_bills(self.bills.list(), self.patients.list(), self.doctors.list())
    }
}
