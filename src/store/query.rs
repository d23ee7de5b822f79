//! Read-side lookups: case-insensitive search and cross-entity name
//! resolution. Results always keep the input order.

use chrono::NaiveDate;

use crate::models::{Appointment, AppointmentStatus, CareLink, Doctor, Named, Patient, Record};

/// Shown wherever a referenced patient or doctor no longer exists.
pub const UNKNOWN_NAME: &str = "Unknown";

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Patients whose name contains `text`.
pub fn search_patients<'a>(patients: &'a [Patient], text: &str) -> Vec<&'a Patient> {
    let needle = text.to_lowercase();
    patients
        .iter()
        .filter(|p| contains_folded(&p.name, &needle))
        .collect()
}

/// Doctors whose name or specialization contains `text`.
pub fn search_doctors<'a>(doctors: &'a [Doctor], text: &str) -> Vec<&'a Doctor> {
    let needle = text.to_lowercase();
    doctors
        .iter()
        .filter(|d| contains_folded(&d.name, &needle) || contains_folded(&d.specialization, &needle))
        .collect()
}

/// Appointments or bills whose patient or doctor name contains `text`.
///
/// A dangling reference contributes an empty name, so it only matches the
/// empty query.
pub fn search_linked<'a, T: CareLink>(
    records: &'a [T],
    patients: &[Patient],
    doctors: &[Doctor],
    text: &str,
) -> Vec<&'a T> {
    let needle = text.to_lowercase();
    records
        .iter()
        .filter(|r| {
            let patient = find_name(r.patient_id(), patients).unwrap_or_default();
            let doctor = find_name(r.doctor_id(), doctors).unwrap_or_default();
            contains_folded(patient, &needle) || contains_folded(doctor, &needle)
        })
        .collect()
}

fn find_name<T: Record + Named>(id: u64, records: &[T]) -> Option<&str> {
    records.iter().find(|r| r.id() == id).map(Named::name)
}

/// Name of the record with `id`, or `"Unknown"`.
pub fn resolve_name<T: Record + Named>(id: u64, records: &[T]) -> String {
    find_name(id, records).unwrap_or(UNKNOWN_NAME).to_string()
}

/// Scheduled appointments on or after `today`, soonest first.
pub fn upcoming_appointments(appointments: &[Appointment], today: NaiveDate) -> Vec<&Appointment> {
    let mut upcoming: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Scheduled && a.date >= today)
        .collect();
    upcoming.sort_by_key(|a| (a.date, a.time));
    upcoming
}
