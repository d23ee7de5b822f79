//! CSV export. Every cell is quoted, whether or not it needs to be, and rows
//! are joined with `\n` without a trailing newline.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::StoreError;
use crate::models::{Appointment, Bill, Doctor, Patient};

use super::query::resolve_name;

pub const PATIENT_HEADER: [&str; 7] = ["ID", "Name", "Age", "Gender", "Contact", "Blood Group", "Address"];
pub const DOCTOR_HEADER: [&str; 5] = ["ID", "Name", "Specialization", "Contact", "Email"];
pub const APPOINTMENT_HEADER: [&str; 7] = ["ID", "Patient", "Doctor", "Date", "Time", "Status", "Notes"];
pub const BILL_HEADER: [&str; 6] = ["ID", "Patient", "Doctor", "Amount", "Status", "Date"];

/// Render rows as always-quoted CSV. A row with no cells renders as an
/// empty line.
pub fn to_csv<R, C>(rows: R) -> Result<String, StoreError>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    let lines = rows
        .into_iter()
        .map(render_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

fn render_row<I, C>(row: I) -> Result<String, StoreError>
where
    I: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    let cells: Vec<C> = row.into_iter().collect();
    if cells.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(&cells)
        .map_err(|e| StoreError::Export(e.to_string()))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Export(e.to_string()))?;
    let mut line = String::from_utf8(bytes).map_err(|e| StoreError::Export(e.to_string()))?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

fn with_header(header: &[&str], body: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(body.len() + 1);
    rows.push(header.iter().map(|h| h.to_string()).collect());
    rows.extend(body);
    rows
}

pub fn export_patients(patients: &[Patient]) -> Result<String, StoreError> {
    let body = patients
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.age.to_string(),
                p.gender.to_string(),
                p.contact.clone(),
                p.blood.map(|b| b.to_string()).unwrap_or_default(),
                p.address.clone().unwrap_or_default(),
            ]
        })
        .collect();
    to_csv(with_header(&PATIENT_HEADER, body))
}

pub fn export_doctors(doctors: &[Doctor]) -> Result<String, StoreError> {
    let body = doctors
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.name.clone(),
                d.specialization.clone(),
                d.contact.clone(),
                d.email.clone(),
            ]
        })
        .collect();
    to_csv(with_header(&DOCTOR_HEADER, body))
}

pub fn export_appointments(
    appointments: &[Appointment],
    patients: &[Patient],
    doctors: &[Doctor],
) -> Result<String, StoreError> {
    let body = appointments
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                resolve_name(a.patient_id, patients),
                resolve_name(a.doctor_id, doctors),
                a.date.to_string(),
                a.time.format("%H:%M").to_string(),
                a.status.to_string(),
                a.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    to_csv(with_header(&APPOINTMENT_HEADER, body))
}

pub fn export_bills(
    bills: &[Bill],
    patients: &[Patient],
    doctors: &[Doctor],
) -> Result<String, StoreError> {
    let body = bills
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                resolve_name(b.patient_id, patients),
                resolve_name(b.doctor_id, doctors),
                b.amount.to_string(),
                b.status.to_string(),
                b.date.to_string(),
            ]
        })
        .collect();
    to_csv(with_header(&BILL_HEADER, body))
}

/// Write `csv` to `dir/file_name`, creating `dir` if needed.
pub fn write_export(dir: &Path, file_name: &str, csv: &str) -> Result<PathBuf, StoreError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| StoreError::Export(format!("Cannot create exports dir: {e}")))?;

    let path = dir.join(file_name);
    std::fs::write(&path, csv)
        .map_err(|e| StoreError::Export(format!("Cannot write {file_name}: {e}")))?;

    tracing::info!(path = %path.display(), "CSV exported");
    Ok(path)
}
