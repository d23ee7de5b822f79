use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;
use super::{hhmm, require_id, CareLink, Record};
use crate::config;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: u64,
    pub patient_id: u64,
    pub doctor_id: u64,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Booking request. Patient and doctor must both be selected; existence of
/// the referenced records is not checked here.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: Option<u64>,
    pub doctor_id: Option<u64>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub patient_id: Option<u64>,
    pub doctor_id: Option<u64>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<Option<String>>,
}

impl Record for Appointment {
    const ENTITY_TYPE: &'static str = "Appointment";
    const STORAGE_KEY: &'static str = config::APPOINTMENTS_KEY;

    type Draft = NewAppointment;
    type Patch = AppointmentPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: NewAppointment) -> Result<Self, ValidationError> {
        let patient_id = require_id(draft.patient_id, Self::ENTITY_TYPE, "patientId")?;
        let doctor_id = require_id(draft.doctor_id, Self::ENTITY_TYPE, "doctorId")?;
        Ok(Self {
            id,
            patient_id,
            doctor_id,
            date: draft.date,
            time: hhmm::to_minute(draft.time),
            status: draft.status,
            notes: draft.notes,
        })
    }

    fn apply(&mut self, patch: AppointmentPatch) -> Result<(), ValidationError> {
        if let Some(id) = patch.patient_id {
            require_id(Some(id), Self::ENTITY_TYPE, "patientId")?;
        }
        if let Some(id) = patch.doctor_id {
            require_id(Some(id), Self::ENTITY_TYPE, "doctorId")?;
        }

        if let Some(id) = patch.patient_id {
            self.patient_id = id;
        }
        if let Some(id) = patch.doctor_id {
            self.doctor_id = id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(time) = patch.time {
            self.time = hhmm::to_minute(time);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        Ok(())
    }
}

impl CareLink for Appointment {
    fn patient_id(&self) -> u64 {
        self.patient_id
    }

    fn doctor_id(&self) -> u64 {
        self.doctor_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(patient_id: Option<u64>, doctor_id: Option<u64>) -> NewAppointment {
        NewAppointment {
            patient_id,
            doctor_id,
            date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            status: AppointmentStatus::Scheduled,
            notes: Some("Regular checkup".into()),
        }
    }

    #[test]
    fn serializes_wire_shape() {
        let appt = Appointment::from_draft(1, draft(Some(1), Some(1))).unwrap();
        let json = serde_json::to_string(&appt).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"patientId":1,"doctorId":1,"date":"2025-10-20","time":"10:00","status":"Scheduled","notes":"Regular checkup"}"#
        );
    }

    #[test]
    fn reads_time_with_seconds() {
        let json = r#"{"id":2,"patientId":2,"doctorId":3,"date":"2025-10-22","time":"14:30:00","status":"Completed"}"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(appt.notes, None);
    }

    #[test]
    fn seconds_are_dropped_on_create_update_and_read() {
        let mut late = draft(Some(1), Some(1));
        late.time = NaiveTime::from_hms_milli_opt(10, 0, 45, 250).unwrap();
        let mut appt = Appointment::from_draft(1, late).unwrap();
        assert_eq!(appt.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        let json = serde_json::to_string(&appt).unwrap();
        assert_eq!(serde_json::from_str::<Appointment>(&json).unwrap(), appt);

        appt.apply(AppointmentPatch {
            time: NaiveTime::from_hms_opt(16, 15, 59),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(appt.time, NaiveTime::from_hms_opt(16, 15, 0).unwrap());

        let stored = r#"{"id":3,"patientId":1,"doctorId":1,"date":"2025-10-22","time":"08:05:30","status":"Scheduled"}"#;
        let read: Appointment = serde_json::from_str(stored).unwrap();
        assert_eq!(read.time, NaiveTime::from_hms_opt(8, 5, 0).unwrap());
    }

    #[test]
    fn missing_patient_rejected() {
        let err = Appointment::from_draft(1, draft(None, Some(1))).unwrap_err();
        assert_eq!(err, ValidationError::missing("Appointment", "patientId"));
    }

    #[test]
    fn zero_doctor_rejected() {
        let err = Appointment::from_draft(1, draft(Some(1), Some(0))).unwrap_err();
        assert_eq!(err, ValidationError::missing("Appointment", "doctorId"));
    }

    #[test]
    fn patch_cannot_unset_foreign_key() {
        let mut appt = Appointment::from_draft(1, draft(Some(1), Some(1))).unwrap();
        let before = appt.clone();
        assert!(appt
            .apply(AppointmentPatch {
                doctor_id: Some(0),
                status: Some(AppointmentStatus::Cancelled),
                ..Default::default()
            })
            .is_err());
        assert_eq!(appt, before);
    }
}
