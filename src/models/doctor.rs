use serde::{Deserialize, Serialize};

use super::{require_text, Named, Record};
use crate::config;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u64,
    pub name: String,
    pub specialization: String,
    pub contact: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub contact: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorPatch {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
}

impl Record for Doctor {
    const ENTITY_TYPE: &'static str = "Doctor";
    const STORAGE_KEY: &'static str = config::DOCTORS_KEY;

    type Draft = NewDoctor;
    type Patch = DoctorPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: NewDoctor) -> Result<Self, ValidationError> {
        require_text(&draft.name, Self::ENTITY_TYPE, "name")?;
        require_text(&draft.specialization, Self::ENTITY_TYPE, "specialization")?;
        Ok(Self {
            id,
            name: draft.name,
            specialization: draft.specialization,
            contact: draft.contact,
            email: draft.email,
        })
    }

    fn apply(&mut self, patch: DoctorPatch) -> Result<(), ValidationError> {
        if let Some(name) = &patch.name {
            require_text(name, Self::ENTITY_TYPE, "name")?;
        }
        if let Some(specialization) = &patch.specialization {
            require_text(specialization, Self::ENTITY_TYPE, "specialization")?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(specialization) = patch.specialization {
            self.specialization = specialization;
        }
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        Ok(())
    }
}

impl Named for Doctor {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_specialization_rejected() {
        let err = Doctor::from_draft(
            1,
            NewDoctor {
                name: "Dr. Who".into(),
                specialization: "".into(),
                contact: "".into(),
                email: "".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::missing("Doctor", "specialization"));
    }

    #[test]
    fn json_field_names() {
        let d = Doctor {
            id: 2,
            name: "Dr. Michael Brown".into(),
            specialization: "Neurology".into(),
            contact: "555-333-4444".into(),
            email: "michael.brown@hospital.com".into(),
        };
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(
            json,
            r#"{"id":2,"name":"Dr. Michael Brown","specialization":"Neurology","contact":"555-333-4444","email":"michael.brown@hospital.com"}"#
        );
    }
}
