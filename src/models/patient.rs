use serde::{Deserialize, Serialize};

use super::enums::{BloodGroup, Gender};
use super::{blank_as_none, require_text, Named, Record};
use crate::config;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub blood: Option<BloodGroup>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Fields supplied when registering a patient.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    pub blood: Option<BloodGroup>,
    pub address: Option<String>,
}

/// Partial edit. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub contact: Option<String>,
    pub blood: Option<Option<BloodGroup>>,
    pub address: Option<Option<String>>,
}

impl Record for Patient {
    const ENTITY_TYPE: &'static str = "Patient";
    const STORAGE_KEY: &'static str = config::PATIENTS_KEY;

    type Draft = NewPatient;
    type Patch = PatientPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: NewPatient) -> Result<Self, ValidationError> {
        require_text(&draft.name, Self::ENTITY_TYPE, "name")?;
        require_text(&draft.contact, Self::ENTITY_TYPE, "contact")?;
        Ok(Self {
            id,
            name: draft.name,
            age: draft.age,
            gender: draft.gender,
            contact: draft.contact,
            blood: draft.blood,
            address: draft.address,
        })
    }

    fn apply(&mut self, patch: PatientPatch) -> Result<(), ValidationError> {
        if let Some(name) = &patch.name {
            require_text(name, Self::ENTITY_TYPE, "name")?;
        }
        if let Some(contact) = &patch.contact {
            require_text(contact, Self::ENTITY_TYPE, "contact")?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
        if let Some(blood) = patch.blood {
            self.blood = blood;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        Ok(())
    }
}

impl Named for Patient {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_patient() -> Patient {
        Patient::from_draft(
            1,
            NewPatient {
                name: "John Doe".into(),
                age: 45,
                gender: Gender::Male,
                contact: "123-456-7890".into(),
                blood: Some(BloodGroup::OPositive),
                address: Some("123 Main St".into()),
            },
        )
        .unwrap()
    }

    #[test]
    fn serializes_with_id_first() {
        let json = serde_json::to_string(&make_patient()).unwrap();
        assert!(json.starts_with("{\"id\":1,\"name\":\"John Doe\""));
        assert!(json.contains("\"blood\":\"O+\""));
    }

    #[test]
    fn blank_blood_reads_as_none() {
        let json = r#"{"id":4,"name":"A","age":3,"gender":"Other","contact":"x","blood":"","address":""}"#;
        let p: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(p.blood, None);
        assert_eq!(p.address.as_deref(), Some(""));
    }

    #[test]
    fn missing_optionals_read_as_none() {
        let json = r#"{"id":4,"name":"A","age":3,"gender":"Female","contact":"x"}"#;
        let p: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(p.blood, None);
        assert_eq!(p.address, None);
    }

    #[test]
    fn blank_name_rejected() {
        let err = Patient::from_draft(
            1,
            NewPatient {
                name: "  ".into(),
                age: 1,
                gender: Gender::Female,
                contact: "x".into(),
                blood: None,
                address: None,
            },
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::missing("Patient", "name"));
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let mut p = make_patient();
        p.apply(PatientPatch {
            age: Some(46),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(p.age, 46);
        assert_eq!(p.name, "John Doe");
        assert_eq!(p.blood, Some(BloodGroup::OPositive));
    }

    #[test]
    fn patch_clears_optional_field() {
        let mut p = make_patient();
        p.apply(PatientPatch {
            address: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(p.address, None);
    }

    #[test]
    fn invalid_patch_changes_nothing() {
        let mut p = make_patient();
        let err = p.apply(PatientPatch {
            age: Some(50),
            contact: Some(String::new()),
            ..Default::default()
        });
        assert!(err.is_err());
        assert_eq!(p, make_patient());
    }
}
