pub mod appointment;
pub mod bill;
pub mod doctor;
pub mod enums;
pub mod patient;

pub use appointment::*;
pub use bill::*;
pub use doctor::*;
pub use enums::*;
pub use patient::*;

use std::fmt::Display;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

/// An entity kept in one of the store's collections.
///
/// `Draft` carries the fields supplied on create, `Patch` the fields
/// supplied on edit (absent fields are left alone).
pub trait Record: Clone + Serialize + DeserializeOwned {
    const ENTITY_TYPE: &'static str;
    const STORAGE_KEY: &'static str;

    type Draft;
    type Patch;

    fn id(&self) -> u64;

    fn from_draft(id: u64, draft: Self::Draft) -> Result<Self, ValidationError>;

    /// Merge `patch` into `self`. Validation runs before any field is
    /// touched, so an error leaves the record unchanged.
    fn apply(&mut self, patch: Self::Patch) -> Result<(), ValidationError>;
}

/// Records that carry a display name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Records that point at a patient and a doctor.
pub trait CareLink {
    fn patient_id(&self) -> u64;
    fn doctor_id(&self) -> u64;
}

pub(crate) fn require_text(
    value: &str,
    entity_type: &'static str,
    field: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(entity_type, field));
    }
    Ok(())
}

/// Foreign keys from the view arrive unset as `None` or `0`.
pub(crate) fn require_id(
    value: Option<u64>,
    entity_type: &'static str,
    field: &'static str,
) -> Result<u64, ValidationError> {
    match value {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::missing(entity_type, field)),
    }
}

/// Reads an optional enum stored as a string; a blank string means unset.
pub(crate) fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// `HH:MM` wall-clock time; `HH:MM:SS` is accepted on read.
pub(crate) mod hhmm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    /// Drop seconds and fractions; times are kept at minute precision.
    pub fn to_minute(time: NaiveTime) -> NaiveTime {
        NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map(to_minute)
            .map_err(serde::de::Error::custom)
    }
}
