use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::BillStatus;
use super::{require_id, CareLink, Record};
use crate::config;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: u64,
    pub patient_id: u64,
    pub doctor_id: u64,
    pub amount: f64,
    pub status: BillStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewBill {
    pub patient_id: Option<u64>,
    pub doctor_id: Option<u64>,
    pub amount: f64,
    pub status: BillStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct BillPatch {
    pub patient_id: Option<u64>,
    pub doctor_id: Option<u64>,
    pub amount: Option<f64>,
    pub status: Option<BillStatus>,
    pub date: Option<NaiveDate>,
}

fn require_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::InvalidAmount {
            entity_type: Bill::ENTITY_TYPE,
            field: "amount",
        })
    }
}

impl Record for Bill {
    const ENTITY_TYPE: &'static str = "Bill";
    const STORAGE_KEY: &'static str = config::BILLS_KEY;

    type Draft = NewBill;
    type Patch = BillPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(id: u64, draft: NewBill) -> Result<Self, ValidationError> {
        let patient_id = require_id(draft.patient_id, Self::ENTITY_TYPE, "patientId")?;
        let doctor_id = require_id(draft.doctor_id, Self::ENTITY_TYPE, "doctorId")?;
        let amount = require_amount(draft.amount)?;
        Ok(Self {
            id,
            patient_id,
            doctor_id,
            amount,
            status: draft.status,
            date: draft.date,
        })
    }

    fn apply(&mut self, patch: BillPatch) -> Result<(), ValidationError> {
        if let Some(id) = patch.patient_id {
            require_id(Some(id), Self::ENTITY_TYPE, "patientId")?;
        }
        if let Some(id) = patch.doctor_id {
            require_id(Some(id), Self::ENTITY_TYPE, "doctorId")?;
        }
        if let Some(amount) = patch.amount {
            require_amount(amount)?;
        }

        if let Some(id) = patch.patient_id {
            self.patient_id = id;
        }
        if let Some(id) = patch.doctor_id {
            self.doctor_id = id;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        Ok(())
    }
}

impl CareLink for Bill {
    fn patient_id(&self) -> u64 {
        self.patient_id
    }

    fn doctor_id(&self) -> u64 {
        self.doctor_id
    }
}
