use crate::error::StoreError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the serialized form.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = StoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(StoreError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

str_enum!(BloodGroup {
    OPositive => "O+",
    ONegative => "O-",
    APositive => "A+",
    ANegative => "A-",
    BPositive => "B+",
    BNegative => "B-",
    AbPositive => "AB+",
    AbNegative => "AB-",
});

str_enum!(AppointmentStatus {
    Scheduled => "Scheduled",
    Completed => "Completed",
    Cancelled => "Cancelled",
});

str_enum!(BillStatus {
    Paid => "Paid",
    Unpaid => "Unpaid",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn blood_group_uses_display_symbols() {
        assert_eq!(BloodGroup::AbNegative.as_str(), "AB-");
        assert_eq!(BloodGroup::from_str("O+").unwrap(), BloodGroup::OPositive);
        assert_eq!(
            serde_json::to_string(&BloodGroup::BPositive).unwrap(),
            "\"B+\""
        );
    }

    #[test]
    fn unknown_value_is_invalid_enum() {
        let err = Gender::from_str("male").unwrap_err();
        assert!(matches!(err, StoreError::InvalidEnum { ref field, ref value }
            if field == "Gender" && value == "male"));
    }
}
