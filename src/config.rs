use std::path::{Path, PathBuf};

/// Application-level constants
pub const APP_NAME: &str = "clinicdesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage keys, one per collection.
pub const PATIENTS_KEY: &str = "patients";
pub const DOCTORS_KEY: &str = "doctors";
pub const APPOINTMENTS_KEY: &str = "appointments";
pub const BILLS_KEY: &str = "bills";

/// Export file names.
pub const PATIENTS_CSV: &str = "patients.csv";
pub const DOCTORS_CSV: &str = "doctors.csv";
pub const APPOINTMENTS_CSV: &str = "appointments.csv";
pub const BILLS_CSV: &str = "bills.csv";

const DATABASE_FILE: &str = "clinicdesk.db";

/// Get the application data directory.
/// Platform data dir (e.g. ~/.local/share/clinicdesk), or `./clinicdesk`
/// when the platform reports none.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Database file inside a data directory.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

/// CSV export directory inside a data directory.
pub fn exports_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("exports")
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "clinicdesk=info".to_string()
}
