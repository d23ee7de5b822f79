pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use db::{KeyValueStore, PersistenceError, SqliteKvStore};
pub use error::{StoreError, ValidationError};
pub use store::HospitalStore;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins; otherwise
/// `level` (when given) or the default filter applies.
pub fn init_tracing(level: Option<&str>) {
    let fallback = level
        .map(|l| format!("{}={l}", config::APP_NAME))
        .unwrap_or_else(config::default_log_filter);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} v{} logging initialised", config::APP_NAME, config::APP_VERSION);
}
