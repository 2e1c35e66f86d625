//! Application configuration

use clap::Args;

pub use logging::{LogFormat, LoggingConfig};
pub use storage::StorageConfig;

mod logging;
mod storage;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Storage medium settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Load `.env` into the process environment so clap's `env` fallbacks see it.
pub fn load_dotenv() {
    // Missing .env is fine
    _ = dotenvy::dotenv();
}
