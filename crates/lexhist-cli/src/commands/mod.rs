//! Command implementations and the wiring they share

pub mod diff;
pub mod history;
pub mod version;

use clap::Args;
use lexhist_cache::{CacheConfig, SharedCacheConfig};
use lexhist_core::logging_facility::{init, Profile};
use lexhist_engine::LawVersionService;
use lexhist_store::SqliteLawSource;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
pub type Service = LawVersionService<SqliteLawSource>;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// SQLite database holding the law history
    #[arg(long, env = "LEXHIST_DB", default_value = "lexhist.db", global = true)]
    pub db: PathBuf,

    /// Shared cache URL, e.g. redis://cache:6379 (L1-only when unset)
    #[arg(long, env = "LEXHIST_REDIS_URL", hide_env_values = true, global = true)]
    pub redis_url: Option<String>,

    /// Shared cache connect/read/write timeout
    #[arg(long, env = "LEXHIST_REDIS_TIMEOUT_MS", default_value_t = 250, global = true)]
    pub redis_timeout_ms: u64,

    /// Logging profile written to stderr: dev, prod or test (silent when unset)
    #[arg(long, env = "LEXHIST_LOG", global = true)]
    pub log: Option<Profile>,
}

impl GlobalArgs {
    pub fn cache_config(&self) -> CacheConfig {
        let config = CacheConfig::default();
        match &self.redis_url {
            Some(url) => config.with_shared(
                SharedCacheConfig::new(url.clone())
                    .with_timeout(Duration::from_millis(self.redis_timeout_ms)),
            ),
            None => config,
        }
    }
}

pub fn init_logging(global: &GlobalArgs) {
    if let Some(profile) = global.log {
        init(profile);
    }
}

/// # Errors
///
/// Fails when the database cannot be opened.
pub fn open_service(global: &GlobalArgs) -> Result<Service, Box<dyn std::error::Error>> {
    let source = SqliteLawSource::open_read_only(&global.db)?;
    Ok(LawVersionService::new(source, global.cache_config()))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
