//! Persistent configuration adapter.
//!
//! Implements [`ConfigPort`] by storing [`MonitorConfig`] as a postcard
//! blob.  The backing store here is an in-memory slot standing in for the
//! flash key-value partition; the blob format is the same either way.
//!
//! - Validation runs on save **and** on load, so a corrupted or
//!   hand-edited blob can never reach the classifiers.
//! - A missing blob is not an error: first boot loads defaults.

use core::cell::RefCell;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::MonitorConfig;

/// Upper bound on the stored blob; the config encodes to well under this.
const MAX_BLOB_SIZE: usize = 256;

#[derive(Debug, Default)]
pub struct ConfigStore {
    blob: RefCell<Option<Vec<u8>>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        info!("ConfigStore: simulation backend");
        Self::default()
    }

    /// Seed the store with raw bytes (e.g. read back from flash).
    pub fn with_blob(bytes: &[u8]) -> Self {
        Self {
            blob: RefCell::new(Some(bytes.to_vec())),
        }
    }

    /// Copy of the stored bytes, if any.
    pub fn blob(&self) -> Option<Vec<u8>> {
        self.blob.borrow().clone()
    }

    /// Drop the stored config; the next load returns defaults.
    pub fn erase(&self) {
        self.blob.replace(None);
    }
}

impl ConfigPort for ConfigStore {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let guard = self.blob.borrow();
        let Some(bytes) = guard.as_deref() else {
            info!("ConfigStore: no stored config, using defaults");
            return Ok(MonitorConfig::default());
        };
        let cfg: MonitorConfig = postcard::from_bytes(bytes).map_err(|_| {
            warn!("ConfigStore: stored config failed to decode");
            ConfigError::Corrupted
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        if bytes.len() > MAX_BLOB_SIZE {
            return Err(ConfigError::IoError);
        }
        self.blob.replace(Some(bytes));
        info!("ConfigStore: config saved");
        Ok(())
    }
}
