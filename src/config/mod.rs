//! Engine configuration
//!
//! Loaded once from a JSON file (or defaulted) and passed to the engine by
//! reference. Every field is optional in the file.

mod errors;

pub use errors::{ConfigError, ConfigResult};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};

/// Tunables for search execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Records per page when importing the full listing
    #[serde(default = "default_import_batch_size")]
    pub import_batch_size: usize,

    /// Page size applied when a filtered search has no paging request
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_import_batch_size() -> usize {
    100
}

fn default_page_size() -> usize {
    20
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            import_batch_size: default_import_batch_size(),
            default_page_size: default_page_size(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&content)?;

        let shown = path.display().to_string();
        let batch = config.import_batch_size.to_string();
        let page = config.default_page_size.to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("path", shown.as_str()),
                ("import_batch_size", batch.as_str()),
                ("default_page_size", page.as_str()),
            ],
        );

        Ok(config)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the import batch size
    pub fn with_import_batch_size(mut self, size: usize) -> Self {
        self.import_batch_size = size;
        self
    }

    /// Sets the default page size
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.import_batch_size == 0 {
            return Err(ConfigError::Invalid("import_batch_size must be > 0".into()));
        }
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid("default_page_size must be > 0".into()));
        }
        Ok(())
    }
}
