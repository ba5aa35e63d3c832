//! Execution configuration

use serde::{Deserialize, Serialize};
use sqlplan_core::{Error, Result};
use std::collections::HashMap;

/// Settings key for the batch size
pub const BATCH_SIZE_KEY: &str = "batch.size";

/// Default number of rows per record batch
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Configuration handed to the execution layer along with a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Rows per record batch
    pub batch_size: usize,

    /// Other settings, passed through untouched
    pub settings: HashMap<String, String>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            settings: HashMap::new(),
        }
    }
}

impl ExecutionConfig {
    /// Create a new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from string settings.
    ///
    /// `batch.size` must be a positive integer; every other key is kept as is.
    pub fn from_settings<I, K, V>(settings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in settings {
            let (key, value) = (key.into(), value.into());
            if key == BATCH_SIZE_KEY {
                config.batch_size = parse_batch_size(&value)?;
            } else {
                config.settings.insert(key, value);
            }
        }
        Ok(config)
    }

    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Configuration(e.to_string()))?;
        if config.batch_size == 0 {
            return Err(Error::Configuration(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Builder: set batch size
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builder: add a pass-through setting
    pub fn setting(mut self, key: &str, value: &str) -> Self {
        self.settings.insert(key.to_string(), value.to_string());
        self
    }

    /// Look up a pass-through setting
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}

fn parse_batch_size(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(Error::Configuration(format!(
            "{} must be a positive integer, got '{}'",
            BATCH_SIZE_KEY, value
        ))),
    }
}
