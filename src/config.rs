use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BridgeError, Result};

pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = 16;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub url: String,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BridgeConfig {
    pub provider: Option<ProviderConfig>,
    pub channel_capacity: Option<usize>,
    pub diagnostics_capacity: Option<usize>,
}

impl BridgeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| BridgeError::Config(e.to_string()))?;
        let config: BridgeConfig =
            serde_json::from_str(&content).map_err(|e| BridgeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == Some(0) {
            return Err(BridgeError::Config(
                "channel_capacity must be greater than zero".to_string(),
            ));
        }
        if self.diagnostics_capacity == Some(0) {
            return Err(BridgeError::Config(
                "diagnostics_capacity must be greater than zero".to_string(),
            ));
        }
        if let Some(provider) = &self.provider {
            if provider.url.trim().is_empty() {
                return Err(BridgeError::Config("provider url is empty".to_string()));
            }
        }
        Ok(())
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn diagnostics_capacity(&self) -> usize {
        self.diagnostics_capacity
            .unwrap_or(DEFAULT_DIAGNOSTICS_CAPACITY)
    }

    pub fn with_provider_url(mut self, url: String) -> Self {
        match &mut self.provider {
            Some(provider) => provider.url = url,
            None => {
                self.provider = Some(ProviderConfig {
                    url,
                    connect_timeout_secs: None,
                    request_timeout_secs: None,
                })
            }
        }
        self
    }
}
