use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::ProviderConfig;
use crate::error::{BridgeError, Result};
use crate::interfaces::provider::{ProviderFailure, ProviderOutcome, WalletProvider};

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;

// 2xx bodies are relayed whole, including a JSON-RPC `error` member.
#[derive(Clone)]
pub struct HttpProvider {
    url: String,
    client: reqwest::Client,
}

impl HttpProvider {
    pub fn new(url: String) -> Result<Self> {
        Self::from_config(&ProviderConfig {
            url,
            connect_timeout_secs: None,
            request_timeout_secs: None,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let connect_timeout = config
            .connect_timeout_secs
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
        let mut builder =
            reqwest::Client::builder().connect_timeout(Duration::from_secs(connect_timeout));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BridgeError::Http(e.to_string()))?;
        Ok(Self {
            url: config.url.clone(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, request: &Value) -> Result<ProviderOutcome> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e: reqwest::Error| BridgeError::Http(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(Err(ProviderFailure::new(json!({
                "code": status.as_u16(),
                "message": format!("provider returned HTTP {status}"),
                "data": body,
            }))));
        }
        let body = response
            .json::<Value>()
            .await
            .map_err(|e: reqwest::Error| BridgeError::Serialization(e.to_string()))?;
        Ok(Ok(body))
    }
}

#[async_trait]
impl WalletProvider for HttpProvider {
    async fn send_async(&self, request: Value) -> ProviderOutcome {
        match self.post(&request).await {
            Ok(outcome) => outcome,
            Err(err) => Err(err.into()),
        }
    }
}
