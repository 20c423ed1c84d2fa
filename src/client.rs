use std::path::Path;
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::BridgeConfig;
use crate::domains::envelope::{IncomingEnvelope, OutgoingEnvelope};
use crate::error::{BridgeError, Result};
use crate::interfaces::provider::WalletProvider;
use crate::providers::http::HttpProvider;
use crate::services::bridge::{Bridge, Diagnostic};
use crate::services::ports::{duplex, AppPort};

pub struct WalletBridge {
    port: AppPort,
    diagnostics: broadcast::Sender<Diagnostic>,
    task: Option<JoinHandle<()>>,
}

impl WalletBridge {
    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        config.validate()?;
        let provider = match &config.provider {
            Some(provider) => {
                Some(Arc::new(HttpProvider::from_config(provider)?) as Arc<dyn WalletProvider>)
            }
            None => None,
        };
        Ok(Self::with_provider(provider, config))
    }

    pub fn from_config_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = BridgeConfig::from_file(path)?;
        Self::from_config(&config)
    }

    pub fn with_provider(
        provider: Option<Arc<dyn WalletProvider>>,
        config: &BridgeConfig,
    ) -> Self {
        let (port, bridge_port) = duplex(config.channel_capacity());
        let (diagnostics, _) = broadcast::channel(config.diagnostics_capacity());
        let bridge = Bridge::new(provider, bridge_port.incoming, diagnostics.clone());
        let task = bridge.spawn(bridge_port.outgoing);
        Self {
            port,
            diagnostics,
            task: Some(task),
        }
    }

    pub async fn send(&self, envelope: OutgoingEnvelope) -> Result<()> {
        self.port.send(envelope).await
    }

    pub async fn recv(&mut self) -> Option<IncomingEnvelope> {
        self.port.recv().await
    }

    pub fn subscribe_diagnostics(&self) -> broadcast::Receiver<Diagnostic> {
        self.diagnostics.subscribe()
    }

    pub fn close(&mut self) {
        self.port.close();
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.close();
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|e| BridgeError::Runtime(e.to_string()))?;
        }
        Ok(())
    }
}
