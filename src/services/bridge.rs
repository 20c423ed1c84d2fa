use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domains::envelope::{CorrelationId, IncomingEnvelope, OutgoingEnvelope};
use crate::error::BridgeError;
use crate::interfaces::provider::{ProviderFailure, WalletProvider};

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    CapabilityUnavailable,
    ProviderError { id: CorrelationId, error: Value },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::CapabilityUnavailable => {
                f.write_str("wallet provider unavailable: no async send capability detected")
            }
            Diagnostic::ProviderError { id, error } => {
                write!(f, "wallet provider error for request {id}: {error}")
            }
        }
    }
}

pub struct Bridge {
    provider: Option<Arc<dyn WalletProvider>>,
    incoming: mpsc::Sender<IncomingEnvelope>,
    diagnostics: broadcast::Sender<Diagnostic>,
    unavailable_noticed: AtomicBool,
}

impl Bridge {
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        incoming: mpsc::Sender<IncomingEnvelope>,
        diagnostics: broadcast::Sender<Diagnostic>,
    ) -> Self {
        Self {
            provider,
            incoming,
            diagnostics,
            unavailable_noticed: AtomicBool::new(false),
        }
    }

    fn available_provider(&self) -> Option<Arc<dyn WalletProvider>> {
        self.provider
            .as_ref()
            .filter(|provider| provider.is_available())
            .cloned()
    }

    fn notice_unavailable(&self) {
        if self.unavailable_noticed.swap(true, Ordering::SeqCst) {
            return;
        }
        let notice = Diagnostic::CapabilityUnavailable;
        warn!("{notice}");
        let _ = self.diagnostics.send(notice);
    }

    pub fn handle_outgoing(&self, envelope: OutgoingEnvelope) -> Option<JoinHandle<()>> {
        let Some(provider) = self.available_provider() else {
            self.notice_unavailable();
            return None;
        };

        let request = envelope.provider_request();
        let id = envelope.id;
        let incoming = self.incoming.clone();
        let diagnostics = self.diagnostics.clone();
        debug!(%id, "forwarding request to wallet provider");

        Some(tokio::spawn(async move {
            let call = tokio::spawn(async move { provider.send_async(request).await });
            let outcome = match call.await {
                Ok(outcome) => outcome,
                Err(err) => Err(ProviderFailure::from(BridgeError::Runtime(format!(
                    "wallet provider call aborted: {err}"
                )))),
            };
            let msg = match outcome {
                Ok(response) => response,
                Err(failure) => {
                    let error = failure.into_value();
                    let diagnostic = Diagnostic::ProviderError {
                        id: id.clone(),
                        error: error.clone(),
                    };
                    warn!("{diagnostic}");
                    let _ = diagnostics.send(diagnostic);
                    error
                }
            };
            debug!(%id, "delivering provider response");
            if incoming.send(IncomingEnvelope::new(id, msg)).await.is_err() {
                debug!("application port dropped; response discarded");
            }
        }))
    }

    // In-flight requests outlive the loop.
    pub async fn run(self, mut outgoing: mpsc::Receiver<OutgoingEnvelope>) {
        while let Some(envelope) = outgoing.recv().await {
            let _ = self.handle_outgoing(envelope);
        }
        debug!("outgoing port closed; bridge stopped accepting requests");
    }

    pub fn spawn(self, outgoing: mpsc::Receiver<OutgoingEnvelope>) -> JoinHandle<()> {
        tokio::spawn(self.run(outgoing))
    }
}
