use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::BridgeError;

/// Error value reported by a provider. Relayed to the application verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFailure(pub Value);

impl ProviderFailure {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

// -32603 is the JSON-RPC "internal error" code.
impl From<BridgeError> for ProviderFailure {
    fn from(err: BridgeError) -> Self {
        Self(json!({
            "code": -32603,
            "message": err.to_string(),
        }))
    }
}

pub type ProviderOutcome = std::result::Result<Value, ProviderFailure>;

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether the async send capability is reachable right now.
    fn is_available(&self) -> bool {
        true
    }

    /// Resolves exactly once with the provider's response or its error value.
    async fn send_async(&self, request: Value) -> ProviderOutcome;
}
