pub mod client;
pub mod config;
pub mod domains;
pub mod error;
pub mod interfaces;
pub mod providers;
pub mod services;

pub use crate::client::WalletBridge;
pub use crate::config::BridgeConfig;
pub use crate::domains::envelope::{CorrelationId, IncomingEnvelope, OutgoingEnvelope};
pub use crate::error::{BridgeError, Result};
pub use crate::interfaces::provider::{ProviderFailure, ProviderOutcome, WalletProvider};
pub use crate::services::bridge::{Bridge, Diagnostic};
