#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::{oneshot, Mutex};

use wallet_bridge::interfaces::provider::{ProviderFailure, ProviderOutcome, WalletProvider};

/// Answers every request with the same outcome and records what it saw.
pub struct StaticProvider {
    outcome: ProviderOutcome,
    pub requests: Mutex<Vec<Value>>,
}

impl StaticProvider {
    pub fn succeeding(response: Value) -> Self {
        Self {
            outcome: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: Value) -> Self {
        Self {
            outcome: Err(ProviderFailure::new(error)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn seen(&self) -> Vec<Value> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl WalletProvider for StaticProvider {
    async fn send_async(&self, request: Value) -> ProviderOutcome {
        self.requests.lock().await.push(request);
        self.outcome.clone()
    }
}

pub struct EchoProvider;

#[async_trait]
impl WalletProvider for EchoProvider {
    async fn send_async(&self, request: Value) -> ProviderOutcome {
        Ok(json!({"echo": request}))
    }
}

/// Holds each request until the test releases the gate for its id.
#[derive(Default)]
pub struct GatedProvider {
    gates: Mutex<HashMap<u64, oneshot::Receiver<ProviderOutcome>>>,
}

impl GatedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn gate(&self, id: u64) -> oneshot::Sender<ProviderOutcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.insert(id, rx);
        tx
    }
}

#[async_trait]
impl WalletProvider for GatedProvider {
    async fn send_async(&self, request: Value) -> ProviderOutcome {
        let id = request["id"].as_u64().unwrap_or_default();
        let gate = self.gates.lock().await.remove(&id);
        match gate {
            Some(rx) => match rx.await {
                Ok(outcome) => outcome,
                Err(_) => std::future::pending().await,
            },
            None => Err(ProviderFailure::new(json!({"message": "no gate"}))),
        }
    }
}

/// Present but without a usable send capability.
pub struct UnavailableProvider;

#[async_trait]
impl WalletProvider for UnavailableProvider {
    fn is_available(&self) -> bool {
        false
    }

    async fn send_async(&self, _request: Value) -> ProviderOutcome {
        panic!("send_async called on an unavailable provider");
    }
}

/// Never completes.
pub struct SilentProvider;

#[async_trait]
impl WalletProvider for SilentProvider {
    async fn send_async(&self, _request: Value) -> ProviderOutcome {
        std::future::pending().await
    }
}

pub struct PanickingProvider;

#[async_trait]
impl WalletProvider for PanickingProvider {
    async fn send_async(&self, _request: Value) -> ProviderOutcome {
        panic!("provider blew up");
    }
}
