use tokio::sync::mpsc;

use crate::domains::envelope::{IncomingEnvelope, OutgoingEnvelope};
use crate::error::{BridgeError, Result};

pub struct AppPort {
    outgoing: Option<mpsc::Sender<OutgoingEnvelope>>,
    incoming: mpsc::Receiver<IncomingEnvelope>,
}

pub struct BridgePort {
    pub outgoing: mpsc::Receiver<OutgoingEnvelope>,
    pub incoming: mpsc::Sender<IncomingEnvelope>,
}

pub fn duplex(capacity: usize) -> (AppPort, BridgePort) {
    let (outgoing_tx, outgoing_rx) = mpsc::channel(capacity);
    let (incoming_tx, incoming_rx) = mpsc::channel(capacity);
    (
        AppPort {
            outgoing: Some(outgoing_tx),
            incoming: incoming_rx,
        },
        BridgePort {
            outgoing: outgoing_rx,
            incoming: incoming_tx,
        },
    )
}

impl AppPort {
    pub async fn send(&self, envelope: OutgoingEnvelope) -> Result<()> {
        let Some(outgoing) = &self.outgoing else {
            return Err(BridgeError::Channel("outgoing port closed".to_string()));
        };
        outgoing
            .send(envelope)
            .await
            .map_err(|_| BridgeError::Channel("bridge is not receiving".to_string()))
    }

    pub async fn recv(&mut self) -> Option<IncomingEnvelope> {
        self.incoming.recv().await
    }

    pub fn try_recv(&mut self) -> Option<IncomingEnvelope> {
        self.incoming.try_recv().ok()
    }

    pub fn close(&mut self) {
        self.outgoing = None;
    }

    pub fn is_closed(&self) -> bool {
        self.outgoing.is_none()
    }
}
