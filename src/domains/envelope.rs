use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque token linking an outgoing request to its incoming response.
///
/// The bridge never inspects or tracks it; uniqueness is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Value);

impl CorrelationId {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<i32> for CorrelationId {
    fn from(value: i32) -> Self {
        Self(Value::from(value))
    }
}

impl From<i64> for CorrelationId {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<u64> for CorrelationId {
    fn from(value: u64) -> Self {
        Self(Value::from(value))
    }
}

impl From<&str> for CorrelationId {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

impl From<String> for CorrelationId {
    fn from(value: String) -> Self {
        Self(Value::from(value))
    }
}

/// Request emitted by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingEnvelope {
    pub id: CorrelationId,
    pub msg: Value,
}

impl OutgoingEnvelope {
    pub fn new(id: impl Into<CorrelationId>, msg: Value) -> Self {
        Self { id: id.into(), msg }
    }

    /// Shallow copy of `msg` with its `id` field overwritten by the
    /// correlation id. Non-object payloads contribute no fields.
    pub fn provider_request(&self) -> Value {
        let mut request = match &self.msg {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };
        request.insert("id".to_string(), self.id.as_value().clone());
        Value::Object(request)
    }
}

/// Response delivered back to the application. `msg` holds either the
/// provider's response or its error value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingEnvelope {
    pub id: CorrelationId,
    pub msg: Value,
}

impl IncomingEnvelope {
    pub fn new(id: CorrelationId, msg: Value) -> Self {
        Self { id, msg }
    }
}
