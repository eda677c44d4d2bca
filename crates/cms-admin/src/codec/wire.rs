//! JSON envelope carried by a transport.
//!
//! Request: `{"method": "...", "query": {...}, "token": "..."}`.
//! Reply: `{"data": ...}` on success, `{"error": {"kind", "message"}}` on failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, RpcError};

/// One call as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub query: Value,
    /// Session token; required by every method except the public ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, query: Value) -> Self {
        Self {
            method: method.into(),
            query,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Error as reported to the remote side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Answer to one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<WireError>,
}

impl RpcReply {
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: &RpcError) -> Self {
        Self {
            data: None,
            error: Some(WireError {
                kind: error.kind(),
                message: error.to_string(),
            }),
        }
    }

    /// Converts the reply back into a result on the calling side.
    ///
    /// A reply with neither field is a successful `null`.
    pub fn into_result(self) -> Result<Value, RpcError> {
        match self.error {
            Some(WireError { kind, message }) => Err(RpcError::Remote { kind, message }),
            None => Ok(self.data.unwrap_or(Value::Null)),
        }
    }
}

impl From<Result<Value, RpcError>> for RpcReply {
    fn from(result: Result<Value, RpcError>) -> Self {
        match result {
            Ok(data) => RpcReply::ok(data),
            Err(e) => RpcReply::err(&e),
        }
    }
}

/// Serializes a request body.
pub fn encode_request(request: &RpcRequest) -> Result<String, RpcError> {
    serde_json::to_string(request).map_err(|e| RpcError::Transport(e.to_string()))
}

/// Parses a request body. A body that is not a request is a structural error.
pub fn decode_request(body: &str) -> Result<RpcRequest, RpcError> {
    serde_json::from_str(body).map_err(|e| RpcError::InvalidQuery {
        method: "<envelope>",
        reason: e.to_string(),
    })
}

/// Serializes a reply body.
pub fn encode_reply(reply: &RpcReply) -> Result<String, RpcError> {
    serde_json::to_string(reply).map_err(|e| RpcError::Transport(e.to_string()))
}

/// Parses a reply body.
pub fn decode_reply(body: &str) -> Result<RpcReply, RpcError> {
    serde_json::from_str(body).map_err(|e| RpcError::Transport(e.to_string()))
}
