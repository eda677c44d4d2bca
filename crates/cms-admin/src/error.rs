//! Error types for the tag codec, console configuration and RPC layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse error classes shared by both sides of the transport.
///
/// The kind is what crosses the wire; the detailed error stays local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Query (or response) does not match the method's declared shape.
    StructuralValidation,
    /// Addressed model, record, inspector or config does not exist.
    NotFound,
    /// Concurrent mutation rejected by the backend.
    Conflict,
    /// Missing or invalid session, or insufficient permission.
    Auth,
    /// A string carries the tag prefix but does not decode.
    MalformedTag,
    /// Network or framing failure outside the contract.
    Transport,
    /// Backend failure or a response that breaks the contract.
    Internal,
}

impl ErrorKind {
    /// Returns the stable wire code (e.g., "not_found").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::StructuralValidation => "structural_validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Auth => "auth",
            ErrorKind::MalformedTag => "malformed_tag",
            ErrorKind::Transport => "transport",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Error while encoding a biz tag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{field} is not a finite number: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("tag serialization failed: {0}")]
    Serialize(String),
}

/// Error while decoding a string that carries the tag prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed tag payload: {reason}")]
    Malformed { reason: String },

    #[error("tag payload is not a JSON object")]
    NotAnObject,

    #[error("tag payload has no \"type\" discriminant")]
    MissingDiscriminant,

    #[error("unknown tag type: {kind:?}")]
    UnknownKind { kind: String },

    #[error("unsupported tag version {version} (newest known is {supported})")]
    UnsupportedVersion { version: u64, supported: u64 },
}

/// Error while loading or validating the console configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("invalid config JSON: {0}")]
    Json(String),

    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("duplicate {kind} name {name:?}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("inspector {inspector:?} has duplicate panel id {panel:?}")]
    DuplicatePanel { inspector: String, panel: String },

    #[error("panel {panel:?} of inspector {inspector:?} has span {span} (expected 1..=24)")]
    SpanOutOfRange {
        inspector: String,
        panel: String,
        span: u8,
    },

    #[error("panel {panel:?} of inspector {inspector:?} has an empty {field}")]
    EmptyAxis {
        inspector: String,
        panel: String,
        field: &'static str,
    },

    #[error("model {model:?} declares action {action:?} twice")]
    DuplicateAction { model: String, action: String },

    #[error("menu entry key must not be empty")]
    EmptyMenuKey,

    #[error("linkModel tag targets unknown model {target:?}")]
    UnknownLinkTarget { target: String },

    #[error("preset tag has an empty option list")]
    EmptyPreset,

    #[error("assets tag aspect ratio must be positive and finite, got {aspect}")]
    InvalidAspect { aspect: f64 },
}

/// Error returned by any RPC call, on either side of the transport.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RpcError {
    #[error("unknown method {method:?}")]
    UnknownMethod { method: String },

    #[error("invalid query for {method}: {reason}")]
    InvalidQuery { method: &'static str, reason: String },

    #[error("{entity} {key:?} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("conflicting write to {model} #{id}: {reason}")]
    Conflict { model: String, id: i64, reason: String },

    #[error("unauthenticated: {reason}")]
    Unauthenticated { reason: String },

    #[error("permission denied: {reason}")]
    PermissionDenied { reason: String },

    #[error(transparent)]
    MalformedTag(#[from] DecodeError),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("invalid response for {method}: {reason}")]
    InvalidResponse { method: &'static str, reason: String },

    #[error("backend failure: {0}")]
    Backend(String),

    #[error("[{}] {message}", .kind.code())]
    Remote { kind: ErrorKind, message: String },
}

impl RpcError {
    /// Shorthand for a [`RpcError::NotFound`].
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        RpcError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Returns the error class for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RpcError::UnknownMethod { .. } | RpcError::InvalidQuery { .. } => {
                ErrorKind::StructuralValidation
            }
            RpcError::NotFound { .. } => ErrorKind::NotFound,
            RpcError::Conflict { .. } => ErrorKind::Conflict,
            RpcError::Unauthenticated { .. } | RpcError::PermissionDenied { .. } => ErrorKind::Auth,
            RpcError::MalformedTag(_) => ErrorKind::MalformedTag,
            RpcError::Transport(_) => ErrorKind::Transport,
            RpcError::InvalidResponse { .. } | RpcError::Backend(_) => ErrorKind::Internal,
            RpcError::Remote { kind, .. } => *kind,
        }
    }
}
