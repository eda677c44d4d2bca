//! The RPC contract between the console and its backend.
//!
//! - [`registry`]: the closed set of methods and their shapes
//! - [`query`]: query and response types
//! - [`dispatch`]: server side, routing requests to an [`AdminBackend`]
//! - [`client`]: typed calling side over any [`Transport`]

pub mod client;
pub mod dispatch;
pub mod query;
pub mod registry;

#[cfg(test)]
pub(crate) mod fixture;

pub use client::{Client, JsonTransport, Transport};
pub use dispatch::{
    decode_query, encode_response, AdminBackend, DispatchOptions, Dispatcher, Session,
};
pub use query::{
    ActionCall, CreateModelQuery, EmptyQuery, GlobalConfigQuery, InspectorQuery,
    InvokeModelQuery, InvokeQuery, ListModelQuery, LoginQuery, LoginResult, RecordQuery,
    UpdateGlobalConfigQuery, UpdateModelQuery, UploadQuery,
};
pub use registry::{lookup, ContractEntry, Method, RpcMethod, ENTRIES};
