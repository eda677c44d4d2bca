//! Typed calling side of the registry.
//!
//! A [`Client`] speaks to any [`Transport`]: an in-process [`Dispatcher`]
//! or a [`JsonTransport`] wrapping whatever moves JSON bodies (HTTP, IPC).

use serde_json::Value;

use crate::codec::wire::{decode_reply, encode_request, RpcReply, RpcRequest};
use crate::error::RpcError;
use crate::model::{AdminOverrides, CmsAdmin};
use crate::rpc::dispatch::{AdminBackend, Dispatcher};
use crate::rpc::query::{InvokeQuery, LoginQuery};
use crate::rpc::registry::{GetCmsAdminData, Invoke, Login, RpcMethod};
use crate::validate::Validate;

/// Carries one request to a dispatcher and brings back its reply.
pub trait Transport {
    fn send(&self, request: &RpcRequest) -> Result<RpcReply, RpcError>;
}

impl<B: AdminBackend> Transport for Dispatcher<B> {
    fn send(&self, request: &RpcRequest) -> Result<RpcReply, RpcError> {
        Ok(self.handle(request))
    }
}

/// Transport over a function exchanging JSON bodies.
pub struct JsonTransport<F> {
    exchange: F,
}

impl<F> JsonTransport<F>
where
    F: Fn(&str) -> Result<String, RpcError>,
{
    pub fn new(exchange: F) -> Self {
        Self { exchange }
    }
}

impl<F> Transport for JsonTransport<F>
where
    F: Fn(&str) -> Result<String, RpcError>,
{
    fn send(&self, request: &RpcRequest) -> Result<RpcReply, RpcError> {
        let body = encode_request(request)?;
        let reply = (self.exchange)(&body)?;
        decode_reply(&reply)
    }
}

/// Typed RPC client holding the session token.
#[derive(Debug)]
pub struct Client<T> {
    transport: T,
    token: Option<String>,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Calls `M`, checking the query before sending and the response after.
    pub fn call<M: RpcMethod>(&self, query: &M::Query) -> Result<M::Response, RpcError> {
        let method = M::METHOD.as_str();
        query
            .validate()
            .map_err(|reason| RpcError::InvalidQuery { method, reason })?;
        let query = serde_json::to_value(query).map_err(|e| RpcError::InvalidQuery {
            method,
            reason: e.to_string(),
        })?;

        let mut request = RpcRequest::new(method, query);
        if M::METHOD.requires_session() {
            if let Some(token) = &self.token {
                request = request.with_token(token.clone());
            }
        }

        let data = self.transport.send(&request)?.into_result()?;
        let response: M::Response =
            serde_json::from_value(data).map_err(|e| RpcError::InvalidResponse {
                method,
                reason: e.to_string(),
            })?;
        response
            .validate()
            .map_err(|reason| RpcError::InvalidResponse { method, reason })?;
        Ok(response)
    }

    /// Logs in and keeps the issued token for later calls.
    pub fn login(
        &mut self,
        account: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), RpcError> {
        let result = self.call::<Login>(&LoginQuery {
            account: account.into(),
            password: password.into(),
        })?;
        log::info!("logged in");
        self.token = Some(result.token);
        Ok(())
    }

    /// Forgets the session token.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// Untyped call outside the registry.
    pub fn invoke(&self, method: impl Into<String>, arg: Value) -> Result<Value, RpcError> {
        self.call::<Invoke>(&InvokeQuery {
            method: method.into(),
            arg,
        })
    }

    /// Fetches the server's overrides and merges them over `local`.
    pub fn admin_config(&self, mut local: CmsAdmin) -> Result<CmsAdmin, RpcError> {
        let overrides: AdminOverrides = self.call::<GetCmsAdminData>(&Value::Null)?;
        local.apply(overrides);
        Ok(local)
    }
}
