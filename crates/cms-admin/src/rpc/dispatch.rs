//! Server-side dispatch of registry calls.
//!
//! The [`Dispatcher`] owns the contract checks; the [`AdminBackend`] owns
//! storage and business rules. A call reaches the backend only after its
//! method resolved, its query decoded and validated, its session was
//! authenticated and the addressed model/inspector/config was found.
//!
//! Concurrent writes to the same record are the backend's concern. Without
//! further checks the contract behaves as last-writer-wins; a backend using
//! optimistic concurrency reports [`RpcError::Conflict`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::wire::{decode_request, encode_reply, RpcReply, RpcRequest};
use crate::error::{ErrorKind, RpcError};
use crate::model::{
    AdminModel, AdminOverrides, GlobalConfigRecord, InspectorData, ModelRecord, PageParams,
    Pagination, UploadUrl, UserInfo,
};
use crate::rpc::query::{
    CreateModelQuery, GlobalConfigQuery, InspectorQuery, InvokeModelQuery, InvokeQuery,
    ListModelQuery, LoginQuery, LoginResult, RecordQuery, UpdateGlobalConfigQuery,
    UpdateModelQuery, UploadQuery,
};
use crate::rpc::registry::{
    self, CreateModel, DeleteModel, GetCmsAdminData, GetGlobalConfig, GetInspectorData, GetModel,
    GetUploadUrl, GetUserInfo, Invoke, InvokeModel, ListModel, Login, Method, RpcMethod,
    UpdateGlobalConfig, UpdateModel,
};
use crate::validate::{Catalogue, Validate};

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserInfo,
}

/// Storage and business logic behind the registry.
///
/// Each method receives a query that already passed structural validation.
pub trait AdminBackend {
    /// Console config overrides. `None` serves the dispatcher's own config.
    fn admin_data(&self, _query: &Value) -> Result<Option<AdminOverrides>, RpcError> {
        Ok(None)
    }

    /// Checks credentials and issues a token.
    fn login(&self, query: LoginQuery) -> Result<LoginResult, RpcError>;

    /// Resolves a token to a session.
    fn authenticate(&self, token: &str) -> Result<Session, RpcError>;

    fn user_info(&self, session: &Session) -> Result<UserInfo, RpcError> {
        Ok(session.user.clone())
    }

    fn list_model(
        &self,
        session: &Session,
        query: ListModelQuery,
    ) -> Result<Pagination<ModelRecord>, RpcError>;

    /// A missing record must be reported as [`RpcError::NotFound`].
    fn get_model(&self, session: &Session, query: RecordQuery) -> Result<ModelRecord, RpcError>;

    fn create_model(
        &self,
        session: &Session,
        query: CreateModelQuery,
    ) -> Result<ModelRecord, RpcError>;

    fn update_model(&self, session: &Session, query: UpdateModelQuery) -> Result<Value, RpcError>;

    fn delete_model(&self, session: &Session, query: RecordQuery) -> Result<Value, RpcError>;

    /// Runs a custom action; whether the action applies is up to the backend.
    fn invoke_model(&self, session: &Session, query: InvokeModelQuery)
    -> Result<Value, RpcError>;

    fn inspector_data(
        &self,
        session: &Session,
        query: InspectorQuery,
    ) -> Result<InspectorData, RpcError>;

    fn global_config(
        &self,
        session: &Session,
        query: GlobalConfigQuery,
    ) -> Result<GlobalConfigRecord, RpcError>;

    fn update_global_config(
        &self,
        session: &Session,
        query: UpdateGlobalConfigQuery,
    ) -> Result<Value, RpcError>;

    fn upload_url(&self, session: &Session, query: UploadQuery) -> Result<UploadUrl, RpcError>;

    /// Untyped calls. Unsupported by default.
    ///
    /// The query already passed shape checks, so a method the backend does
    /// not serve is [`RpcError::NotFound`], not a structural error.
    fn invoke(&self, _session: &Session, query: InvokeQuery) -> Result<Value, RpcError> {
        Err(RpcError::not_found("method", query.method))
    }
}

/// Dispatcher knobs, usually read from the host's config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DispatchOptions {
    /// Reject calls naming a model, inspector or config the catalogue lacks.
    pub check_catalogue: bool,
    /// Honor `canCreate`/`canEdit`/`canDelete`.
    pub enforce_capabilities: bool,
    /// Largest `pageSize` a listing may ask for.
    pub max_page_size: u32,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            check_catalogue: true,
            enforce_capabilities: true,
            max_page_size: 500,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Capability {
    Create,
    Edit,
    Delete,
}

/// Routes wire requests to an [`AdminBackend`].
#[derive(Debug)]
pub struct Dispatcher<B> {
    catalogue: Catalogue,
    backend: B,
    options: DispatchOptions,
}

impl<B: AdminBackend> Dispatcher<B> {
    pub fn new(catalogue: Catalogue, backend: B) -> Self {
        Self {
            catalogue,
            backend,
            options: DispatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DispatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Handles a raw JSON request body and returns the JSON reply body.
    pub fn handle_json(&self, body: &str) -> String {
        let reply = match decode_request(body) {
            Ok(request) => self.handle(&request),
            Err(e) => {
                log::warn!("rejected request envelope: {e}");
                RpcReply::err(&e)
            }
        };
        encode_reply(&reply).unwrap_or_else(|e| {
            log::error!("failed to encode reply: {e}");
            r#"{"error":{"kind":"internal","message":"failed to encode reply"}}"#.to_string()
        })
    }

    /// Handles one request. Failures are folded into the reply.
    pub fn handle(&self, request: &RpcRequest) -> RpcReply {
        let result = self.dispatch(request);
        match &result {
            Ok(_) => log::debug!("{} ok", request.method),
            Err(e) if e.kind() == ErrorKind::Internal => {
                log::error!("{} failed: {e}", request.method)
            }
            Err(e) => log::warn!("{} rejected: {e}", request.method),
        }
        RpcReply::from(result)
    }

    /// Handles one request, returning the serialized response.
    pub fn dispatch(&self, request: &RpcRequest) -> Result<Value, RpcError> {
        let entry = registry::lookup(&request.method).ok_or_else(|| RpcError::UnknownMethod {
            method: request.method.clone(),
        })?;
        log::debug!("dispatch {}", entry.name);

        let raw = request.query.clone();
        let token = request.token.as_deref();
        let backend = &self.backend;

        match entry.method {
            Method::GetCmsAdminData => self.public::<GetCmsAdminData>(raw, |q| {
                Ok(backend
                    .admin_data(&q)?
                    .unwrap_or_else(|| self.catalogue.admin().to_overrides()))
            }),
            Method::Login => self.public::<Login>(raw, |q| backend.login(q)),
            Method::GetUserInfo => {
                self.private::<GetUserInfo>(raw, token, |s, _| backend.user_info(s))
            }
            Method::ListModel => self.private::<ListModel>(raw, token, |s, q| {
                self.model(&q.name)?;
                if q.page.page_size > self.options.max_page_size {
                    return Err(RpcError::InvalidQuery {
                        method: Method::ListModel.as_str(),
                        reason: format!(
                            "pageSize {} exceeds {}",
                            q.page.page_size, self.options.max_page_size
                        ),
                    });
                }
                let requested = q.page;
                let page = backend.list_model(s, q)?;
                check_page(requested, &page)?;
                Ok(page)
            }),
            Method::GetModel => self.private::<GetModel>(raw, token, |s, q| {
                self.model(&q.name)?;
                backend.get_model(s, q)
            }),
            Method::CreateModel => self.private::<CreateModel>(raw, token, |s, q| {
                self.allow(&q.name, Capability::Create)?;
                backend.create_model(s, q)
            }),
            Method::UpdateModel => self.private::<UpdateModel>(raw, token, |s, q| {
                self.allow(&q.name, Capability::Edit)?;
                backend.update_model(s, q)
            }),
            Method::DeleteModel => self.private::<DeleteModel>(raw, token, |s, q| {
                self.allow(&q.name, Capability::Delete)?;
                backend.delete_model(s, q)
            }),
            Method::InvokeModel => self.private::<InvokeModel>(raw, token, |s, q| {
                self.model(&q.name)?;
                backend.invoke_model(s, q)
            }),
            Method::GetInspectorData => self.private::<GetInspectorData>(raw, token, |s, q| {
                self.panel(&q.name, &q.id)?;
                backend.inspector_data(s, q)
            }),
            Method::GetGlobalConfig => self.private::<GetGlobalConfig>(raw, token, |s, q| {
                self.global_config(&q.name)?;
                backend.global_config(s, q)
            }),
            Method::UpdateGlobalConfig => self.private::<UpdateGlobalConfig>(raw, token, |s, q| {
                self.global_config(&q.name)?;
                backend.update_global_config(s, q)
            }),
            Method::GetUploadUrl => {
                self.private::<GetUploadUrl>(raw, token, |s, q| backend.upload_url(s, q))
            }
            Method::Invoke => self.private::<Invoke>(raw, token, |s, q| backend.invoke(s, q)),
        }
    }

    fn public<M: RpcMethod>(
        &self,
        raw: Value,
        f: impl FnOnce(M::Query) -> Result<M::Response, RpcError>,
    ) -> Result<Value, RpcError> {
        let query = decode_query::<M>(raw)?;
        encode_response::<M>(f(query)?)
    }

    fn private<M: RpcMethod>(
        &self,
        raw: Value,
        token: Option<&str>,
        f: impl FnOnce(&Session, M::Query) -> Result<M::Response, RpcError>,
    ) -> Result<Value, RpcError> {
        let query = decode_query::<M>(raw)?;
        let session = self.authenticate(token)?;
        encode_response::<M>(f(&session, query)?)
    }

    fn authenticate(&self, token: Option<&str>) -> Result<Session, RpcError> {
        match token {
            Some(token) if !token.is_empty() => self.backend.authenticate(token),
            _ => Err(RpcError::Unauthenticated {
                reason: "missing session token".to_string(),
            }),
        }
    }

    /// Resolves a model, or `None` when catalogue checks are off.
    fn model(&self, name: &str) -> Result<Option<&AdminModel>, RpcError> {
        if !self.options.check_catalogue {
            return Ok(None);
        }
        self.catalogue
            .model(name)
            .map(Some)
            .ok_or_else(|| RpcError::not_found("model", name))
    }

    fn allow(&self, name: &str, capability: Capability) -> Result<(), RpcError> {
        let Some(model) = self.model(name)? else {
            return Ok(());
        };
        if !self.options.enforce_capabilities {
            return Ok(());
        }
        let (allowed, verb) = match capability {
            Capability::Create => (model.can_create(), "create"),
            Capability::Edit => (model.can_edit(), "edit"),
            Capability::Delete => (model.can_delete(), "delete"),
        };
        if allowed {
            Ok(())
        } else {
            Err(RpcError::PermissionDenied {
                reason: format!("model {name:?} does not allow {verb}"),
            })
        }
    }

    fn panel(&self, inspector: &str, panel: &str) -> Result<(), RpcError> {
        if !self.options.check_catalogue {
            return Ok(());
        }
        let found = self
            .catalogue
            .inspector(inspector)
            .ok_or_else(|| RpcError::not_found("inspector", inspector))?;
        found
            .panel(panel)
            .map(|_| ())
            .ok_or_else(|| RpcError::not_found("panel", format!("{inspector}/{panel}")))
    }

    fn global_config(&self, name: &str) -> Result<(), RpcError> {
        if !self.options.check_catalogue {
            return Ok(());
        }
        self.catalogue
            .global_config(name)
            .map(|_| ())
            .ok_or_else(|| RpcError::not_found("global config", name))
    }
}

/// A listing must answer the page it was asked for, no larger.
fn check_page(requested: PageParams, page: &Pagination<ModelRecord>) -> Result<(), RpcError> {
    let method = Method::ListModel.as_str();
    if page.page_size > requested.page_size {
        return Err(RpcError::InvalidResponse {
            method,
            reason: format!(
                "pageSize {} exceeds requested {}",
                page.page_size, requested.page_size
            ),
        });
    }
    if page.page_num != requested.page_num {
        return Err(RpcError::InvalidResponse {
            method,
            reason: format!(
                "pageNum {} differs from requested {}",
                page.page_num, requested.page_num
            ),
        });
    }
    Ok(())
}

/// Decodes and validates a query for `M`. A `null` query reads as `{}`.
pub fn decode_query<M: RpcMethod>(raw: Value) -> Result<M::Query, RpcError> {
    let method = M::METHOD.as_str();
    let raw = match raw {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    let query: M::Query = serde_json::from_value(raw).map_err(|e| RpcError::InvalidQuery {
        method,
        reason: e.to_string(),
    })?;
    query
        .validate()
        .map_err(|reason| RpcError::InvalidQuery { method, reason })?;
    Ok(query)
}

/// Validates and serializes a response for `M`.
pub fn encode_response<M: RpcMethod>(response: M::Response) -> Result<Value, RpcError> {
    let method = M::METHOD.as_str();
    response
        .validate()
        .map_err(|reason| RpcError::InvalidResponse { method, reason })?;
    serde_json::to_value(response).map_err(|e| RpcError::InvalidResponse {
        method,
        reason: e.to_string(),
    })
}
