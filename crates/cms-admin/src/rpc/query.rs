//! Query and response shapes of the registry methods.
//!
//! Records shared with the rest of the model (pagination, model records,
//! global config records) live in [`crate::model::record`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{GlobalConfigRecord, PageParams};
use crate::validate::{non_empty, Validate};

/// `login` query. Both fields are required.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginQuery {
    pub account: String,
    pub password: String,
}

impl fmt::Debug for LoginQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginQuery")
            .field("account", &self.account)
            .field("password", &"***")
            .finish()
    }
}

impl Validate for LoginQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("account", &self.account)?;
        non_empty("password", &self.password)
    }
}

/// `login` response.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
}

impl fmt::Debug for LoginResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResult").field("token", &"***").finish()
    }
}

impl Validate for LoginResult {
    fn validate(&self) -> Result<(), String> {
        non_empty("token", &self.token)
    }
}

/// Query of methods that take no arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyQuery {}

impl Validate for EmptyQuery {}

/// `listModel` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListModelQuery {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Passed to the backend untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeMap<String, Value>>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl ListModelQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search: None,
            filter: None,
            page: PageParams::default(),
        }
    }
}

impl Validate for ListModelQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("name", &self.name)?;
        if self.page.page_size == 0 {
            return Err("pageSize must be at least 1".to_string());
        }
        if self.page.page_num == 0 {
            return Err("pageNum is 1-based".to_string());
        }
        Ok(())
    }
}

/// Addresses one record: `getModel` and `deleteModel`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    pub name: String,
    pub id: i64,
}

impl Validate for RecordQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("name", &self.name)
    }
}

/// `createModel` query. `data` follows the model's edit schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateModelQuery {
    pub name: String,
    pub data: Value,
}

impl Validate for CreateModelQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("name", &self.name)
    }
}

/// `updateModel` query. `data` follows the model's edit schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateModelQuery {
    pub name: String,
    pub id: i64,
    pub data: Value,
}

impl Validate for UpdateModelQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("name", &self.name)
    }
}

/// `invokeModel` query: run a custom action on one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeModelQuery {
    pub name: String,
    pub id: i64,
    pub action: ActionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCall {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_param: Option<Value>,
}

impl Validate for InvokeModelQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("name", &self.name)?;
        non_empty("action.name", &self.action.name)
    }
}

/// `getInspectorData` query: inspector name and panel id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorQuery {
    pub name: String,
    pub id: String,
}

impl Validate for InspectorQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("name", &self.name)?;
        non_empty("id", &self.id)
    }
}

/// `getGlobalConfig` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfigQuery {
    pub name: String,
}

impl Validate for GlobalConfigQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("name", &self.name)
    }
}

/// `updateGlobalConfig` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateGlobalConfigQuery {
    pub name: String,
    pub data: GlobalConfigRecord,
}

impl Validate for UpdateGlobalConfigQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("name", &self.name)?;
        // One record per config name.
        if self.data.name != self.name {
            return Err(format!(
                "data.name must equal name ({:?} != {:?})",
                self.data.name, self.name
            ));
        }
        Ok(())
    }
}

/// `getUploadURL` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadQuery {
    pub path: String,
    pub mime: String,
}

impl Validate for UploadQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("path", &self.path)?;
        match self.mime.split_once('/') {
            Some((kind, sub)) if !kind.is_empty() && !sub.is_empty() => Ok(()),
            _ => Err(format!("mime {:?} is not of the form type/subtype", self.mime)),
        }
    }
}

/// `invoke` query: an untyped call outside the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeQuery {
    pub method: String,
    #[serde(default)]
    pub arg: Value,
}

impl Validate for InvokeQuery {
    fn validate(&self) -> Result<(), String> {
        non_empty("method", &self.method)
    }
}
