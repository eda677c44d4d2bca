//! Top-level console configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{AdminModel, Inspector, SchemaObject};

/// Everything the console needs to render itself for one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsAdmin {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub rpc: RpcEndpoint,

    pub models: Vec<AdminModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_configs: Vec<GlobalConfigDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inspectors: Vec<Inspector>,

    /// UI string translations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_map: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_layout: Option<Vec<MenuLayout>>,
}

/// Where the console sends RPC calls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RpcEndpoint {
    #[serde(rename = "baseURL")]
    pub base_url: String,
}

/// A singleton-per-name key/value config editable from the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfigDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub schema: SchemaObject,
}

/// Sidebar menu entry. `key` names a model, inspector or config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLayout {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MenuKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuKind {
    Group,
}

/// Server-provided subset of [`CmsAdmin`], answered by `getCMSAdminData`.
///
/// Present fields replace the local ones; absent fields keep them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc: Option<RpcEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<AdminModel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_configs: Option<Vec<GlobalConfigDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspectors: Option<Vec<Inspector>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_map: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_layout: Option<Vec<MenuLayout>>,
}

impl CmsAdmin {
    /// Creates an empty console config.
    pub fn new(title: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            copyright: None,
            logo: None,
            rpc: RpcEndpoint {
                base_url: base_url.into(),
            },
            models: Vec::new(),
            global_configs: Vec::new(),
            inspectors: Vec::new(),
            locale_map: None,
            menu_layout: None,
        }
    }

    /// Parses a config from JSON text. Does not validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Reads and parses a JSON config file. Does not validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    pub fn model(&self, name: &str) -> Option<&AdminModel> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn inspector(&self, name: &str) -> Option<&Inspector> {
        self.inspectors.iter().find(|i| i.name == name)
    }

    pub fn global_config(&self, name: &str) -> Option<&GlobalConfigDef> {
        self.global_configs.iter().find(|g| g.name == name)
    }

    /// Overlays server-provided fields on this config.
    pub fn apply(&mut self, overrides: AdminOverrides) {
        let AdminOverrides {
            title,
            copyright,
            logo,
            rpc,
            models,
            global_configs,
            inspectors,
            locale_map,
            menu_layout,
        } = overrides;

        if let Some(title) = title {
            self.title = title;
        }
        if copyright.is_some() {
            self.copyright = copyright;
        }
        if logo.is_some() {
            self.logo = logo;
        }
        if let Some(rpc) = rpc {
            self.rpc = rpc;
        }
        if let Some(models) = models {
            self.models = models;
        }
        if let Some(global_configs) = global_configs {
            self.global_configs = global_configs;
        }
        if let Some(inspectors) = inspectors {
            self.inspectors = inspectors;
        }
        if locale_map.is_some() {
            self.locale_map = locale_map;
        }
        if menu_layout.is_some() {
            self.menu_layout = menu_layout;
        }
    }

    /// Everything except the RPC endpoint, as served to the console.
    pub fn to_overrides(&self) -> AdminOverrides {
        AdminOverrides {
            title: Some(self.title.clone()),
            copyright: self.copyright.clone(),
            logo: self.logo.clone(),
            rpc: None,
            models: Some(self.models.clone()),
            global_configs: Some(self.global_configs.clone()),
            inspectors: Some(self.inspectors.clone()),
            locale_map: self.locale_map.clone(),
            menu_layout: self.menu_layout.clone(),
        }
    }
}
