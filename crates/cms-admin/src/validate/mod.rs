//! Validation for the admin console contract.
//!
//! Two layers live here:
//! - Structural checks on RPC queries and responses ([`Validate`]), run after
//!   serde has accepted the shape and before any business logic.
//! - Consistency checks on a console config ([`validate_admin`],
//!   [`validate_tag`]), and the name index built from a valid config
//!   ([`Catalogue`]).

use std::collections::HashSet;

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::error::ConfigError;
use crate::model::{
    AdminModel, AdminOverrides, BizTag, Chart, CmsAdmin, GlobalConfigDef, GlobalConfigRecord,
    Inspector, InspectorData, InspectorPanel, MenuLayout, ModelRecord, Pagination, UploadUrl,
    UserInfo, MAX_PANEL_SPAN,
};

/// Structural checks beyond what the serde shape enforces.
pub trait Validate {
    /// Returns a human-readable reason on failure.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

impl Validate for Value {}
impl Validate for UserInfo {}
impl Validate for ModelRecord {}
impl Validate for GlobalConfigRecord {}
impl Validate for InspectorData {}
impl Validate for AdminOverrides {}

impl Validate for UploadUrl {
    fn validate(&self) -> Result<(), String> {
        non_empty("uploadURL", &self.upload_url)?;
        non_empty("distURL", &self.dist_url)
    }
}

impl<T: Validate> Validate for Pagination<T> {
    fn validate(&self) -> Result<(), String> {
        self.check()?;
        self.list.iter().try_for_each(Validate::validate)
    }
}

/// Fails when `value` is empty.
pub fn non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

/// Validates a console config.
///
/// Checks:
/// - model, inspector and global config names are non-empty and unique
/// - panel ids are unique per inspector, spans are within the grid,
///   axis fields are non-empty
/// - action names are unique per model
/// - menu keys are non-empty
pub fn validate_admin(admin: &CmsAdmin) -> Result<(), ConfigError> {
    unique_names("model", admin.models.iter().map(|m| m.name.as_str()))?;
    unique_names("inspector", admin.inspectors.iter().map(|i| i.name.as_str()))?;
    unique_names(
        "global config",
        admin.global_configs.iter().map(|g| g.name.as_str()),
    )?;

    for model in &admin.models {
        validate_model(model)?;
    }
    for inspector in &admin.inspectors {
        validate_inspector(inspector)?;
    }
    if let Some(menu) = &admin.menu_layout {
        validate_menu(menu)?;
    }
    Ok(())
}

fn unique_names<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(ConfigError::EmptyName { kind });
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_model(model: &AdminModel) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for action in &model.page.list.actions {
        if action.name.is_empty() {
            return Err(ConfigError::EmptyName { kind: "action" });
        }
        if !seen.insert(action.name.as_str()) {
            return Err(ConfigError::DuplicateAction {
                model: model.name.clone(),
                action: action.name.clone(),
            });
        }
    }
    Ok(())
}

fn validate_inspector(inspector: &Inspector) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for panel in &inspector.panels {
        if panel.id.is_empty() {
            return Err(ConfigError::EmptyName { kind: "panel" });
        }
        if !seen.insert(panel.id.as_str()) {
            return Err(ConfigError::DuplicatePanel {
                inspector: inspector.name.clone(),
                panel: panel.id.clone(),
            });
        }
        validate_panel(inspector, panel)?;
    }
    Ok(())
}

fn validate_panel(inspector: &Inspector, panel: &InspectorPanel) -> Result<(), ConfigError> {
    let span = panel.span();
    if span == 0 || span > MAX_PANEL_SPAN {
        return Err(ConfigError::SpanOutOfRange {
            inspector: inspector.name.clone(),
            panel: panel.id.clone(),
            span,
        });
    }
    if let Chart::Line { x_field, y_field, .. } | Chart::Column { x_field, y_field } = &panel.chart
    {
        for (field, value) in [("xField", x_field), ("yField", y_field)] {
            if value.is_empty() {
                return Err(ConfigError::EmptyAxis {
                    inspector: inspector.name.clone(),
                    panel: panel.id.clone(),
                    field,
                });
            }
        }
    }
    Ok(())
}

fn validate_menu(entries: &[MenuLayout]) -> Result<(), ConfigError> {
    for entry in entries {
        if entry.key.is_empty() {
            return Err(ConfigError::EmptyMenuKey);
        }
        validate_menu(&entry.children)?;
    }
    Ok(())
}

/// Validates a tag against the config it will be used in.
///
/// Checks that `linkModel` targets a declared model, `preset` has options
/// and image aspect ratios are positive and finite.
pub fn validate_tag(tag: &BizTag, admin: &CmsAdmin) -> Result<(), ConfigError> {
    match tag {
        BizTag::LinkModel { target_name, .. } => {
            if admin.model(target_name).is_none() {
                return Err(ConfigError::UnknownLinkTarget {
                    target: target_name.clone(),
                });
            }
        }
        BizTag::Preset { list } if list.is_empty() => return Err(ConfigError::EmptyPreset),
        BizTag::Assets {
            image: Some(hint), ..
        } => {
            if let Some(aspect) = hint.aspect {
                if !(aspect.is_finite() && aspect > 0.0) {
                    return Err(ConfigError::InvalidAspect { aspect });
                }
            }
        }
        _ => {}
    }
    Ok(())
}

/// A validated console config, indexed by name.
///
/// This is what the dispatcher consults to answer "does this model /
/// inspector / config exist" without scanning lists.
#[derive(Debug, Clone)]
pub struct Catalogue {
    admin: CmsAdmin,
    models: FxHashMap<String, usize>,
    inspectors: FxHashMap<String, usize>,
    global_configs: FxHashMap<String, usize>,
}

impl Catalogue {
    /// Validates `admin` and builds the index.
    pub fn new(admin: CmsAdmin) -> Result<Self, ConfigError> {
        validate_admin(&admin)?;

        let index = |names: Vec<&str>| -> FxHashMap<String, usize> {
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| (name.to_string(), i))
                .collect()
        };
        let models = index(admin.models.iter().map(|m| m.name.as_str()).collect());
        let inspectors = index(admin.inspectors.iter().map(|i| i.name.as_str()).collect());
        let global_configs = index(admin.global_configs.iter().map(|g| g.name.as_str()).collect());

        Ok(Self {
            admin,
            models,
            inspectors,
            global_configs,
        })
    }

    /// The underlying config.
    pub fn admin(&self) -> &CmsAdmin {
        &self.admin
    }

    pub fn model(&self, name: &str) -> Option<&AdminModel> {
        self.models.get(name).map(|&i| &self.admin.models[i])
    }

    pub fn inspector(&self, name: &str) -> Option<&Inspector> {
        self.inspectors.get(name).map(|&i| &self.admin.inspectors[i])
    }

    pub fn global_config(&self, name: &str) -> Option<&GlobalConfigDef> {
        self.global_configs
            .get(name)
            .map(|&i| &self.admin.global_configs[i])
    }
}
