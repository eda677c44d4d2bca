//! Administrable models and their list/edit page descriptors.
//!
//! Page descriptors are configuration for the renderer; the only rule this
//! crate applies to them is the create/edit schema fallback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{SchemaObject, SchemaString};

/// An entity type exposed to the console.
///
/// `name` is the routing key of every RPC that targets the model and must
/// stay stable once records reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminModel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_create: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_delete: Option<bool>,

    pub page: ModelPage,
}

/// Lifecycle phase of the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditPhase {
    Create,
    Edit,
}

impl AdminModel {
    /// Creates a model with an empty list page and no edit page.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            can_create: None,
            can_edit: None,
            can_delete: None,
            page: ModelPage::default(),
        }
    }

    /// Whether the console may create records. Absent means no.
    pub fn can_create(&self) -> bool {
        self.can_create.unwrap_or(false)
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit.unwrap_or(false)
    }

    pub fn can_delete(&self) -> bool {
        self.can_delete.unwrap_or(false)
    }

    /// Title shown in menus, falling back to the name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Schema used by the edit form in `phase`, if the model is editable.
    pub fn edit_schema(&self, phase: EditPhase) -> Option<&SchemaObject> {
        self.page.edit.as_ref().map(|edit| edit.schema_for(phase))
    }

    /// Looks up a declared list action by name.
    pub fn action(&self, name: &str) -> Option<&ListAction> {
        self.page.list.actions.iter().find(|a| a.name == name)
    }
}

/// List view plus optional edit view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelPage {
    pub list: ListPage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<EditPage>,
}

/// Table view of a model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_updated_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<SchemaHolder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<Scroll>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ListColumn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expandable: Vec<ExpandableColumn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ListAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_export: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchBox {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Wrapper used wherever the console expects `{ schema }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaHolder {
    pub schema: SchemaObject,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scroll {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<u32>,
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListColumn {
    pub data_index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_translate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorter: Option<bool>,
    #[serde(flatten)]
    pub style: ColumnStyle,
    /// Styles applied when a named condition holds for the row.
    #[serde(
        rename = "$conditions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub conditions: Option<BTreeMap<String, ColumnStyle>>,
}

impl ListColumn {
    pub fn new(data_index: impl Into<String>) -> Self {
        Self {
            data_index: data_index.into(),
            title: None,
            width: None,
            formatter: None,
            disable_translate: None,
            sorter: None,
            style: ColumnStyle::default(),
            conditions: None,
        }
    }
}

/// Typography and display style of a column cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typo: Option<Typo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<CellDisplay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Typo {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<TypoTone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strong: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypoTone {
    Secondary,
    Success,
    Warning,
    Danger,
}

/// Special cell rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CellDisplay {
    Image,
    Timestamp,
}

/// Extra row content shown when a row is expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandableColumn {
    pub data_index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
}

/// A custom per-record action, invoked through `invokeModel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAction {
    pub name: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ActionConfirm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_param: Option<SchemaHolder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionConfirm {
    pub text: String,
}

/// Edit form of a model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditPage {
    pub schema: SchemaObject,
    /// Overrides `schema` while creating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_schema: Option<SchemaObject>,
    /// Overrides `schema` while editing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_schema: Option<SchemaObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_create: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_edit: Option<BatchEdit>,
}

impl EditPage {
    /// Returns the phase-specific schema, falling back to `schema`.
    pub fn schema_for(&self, phase: EditPhase) -> &SchemaObject {
        let specific = match phase {
            EditPhase::Create => self.create_schema.as_ref(),
            EditPhase::Edit => self.edit_schema.as_ref(),
        };
        specific.unwrap_or(&self.schema)
    }
}

/// Batch edit keyed by one id column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEdit {
    pub id_key: String,
    pub id_schema: SchemaString,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(title: &str) -> SchemaObject {
        SchemaObject::from_value(json!({"type": "object", "title": title})).unwrap()
    }

    #[test]
    fn test_schema_fallback() {
        let mut edit = EditPage {
            schema: schema("base"),
            ..Default::default()
        };
        assert_eq!(edit.schema_for(EditPhase::Create), &schema("base"));
        assert_eq!(edit.schema_for(EditPhase::Edit), &schema("base"));

        edit.create_schema = Some(schema("create"));
        assert_eq!(edit.schema_for(EditPhase::Create), &schema("create"));
        assert_eq!(edit.schema_for(EditPhase::Edit), &schema("base"));

        edit.edit_schema = Some(schema("edit"));
        assert_eq!(edit.schema_for(EditPhase::Edit), &schema("edit"));
    }

    #[test]
    fn test_model_without_edit_page() {
        let model = AdminModel::new("Post");
        assert!(model.edit_schema(EditPhase::Create).is_none());
        assert!(!model.can_create());
        assert_eq!(model.display_title(), "Post");
    }

    #[test]
    fn test_deserialize_full_model() {
        let model: AdminModel = serde_json::from_value(json!({
            "name": "Post",
            "title": "Posts",
            "canCreate": true,
            "canDelete": false,
            "page": {
                "list": {
                    "search": {"placeholder": "title"},
                    "columns": [
                        {
                            "dataIndex": "title",
                            "sorter": true,
                            "typo": {"type": "danger", "strong": true}
                        },
                        {"dataIndex": "cover", "display": {"type": "image"},
                         "$conditions": {"hidden": {"typo": {"type": "secondary"}}}}
                    ],
                    "actions": [
                        {"name": "publish", "text": "Publish", "confirm": {"text": "Sure?"}}
                    ]
                },
                "edit": {
                    "schema": {"type": "object"},
                    "batchEdit": {"idKey": "id", "idSchema": {"type": "string"}}
                }
            }
        }))
        .unwrap();

        assert!(model.can_create());
        assert!(!model.can_edit());
        assert_eq!(model.page.list.columns.len(), 2);
        assert_eq!(
            model.page.list.columns[0].style.typo.as_ref().unwrap().tone,
            Some(TypoTone::Danger)
        );
        assert_eq!(model.page.list.columns[1].style.display, Some(CellDisplay::Image));
        assert!(model.page.list.columns[1].conditions.as_ref().unwrap().contains_key("hidden"));
        assert_eq!(model.action("publish").unwrap().text, "Publish");
        assert!(model.action("archive").is_none());
        assert_eq!(model.page.edit.unwrap().batch_edit.unwrap().id_key, "id");
    }
}
