//! Builder API for ergonomic console config construction.
//!
//! Provides a fluent interface for declaring models, inspectors and global
//! configs without spelling out every optional field.
//!
//! # Example
//!
//! ```rust
//! use cms_admin::model::builder::AdminBuilder;
//! use cms_admin::model::{Chart, SchemaObject};
//!
//! let admin = AdminBuilder::new("Blog Admin", "https://api.example.com/admin")
//!     .model("Post", |m| m
//!         .title("Posts")
//!         .can_create(true)
//!         .column("title")
//!         .edit(SchemaObject::new())
//!     )
//!     .inspector("traffic", |i| i
//!         .panel("daily", "Daily visits", Chart::Column {
//!             x_field: "day".into(),
//!             y_field: "visits".into(),
//!         })
//!     )
//!     .build();
//!
//! assert!(admin.model("Post").unwrap().can_create());
//! ```

use crate::model::{
    AdminModel, Chart, CmsAdmin, EditPage, GlobalConfigDef, Inspector, InspectorPanel,
    ListAction, ListColumn, SchemaHolder, SchemaObject, SearchBox,
};

/// Builder for a [`CmsAdmin`].
#[derive(Debug, Clone)]
pub struct AdminBuilder {
    admin: CmsAdmin,
}

impl AdminBuilder {
    /// Creates a builder for a console talking to `base_url`.
    pub fn new(title: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            admin: CmsAdmin::new(title, base_url),
        }
    }

    /// Sets the footer copyright line.
    pub fn copyright(mut self, copyright: impl Into<String>) -> Self {
        self.admin.copyright = Some(copyright.into());
        self
    }

    /// Sets the logo URL.
    pub fn logo(mut self, logo: impl Into<String>) -> Self {
        self.admin.logo = Some(logo.into());
        self
    }

    /// Adds a model using a builder function.
    pub fn model<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(ModelBuilder) -> ModelBuilder,
    {
        let builder = f(ModelBuilder::new(name));
        self.admin.models.push(builder.build());
        self
    }

    /// Adds an inspector using a builder function.
    pub fn inspector<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(InspectorBuilder) -> InspectorBuilder,
    {
        let builder = f(InspectorBuilder::new(name));
        self.admin.inspectors.push(builder.build());
        self
    }

    /// Adds a global config.
    pub fn global_config(mut self, name: impl Into<String>, schema: SchemaObject) -> Self {
        self.admin.global_configs.push(GlobalConfigDef {
            name: name.into(),
            title: None,
            schema,
        });
        self
    }

    /// Adds a UI translation.
    pub fn locale(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.admin
            .locale_map
            .get_or_insert_with(Default::default)
            .insert(key.into(), text.into());
        self
    }

    /// Builds the config. Call [`crate::validate::validate_admin`] to check it.
    pub fn build(self) -> CmsAdmin {
        self.admin
    }
}

/// Builder for one [`AdminModel`].
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    model: AdminModel,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            model: AdminModel::new(name),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.model.title = Some(title.into());
        self
    }

    pub fn can_create(mut self, allowed: bool) -> Self {
        self.model.can_create = Some(allowed);
        self
    }

    pub fn can_edit(mut self, allowed: bool) -> Self {
        self.model.can_edit = Some(allowed);
        self
    }

    pub fn can_delete(mut self, allowed: bool) -> Self {
        self.model.can_delete = Some(allowed);
        self
    }

    /// Enables create, edit and delete at once.
    pub fn crud(self) -> Self {
        self.can_create(true).can_edit(true).can_delete(true)
    }

    /// Adds a plain column.
    pub fn column(mut self, data_index: impl Into<String>) -> Self {
        self.model.page.list.columns.push(ListColumn::new(data_index));
        self
    }

    /// Adds a fully specified column.
    pub fn list_column(mut self, column: ListColumn) -> Self {
        self.model.page.list.columns.push(column);
        self
    }

    /// Shows a search box with the given placeholder.
    pub fn search(mut self, placeholder: impl Into<String>) -> Self {
        self.model.page.list.search = Some(SearchBox {
            placeholder: Some(placeholder.into()),
        });
        self
    }

    /// Sets the filter form schema.
    pub fn filter(mut self, schema: SchemaObject) -> Self {
        self.model.page.list.filter = Some(SchemaHolder { schema });
        self
    }

    /// Adds a custom action.
    pub fn action(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.model.page.list.actions.push(ListAction {
            name: name.into(),
            text: text.into(),
            confirm: None,
            extra_param: None,
        });
        self
    }

    /// Sets the edit form schema, used for both phases.
    pub fn edit(mut self, schema: SchemaObject) -> Self {
        self.edit_page().schema = schema;
        self
    }

    /// Overrides the schema used while creating.
    pub fn create_schema(mut self, schema: SchemaObject) -> Self {
        self.edit_page().create_schema = Some(schema);
        self
    }

    /// Overrides the schema used while editing.
    pub fn edit_schema(mut self, schema: SchemaObject) -> Self {
        self.edit_page().edit_schema = Some(schema);
        self
    }

    fn edit_page(&mut self) -> &mut EditPage {
        self.model.page.edit.get_or_insert_with(EditPage::default)
    }

    pub fn build(self) -> AdminModel {
        self.model
    }
}

/// Builder for one [`Inspector`].
#[derive(Debug, Clone)]
pub struct InspectorBuilder {
    inspector: Inspector,
}

impl InspectorBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inspector: Inspector {
                name: name.into(),
                title: None,
                panels: Vec::new(),
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.inspector.title = Some(title.into());
        self
    }

    /// Adds a panel with default span.
    pub fn panel(mut self, id: impl Into<String>, title: impl Into<String>, chart: Chart) -> Self {
        self.inspector.panels.push(InspectorPanel::new(id, title, chart));
        self
    }

    /// Adds a fully specified panel.
    pub fn add_panel(mut self, panel: InspectorPanel) -> Self {
        self.inspector.panels.push(panel);
        self
    }

    pub fn build(self) -> Inspector {
        self.inspector
    }
}
