//! Data model types for the admin console contract.
//!
//! This module contains all the core types of the contract:
//! - Console configuration (models, global configs, inspectors, menu)
//! - Biz tags (field-level UI annotations)
//! - Records and the pagination envelope exchanged over RPC
//! - Builders (ergonomic construction)

pub mod admin;
pub mod builder;
pub mod entity;
pub mod inspector;
pub mod record;
pub mod schema;
pub mod tag;

pub use admin::{AdminOverrides, CmsAdmin, GlobalConfigDef, MenuKind, MenuLayout, RpcEndpoint};
pub use builder::{AdminBuilder, InspectorBuilder, ModelBuilder};
pub use entity::{
    ActionConfirm, AdminModel, BatchEdit, CellDisplay, ColumnStyle, EditPage, EditPhase,
    ExpandableColumn, ListAction, ListColumn, ListPage, ModelPage, SchemaHolder, Scroll,
    SearchBox, Typo, TypoTone,
};
pub use inspector::{Chart, Inspector, InspectorPanel, DEFAULT_PANEL_SPAN, MAX_PANEL_SPAN};
pub use record::{
    GlobalConfigRecord, InspectorData, ModelRecord, PageParams, Pagination, UploadUrl, UserInfo,
    DEFAULT_PAGE_SIZE,
};
pub use schema::{SchemaObject, SchemaString};
pub use tag::{BizTag, ImageHint, PresetOption};
