//! Contract layer for a schema-driven CMS admin console.
//!
//! A backend describes its models, inspectors and global configs once; the
//! console renders list pages, edit forms and dashboards from that
//! description and talks back through a small, closed set of RPC methods.
//!
//! # Overview
//!
//! - **Biz tags**: field-level UI hints embedded in schema strings as
//!   `cms:` followed by a JSON object
//! - **Registry**: fourteen RPC methods, each with one query and one
//!   response shape shared by client and server
//! - **Config**: the [`CmsAdmin`] tree, loaded from JSON or built in code
//!
//! # Quick Start
//!
//! ```rust
//! use cms_admin::codec::{parse, stringify};
//! use cms_admin::BizTag;
//!
//! let tag = BizTag::LinkModel {
//!     target_name: "Author".to_string(),
//!     formatter: Some("name".to_string()),
//!     search_cache: None,
//! };
//!
//! let text = stringify(&tag).unwrap();
//! assert!(text.starts_with("cms:"));
//! assert_eq!(parse(&text).unwrap(), Some(tag));
//!
//! // Ordinary descriptions are not tags.
//! assert_eq!(parse("The post title").unwrap(), None);
//! ```
//!
//! # Modules
//!
//! - [`model`]: console config, biz tags, records and pagination
//! - [`codec`]: biz tag encoding and the JSON request/reply envelope
//! - [`validate`]: structural checks and config consistency
//! - [`rpc`]: method registry, server dispatcher and typed client
//! - [`error`]: error types and the error taxonomy

pub mod codec;
pub mod error;
pub mod model;
pub mod rpc;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{is_tag, parse, stringify, RpcReply, RpcRequest, TAG_PREFIX};
pub use error::{ConfigError, DecodeError, EncodeError, ErrorKind, RpcError};
pub use model::{
    AdminBuilder, AdminModel, AdminOverrides, BizTag, CmsAdmin, GlobalConfigRecord, Inspector,
    ModelRecord, PageParams, Pagination, PresetOption, UserInfo,
};
pub use rpc::{AdminBackend, Client, Dispatcher, Method, RpcMethod, Session, Transport};
pub use validate::{validate_admin, validate_tag, Catalogue, Validate};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
