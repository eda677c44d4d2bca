//! Field-level UI annotations ("biz tags").
//!
//! A biz tag tells a generic renderer what a plain data field really is:
//! a choice list, a markdown body, a link to another model's records.
//! See [`crate::codec::tag`] for the string encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantics of one data field, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BizTag {
    /// Enumerated choice list.
    Preset { list: Vec<PresetOption> },

    /// Multi-line plain text.
    Textarea,

    /// Calendar date picker.
    Date,

    /// File or image upload.
    Assets {
        /// MIME filter passed to the file picker (e.g. `image/*`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accept: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<ImageHint>,
    },

    /// Markdown body.
    Markdown,

    /// Foreign-key-like reference to another model's records.
    #[serde(rename_all = "camelCase")]
    LinkModel {
        /// Name of the referenced model.
        target_name: String,
        /// Display formatter for the referenced record.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        formatter: Option<String>,
        /// Whether the renderer may cache search results.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        search_cache: Option<bool>,
    },
}

impl BizTag {
    /// All discriminant values, in declaration order.
    pub const KINDS: [&'static str; 6] = [
        "preset",
        "textarea",
        "date",
        "assets",
        "markdown",
        "linkModel",
    ];

    /// Returns the wire discriminant of this tag.
    pub fn kind(&self) -> &'static str {
        match self {
            BizTag::Preset { .. } => "preset",
            BizTag::Textarea => "textarea",
            BizTag::Date => "date",
            BizTag::Assets { .. } => "assets",
            BizTag::Markdown => "markdown",
            BizTag::LinkModel { .. } => "linkModel",
        }
    }

    /// Creates a `linkModel` tag with no formatter or cache hint.
    pub fn link_model(target_name: impl Into<String>) -> Self {
        BizTag::LinkModel {
            target_name: target_name.into(),
            formatter: None,
            search_cache: None,
        }
    }

    /// Creates a `preset` tag from plain string options.
    pub fn preset<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BizTag::Preset {
            list: options.into_iter().map(|s| PresetOption::Plain(s.into())).collect(),
        }
    }
}

/// One option of a `preset` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetOption {
    /// Option whose label and stored value are the same string.
    Plain(String),
    /// Option with a display label and an arbitrary stored value.
    Labeled { label: String, value: Value },
}

impl PresetOption {
    /// Returns the label shown to the user.
    pub fn label(&self) -> &str {
        match self {
            PresetOption::Plain(s) => s,
            PresetOption::Labeled { label, .. } => label,
        }
    }
}

/// Image-specific hints for an `assets` tag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageHint {
    /// Width / height ratio to crop to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<f64>,
}
