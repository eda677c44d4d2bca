//! Records exchanged over RPC, and the pagination envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default `pageSize` when a listing query omits it.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// The logged-in console user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub nick: String,
}

/// One record of a model.
///
/// Only `id` and `updated_at` are fixed; every other column is kept in
/// `fields` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub id: i64,
    pub updated_at: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ModelRecord {
    /// Creates a record with no extra fields.
    pub fn new(id: i64, updated_at: impl Into<String>) -> Self {
        Self {
            id,
            updated_at: updated_at.into(),
            fields: Map::new(),
        }
    }

    /// Sets an extra field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// A stored global config entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfigRecord {
    pub name: String,
    pub updated_at: String,
    pub data: Value,
}

/// Rows backing one inspector panel. Row shape depends on the panel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InspectorData {
    pub list: Vec<Value>,
}

/// Direct-to-storage upload target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadUrl {
    /// Where the client PUTs the file.
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
    /// Where the uploaded asset will be served from.
    #[serde(rename = "distURL")]
    pub dist_url: String,
}

/// Pagination part of a listing query. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_page_num")]
    pub page_num: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page_num() -> u32 {
    1
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_num: 1,
        }
    }
}

impl PageParams {
    pub fn new(page_size: u32, page_num: u32) -> Self {
        Self { page_size, page_num }
    }

    /// Index of the first item of this page in the full result set.
    pub fn offset(&self) -> usize {
        (self.page_num.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }
}

/// A page of a listing response.
///
/// `list.len() <= page_size` and `total >= list.len()`; `total` counts
/// items across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination<T> {
    pub page_size: u32,
    pub page_num: u32,
    pub total: u64,
    pub list: Vec<T>,
}

impl<T> Pagination<T> {
    /// Cuts the requested page out of a full, ordered result set.
    pub fn paginate(params: PageParams, items: Vec<T>) -> Self {
        let total = items.len() as u64;
        let list = items
            .into_iter()
            .skip(params.offset())
            .take(params.page_size as usize)
            .collect();
        Self {
            page_size: params.page_size,
            page_num: params.page_num,
            total,
            list,
        }
    }

    /// Checks the envelope invariants.
    pub fn check(&self) -> Result<(), String> {
        let len = self.list.len();
        if len > self.page_size as usize {
            return Err(format!(
                "page holds {len} items but pageSize is {}",
                self.page_size
            ));
        }
        if self.total < len as u64 {
            return Err(format!("total {} is below page length {len}", self.total));
        }
        Ok(())
    }

    /// Number of pages implied by `total` and `page_size`.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_paginate_middle_page() {
        let page = Pagination::paginate(PageParams::new(3, 2), (1..=8).collect());
        assert_eq!(page.list, vec![4, 5, 6]);
        assert_eq!(page.total, 8);
        assert_eq!(page.page_count(), 3);
        assert!(page.check().is_ok());
    }

    #[test]
    fn test_paginate_past_end() {
        let page = Pagination::paginate(PageParams::new(5, 4), (1..=8).collect::<Vec<_>>());
        assert!(page.list.is_empty());
        assert_eq!(page.total, 8);
        assert!(page.check().is_ok());
    }

    #[test]
    fn test_check_rejects_oversized_page() {
        let page = Pagination {
            page_size: 1,
            page_num: 1,
            total: 2,
            list: vec![1, 2],
        };
        assert!(page.check().is_err());

        let page = Pagination {
            page_size: 10,
            page_num: 1,
            total: 1,
            list: vec![1, 2],
        };
        assert!(page.check().is_err());
    }

    #[test]
    fn test_page_params_defaults() {
        let params: PageParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params, PageParams::default());
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_model_record_keeps_extra_columns() {
        let raw = json!({
            "id": 7, "updated_at": "2024-01-01T00:00:00Z", "title": "Hello", "views": 3
        });
        let record: ModelRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.fields["title"], "Hello");
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_upload_url_wire_names() {
        let url = UploadUrl {
            upload_url: "https://up".into(),
            dist_url: "https://cdn".into(),
        };
        assert_eq!(
            serde_json::to_value(&url).unwrap(),
            json!({"uploadURL": "https://up", "distURL": "https://cdn"})
        );
    }

    proptest! {
        #[test]
        fn prop_paginate_respects_envelope(
            page_size in 1u32..64,
            page_num in 1u32..16,
            len in 0usize..512,
        ) {
            let params = PageParams::new(page_size, page_num);
            let page = Pagination::paginate(params, (0..len).collect::<Vec<_>>());

            prop_assert!(page.list.len() <= page_size as usize);
            prop_assert!(page.total >= page.list.len() as u64);
            prop_assert_eq!(page.total, len as u64);
            prop_assert_eq!(page.page_size, page_size);
            prop_assert_eq!(page.page_num, page_num);
            prop_assert!(page.check().is_ok());

            // Items come from the requested window, in order.
            let start = params.offset();
            let expected: Vec<usize> = (start..len).take(page_size as usize).collect();
            prop_assert_eq!(page.list, expected);
        }
    }
}
