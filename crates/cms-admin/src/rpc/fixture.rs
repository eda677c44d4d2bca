//! In-memory backend shared by the dispatcher and client tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::error::RpcError;
use crate::model::{
    AdminBuilder, Chart, GlobalConfigRecord, InspectorData, ModelRecord, PageParams, Pagination,
    SchemaObject, UploadUrl, UserInfo,
};
use crate::rpc::dispatch::{AdminBackend, Session};
use crate::rpc::query::{
    CreateModelQuery, GlobalConfigQuery, InspectorQuery, InvokeModelQuery, InvokeQuery,
    ListModelQuery, LoginQuery, LoginResult, RecordQuery, UpdateGlobalConfigQuery,
    UpdateModelQuery, UploadQuery,
};
use crate::validate::Catalogue;

pub const ADMIN_TOKEN: &str = "token-admin";

const NOW: &str = "2024-01-01T00:00:00Z";

/// Blog console: `Post` is fully editable, `Author` is read-only.
pub fn blog_catalogue() -> Catalogue {
    let admin = AdminBuilder::new("Blog Admin", "https://api.example.com/admin")
        .model("Post", |m| m.title("Posts").crud().column("title").action("publish", "Publish"))
        .model("Author", |m| m.column("name"))
        .inspector("traffic", |i| {
            i.panel(
                "daily",
                "Daily visits",
                Chart::Column {
                    x_field: "day".into(),
                    y_field: "visits".into(),
                },
            )
        })
        .global_config("site", SchemaObject::new())
        .build();
    Catalogue::new(admin).expect("fixture config is valid")
}

#[derive(Debug, Default)]
struct Store {
    records: BTreeMap<String, BTreeMap<i64, ModelRecord>>,
    configs: BTreeMap<String, GlobalConfigRecord>,
    next_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: Mutex<Store>,
    calls: AtomicUsize,
    broken_pages: bool,
    inflated_pages: bool,
}

impl MemoryBackend {
    /// Three posts and one author.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        let posts = store.records.entry("Post".into()).or_default();
        for (id, title) in [(1, "Hello"), (2, "Learning Rust"), (3, "Drafts")] {
            posts.insert(
                id,
                ModelRecord::new(id, NOW)
                    .with_field("title", title)
                    .with_field("status", "draft"),
            );
        }
        store
            .records
            .entry("Author".into())
            .or_default()
            .insert(1, ModelRecord::new(1, NOW).with_field("name", "Ada"));
        store.next_id = 4;

        Self {
            store: Mutex::new(store),
            ..Default::default()
        }
    }

    /// Makes `listModel` ignore `pageSize`.
    pub fn with_broken_pages(mut self) -> Self {
        self.broken_pages = true;
        self
    }

    /// Makes `listModel` answer one oversized page holding every match.
    pub fn with_inflated_pages(mut self) -> Self {
        self.inflated_pages = true;
        self
    }

    /// Number of business calls that reached the backend.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> std::sync::MutexGuard<'_, Store> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.store.lock().expect("store lock poisoned")
    }
}

fn object(data: Value) -> serde_json::Map<String, Value> {
    match data {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

impl AdminBackend for MemoryBackend {
    fn login(&self, query: LoginQuery) -> Result<LoginResult, RpcError> {
        if query.account == "admin" && query.password == "secret" {
            Ok(LoginResult {
                token: ADMIN_TOKEN.into(),
            })
        } else {
            Err(RpcError::Unauthenticated {
                reason: "bad credentials".into(),
            })
        }
    }

    fn authenticate(&self, token: &str) -> Result<Session, RpcError> {
        if token == ADMIN_TOKEN {
            Ok(Session {
                user: UserInfo {
                    id: 1,
                    nick: "admin".into(),
                },
            })
        } else {
            Err(RpcError::Unauthenticated {
                reason: "unknown token".into(),
            })
        }
    }

    fn list_model(
        &self,
        _session: &Session,
        query: ListModelQuery,
    ) -> Result<Pagination<ModelRecord>, RpcError> {
        let store = self.enter();
        let search = query.search.as_deref().unwrap_or("").to_lowercase();
        let matches: Vec<ModelRecord> = store
            .records
            .get(&query.name)
            .into_iter()
            .flat_map(|records| records.values())
            .filter(|r| {
                r.fields
                    .get("title")
                    .and_then(Value::as_str)
                    .is_none_or(|t| t.to_lowercase().contains(&search))
            })
            .cloned()
            .collect();

        if self.broken_pages {
            return Ok(Pagination {
                page_size: query.page.page_size,
                page_num: query.page.page_num,
                total: matches.len() as u64,
                list: matches,
            });
        }
        if self.inflated_pages {
            return Ok(Pagination::paginate(
                PageParams::new(10_000, query.page.page_num),
                matches,
            ));
        }
        Ok(Pagination::paginate(query.page, matches))
    }

    fn get_model(&self, _session: &Session, query: RecordQuery) -> Result<ModelRecord, RpcError> {
        let store = self.enter();
        store
            .records
            .get(&query.name)
            .and_then(|records| records.get(&query.id))
            .cloned()
            .ok_or_else(|| RpcError::not_found("record", format!("{}#{}", query.name, query.id)))
    }

    fn create_model(
        &self,
        _session: &Session,
        query: CreateModelQuery,
    ) -> Result<ModelRecord, RpcError> {
        let mut store = self.enter();
        let id = store.next_id;
        store.next_id += 1;
        let record = ModelRecord {
            id,
            updated_at: NOW.into(),
            fields: object(query.data),
        };
        store
            .records
            .entry(query.name)
            .or_default()
            .insert(id, record.clone());
        Ok(record)
    }

    fn update_model(&self, _session: &Session, query: UpdateModelQuery) -> Result<Value, RpcError> {
        let mut store = self.enter();
        let record = store
            .records
            .get_mut(&query.name)
            .and_then(|records| records.get_mut(&query.id))
            .ok_or_else(|| RpcError::not_found("record", query.id))?;

        let mut fields = object(query.data);
        if let Some(expected) = fields.remove("updated_at") {
            if expected != record.updated_at.as_str() {
                return Err(RpcError::Conflict {
                    model: query.name,
                    id: query.id,
                    reason: "record changed since it was read".into(),
                });
            }
        }
        record.fields.extend(fields);
        serde_json::to_value(&*record).map_err(|e| RpcError::Backend(e.to_string()))
    }

    fn delete_model(&self, _session: &Session, query: RecordQuery) -> Result<Value, RpcError> {
        let mut store = self.enter();
        store
            .records
            .get_mut(&query.name)
            .and_then(|records| records.remove(&query.id))
            .map(|_| json!({"deleted": query.id}))
            .ok_or_else(|| RpcError::not_found("record", query.id))
    }

    fn invoke_model(&self, _session: &Session, query: InvokeModelQuery) -> Result<Value, RpcError> {
        let mut store = self.enter();
        if query.action.name != "publish" {
            return Err(RpcError::not_found("action", query.action.name));
        }
        let record = store
            .records
            .get_mut(&query.name)
            .and_then(|records| records.get_mut(&query.id))
            .ok_or_else(|| RpcError::not_found("record", query.id))?;
        record.fields.insert("status".into(), json!("published"));
        serde_json::to_value(&*record).map_err(|e| RpcError::Backend(e.to_string()))
    }

    fn inspector_data(
        &self,
        _session: &Session,
        _query: InspectorQuery,
    ) -> Result<InspectorData, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(InspectorData {
            list: vec![
                json!({"day": "2024-01-01", "visits": 10}),
                json!({"day": "2024-01-02", "visits": 12}),
            ],
        })
    }

    fn global_config(
        &self,
        _session: &Session,
        query: GlobalConfigQuery,
    ) -> Result<GlobalConfigRecord, RpcError> {
        let store = self.enter();
        Ok(store.configs.get(&query.name).cloned().unwrap_or(GlobalConfigRecord {
            name: query.name,
            updated_at: NOW.into(),
            data: json!({}),
        }))
    }

    fn update_global_config(
        &self,
        _session: &Session,
        query: UpdateGlobalConfigQuery,
    ) -> Result<Value, RpcError> {
        let mut store = self.enter();
        store.configs.insert(query.name, query.data);
        Ok(Value::Null)
    }

    fn upload_url(&self, _session: &Session, query: UploadQuery) -> Result<UploadUrl, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(UploadUrl {
            upload_url: format!("https://upload.example.com/{}?mime={}", query.path, query.mime),
            dist_url: format!("https://cdn.example.com/{}", query.path),
        })
    }

    fn invoke(&self, _session: &Session, query: InvokeQuery) -> Result<Value, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match query.method.as_str() {
            "ping" => Ok(json!("pong")),
            _ => Err(RpcError::not_found("method", query.method)),
        }
    }
}
