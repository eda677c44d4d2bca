//! The closed set of RPC methods.
//!
//! Every method is declared exactly once in the `rpc_registry!` table below.
//! The table generates the [`Method`] enum, one marker type per method
//! implementing [`RpcMethod`], and the [`ENTRIES`] rows, so client and
//! server can never disagree about a shape.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::model::{
    AdminOverrides, GlobalConfigRecord, InspectorData, ModelRecord, Pagination, UploadUrl,
    UserInfo,
};
use crate::rpc::query::{
    CreateModelQuery, EmptyQuery, GlobalConfigQuery, InspectorQuery, InvokeModelQuery,
    InvokeQuery, ListModelQuery, LoginQuery, LoginResult, RecordQuery, UpdateGlobalConfigQuery,
    UpdateModelQuery, UploadQuery,
};
use crate::validate::Validate;

/// Static description of one registry method.
pub trait RpcMethod {
    const METHOD: Method;
    type Query: Serialize + DeserializeOwned + Validate;
    type Response: Serialize + DeserializeOwned + Validate;
}

/// One row of the registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractEntry {
    pub method: Method,
    /// Wire name, e.g. `listModel`.
    pub name: &'static str,
    /// Rust type of the query.
    pub query: &'static str,
    /// Rust type of the response.
    pub response: &'static str,
    /// Whether the caller must hold a session.
    pub requires_session: bool,
}

macro_rules! rpc_registry {
    ($(
        $(#[$doc:meta])*
        $marker:ident = $name:literal {
            query: $query:ty,
            response: $response:ty,
            session: $session:literal $(,)?
        }
    )*) => {
        /// A registry method.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Method {
            $( $(#[$doc])* $marker, )*
        }

        impl Method {
            /// Every method, in declaration order.
            pub const ALL: &'static [Method] = &[$( Method::$marker, )*];

            /// Returns the wire name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Method::$marker => $name, )*
                }
            }

            /// Whether the caller must hold a session.
            pub fn requires_session(self) -> bool {
                match self {
                    $( Method::$marker => $session, )*
                }
            }
        }

        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $marker;

            impl RpcMethod for $marker {
                const METHOD: Method = Method::$marker;
                type Query = $query;
                type Response = $response;
            }
        )*

        /// The registry table, in declaration order.
        pub const ENTRIES: &[ContractEntry] = &[$(
            ContractEntry {
                method: Method::$marker,
                name: $name,
                query: stringify!($query),
                response: stringify!($response),
                requires_session: $session,
            },
        )*];
    };
}

rpc_registry! {
    /// Console config overrides served by the backend.
    GetCmsAdminData = "getCMSAdminData" {
        query: Value,
        response: AdminOverrides,
        session: false,
    }

    /// Exchanges credentials for a session token.
    Login = "login" {
        query: LoginQuery,
        response: LoginResult,
        session: false,
    }

    /// The user behind the current session.
    GetUserInfo = "getUserInfo" {
        query: EmptyQuery,
        response: UserInfo,
        session: true,
    }

    /// One page of a model's records.
    ListModel = "listModel" {
        query: ListModelQuery,
        response: Pagination<ModelRecord>,
        session: true,
    }

    /// One record; a missing record is `NotFound`.
    GetModel = "getModel" {
        query: RecordQuery,
        response: ModelRecord,
        session: true,
    }

    UpdateModel = "updateModel" {
        query: UpdateModelQuery,
        response: Value,
        session: true,
    }

    CreateModel = "createModel" {
        query: CreateModelQuery,
        response: ModelRecord,
        session: true,
    }

    DeleteModel = "deleteModel" {
        query: RecordQuery,
        response: Value,
        session: true,
    }

    /// Runs a custom list action on one record.
    InvokeModel = "invokeModel" {
        query: InvokeModelQuery,
        response: Value,
        session: true,
    }

    /// Rows for one inspector panel.
    GetInspectorData = "getInspectorData" {
        query: InspectorQuery,
        response: InspectorData,
        session: true,
    }

    GetGlobalConfig = "getGlobalConfig" {
        query: GlobalConfigQuery,
        response: GlobalConfigRecord,
        session: true,
    }

    UpdateGlobalConfig = "updateGlobalConfig" {
        query: UpdateGlobalConfigQuery,
        response: Value,
        session: true,
    }

    /// Signed direct-to-storage upload target.
    GetUploadUrl = "getUploadURL" {
        query: UploadQuery,
        response: UploadUrl,
        session: true,
    }

    /// Untyped escape hatch for calls outside the registry.
    Invoke = "invoke" {
        query: InvokeQuery,
        response: Value,
        session: true,
    }
}

lazy_static! {
    static ref BY_NAME: FxHashMap<&'static str, &'static ContractEntry> =
        ENTRIES.iter().map(|entry| (entry.name, entry)).collect();
}

impl Method {
    /// Resolves a wire name.
    pub fn from_name(name: &str) -> Option<Method> {
        lookup(name).map(|entry| entry.method)
    }

    /// Returns the registry row of this method.
    pub fn entry(self) -> &'static ContractEntry {
        // ENTRIES is generated in the same order as the enum.
        &ENTRIES[self as usize]
    }
}

/// Resolves a wire name to its registry row.
pub fn lookup(name: &str) -> Option<&'static ContractEntry> {
    BY_NAME.get(name).copied()
}
