//! String and wire encodings for the admin console contract.
//!
//! - [`tag`]: the `cms:`-prefixed biz tag encoding
//! - [`wire`]: the JSON request/reply envelope used by transports

pub mod tag;
pub mod wire;

pub use tag::{is_tag, parse, stringify, TAG_PREFIX, TAG_VERSION};
pub use wire::{
    decode_reply, decode_request, encode_reply, encode_request, RpcReply, RpcRequest, WireError,
};
