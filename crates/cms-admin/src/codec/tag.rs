//! String encoding of biz tags.
//!
//! A tag is stored as `cms:` followed by a JSON object:
//!
//! ```text
//! cms:{"formatter":"name","targetName":"Author","type":"linkModel","v":1}
//! ```
//!
//! The prefix lets tags share a free-text slot (e.g. a column comment) with
//! unrelated strings: anything without it is "not a tag", never an error.
//! Payloads written before versioning have no `v` and read as version 1.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{DecodeError, EncodeError};
use crate::model::BizTag;

/// Reserved namespace prefix. Must never change: stored tags depend on it.
pub const TAG_PREFIX: &str = "cms:";

/// Payload version written by [`stringify`].
pub const TAG_VERSION: u64 = 1;

const VERSION_KEY: &str = "v";
const KIND_KEY: &str = "type";

/// Returns true if `raw` is in the tag namespace.
pub fn is_tag(raw: &str) -> bool {
    raw.starts_with(TAG_PREFIX)
}

/// Encodes a tag to its prefixed string form.
///
/// Output is deterministic: object keys are emitted in sorted order.
pub fn stringify(tag: &BizTag) -> Result<String, EncodeError> {
    check_encodable(tag)?;

    let mut value = serde_json::to_value(tag).map_err(|e| EncodeError::Serialize(e.to_string()))?;
    if let Value::Object(map) = &mut value {
        map.insert(VERSION_KEY.to_string(), Value::from(TAG_VERSION));
    }

    let body = serde_json::to_string(&value).map_err(|e| EncodeError::Serialize(e.to_string()))?;
    Ok(format!("{TAG_PREFIX}{body}"))
}

/// Decodes a tag string.
///
/// Returns `Ok(None)` when `raw` lacks the prefix. A prefixed string that
/// does not decode is an error.
pub fn parse(raw: &str) -> Result<Option<BizTag>, DecodeError> {
    let Some(body) = raw.strip_prefix(TAG_PREFIX) else {
        return Ok(None);
    };

    let value: Value = serde_json::from_str(body).map_err(|e| DecodeError::Malformed {
        reason: e.to_string(),
    })?;
    let Value::Object(mut map) = value else {
        return Err(DecodeError::NotAnObject);
    };

    check_version(map.remove(VERSION_KEY))?;
    check_kind(&map)?;

    BizTag::deserialize(Value::Object(map))
        .map(Some)
        .map_err(|e| DecodeError::Malformed {
            reason: e.to_string(),
        })
}

fn check_encodable(tag: &BizTag) -> Result<(), EncodeError> {
    if let BizTag::Assets {
        image: Some(hint), ..
    } = tag
    {
        if let Some(aspect) = hint.aspect {
            if !aspect.is_finite() {
                return Err(EncodeError::NonFinite {
                    field: "image.aspect",
                    value: aspect,
                });
            }
        }
    }
    Ok(())
}

fn check_version(version: Option<Value>) -> Result<(), DecodeError> {
    let Some(version) = version else {
        return Ok(());
    };
    match version.as_u64() {
        Some(v) if (1..=TAG_VERSION).contains(&v) => Ok(()),
        Some(v) => Err(DecodeError::UnsupportedVersion {
            version: v,
            supported: TAG_VERSION,
        }),
        None => Err(DecodeError::Malformed {
            reason: format!("version must be a positive integer, found {version}"),
        }),
    }
}

fn check_kind(map: &Map<String, Value>) -> Result<(), DecodeError> {
    let kind = map
        .get(KIND_KEY)
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingDiscriminant)?;
    if !BizTag::KINDS.contains(&kind) {
        return Err(DecodeError::UnknownKind {
            kind: kind.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageHint, PresetOption};
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_link_model_scenario() {
        let tag = BizTag::LinkModel {
            target_name: "Author".into(),
            formatter: Some("name".into()),
            search_cache: None,
        };
        let raw = stringify(&tag).unwrap();
        assert!(raw.starts_with("cms:"));
        assert_eq!(
            raw,
            r#"cms:{"formatter":"name","targetName":"Author","type":"linkModel","v":1}"#
        );
        assert_eq!(parse(&raw).unwrap(), Some(tag));
    }

    #[test]
    fn test_foreign_string_is_not_a_tag() {
        assert_eq!(parse("some random comment").unwrap(), None);
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("CMS:{\"type\":\"date\"}").unwrap(), None);
        assert_eq!(parse(" cms:{\"type\":\"date\"}").unwrap(), None);
        assert!(!is_tag("comment: cms:"));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            parse("cms:not valid json"),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(parse("cms:"), Err(DecodeError::Malformed { .. })));
        assert_eq!(parse("cms:[1,2]"), Err(DecodeError::NotAnObject));
        assert_eq!(parse("cms:{}"), Err(DecodeError::MissingDiscriminant));
        assert_eq!(
            parse(r#"cms:{"type":"color"}"#),
            Err(DecodeError::UnknownKind {
                kind: "color".into()
            })
        );
        // linkModel without its required target
        assert!(matches!(
            parse(r#"cms:{"type":"linkModel"}"#),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_legacy_tag_without_version() {
        assert_eq!(
            parse(r#"cms:{"type":"markdown"}"#).unwrap(),
            Some(BizTag::Markdown)
        );
        assert_eq!(
            parse(r#"cms:{"type":"preset","list":["a",{"label":"B","value":2}]}"#).unwrap(),
            Some(BizTag::Preset {
                list: vec![
                    PresetOption::Plain("a".into()),
                    PresetOption::Labeled {
                        label: "B".into(),
                        value: json!(2)
                    },
                ]
            })
        );
    }

    #[test]
    fn test_future_version_rejected() {
        assert_eq!(
            parse(r#"cms:{"type":"date","v":2}"#),
            Err(DecodeError::UnsupportedVersion {
                version: 2,
                supported: TAG_VERSION
            })
        );
        assert!(matches!(
            parse(r#"cms:{"type":"date","v":"1"}"#),
            Err(DecodeError::Malformed { .. })
        ));
        assert!(matches!(
            parse(r#"cms:{"type":"date","v":0}"#),
            Err(DecodeError::UnsupportedVersion { version: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_aspect_not_encodable() {
        let tag = BizTag::Assets {
            accept: None,
            image: Some(ImageHint {
                aspect: Some(f64::NAN),
            }),
        };
        assert!(matches!(
            stringify(&tag),
            Err(EncodeError::NonFinite { field: "image.aspect", .. })
        ));
    }

    #[test]
    fn test_stringify_is_deterministic() {
        let tag = BizTag::Assets {
            accept: Some("image/png".into()),
            image: Some(ImageHint { aspect: Some(1.5) }),
        };
        assert_eq!(stringify(&tag).unwrap(), stringify(&tag.clone()).unwrap());
        assert_eq!(
            stringify(&tag).unwrap(),
            r#"cms:{"accept":"image/png","image":{"aspect":1.5},"type":"assets","v":1}"#
        );
    }

    fn arb_option() -> impl Strategy<Value = PresetOption> {
        let scalar = prop_oneof![
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            ".*".prop_map(Value::from),
            Just(Value::Null),
        ];
        prop_oneof![
            ".*".prop_map(PresetOption::Plain),
            (".*", scalar).prop_map(|(label, value)| PresetOption::Labeled { label, value }),
        ]
    }

    fn arb_tag() -> impl Strategy<Value = BizTag> {
        prop_oneof![
            prop::collection::vec(arb_option(), 0..6).prop_map(|list| BizTag::Preset { list }),
            Just(BizTag::Textarea),
            Just(BizTag::Date),
            (
                proptest::option::of(".*"),
                proptest::option::of(proptest::option::of(any::<f64>().prop_filter(
                    "finite",
                    |f| f.is_finite()
                ))),
            )
                .prop_map(|(accept, image)| BizTag::Assets {
                    accept,
                    image: image.map(|aspect| ImageHint { aspect }),
                }),
            Just(BizTag::Markdown),
            (
                ".*",
                proptest::option::of(".*"),
                proptest::option::of(any::<bool>())
            )
                .prop_map(|(target_name, formatter, search_cache)| BizTag::LinkModel {
                    target_name,
                    formatter,
                    search_cache,
                }),
        ]
    }

    proptest! {
        #[test]
        fn prop_roundtrip(tag in arb_tag()) {
            let raw = stringify(&tag).unwrap();
            prop_assert!(raw.starts_with(TAG_PREFIX));
            prop_assert_eq!(parse(&raw).unwrap(), Some(tag));
        }

        #[test]
        fn prop_unprefixed_is_not_a_tag(raw in ".*") {
            prop_assume!(!raw.starts_with(TAG_PREFIX));
            prop_assert_eq!(parse(&raw), Ok(None));
        }
    }
}
