//! JSON encoding of schema descriptions.
//!
//! Plain JSON maps onto the grammar directly: scalars are literals, arrays
//! are sequences, objects are maps. Everything JSON has no word for is a
//! single-entry directive object:
//!
//! ```json
//! {"$type": "number"}
//! {"$pattern": "^\\d+$"}
//! {"$range": {"min": 0, "max": 3, "exclusive": false}}
//! {"$optional": {"$type": "string"}}
//! {"$literal": [1, 2]}
//! ```
//!
//! A map key that really starts with `$` is written with a doubled `$$`.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use super::{Interval, Kind, Pattern, Schema};
use crate::value::{Key, Value};

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeDirective {
    min: Option<f64>,
    max: Option<f64>,
    #[serde(default)]
    exclusive: bool,
}

enum Directive {
    Type,
    Pattern,
    Range,
    Optional,
    Literal,
}

impl Directive {
    fn parse<E: de::Error>(name: &str) -> Result<Self, E> {
        match name {
            "type" => Ok(Directive::Type),
            "pattern" => Ok(Directive::Pattern),
            "range" => Ok(Directive::Range),
            "optional" => Ok(Directive::Optional),
            "literal" => Ok(Directive::Literal),
            other => Err(E::unknown_variant(
                other,
                &["$type", "$pattern", "$range", "$optional", "$literal"],
            )),
        }
    }
}

struct SchemaVisitor;

impl<'de> Visitor<'de> for SchemaVisitor {
    type Value = Schema;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value describing a schema")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Schema, E> {
        Ok(Schema::Value(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Schema, E> {
        Ok(Schema::Value(Value::Null))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Schema, E> {
        Ok(Schema::Value(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Schema, E> {
        Ok(Schema::Value(Value::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Schema, E> {
        Ok(Schema::Value(match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::from(v as f64),
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Schema, E> {
        Ok(Schema::Value(Value::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Schema, E> {
        Ok(Schema::Value(Value::from(v)))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Schema, E> {
        Ok(Schema::Value(Value::Str(v)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Schema, A::Error> {
        let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(item) = access.next_element::<Schema>()? {
            items.push(item);
        }
        Ok(Schema::Seq(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schema, A::Error> {
        let mut entries = IndexMap::new();
        while let Some(raw_key) = access.next_key::<String>()? {
            let directive_name = raw_key
                .strip_prefix('$')
                .filter(|rest| !rest.starts_with('$'));
            let Some(name) = directive_name else {
                let key = match raw_key.strip_prefix('$') {
                    Some(escaped) => escaped.to_string(),
                    None => raw_key,
                };
                entries.insert(Key::Str(key), access.next_value::<Schema>()?);
                continue;
            };
            if !entries.is_empty() {
                return Err(de::Error::custom(format!(
                    "directive `${name}` must be the only entry of its object"
                )));
            }
            let schema = match Directive::parse::<A::Error>(name)? {
                Directive::Type => Schema::Kind(access.next_value::<Kind>()?),
                Directive::Pattern => {
                    let source = access.next_value::<String>()?;
                    Schema::Pattern(Pattern::new(&source).map_err(de::Error::custom)?)
                }
                Directive::Range => {
                    let range = access.next_value::<RangeDirective>()?;
                    Schema::Range(Interval::new(range.min, range.max, !range.exclusive))
                }
                Directive::Optional => Schema::Optional(Box::new(access.next_value::<Schema>()?)),
                Directive::Literal => {
                    Schema::Value(Value::from(access.next_value::<serde_json::Value>()?))
                }
            };
            if access.next_key::<de::IgnoredAny>()?.is_some() {
                return Err(de::Error::custom(format!(
                    "directive `${name}` must be the only entry of its object"
                )));
            }
            return Ok(schema);
        }
        Ok(Schema::Map(entries))
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SchemaVisitor)
    }
}
