//! Raw schema descriptions, as written by callers.
//!
//! The shape of a `Schema` decides what it compiles to:
//! - literals, kinds, patterns and intervals become single-predicate atoms;
//! - a one-element sequence means "every element matches this";
//! - a longer sequence means "matches any of these";
//! - a map describes keyed subschemas, with `optional(..)` marking entries
//!   that may be absent.
pub mod kind;
pub mod pattern;
pub mod range;
mod de;

use std::fmt;

use indexmap::IndexMap;

use crate::value::{Key, Value};

pub use kind::Kind;
pub use pattern::Pattern;
pub use range::Interval;

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Exact value. A literal sequence or map here is compared by equality,
    /// not structurally.
    Value(Value),
    Kind(Kind),
    Pattern(Pattern),
    Range(Interval),
    Seq(Vec<Schema>),
    Map(IndexMap<Key, Schema>),
    Optional(Box<Schema>),
}

/// Marks a map entry as not required to be present.
pub fn optional(schema: impl Into<Schema>) -> Schema {
    Schema::Optional(Box::new(schema.into()))
}

impl Schema {
    pub fn literal(value: impl Into<Value>) -> Self {
        Schema::Value(value.into())
    }

    pub fn seq<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Schema>,
    {
        Schema::Seq(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<Key>,
        S: Into<Schema>,
    {
        Schema::Map(entries.into_iter().map(|(k, s)| (k.into(), s.into())).collect())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSIONS
// ————————————————————————————————————————————————————————————————————————————

impl From<Kind> for Schema {
    fn from(kind: Kind) -> Self {
        Schema::Kind(kind)
    }
}

impl From<Pattern> for Schema {
    fn from(pattern: Pattern) -> Self {
        Schema::Pattern(pattern)
    }
}

impl From<Interval> for Schema {
    fn from(interval: Interval) -> Self {
        Schema::Range(interval)
    }
}

macro_rules! literal_schema_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Schema {
                fn from(v: $t) -> Self {
                    Schema::Value(Value::from(v))
                }
            }
        )*
    };
}

literal_schema_from!(bool, i32, i64, f64, &str, String);

macro_rules! range_schema_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Schema {
                fn from(r: $t) -> Self {
                    Schema::Range(Interval::from(r))
                }
            }
        )*
    };
}

range_schema_from!(
    std::ops::Range<i64>,
    std::ops::RangeInclusive<i64>,
    std::ops::RangeFrom<i64>,
    std::ops::RangeTo<i64>,
    std::ops::RangeToInclusive<i64>,
    std::ops::Range<f64>,
    std::ops::RangeInclusive<f64>,
);

// ————————————————————————————————————————————————————————————————————————————
// RENDERING
// ————————————————————————————————————————————————————————————————————————————

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Value(v) => write!(f, "{v}"),
            Schema::Kind(k) => f.write_str(k.name()),
            Schema::Pattern(p) => write!(f, "{p}"),
            Schema::Range(r) => write!(f, "{r}"),
            Schema::Seq(items) => {
                f.write_str("[")?;
                for (i, s) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{s}")?;
                }
                f.write_str("]")
            }
            Schema::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, s)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} => {s}")?;
                }
                f.write_str("}")
            }
            Schema::Optional(inner) => write!(f, "optional({inner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_descriptions() {
        let schema = Schema::map([
            ("foo", Schema::seq([Kind::String])),
            ("bar", Schema::seq([Schema::from(Kind::Number), Pattern::new(r"\d+").unwrap().into()])),
            ("baz", optional(0..=3_i64)),
        ]);
        assert_eq!(
            schema.to_string(),
            r#"{"foo" => [String], "bar" => [Number, /\d+/], "baz" => optional(0..=3)}"#
        );
    }
}
