//! Dynamic data compared against compiled schemas.
//!
//! A `Value` is whatever the caller wants to check: scalars, symbols, ordered
//! sequences and insertion-ordered maps. Numbers compare numerically across
//! `Int` and `Float`, so `1` equals `1.0`.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use ordered_float::OrderedFloat;
use regex::Regex;

use crate::schema::Kind;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
    /// Symbol-like name; distinct from `Str` unless keys are compared indifferently.
    Sym(String),
    Seq(Vec<Value>),
    Map(IndexMap<Key, Value>),
}

/// Map key. Ordered so key sets can live in a `BTreeSet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Str(String),
    Sym(String),
    Int(i64),
}

// ————————————————————————————————————————————————————————————————————————————
// VALUE
// ————————————————————————————————————————————————————————————————————————————

impl Value {
    pub fn sym(name: impl Into<String>) -> Self {
        Value::Sym(name.into())
    }

    pub fn seq<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Most specific kind this value belongs to.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::Sym(_) => Kind::Symbol,
            Value::Seq(_) => Kind::Sequence,
            Value::Map(_) => Kind::Map,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(f.0),
            _ => None,
        }
    }

    /// Text of a string or symbol.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Sym(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // OrderedFloat: NaN equals NaN
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => int_equals_float(*i, f.0),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            // IndexMap equality ignores insertion order
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

/// Exact: `f` must be a whole number inside the `i64` range.
fn int_equals_float(i: i64, f: f64) -> bool {
    // 2^63; `i64::MAX as f64` rounds up to it
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) && f as i64 == i
}

// ————————————————————————————————————————————————————————————————————————————
// KEY
// ————————————————————————————————————————————————————————————————————————————

impl Key {
    pub fn sym(name: impl Into<String>) -> Self {
        Key::Sym(name.into())
    }

    /// Bare text of the key, as used in location paths.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Key::Str(s) | Key::Sym(s) => Cow::Borrowed(s),
            Key::Int(i) => Cow::Owned(i.to_string()),
        }
    }

    /// Symbol keys collapse onto their string form; everything else is kept.
    pub fn indifferent(&self) -> Cow<'_, Key> {
        match self {
            Key::Sym(s) => Cow::Owned(Key::Str(s.clone())),
            other => Cow::Borrowed(other),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Str(s) => Value::Str(s),
            Key::Sym(s) => Value::Sym(s),
            Key::Int(i) => Value::Int(i),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSIONS
// ————————————————————————————————————————————————————————————————————————————

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(OrderedFloat(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::seq(items)
    }
}

/// JSON object keys become string keys; numbers that fit `i64` stay integers.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Float(OrderedFloat(u as f64))
                } else {
                    Value::Float(OrderedFloat(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Json::String(s) => Value::Str(s),
            Json::Array(xs) => Value::Seq(xs.into_iter().map(Value::from).collect()),
            Json::Object(m) => Value::Map(
                m.into_iter().map(|(k, v)| (Key::Str(k), Value::from(v))).collect(),
            ),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// RENDERING
// ————————————————————————————————————————————————————————————————————————————

static BARE_SYMBOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*[?!]?$").expect("static symbol pattern")
});

fn write_symbol(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if BARE_SYMBOL.is_match(name) {
        write!(f, ":{name}")
    } else {
        write!(f, ":{name:?}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{:?}", x.0),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Sym(s) => write_symbol(f, s),
            Value::Seq(xs) => {
                f.write_str("[")?;
                for (i, x) in xs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                f.write_str("]")
            }
            Value::Map(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} => {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => write!(f, "{s:?}"),
            Key::Sym(s) => write_symbol(f, s),
            Key::Int(i) => write!(f, "{i}"),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_and_floats_compare_numerically() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1), Value::from(1.5));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_eq!(Value::from(-3.0), Value::from(-3));
    }

    #[test]
    fn nan_equals_itself() {
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from(f64::NAN), Value::from(0));
        assert_ne!(Value::from(f64::INFINITY), Value::Int(i64::MAX));
    }

    #[test]
    fn integer_float_equality_is_exact_past_two_to_the_53() {
        let two_53 = 9_007_199_254_740_992_i64;
        assert_eq!(Value::Int(two_53), Value::from(9_007_199_254_740_992.0));
        assert_ne!(Value::Int(two_53 + 1), Value::from(9_007_199_254_740_992.0));
        assert_ne!(Value::from(9_007_199_254_740_992.0), Value::Int(two_53 + 1));
        // 2^63 is one past i64::MAX
        assert_ne!(Value::Int(i64::MAX), Value::from(9_223_372_036_854_775_808.0));
        assert_eq!(Value::Int(i64::MIN), Value::from(-9_223_372_036_854_775_808.0));
    }

    #[test]
    fn strings_and_symbols_are_distinct_values() {
        assert_ne!(Value::from("foo"), Value::sym("foo"));
        assert_ne!(Key::from("foo"), Key::sym("foo"));
        assert_eq!(*Key::sym("foo").indifferent(), Key::from("foo"));
        assert_eq!(*Key::Int(3).indifferent(), Key::Int(3));
    }

    #[test]
    fn map_equality_ignores_insertion_order() {
        let a = Value::map([("a", 1), ("b", 2)]);
        let b = Value::map([("b", 2), ("a", 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn json_objects_become_string_keyed_maps() {
        let v = Value::from(json!({"foo": [1, 2.5, "x"], "bar": null}));
        let expected = Value::map([
            ("foo", Value::seq([Value::from(1), Value::from(2.5), Value::from("x")])),
            ("bar", Value::Null),
        ]);
        assert_eq!(v, expected);
        assert_eq!(Value::from(json!(u64::MAX)).kind(), Kind::Float);
    }

    #[test]
    fn renders_like_an_inspector() {
        let v = Value::map([
            (Key::sym("a"), Value::from(1)),
            (Key::from("b"), Value::seq([Value::from(1.0), Value::sym("two words")])),
        ]);
        assert_eq!(v.to_string(), r#"{:a => 1, "b" => [1.0, :"two words"]}"#);
        assert_eq!(Value::from("squirrel").to_string(), "\"squirrel\"");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
