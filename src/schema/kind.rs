use serde::Deserialize;

use crate::value::Value;

/// Type descriptor. `Number` covers both integers and floats; `Any` covers everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Any,
    Null,
    Bool,
    Integer,
    Float,
    Number,
    String,
    Symbol,
    Sequence,
    Map,
}

impl Kind {
    pub fn contains(self, value: &Value) -> bool {
        match self {
            Kind::Any => true,
            Kind::Number => matches!(value, Value::Int(_) | Value::Float(_)),
            kind => value.kind() == kind,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Any => "Any",
            Kind::Null => "Null",
            Kind::Bool => "Bool",
            Kind::Integer => "Integer",
            Kind::Float => "Float",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Symbol => "Symbol",
            Kind::Sequence => "Sequence",
            Kind::Map => "Map",
        }
    }

    /// Noun phrase for messages, e.g. "a sequence".
    pub fn described(self) -> &'static str {
        match self {
            Kind::Any => "anything",
            Kind::Null => "null",
            Kind::Bool => "a boolean",
            Kind::Integer => "an integer",
            Kind::Float => "a float",
            Kind::Number => "a number",
            Kind::String => "a string",
            Kind::Symbol => "a symbol",
            Kind::Sequence => "a sequence",
            Kind::Map => "a map",
        }
    }
}
