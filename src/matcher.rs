//! Assertion-style adapter for test suites.
//!
//! ```
//! use conform::matcher::conform_to_schema;
//! use conform::{assert_conforms, Key, Kind, Schema, Value};
//!
//! let order = Value::map([(Key::sym("entree"), "eggs")]);
//! assert_conforms!(order, conform_to_schema(Schema::map([("entree", Kind::String)])).with_indifferent_access());
//! ```

use crate::compiler::Options;
use crate::schema::Schema;
use crate::validator::Validator;
use crate::value::Value;

pub struct ConformToSchema {
    schema: Schema,
    options: Options,
    last: Option<(Value, Validator)>,
}

pub fn conform_to_schema(schema: impl Into<Schema>) -> ConformToSchema {
    ConformToSchema {
        schema: schema.into(),
        options: Options::default(),
        last: None,
    }
}

impl ConformToSchema {
    pub fn with_indifferent_access(mut self) -> Self {
        self.options = self.options.with_indifferent_access();
        self
    }

    pub fn matches(&mut self, actual: &Value) -> bool {
        let validator = Validator::new(actual, &self.schema, self.options);
        let valid = validator.is_valid();
        self.last = Some((actual.clone(), validator));
        valid
    }

    pub fn failure_message(&self) -> String {
        match &self.last {
            Some((_, validator)) => validator.failure_message().unwrap_or_default(),
            None => format!("no value was matched against schema\n{}", self.schema),
        }
    }

    pub fn failure_message_when_negated(&self) -> String {
        match &self.last {
            Some((actual, _)) => format!("expected\n{actual}\nnot to match schema\n{}", self.schema),
            None => format!("no value was matched against schema\n{}", self.schema),
        }
    }

    pub fn description(&self) -> String {
        format!("conform to schema\n{}", self.schema)
    }
}

/// Panics with the matcher's failure message unless `actual` conforms.
#[macro_export]
macro_rules! assert_conforms {
    ($actual:expr, $matcher:expr $(,)?) => {{
        let mut matcher = $matcher;
        let actual: $crate::Value = ::std::convert::Into::into($actual);
        if !matcher.matches(&actual) {
            panic!("{}", matcher.failure_message());
        }
    }};
}

/// Panics with the negated message if `actual` conforms.
#[macro_export]
macro_rules! assert_not_conforms {
    ($actual:expr, $matcher:expr $(,)?) => {{
        let mut matcher = $matcher;
        let actual: $crate::Value = ::std::convert::Into::into($actual);
        if matcher.matches(&actual) {
            panic!("{}", matcher.failure_message_when_negated());
        }
    }};
}
