//! One-shot validation: compile, compare once, keep the result.

use crate::compare::Comparison;
use crate::compiler::{compile, CompiledSchema, Options};
use crate::mismatch::Mismatch;
use crate::schema::Schema;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Validator {
    comparison: Comparison,
}

impl Validator {
    pub fn new(actual: &Value, schema: &Schema, options: Options) -> Self {
        Self::from_compiled(actual, &compile(schema, &options))
    }

    /// Validate against a schema compiled earlier, e.g. one shared across documents.
    pub fn from_compiled(actual: &Value, compiled: &CompiledSchema) -> Self {
        let comparison = compiled.compare(actual);
        tracing::debug!(
            matches = comparison.matches(),
            mismatches = comparison.mismatches().len(),
            "validated value against schema"
        );
        Self { comparison }
    }

    pub fn is_valid(&self) -> bool {
        self.comparison.matches()
    }

    pub fn first_mismatch(&self) -> Option<&Mismatch> {
        self.comparison.first()
    }

    /// Message for the first mismatch in traversal order; `None` when valid.
    pub fn failure_message(&self) -> Option<String> {
        self.first_mismatch().map(Mismatch::message)
    }

    pub fn comparison(&self) -> &Comparison {
        &self.comparison
    }
}

// ------------------------------- Tests ------------------------------------ //
