//! Schema description → executable node tree.
//!
//! Compilation is total: any shape without a structural meaning becomes an
//! exact-equality atom.

use std::fmt;

use serde::Deserialize;

use crate::compare::{self, Comparison};
use crate::node::{KeyPolicy, Node, Predicate};
use crate::schema::Schema;
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Treat symbol keys and string keys with the same text as one key.
    pub indifferent_access: bool,
}

impl Options {
    pub fn with_indifferent_access(mut self) -> Self {
        self.indifferent_access = true;
        self
    }

    pub fn key_policy(&self) -> KeyPolicy {
        if self.indifferent_access {
            KeyPolicy::Indifferent
        } else {
            KeyPolicy::Strict
        }
    }
}

/// A compiled schema, reusable across any number of comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema {
    root: Node,
}

impl CompiledSchema {
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn compare(&self, actual: &Value) -> Comparison {
        compare::compare(&self.root, actual)
    }
}

impl fmt::Display for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: Options,
}

impl Compiler {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn compile(&self, schema: &Schema) -> CompiledSchema {
        let root = self.compile_node(schema);
        tracing::trace!(schema = %root, policy = ?self.options.key_policy(), "compiled schema");
        CompiledSchema { root }
    }

    fn compile_node(&self, schema: &Schema) -> Node {
        match schema {
            Schema::Optional(inner) => Node::Optional(Box::new(self.compile_node(inner))),
            Schema::Seq(items) => match items.as_slice() {
                [] => Node::Atom(Predicate::Equal(Value::Seq(Vec::new()))),
                [element] => Node::ArrayOf(Box::new(self.compile_node(element))),
                members => Node::Alternatives(members.iter().map(|m| self.compile_node(m)).collect()),
            },
            Schema::Map(entries) => Node::MapOf {
                entries: entries
                    .iter()
                    .map(|(k, v)| (k.clone(), self.compile_node(v)))
                    .collect(),
                policy: self.options.key_policy(),
            },
            Schema::Value(v) => Node::Atom(Predicate::Equal(v.clone())),
            Schema::Kind(k) => Node::Atom(Predicate::Kind(*k)),
            Schema::Pattern(p) => Node::Atom(Predicate::Pattern(p.clone())),
            Schema::Range(r) => Node::Atom(Predicate::Range(*r)),
        }
    }
}

pub fn compile(schema: &Schema, options: &Options) -> CompiledSchema {
    Compiler::new(*options).compile(schema)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{optional, Kind};
    use crate::value::Key;
    use indexmap::IndexMap;

    fn root(schema: impl Into<Schema>) -> Node {
        compile(&schema.into(), &Options::default()).root().clone()
    }

    #[test]
    fn scalars_and_kinds_compile_to_atoms() {
        assert_eq!(root(Kind::String), Node::kind(Kind::String));
        assert_eq!(root(1), Node::Atom(Predicate::Equal(Value::from(1))));
    }

    #[test]
    fn one_element_sequence_is_array_of() {
        assert_eq!(
            root(Schema::seq([Kind::String])),
            Node::ArrayOf(Box::new(Node::kind(Kind::String)))
        );
    }

    #[test]
    fn longer_sequence_is_alternatives() {
        assert_eq!(
            root(Schema::seq([true, false])),
            Node::Alternatives(vec![
                Node::Atom(Predicate::Equal(Value::from(true))),
                Node::Atom(Predicate::Equal(Value::from(false))),
            ])
        );
    }

    #[test]
    fn empty_sequence_is_an_exact_literal() {
        assert_eq!(
            root(Schema::Seq(Vec::new())),
            Node::Atom(Predicate::Equal(Value::Seq(Vec::new())))
        );
    }

    #[test]
    fn maps_compile_recursively_in_declared_order() {
        let schema = Schema::map([
            ("foo", Schema::seq([Kind::String])),
            ("bar", Schema::seq([Schema::map([("baz", Kind::Number)])])),
        ]);
        let baz: IndexMap<Key, Node> = [("baz".into(), Node::kind(Kind::Number))].into_iter().collect();
        let expected = Node::MapOf {
            entries: [
                ("foo".into(), Node::ArrayOf(Box::new(Node::kind(Kind::String)))),
                (
                    "bar".into(),
                    Node::ArrayOf(Box::new(Node::MapOf { entries: baz, policy: KeyPolicy::Strict })),
                ),
            ]
            .into_iter()
            .collect(),
            policy: KeyPolicy::Strict,
        };
        assert_eq!(root(schema), expected);
    }

    #[test]
    fn optional_wraps_the_compiled_inner_schema() {
        let node = root(Schema::map([("side", optional(Kind::String))]));
        let Node::MapOf { entries, .. } = node else { panic!("expected a map node") };
        assert_eq!(entries[0], Node::Optional(Box::new(Node::kind(Kind::String))));
    }

    #[test]
    fn indifferent_access_sets_the_key_policy() {
        let compiled = compile(&Schema::map([("foo", 1)]), &Options::default().with_indifferent_access());
        assert!(matches!(
            compiled.root(),
            Node::MapOf { policy: KeyPolicy::Indifferent, .. }
        ));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: Options = serde_json::from_str("{}").unwrap();
        assert!(!opts.indifferent_access);
        let opts: Options = serde_json::from_str(r#"{"indifferent_access": true}"#).unwrap();
        assert_eq!(opts.key_policy(), KeyPolicy::Indifferent);
    }
}
