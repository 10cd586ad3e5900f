// Compiled schema tree. Immutable once built; comparisons only read it.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::schema::{Interval, Kind, Pattern};
use crate::value::{Key, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Atom(Predicate),
    ArrayOf(Box<Node>),
    MapOf {
        entries: IndexMap<Key, Node>, // schema-declared order
        policy: KeyPolicy,
    },
    Alternatives(Vec<Node>),
    /// Only meaningful as a `MapOf` entry value.
    Optional(Box<Node>),
}

/// The single test an `Atom` applies, fixed at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equal(Value),
    Kind(Kind),
    Pattern(Pattern),
    Range(Interval),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    #[default]
    Strict,
    /// Symbol keys and string keys with the same text are the same key.
    Indifferent,
}

impl Predicate {
    pub fn test(&self, actual: &Value) -> bool {
        match self {
            Predicate::Equal(expected) => expected == actual,
            Predicate::Kind(kind) => kind.contains(actual),
            Predicate::Pattern(pattern) => pattern.is_match(actual),
            Predicate::Range(interval) => interval.contains(actual),
        }
    }
}

impl KeyPolicy {
    pub fn normalize<'k>(self, key: &'k Key) -> Cow<'k, Key> {
        match self {
            KeyPolicy::Strict => Cow::Borrowed(key),
            KeyPolicy::Indifferent => key.indifferent(),
        }
    }
}

impl Node {
    pub fn kind(kind: Kind) -> Self {
        Node::Atom(Predicate::Kind(kind))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Node::Optional(_))
    }

    /// The schema a present map value is compared against.
    pub fn unwrap_optional(&self) -> &Node {
        match self {
            Node::Optional(inner) => inner,
            other => other,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// RENDERING
// ————————————————————————————————————————————————————————————————————————————

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equal(v) => write!(f, "{v}"),
            Predicate::Kind(k) => f.write_str(k.name()),
            Predicate::Pattern(p) => write!(f, "{p}"),
            Predicate::Range(r) => write!(f, "{r}"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    f.write_str("[")?;
    for (i, n) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{n}")?;
    }
    f.write_str("]")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Atom(p) => write!(f, "{p}"),
            Node::ArrayOf(element) => write!(f, "[{element}]"),
            Node::MapOf { entries, .. } => {
                f.write_str("{")?;
                for (i, (k, n)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} => {n}")?;
                }
                f.write_str("}")
            }
            Node::Alternatives(members) => write_list(f, members),
            Node::Optional(inner) => write!(f, "optional({inner})"),
        }
    }
}
