//! Located mismatches and their messages.

use std::borrow::Cow;
use std::fmt;

use crate::node::Node;
use crate::value::{Key, Value};

/// One step from the comparison root towards a mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(Key),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(&k.text()),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Key(Key::from(s))
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

/// A single point where the actual value diverges from the schema.
///
/// `location` runs from the root of the comparison to the diverging value.
/// `verb` overrides the default "match <expected> but got <actual>" wording.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub actual: Value,
    pub expected: Node,
    pub location: Vec<Segment>,
    pub verb: Option<String>,
}

impl Mismatch {
    pub fn new(actual: Value, expected: Node, location: Vec<Segment>) -> Self {
        Self { actual, expected, location, verb: None }
    }

    pub fn with_verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    /// `/foo/1/bar`; the root is `/`.
    pub fn pointer(&self) -> String {
        let parts: Vec<String> = self.location.iter().map(ToString::to_string).collect();
        format!("/{}", parts.join("/"))
    }

    pub fn verb(&self) -> Cow<'_, str> {
        match &self.verb {
            Some(verb) => Cow::Borrowed(verb),
            None => Cow::Owned(format!(
                "match\n\t{}\nbut got\n\t{}",
                self.expected, self.actual
            )),
        }
    }

    pub fn message(&self) -> String {
        format!("expected {} to {}", self.pointer(), self.verb())
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
