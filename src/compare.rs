//! Recursive comparison of a value against a compiled node tree.
//!
//! Reporting rules:
//! - a wrong structural kind (non-sequence for `ArrayOf`, non-map for `MapOf`)
//!   is one mismatch and ends the comparison of that subtree;
//! - a wrong key set is one aggregate mismatch and suppresses value checks;
//! - a failed `Alternatives` is one mismatch naming every member; whatever the
//!   members reported while being probed is dropped.
//!
//! Mismatches come out depth-first: map entries in schema-declared order,
//! sequence elements by ascending index.

use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};

use crate::mismatch::{Mismatch, Segment};
use crate::node::{KeyPolicy, Node};
use crate::schema::Kind;
use crate::value::{Key, Value};

/// Outcome of comparing one value against one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    mismatches: Vec<Mismatch>,
}

impl Comparison {
    pub fn matches(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn first(&self) -> Option<&Mismatch> {
        self.mismatches.first()
    }

    pub fn into_mismatches(self) -> Vec<Mismatch> {
        self.mismatches
    }
}

pub fn compare(node: &Node, actual: &Value) -> Comparison {
    let mut walk = Walk::default();
    walk.visit(node, actual);
    Comparison { mismatches: walk.mismatches }
}

// ————————————————————————————————————————————————————————————————————————————
// WALK
// ————————————————————————————————————————————————————————————————————————————

#[derive(Default)]
struct Walk {
    path: Vec<Segment>,
    mismatches: Vec<Mismatch>,
}

impl Walk {
    fn visit(&mut self, node: &Node, actual: &Value) {
        match node {
            Node::Atom(predicate) => {
                if !predicate.test(actual) {
                    self.report(actual, node, None);
                }
            }
            Node::ArrayOf(element) => self.visit_array(element, actual),
            Node::MapOf { entries, policy } => self.visit_map(node, entries, *policy, actual),
            Node::Alternatives(members) => {
                // probes run on their own walk, so nothing they find leaks out
                if !members.iter().any(|member| compare(member, actual).matches()) {
                    self.report(actual, node, None);
                }
            }
            // nothing satisfies an optional marker outside a map entry
            Node::Optional(_) => self.report(actual, node, None),
        }
    }

    fn report(&mut self, actual: &Value, expected: &Node, verb: Option<String>) {
        let mismatch = Mismatch::new(actual.clone(), expected.clone(), self.path.clone());
        self.mismatches.push(match verb {
            Some(verb) => mismatch.with_verb(verb),
            None => mismatch,
        });
    }

    fn report_kind(&mut self, actual: &Value, wanted: Kind) {
        let verb = format!("be {}, but got {}", wanted.described(), actual.kind().described());
        self.report(actual, &Node::kind(wanted), Some(verb));
    }

    fn visit_array(&mut self, element: &Node, actual: &Value) {
        let Value::Seq(items) = actual else {
            self.report_kind(actual, Kind::Sequence);
            return;
        };
        for (i, item) in items.iter().enumerate() {
            self.path.push(Segment::Index(i));
            self.visit(element, item);
            self.path.pop();
        }
    }

    fn visit_map(
        &mut self,
        node: &Node,
        entries: &IndexMap<Key, Node>,
        policy: KeyPolicy,
        actual: &Value,
    ) {
        let Value::Map(fields) = actual else {
            self.report_kind(actual, Kind::Map);
            return;
        };

        // normalized actual key → every value filed under it
        let mut present: IndexMap<Cow<'_, Key>, Vec<&Value>> = IndexMap::new();
        for (key, value) in fields {
            present.entry(policy.normalize(key)).or_default().push(value);
        }
        let declared: IndexSet<Cow<'_, Key>> =
            entries.keys().map(|key| policy.normalize(key)).collect();

        let missing: Vec<&Key> = entries
            .iter()
            .filter(|(key, schema)| {
                !schema.is_optional() && !present.contains_key(&policy.normalize(key))
            })
            .map(|(key, _)| key)
            .collect();
        let extra: Vec<&Key> = fields
            .keys()
            .filter(|key| !declared.contains(&policy.normalize(key)))
            .collect();

        if !missing.is_empty() || !extra.is_empty() {
            self.report(actual, node, Some(keyset_verb(&missing, &extra)));
            return;
        }

        for (key, schema) in entries {
            // absent optional entries have nothing to compare
            let Some(values) = present.get(&policy.normalize(key)) else { continue };
            for value in values {
                self.path.push(Segment::Key(key.clone()));
                self.visit(schema.unwrap_optional(), value);
                self.path.pop();
            }
        }
    }
}

fn keyset_verb(missing: &[&Key], extra: &[&Key]) -> String {
    let mut verb = String::from("have a different set of keys");
    if !missing.is_empty() {
        verb.push_str("\nmissing keys were:");
        for key in missing {
            verb.push_str(&format!("\n\t{key}"));
        }
    }
    if !extra.is_empty() {
        verb.push_str("\nextra keys were:");
        for key in extra {
            verb.push_str(&format!("\n\t{key}"));
        }
    }
    verb
}

// ------------------------------- Tests ------------------------------------ //
