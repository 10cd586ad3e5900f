//! Check dynamic, nested data against compact schema descriptions and
//! explain the first place where they disagree.
//!
//! ```
//! use conform::{optional, Kind, Options, Pattern, Schema, Validator, Value};
//!
//! let schema = Schema::map([
//!     ("foo", Schema::seq([Schema::map([
//!         ("bar", Schema::seq([Schema::from(Kind::Number), Pattern::new(r"\d+").unwrap().into()])),
//!     ])])),
//!     ("baz", optional(0..=3)),
//! ]);
//! let data = Value::map([("foo", Value::seq([Value::map([("bar", "123")])]))]);
//! assert!(Validator::new(&data, &schema, Options::default()).is_valid());
//! ```

pub mod compare;
pub mod compiler;
pub mod error;
pub mod matcher;
pub mod mismatch;
pub mod node;
pub mod path_de;
pub mod schema;
pub mod validator;
pub mod value;

pub use compare::{compare, Comparison};
pub use compiler::{compile, CompiledSchema, Compiler, Options};
pub use error::{LoadError, PatternError};
pub use matcher::{conform_to_schema, ConformToSchema};
pub use mismatch::{Mismatch, Segment};
pub use node::{KeyPolicy, Node, Predicate};
pub use schema::{optional, Interval, Kind, Pattern, Schema};
pub use validator::Validator;
pub use value::{Key, Value};
