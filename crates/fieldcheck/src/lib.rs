//! # fieldcheck
//!
//! Declarative field validation. Attach rules to the fields of a type, run
//! the engine over an instance, and read back which fields broke which
//! constraints.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldcheck::{Engine, Validate};
//!
//! #[derive(Validate)]
//! struct Users {
//!     #[validate(rename = "UserID", required, size(min = 5, max = 100), input = "email")]
//!     user_id: Option<String>,
//!
//!     #[validate(rename = "UserName", required, size(min = 1, max = 8))]
//!     user_name: Option<String>,
//! }
//!
//! let mut engine = Engine::new();
//! engine.validate(&users)?;
//! for line in engine.report().lines() {
//!     println!("{line}");
//! }
//! ```
//!
//! ## Rules
//!
//! A [`Rule`] combines up to five constraints: `required`, a size range, a
//! numeric value range and an [`InputClass`]. A failed `required` check is
//! reported alone; the other checks are independent and their
//! [`Violation`]s accumulate in a [`ViolationSet`].
//!
//! ## Registering rules
//!
//! - `#[derive(Validate)]` reads `#[validate(...)]` field attributes
//! - [`Schema`] registers rules against accessor closures at runtime
//! - [`RuleBook`] loads rules from TOML and applies them to JSON records

pub mod engine;
pub mod error;
pub mod input_class;
pub mod report;
pub mod rule;
pub mod rulebook;
pub mod schema;
pub mod value;
pub mod violation;

// Re-export derive macro
pub use fieldcheck_macro::Validate;

pub use engine::{validate, Engine};
pub use error::{ConfigError, SchemaError};
pub use input_class::{InputClass, UnknownInputClass};
pub use report::{FieldOutcome, ValidationReport};
pub use rule::Rule;
pub use rulebook::{BoundRecord, RuleBook};
pub use schema::{BoundSchema, FieldVisitor, Schema, Validatable};
pub use value::{AsFieldValue, FieldRead, FieldValue, ReadError};
pub use violation::{Violation, ViolationSet};

/// Support items for `#[derive(Validate)]`; not a stable API
#[doc(hidden)]
pub mod __private {
    pub use crate::schema::{read_computed, read_field};
}
