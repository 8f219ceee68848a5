//! # petschema
//!
//! A typed `Pet` record backed by a declarative schema. Dynamic input (JSON
//! values, deserialized documents, loosely typed arguments) is validated
//! field by field at construction time; failures are reported as a single
//! [`ValidationError`] listing every offending field, its expected type and
//! the value that was received.
//!
//! ## Quick Start
//!
//! ```rust
//! use petschema::*;
//! use serde_json::json;
//!
//! # fn example() -> Result<()> {
//! let rex = Pet::try_new("Rex", 3, 12, true)?;
//! assert_eq!(rex.weight(), 12.0);
//!
//! let err = Pet::from_value(&json!({
//!     "name": "Rex",
//!     "age": "five",
//!     "weight": 12.0,
//!     "is_vaccinated": true
//! }))
//! .unwrap_err();
//! assert!(err.has_field("age"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod core;
pub mod error;
pub mod types;
pub mod validation;

pub use crate::core::{UnknownFieldPolicy, ValidationConfig};
pub use error::Result;
pub use error::{PetSchemaError, ValidationError};
pub use types::*;
pub use validation::{
    FieldValues, IssueCode, ModelValidationEngine, ValidationContext, ValidationEngine,
    ValidationIssue, ValidationResult, ValidationSeverity,
};
