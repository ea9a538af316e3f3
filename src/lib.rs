//! # FHIR Resource Validation
//!
//! Schema-driven structural and semantic validation for FHIR resources.
//! A resource materialized as JSON is walked depth-first against its type's
//! descriptor, and every field is dispatched to a fixed check battery:
//!
//! - required-field cardinality
//! - oneof (choice) group population
//! - primitive format rules
//! - reference target allow-lists
//! - cross-field semantic rules such as Period interval ordering
//!
//! Violations are batched across the whole traversal so one failure reports
//! every independent problem. The engine performs no I/O, never mutates its
//! input, and treats fields an older catalog does not recognize as valid.
//!
//! ## Quick Start
//!
//! ```rust
//! use fhir_validation::{ErrorKind, validate_resource};
//! use serde_json::json;
//!
//! let observation = json!({
//!     "resourceType": "Observation",
//!     "status": "final",
//!     "code": {"text": "glucose"},
//!     "valueQuantity": {"value": 6.3, "unit": "mmol/L"}
//! });
//! assert!(validate_resource(&observation).is_ok());
//!
//! let missing_status = json!({
//!     "resourceType": "Observation",
//!     "code": {"text": "glucose"},
//!     "valueBoolean": true
//! });
//! let err = validate_resource(&missing_status).unwrap_err();
//! assert!(err.has_kind(ErrorKind::MissingRequiredField));
//! ```
//!
//! Custom catalogs plug in through [`SchemaRegistry`] and [`Validator`]:
//! descriptors are declarative data, so new resource types and semantic
//! rules extend the catalog rather than the walker.

pub mod error;
pub mod schema;
pub mod validation;

pub use error::{ErrorKind, InvalidFhirError, Result, ValidationError};
pub use schema::{
    ElementKind, ElementSchema, OneofGroup, PrimitiveType, SchemaRegistry, SemanticCheck,
    TypeSchema, base_registry, default_registry,
};
pub use validation::Validator;
pub use validation::semantic::{DateTimePrecision, FhirInstant};

use serde_json::Value;

/// Validate a resource against the built-in descriptor catalog.
///
/// Convenience entry point over [`Validator`] with [`default_registry`].
pub fn validate_resource(resource: &Value) -> Result<()> {
    Validator::new(default_registry()).validate(resource)
}
