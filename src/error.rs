use std::fmt;

use thiserror::Error;

/// Stable discriminator for a single validation failure.
///
/// Every violation the engine can produce maps to exactly one of these
/// kinds; callers that only care about valid/invalid can ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A schema-required field has no populated element, or a field has the
    /// wrong shape for its declared cardinality.
    MissingRequiredField,
    /// A primitive literal does not satisfy its type's format rule.
    InvalidPrimitive,
    /// A reference targets a type outside the field's allow-list, or its
    /// literal cannot be parsed.
    InvalidReference,
    /// A required oneof group has no populated member.
    EmptyOneof,
    /// A oneof group has more than one populated member.
    AmbiguousOneof,
    /// An interval's start exceeds its end after precision truncation.
    InvalidPeriod,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingRequiredField => "missing-required-field",
            ErrorKind::InvalidPrimitive => "invalid-primitive",
            ErrorKind::InvalidReference => "invalid-reference",
            ErrorKind::EmptyOneof => "empty-oneof",
            ErrorKind::AmbiguousOneof => "ambiguous-oneof",
            ErrorKind::InvalidPeriod => "invalid-period",
        };
        f.write_str(name)
    }
}

/// A single violation found during traversal.
///
/// `path` locates the offending field in the resource tree, with repeated
/// elements indexed (`Encounter.episodeOfCare[1].reference`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.kind, self.path, self.message)
    }
}

/// The single error a failed validation surfaces.
///
/// Carries every violation found during the traversal, in traversal order.
/// Constructed only by the error reporter once traversal completes; an empty
/// violation list never becomes an `InvalidFhirError`.
#[derive(Debug, Clone, Error)]
#[error("invalid FHIR resource: {}", summarize(.errors))]
pub struct InvalidFhirError {
    pub errors: Vec<ValidationError>,
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors.len() {
        1 => errors[0].to_string(),
        n => format!("{} (and {} more)", errors[0], n - 1),
    }
}

impl InvalidFhirError {
    /// First violation in traversal order.
    ///
    /// The list is never empty by construction.
    pub fn first(&self) -> &ValidationError {
        &self.errors[0]
    }

    /// True if any violation carries the given kind.
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}

/// Report accumulated violations as the engine's final outcome.
///
/// Returns normally when the list is empty; otherwise raises one error
/// carrying the full list in traversal order.
pub fn report(errors: Vec<ValidationError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(InvalidFhirError { errors })
    }
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, InvalidFhirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_empty_is_ok() {
        assert!(report(Vec::new()).is_ok());
    }

    #[test]
    fn report_keeps_traversal_order() {
        let errors = vec![
            ValidationError::new(
                ErrorKind::MissingRequiredField,
                "Observation.status",
                "missing",
            ),
            ValidationError::new(ErrorKind::InvalidPrimitive, "Observation.issued", "bad instant"),
        ];
        let err = report(errors).unwrap_err();
        assert_eq!(err.errors.len(), 2);
        assert_eq!(err.first().kind, ErrorKind::MissingRequiredField);
        assert!(err.has_kind(ErrorKind::InvalidPrimitive));
        assert!(!err.has_kind(ErrorKind::InvalidPeriod));
    }

    #[test]
    fn display_includes_path_and_count() {
        let err = report(vec![
            ValidationError::new(ErrorKind::EmptyOneof, "Observation.value", "no member populated"),
            ValidationError::new(ErrorKind::InvalidPeriod, "Encounter.period", "start after end"),
        ])
        .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("empty-oneof"));
        assert!(text.contains("Observation.value"));
        assert!(text.contains("1 more"));
    }
}
