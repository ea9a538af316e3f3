//! Reference target validation.
//!
//! Checks the target type of a Reference composite against the allow-list
//! declared on the referring element. Only typing is decided here; whether
//! the target actually exists is storage's concern, not the engine's.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Resource type names are a closed alphabet; anything else in the type
/// position means the literal is not a typed reference.
static RESOURCE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][A-Za-z]+$").unwrap_or_else(|e| panic!("invalid resource name rule: {e}"))
});

/// Where a reference literal points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceTarget {
    /// Relative or absolute reference with a resolvable type tag
    /// (`Patient/123`, `https://fhir.example.org/Patient/123`).
    Typed(String),
    /// Fragment reference to a contained resource (`#medication`).
    Contained(String),
    /// Parseable literal with no type tag (`urn:uuid:...`, bare URLs).
    Untyped,
}

/// Parse a reference literal into its target classification.
pub fn parse_reference(literal: &str) -> Result<ReferenceTarget, String> {
    if literal.is_empty() {
        return Err("reference literal is empty".to_string());
    }

    if let Some(id) = literal.strip_prefix('#') {
        if id.is_empty() {
            return Err("contained reference has no id".to_string());
        }
        return Ok(ReferenceTarget::Contained(id.to_string()));
    }

    if literal.starts_with("urn:") {
        return Ok(ReferenceTarget::Untyped);
    }

    let is_absolute = literal.contains("://");
    let segments: Vec<&str> = literal.split('/').filter(|s| !s.is_empty()).collect();

    // Versioned references keep the type two positions further back:
    // Patient/123/_history/2.
    let type_index = if segments.len() >= 4 && segments[segments.len() - 2] == "_history" {
        segments.len().checked_sub(4)
    } else if segments.len() >= 2 {
        segments.len().checked_sub(2)
    } else {
        None
    };

    match type_index {
        Some(i) if RESOURCE_NAME.is_match(segments[i]) => {
            Ok(ReferenceTarget::Typed(segments[i].to_string()))
        }
        _ if is_absolute => Ok(ReferenceTarget::Untyped),
        _ => Err(format!("cannot parse reference \"{literal}\"")),
    }
}

/// Validate one Reference composite against an allow-list.
///
/// Display-only references (no `reference` literal) are accepted, as are
/// fragment references to contained resources. An allow-list that is empty
/// or names `Resource` accepts any resolvable target. Non-string `reference`
/// values are left for the structural walk over the Reference shape.
pub fn validate_reference(value: &Value, allowed: &[String]) -> Result<(), String> {
    let Some(literal) = value.get("reference").and_then(Value::as_str) else {
        return Ok(());
    };

    match parse_reference(literal)? {
        ReferenceTarget::Contained(_) => Ok(()),
        ReferenceTarget::Typed(target) => {
            if accepts_any(allowed) || allowed.iter().any(|t| t == &target) {
                Ok(())
            } else {
                Err(format!(
                    "reference to {target} not allowed here (expected one of: {})",
                    allowed.join(", ")
                ))
            }
        }
        ReferenceTarget::Untyped => {
            if accepts_any(allowed) {
                Ok(())
            } else {
                Err(format!("cannot resolve target type of \"{literal}\""))
            }
        }
    }
}

fn accepts_any(allowed: &[String]) -> bool {
    allowed.is_empty() || allowed.iter().any(|t| t == "Resource")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn allow(types: &[&str]) -> Vec<String> {
        types.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn relative_reference_resolves_type() {
        assert_eq!(
            parse_reference("Patient/123").unwrap(),
            ReferenceTarget::Typed("Patient".to_string())
        );
    }

    #[test]
    fn absolute_reference_resolves_type() {
        assert_eq!(
            parse_reference("https://fhir.example.org/base/Patient/123").unwrap(),
            ReferenceTarget::Typed("Patient".to_string())
        );
    }

    #[test]
    fn versioned_reference_resolves_type() {
        assert_eq!(
            parse_reference("Patient/123/_history/2").unwrap(),
            ReferenceTarget::Typed("Patient".to_string())
        );
    }

    #[test]
    fn fragment_and_urn_targets() {
        assert_eq!(
            parse_reference("#med1").unwrap(),
            ReferenceTarget::Contained("med1".to_string())
        );
        assert_eq!(
            parse_reference("urn:uuid:c757873d-ec9a-4326-a141-556f43239520").unwrap(),
            ReferenceTarget::Untyped
        );
    }

    #[test]
    fn bare_word_is_malformed() {
        assert!(parse_reference("notareference").is_err());
        assert!(parse_reference("").is_err());
        assert!(parse_reference("#").is_err());
    }

    #[test]
    fn allow_list_membership() {
        let value = json!({"reference": "Patient/123"});
        assert!(validate_reference(&value, &allow(&["Patient", "Group"])).is_ok());
        assert!(validate_reference(&value, &allow(&["Practitioner"])).is_err());
        assert!(validate_reference(&value, &allow(&["Resource"])).is_ok());
        assert!(validate_reference(&value, &[]).is_ok());
    }

    #[test]
    fn untyped_target_needs_open_allow_list() {
        let value = json!({"reference": "urn:uuid:c757873d-ec9a-4326-a141-556f43239520"});
        assert!(validate_reference(&value, &allow(&["Patient"])).is_err());
        assert!(validate_reference(&value, &allow(&["Resource"])).is_ok());
    }

    #[test]
    fn display_only_reference_is_accepted() {
        let value = json!({"display": "Dr. Example"});
        assert!(validate_reference(&value, &allow(&["Practitioner"])).is_ok());
    }
}
