//! Oneof group enforcement.
//!
//! A oneof group is a schema-declared set of mutually exclusive sibling
//! fields. Required groups must have exactly one populated member; optional
//! groups allow zero or one. Population means present, non-null, and for
//! arrays non-empty.

use serde_json::{Map, Value};

use crate::error::ErrorKind;
use crate::schema::OneofGroup;

/// Outcome of checking one group against one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneofViolation {
    Empty,
    Ambiguous { populated: Vec<String> },
}

impl OneofViolation {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OneofViolation::Empty => ErrorKind::EmptyOneof,
            OneofViolation::Ambiguous { .. } => ErrorKind::AmbiguousOneof,
        }
    }

    pub fn message(&self, group: &OneofGroup) -> String {
        match self {
            OneofViolation::Empty => format!(
                "required choice {} has no populated member (one of: {})",
                group.name,
                group.members.join(", ")
            ),
            OneofViolation::Ambiguous { populated } => format!(
                "choice {} has {} populated members: {}",
                group.name,
                populated.len(),
                populated.join(", ")
            ),
        }
    }
}

/// Count populated members of `group` among the node's fields.
pub fn check_oneof(node: &Map<String, Value>, group: &OneofGroup) -> Option<OneofViolation> {
    let populated: Vec<String> = group
        .members
        .iter()
        .filter(|member| is_populated(node.get(member.as_str())))
        .cloned()
        .collect();

    match populated.len() {
        0 if group.required => Some(OneofViolation::Empty),
        0 | 1 => None,
        _ => Some(OneofViolation::Ambiguous { populated }),
    }
}

/// A field counts as populated when it is present, non-null, and not an
/// empty array.
pub fn is_populated(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn value_group(required: bool) -> OneofGroup {
        let group = OneofGroup::new("value", ["valueQuantity", "valueString", "valueBoolean"]);
        if required { group.required() } else { group }
    }

    #[test]
    fn exactly_one_member_is_ok() {
        let n = node(json!({"valueString": "positive"}));
        assert_eq!(check_oneof(&n, &value_group(true)), None);
        assert_eq!(check_oneof(&n, &value_group(false)), None);
    }

    #[test]
    fn empty_required_group_fails() {
        let n = node(json!({"status": "final"}));
        let violation = check_oneof(&n, &value_group(true)).unwrap();
        assert_eq!(violation.kind(), ErrorKind::EmptyOneof);
    }

    #[test]
    fn empty_optional_group_is_ok() {
        let n = node(json!({"status": "final"}));
        assert_eq!(check_oneof(&n, &value_group(false)), None);
    }

    #[test]
    fn multiple_members_fail_either_way() {
        let n = node(json!({"valueString": "positive", "valueBoolean": true}));
        for required in [true, false] {
            let violation = check_oneof(&n, &value_group(required)).unwrap();
            assert_eq!(violation.kind(), ErrorKind::AmbiguousOneof);
            assert!(violation.message(&value_group(required)).contains("valueString"));
        }
    }

    #[test]
    fn null_and_empty_array_do_not_populate() {
        let n = node(json!({"valueString": null, "valueQuantity": []}));
        let violation = check_oneof(&n, &value_group(true)).unwrap();
        assert_eq!(violation.kind(), ErrorKind::EmptyOneof);
    }
}
