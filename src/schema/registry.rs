use std::collections::HashMap;

use super::types::TypeSchema;

/// Immutable catalog of type descriptors keyed by type name.
///
/// Resource types, datatypes, and backbone elements all live in the same
/// namespace; contained-resource dispatch is a plain lookup by the
/// `resourceType` tag. The registry is built once and then only read, so it
/// can be shared across threads behind an `Arc` without coordination.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, TypeSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its own name.
    ///
    /// A later registration for the same name replaces the earlier one.
    pub fn register(&mut self, schema: TypeSchema) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeSchema> {
        self.schemas.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterate over registered type names, for diagnostics.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{ElementSchema, PrimitiveType};

    #[test]
    fn lookup_by_type_name() {
        let mut registry = SchemaRegistry::new();
        registry.register(
            TypeSchema::new("Coding")
                .with_element(ElementSchema::primitive("system", PrimitiveType::Uri))
                .with_element(ElementSchema::primitive("code", PrimitiveType::Code)),
        );

        assert!(registry.contains("Coding"));
        assert!(!registry.contains("Quantity"));
        assert_eq!(registry.get("Coding").unwrap().elements.len(), 2);
    }

    #[test]
    fn reregistration_replaces() {
        let mut registry = SchemaRegistry::new();
        registry.register(TypeSchema::new("Coding"));
        registry.register(
            TypeSchema::new("Coding")
                .with_element(ElementSchema::primitive("code", PrimitiveType::Code)),
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Coding").unwrap().elements.len(), 1);
    }
}
