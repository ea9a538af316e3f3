//! The validation engine.
//!
//! A depth-first walker over the schema-declared field tree of a resource.
//! Each node dispatches its leaves and groups to the check battery declared
//! by the type descriptor: required-field cardinality, oneof population,
//! primitive formats, reference targets, then cross-field semantic rules
//! once the node's children have been visited. Violations accumulate across
//! the whole traversal; the error reporter raises once at the end.

pub mod oneof;
pub mod primitive;
pub mod reference;
pub mod semantic;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{ErrorKind, Result, ValidationError, report};
use crate::schema::{ElementKind, ElementSchema, SchemaRegistry, TypeSchema};

/// Defensive bound on traversal depth. The schema tree is acyclic, so this
/// is unreachable for catalog-conforming input.
const MAX_DEPTH: usize = 128;

/// Schema-driven resource validator.
///
/// Stateless and re-entrant: one validator can serve concurrent callers,
/// sharing only the read-only registry.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<SchemaRegistry>,
    fail_fast: bool,
}

struct ValidationContext {
    path: String,
    errors: Vec<ValidationError>,
    fail_fast: bool,
}

impl ValidationContext {
    fn new(fail_fast: bool) -> Self {
        Self {
            path: String::new(),
            errors: Vec::new(),
            fail_fast,
        }
    }

    fn add_error(&mut self, kind: ErrorKind, message: String) {
        self.errors.push(ValidationError::new(kind, self.path.clone(), message));
    }

    fn add_error_at(&mut self, kind: ErrorKind, suffix: &str, message: String) {
        let path = format!("{}.{}", self.path, suffix);
        self.errors.push(ValidationError::new(kind, path, message));
    }

    /// In fail-fast mode the first violation ends the traversal.
    fn done(&self) -> bool {
        self.fail_fast && !self.errors.is_empty()
    }
}

impl Validator {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            fail_fast: false,
        }
    }

    /// Stop at the first violation instead of batching the full set.
    pub fn fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Validate a materialized resource against its type's descriptor.
    ///
    /// Returns normally when the traversal produces no violations; otherwise
    /// fails with one error carrying every violation in traversal order. The
    /// input is never mutated.
    pub fn validate(&self, resource: &Value) -> Result<()> {
        let mut ctx = ValidationContext::new(self.fail_fast);
        self.validate_root(&mut ctx, resource);
        tracing::debug!(errors = ctx.errors.len(), "validation traversal complete");
        report(ctx.errors)
    }

    fn validate_root(&self, ctx: &mut ValidationContext, resource: &Value) {
        let Some(node) = resource.as_object() else {
            ctx.path = "Resource".to_string();
            ctx.add_error(
                ErrorKind::MissingRequiredField,
                "resource must be a JSON object".to_string(),
            );
            return;
        };

        let type_tag = node.get("resourceType").and_then(Value::as_str);
        let Some(schema) = type_tag.and_then(|t| self.registry.get(t)) else {
            // The catalog is a closed set; a tag outside it is not this
            // engine's contract to reject. Unknown is not invalid.
            tracing::warn!(resource_type = ?type_tag, "no descriptor for resource type, skipping");
            return;
        };

        tracing::debug!(resource_type = %schema.name, "validating resource");
        ctx.path = schema.name.clone();
        self.walk_node(ctx, node, schema, 0);
    }

    /// Visit one composite node: fields in declaration order, then oneof
    /// groups, then the type's cross-field checks.
    fn walk_node(
        &self,
        ctx: &mut ValidationContext,
        node: &Map<String, Value>,
        schema: &TypeSchema,
        depth: usize,
    ) {
        if depth > MAX_DEPTH {
            tracing::warn!(path = %ctx.path, "traversal depth bound reached, not descending");
            return;
        }

        for element in &schema.elements {
            if ctx.done() {
                return;
            }
            self.check_field(ctx, node, element, depth);
        }

        for group in &schema.oneofs {
            if ctx.done() {
                return;
            }
            if let Some(violation) = oneof::check_oneof(node, group) {
                ctx.add_error_at(violation.kind(), &group.name, violation.message(group));
            }
        }

        // Semantic rules run last, after every child of this node has been
        // visited.
        for check in &schema.checks {
            if ctx.done() {
                return;
            }
            if let Some(violation) = semantic::run_check(check, node) {
                ctx.add_error(violation.kind, violation.message);
            }
        }
    }

    fn check_field(
        &self,
        ctx: &mut ValidationContext,
        node: &Map<String, Value>,
        element: &ElementSchema,
        depth: usize,
    ) {
        let value = node.get(&element.name);
        if !oneof::is_populated(value) {
            if element.required {
                ctx.add_error_at(
                    ErrorKind::MissingRequiredField,
                    &element.name,
                    format!("required field {} has no populated element", element.name),
                );
            }
            // Absent optional fields are never entered; their declared
            // child constraints are not evaluated.
            return;
        }
        let value = value.unwrap_or(&Value::Null);

        let saved = ctx.path.len();
        ctx.path.push('.');
        ctx.path.push_str(&element.name);

        if element.repeated {
            match value.as_array() {
                Some(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if ctx.done() {
                            break;
                        }
                        let item_saved = ctx.path.len();
                        ctx.path.push_str(&format!("[{index}]"));
                        self.check_element(ctx, item, element, depth);
                        ctx.path.truncate(item_saved);
                    }
                }
                None => ctx.add_error(
                    ErrorKind::MissingRequiredField,
                    format!("repeated field {} must be a JSON array", element.name),
                ),
            }
        } else if value.is_array() {
            ctx.add_error(
                ErrorKind::MissingRequiredField,
                format!("singular field {} must not be a JSON array", element.name),
            );
        } else {
            self.check_element(ctx, value, element, depth);
        }

        ctx.path.truncate(saved);
    }

    /// Dispatch a single present element to the validator its kind declares.
    fn check_element(
        &self,
        ctx: &mut ValidationContext,
        value: &Value,
        element: &ElementSchema,
        depth: usize,
    ) {
        match &element.kind {
            ElementKind::Primitive(primitive) => {
                if let Err(message) = primitive::validate_primitive(value, *primitive) {
                    ctx.add_error(ErrorKind::InvalidPrimitive, message);
                }
            }
            ElementKind::Composite(type_name) => {
                let Some(node) = value.as_object() else {
                    ctx.add_error(
                        ErrorKind::InvalidPrimitive,
                        format!("expected a JSON object for {type_name}"),
                    );
                    return;
                };
                match self.registry.get(type_name) {
                    Some(schema) => self.walk_node(ctx, node, schema, depth + 1),
                    None => {
                        tracing::debug!(%type_name, "no descriptor for composite type, skipping")
                    }
                }
            }
            ElementKind::Reference(allowed) => {
                let Some(node) = value.as_object() else {
                    ctx.add_error(
                        ErrorKind::InvalidPrimitive,
                        "expected a JSON object for Reference".to_string(),
                    );
                    return;
                };
                if let Err(message) = reference::validate_reference(value, allowed) {
                    ctx.add_error(ErrorKind::InvalidReference, message);
                }
                // The Reference shape itself (display, identifier, ...) is
                // still walked like any composite.
                if let Some(schema) = self.registry.get("Reference") {
                    self.walk_node(ctx, node, schema, depth + 1);
                }
            }
            ElementKind::Resource => self.check_contained(ctx, value, depth),
        }
    }

    /// A nested resource is an independent validation unit dispatched by its
    /// own `resourceType` tag.
    fn check_contained(&self, ctx: &mut ValidationContext, value: &Value, depth: usize) {
        let Some(node) = value.as_object() else {
            ctx.add_error(
                ErrorKind::MissingRequiredField,
                "contained resource must be a JSON object".to_string(),
            );
            return;
        };
        let type_tag = node.get("resourceType").and_then(Value::as_str);
        match type_tag.and_then(|t| self.registry.get(t)) {
            Some(schema) => self.walk_node(ctx, node, schema, depth + 1),
            None => {
                tracing::debug!(
                    resource_type = ?type_tag,
                    "no descriptor for contained resource type, skipping"
                );
            }
        }
    }
}
