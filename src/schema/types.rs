use serde::{Deserialize, Serialize};

/// Primitive datatype kinds with format rules.
///
/// The set mirrors the FHIR primitive catalog; kinds the format table does
/// not know are treated as always-valid so a newer schema can declare
/// primitives an older engine has no rule for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveType {
    Boolean,
    Integer,
    UnsignedInt,
    PositiveInt,
    Decimal,
    String,
    Code,
    Id,
    Uri,
    Oid,
    Base64Binary,
    Date,
    DateTime,
    Instant,
    Time,
    Markdown,
}

/// What a field slot holds and which validator applies to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    /// Leaf literal checked by the primitive validator.
    Primitive(PrimitiveType),
    /// Nested datatype or backbone element; the name keys into the registry.
    Composite(String),
    /// Reference composite; the list is the allowed target resource types.
    /// `["Resource"]` accepts any resolvable target.
    Reference(Vec<String>),
    /// Slot holding an independent resource, dispatched by its own
    /// `resourceType` tag (Bundle entries, contained resources).
    Resource,
}

/// Descriptor for one named field of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSchema {
    pub name: String,
    pub kind: ElementKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub repeated: bool,
}

impl ElementSchema {
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            repeated: false,
        }
    }

    pub fn primitive(name: impl Into<String>, primitive: PrimitiveType) -> Self {
        Self::new(name, ElementKind::Primitive(primitive))
    }

    pub fn composite(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Composite(type_name.into()))
    }

    pub fn reference<S: Into<String>>(
        name: impl Into<String>,
        targets: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            name,
            ElementKind::Reference(targets.into_iter().map(Into::into).collect()),
        )
    }

    pub fn resource(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Resource)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

/// A schema-declared set of mutually exclusive sibling fields.
///
/// A required group must have exactly one populated member; an optional
/// group allows zero or one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneofGroup {
    pub name: String,
    pub members: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

impl OneofGroup {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        members: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Named cross-field rule attached to a type descriptor.
///
/// Checks are declarative data consulted by the walker after a node's
/// children have been visited; new rules are new variants, not branches
/// inside the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "check")]
pub enum SemanticCheck {
    /// Interval ordering: `start` must not exceed `end` once both are
    /// truncated to the coarser of their two precisions.
    PeriodOrder { start: String, end: String },
}

/// Descriptor for one resource type, datatype, or backbone element.
///
/// Backbone elements are registered under `Outer.Inner` names
/// (`Bundle.Entry`, `Encounter.Participant`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSchema {
    pub name: String,
    #[serde(default)]
    pub elements: Vec<ElementSchema>,
    #[serde(default)]
    pub oneofs: Vec<OneofGroup>,
    #[serde(default)]
    pub checks: Vec<SemanticCheck>,
}

impl TypeSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
            oneofs: Vec::new(),
            checks: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: ElementSchema) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_oneof(mut self, group: OneofGroup) -> Self {
        self.oneofs.push(group);
        self
    }

    pub fn with_check(mut self, check: SemanticCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn element(&self, name: &str) -> Option<&ElementSchema> {
        self.elements.iter().find(|e| e.name == name)
    }
}
