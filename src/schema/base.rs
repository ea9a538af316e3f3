//! Built-in descriptor catalog.
//!
//! Covers the base resource types the engine is exercised against
//! (Observation, Encounter, Bundle, Patient) and the datatypes their fields
//! use. Descriptors are declarative data: the walker consults them, it never
//! branches on a resource type by name.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::registry::SchemaRegistry;
use super::types::{ElementSchema, OneofGroup, PrimitiveType, SemanticCheck, TypeSchema};

static DEFAULT_REGISTRY: Lazy<Arc<SchemaRegistry>> = Lazy::new(|| Arc::new(base_registry()));

/// Shared registry with the built-in catalog, built on first use.
pub fn default_registry() -> Arc<SchemaRegistry> {
    Arc::clone(&DEFAULT_REGISTRY)
}

/// Build a fresh registry holding the built-in catalog.
pub fn base_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();

    for schema in datatypes() {
        registry.register(schema);
    }
    registry.register(patient());
    registry.register(observation());
    registry.register(encounter());
    registry.register(encounter_participant());
    registry.register(bundle());
    registry.register(bundle_entry());

    registry
}

fn datatypes() -> Vec<TypeSchema> {
    vec![
        TypeSchema::new("Coding")
            .with_element(ElementSchema::primitive("system", PrimitiveType::Uri))
            .with_element(ElementSchema::primitive("version", PrimitiveType::String))
            .with_element(ElementSchema::primitive("code", PrimitiveType::Code))
            .with_element(ElementSchema::primitive("display", PrimitiveType::String))
            .with_element(ElementSchema::primitive("userSelected", PrimitiveType::Boolean)),
        TypeSchema::new("CodeableConcept")
            .with_element(ElementSchema::composite("coding", "Coding").repeated())
            .with_element(ElementSchema::primitive("text", PrimitiveType::String)),
        TypeSchema::new("Quantity")
            .with_element(ElementSchema::primitive("value", PrimitiveType::Decimal))
            .with_element(ElementSchema::primitive("comparator", PrimitiveType::Code))
            .with_element(ElementSchema::primitive("unit", PrimitiveType::String))
            .with_element(ElementSchema::primitive("system", PrimitiveType::Uri))
            .with_element(ElementSchema::primitive("code", PrimitiveType::Code)),
        TypeSchema::new("Identifier")
            .with_element(ElementSchema::primitive("use", PrimitiveType::Code))
            .with_element(ElementSchema::composite("type", "CodeableConcept"))
            .with_element(ElementSchema::primitive("system", PrimitiveType::Uri))
            .with_element(ElementSchema::primitive("value", PrimitiveType::String)),
        TypeSchema::new("HumanName")
            .with_element(ElementSchema::primitive("use", PrimitiveType::Code))
            .with_element(ElementSchema::primitive("text", PrimitiveType::String))
            .with_element(ElementSchema::primitive("family", PrimitiveType::String))
            .with_element(ElementSchema::primitive("given", PrimitiveType::String).repeated())
            .with_element(ElementSchema::primitive("prefix", PrimitiveType::String).repeated())
            .with_element(ElementSchema::primitive("suffix", PrimitiveType::String).repeated()),
        // The Reference shape itself; target allow-lists live on the
        // referring element, not here.
        TypeSchema::new("Reference")
            .with_element(ElementSchema::primitive("reference", PrimitiveType::String))
            .with_element(ElementSchema::primitive("type", PrimitiveType::Uri))
            .with_element(ElementSchema::composite("identifier", "Identifier"))
            .with_element(ElementSchema::primitive("display", PrimitiveType::String)),
        TypeSchema::new("Period")
            .with_element(ElementSchema::primitive("start", PrimitiveType::DateTime))
            .with_element(ElementSchema::primitive("end", PrimitiveType::DateTime))
            .with_check(SemanticCheck::PeriodOrder {
                start: "start".to_string(),
                end: "end".to_string(),
            }),
    ]
}

fn patient() -> TypeSchema {
    TypeSchema::new("Patient")
        .with_element(ElementSchema::primitive("id", PrimitiveType::Id))
        .with_element(ElementSchema::composite("identifier", "Identifier").repeated())
        .with_element(ElementSchema::primitive("active", PrimitiveType::Boolean))
        .with_element(ElementSchema::composite("name", "HumanName").repeated())
        .with_element(ElementSchema::primitive("gender", PrimitiveType::Code))
        .with_element(ElementSchema::primitive("birthDate", PrimitiveType::Date))
        .with_element(ElementSchema::reference("managingOrganization", ["Organization"]))
}

fn observation() -> TypeSchema {
    TypeSchema::new("Observation")
        .with_element(ElementSchema::primitive("id", PrimitiveType::Id))
        .with_element(ElementSchema::composite("identifier", "Identifier").repeated())
        .with_element(ElementSchema::primitive("status", PrimitiveType::Code).required())
        .with_element(ElementSchema::composite("category", "CodeableConcept").repeated())
        .with_element(ElementSchema::composite("code", "CodeableConcept").required())
        .with_element(ElementSchema::reference(
            "subject",
            ["Patient", "Group", "Device", "Location"],
        ))
        .with_element(ElementSchema::reference("encounter", ["Encounter"]))
        .with_element(ElementSchema::primitive("effectiveDateTime", PrimitiveType::DateTime))
        .with_element(ElementSchema::composite("effectivePeriod", "Period"))
        .with_element(ElementSchema::primitive("issued", PrimitiveType::Instant))
        .with_element(
            ElementSchema::reference(
                "performer",
                ["Practitioner", "Organization", "Patient", "RelatedPerson"],
            )
            .repeated(),
        )
        .with_element(ElementSchema::composite("valueQuantity", "Quantity"))
        .with_element(ElementSchema::composite("valueCodeableConcept", "CodeableConcept"))
        .with_element(ElementSchema::primitive("valueString", PrimitiveType::String))
        .with_element(ElementSchema::primitive("valueBoolean", PrimitiveType::Boolean))
        .with_element(ElementSchema::primitive("valueDateTime", PrimitiveType::DateTime))
        .with_element(ElementSchema::composite("valuePeriod", "Period"))
        .with_element(ElementSchema::composite("interpretation", "CodeableConcept"))
        .with_element(ElementSchema::composite("bodySite", "CodeableConcept"))
        .with_element(ElementSchema::composite("method", "CodeableConcept"))
        .with_oneof(OneofGroup::new("effective", ["effectiveDateTime", "effectivePeriod"]))
        .with_oneof(
            OneofGroup::new(
                "value",
                [
                    "valueQuantity",
                    "valueCodeableConcept",
                    "valueString",
                    "valueBoolean",
                    "valueDateTime",
                    "valuePeriod",
                ],
            )
            .required(),
        )
}

fn encounter() -> TypeSchema {
    TypeSchema::new("Encounter")
        .with_element(ElementSchema::primitive("id", PrimitiveType::Id))
        .with_element(ElementSchema::composite("identifier", "Identifier").repeated())
        .with_element(ElementSchema::primitive("status", PrimitiveType::Code).required())
        .with_element(ElementSchema::composite("class", "Coding"))
        .with_element(ElementSchema::composite("type", "CodeableConcept").repeated())
        .with_element(ElementSchema::composite("priority", "CodeableConcept"))
        .with_element(ElementSchema::reference("subject", ["Patient", "Group"]))
        .with_element(ElementSchema::reference("episodeOfCare", ["EpisodeOfCare"]).repeated())
        .with_element(ElementSchema::composite("participant", "Encounter.Participant").repeated())
        .with_element(ElementSchema::composite("period", "Period"))
        .with_element(ElementSchema::composite("reason", "CodeableConcept").repeated())
        .with_element(ElementSchema::reference("serviceProvider", ["Organization"]))
        .with_element(ElementSchema::reference("partOf", ["Encounter"]))
}

fn encounter_participant() -> TypeSchema {
    TypeSchema::new("Encounter.Participant")
        .with_element(ElementSchema::composite("type", "CodeableConcept").repeated())
        .with_element(ElementSchema::composite("period", "Period"))
        .with_element(ElementSchema::reference("individual", ["Practitioner", "RelatedPerson"]))
}

fn bundle() -> TypeSchema {
    TypeSchema::new("Bundle")
        .with_element(ElementSchema::primitive("id", PrimitiveType::Id))
        .with_element(ElementSchema::composite("identifier", "Identifier"))
        .with_element(ElementSchema::primitive("type", PrimitiveType::Code).required())
        .with_element(ElementSchema::primitive("timestamp", PrimitiveType::Instant))
        .with_element(ElementSchema::primitive("total", PrimitiveType::UnsignedInt))
        .with_element(ElementSchema::composite("entry", "Bundle.Entry").repeated())
}

fn bundle_entry() -> TypeSchema {
    TypeSchema::new("Bundle.Entry")
        .with_element(ElementSchema::primitive("fullUrl", PrimitiveType::Uri))
        .with_element(ElementSchema::resource("resource"))
}
