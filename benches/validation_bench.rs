//! FHIR resource validation benchmarks
//!
//! Run:
//!   cargo bench --bench validation_bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use fhir_validation::{Validator, default_registry};
use serde_json::{Value as JsonValue, json};

fn patient_simple() -> JsonValue {
    json!({
        "resourceType": "Patient",
        "id": "example",
        "active": true,
        "name": [{
            "use": "official",
            "family": "Chalmers",
            "given": ["Peter", "James"]
        }],
        "gender": "male",
        "birthDate": "1974-12-25"
    })
}

fn encounter_with_period() -> JsonValue {
    json!({
        "resourceType": "Encounter",
        "id": "example",
        "status": "finished",
        "class": {
            "system": "http://terminology.hl7.org/CodeSystem/v3-ActCode",
            "code": "AMB"
        },
        "subject": {"reference": "Patient/example"},
        "episodeOfCare": [
            {"reference": "EpisodeOfCare/1"},
            {"reference": "EpisodeOfCare/2"}
        ],
        "period": {
            "start": "2021-03-05T10:00:00+01:00",
            "end": "2021-03-05T11:00:00+01:00"
        }
    })
}

fn bundle_of_patients(count: usize) -> JsonValue {
    let entries: Vec<JsonValue> = (0..count)
        .map(|i| {
            json!({
                "fullUrl": format!("https://fhir.example.org/Patient/{i}"),
                "resource": {
                    "resourceType": "Patient",
                    "id": format!("p{i}"),
                    "active": true,
                    "birthDate": "1974-12-25"
                }
            })
        })
        .collect();
    json!({"resourceType": "Bundle", "type": "collection", "entry": entries})
}

fn bench_validation(c: &mut Criterion) {
    let validator = Validator::new(default_registry());

    let patient = patient_simple();
    c.bench_function("validate_patient_simple", |b| {
        b.iter(|| black_box(validator.validate(black_box(&patient))))
    });

    let encounter = encounter_with_period();
    c.bench_function("validate_encounter_with_period", |b| {
        b.iter(|| black_box(validator.validate(black_box(&encounter))))
    });

    let bundle = bundle_of_patients(100);
    c.bench_function("validate_bundle_100_entries", |b| {
        b.iter(|| black_box(validator.validate(black_box(&bundle))))
    });
}

criterion_group!(benches, bench_validation);
criterion_main!(benches);
