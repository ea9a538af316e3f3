//! Property tests for the validation engine.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use fhir_validation::{ErrorKind, validate_resource};
use proptest::prelude::*;
use serde_json::json;

#[derive(Debug, Clone)]
struct Stamp {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    offset_hours: i32,
}

impl Stamp {
    fn literal(&self) -> String {
        let sign = if self.offset_hours < 0 { '-' } else { '+' };
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:00",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            sign,
            self.offset_hours.abs()
        )
    }

    fn utc(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.literal())
            .expect("generated literal is RFC 3339")
            .with_timezone(&Utc)
    }
}

fn stamp_strategy() -> impl Strategy<Value = Stamp> {
    (
        2000..2030i32,
        1..=12u32,
        1..=28u32,
        0..24u32,
        0..60u32,
        0..60u32,
        -12..=12i32,
    )
        .prop_map(|(year, month, day, hour, minute, second, offset_hours)| Stamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset_hours,
        })
}

fn encounter_with_period(start: &str, end: &str) -> serde_json::Value {
    json!({
        "resourceType": "Encounter",
        "status": "finished",
        "period": {"start": start, "end": end}
    })
}

proptest! {
    /// At equal (second) precision the period check agrees exactly with
    /// UTC-normalized instant ordering.
    #[test]
    fn period_check_matches_utc_ordering(a in stamp_strategy(), b in stamp_strategy()) {
        let resource = encounter_with_period(&a.literal(), &b.literal());
        let result = validate_resource(&resource);

        match a.utc().cmp(&b.utc()) {
            Ordering::Greater => {
                let err = result.expect_err("inverted period should be invalid");
                prop_assert!(err.has_kind(ErrorKind::InvalidPeriod));
            }
            _ => prop_assert!(result.is_ok(), "ordered period should be valid"),
        }
    }

    /// Validation has no hidden state: the same resource always yields the
    /// same outcome.
    #[test]
    fn validation_is_idempotent(a in stamp_strategy(), b in stamp_strategy()) {
        let resource = encounter_with_period(&a.literal(), &b.literal());
        let first = validate_resource(&resource).map_err(|e| e.errors);
        let second = validate_resource(&resource).map_err(|e| e.errors);
        prop_assert_eq!(first, second);
    }

    /// Well-formed id literals never trip the format rule.
    #[test]
    fn valid_ids_never_fail(id in "[A-Za-z0-9.\\-]{1,64}") {
        let resource = json!({
            "resourceType": "Patient",
            "id": id
        });
        prop_assert!(validate_resource(&resource).is_ok());
    }
}
