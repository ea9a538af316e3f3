//! Cross-field semantic checks.
//!
//! Rules spanning multiple sibling fields, dispatched from the owning type's
//! descriptor after the walker has visited the node's children. The canonical
//! rule is interval ordering on Period: start must not exceed end once both
//! instants are truncated to the coarser of their two precisions.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde_json::{Map, Value};

use crate::error::ErrorKind;
use crate::schema::SemanticCheck;

/// Granularity a date/time literal was written at.
///
/// FHIR dateTime literals carry no hour- or minute-only forms; a literal with
/// a time component always has at least seconds and a timezone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateTimePrecision {
    Year,
    Month,
    Day,
    Second,
    Millisecond,
}

impl DateTimePrecision {
    /// How many leading calendar components this precision compares.
    fn component_count(self) -> usize {
        match self {
            DateTimePrecision::Year => 1,
            DateTimePrecision::Month => 2,
            DateTimePrecision::Day => 3,
            DateTimePrecision::Second => 6,
            DateTimePrecision::Millisecond => 7,
        }
    }
}

/// A parsed date/time literal with its explicit precision.
///
/// Time-bearing literals are normalized to UTC at parse time, so numeric
/// timezone offsets never influence later comparisons. Date-only literals
/// have no offset to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FhirInstant {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
    precision: DateTimePrecision,
}

impl FhirInstant {
    /// Parse a FHIR date or dateTime literal.
    ///
    /// Fails on literals that pass the format regex but name an impossible
    /// calendar date (for example February 30th).
    pub fn parse(literal: &str) -> Result<Self, String> {
        if literal.contains('T') {
            let parsed = DateTime::parse_from_rfc3339(literal)
                .map_err(|e| format!("cannot parse \"{literal}\": {e}"))?;
            let utc = parsed.with_timezone(&Utc);
            let precision = if literal.contains('.') {
                DateTimePrecision::Millisecond
            } else {
                DateTimePrecision::Second
            };
            return Ok(Self {
                year: utc.year(),
                month: utc.month(),
                day: utc.day(),
                hour: utc.hour(),
                minute: utc.minute(),
                second: utc.second(),
                millisecond: utc.timestamp_subsec_millis(),
                precision,
            });
        }

        let (date_part, precision) = match literal.len() {
            4 => (format!("{literal}-01-01"), DateTimePrecision::Year),
            7 => (format!("{literal}-01"), DateTimePrecision::Month),
            10 => (literal.to_string(), DateTimePrecision::Day),
            _ => return Err(format!("cannot parse \"{literal}\" as a date")),
        };
        let date = NaiveDate::parse_from_str(&date_part, "%Y-%m-%d")
            .map_err(|e| format!("cannot parse \"{literal}\": {e}"))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
            precision,
        })
    }

    pub fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    fn components(&self) -> [i64; 7] {
        [
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
            i64::from(self.hour),
            i64::from(self.minute),
            i64::from(self.second),
            i64::from(self.millisecond),
        ]
    }
}

/// Compare two instants after truncating both to the coarser precision.
///
/// Truncation discards the finer components; equality after truncation is
/// a legitimate outcome even when the untruncated literals are ordered.
pub fn compare_truncated(a: &FhirInstant, b: &FhirInstant) -> Ordering {
    let precision = a.precision.min(b.precision);
    let n = precision.component_count();
    a.components()[..n].cmp(&b.components()[..n])
}

/// A cross-field rule violation on one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticViolation {
    pub kind: ErrorKind,
    pub message: String,
}

/// Evaluate one named check against a node whose children have already been
/// visited.
///
/// Endpoints the primitive validator already rejected are skipped here so a
/// malformed literal is reported once, as a format violation.
pub fn run_check(check: &SemanticCheck, node: &Map<String, Value>) -> Option<SemanticViolation> {
    match check {
        SemanticCheck::PeriodOrder { start, end } => {
            let start_literal = node.get(start.as_str()).and_then(Value::as_str)?;
            let end_literal = node.get(end.as_str()).and_then(Value::as_str)?;
            let (Ok(start_instant), Ok(end_instant)) =
                (FhirInstant::parse(start_literal), FhirInstant::parse(end_literal))
            else {
                return None;
            };

            if compare_truncated(&start_instant, &end_instant) == Ordering::Greater {
                Some(SemanticViolation {
                    kind: ErrorKind::InvalidPeriod,
                    message: format!(
                        "start \"{start_literal}\" is after end \"{end_literal}\" at shared precision"
                    ),
                })
            } else {
                None
            }
        }
    }
}
