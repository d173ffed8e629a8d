//! Submission normalizer - turns a project draft into the update payload
//!
//! The draft is first serialized with serde, then the resulting JSON tree is
//! rewritten in place:
//!
//! 1. reference fields holding a populated document become the bare `_id`
//! 2. date fields become ISO-8601 strings (`2024-03-01T00:00:00.000Z`)
//! 3. falsy entries are dropped from nested document arrays
//! 4. `null` leaves, empty arrays and empty objects are pruned
//!
//! [`normalize_value`] works on any JSON document of the project's shape, so
//! an already-normalized payload normalizes to itself.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::de::{self, Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::entities::ProjectDraft;

/// Field layout of one document level
struct Shape {
    /// Fields holding a single reference
    references: &'static [&'static str],
    /// Fields holding an array of references
    reference_lists: &'static [&'static str],
    /// Fields holding a date
    dates: &'static [&'static str],
    /// Fields holding arrays of nested documents
    children: &'static [(&'static str, &'static Shape)],
}

static TASK: Shape = Shape {
    references: &["assignedTo"],
    reference_lists: &[],
    dates: &[
        "plannedStartDate",
        "plannedEndDate",
        "actualStartDate",
        "actualEndDate",
    ],
    children: &[],
};

static MILESTONE: Shape = Shape {
    references: &[],
    reference_lists: &[],
    dates: &["dueDate", "completedDate"],
    children: &[("tasks", &TASK)],
};

static RISK: Shape = Shape {
    references: &[],
    reference_lists: &[],
    dates: &["identifiedDate", "targetResolutionDate"],
    children: &[],
};

static PROJECT: Shape = Shape {
    references: &["serviceOrder", "location", "projectLeader"],
    reference_lists: &["subcontractors"],
    dates: &[
        "plannedStartDate",
        "targetCompletionDate",
        "actualStartDate",
        "actualCompletionDate",
    ],
    children: &[("milestones", &MILESTONE), ("risks", &RISK)],
};

/// Normalize a draft into the payload accepted by the project update API
pub fn normalize(draft: &ProjectDraft) -> Value {
    let value = serde_json::to_value(draft).unwrap_or_else(|e| {
        tracing::error!(error = %e, "project draft could not be serialized");
        Value::Null
    });
    normalize_value(value)
}

/// Normalize a JSON project document
///
/// Non-object input yields an empty object.
pub fn normalize_value(value: Value) -> Value {
    let mut doc = match value {
        Value::Object(doc) => doc,
        _ => return Value::Object(Map::new()),
    };
    normalize_document(&mut doc, &PROJECT);
    prune(Value::Object(doc)).unwrap_or_else(|| Value::Object(Map::new()))
}

fn normalize_document(doc: &mut Map<String, Value>, shape: &Shape) {
    for field in shape.references {
        if let Some(value) = doc.get_mut(*field) {
            *value = reference_id(value.take());
        }
    }

    for field in shape.reference_lists {
        if let Some(Value::Array(items)) = doc.get_mut(*field) {
            for item in items.iter_mut() {
                *item = reference_id(item.take());
            }
        }
    }

    for field in shape.dates {
        if let Some(value) = doc.get_mut(*field) {
            *value = normalize_date(field, value.take());
        }
    }

    for (field, child) in shape.children {
        if let Some(Value::Array(items)) = doc.get_mut(*field) {
            items.retain(|item| !is_falsy(item));
            for item in items.iter_mut() {
                if let Value::Object(nested) = item {
                    normalize_document(nested, child);
                }
            }
        }
    }
}

/// Replace a populated document with its `_id`; anything else passes through
fn reference_id(value: Value) -> Value {
    match value {
        Value::Object(mut doc) => match doc.remove("_id") {
            Some(id) => id,
            None => Value::Object(doc),
        },
        other => other,
    }
}

fn normalize_date(field: &str, value: Value) -> Value {
    match value {
        Value::String(s) => match parse_date(&s) {
            Some(dt) => Value::String(format_iso(dt)),
            None => {
                tracing::warn!(field, value = %s, "unparseable date left unchanged");
                Value::String(s)
            }
        },
        other => other,
    }
}

/// Parse RFC 3339 timestamps, naive timestamps (as UTC) and plain dates (as midnight UTC)
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render a timestamp the way the backend stores it
pub fn format_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Deserialize an optional timestamp, also accepting plain dates
///
/// Blank strings read as absent, so a hand-edited draft can clear a date.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", s))),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Drop `null` leaves, empty arrays and empty objects, bottom-up
fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => {
            let items: Vec<Value> = items.into_iter().filter_map(prune).collect();
            (!items.is_empty()).then_some(Value::Array(items))
        }
        Value::Object(doc) => {
            let doc: Map<String, Value> = doc
                .into_iter()
                .filter_map(|(k, v)| prune(v).map(|v| (k, v)))
                .collect();
            (!doc.is_empty()).then_some(Value::Object(doc))
        }
        other => Some(other),
    }
}
