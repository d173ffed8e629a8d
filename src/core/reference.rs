//! Reference fields that hold either a bare id or a populated document
//!
//! The backend populates some relationships (`serviceOrder`, `location`,
//! `projectLeader`, ...) with the full referenced document, and leaves
//! others as plain `_id` strings. Both shapes deserialize into
//! [`Reference`]; the submission payload always carries the id.
//!
//! A populated document that doesn't fit the typed shape is kept as a
//! [`LinkedDocument`] so one odd field never blocks loading the record
//! that points at it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::entity::Record;

/// A relationship to another record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    /// Bare identifier string
    Id(String),
    /// Populated document carrying its own `_id`
    Populated(T),
    /// Populated document the typed model could not read
    Linked(LinkedDocument),
}

/// Any object carrying `_id`, with its other fields kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedDocument {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl<T: Record> Reference<T> {
    /// Get the referenced id regardless of shape
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Populated(doc) => doc.id(),
            Reference::Linked(doc) => &doc.id,
        }
    }

    /// Consume the reference, keeping only the id
    pub fn into_id(self) -> String {
        match self {
            Reference::Id(id) => id,
            Reference::Populated(doc) => doc.id().to_string(),
            Reference::Linked(doc) => doc.id,
        }
    }

    /// Get the populated document, if present
    pub fn populated(&self) -> Option<&T> {
        match self {
            Reference::Populated(doc) => Some(doc),
            Reference::Id(_) | Reference::Linked(_) => None,
        }
    }

    /// Display label: the document's name when populated, else the id
    pub fn label(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Populated(doc) => doc.display_name(),
            Reference::Linked(doc) => doc
                .fields
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or(doc.id.as_str()),
        }
    }
}

impl<T> From<String> for Reference<T> {
    fn from(id: String) -> Self {
        Reference::Id(id)
    }
}

impl<T> From<&str> for Reference<T> {
    fn from(id: &str) -> Self {
        Reference::Id(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Location;

    #[test]
    fn test_bare_id_deserializes() {
        let r: Reference<Location> = serde_json::from_str("\"loc-1\"").unwrap();
        assert_eq!(r, Reference::Id("loc-1".to_string()));
        assert_eq!(r.id(), "loc-1");
        assert!(r.populated().is_none());
    }

    #[test]
    fn test_populated_deserializes() {
        let r: Reference<Location> =
            serde_json::from_str(r#"{"_id": "loc-2", "name": "Fresno Yard", "status": "active"}"#)
                .unwrap();
        assert_eq!(r.id(), "loc-2");
        assert_eq!(r.label(), "Fresno Yard");
        assert_eq!(r.clone().into_id(), "loc-2");
    }

    #[test]
    fn test_unreadable_document_keeps_id() {
        let r: Reference<Location> =
            serde_json::from_str(r#"{"_id": "loc-4", "name": "Dock", "createdAt": 1714521600}"#)
                .unwrap();
        assert!(r.populated().is_none());
        assert_eq!(r.id(), "loc-4");
        assert_eq!(r.label(), "Dock");
        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back["createdAt"], 1714521600);
    }

    #[test]
    fn test_object_without_id_is_rejected() {
        assert!(serde_json::from_str::<Reference<Location>>(r#"{"name": "Dock"}"#).is_err());
    }

    #[test]
    fn test_id_serializes_as_string() {
        let r: Reference<Location> = Reference::from("loc-3");
        assert_eq!(serde_json::to_string(&r).unwrap(), "\"loc-3\"");
    }
}
