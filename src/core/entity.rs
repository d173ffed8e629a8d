//! Record trait - common interface for all backend entity types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// Common trait for all records served by the backend
pub trait Record: Serialize + DeserializeOwned {
    /// Collection path on the REST API (e.g., "projects", "locations")
    const COLLECTION: &'static str;

    /// Human-readable singular name used in messages
    const LABEL: &'static str;

    /// Get the record's server identifier (`_id`)
    fn id(&self) -> &str;

    /// Get the record's display name
    fn display_name(&self) -> &str;

    /// Get the creation timestamp, when the backend reports one
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

/// Priority values shared by projects and tasks
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[derive(Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
            Priority::Critical => write!(f, "Critical"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Severity scale used by risks (same levels as [`Priority`])
pub type Severity = Priority;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_wire_names() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        let parsed: Priority = serde_json::from_str("\"Critical\"").unwrap();
        assert_eq!(parsed, Priority::Critical);
    }

    #[test]
    fn test_priority_from_str_case_insensitive() {
        assert_eq!("LOW".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
