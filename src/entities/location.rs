//! Location entity type (installation and storage sites)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::normalize::lenient_date;

/// Operational status of a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LocationStatus {
    #[default]
    #[serde(alias = "Active")]
    Active,
    #[serde(alias = "Inactive")]
    Inactive,
    #[serde(alias = "Maintenance")]
    Maintenance,
    /// Any status the console doesn't know about; matches no status filter
    #[serde(other)]
    Other,
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationStatus::Active => write!(f, "active"),
            LocationStatus::Inactive => write!(f, "inactive"),
            LocationStatus::Maintenance => write!(f, "maintenance"),
            LocationStatus::Other => write!(f, "other"),
        }
    }
}

/// Physical kind of site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum SiteType {
    Outdoor,
    Indoor,
    Warehouse,
    Office,
    /// Any type the console doesn't know about
    #[default]
    #[serde(other)]
    Other,
}

impl SiteType {
    /// Indoor-family sites: indoor installations, warehouses and offices
    pub fn is_indoor_family(&self) -> bool {
        matches!(self, SiteType::Indoor | SiteType::Warehouse | SiteType::Office)
    }
}

impl std::fmt::Display for SiteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteType::Outdoor => write!(f, "Outdoor"),
            SiteType::Indoor => write!(f, "Indoor"),
            SiteType::Warehouse => write!(f, "Warehouse"),
            SiteType::Office => write!(f, "Office"),
            SiteType::Other => write!(f, "Other"),
        }
    }
}

/// A site record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,

    #[serde(default, rename = "type")]
    pub site_type: SiteType,

    #[serde(default)]
    pub status: LocationStatus,

    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Location {
    /// Create a location with the given name and defaults elsewhere
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            city: None,
            county: None,
            site_type: SiteType::default(),
            status: LocationStatus::default(),
            created_at: None,
        }
    }
}

impl Record for Location {
    const COLLECTION: &'static str = "locations";
    const LABEL: &'static str = "location";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_site_type_maps_to_other() {
        let loc: Location =
            serde_json::from_str(r#"{"_id": "l1", "name": "Dock", "type": "Carport"}"#).unwrap();
        assert_eq!(loc.site_type, SiteType::Other);
        assert_eq!(loc.status, LocationStatus::Active);
    }

    #[test]
    fn test_status_accepts_capitalized() {
        let loc: Location =
            serde_json::from_str(r#"{"_id": "l1", "status": "Maintenance"}"#).unwrap();
        assert_eq!(loc.status, LocationStatus::Maintenance);
    }

    #[test]
    fn test_unknown_status_maps_to_other() {
        let locs: Vec<Location> = serde_json::from_str(
            r#"[{"_id": "l1", "status": "active"}, {"_id": "l2", "status": "pending"}]"#,
        )
        .unwrap();
        assert_eq!(locs[0].status, LocationStatus::Active);
        assert_eq!(locs[1].status, LocationStatus::Other);
        assert_eq!(locs[1].status.to_string(), "other");
    }

    #[test]
    fn test_plain_created_date() {
        let loc: Location =
            serde_json::from_str(r#"{"_id": "l1", "createdAt": "2024-05-01"}"#).unwrap();
        assert_eq!(
            loc.created_at.map(|d| d.to_rfc3339()),
            Some("2024-05-01T00:00:00+00:00".to_string())
        );
        let blank: Location = serde_json::from_str(r#"{"_id": "l2", "createdAt": ""}"#).unwrap();
        assert!(blank.created_at.is_none());
    }

    #[test]
    fn test_indoor_family() {
        assert!(SiteType::Warehouse.is_indoor_family());
        assert!(SiteType::Office.is_indoor_family());
        assert!(!SiteType::Outdoor.is_indoor_family());
        assert!(!SiteType::Other.is_indoor_family());
    }
}
