//! Subcontractor entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::normalize::lenient_date;

/// An external contractor that can be assigned to projects and tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcontractor {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub company_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Trade or specialty (e.g., "Electrical", "Roofing")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl Record for Subcontractor {
    const COLLECTION: &'static str = "subcontractors";
    const LABEL: &'static str = "subcontractor";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.company_name
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
