//! Service order entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::normalize::lenient_date;

/// A customer service order that a project fulfils
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub order_number: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for ServiceOrder {
    const COLLECTION: &'static str = "service-orders";
    const LABEL: &'static str = "service order";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.order_number
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
