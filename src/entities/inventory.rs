//! Inventory item entity type (panels, inverters, racking, ...)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::normalize::lenient_date;
use crate::core::reference::Reference;
use crate::entities::Location;

/// A stocked item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub quantity: i64,

    /// Reorder threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_stock: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,

    /// Site where the stock is held
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Reference<Location>>,

    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl InventoryItem {
    /// True when quantity is at or below the reorder threshold
    pub fn is_low_stock(&self) -> bool {
        self.minimum_stock.is_some_and(|min| self.quantity <= min)
    }

    /// Quantity multiplied by unit cost, when the cost is known
    pub fn stock_value(&self) -> Option<f64> {
        self.unit_cost.map(|c| c * self.quantity as f64)
    }
}

impl Record for InventoryItem {
    const COLLECTION: &'static str = "inventory";
    const LABEL: &'static str = "inventory item";

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
    fn test_low_stock() {
        let mut item: InventoryItem =
            serde_json::from_str(r#"{"_id": "i1", "name": "400W Panel", "quantity": 12}"#).unwrap();
        assert!(!item.is_low_stock());

        item.minimum_stock = Some(12);
        assert!(item.is_low_stock());

        item.quantity = 40;
        assert!(!item.is_low_stock());
    }

    #[test]
    fn test_stock_value() {
        let item: InventoryItem = serde_json::from_str(
            r#"{"_id": "i1", "name": "Inverter", "quantity": 3, "unitCost": 1200.5}"#,
        )
        .unwrap();
        assert_eq!(item.stock_value(), Some(3601.5));
    }
}
