//! CSV export of entity lists

use chrono::{DateTime, Utc};
use std::io;

use crate::core::entity::Record;
use crate::entities::{InventoryItem, Location, Project, ServiceOrder, Subcontractor};

/// A record that can be written as one CSV row
pub trait CsvRecord {
    /// Column headers, in row order
    fn headers() -> &'static [&'static str];

    /// Field values, one per header
    fn row(&self) -> Vec<String>;
}

/// Write a header row and one row per record
pub fn export_csv<W: io::Write, T: CsvRecord>(writer: W, records: &[T]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(T::headers())?;
    for record in records {
        wtr.write_record(record.row())?;
    }
    wtr.flush()?;
    Ok(())
}

fn date(value: Option<DateTime<Utc>>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl CsvRecord for Project {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "type",
            "status",
            "priority",
            "capacity",
            "contract_value",
            "progress",
            "location",
            "planned_start",
            "target_completion",
            "milestones",
            "open_risks",
        ]
    }

    fn row(&self) -> Vec<String> {
        let d = &self.details;
        vec![
            self.id.clone(),
            d.name.clone(),
            d.project_type.clone(),
            d.status.to_string(),
            d.priority.to_string(),
            opt(d.capacity),
            opt(d.contract_value),
            d.progress.to_string(),
            d.location.as_ref().map(|l| l.id().to_string()).unwrap_or_default(),
            date(d.planned_start_date),
            date(d.target_completion_date),
            d.milestones.len().to_string(),
            d.risks
                .iter()
                .filter(|r| r.status == crate::entities::project::RiskStatus::Open)
                .count()
                .to_string(),
        ]
    }
}

impl CsvRecord for Location {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "type", "status", "address", "city", "county", "created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.site_type.to_string(),
            self.status.to_string(),
            opt(self.address.as_deref()),
            opt(self.city.as_deref()),
            opt(self.county.as_deref()),
            date(self.created_at),
        ]
    }
}

impl CsvRecord for InventoryItem {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "sku",
            "category",
            "quantity",
            "unit",
            "unit_cost",
            "minimum_stock",
            "location",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            opt(self.sku.as_deref()),
            opt(self.category.as_deref()),
            self.quantity.to_string(),
            opt(self.unit.as_deref()),
            opt(self.unit_cost),
            opt(self.minimum_stock),
            self.location.as_ref().map(|l| l.id().to_string()).unwrap_or_default(),
        ]
    }
}

impl CsvRecord for Subcontractor {
    fn headers() -> &'static [&'static str] {
        &["id", "company", "contact", "email", "phone", "specialty", "active"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.company_name.clone(),
            opt(self.contact_name.as_deref()),
            opt(self.email.as_deref()),
            opt(self.phone.as_deref()),
            opt(self.specialty.as_deref()),
            self.is_active.to_string(),
        ]
    }
}

impl CsvRecord for ServiceOrder {
    fn headers() -> &'static [&'static str] {
        &["id", "order_number", "customer", "status", "created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.display_name().to_string(),
            opt(self.customer_name.as_deref()),
            opt(self.status.as_deref()),
            date(self.created_at),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{LocationStatus, SiteType};
    use chrono::TimeZone;

    fn to_csv_string<T: CsvRecord>(records: &[T]) -> String {
        let mut buf = Vec::new();
        export_csv(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_location_export() {
        let mut loc = Location::new("l1", "North Yard, Bay 2");
        loc.site_type = SiteType::Outdoor;
        loc.status = LocationStatus::Maintenance;
        loc.county = Some("Kern".to_string());
        loc.created_at = Some(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap());

        let csv = to_csv_string(&[loc]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,name,type,status,address,city,county,created"
        );
        assert_eq!(
            lines.next().unwrap(),
            "l1,\"North Yard, Bay 2\",Outdoor,maintenance,,,Kern,2024-02-03"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_export_has_header() {
        let csv = to_csv_string::<InventoryItem>(&[]);
        assert_eq!(
            csv.trim_end(),
            "id,name,sku,category,quantity,unit,unit_cost,minimum_stock,location"
        );
    }

    #[test]
    fn test_project_export_uses_reference_ids() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "_id": "p9",
            "name": "Quote \"Alpha\"",
            "type": "Residential",
            "capacity": 9.6,
            "location": {"_id": "loc-4", "name": "Elm St"},
            "risks": [{"title": "Roof age"}, {"title": "Shade", "status": "Closed"}]
        }))
        .unwrap();

        let csv = to_csv_string(&[project]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with(
            "p9,\"Quote \"\"Alpha\"\"\",Residential,Planning,Medium,9.6,,0,loc-4,"
        ));
        assert!(row.ends_with(",0,1"));
    }
}
