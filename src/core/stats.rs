//! Location aggregate statistics with month-over-month trends

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::entity::Record;
use crate::entities::{Location, LocationStatus, SiteType};

/// Trend text used when no raw location list is available
pub const NOT_AVAILABLE: &str = "N/A";

/// Trend text used when the previous month has no baseline
pub const ZERO_BASELINE: &str = "0% from last month";

/// Plain location counts, as computed locally or served by `/locations/stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationCounts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub maintenance: usize,
    /// Distinct counties
    pub counties: usize,
    pub outdoor: usize,
    /// Indoor-family sites (indoor, warehouse, office)
    pub indoor: usize,
}

impl LocationCounts {
    /// Count a list of locations
    pub fn from_locations(locations: &[Location]) -> Self {
        let counties: HashSet<String> = locations
            .iter()
            .filter_map(|l| l.county.as_deref())
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();

        Self {
            total: locations.len(),
            active: count(locations, is_active),
            inactive: count(locations, |l| l.status == LocationStatus::Inactive),
            maintenance: count(locations, is_maintenance),
            counties: counties.len(),
            outdoor: count(locations, is_outdoor),
            indoor: count(locations, |l| l.site_type.is_indoor_family()),
        }
    }
}

/// The current and previous calendar month as `YYYY-MM` keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    pub current: String,
    pub previous: String,
}

impl MonthWindow {
    /// Window ending at `now` (UTC), rolling the year back from January
    pub fn at(now: DateTime<Utc>) -> Self {
        let (year, month) = if now.month() == 1 {
            (now.year() - 1, 12)
        } else {
            (now.year(), now.month() - 1)
        };
        Self {
            current: month_key(now),
            previous: format!("{:04}-{:02}", year, month),
        }
    }

    /// True if the timestamp falls in the previous month or earlier
    ///
    /// Keys are zero-padded and fixed-width, so string order is month order.
    pub fn is_baseline(&self, created: DateTime<Utc>) -> bool {
        month_key(created).as_str() <= self.previous.as_str()
    }
}

/// `YYYY-MM` key of a timestamp
pub fn month_key(dt: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", dt.year(), dt.month())
}

/// Counts plus trend strings for the locations dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAggregateStats {
    #[serde(flatten)]
    pub counts: LocationCounts,
    pub total_trend: String,
    pub active_trend: String,
    pub outdoor_trend: String,
    pub maintenance_trend: String,
}

impl LocationAggregateStats {
    /// Stats from pre-aggregated counts only; every trend is "N/A"
    pub fn from_counts(counts: LocationCounts) -> Self {
        Self {
            counts,
            total_trend: NOT_AVAILABLE.to_string(),
            active_trend: NOT_AVAILABLE.to_string(),
            outdoor_trend: NOT_AVAILABLE.to_string(),
            maintenance_trend: NOT_AVAILABLE.to_string(),
        }
    }

    /// Stats and trends from the raw location list
    ///
    /// Locations without a creation timestamp count toward current totals
    /// but not toward last month's baseline.
    pub fn from_locations(locations: &[Location], now: DateTime<Utc>) -> Self {
        let window = MonthWindow::at(now);
        let baseline: Vec<Location> = locations
            .iter()
            .filter(|l| l.created_at().is_some_and(|c| window.is_baseline(c)))
            .cloned()
            .collect();

        let counts = LocationCounts::from_locations(locations);
        tracing::debug!(
            month = %window.current,
            total = counts.total,
            baseline = baseline.len(),
            "computed location stats"
        );

        Self {
            total_trend: percent_trend(counts.total, baseline.len()),
            active_trend: percent_trend(counts.active, count(&baseline, is_active)),
            outdoor_trend: percent_trend(counts.outdoor, count(&baseline, is_outdoor)),
            maintenance_trend: delta_trend(counts.maintenance, count(&baseline, is_maintenance)),
            counts,
        }
    }
}

fn count(locations: &[Location], predicate: impl Fn(&Location) -> bool) -> usize {
    locations.iter().filter(|l| predicate(*l)).count()
}

fn is_active(l: &Location) -> bool {
    l.status == LocationStatus::Active
}

fn is_maintenance(l: &Location) -> bool {
    l.status == LocationStatus::Maintenance
}

fn is_outdoor(l: &Location) -> bool {
    l.site_type == SiteType::Outdoor
}

/// Percentage change, one decimal; a zero baseline renders as "0%"
pub fn percent_trend(now: usize, last_month: usize) -> String {
    if last_month == 0 {
        return ZERO_BASELINE.to_string();
    }
    let pct = (now as f64 - last_month as f64) / last_month as f64 * 100.0;
    format!("{:.1}% from last month", pct)
}

/// Signed absolute change; a zero baseline renders as "+<now>"
pub fn delta_trend(now: usize, last_month: usize) -> String {
    if last_month == 0 {
        return format!("+{}", now);
    }
    let delta = now as i64 - last_month as i64;
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn loc(
        id: usize,
        status: LocationStatus,
        site_type: SiteType,
        created: Option<DateTime<Utc>>,
    ) -> Location {
        let mut l = Location::new(format!("loc-{}", id), format!("Site {}", id));
        l.status = status;
        l.site_type = site_type;
        l.created_at = created;
        l
    }

    #[test]
    fn test_month_window_rollover() {
        let w = MonthWindow::at(at(2025, 1, 10));
        assert_eq!(w.current, "2025-01");
        assert_eq!(w.previous, "2024-12");

        let w = MonthWindow::at(at(2024, 11, 30));
        assert_eq!(w.current, "2024-11");
        assert_eq!(w.previous, "2024-10");
    }

    #[test]
    fn test_baseline_comparison() {
        let w = MonthWindow::at(at(2024, 3, 5));
        assert!(w.is_baseline(at(2024, 2, 29)));
        assert!(w.is_baseline(at(2023, 12, 1)));
        assert!(!w.is_baseline(at(2024, 3, 1)));
    }

    #[test]
    fn test_all_created_this_month_gives_zero_baseline() {
        let now = at(2024, 6, 20);
        let locations: Vec<Location> = (0..10)
            .map(|i| {
                let status = if i < 3 {
                    LocationStatus::Active
                } else {
                    LocationStatus::Inactive
                };
                loc(i, status, SiteType::Indoor, Some(at(2024, 6, 1 + i as u32)))
            })
            .collect();

        let stats = LocationAggregateStats::from_locations(&locations, now);
        assert_eq!(stats.counts.active, 3);
        assert_eq!(stats.active_trend, "0% from last month");
        assert_eq!(stats.total_trend, "0% from last month");
        assert_eq!(stats.outdoor_trend, "0% from last month");
        assert_eq!(stats.maintenance_trend, "+0");
    }

    #[test]
    fn test_percentage_trend() {
        let now = at(2024, 6, 20);
        let mut locations: Vec<Location> = (0..4)
            .map(|i| loc(i, LocationStatus::Active, SiteType::Outdoor, Some(at(2024, 5, 2))))
            .collect();
        locations.push(loc(4, LocationStatus::Active, SiteType::Outdoor, Some(at(2024, 6, 3))));

        let stats = LocationAggregateStats::from_locations(&locations, now);
        assert_eq!(stats.active_trend, "25.0% from last month");
        assert_eq!(stats.total_trend, "25.0% from last month");
        assert_eq!(stats.outdoor_trend, "25.0% from last month");
    }

    #[test]
    fn test_maintenance_delta() {
        let now = at(2024, 1, 15);
        let locations = vec![
            loc(0, LocationStatus::Maintenance, SiteType::Outdoor, Some(at(2023, 12, 1))),
            loc(1, LocationStatus::Maintenance, SiteType::Outdoor, Some(at(2023, 11, 1))),
            loc(2, LocationStatus::Maintenance, SiteType::Outdoor, Some(at(2024, 1, 2))),
        ];
        let stats = LocationAggregateStats::from_locations(&locations, now);
        assert_eq!(stats.maintenance_trend, "+1");

        assert_eq!(delta_trend(2, 2), "0");
        assert_eq!(delta_trend(1, 3), "-2");
        assert_eq!(delta_trend(4, 0), "+4");
    }

    #[test]
    fn test_negative_percent() {
        assert_eq!(percent_trend(3, 4), "-25.0% from last month");
        assert_eq!(percent_trend(4, 4), "0.0% from last month");
        assert_eq!(percent_trend(1, 3), "-66.7% from last month");
    }

    #[test]
    fn test_missing_timestamp_not_in_baseline() {
        let now = at(2024, 6, 20);
        let locations = vec![
            loc(0, LocationStatus::Active, SiteType::Outdoor, Some(at(2024, 5, 1))),
            loc(1, LocationStatus::Active, SiteType::Outdoor, None),
        ];
        let stats = LocationAggregateStats::from_locations(&locations, now);
        assert_eq!(stats.counts.total, 2);
        assert_eq!(stats.total_trend, "100.0% from last month");
    }

    #[test]
    fn test_counts() {
        let mut locations = vec![
            loc(0, LocationStatus::Active, SiteType::Outdoor, None),
            loc(1, LocationStatus::Inactive, SiteType::Warehouse, None),
            loc(2, LocationStatus::Maintenance, SiteType::Office, None),
            loc(3, LocationStatus::Active, SiteType::Other, None),
        ];
        locations[0].county = Some("Kern".to_string());
        locations[1].county = Some(" kern ".to_string());
        locations[2].county = Some("Fresno".to_string());
        locations[3].county = Some("".to_string());

        let counts = LocationCounts::from_locations(&locations);
        assert_eq!(
            counts,
            LocationCounts {
                total: 4,
                active: 2,
                inactive: 1,
                maintenance: 1,
                counties: 2,
                outdoor: 1,
                indoor: 2,
            }
        );
    }

    #[test]
    fn test_unknown_status_counts_toward_total_only() {
        let locations: Vec<Location> = serde_json::from_str(
            r#"[
                {"_id": "l1", "status": "active", "type": "Outdoor", "createdAt": "2024-05-02"},
                {"_id": "l2", "status": "pending", "type": "Outdoor", "createdAt": "2024-05-03"},
                {"_id": "l3", "status": "maintenance", "createdAt": "2024-06-01"}
            ]"#,
        )
        .unwrap();
        let stats = LocationAggregateStats::from_locations(&locations, at(2024, 6, 20));
        assert_eq!(stats.counts.total, 3);
        assert_eq!(stats.counts.active, 1);
        assert_eq!(stats.counts.inactive, 0);
        assert_eq!(stats.counts.maintenance, 1);
        assert_eq!(stats.counts.outdoor, 2);
        assert_eq!(stats.total_trend, "50.0% from last month");
        assert_eq!(stats.active_trend, "0.0% from last month");
    }

    #[test]
    fn test_from_counts_is_not_available() {
        let stats = LocationAggregateStats::from_counts(LocationCounts {
            total: 12,
            active: 9,
            ..Default::default()
        });
        assert_eq!(stats.counts.total, 12);
        for trend in [
            &stats.total_trend,
            &stats.active_trend,
            &stats.outdoor_trend,
            &stats.maintenance_trend,
        ] {
            assert_eq!(trend, NOT_AVAILABLE);
        }
    }
}
