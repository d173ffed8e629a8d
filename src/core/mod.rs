//! Core module - fundamental types and utilities

pub mod api;
pub mod config;
pub mod entity;
pub mod export;
pub mod identity;
pub mod normalize;
pub mod reference;
pub mod session;
pub mod stats;
pub mod validation;

pub use api::{ApiClient, ApiError, ProjectStore};
pub use config::Config;
pub use entity::{Priority, Record, Severity};
pub use export::{export_csv, CsvRecord};
pub use identity::EntryKey;
pub use normalize::{normalize, normalize_value};
pub use reference::{LinkedDocument, Reference};
pub use session::{EditSession, Mode, SaveError};
pub use stats::{LocationAggregateStats, LocationCounts, MonthWindow};
pub use validation::{validate, FieldError, ValidationErrors};
