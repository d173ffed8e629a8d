//! CLI command implementations

pub mod completions;
pub mod inventory;
pub mod location;
pub mod order;
pub mod project;
pub mod sub;
