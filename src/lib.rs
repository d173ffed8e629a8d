//! SolarOps: operations console for solar installation projects
//!
//! Typed records for the operations backend (projects, sites, service
//! orders, subcontractors, inventory), the project edit workflow with draft
//! validation and payload normalization, and location dashboard statistics.

pub mod cli;
pub mod core;
pub mod entities;
pub mod yaml;
