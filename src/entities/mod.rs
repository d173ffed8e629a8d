//! Entity type definitions
//!
//! Records served by the operations backend:
//!
//! - [`Project`] - Installation projects with milestones, tasks and risks
//! - [`Location`] - Installation and storage sites
//! - [`ServiceOrder`] - Customer orders a project fulfils
//! - [`Subcontractor`] - External contractors assigned to projects and tasks
//! - [`StaffMember`] - Internal users (project leaders)
//! - [`InventoryItem`] - Stocked equipment and materials

pub mod inventory;
pub mod location;
pub mod project;
pub mod service_order;
pub mod staff;
pub mod subcontractor;

pub use inventory::InventoryItem;
pub use location::{Location, LocationStatus, SiteType};
pub use project::{Milestone, Project, ProjectDraft, Risk, Task};
pub use service_order::ServiceOrder;
pub use staff::StaffMember;
pub use subcontractor::Subcontractor;
