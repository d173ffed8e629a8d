//! Project entity type with its nested milestones, tasks and risks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Priority, Record, Severity};
use crate::core::identity::EntryKey;
use crate::core::normalize::lenient_date;
use crate::core::reference::Reference;
use crate::entities::{Location, ServiceOrder, StaffMember, Subcontractor};

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum ProjectStatus {
    #[default]
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
    Cancelled,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Planning => write!(f, "Planning"),
            ProjectStatus::InProgress => write!(f, "In Progress"),
            ProjectStatus::OnHold => write!(f, "On Hold"),
            ProjectStatus::Completed => write!(f, "Completed"),
            ProjectStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Blocked,
    Cancelled,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
            TaskStatus::Blocked => write!(f, "Blocked"),
            TaskStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Risk tracking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum RiskStatus {
    #[default]
    Open,
    Monitoring,
    Mitigated,
    Closed,
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskStatus::Open => write!(f, "Open"),
            RiskStatus::Monitoring => write!(f, "Monitoring"),
            RiskStatus::Mitigated => write!(f, "Mitigated"),
            RiskStatus::Closed => write!(f, "Closed"),
        }
    }
}

/// An actionable work item inside a milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Local key (never serialized)
    #[serde(skip)]
    pub key: EntryKey,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Subcontractor responsible for the task
    #[serde(default)]
    pub assigned_to: Option<Reference<Subcontractor>>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default, deserialize_with = "lenient_date")]
    pub planned_start_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub planned_end_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub actual_start_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub actual_end_date: Option<DateTime<Utc>>,

    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: f64,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            key: EntryKey::new(),
            name: String::new(),
            description: String::new(),
            assigned_to: None,
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            planned_start_date: None,
            planned_end_date: None,
            actual_start_date: None,
            actual_end_date: None,
            progress: 0.0,
            notes: None,
        }
    }
}

/// A schedule checkpoint with its own task list and deliverables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(skip)]
    pub key: EntryKey,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Required before submission
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub completed_date: Option<DateTime<Utc>>,

    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: f64,

    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Free-text deliverables (duplicates allowed)
    #[serde(default)]
    pub deliverables: Vec<String>,
}

impl Milestone {
    /// Create a blank milestone due at the given time
    pub fn new(due_date: DateTime<Utc>) -> Self {
        Self {
            key: EntryKey::new(),
            name: String::new(),
            description: String::new(),
            due_date: Some(due_date),
            completed_date: None,
            progress: 0.0,
            tasks: Vec::new(),
            deliverables: Vec::new(),
        }
    }
}

/// An identified project hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    #[serde(skip)]
    pub key: EntryKey,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub severity: Severity,

    /// Likelihood (0-1)
    #[serde(default)]
    pub probability: f64,

    /// Impact rating (1-10)
    #[serde(default)]
    pub impact: u8,

    #[serde(default)]
    pub mitigation_plan: Option<String>,

    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub status: RiskStatus,

    #[serde(default, deserialize_with = "lenient_date")]
    pub identified_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub target_resolution_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Risk {
    /// Create a blank open risk identified at the given time
    pub fn new(identified: DateTime<Utc>) -> Self {
        Self {
            key: EntryKey::new(),
            title: String::new(),
            description: String::new(),
            severity: Severity::Medium,
            probability: 0.5,
            impact: 5,
            mitigation_plan: None,
            owner: None,
            status: RiskStatus::Open,
            identified_date: Some(identified),
            target_resolution_date: None,
            notes: None,
        }
    }

    /// Probability-weighted impact score (0-10)
    pub fn score(&self) -> f64 {
        self.probability * self.impact as f64
    }
}

/// The editable body of a project
///
/// A [`Project`] record embeds one of these; an edit session works on a
/// clone of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    #[serde(default)]
    pub name: String,

    /// Installation type (e.g., "Residential", "Commercial")
    #[serde(default, rename = "type")]
    pub project_type: String,

    /// System capacity in kW
    #[serde(default)]
    pub capacity: Option<f64>,

    #[serde(default)]
    pub contract_value: Option<f64>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(default, deserialize_with = "lenient_date")]
    pub planned_start_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub target_completion_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub actual_start_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub actual_completion_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub service_order: Option<Reference<ServiceOrder>>,

    #[serde(default)]
    pub location: Option<Reference<Location>>,

    #[serde(default)]
    pub project_leader: Option<Reference<StaffMember>>,

    #[serde(default)]
    pub subcontractors: Vec<Reference<Subcontractor>>,

    /// Overall completion percentage (0-100)
    #[serde(default)]
    pub progress: f64,

    #[serde(default)]
    pub milestones: Vec<Milestone>,

    #[serde(default)]
    pub risks: Vec<Risk>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            project_type: String::new(),
            capacity: None,
            contract_value: None,
            priority: Priority::default(),
            status: ProjectStatus::default(),
            planned_start_date: None,
            target_completion_date: None,
            actual_start_date: None,
            actual_completion_date: None,
            service_order: None,
            location: None,
            project_leader: None,
            subcontractors: Vec::new(),
            progress: 0.0,
            milestones: Vec::new(),
            risks: Vec::new(),
            notes: None,
            is_active: true,
        }
    }
}

impl ProjectDraft {
    /// Append a blank milestone due now
    pub fn add_milestone(&mut self) -> EntryKey {
        let milestone = Milestone::new(Utc::now());
        let key = milestone.key;
        self.milestones.push(milestone);
        key
    }

    /// Remove the milestone at `index`; out of range is a no-op
    pub fn remove_milestone(&mut self, index: usize) {
        if index < self.milestones.len() {
            self.milestones.remove(index);
        }
    }

    /// Remove the milestone with the given key
    pub fn remove_milestone_by_key(&mut self, key: EntryKey) -> bool {
        let before = self.milestones.len();
        self.milestones.retain(|m| m.key != key);
        self.milestones.len() != before
    }

    /// Append a blank task to a milestone; returns `None` if the milestone doesn't exist
    pub fn add_task(&mut self, milestone_index: usize) -> Option<EntryKey> {
        let milestone = self.milestones.get_mut(milestone_index)?;
        let task = Task::default();
        let key = task.key;
        milestone.tasks.push(task);
        Some(key)
    }

    /// Remove a task by position; any invalid index is a no-op
    pub fn remove_task(&mut self, milestone_index: usize, task_index: usize) {
        if let Some(milestone) = self.milestones.get_mut(milestone_index) {
            if task_index < milestone.tasks.len() {
                milestone.tasks.remove(task_index);
            }
        }
    }

    /// Remove a task by key from whichever milestone holds it
    pub fn remove_task_by_key(&mut self, key: EntryKey) -> bool {
        for milestone in &mut self.milestones {
            let before = milestone.tasks.len();
            milestone.tasks.retain(|t| t.key != key);
            if milestone.tasks.len() != before {
                return true;
            }
        }
        false
    }

    /// Add a deliverable to a milestone; blank text is ignored
    pub fn add_deliverable(&mut self, milestone_index: usize, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if let Some(milestone) = self.milestones.get_mut(milestone_index) {
            milestone.deliverables.push(text.to_string());
        }
    }

    /// Remove a deliverable by position; any invalid index is a no-op
    pub fn remove_deliverable(&mut self, milestone_index: usize, deliverable_index: usize) {
        if let Some(milestone) = self.milestones.get_mut(milestone_index) {
            if deliverable_index < milestone.deliverables.len() {
                milestone.deliverables.remove(deliverable_index);
            }
        }
    }

    /// Append a blank open risk identified now
    pub fn add_risk(&mut self) -> EntryKey {
        let risk = Risk::new(Utc::now());
        let key = risk.key;
        self.risks.push(risk);
        key
    }

    /// Remove the risk at `index`; out of range is a no-op
    pub fn remove_risk(&mut self, index: usize) {
        if index < self.risks.len() {
            self.risks.remove(index);
        }
    }

    /// Remove the risk with the given key
    pub fn remove_risk_by_key(&mut self, key: EntryKey) -> bool {
        let before = self.risks.len();
        self.risks.retain(|r| r.key != key);
        self.risks.len() != before
    }

    /// Position of a milestone by key
    pub fn milestone_index(&self, key: EntryKey) -> Option<usize> {
        self.milestones.iter().position(|m| m.key == key)
    }

    /// Total number of tasks across all milestones
    pub fn task_count(&self) -> usize {
        self.milestones.iter().map(|m| m.tasks.len()).sum()
    }
}

/// A project record as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(flatten)]
    pub details: ProjectDraft,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Project {
    const COLLECTION: &'static str = "projects";
    const LABEL: &'static str = "project";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.details.name
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with_milestones(n: usize) -> ProjectDraft {
        let mut draft = ProjectDraft::default();
        for i in 0..n {
            draft.add_milestone();
            draft.milestones[i].name = format!("M{}", i);
        }
        draft
    }

    #[test]
    fn test_add_milestone_defaults() {
        let mut draft = ProjectDraft::default();
        let before = Utc::now();
        let key = draft.add_milestone();

        let m = &draft.milestones[0];
        assert_eq!(m.key, key);
        assert!(m.name.is_empty());
        assert!(m.description.is_empty());
        assert_eq!(m.progress, 0.0);
        assert!(m.tasks.is_empty());
        assert!(m.deliverables.is_empty());
        assert!(m.due_date.unwrap() >= before);
    }

    #[test]
    fn test_remove_milestone_preserves_order() {
        for i in 0..4 {
            let mut draft = draft_with_milestones(4);
            draft.remove_milestone(i);

            let names: Vec<_> = draft.milestones.iter().map(|m| m.name.clone()).collect();
            let expected: Vec<_> = (0..4).filter(|&j| j != i).map(|j| format!("M{}", j)).collect();
            assert_eq!(names, expected);
        }
    }

    #[test]
    fn test_remove_milestone_out_of_bounds_is_noop() {
        let mut draft = draft_with_milestones(2);
        let before = draft.clone();
        draft.remove_milestone(5);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_add_then_remove_task_restores_list() {
        let mut draft = draft_with_milestones(2);
        let before = draft.milestones[1].tasks.clone();

        draft.add_task(1);
        assert_eq!(draft.milestones[1].tasks.len(), 1);
        draft.remove_task(1, 0);

        assert_eq!(draft.milestones[1].tasks, before);
    }

    #[test]
    fn test_add_task_defaults() {
        let mut draft = draft_with_milestones(1);
        draft.add_task(0).unwrap();
        let task = &draft.milestones[0].tasks[0];
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.progress, 0.0);
    }

    #[test]
    fn test_task_ops_on_missing_milestone_are_noops() {
        let mut draft = draft_with_milestones(1);
        let before = draft.clone();
        assert!(draft.add_task(3).is_none());
        draft.remove_task(3, 0);
        draft.remove_task(0, 7);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_blank_deliverable_ignored() {
        let mut draft = draft_with_milestones(1);
        draft.add_deliverable(0, "   ");
        draft.add_deliverable(0, "");
        assert!(draft.milestones[0].deliverables.is_empty());

        draft.add_deliverable(0, "  As-built drawings ");
        draft.add_deliverable(0, "As-built drawings");
        assert_eq!(
            draft.milestones[0].deliverables,
            vec!["As-built drawings", "As-built drawings"]
        );

        draft.remove_deliverable(0, 0);
        draft.remove_deliverable(0, 9);
        assert_eq!(draft.milestones[0].deliverables.len(), 1);
    }

    #[test]
    fn test_add_risk_defaults() {
        let mut draft = ProjectDraft::default();
        draft.add_risk();
        let risk = &draft.risks[0];
        assert_eq!(risk.status, RiskStatus::Open);
        assert!(risk.identified_date.is_some());
        assert_eq!(risk.severity, Severity::Medium);

        draft.remove_risk(4);
        assert_eq!(draft.risks.len(), 1);
        draft.remove_risk(0);
        assert!(draft.risks.is_empty());
    }

    #[test]
    fn test_remove_by_key() {
        let mut draft = draft_with_milestones(3);
        let key = draft.milestones[1].key;
        let task_key = draft.add_task(2).unwrap();
        let risk_key = draft.add_risk();

        assert!(draft.remove_milestone_by_key(key));
        assert!(!draft.remove_milestone_by_key(key));
        assert_eq!(draft.milestones.len(), 2);
        assert_eq!(draft.milestones[1].name, "M2");

        assert!(draft.remove_task_by_key(task_key));
        assert_eq!(draft.task_count(), 0);

        assert!(draft.remove_risk_by_key(risk_key));
        assert!(draft.risks.is_empty());
    }

    #[test]
    fn test_project_record_deserializes_flattened() {
        let json = r#"{
            "_id": "p1",
            "name": "Oakridge Rooftop",
            "type": "Commercial",
            "status": "In Progress",
            "priority": "High",
            "location": {"_id": "loc-9", "name": "Oakridge", "status": "active"},
            "subcontractors": ["sub-1", {"_id": "sub-2", "companyName": "Bright Electric"}],
            "milestones": [{
                "name": "Permits",
                "dueDate": "2024-03-01T00:00:00Z",
                "tasks": [{"name": "File"}]
            }],
            "createdAt": "2024-01-15T10:00:00Z",
            "__v": 0
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, "p1");
        assert_eq!(project.details.status, ProjectStatus::InProgress);
        assert_eq!(project.details.priority, Priority::High);
        assert_eq!(project.details.location.as_ref().unwrap().id(), "loc-9");
        assert_eq!(project.details.subcontractors[1].label(), "Bright Electric");
        assert_eq!(project.details.milestones[0].tasks[0].name, "File");
        assert!(project.details.is_active);
        assert_eq!(project.display_name(), "Oakridge Rooftop");
    }
}
