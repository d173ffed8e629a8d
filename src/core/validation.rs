//! Client-side validation of project drafts before submission

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use thiserror::Error;

use crate::entities::project::{Milestone, Risk, Task};
use crate::entities::ProjectDraft;

/// A single failed check, addressed by field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Path such as `milestones[1].tasks[0].progress`
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All validation failures for a draft
#[derive(Debug, Error, Diagnostic)]
#[error("project draft has {} invalid field(s):\n{}", .errors.len(), format_errors(.errors))]
#[diagnostic(
    code(solarops::validation),
    help("Fix the listed fields and save again; your draft has not been submitted.")
)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidationErrors {
    /// Check whether a specific path failed
    pub fn has(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }
}

#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, path: String, message: impl Into<String>) {
        self.errors.push(FieldError {
            path,
            message: message.into(),
        });
    }

    fn required(&mut self, path: String, value: &str) {
        if value.trim().is_empty() {
            self.fail(path, "is required");
        }
    }

    fn range(&mut self, path: String, value: f64, min: f64, max: f64) {
        if !(min..=max).contains(&value) {
            self.fail(path, format!("must be between {} and {}", min, max));
        }
    }

    fn non_negative(&mut self, path: String, value: Option<f64>) {
        if value.is_some_and(|v| v < 0.0) {
            self.fail(path, "must not be negative");
        }
    }

    fn ordered(
        &mut self,
        path: String,
        earlier: Option<DateTime<Utc>>,
        later: Option<DateTime<Utc>>,
        earlier_name: &str,
    ) {
        if let (Some(a), Some(b)) = (earlier, later) {
            if b < a {
                self.fail(path, format!("must not be before {}", earlier_name));
            }
        }
    }
}

/// Validate a draft, collecting every failure
pub fn validate(draft: &ProjectDraft) -> Result<(), ValidationErrors> {
    let mut c = Checker::default();

    c.required("name".into(), &draft.name);
    c.range("progress".into(), draft.progress, 0.0, 100.0);
    c.non_negative("capacity".into(), draft.capacity);
    c.non_negative("contractValue".into(), draft.contract_value);
    c.ordered(
        "targetCompletionDate".into(),
        draft.planned_start_date,
        draft.target_completion_date,
        "plannedStartDate",
    );
    c.ordered(
        "actualCompletionDate".into(),
        draft.actual_start_date,
        draft.actual_completion_date,
        "actualStartDate",
    );

    for (i, milestone) in draft.milestones.iter().enumerate() {
        check_milestone(&mut c, &format!("milestones[{}]", i), milestone);
    }
    for (i, risk) in draft.risks.iter().enumerate() {
        check_risk(&mut c, &format!("risks[{}]", i), risk);
    }

    if c.errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors: c.errors })
    }
}

fn check_milestone(c: &mut Checker, prefix: &str, milestone: &Milestone) {
    c.required(format!("{}.name", prefix), &milestone.name);
    if milestone.due_date.is_none() {
        c.fail(format!("{}.dueDate", prefix), "is required");
    }
    c.range(format!("{}.progress", prefix), milestone.progress, 0.0, 100.0);

    for (j, task) in milestone.tasks.iter().enumerate() {
        check_task(c, &format!("{}.tasks[{}]", prefix, j), task);
    }
}

fn check_task(c: &mut Checker, prefix: &str, task: &Task) {
    c.required(format!("{}.name", prefix), &task.name);
    c.range(format!("{}.progress", prefix), task.progress, 0.0, 100.0);
    c.ordered(
        format!("{}.plannedEndDate", prefix),
        task.planned_start_date,
        task.planned_end_date,
        "plannedStartDate",
    );
    c.ordered(
        format!("{}.actualEndDate", prefix),
        task.actual_start_date,
        task.actual_end_date,
        "actualStartDate",
    );
}

fn check_risk(c: &mut Checker, prefix: &str, risk: &Risk) {
    c.required(format!("{}.title", prefix), &risk.title);
    c.range(format!("{}.probability", prefix), risk.probability, 0.0, 1.0);
    c.range(format!("{}.impact", prefix), risk.impact as f64, 1.0, 10.0);
    c.ordered(
        format!("{}.targetResolutionDate", prefix),
        risk.identified_date,
        risk.target_resolution_date,
        "identifiedDate",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_draft() -> ProjectDraft {
        let mut draft = ProjectDraft {
            name: "Harbor Carport".to_string(),
            ..Default::default()
        };
        draft.add_milestone();
        draft.milestones[0].name = "Design".to_string();
        draft.add_task(0);
        draft.milestones[0].tasks[0].name = "Site survey".to_string();
        draft.add_risk();
        draft.risks[0].title = "Permit delay".to_string();
        draft
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate(&valid_draft()).is_ok());
    }

    #[test]
    fn test_new_entries_need_names() {
        let mut draft = valid_draft();
        draft.add_milestone();
        draft.add_task(0);
        draft.add_risk();

        let err = validate(&draft).unwrap_err();
        assert!(err.has("milestones[1].name"));
        assert!(err.has("milestones[0].tasks[1].name"));
        assert!(err.has("risks[1].title"));
        assert_eq!(err.errors.len(), 3);
    }

    #[test]
    fn test_ranges() {
        let mut draft = valid_draft();
        draft.progress = 101.0;
        draft.milestones[0].progress = -1.0;
        draft.milestones[0].tasks[0].progress = 100.0;
        draft.risks[0].probability = 1.5;
        draft.risks[0].impact = 0;
        draft.capacity = Some(-5.0);

        let err = validate(&draft).unwrap_err();
        assert!(err.has("progress"));
        assert!(err.has("milestones[0].progress"));
        assert!(!err.has("milestones[0].tasks[0].progress"));
        assert!(err.has("risks[0].probability"));
        assert!(err.has("risks[0].impact"));
        assert!(err.has("capacity"));
    }

    #[test]
    fn test_date_ordering() {
        let mut draft = valid_draft();
        draft.planned_start_date = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        draft.target_completion_date = Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
        draft.milestones[0].tasks[0].planned_start_date =
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap());
        draft.milestones[0].tasks[0].planned_end_date =
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap());

        let err = validate(&draft).unwrap_err();
        assert!(err.has("targetCompletionDate"));
        assert!(!err.has("milestones[0].tasks[0].plannedEndDate"));
    }

    #[test]
    fn test_missing_due_date() {
        let mut draft = valid_draft();
        draft.milestones[0].due_date = None;
        let err = validate(&draft).unwrap_err();
        assert!(err.has("milestones[0].dueDate"));
        assert!(err.to_string().contains("milestones[0].dueDate: is required"));
    }
}
