//! Project edit session - the view/edit state machine around a draft
//!
//! A session starts in view mode holding the server record. `begin_edit`
//! clones the record into a draft; structural edits go through the draft's
//! own operations. `save` validates, normalizes and submits the whole draft,
//! then re-fetches the canonical record. `cancel` discards the draft and
//! re-fetches. Any failure during `save` leaves the draft untouched so the
//! caller can retry.

use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

use crate::core::api::{ApiError, ProjectStore};
use crate::core::normalize::normalize;
use crate::core::validation::{validate, ValidationErrors};
use crate::entities::{Project, ProjectDraft};

/// Session mode
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Read-only; shows the server record
    View,
    /// Editing a draft that may diverge from the server record
    Edit(ProjectDraft),
}

/// Errors from saving a draft
#[derive(Debug, Error, Diagnostic)]
pub enum SaveError {
    #[error("Nothing to save: the session is not in edit mode")]
    #[diagnostic(code(solarops::session::not_editing))]
    NotEditing,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("Failed to save project: {0}")]
    #[diagnostic(
        code(solarops::session::submit),
        help("The draft is still open; retry once the problem is resolved.")
    )]
    Submit(#[source] ApiError),
}

/// An edit session over one project
#[derive(Debug)]
pub struct EditSession {
    record: Project,
    mode: Mode,
}

impl EditSession {
    /// Start a view-mode session over an already loaded record
    pub fn new(record: Project) -> Self {
        Self {
            record,
            mode: Mode::View,
        }
    }

    /// Fetch a project and start a view-mode session over it
    pub fn open(store: &impl ProjectStore, id: &str) -> Result<Self, ApiError> {
        let record = store.fetch_project(id)?;
        tracing::debug!(project = %record.id, "session opened");
        Ok(Self::new(record))
    }

    /// The last server record seen by this session
    pub fn record(&self) -> &Project {
        &self.record
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit(_))
    }

    /// The draft, when editing
    pub fn draft(&self) -> Option<&ProjectDraft> {
        match &self.mode {
            Mode::Edit(draft) => Some(draft),
            Mode::View => None,
        }
    }

    /// Mutable access to the draft, when editing
    pub fn draft_mut(&mut self) -> Option<&mut ProjectDraft> {
        match &mut self.mode {
            Mode::Edit(draft) => Some(draft),
            Mode::View => None,
        }
    }

    /// Enter edit mode, cloning the record into a draft
    ///
    /// Already editing: the existing draft is kept.
    pub fn begin_edit(&mut self) -> &mut ProjectDraft {
        if let Mode::View = self.mode {
            tracing::debug!(project = %self.record.id, "entering edit mode");
            self.mode = Mode::Edit(self.record.details.clone());
        }
        match &mut self.mode {
            Mode::Edit(draft) => draft,
            Mode::View => unreachable!("edit mode was just entered"),
        }
    }

    /// Replace the whole draft (e.g., after editing it externally), entering edit mode
    pub fn replace_draft(&mut self, draft: ProjectDraft) {
        self.mode = Mode::Edit(draft);
    }

    /// True if saving would submit something other than the server record
    ///
    /// Compares normalized payloads, so entry keys and populated-vs-id
    /// references don't count as changes.
    pub fn is_dirty(&self) -> bool {
        self.draft()
            .is_some_and(|d| normalize(d) != normalize(&self.record.details))
    }

    /// The normalized payload `save` would submit
    pub fn payload(&self) -> Option<Value> {
        self.draft().map(normalize)
    }

    /// Discard the draft and reload the record
    ///
    /// The session is back in view mode even if the reload fails.
    pub fn cancel(&mut self, store: &impl ProjectStore) -> Result<(), ApiError> {
        self.mode = Mode::View;
        tracing::debug!(project = %self.record.id, "edit cancelled");
        self.record = store.fetch_project(&self.record.id)?;
        Ok(())
    }

    /// Validate, normalize and submit the whole draft
    ///
    /// On success the draft is discarded and the record re-fetched. On any
    /// error the session stays in edit mode with the draft intact.
    pub fn save(&mut self, store: &impl ProjectStore) -> Result<&Project, SaveError> {
        let draft = self.draft().ok_or(SaveError::NotEditing)?;
        validate(draft)?;
        let payload = normalize(draft);

        tracing::info!(project = %self.record.id, "submitting project update");
        let updated = store
            .update_project(&self.record.id, &payload)
            .map_err(|e| {
                tracing::warn!(project = %self.record.id, error = %e, "project update failed");
                SaveError::Submit(e)
            })?;

        self.record = match store.fetch_project(&updated.id) {
            Ok(fresh) => fresh,
            Err(e) => {
                tracing::warn!(
                    project = %updated.id,
                    error = %e,
                    "reload after save failed; using update response"
                );
                updated
            }
        };
        self.mode = Mode::View;
        Ok(&self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// In-memory backend applying payloads the way the REST API does
    #[derive(Default)]
    struct MemoryStore {
        projects: RefCell<HashMap<String, Project>>,
        fail_updates: Cell<bool>,
        payloads: RefCell<Vec<Value>>,
        fetches: Cell<usize>,
    }

    impl MemoryStore {
        fn with(project: Project) -> Self {
            let store = Self::default();
            store
                .projects
                .borrow_mut()
                .insert(project.id.clone(), project);
            store
        }
    }

    impl ProjectStore for MemoryStore {
        fn fetch_project(&self, id: &str) -> Result<Project, ApiError> {
            self.fetches.set(self.fetches.get() + 1);
            self.projects
                .borrow()
                .get(id)
                .cloned()
                .ok_or(ApiError::Status {
                    status: 404,
                    message: "Project not found".to_string(),
                })
        }

        fn update_project(&self, id: &str, payload: &Value) -> Result<Project, ApiError> {
            self.payloads.borrow_mut().push(payload.clone());
            if self.fail_updates.get() {
                return Err(ApiError::Status {
                    status: 500,
                    message: "database unavailable".to_string(),
                });
            }
            let details: ProjectDraft = serde_json::from_value(payload.clone()).map_err(|e| {
                ApiError::Status {
                    status: 400,
                    message: e.to_string(),
                }
            })?;
            let project = Project {
                id: id.to_string(),
                details,
                created_at: None,
                updated_at: None,
            };
            self.projects
                .borrow_mut()
                .insert(id.to_string(), project.clone());
            Ok(project)
        }
    }

    fn sample_project() -> Project {
        serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "name": "Mesa Community Solar",
            "type": "Commercial",
            "location": {"_id": "loc-1", "name": "Mesa"},
            "milestones": [{"name": "Design", "dueDate": "2024-04-01T00:00:00Z"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_starts_in_view_mode() {
        let store = MemoryStore::with(sample_project());
        let session = EditSession::open(&store, "p1").unwrap();
        assert_eq!(session.mode(), &Mode::View);
        assert!(session.draft().is_none());
        assert!(!session.is_dirty());
        assert!(session.payload().is_none());
    }

    #[test]
    fn test_open_missing_project() {
        let store = MemoryStore::default();
        let err = EditSession::open(&store, "nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_begin_edit_clones_record() {
        let store = MemoryStore::with(sample_project());
        let mut session = EditSession::open(&store, "p1").unwrap();

        session.begin_edit();
        assert!(!session.is_dirty());

        let draft = session.begin_edit();
        draft.add_milestone();
        assert!(session.is_editing());
        assert!(session.is_dirty());
        assert_eq!(session.record().details.milestones.len(), 1);

        // Re-entering edit mode keeps the draft
        session.begin_edit();
        assert_eq!(session.draft().unwrap().milestones.len(), 2);
    }

    #[test]
    fn test_cancel_discards_draft_and_refetches() {
        let store = MemoryStore::with(sample_project());
        let mut session = EditSession::open(&store, "p1").unwrap();
        session.begin_edit().name = "Changed".to_string();

        session.cancel(&store).unwrap();
        assert_eq!(session.mode(), &Mode::View);
        assert_eq!(session.record().details.name, "Mesa Community Solar");
        assert_eq!(store.fetches.get(), 2);
    }

    #[test]
    fn test_save_submits_normalized_payload() {
        let store = MemoryStore::with(sample_project());
        let mut session = EditSession::open(&store, "p1").unwrap();
        {
            let draft = session.begin_edit();
            draft.name = "Mesa Community Solar II".to_string();
            draft.add_risk();
            draft.risks[0].title = "Hail".to_string();
        }

        let saved = session.save(&store).unwrap();
        assert_eq!(saved.details.name, "Mesa Community Solar II");
        assert_eq!(session.mode(), &Mode::View);

        let payloads = store.payloads.borrow();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["location"], serde_json::json!("loc-1"));
        assert_eq!(
            payloads[0]["milestones"][0]["dueDate"],
            serde_json::json!("2024-04-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_invalid_draft_is_not_submitted() {
        let store = MemoryStore::with(sample_project());
        let mut session = EditSession::open(&store, "p1").unwrap();
        session.begin_edit().add_milestone();

        let err = session.save(&store).unwrap_err();
        assert!(matches!(err, SaveError::Invalid(ref v) if v.has("milestones[1].name")));
        assert!(store.payloads.borrow().is_empty());
        assert!(session.is_editing());
    }

    #[test]
    fn test_failed_submit_keeps_draft() {
        let store = MemoryStore::with(sample_project());
        store.fail_updates.set(true);
        let mut session = EditSession::open(&store, "p1").unwrap();
        session.begin_edit().notes = Some("Crane booked".to_string());
        let before = session.draft().cloned();

        let err = session.save(&store).unwrap_err();
        assert!(matches!(err, SaveError::Submit(_)));
        assert!(session.is_editing());
        assert_eq!(session.draft().cloned(), before);

        // Retry once the backend recovers
        store.fail_updates.set(false);
        session.save(&store).unwrap();
        assert_eq!(
            session.record().details.notes.as_deref(),
            Some("Crane booked")
        );
    }

    #[test]
    fn test_save_outside_edit_mode() {
        let store = MemoryStore::with(sample_project());
        let mut session = EditSession::open(&store, "p1").unwrap();
        assert!(matches!(session.save(&store), Err(SaveError::NotEditing)));
    }
}
