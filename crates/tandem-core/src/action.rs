use crate::types::{ActionStatus, Assignment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    /// Owning issue. The issue may have been deleted since; the reference
    /// is kept and resolved to a sentinel title by the view layer.
    pub issue_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub assignment: Assignment,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    /// Present iff `status` is `Completed`. Written and cleared only by
    /// `set_status`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    /// Append-only progress notes, each stamped `date (author): text` at
    /// insertion time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Fields supplied when creating an action. Title non-blankness and issue
/// context are the caller's responsibility.
#[derive(Debug, Clone)]
pub struct NewAction {
    pub issue_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assignment: Assignment,
    pub due_date: Option<DateTime<Utc>>,
    pub created_by: String,
}

/// Field-wise patch for `update_action`. Outer `None` leaves a field
/// unchanged; `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Default)]
pub struct ActionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignment: Option<Assignment>,
    pub status: Option<ActionStatus>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

// ---------------------------------------------------------------------------
// Action collection operations (operate on a mutable Vec<Action>)
// ---------------------------------------------------------------------------

/// Append a new action with a fresh id, creation stamp, and empty note
/// list. Status starts at `pending`. Returns the id.
pub fn add_action(actions: &mut Vec<Action>, new: NewAction) -> String {
    let id = Uuid::new_v4().to_string();
    actions.push(Action {
        id: id.clone(),
        issue_id: new.issue_id,
        title: new.title,
        description: new.description,
        assignment: new.assignment,
        status: ActionStatus::Pending,
        due_date: new.due_date,
        created_at: Utc::now(),
        created_by: new.created_by,
        completed_at: None,
        completed_by: None,
        notes: Vec::new(),
    });
    id
}

/// Merge the supplied fields into the matching action. A status change is
/// routed through [`set_status`] so the completion stamps stay consistent;
/// `acting` identifies the partner performing the update. Returns `false`
/// (collection untouched) when no action matches.
pub fn update_action(actions: &mut [Action], id: &str, update: ActionUpdate, acting: &str) -> bool {
    let Some(action) = actions.iter_mut().find(|a| a.id == id) else {
        return false;
    };
    if let Some(title) = update.title {
        action.title = title;
    }
    if let Some(description) = update.description {
        action.description = Some(description);
    }
    if let Some(assignment) = update.assignment {
        action.assignment = assignment;
    }
    if let Some(due_date) = update.due_date {
        action.due_date = due_date;
    }
    if let Some(status) = update.status {
        set_status(action, status, acting);
    }
    true
}

/// The status state machine. Any status may move to any other; entering
/// `completed` stamps `completed_at`/`completed_by` with the *acting*
/// partner (not the assignee), and leaving `completed` clears both stamps
/// in the same transition. Notes are untouched.
pub fn set_status(action: &mut Action, status: ActionStatus, acting: &str) {
    let was_completed = action.status == ActionStatus::Completed;
    action.status = status;
    match (was_completed, status == ActionStatus::Completed) {
        (false, true) => {
            action.completed_at = Some(Utc::now());
            action.completed_by = Some(acting.to_string());
        }
        (true, false) => {
            action.completed_at = None;
            action.completed_by = None;
        }
        // Re-completing an already-completed action keeps the original
        // stamps; staying out of completed has nothing to clear.
        _ => {}
    }
}

/// Remove the matching action unconditionally.
pub fn delete_action(actions: &mut Vec<Action>, id: &str) -> bool {
    if let Some(pos) = actions.iter().position(|a| a.id == id) {
        actions.remove(pos);
        true
    } else {
        false
    }
}

/// Append a stamped note to the matching action. Blank or whitespace-only
/// text is refused (`false`), as is a missing id. Notes are never edited
/// or removed afterwards.
pub fn append_note(actions: &mut [Action], id: &str, author: &str, text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    let Some(action) = actions.iter_mut().find(|a| a.id == id) else {
        return false;
    };
    let stamp = Utc::now().format("%Y-%m-%d");
    action.notes.push(format!("{stamp} ({author}): {text}"));
    true
}

pub fn find_action<'a>(actions: &'a [Action], id: &str) -> Option<&'a Action> {
    actions.iter().find(|a| a.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn new_action(title: &str) -> NewAction {
        NewAction {
            issue_id: "issue-1".to_string(),
            title: title.to_string(),
            description: None,
            assignment: Assignment::Both,
            due_date: None,
            created_by: "p1".to_string(),
        }
    }

    #[test]
    fn add_action_defaults() {
        let mut actions: Vec<Action> = Vec::new();
        let id = add_action(&mut actions, new_action("Plan date night"));
        let action = find_action(&actions, &id).unwrap();
        assert_eq!(action.status, ActionStatus::Pending);
        assert!(action.notes.is_empty());
        assert!(action.completed_at.is_none());
        assert_eq!(action.created_by, "p1");
    }

    #[test]
    fn completing_stamps_acting_partner() {
        let mut actions: Vec<Action> = Vec::new();
        let id = add_action(&mut actions, new_action("Plan date night"));

        let applied = update_action(
            &mut actions,
            &id,
            ActionUpdate {
                status: Some(ActionStatus::Completed),
                ..Default::default()
            },
            "p2",
        );
        assert!(applied);
        assert!(actions[0].completed_at.is_some());
        assert_eq!(actions[0].completed_by.as_deref(), Some("p2"));
    }

    #[test]
    fn leaving_completed_clears_stamps() {
        let mut actions: Vec<Action> = Vec::new();
        let id = add_action(&mut actions, new_action("Plan date night"));
        append_note(&mut actions, &id, "Avery", "booked a table");

        set_status(&mut actions[0], ActionStatus::Completed, "p1");
        assert!(actions[0].completed_at.is_some());

        set_status(&mut actions[0], ActionStatus::InProgress, "p1");
        assert!(actions[0].completed_at.is_none());
        assert!(actions[0].completed_by.is_none());

        // Back and forth keeps the note history intact
        set_status(&mut actions[0], ActionStatus::Completed, "p2");
        assert_eq!(actions[0].notes.len(), 1);
        assert_eq!(actions[0].completed_by.as_deref(), Some("p2"));
    }

    #[test]
    fn recompleting_keeps_original_stamps() {
        let mut actions: Vec<Action> = Vec::new();
        add_action(&mut actions, new_action("X"));
        set_status(&mut actions[0], ActionStatus::Completed, "p1");
        let first = actions[0].completed_at;

        set_status(&mut actions[0], ActionStatus::Completed, "p2");
        assert_eq!(actions[0].completed_at, first);
        assert_eq!(actions[0].completed_by.as_deref(), Some("p1"));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut actions: Vec<Action> = Vec::new();
        add_action(&mut actions, new_action("X"));
        let before = actions.clone();

        let applied = update_action(
            &mut actions,
            "nope",
            ActionUpdate {
                title: Some("Y".to_string()),
                ..Default::default()
            },
            "p1",
        );
        assert!(!applied);
        assert_eq!(actions, before);
    }

    #[test]
    fn update_clears_due_date() {
        let mut actions: Vec<Action> = Vec::new();
        let id = add_action(
            &mut actions,
            NewAction {
                due_date: Some(Utc::now()),
                ..new_action("X")
            },
        );
        update_action(
            &mut actions,
            &id,
            ActionUpdate {
                due_date: Some(None),
                ..Default::default()
            },
            "p1",
        );
        assert!(actions[0].due_date.is_none());
    }

    #[test]
    fn append_note_formats_and_appends() {
        let mut actions: Vec<Action> = Vec::new();
        let id = add_action(&mut actions, new_action("X"));

        assert!(append_note(&mut actions, &id, "Avery", "  called the bank  "));
        assert_eq!(actions[0].notes.len(), 1);
        let note = &actions[0].notes[0];
        assert!(note.ends_with("(Avery): called the bank"), "{note}");
    }

    #[test]
    fn append_note_blank_is_noop() {
        let mut actions: Vec<Action> = Vec::new();
        let id = add_action(&mut actions, new_action("X"));

        assert!(!append_note(&mut actions, &id, "Avery", ""));
        assert!(!append_note(&mut actions, &id, "Avery", "   "));
        assert!(actions[0].notes.is_empty());

        assert!(!append_note(&mut actions, "nope", "Avery", "text"));
    }

    #[test]
    fn delete_action_unconditional() {
        let mut actions: Vec<Action> = Vec::new();
        let id = add_action(&mut actions, new_action("X"));
        set_status(&mut actions[0], ActionStatus::InProgress, "p1");

        assert!(delete_action(&mut actions, &id));
        assert!(actions.is_empty());
        assert!(!delete_action(&mut actions, &id));
    }
}
