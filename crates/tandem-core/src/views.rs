//! Pure derivations over the issue/action collections.
//!
//! Nothing here mutates or caches: every function recomputes from the
//! slices it is handed, and every clock-dependent predicate takes the
//! evaluation instant as an explicit `now` parameter.

use crate::action::Action;
use crate::issue::Issue;
use crate::types::ActionStatus;
use chrono::{DateTime, Duration, Utc};

/// Title shown for actions whose issue has been deleted.
pub const UNKNOWN_ISSUE: &str = "Unknown Issue";

/// Forward-looking due-soon window.
const DUE_SOON_DAYS: i64 = 2;

/// Trailing recent-completion window.
const RECENT_HOURS: i64 = 24;

// ---------------------------------------------------------------------------
// Grouping and filtering
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StatusBuckets<'a> {
    pub pending: Vec<&'a Action>,
    pub in_progress: Vec<&'a Action>,
    pub completed: Vec<&'a Action>,
}

/// Partition actions by status. Each action lands in exactly one bucket;
/// insertion order is preserved within a bucket.
pub fn group_by_status(actions: &[Action]) -> StatusBuckets<'_> {
    let mut buckets = StatusBuckets::default();
    for action in actions {
        match action.status {
            ActionStatus::Pending => buckets.pending.push(action),
            ActionStatus::InProgress => buckets.in_progress.push(action),
            ActionStatus::Completed => buckets.completed.push(action),
        }
    }
    buckets
}

/// Actions covering the given partner: assigned to both, or to them
/// specifically.
pub fn assigned_to<'a>(actions: &'a [Action], partner_id: &str) -> Vec<&'a Action> {
    actions
        .iter()
        .filter(|a| a.assignment.covers(partner_id))
        .collect()
}

// ---------------------------------------------------------------------------
// Clock-dependent predicates
// ---------------------------------------------------------------------------

/// Overdue: has a due date, not completed, and the due date is strictly
/// before `now`. Completed actions are never overdue.
pub fn is_overdue(action: &Action, now: DateTime<Utc>) -> bool {
    if action.status == ActionStatus::Completed {
        return false;
    }
    match action.due_date {
        Some(due) => due < now,
        None => false,
    }
}

/// Due soon: not completed, and the due date falls inside the
/// `[now, now + 2 days]` window (both edges inclusive). Anything earlier
/// is overdue territory, anything later is out of the window.
pub fn is_due_soon(action: &Action, now: DateTime<Utc>) -> bool {
    if action.status == ActionStatus::Completed {
        return false;
    }
    match action.due_date {
        Some(due) => due >= now && due <= now + Duration::days(DUE_SOON_DAYS),
        None => false,
    }
}

/// Completed within the trailing 24 hours of `now`.
pub fn recently_completed(action: &Action, now: DateTime<Utc>) -> bool {
    if action.status != ActionStatus::Completed {
        return false;
    }
    match action.completed_at {
        Some(at) => at <= now && now - at <= Duration::hours(RECENT_HOURS),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Resolve an issue id to its title, degrading to [`UNKNOWN_ISSUE`] for
/// orphaned references.
pub fn issue_title<'a>(issues: &'a [Issue], issue_id: &str) -> &'a str {
    issues
        .iter()
        .find(|i| i.id == issue_id)
        .map(|i| i.title.as_str())
        .unwrap_or(UNKNOWN_ISSUE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{add_action, set_status, NewAction};
    use crate::issue::{add_issue, delete_issue, NewIssue};
    use crate::types::{Assignment, Category, Priority};

    fn action_with(due: Option<DateTime<Utc>>, assignment: Assignment) -> Action {
        let mut actions = Vec::new();
        add_action(
            &mut actions,
            NewAction {
                issue_id: "issue-1".to_string(),
                title: "t".to_string(),
                description: None,
                assignment,
                due_date: due,
                created_by: "p1".to_string(),
            },
        );
        actions.pop().unwrap()
    }

    #[test]
    fn buckets_partition_exactly_once() {
        let mut actions = vec![
            action_with(None, Assignment::Both),
            action_with(None, Assignment::Both),
            action_with(None, Assignment::Both),
        ];
        set_status(&mut actions[1], ActionStatus::InProgress, "p1");
        set_status(&mut actions[2], ActionStatus::Completed, "p1");

        let buckets = group_by_status(&actions);
        assert_eq!(buckets.pending.len(), 1);
        assert_eq!(buckets.in_progress.len(), 1);
        assert_eq!(buckets.completed.len(), 1);
        let total = buckets.pending.len() + buckets.in_progress.len() + buckets.completed.len();
        assert_eq!(total, actions.len());
    }

    #[test]
    fn assigned_to_includes_both() {
        let actions = vec![
            action_with(None, Assignment::Both),
            action_with(None, Assignment::partner("p1")),
            action_with(None, Assignment::partner("p2")),
        ];
        let mine = assigned_to(&actions, "p1");
        assert_eq!(mine.len(), 2);
    }

    #[test]
    fn overdue_requires_past_due_and_not_completed() {
        let now = Utc::now();
        let mut late = action_with(Some(now - Duration::hours(1)), Assignment::Both);
        assert!(is_overdue(&late, now));

        // Completed actions are never overdue, whatever the due date
        set_status(&mut late, ActionStatus::Completed, "p1");
        assert!(!is_overdue(&late, now));

        let no_due = action_with(None, Assignment::Both);
        assert!(!is_overdue(&no_due, now));
    }

    #[test]
    fn due_tomorrow_is_due_soon_not_overdue() {
        let now = Utc::now();
        let action = action_with(Some(now + Duration::days(1)), Assignment::Both);
        assert!(is_due_soon(&action, now));
        assert!(!is_overdue(&action, now));
    }

    #[test]
    fn due_soon_window_edges() {
        let now = Utc::now();
        let at_edge = action_with(Some(now + Duration::days(2)), Assignment::Both);
        assert!(is_due_soon(&at_edge, now));

        let past_edge =
            action_with(Some(now + Duration::days(2) + Duration::minutes(1)), Assignment::Both);
        assert!(!is_due_soon(&past_edge, now));

        // Already past due: overdue, not due-soon
        let behind = action_with(Some(now - Duration::minutes(1)), Assignment::Both);
        assert!(!is_due_soon(&behind, now));
        assert!(is_overdue(&behind, now));
    }

    #[test]
    fn same_action_changes_classification_with_now() {
        let due = Utc::now() + Duration::days(1);
        let action = action_with(Some(due), Assignment::Both);
        assert!(is_due_soon(&action, due - Duration::days(1)));
        assert!(is_overdue(&action, due + Duration::hours(1)));
    }

    #[test]
    fn recent_completion_window() {
        let now = Utc::now();
        let mut action = action_with(None, Assignment::Both);
        assert!(!recently_completed(&action, now));

        set_status(&mut action, ActionStatus::Completed, "p1");
        assert!(recently_completed(&action, Utc::now()));
        assert!(!recently_completed(&action, now + Duration::hours(25)));
    }

    #[test]
    fn issue_title_sentinel_after_delete() {
        let mut issues = Vec::new();
        let id = add_issue(
            &mut issues,
            NewIssue {
                title: "Budget check-ins".to_string(),
                description: None,
                category: Category::Finance,
                priority: Priority::High,
            },
        );
        assert_eq!(issue_title(&issues, &id), "Budget check-ins");

        delete_issue(&mut issues, &id);
        assert_eq!(issue_title(&issues, &id), UNKNOWN_ISSUE);
    }
}
