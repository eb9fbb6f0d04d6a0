//! Completion roll-ups for the dashboard surfaces.

use crate::action::Action;
use crate::issue::Issue;
use crate::types::{ActionStatus, Category};
use crate::views::{assigned_to, recently_completed};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Cap applied to the dashboard's recent/upcoming listings.
pub const DASHBOARD_CAP: usize = 5;

// ---------------------------------------------------------------------------
// ProgressSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Integer percentage, 0 for an empty collection.
    pub completion_rate: u32,
}

/// Count roll-up over a set of actions. The rate short-circuits to 0 on an
/// empty collection rather than dividing by zero.
pub fn summarize(actions: &[Action]) -> ProgressSummary {
    let total = actions.len();
    let mut pending = 0;
    let mut in_progress = 0;
    let mut completed = 0;
    for action in actions {
        match action.status {
            ActionStatus::Pending => pending += 1,
            ActionStatus::InProgress => in_progress += 1,
            ActionStatus::Completed => completed += 1,
        }
    }
    let completion_rate = if total == 0 {
        0
    } else {
        (completed * 100 / total) as u32
    };
    ProgressSummary {
        total,
        pending,
        in_progress,
        completed,
        completion_rate,
    }
}

/// Roll-up restricted to one partner's share (their own assignments plus
/// everything assigned to both).
pub fn partner_progress(actions: &[Action], partner_id: &str) -> ProgressSummary {
    let mine: Vec<Action> = assigned_to(actions, partner_id)
        .into_iter()
        .cloned()
        .collect();
    summarize(&mine)
}

/// Per-category roll-up, resolving each action to a category through its
/// issue. Actions whose issue has been deleted have no category to land in
/// and are left out here (they still count in the overall summary).
/// Categories with no actions are omitted.
pub fn category_progress(issues: &[Issue], actions: &[Action]) -> Vec<(Category, ProgressSummary)> {
    Category::all()
        .iter()
        .filter_map(|&category| {
            let in_category: Vec<Action> = actions
                .iter()
                .filter(|a| {
                    issues
                        .iter()
                        .find(|i| i.id == a.issue_id)
                        .map(|i| i.category == category)
                        .unwrap_or(false)
                })
                .cloned()
                .collect();
            if in_category.is_empty() {
                None
            } else {
                Some((category, summarize(&in_category)))
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Capped listings
// ---------------------------------------------------------------------------

/// Actions completed within the trailing 24 hours of `now`, most recent
/// first, truncated to `cap`.
pub fn recent_completions(actions: &[Action], now: DateTime<Utc>, cap: usize) -> Vec<&Action> {
    let mut recent: Vec<&Action> = actions
        .iter()
        .filter(|a| recently_completed(a, now))
        .collect();
    recent.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    recent.truncate(cap);
    recent
}

/// Not-completed actions due at or after `now`, soonest first, truncated
/// to `cap`.
pub fn upcoming_due(actions: &[Action], now: DateTime<Utc>, cap: usize) -> Vec<&Action> {
    let mut upcoming: Vec<&Action> = actions
        .iter()
        .filter(|a| {
            a.status != ActionStatus::Completed
                && a.due_date.map(|due| due >= now).unwrap_or(false)
        })
        .collect();
    upcoming.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    upcoming.truncate(cap);
    upcoming
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
