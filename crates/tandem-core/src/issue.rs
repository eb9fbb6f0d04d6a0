use crate::types::{Category, Priority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Freeform 2D layout hint for visualization surfaces. Not interpreted by
/// the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Issue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    /// Ids of related issues. Symmetric in intent, but never enforced
    /// bidirectional; dangling ids are tolerated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<String>,
    #[serde(default)]
    pub position: Position,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating an issue. Title non-blankness is the
/// caller's responsibility (the form layer rejects blank input before the
/// collection is ever touched).
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
}

/// Field-wise patch for `update_issue`. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct IssueUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub position: Option<Position>,
}

// ---------------------------------------------------------------------------
// Issue collection operations (operate on a mutable Vec<Issue>)
// ---------------------------------------------------------------------------

/// Append a new issue with a fresh id and creation stamp. Returns the id.
pub fn add_issue(issues: &mut Vec<Issue>, new: NewIssue) -> String {
    let id = Uuid::new_v4().to_string();
    issues.push(Issue {
        id: id.clone(),
        title: new.title,
        description: new.description,
        category: new.category,
        priority: new.priority,
        connections: Vec::new(),
        position: Position::default(),
        created_at: Utc::now(),
    });
    id
}

/// Merge the supplied fields into the matching issue, preserving id and
/// creation stamp. Returns `false` (collection untouched) when no issue
/// matches.
pub fn update_issue(issues: &mut [Issue], id: &str, update: IssueUpdate) -> bool {
    let Some(issue) = issues.iter_mut().find(|i| i.id == id) else {
        return false;
    };
    if let Some(title) = update.title {
        issue.title = title;
    }
    if let Some(description) = update.description {
        issue.description = Some(description);
    }
    if let Some(category) = update.category {
        issue.category = category;
    }
    if let Some(priority) = update.priority {
        issue.priority = priority;
    }
    if let Some(position) = update.position {
        issue.position = position;
    }
    true
}

/// Remove the matching issue. Actions referencing it are left alone; their
/// `issue_id` becomes an orphaned reference resolved to a sentinel title
/// by the view layer.
pub fn delete_issue(issues: &mut Vec<Issue>, id: &str) -> bool {
    if let Some(pos) = issues.iter().position(|i| i.id == id) {
        issues.remove(pos);
        true
    } else {
        false
    }
}

/// Record a one-directional connection edge from `id` to `other_id`,
/// skipping duplicates. Returns `false` when `id` is not present; the
/// target id is not checked for existence.
pub fn connect_issues(issues: &mut [Issue], id: &str, other_id: &str) -> bool {
    let Some(issue) = issues.iter_mut().find(|i| i.id == id) else {
        return false;
    };
    if !issue.connections.iter().any(|c| c == other_id) {
        issue.connections.push(other_id.to_string());
    }
    true
}

pub fn find_issue<'a>(issues: &'a [Issue], id: &str) -> Option<&'a Issue> {
    issues.iter().find(|i| i.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn new_issue(title: &str) -> NewIssue {
        NewIssue {
            title: title.to_string(),
            description: None,
            category: Category::Communication,
            priority: Priority::Medium,
        }
    }

    #[test]
    fn add_issue_assigns_unique_ids() {
        let mut issues: Vec<Issue> = Vec::new();
        let a = add_issue(&mut issues, new_issue("Listen more"));
        let b = add_issue(&mut issues, new_issue("Budget check-ins"));
        assert_ne!(a, b);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id, a);
        assert_eq!(issues[1].id, b);
    }

    #[test]
    fn update_issue_merges_fields() {
        let mut issues: Vec<Issue> = Vec::new();
        let id = add_issue(&mut issues, new_issue("Listen more"));
        let created = issues[0].created_at;

        let applied = update_issue(
            &mut issues,
            &id,
            IssueUpdate {
                title: Some("Listen better".to_string()),
                priority: Some(Priority::High),
                ..Default::default()
            },
        );
        assert!(applied);
        assert_eq!(issues[0].title, "Listen better");
        assert_eq!(issues[0].priority, Priority::High);
        // Untouched fields survive the merge
        assert_eq!(issues[0].category, Category::Communication);
        assert_eq!(issues[0].id, id);
        assert_eq!(issues[0].created_at, created);
    }

    #[test]
    fn update_issue_unknown_id_is_noop() {
        let mut issues: Vec<Issue> = Vec::new();
        add_issue(&mut issues, new_issue("Listen more"));
        let before = issues.clone();

        let applied = update_issue(
            &mut issues,
            "nope",
            IssueUpdate {
                title: Some("x".to_string()),
                ..Default::default()
            },
        );
        assert!(!applied);
        assert_eq!(issues, before);
    }

    #[test]
    fn delete_issue_removes_only_match() {
        let mut issues: Vec<Issue> = Vec::new();
        let a = add_issue(&mut issues, new_issue("A"));
        let b = add_issue(&mut issues, new_issue("B"));

        assert!(delete_issue(&mut issues, &a));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, b);

        assert!(!delete_issue(&mut issues, &a));
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn connect_issues_dedupes() {
        let mut issues: Vec<Issue> = Vec::new();
        let a = add_issue(&mut issues, new_issue("A"));
        let b = add_issue(&mut issues, new_issue("B"));

        assert!(connect_issues(&mut issues, &a, &b));
        assert!(connect_issues(&mut issues, &a, &b));
        assert_eq!(issues[0].connections, vec![b.clone()]);
        // One-directional: B gained nothing
        assert!(issues[1].connections.is_empty());
    }

    #[test]
    fn connect_issues_unknown_source() {
        let mut issues: Vec<Issue> = Vec::new();
        add_issue(&mut issues, new_issue("A"));
        assert!(!connect_issues(&mut issues, "nope", "also-nope"));
    }
}
