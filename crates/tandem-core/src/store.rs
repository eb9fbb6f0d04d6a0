use crate::action::{self, Action, ActionUpdate, NewAction};
use crate::error::{Result, TandemError};
use crate::health::RelationshipHealth;
use crate::issue::{self, Issue, IssueUpdate, NewIssue};
use crate::partner::{self, Partner};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// The single owned state container. Every surface reads through it and
/// mutates through the methods below; no caller holds a private mutable
/// copy of a collection. Collections keep insertion order, appended at the
/// tail on create — views apply their own ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default = "default_version")]
    pub version: u32,
    pub partners: Vec<Partner>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<RelationshipHealth>,
    pub last_updated: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

impl Store {
    /// A fresh store for a pair. The first partner starts as the acting
    /// one.
    pub fn new(partner1: impl Into<String>, partner2: impl Into<String>) -> Self {
        let mut first = Partner::new(partner1);
        first.is_current = true;
        let second = Partner::new(partner2);
        Self {
            version: 1,
            partners: vec![first, second],
            issues: Vec::new(),
            actions: Vec::new(),
            health: None,
            last_updated: Utc::now(),
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Create and persist a fresh store under `root`. Refuses to clobber
    /// an existing one.
    pub fn init(
        root: &Path,
        partner1: impl Into<String>,
        partner2: impl Into<String>,
    ) -> Result<Self> {
        let path = paths::store_path(root);
        if path.exists() {
            return Err(TandemError::AlreadyInitialized(path.display().to_string()));
        }
        let store = Self::new(partner1, partner2);
        store.save(root)?;
        Ok(store)
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::store_path(root);
        if !path.exists() {
            return Err(TandemError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let store: Store = serde_yaml::from_str(&data)?;
        Ok(store)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::store_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // ---------------------------------------------------------------------------
    // Partners
    // ---------------------------------------------------------------------------

    /// The partner acting in this session. `None` only for a store whose
    /// partner list was emptied by hand.
    pub fn current_partner(&self) -> Option<&Partner> {
        partner::current_partner(&self.partners)
    }

    pub fn find_partner(&self, key: &str) -> Option<&Partner> {
        partner::find_partner(&self.partners, key)
    }

    pub fn set_current_partner(&mut self, key: &str) -> bool {
        let applied = partner::set_current(&mut self.partners, key);
        if applied {
            self.touch();
        }
        applied
    }

    // ---------------------------------------------------------------------------
    // Issue mutations
    // ---------------------------------------------------------------------------

    pub fn add_issue(&mut self, new: NewIssue) -> String {
        let id = issue::add_issue(&mut self.issues, new);
        self.touch();
        id
    }

    pub fn update_issue(&mut self, id: &str, update: IssueUpdate) -> bool {
        let applied = issue::update_issue(&mut self.issues, id, update);
        if applied {
            self.touch();
        }
        applied
    }

    pub fn delete_issue(&mut self, id: &str) -> bool {
        let applied = issue::delete_issue(&mut self.issues, id);
        if applied {
            self.touch();
        }
        applied
    }

    pub fn connect_issues(&mut self, id: &str, other_id: &str) -> bool {
        let applied = issue::connect_issues(&mut self.issues, id, other_id);
        if applied {
            self.touch();
        }
        applied
    }

    // ---------------------------------------------------------------------------
    // Action mutations
    // ---------------------------------------------------------------------------

    pub fn add_action(&mut self, new: NewAction) -> String {
        let id = action::add_action(&mut self.actions, new);
        self.touch();
        id
    }

    /// Merge fields into an action; the acting partner is taken from the
    /// current-partner flag so completion stamps record who actually did
    /// the completing.
    pub fn update_action(&mut self, id: &str, update: ActionUpdate) -> bool {
        let Some(acting) = self.current_partner().map(|p| p.id.clone()) else {
            return false;
        };
        let applied = action::update_action(&mut self.actions, id, update, &acting);
        if applied {
            self.touch();
        }
        applied
    }

    pub fn delete_action(&mut self, id: &str) -> bool {
        let applied = action::delete_action(&mut self.actions, id);
        if applied {
            self.touch();
        }
        applied
    }

    /// Append a note authored by the current partner (by display name).
    pub fn append_note(&mut self, action_id: &str, text: &str) -> bool {
        let Some(author) = self.current_partner().map(|p| p.name.clone()) else {
            return false;
        };
        let applied = action::append_note(&mut self.actions, action_id, &author, text);
        if applied {
            self.touch();
        }
        applied
    }

    // ---------------------------------------------------------------------------
    // Health
    // ---------------------------------------------------------------------------

    /// Replace the health snapshot with externally-scored input.
    pub fn set_health(&mut self, health: RelationshipHealth) {
        self.health = Some(health);
        self.touch();
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionStatus, Assignment, Category, Priority};
    use tempfile::TempDir;

    fn new_issue(title: &str) -> NewIssue {
        NewIssue {
            title: title.to_string(),
            description: None,
            category: Category::Communication,
            priority: Priority::Medium,
        }
    }

    fn new_action(store: &Store, issue_id: &str) -> NewAction {
        NewAction {
            issue_id: issue_id.to_string(),
            title: "Plan date night".to_string(),
            description: None,
            assignment: Assignment::Both,
            due_date: None,
            created_by: store.current_partner().unwrap().id.clone(),
        }
    }

    #[test]
    fn init_refuses_existing_store() {
        let dir = TempDir::new().unwrap();
        Store::init(dir.path(), "Avery", "Blake").unwrap();
        assert!(matches!(
            Store::init(dir.path(), "Avery", "Blake"),
            Err(TandemError::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn load_without_init() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Store::load(dir.path()),
            Err(TandemError::NotInitialized)
        ));
    }

    #[test]
    fn roundtrip_is_deep_equal() {
        let dir = TempDir::new().unwrap();
        let mut store = Store::init(dir.path(), "Avery", "Blake").unwrap();

        let issue_id = store.add_issue(new_issue("Listen more"));
        store.connect_issues(&issue_id, "dangling-id");
        let action = new_action(&store, &issue_id);
        let action_id = store.add_action(action);
        store.append_note(&action_id, "first step done");
        store.update_action(
            &action_id,
            ActionUpdate {
                status: Some(ActionStatus::Completed),
                ..Default::default()
            },
        );
        store.set_health(
            RelationshipHealth::new(8, vec![(Category::Communication, 7)]).unwrap(),
        );
        store.save(dir.path()).unwrap();

        let loaded = Store::load(dir.path()).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn completion_acting_partner_is_current() {
        let mut store = Store::new("Avery", "Blake");
        let issue_id = store.add_issue(new_issue("Listen more"));
        let action_id = store.add_action(new_action(&store, &issue_id));

        let blake_id = store.find_partner("Blake").unwrap().id.clone();
        store.set_current_partner("Blake");
        store.update_action(
            &action_id,
            ActionUpdate {
                status: Some(ActionStatus::Completed),
                ..Default::default()
            },
        );
        assert_eq!(store.actions[0].completed_by.as_deref(), Some(blake_id.as_str()));
    }

    #[test]
    fn note_author_is_current_partner_name() {
        let mut store = Store::new("Avery", "Blake");
        let issue_id = store.add_issue(new_issue("Listen more"));
        let action_id = store.add_action(new_action(&store, &issue_id));

        store.append_note(&action_id, "called the therapist");
        assert!(store.actions[0].notes[0].contains("(Avery):"));
    }

    #[test]
    fn failed_mutations_leave_stamp_alone() {
        let mut store = Store::new("Avery", "Blake");
        let before = store.last_updated;
        assert!(!store.delete_issue("nope"));
        assert!(!store.append_note("nope", "text"));
        assert_eq!(store.last_updated, before);
    }

    #[test]
    fn delete_issue_keeps_actions() {
        let mut store = Store::new("Avery", "Blake");
        let issue_id = store.add_issue(new_issue("Listen more"));
        store.add_action(new_action(&store, &issue_id));

        assert!(store.delete_issue(&issue_id));
        assert_eq!(store.actions.len(), 1);
        assert_eq!(store.actions[0].issue_id, issue_id);
    }
}
