use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Communication,
    Intimacy,
    Finance,
    Time,
    Family,
    PersonalGrowth,
    Other,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Communication,
            Category::Intimacy,
            Category::Finance,
            Category::Time,
            Category::Family,
            Category::PersonalGrowth,
            Category::Other,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Communication => "communication",
            Category::Intimacy => "intimacy",
            Category::Finance => "finance",
            Category::Time => "time",
            Category::Family => "family",
            Category::PersonalGrowth => "personal-growth",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::error::TandemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "communication" => Ok(Category::Communication),
            "intimacy" => Ok(Category::Intimacy),
            "finance" => Ok(Category::Finance),
            "time" => Ok(Category::Time),
            "family" => Ok(Category::Family),
            "personal-growth" | "personal_growth" => Ok(Category::PersonalGrowth),
            "other" => Ok(Category::Other),
            _ => Err(crate::error::TandemError::InvalidCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = crate::error::TandemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(crate::error::TandemError::InvalidPriority(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionStatus
// ---------------------------------------------------------------------------

/// Finite action state. Any status may move to any other; the completion
/// stamps are written and cleared only by `action::set_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    Pending,
    InProgress,
    Completed,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Pending => "pending",
            ActionStatus::InProgress => "in-progress",
            ActionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionStatus {
    type Err = crate::error::TandemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ActionStatus::Pending),
            "in-progress" | "in_progress" => Ok(ActionStatus::InProgress),
            "completed" => Ok(ActionStatus::Completed),
            _ => Err(crate::error::TandemError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Who an action belongs to: the whole pair, or one concrete partner.
///
/// The legacy `partner1`/`partner2` role aliases are resolved to a concrete
/// partner id at the CLI boundary and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assignment {
    Both,
    Partner { partner_id: String },
}

impl Assignment {
    pub fn partner(partner_id: impl Into<String>) -> Self {
        Assignment::Partner {
            partner_id: partner_id.into(),
        }
    }

    /// True if this assignment covers the given partner.
    pub fn covers(&self, partner_id: &str) -> bool {
        match self {
            Assignment::Both => true,
            Assignment::Partner { partner_id: id } => id == partner_id,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Both => f.write_str("both"),
            Assignment::Partner { partner_id } => write!(f, "partner:{}", partner_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
