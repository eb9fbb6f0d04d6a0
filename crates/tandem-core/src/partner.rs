use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Partner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Which partner is acting in this session. Exactly one of the pair
    /// carries the flag.
    #[serde(default)]
    pub is_current: bool,
}

impl Partner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: None,
            avatar: None,
            is_current: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Pair operations
// ---------------------------------------------------------------------------

/// The partner currently acting. Falls back to the first of the pair if
/// the flag was lost (e.g. a hand-edited store file).
pub fn current_partner(partners: &[Partner]) -> Option<&Partner> {
    partners.iter().find(|p| p.is_current).or_else(|| partners.first())
}

/// Look a partner up by id, or by case-insensitive name.
pub fn find_partner<'a>(partners: &'a [Partner], key: &str) -> Option<&'a Partner> {
    partners
        .iter()
        .find(|p| p.id == key)
        .or_else(|| partners.iter().find(|p| p.name.eq_ignore_ascii_case(key)))
}

/// Move the current flag to the partner matching `key`. Returns `false`
/// when no partner matches; the flag is untouched in that case.
pub fn set_current(partners: &mut [Partner], key: &str) -> bool {
    let Some(id) = find_partner(partners, key).map(|p| p.id.clone()) else {
        return false;
    };
    for p in partners.iter_mut() {
        p.is_current = p.id == id;
    }
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
