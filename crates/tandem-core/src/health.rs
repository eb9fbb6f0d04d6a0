use crate::error::{Result, TandemError};
use crate::types::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CategoryScore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// 0-10.
    pub score: u8,
}

// ---------------------------------------------------------------------------
// RelationshipHealth
// ---------------------------------------------------------------------------

/// Externally-scored health snapshot. Never derived from the issue/action
/// collections; the scoring input arrives through the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipHealth {
    /// 0-10.
    pub overall: u8,
    pub categories: Vec<CategoryScore>,
    pub last_updated: DateTime<Utc>,
}

impl RelationshipHealth {
    /// Build a snapshot, range-checking every score. `categories` pairs
    /// each supplied category with its score; categories left unscored are
    /// simply absent.
    pub fn new(overall: u8, categories: Vec<(Category, u8)>) -> Result<Self> {
        check_score(overall)?;
        let mut scores = Vec::with_capacity(categories.len());
        for (category, score) in categories {
            check_score(score)?;
            scores.push(CategoryScore { category, score });
        }
        Ok(Self {
            overall,
            categories: scores,
            last_updated: Utc::now(),
        })
    }

    pub fn score_for(&self, category: Category) -> Option<u8> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.score)
    }
}

fn check_score(score: u8) -> Result<()> {
    if score > 10 {
        return Err(TandemError::ScoreOutOfRange(score));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range() {
        assert!(RelationshipHealth::new(11, vec![]).is_err());
        assert!(RelationshipHealth::new(7, vec![(Category::Finance, 12)]).is_err());
        assert!(RelationshipHealth::new(10, vec![(Category::Finance, 0)]).is_ok());
    }

    #[test]
    fn score_for_lookup() {
        let health = RelationshipHealth::new(
            8,
            vec![(Category::Communication, 6), (Category::Time, 9)],
        )
        .unwrap();
        assert_eq!(health.score_for(Category::Time), Some(9));
        assert_eq!(health.score_for(Category::Family), None);
    }

    #[test]
    fn yaml_roundtrip() {
        let health =
            RelationshipHealth::new(7, vec![(Category::PersonalGrowth, 5)]).unwrap();
        let yaml = serde_yaml::to_string(&health).unwrap();
        let parsed: RelationshipHealth = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, health);
    }
}
