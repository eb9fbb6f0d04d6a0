pub mod action;
pub mod dashboard;
pub mod health;
pub mod init;
pub mod issue;
pub mod partner;

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use tandem_core::partner::Partner;
use tandem_core::store::Store;
use tandem_core::types::Assignment;

// ---------------------------------------------------------------------------
// Form-layer helpers shared by the command modules
// ---------------------------------------------------------------------------

/// Join title words and reject blank input before the store is touched.
pub(crate) fn require_title(words: &[String]) -> anyhow::Result<String> {
    let title = words.join(" ").trim().to_string();
    if title.is_empty() {
        bail!("title must not be blank");
    }
    Ok(title)
}

/// Resolve a partner token: the legacy `partner1`/`partner2` aliases map to
/// the pair's first/second member, anything else is an id or name.
pub(crate) fn resolve_partner<'a>(store: &'a Store, token: &str) -> anyhow::Result<&'a Partner> {
    match token {
        "partner1" => store.partners.first().context("store has no partners"),
        "partner2" => store.partners.get(1).context("store has no second partner"),
        other => store
            .find_partner(other)
            .with_context(|| format!("unknown partner '{other}'")),
    }
}

/// Resolve an assignment token: `both`, a legacy alias, or a partner
/// id/name. Aliases never reach the store — only concrete ids do.
pub(crate) fn resolve_assignment(store: &Store, token: &str) -> anyhow::Result<Assignment> {
    if token == "both" {
        return Ok(Assignment::Both);
    }
    let partner = resolve_partner(store, token).with_context(|| {
        format!("invalid assignment '{token}' (use both, partner1, partner2, or a partner id/name)")
    })?;
    Ok(Assignment::partner(partner.id.clone()))
}

/// Parse a due date: RFC 3339, or a bare `YYYY-MM-DD` taken as midnight
/// UTC.
pub(crate) fn parse_due(s: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid due date '{s}' (expected RFC 3339 or YYYY-MM-DD)"))?;
    let midnight = date.and_hms_opt(0, 0, 0).context("invalid date")?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

/// Match an id exactly, or by unique prefix (ids are long; lists print the
/// first segment).
fn resolve_id<'a, I>(ids: I, key: &str, what: &str) -> anyhow::Result<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut matches: Vec<&str> = Vec::new();
    for id in ids {
        if id == key {
            return Ok(id.to_string());
        }
        if id.starts_with(key) {
            matches.push(id);
        }
    }
    match matches.as_slice() {
        [] => bail!("{what} '{key}' not found"),
        [only] => Ok(only.to_string()),
        _ => bail!("{what} id '{key}' is ambiguous"),
    }
}

pub(crate) fn resolve_issue_id(store: &Store, key: &str) -> anyhow::Result<String> {
    resolve_id(store.issues.iter().map(|i| i.id.as_str()), key, "issue")
}

pub(crate) fn resolve_action_id(store: &Store, key: &str) -> anyhow::Result<String> {
    resolve_id(store.actions.iter().map(|a| a.id.as_str()), key, "action")
}

/// Leading id segment shown in tables.
pub(crate) fn short(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

/// Render an assignment for humans, resolving ids back to names.
pub(crate) fn assignment_label(store: &Store, assignment: &Assignment) -> String {
    match assignment {
        Assignment::Both => "both".to_string(),
        Assignment::Partner { partner_id } => store
            .find_partner(partner_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| partner_id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_title_rejects_blank() {
        assert!(require_title(&[]).is_err());
        assert!(require_title(&["  ".to_string()]).is_err());
        assert_eq!(
            require_title(&["listen".to_string(), "more".to_string()]).unwrap(),
            "listen more"
        );
    }

    #[test]
    fn parse_due_accepts_both_forms() {
        assert!(parse_due("2026-08-07").is_ok());
        assert!(parse_due("2026-08-07T12:30:00Z").is_ok());
        assert!(parse_due("next tuesday").is_err());
    }

    #[test]
    fn resolve_assignment_aliases() {
        let store = Store::new("Avery", "Blake");
        let p1 = store.partners[0].id.clone();

        assert_eq!(resolve_assignment(&store, "both").unwrap(), Assignment::Both);
        assert_eq!(
            resolve_assignment(&store, "partner1").unwrap(),
            Assignment::partner(p1)
        );
        assert_eq!(
            resolve_assignment(&store, "blake").unwrap(),
            Assignment::partner(store.partners[1].id.clone())
        );
        assert!(resolve_assignment(&store, "casey").is_err());
    }

    #[test]
    fn resolve_id_prefix() {
        let ids = ["abcd-1", "abxy-2"];
        assert_eq!(
            resolve_id(ids.iter().copied(), "abcd", "issue").unwrap(),
            "abcd-1"
        );
        assert!(resolve_id(ids.iter().copied(), "ab", "issue").is_err());
        assert!(resolve_id(ids.iter().copied(), "zz", "issue").is_err());
    }
}
