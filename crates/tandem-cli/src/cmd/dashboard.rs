use crate::cmd::short;
use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use tandem_core::action::Action;
use tandem_core::progress::{
    self, category_progress, partner_progress, recent_completions, summarize, upcoming_due,
};
use tandem_core::store::Store;
use tandem_core::views;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = Store::load(root).context("failed to load store")?;
    let now = Utc::now();

    let overall = summarize(&store.actions);
    let overdue: Vec<&Action> = store
        .actions
        .iter()
        .filter(|a| views::is_overdue(a, now))
        .collect();
    let due_soon: Vec<&Action> = store
        .actions
        .iter()
        .filter(|a| views::is_due_soon(a, now))
        .collect();
    let recent = recent_completions(&store.actions, now, progress::DASHBOARD_CAP);
    let upcoming = upcoming_due(&store.actions, now, progress::DASHBOARD_CAP);

    if json {
        let per_partner: Vec<serde_json::Value> = store
            .partners
            .iter()
            .map(|p| {
                serde_json::json!({
                    "partner": p.name,
                    "progress": partner_progress(&store.actions, &p.id),
                })
            })
            .collect();
        let per_category: Vec<serde_json::Value> = category_progress(&store.issues, &store.actions)
            .into_iter()
            .map(|(category, summary)| {
                serde_json::json!({ "category": category.to_string(), "progress": summary })
            })
            .collect();
        print_json(&serde_json::json!({
            "overall": overall,
            "per_partner": per_partner,
            "per_category": per_category,
            "overdue": overdue,
            "due_soon": due_soon,
            "recent_completions": recent,
            "upcoming": upcoming,
            "health": store.health,
        }))?;
        return Ok(());
    }

    println!(
        "{}/{} actions completed ({}%), {} in progress",
        overall.completed, overall.total, overall.completion_rate, overall.in_progress
    );

    for partner in &store.partners {
        let mine = partner_progress(&store.actions, &partner.id);
        println!(
            "  {}: {}/{} ({}%)",
            partner.name, mine.completed, mine.total, mine.completion_rate
        );
    }

    let per_category = category_progress(&store.issues, &store.actions);
    if !per_category.is_empty() {
        println!();
        let rows: Vec<Vec<String>> = per_category
            .iter()
            .map(|(category, summary)| {
                vec![
                    category.to_string(),
                    format!("{}/{}", summary.completed, summary.total),
                    format!("{}%", summary.completion_rate),
                ]
            })
            .collect();
        print_table(&["CATEGORY", "DONE", "RATE"], &rows);
    }

    if let Some(health) = &store.health {
        println!();
        println!(
            "Health: {}/10 (updated {})",
            health.overall,
            health.last_updated.format("%Y-%m-%d")
        );
    }

    print_section(&store, "Overdue", &overdue, |a| {
        a.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    });
    print_section(&store, "Due soon", &due_soon, |a| {
        a.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    });
    print_section(&store, "Completed in the last day", &recent, |a| {
        a.completed_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    });
    print_section(&store, "Coming up", &upcoming, |a| {
        a.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    });

    Ok(())
}

fn print_section(store: &Store, heading: &str, actions: &[&Action], stamp: impl Fn(&Action) -> String) {
    if actions.is_empty() {
        return;
    }
    println!();
    println!("{heading}:");
    for action in actions {
        println!(
            "  [{}] {} / {} ({})",
            short(&action.id),
            action.title,
            views::issue_title(&store.issues, &action.issue_id),
            stamp(action)
        );
    }
}
