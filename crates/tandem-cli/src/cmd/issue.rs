use crate::cmd::{require_title, resolve_issue_id, short};
use crate::output::{print_json, print_kv, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use tandem_core::issue::{IssueUpdate, NewIssue, Position};
use tandem_core::store::Store;
use tandem_core::types::{Category, Priority};
use tandem_core::views;

#[derive(Subcommand)]
pub enum IssueSubcommand {
    /// Record a new issue
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        /// communication | intimacy | finance | time | family | personal-growth | other
        #[arg(long, default_value = "other")]
        category: String,
        /// low | medium | high
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit issue fields
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Layout x coordinate
        #[arg(long)]
        x: Option<f64>,
        /// Layout y coordinate
        #[arg(long)]
        y: Option<f64>,
    },
    /// Delete an issue (its actions are kept)
    Delete { id: String },
    /// Connect an issue to a related one
    Connect { id: String, other_id: String },
    /// List issues
    List,
    /// Show full details for a single issue
    Get { id: String },
}

pub fn run(root: &Path, subcmd: IssueSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        IssueSubcommand::Add {
            title,
            category,
            priority,
            description,
        } => add(root, &title, &category, &priority, description, json),
        IssueSubcommand::Edit {
            id,
            title,
            description,
            category,
            priority,
            x,
            y,
        } => edit(root, &id, title, description, category, priority, x, y, json),
        IssueSubcommand::Delete { id } => delete(root, &id, json),
        IssueSubcommand::Connect { id, other_id } => connect(root, &id, &other_id, json),
        IssueSubcommand::List => list(root, json),
        IssueSubcommand::Get { id } => get(root, &id, json),
    }
}

fn add(
    root: &Path,
    title: &[String],
    category: &str,
    priority: &str,
    description: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let title = require_title(title)?;
    let category: Category = category.parse()?;
    let priority: Priority = priority.parse()?;

    let mut store = Store::load(root).context("failed to load store")?;
    let id = store.add_issue(NewIssue {
        title: title.clone(),
        description,
        category,
        priority,
    });
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "title": title }))?;
    } else {
        println!("Added issue [{}]: {title}", short(&id));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn edit(
    root: &Path,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(t) = &title {
        if t.trim().is_empty() {
            anyhow::bail!("title must not be blank");
        }
    }
    let category = category.map(|c| c.parse::<Category>()).transpose()?;
    let priority = priority.map(|p| p.parse::<Priority>()).transpose()?;

    let mut store = Store::load(root).context("failed to load store")?;
    let id = resolve_issue_id(&store, id)?;

    let position = match (x, y) {
        (None, None) => None,
        (x, y) => {
            let current = store
                .issues
                .iter()
                .find(|i| i.id == id)
                .map(|i| i.position)
                .unwrap_or_default();
            Some(Position {
                x: x.unwrap_or(current.x),
                y: y.unwrap_or(current.y),
            })
        }
    };

    store.update_issue(
        &id,
        IssueUpdate {
            title,
            description,
            category,
            priority,
            position,
        },
    );
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "updated": true }))?;
    } else {
        println!("Updated issue [{}]", short(&id));
    }
    Ok(())
}

fn delete(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = Store::load(root).context("failed to load store")?;
    let id = resolve_issue_id(&store, id)?;
    store.delete_issue(&id);
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("Deleted issue [{}] (its actions were kept)", short(&id));
    }
    Ok(())
}

fn connect(root: &Path, id: &str, other_id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = Store::load(root).context("failed to load store")?;
    let id = resolve_issue_id(&store, id)?;
    let other_id = resolve_issue_id(&store, other_id)?;
    store.connect_issues(&id, &other_id);
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "connected_to": other_id }))?;
    } else {
        println!("Connected issue [{}] to [{}]", short(&id), short(&other_id));
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = Store::load(root).context("failed to load store")?;

    if json {
        print_json(&store.issues)?;
        return Ok(());
    }

    if store.issues.is_empty() {
        println!("No issues yet.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = store
        .issues
        .iter()
        .map(|i| {
            vec![
                short(&i.id).to_string(),
                i.category.to_string(),
                i.priority.to_string(),
                i.title.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "CATEGORY", "PRIORITY", "TITLE"], &rows);
    Ok(())
}

fn get(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = Store::load(root).context("failed to load store")?;
    let id = resolve_issue_id(&store, id)?;
    let issue = store
        .issues
        .iter()
        .find(|i| i.id == id)
        .context("issue disappeared mid-lookup")?;

    if json {
        print_json(issue)?;
        return Ok(());
    }

    let mut pairs = vec![
        ("Issue:", issue.id.clone()),
        ("Title:", issue.title.clone()),
        ("Category:", issue.category.to_string()),
        ("Priority:", issue.priority.to_string()),
        ("Created:", issue.created_at.format("%Y-%m-%d %H:%M").to_string()),
    ];
    if let Some(desc) = &issue.description {
        pairs.push(("Description:", desc.clone()));
    }
    if !issue.connections.is_empty() {
        let titles: Vec<String> = issue
            .connections
            .iter()
            .map(|c| views::issue_title(&store.issues, c).to_string())
            .collect();
        pairs.push(("Connected:", titles.join(", ")));
    }
    print_kv(&pairs);
    Ok(())
}
