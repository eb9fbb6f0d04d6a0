use crate::cmd::{
    assignment_label, parse_due, require_title, resolve_action_id, resolve_assignment,
    resolve_issue_id, short,
};
use crate::output::{print_json, print_kv, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use tandem_core::action::{ActionUpdate, NewAction};
use tandem_core::store::Store;
use tandem_core::types::ActionStatus;
use tandem_core::views;

#[derive(Subcommand)]
pub enum ActionSubcommand {
    /// Create an action under an issue
    Add {
        issue_id: String,
        #[arg(required = true)]
        title: Vec<String>,
        /// both | partner1 | partner2 | partner id or name
        #[arg(long, default_value = "both")]
        assign: String,
        /// Due date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit action fields
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// both | partner1 | partner2 | partner id or name
        #[arg(long)]
        assign: Option<String>,
        /// Due date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Remove the due date
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
    },
    /// Move an action to a status (pending | in-progress | completed)
    Status { id: String, status: String },
    /// Shorthand for `status <id> completed`
    Complete { id: String },
    /// Delete an action
    Delete { id: String },
    /// Append a progress note (stamped with date and author)
    Note {
        id: String,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Show actions grouped into status columns
    Board,
    /// List actions
    List {
        /// Only actions covering this partner (id, name, partner1, partner2)
        #[arg(long)]
        partner: Option<String>,
        /// Only actions in this status
        #[arg(long)]
        status: Option<String>,
    },
    /// Show full details for a single action
    Get { id: String },
}

pub fn run(root: &Path, subcmd: ActionSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ActionSubcommand::Add {
            issue_id,
            title,
            assign,
            due,
            description,
        } => add(root, &issue_id, &title, &assign, due.as_deref(), description, json),
        ActionSubcommand::Edit {
            id,
            title,
            description,
            assign,
            due,
            clear_due,
        } => edit(
            root,
            &id,
            title,
            description,
            assign.as_deref(),
            due.as_deref(),
            clear_due,
            json,
        ),
        ActionSubcommand::Status { id, status } => set_status(root, &id, &status, json),
        ActionSubcommand::Complete { id } => set_status(root, &id, "completed", json),
        ActionSubcommand::Delete { id } => delete(root, &id, json),
        ActionSubcommand::Note { id, text } => note(root, &id, &text.join(" "), json),
        ActionSubcommand::Board => board(root, json),
        ActionSubcommand::List { partner, status } => {
            list(root, partner.as_deref(), status.as_deref(), json)
        }
        ActionSubcommand::Get { id } => get(root, &id, json),
    }
}

fn add(
    root: &Path,
    issue_id: &str,
    title: &[String],
    assign: &str,
    due: Option<&str>,
    description: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let title = require_title(title)?;
    let due_date = due.map(parse_due).transpose()?;

    let mut store = Store::load(root).context("failed to load store")?;
    let issue_id = resolve_issue_id(&store, issue_id)?;
    let assignment = resolve_assignment(&store, assign)?;
    let created_by = store
        .current_partner()
        .context("store has no partners")?
        .id
        .clone();

    let id = store.add_action(NewAction {
        issue_id,
        title: title.clone(),
        description,
        assignment,
        due_date,
        created_by,
    });
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "title": title }))?;
    } else {
        println!("Added action [{}]: {title}", short(&id));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn edit(
    root: &Path,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    assign: Option<&str>,
    due: Option<&str>,
    clear_due: bool,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(t) = &title {
        if t.trim().is_empty() {
            anyhow::bail!("title must not be blank");
        }
    }

    let mut store = Store::load(root).context("failed to load store")?;
    let id = resolve_action_id(&store, id)?;
    let assignment = assign.map(|a| resolve_assignment(&store, a)).transpose()?;
    let due_date = if clear_due {
        Some(None)
    } else {
        due.map(parse_due).transpose()?.map(Some)
    };

    store.update_action(
        &id,
        ActionUpdate {
            title,
            description,
            assignment,
            status: None,
            due_date,
        },
    );
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "updated": true }))?;
    } else {
        println!("Updated action [{}]", short(&id));
    }
    Ok(())
}

fn set_status(root: &Path, id: &str, status: &str, json: bool) -> anyhow::Result<()> {
    let status: ActionStatus = status.parse()?;

    let mut store = Store::load(root).context("failed to load store")?;
    let id = resolve_action_id(&store, id)?;
    store.update_action(
        &id,
        ActionUpdate {
            status: Some(status),
            ..Default::default()
        },
    );
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "status": status.to_string() }))?;
    } else {
        println!("Action [{}] is now {status}", short(&id));
    }
    Ok(())
}

fn delete(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = Store::load(root).context("failed to load store")?;
    let id = resolve_action_id(&store, id)?;
    store.delete_action(&id);
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("Deleted action [{}]", short(&id));
    }
    Ok(())
}

fn note(root: &Path, id: &str, text: &str, json: bool) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("note must not be blank");
    }

    let mut store = Store::load(root).context("failed to load store")?;
    let id = resolve_action_id(&store, id)?;
    store.append_note(&id, text);
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&serde_json::json!({ "id": id, "noted": true }))?;
    } else {
        println!("Noted on action [{}]", short(&id));
    }
    Ok(())
}

fn board(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = Store::load(root).context("failed to load store")?;
    let buckets = views::group_by_status(&store.actions);

    if json {
        print_json(&serde_json::json!({
            "pending": buckets.pending,
            "in_progress": buckets.in_progress,
            "completed": buckets.completed,
        }))?;
        return Ok(());
    }

    let columns = [
        ("Pending", &buckets.pending),
        ("In progress", &buckets.in_progress),
        ("Completed", &buckets.completed),
    ];
    for (heading, actions) in columns {
        println!("{heading} ({})", actions.len());
        for action in actions {
            println!(
                "  [{}] {} / {}",
                short(&action.id),
                action.title,
                views::issue_title(&store.issues, &action.issue_id)
            );
        }
        println!();
    }
    Ok(())
}

fn list(
    root: &Path,
    partner: Option<&str>,
    status: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let status = status.map(|s| s.parse::<ActionStatus>()).transpose()?;
    let store = Store::load(root).context("failed to load store")?;

    let partner_id = partner
        .map(|p| crate::cmd::resolve_partner(&store, p).map(|p| p.id.clone()))
        .transpose()?;

    let selected: Vec<_> = store
        .actions
        .iter()
        .filter(|a| {
            partner_id
                .as_deref()
                .map(|id| a.assignment.covers(id))
                .unwrap_or(true)
        })
        .filter(|a| status.map(|s| a.status == s).unwrap_or(true))
        .collect();

    if json {
        print_json(&selected)?;
        return Ok(());
    }

    if selected.is_empty() {
        println!("No matching actions.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = selected
        .iter()
        .map(|a| {
            vec![
                short(&a.id).to_string(),
                a.status.to_string(),
                assignment_label(&store, &a.assignment),
                a.due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                views::issue_title(&store.issues, &a.issue_id).to_string(),
                a.title.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "ASSIGNED", "DUE", "ISSUE", "TITLE"], &rows);
    Ok(())
}

fn get(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let store = Store::load(root).context("failed to load store")?;
    let id = resolve_action_id(&store, id)?;
    let action = store
        .actions
        .iter()
        .find(|a| a.id == id)
        .context("action disappeared mid-lookup")?;

    if json {
        print_json(action)?;
        return Ok(());
    }

    let mut pairs = vec![
        ("Action:", action.id.clone()),
        ("Title:", action.title.clone()),
        ("Status:", action.status.to_string()),
        ("Issue:", views::issue_title(&store.issues, &action.issue_id).to_string()),
        ("Assigned:", assignment_label(&store, &action.assignment)),
        ("Created:", action.created_at.format("%Y-%m-%d %H:%M").to_string()),
    ];
    if let Some(desc) = &action.description {
        pairs.push(("Description:", desc.clone()));
    }
    if let Some(due) = action.due_date {
        pairs.push(("Due:", due.format("%Y-%m-%d %H:%M").to_string()));
    }
    if let Some(at) = action.completed_at {
        let by = action
            .completed_by
            .as_deref()
            .and_then(|id| store.find_partner(id))
            .map(|p| p.name.clone())
            .or_else(|| action.completed_by.clone())
            .unwrap_or_default();
        pairs.push(("Completed:", format!("{} by {by}", at.format("%Y-%m-%d %H:%M"))));
    }
    print_kv(&pairs);

    if !action.notes.is_empty() {
        println!();
        println!("Notes:");
        for note in &action.notes {
            println!("  {note}");
        }
    }
    Ok(())
}
