use crate::cmd::resolve_partner;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use tandem_core::store::Store;

#[derive(Subcommand)]
pub enum PartnerSubcommand {
    /// Show the pair
    List,
    /// Switch the acting partner (id, name, partner1, or partner2)
    Use { who: String },
}

pub fn run(root: &Path, subcmd: PartnerSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PartnerSubcommand::List => list(root, json),
        PartnerSubcommand::Use { who } => use_partner(root, &who, json),
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = Store::load(root).context("failed to load store")?;

    if json {
        print_json(&store.partners)?;
        return Ok(());
    }

    let rows: Vec<Vec<String>> = store
        .partners
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                p.email.clone().unwrap_or_default(),
                if p.is_current { "yes".to_string() } else { String::new() },
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "EMAIL", "ACTING"], &rows);
    Ok(())
}

fn use_partner(root: &Path, who: &str, json: bool) -> anyhow::Result<()> {
    let mut store = Store::load(root).context("failed to load store")?;
    let id = resolve_partner(&store, who)?.id.clone();
    store.set_current_partner(&id);
    store.save(root).context("failed to save store")?;

    let name = store
        .current_partner()
        .context("store has no partners")?
        .name
        .clone();
    if json {
        print_json(&serde_json::json!({ "acting": name }))?;
    } else {
        println!("Acting partner: {name}");
    }
    Ok(())
}
