use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use tandem_core::health::RelationshipHealth;
use tandem_core::store::Store;
use tandem_core::types::Category;

#[derive(Subcommand)]
pub enum HealthSubcommand {
    /// Replace the health snapshot (scores 0-10)
    Set {
        #[arg(long)]
        overall: u8,
        #[arg(long)]
        communication: Option<u8>,
        #[arg(long)]
        intimacy: Option<u8>,
        #[arg(long)]
        finance: Option<u8>,
        #[arg(long)]
        time: Option<u8>,
        #[arg(long)]
        family: Option<u8>,
        #[arg(long)]
        personal_growth: Option<u8>,
        #[arg(long)]
        other: Option<u8>,
    },
    /// Show the latest snapshot
    Show,
}

pub fn run(root: &Path, subcmd: HealthSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        HealthSubcommand::Set {
            overall,
            communication,
            intimacy,
            finance,
            time,
            family,
            personal_growth,
            other,
        } => {
            let scores: Vec<(Category, u8)> = [
                (Category::Communication, communication),
                (Category::Intimacy, intimacy),
                (Category::Finance, finance),
                (Category::Time, time),
                (Category::Family, family),
                (Category::PersonalGrowth, personal_growth),
                (Category::Other, other),
            ]
            .into_iter()
            .filter_map(|(cat, score)| score.map(|s| (cat, s)))
            .collect();
            set(root, overall, scores, json)
        }
        HealthSubcommand::Show => show(root, json),
    }
}

fn set(root: &Path, overall: u8, scores: Vec<(Category, u8)>, json: bool) -> anyhow::Result<()> {
    let health = RelationshipHealth::new(overall, scores)?;

    let mut store = Store::load(root).context("failed to load store")?;
    store.set_health(health);
    store.save(root).context("failed to save store")?;

    if json {
        print_json(&store.health)?;
    } else {
        println!("Health snapshot recorded (overall {overall}/10)");
    }
    Ok(())
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let store = Store::load(root).context("failed to load store")?;

    let Some(health) = &store.health else {
        if json {
            print_json(&serde_json::Value::Null)?;
        } else {
            println!("No health snapshot yet. Record one with 'tandem health set'.");
        }
        return Ok(());
    };

    if json {
        print_json(health)?;
        return Ok(());
    }

    println!(
        "Overall {}/10 (updated {})",
        health.overall,
        health.last_updated.format("%Y-%m-%d")
    );
    if !health.categories.is_empty() {
        println!();
        let rows: Vec<Vec<String>> = health
            .categories
            .iter()
            .map(|c| vec![c.category.to_string(), format!("{}/10", c.score)])
            .collect();
        print_table(&["CATEGORY", "SCORE"], &rows);
    }
    Ok(())
}
