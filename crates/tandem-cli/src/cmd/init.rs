use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use tandem_core::store::Store;

pub fn run(root: &Path, partner1: &str, partner2: &str, json: bool) -> anyhow::Result<()> {
    let partner1 = partner1.trim();
    let partner2 = partner2.trim();
    if partner1.is_empty() || partner2.is_empty() {
        anyhow::bail!("partner names must not be blank");
    }

    let store = Store::init(root, partner1, partner2).context("failed to initialize store")?;

    if json {
        print_json(&store.partners)?;
    } else {
        println!(
            "Initialized store for {} and {} in {}",
            partner1,
            partner2,
            tandem_core::paths::tandem_dir(root).display()
        );
        if let Some(acting) = store.current_partner() {
            println!("Acting partner: {}", acting.name);
        }
    }
    Ok(())
}
