mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    action::ActionSubcommand, health::HealthSubcommand, issue::IssueSubcommand,
    partner::PartnerSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tandem",
    about = "Couples' issue and action tracker — log friction points, derive action plans, watch progress",
    version,
    propagate_version = true
)]
struct Cli {
    /// Store root (default: walk up from cwd looking for .tandem/)
    #[arg(long, global = true, env = "TANDEM_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up a store for the two of you
    Init {
        /// First partner's display name (starts as the acting partner)
        partner1: String,
        /// Second partner's display name
        partner2: String,
    },

    /// Show or switch the acting partner
    Partner {
        #[command(subcommand)]
        subcommand: PartnerSubcommand,
    },

    /// Track relationship issues
    Issue {
        #[command(subcommand)]
        subcommand: IssueSubcommand,
    },

    /// Track actions derived from issues
    Action {
        #[command(subcommand)]
        subcommand: ActionSubcommand,
    },

    /// Record and show the externally-scored health snapshot
    Health {
        #[command(subcommand)]
        subcommand: HealthSubcommand,
    },

    /// Progress overview: totals, per-partner rates, overdue / due-soon /
    /// recent completions
    Dashboard,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { partner1, partner2 } => cmd::init::run(&root, &partner1, &partner2, cli.json),
        Commands::Partner { subcommand } => cmd::partner::run(&root, subcommand, cli.json),
        Commands::Issue { subcommand } => cmd::issue::run(&root, subcommand, cli.json),
        Commands::Action { subcommand } => cmd::action::run(&root, subcommand, cli.json),
        Commands::Health { subcommand } => cmd::health::run(&root, subcommand, cli.json),
        Commands::Dashboard => cmd::dashboard::run(&root, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
