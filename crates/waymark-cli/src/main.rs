mod cmd_checkpoint;
mod cmd_decision;
mod cmd_handoff;
mod cmd_init;
mod cmd_save;
mod cmd_setup;
mod cmd_status;
mod cmd_sync;
mod cmd_tree;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "waymark",
    version,
    about = "Project-state snapshots and handoffs for coding sessions"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seed .context/README.md and .context/decisions.log
    Init,
    /// Save the current project state to .context/current_state.md
    Save {
        /// What changed in this session
        description: String,
        /// Quiet mode for hooks (no output on success)
        #[arg(long)]
        auto: bool,
    },
    /// Write an immutable, timestamped checkpoint
    Checkpoint {
        /// Milestone description
        description: String,
    },
    /// Regenerate .context/handoff.md with continuation instructions
    Handoff,
    /// Show branch, checkpoints, and last context update
    Status,
    /// Append an entry to .context/decisions.log
    LogDecision {
        /// Category (e.g. ARCH, API, DB); stored upper-cased
        category: String,
        /// Decision text
        description: String,
    },
    /// Print the project file tree
    Tree {
        /// Maximum depth (default: from .context/config.json or 2)
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Mirror .context/ to the configured Notion database
    Sync,
    /// Create a Notion status page and print its ID
    CreatePage,
    /// Store Notion credentials in .env
    Setup,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("WAYMARK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let repo_root = std::env::current_dir()?;

    let result = match cli.cmd {
        Command::Init => cmd_init::execute(&repo_root),
        Command::Save { description, auto } => cmd_save::execute(&repo_root, &description, auto),
        Command::Checkpoint { description } => cmd_checkpoint::execute(&repo_root, &description),
        Command::Handoff => cmd_handoff::execute(&repo_root),
        Command::Status => cmd_status::execute(&repo_root),
        Command::LogDecision {
            category,
            description,
        } => cmd_decision::execute(&repo_root, &category, &description),
        Command::Tree { depth } => cmd_tree::execute(&repo_root, depth),
        Command::Sync => return cmd_sync::sync(&repo_root),
        Command::CreatePage => cmd_sync::create_page(&repo_root),
        Command::Setup => cmd_setup::execute(&repo_root),
    };
    result.map(|()| ExitCode::SUCCESS)
}
