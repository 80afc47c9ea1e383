use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod context;
mod helper;
mod input;
mod logging;
mod render;

use context::AppContext;

#[derive(Parser)]
#[command(name = "headlamp")]
#[command(about = "Headlamp - find partner organizations and apply for help through a conversation", long_about = None)]
struct Cli {
    /// Keep config, identity and logs under this directory instead of the
    /// platform defaults
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive conversation
    Chat,
    /// List submitted applications
    Applications {
        /// Watch for a newly submitted application before listing
        #[arg(long)]
        watch: bool,
    },
    /// Inspect or forget the anonymous identity
    Identity {
        #[command(subcommand)]
        action: IdentityAction,
    },
}

#[derive(Subcommand)]
enum IdentityAction {
    /// Print the persisted user id
    Show,
    /// Delete the persisted user id
    Forget,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::load(cli.home.as_deref())?;

    let log_path = logging::init_file_logging(&ctx.paths)?;
    tracing::info!(log = %log_path.display(), api = %ctx.config.api_base_url, "Headlamp starting");

    let result = match cli.command {
        Commands::Chat => commands::chat::run(&ctx).await,
        Commands::Applications { watch } => commands::applications::run(&ctx, watch).await,
        Commands::Identity { action } => match action {
            IdentityAction::Show => commands::identity::show(&ctx).await,
            IdentityAction::Forget => commands::identity::forget(&ctx).await,
        },
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("{}", format!("Error: {e:#}").red());
    }
    result
}
