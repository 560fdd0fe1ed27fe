pub mod add;
pub mod banner;
pub mod edit;
pub mod list;
pub mod refresh;
pub mod remove;
pub mod status;
pub mod suggest;

use crate::output;
use anyhow::{Result, bail};
use board::Page;
use clap::{Args, Parser, Subcommand};
use config::Backend;
use std::path::PathBuf;
use sync::WriteOutcome;

#[derive(Parser)]
#[command(
    name = "linkboard",
    author,
    version,
    about = "Linkboard - categorized report links over a synchronized collection",
    long_about = "Browse, search and edit the report links of the General Work and Special \
                  Work pages.\n\nThe first run seeds the general page with the default \
                  reports. Configuration comes from --config, LB_* variables and flags."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    #[arg(long, global = true, env = "LB_CONFIG", help = "Configuration file (TOML or YAML)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Storage backend override: memory, local or remote")]
    pub backend: Option<Backend>,

    #[arg(
        long,
        global = true,
        default_value = "general",
        help = "Page to operate on: general or special"
    )]
    pub page: Page,

    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "LB_PASSPHRASE",
        hide_env_values = true,
        help = "Passphrase for editing and the special page"
    )]
    pub passphrase: Option<String>
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List items grouped by category")]
    List(list::ListArgs),

    #[command(about = "Add an item")]
    Add(add::AddArgs),

    #[command(about = "Change fields of an item")]
    Edit(edit::EditArgs),

    #[command(about = "Remove an item")]
    Remove(remove::RemoveArgs),

    #[command(about = "Mark an item as refreshed now")]
    Refresh(refresh::RefreshArgs),

    #[command(about = "Suggest new items for a search with no matches")]
    Suggest(suggest::SuggestArgs),

    #[command(about = "Show the current announcement")]
    Banner,

    #[command(about = "Show backend, collection and store status")]
    Status
}

/// Prints the result of a write to item `id`; a failed write is an error.
pub(crate) fn report_outcome(
    global: &GlobalArgs,
    outcome: &WriteOutcome,
    id: &str,
    done: &str
) -> Result<()> {
    if let WriteOutcome::Failed(failure) = outcome {
        bail!("{} error: {}", failure.kind, failure.message);
    }

    if global.json {
        let count = match outcome {
            WriteOutcome::Committed { count } => Some(*count),
            _ => None
        };
        return output::json(&serde_json::json!({
            "id": id,
            "committed": outcome.is_committed(),
            "count": count
        }));
    }

    match outcome {
        WriteOutcome::Committed { count } => {
            output::success(&format!("{done} ({count} items saved)"));
        }
        _ => output::warn("Nothing changed")
    }
    Ok(())
}
