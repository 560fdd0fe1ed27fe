use crate::commands::{GlobalArgs, report_outcome};
use crate::session::Session;
use anyhow::{Result, bail};
use clap::Args;
use sync::WriteOutcome;

#[derive(Args)]
pub struct RefreshArgs {
    #[arg(help = "Item id")]
    pub id: String
}

pub async fn run(global: &GlobalArgs, args: RefreshArgs) -> Result<()> {
    let session = Session::open(global).await?;

    let outcome = session.board.refresh_item(&args.id).await;
    if outcome == WriteOutcome::Unchanged && session.board.snapshot().find(&args.id).is_none() {
        session.close().await?;
        bail!("No item with id {}", args.id);
    }

    report_outcome(global, &outcome, &args.id, &format!("Refreshed {}", args.id))?;
    session.close().await
}
