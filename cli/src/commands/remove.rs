use crate::commands::{GlobalArgs, report_outcome};
use crate::session::Session;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct RemoveArgs {
    #[arg(help = "Item id")]
    pub id: String
}

pub async fn run(global: &GlobalArgs, args: RemoveArgs) -> Result<()> {
    let session = Session::open(global).await?;
    let mut edit = session.board.begin_edit(global.passphrase.as_deref())?;
    let removed = edit.remove_item(&args.id)?;

    let outcome = session.board.save(edit).await;
    report_outcome(
        global,
        &outcome,
        &removed.id,
        &format!("Removed \"{}\"", removed.title)
    )?;
    session.close().await
}
