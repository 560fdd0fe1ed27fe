use crate::commands::{GlobalArgs, report_outcome};
use crate::session::Session;
use anyhow::Result;
use clap::Args;
use lb_core::{Item, PLACEHOLDER_URL};

#[derive(Args)]
pub struct AddArgs {
    #[arg(long, help = "Item title")]
    pub title: String,

    #[arg(long, default_value = PLACEHOLDER_URL, help = "Download link")]
    pub download_url: String,

    #[arg(long, default_value = PLACEHOLDER_URL, help = "Refresh link")]
    pub refresh_url: String,

    #[arg(long, default_value = "", help = "Category; empty means Uncategorized")]
    pub group: String
}

pub async fn run(global: &GlobalArgs, args: AddArgs) -> Result<()> {
    let session = Session::open(global).await?;
    let mut edit = session.board.begin_edit(global.passphrase.as_deref())?;

    let item = Item::new(
        utils::generate_item_id(),
        args.title,
        args.download_url,
        args.refresh_url
    )
    .with_group(args.group);
    let id = item.id.clone();
    edit.push_item(item)?;

    let outcome = session.board.save(edit).await;
    report_outcome(global, &outcome, &id, &format!("Added {id}"))?;
    session.close().await
}
