use crate::commands::{GlobalArgs, report_outcome};
use crate::session::Session;
use anyhow::{Result, bail};
use board::ItemField;
use clap::Args;

#[derive(Args)]
pub struct EditArgs {
    #[arg(help = "Item id")]
    pub id: String,

    #[arg(long, help = "New title")]
    pub title: Option<String>,

    #[arg(long, help = "New download link")]
    pub download_url: Option<String>,

    #[arg(long, help = "New refresh link")]
    pub refresh_url: Option<String>,

    #[arg(long, help = "New category; empty means Uncategorized")]
    pub group: Option<String>
}

impl EditArgs {
    fn changes(self) -> Vec<(ItemField, String)> {
        [
            (ItemField::Title, self.title),
            (ItemField::DownloadUrl, self.download_url),
            (ItemField::RefreshUrl, self.refresh_url),
            (ItemField::Group, self.group)
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect()
    }
}

pub async fn run(global: &GlobalArgs, args: EditArgs) -> Result<()> {
    let id = args.id.clone();
    let changes = args.changes();
    if changes.is_empty() {
        bail!("Nothing to change: pass at least one of --title, --download-url, --refresh-url, --group");
    }

    let session = Session::open(global).await?;
    let mut edit = session.board.begin_edit(global.passphrase.as_deref())?;
    for (field, value) in changes {
        edit.set_field(&id, field, value)?;
    }

    let outcome = session.board.save(edit).await;
    report_outcome(global, &outcome, &id, &format!("Updated {id}"))?;
    session.close().await
}
