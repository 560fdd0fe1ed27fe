use crate::commands::GlobalArgs;
use crate::output;
use crate::session::Session;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, short, default_value = "", help = "Only items whose title or group contains TERM")]
    pub search: String
}

pub async fn run(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let session = Session::open(global).await?;
    let page = session.page();
    let groups = session.board.search(&args.search);

    if global.json {
        output::json(&serde_json::json!({
            "page": page,
            "collection": session.store().collection(),
            "groups": groups
        }))?;
        return session.close().await;
    }

    output::header(page.title());
    if let Some(failure) = &session.board.snapshot().error {
        output::warn(&failure.to_string());
    }

    if groups.is_empty() {
        println!();
        if args.search.trim().is_empty() {
            println!("  No items on this page.");
        } else {
            println!("  No items match \"{}\".", args.search.trim());
            output::hint(&format!(
                "run `linkboard suggest \"{}\"` for suggestions",
                args.search.trim()
            ));
        }
    }

    for group in &groups {
        println!();
        output::subheader(&group.name);
        for item in &group.items {
            output::item(item);
        }
    }

    session.close().await
}
