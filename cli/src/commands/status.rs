use crate::commands::GlobalArgs;
use crate::output;
use crate::session::Session;
use anyhow::Result;
use colored::Colorize;

pub async fn run(global: &GlobalArgs) -> Result<()> {
    let session = Session::open(global).await?;
    let store = session.store();
    let snapshot = store.read();

    if global.json {
        output::json(&serde_json::json!({
            "page": session.page(),
            "backend": store.backend(),
            "collection": store.collection(),
            "items": snapshot.data.len(),
            "status": snapshot.status,
            "revision": snapshot.revision,
            "error": snapshot.error,
            "gate": session.board.gate().is_guarded()
        }))?;
        return session.close().await;
    }

    output::header("Linkboard Status");
    println!();
    print_value("page", session.page().title());
    print_value("backend", store.backend());
    print_value("collection", store.collection());
    print_value("items", &snapshot.data.len().to_string());
    print_value("status", &snapshot.status.to_string());
    print_value("revision", &snapshot.revision.to_string());
    print_value(
        "gate",
        if session.board.gate().is_guarded() { "passphrase" } else { "open" }
    );
    if let Some(failure) = &snapshot.error {
        println!("  {:<12} {}", "error:".red(), failure);
    }

    session.close().await
}

fn print_value(key: &str, value: &str) {
    println!("  {:<12} {}", format!("{key}:").dimmed(), value);
}
