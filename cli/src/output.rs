use colored::Colorize;
use lb_core::Item;
use serde::Serialize;

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn subheader(title: &str) {
    println!("{}", title.bold());
}

pub fn hint(msg: &str) {
    println!("{} {}", "hint:".cyan().bold(), msg.dimmed());
}

pub fn info(msg: &str) {
    eprintln!("{} {}", "info:".blue().bold(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn link(url: &str) -> String {
    if url == lb_core::PLACEHOLDER_URL || url.is_empty() {
        "(no link)".dimmed().to_string()
    } else {
        url.to_string()
    }
}

/// Prints one item as an indented block.
pub fn item(item: &Item) {
    println!("  {} {}", item.id.dimmed(), item.title.bold());
    println!("      download: {}", link(&item.download_url));
    println!("      refresh:  {}", link(&item.refresh_url));
    if let Some(stamp) = &item.last_refreshed {
        println!("      last refreshed: {}", stamp.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_does_not_panic() {
        header("General Work");
        subheader("Sales Reports");
    }

    #[test]
    fn test_messages_do_not_panic() {
        hint("Run `linkboard suggest`");
        info("Using local backend");
        warn("Nothing changed");
        success("Saved");
    }

    #[test]
    fn test_link_hides_placeholder() {
        assert!(link("#").contains("no link"));
        assert_eq!(link("https://example.com/a.xlsx"), "https://example.com/a.xlsx");
    }

    #[test]
    fn test_item_does_not_panic() {
        item(&Item::placeholder("1", "Weekly Sales Report").with_last_refreshed("2024-06-01T09:30:00.000Z"));
    }
}
