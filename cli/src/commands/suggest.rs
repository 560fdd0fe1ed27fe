use crate::commands::{GlobalArgs, report_outcome};
use crate::output;
use crate::session::{Session, offer_path};
use anyhow::{Context, Result};
use board::{GeminiSuggestionProvider, SuggestionOffer};
use clap::Args;
use std::path::Path;

#[derive(Args)]
pub struct SuggestArgs {
    #[arg(help = "Search term that matched nothing")]
    pub term: String,

    #[arg(
        long,
        value_name = "N",
        help = "Add the Nth suggestion (1-based) last shown for this term"
    )]
    pub accept: Option<usize>
}

pub async fn run(global: &GlobalArgs, args: SuggestArgs) -> Result<()> {
    let session = Session::open(global).await?;
    let offer_file = offer_path(&session.config);

    if let Some(number) = args.accept {
        return accept(global, session, &offer_file, &args.term, number).await;
    }

    let provider = GeminiSuggestionProvider::new(&session.config.suggestions)?;
    let offer = session.board.offer_suggestions(&provider, &args.term).await;
    if offer.suggestions.is_empty() {
        SuggestionOffer::discard(&offer_file)?;
    } else {
        offer.save(&offer_file)?;
    }

    if global.json {
        output::json(&offer.suggestions)?;
        return session.close().await;
    }

    if offer.suggestions.is_empty() {
        output::info("No suggestions");
    } else {
        output::header(&format!("Suggestions for \"{}\"", offer.term));
        for (index, suggestion) in offer.suggestions.iter().enumerate() {
            println!("  {}. {} ({})", index + 1, suggestion.title, suggestion.group);
        }
        output::hint("rerun with --accept N to add one");
    }
    session.close().await
}

/// Adds one of the suggestions saved by the last run for the same page and
/// term. The model is not asked again.
async fn accept(
    global: &GlobalArgs,
    session: Session,
    offer_file: &Path,
    term: &str,
    number: usize
) -> Result<()> {
    let term = term.trim();
    let offer = SuggestionOffer::load(offer_file)?
        .filter(|offer| offer.matches(session.page(), term))
        .with_context(|| {
            format!("No saved suggestions for \"{term}\"; run `linkboard suggest {term}` first")
        })?;

    let outcome = session.board.accept_offered(&offer, number).await?;
    if outcome.is_committed() {
        SuggestionOffer::discard(offer_file)?;
    }

    let title = offer
        .get(number)
        .map(|suggestion| suggestion.title.clone())
        .unwrap_or_default();
    let id = session
        .board
        .snapshot()
        .data
        .last()
        .map(|item| item.id.clone())
        .unwrap_or_default();
    report_outcome(global, &outcome, &id, &format!("Added \"{title}\""))?;
    session.close().await
}
