//! Two-page dashboard over synchronized collections.

use crate::edit::EditSession;
use crate::error::BoardError;
use crate::gate::{GateDecision, ViewGate};
use crate::suggestions::{SuggestionOffer, SuggestionProvider, promote};
use crate::view::{ItemGroup, filter_items, group_items, wants_suggestions};
use config::Config;
use lb_core::{CollectionAdapter, Item};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};
use sync::{CollectionStore, Snapshot, WriteOutcome};
use tracing::{info, warn};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Page {
    #[default]
    General,
    Special
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::General => "General Work",
            Page::Special => "Special Work"
        }
    }
}

pub struct Board {
    general: CollectionStore,
    special: CollectionStore,
    gate: ViewGate,
    page: Page
}

impl Board {
    pub fn new(general: CollectionStore, special: CollectionStore, gate: ViewGate) -> Self {
        Self {
            general,
            special,
            gate,
            page: Page::General
        }
    }

    /// Board over `adapter` with the configured collection names. The
    /// general page is seeded with the default reports; the special page
    /// starts empty.
    pub fn from_config(config: &Config, adapter: Arc<dyn CollectionAdapter>) -> Self {
        let metrics = config.observability.metrics_enabled;
        let general = CollectionStore::new(
            Arc::clone(&adapter),
            config.store.general_collection.clone(),
            lb_core::default_items()
        )
        .with_metrics(metrics);
        let special =
            CollectionStore::new(adapter, config.store.special_collection.clone(), Vec::new())
                .with_metrics(metrics);

        Self::new(general, special, ViewGate::from_config(&config.gate))
    }

    /// Initializes both pages' stores.
    pub async fn initialize(&self) {
        tokio::join!(self.general.initialize(), self.special.initialize());
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn gate(&self) -> &ViewGate {
        &self.gate
    }

    pub fn store(&self, page: Page) -> &CollectionStore {
        match page {
            Page::General => &self.general,
            Page::Special => &self.special
        }
    }

    pub fn current(&self) -> &CollectionStore {
        self.store(self.page)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.current().read()
    }

    /// Switches pages. Entering the special page passes through the gate.
    pub fn switch_to(&mut self, page: Page, passphrase: Option<&str>) -> GateDecision {
        let decision = match page {
            Page::General => GateDecision::Open,
            Page::Special => self.gate.check(passphrase)
        };
        if decision.is_open() {
            if self.page != page {
                info!(from = %self.page, to = %page, "Switched page");
            }
            self.page = page;
        } else {
            warn!(page = %page, "Page switch rejected by gate");
        }
        decision
    }

    /// Grouped view of the current page, filtered by `term`.
    pub fn search(&self, term: &str) -> Vec<ItemGroup> {
        let snapshot = self.snapshot();
        group_items(filter_items(&snapshot.data, term))
    }

    /// Opens an edit session on the current page once the gate allows it.
    pub fn begin_edit(&self, passphrase: Option<&str>) -> Result<EditSession, BoardError> {
        match self.gate.check(passphrase) {
            GateDecision::Open => Ok(EditSession::from_snapshot(&self.snapshot())),
            GateDecision::Rejected { .. } => Err(BoardError::GateRejected)
        }
    }

    pub async fn save(&self, session: EditSession) -> WriteOutcome {
        session.save(self.current()).await
    }

    /// Stamps `lastRefreshed` on one item of the current page.
    pub async fn refresh_item(&self, id: &str) -> WriteOutcome {
        self.current()
            .touch_refreshed(id, utils::now_timestamp())
            .await
    }

    /// Suggestions for `term`, offered only when the search matches nothing
    /// on the current page. Provider failures are logged and yield none.
    pub async fn suggest(&self, provider: &dyn SuggestionProvider, term: &str) -> Vec<Item> {
        if !wants_suggestions(&self.snapshot().data, term) {
            return Vec::new();
        }
        match provider.suggest(term.trim()).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(error = %e, "Failed to generate suggestions");
                Vec::new()
            }
        }
    }

    /// Like [`Board::suggest`], keeping the page and term with the result.
    pub async fn offer_suggestions(
        &self,
        provider: &dyn SuggestionProvider,
        term: &str
    ) -> SuggestionOffer {
        SuggestionOffer::new(self.page, term, self.suggest(provider, term).await)
    }

    /// Adds an accepted suggestion to the current page under a fresh id.
    pub async fn accept_suggestion(&self, suggestion: &Item) -> WriteOutcome {
        self.current().append(promote(suggestion)).await
    }

    /// Adds the `number`th (1-based) suggestion of an earlier offer.
    pub async fn accept_offered(
        &self,
        offer: &SuggestionOffer,
        number: usize
    ) -> Result<WriteOutcome, BoardError> {
        if offer.page != self.page {
            return Err(BoardError::OfferForOtherPage {
                page: offer.page.to_string()
            });
        }
        let suggestion = offer.get(number).ok_or(BoardError::UnknownSuggestion {
            number,
            offered: offer.suggestions.len()
        })?;
        info!(page = %self.page, title = %suggestion.title, "Accepting suggestion");
        Ok(self.accept_suggestion(suggestion).await)
    }
}
