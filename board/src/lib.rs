//! # Board
//!
//! Dashboard logic on top of [`sync::CollectionStore`]:
//!
//! - [`view`]: search filtering and group ordering
//! - [`edit`]: edit sessions saved as one full replace
//! - [`suggestions`]: model-generated link suggestions for empty searches
//! - [`banner`]: announcement text from a published spreadsheet
//! - [`gate`]: passphrase gate for editing and the special page
//! - [`board`]: the two-page board tying these together

pub mod banner;
pub mod board;
pub mod edit;
pub mod error;
pub mod gate;
pub mod suggestions;
pub mod view;

pub use banner::BannerClient;
pub use board::{Board, Page};
pub use edit::{EditSession, ItemField};
pub use error::{BannerError, BoardError, SuggestionError};
pub use gate::{GateDecision, ViewGate};
pub use suggestions::{
    GeminiSuggestionProvider, SuggestionOffer, SuggestionProvider, parse_suggestions, promote
};
pub use view::{ItemGroup, filter_items, group_items};
