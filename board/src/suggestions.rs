//! Link suggestions for searches that match nothing.
//!
//! A [`SuggestionProvider`] turns a search term into candidate items. The
//! candidates carry provisional `ai-` ids and placeholder links; they become
//! real items only through [`promote`]. A [`SuggestionOffer`] keeps the
//! candidates that were shown so a later accept adds exactly one of them.

use crate::board::Page;
use crate::error::SuggestionError;
use async_trait::async_trait;
use config::SuggestionConfig;
use lb_core::Item;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, term: &str) -> Result<Vec<Item>, SuggestionError>;
}

/// Suggestions from a Gemini model via the `generateContent` REST call.
pub struct GeminiSuggestionProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_suggestions: usize
}

impl GeminiSuggestionProvider {
    pub fn new(config: &SuggestionConfig) -> Result<Self, SuggestionError> {
        if !config.enabled {
            return Err(SuggestionError::NotConfigured {
                reason: "suggestions are disabled".to_string()
            });
        }
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SuggestionError::NotConfigured {
                reason: "suggestions.api_key is not set".to_string()
            })?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            max_suggestions: config.max_suggestions
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content
}

fn prompt(term: &str, max: usize) -> String {
    format!(
        "Based on the search term \"{term}\", suggest up to {max} new download items that \
         might be relevant in a corporate reporting context. For each item, provide a \
         \"title\" and a \"group\" (e.g., \"Sales Reports\", \"Financial Reports\", \
         \"User Metrics\", \"Marketing\")."
    )
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "group": {"type": "STRING"}
                    },
                    "required": ["title", "group"]
                }
            }
        },
        "required": ["suggestions"]
    })
}

#[async_trait]
impl SuggestionProvider for GeminiSuggestionProvider {
    async fn suggest(&self, term: &str) -> Result<Vec<Item>, SuggestionError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt(term, self.max_suggestions)
                }]
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema()
            }
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestionError::Status {
                status: status.as_u16(),
                body: utils::sanitize_for_log(&body, 200)
            });
        }

        let generated: GenerateResponse = response.json().await?;
        let text: String = generated
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let suggestions = parse_suggestions(&text, self.max_suggestions)?;
        info!(
            term = %utils::sanitize_for_log(term, 80),
            count = suggestions.len(),
            "Generated link suggestions"
        );
        Ok(suggestions)
    }
}

/// Parses model output into suggestion items.
///
/// Accepts the JSON object optionally wrapped in a ```json fence. Entries
/// without a string `title` and `group` are dropped; at most `max` are kept.
/// A missing or non-array `suggestions` field yields no suggestions.
pub fn parse_suggestions(text: &str, max: usize) -> Result<Vec<Item>, SuggestionError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .map_or(trimmed, str::trim_start);
    let unfenced = unfenced.strip_suffix("```").unwrap_or(unfenced);

    let parsed: Value = serde_json::from_str(unfenced)?;
    let Some(entries) = parsed.get("suggestions").and_then(Value::as_array) else {
        debug!("Suggestion response had no suggestions array");
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter_map(|entry| {
            let title = entry.get("title")?.as_str()?;
            let group = entry.get("group")?.as_str()?;
            Some(Item::placeholder(utils::generate_suggestion_id(), title).with_group(group))
        })
        .take(max)
        .collect())
}

/// The suggestions shown for one search on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionOffer {
    pub page: Page,
    pub term: String,
    pub suggestions: Vec<Item>
}

impl SuggestionOffer {
    pub fn new(page: Page, term: &str, suggestions: Vec<Item>) -> Self {
        Self {
            page,
            term: term.trim().to_string(),
            suggestions
        }
    }

    /// Whether this offer was made for `term` on `page`, ignoring case and
    /// surrounding whitespace.
    pub fn matches(&self, page: Page, term: &str) -> bool {
        self.page == page && self.term.to_lowercase() == term.trim().to_lowercase()
    }

    /// The `number`th suggestion, counting from 1.
    pub fn get(&self, number: usize) -> Option<&Item> {
        number
            .checked_sub(1)
            .and_then(|index| self.suggestions.get(index))
    }

    /// Reads a saved offer; a missing file is `None`.
    pub fn load(path: &Path) -> Result<Option<Self>, SuggestionError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into())
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, path: &Path) -> Result<(), SuggestionError> {
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        debug!(path = %path.display(), count = self.suggestions.len(), "Saved suggestion offer");
        Ok(())
    }

    /// Removes a saved offer; a missing file is not an error.
    pub fn discard(path: &Path) -> Result<(), SuggestionError> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(())
        }
    }
}

/// Turns an accepted suggestion into a real item with a fresh id.
pub fn promote(suggestion: &Item) -> Item {
    Item {
        id: utils::generate_item_id(),
        last_refreshed: None,
        ..suggestion.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fenced_response() {
        let text = "```json\n{\"suggestions\": [{\"title\": \"Inventory Turnover\", \"group\": \"Financial Reports\"}]}\n```";
        let items = parse_suggestions(text, 4).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Inventory Turnover");
        assert_eq!(items[0].group, "Financial Reports");
        assert!(items[0].has_placeholder_links());
        assert!(utils::is_suggestion_id(&items[0].id));
    }

    #[test]
    fn test_parse_drops_incomplete_entries_and_caps() {
        let text = r#"{"suggestions": [
            {"title": "A", "group": "G"},
            {"title": "B"},
            {"title": 3, "group": "G"},
            {"title": "C", "group": "G"},
            {"title": "D", "group": "G"}
        ]}"#;
        let titles: Vec<_> = parse_suggestions(text, 2)
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_parse_without_array_is_empty() {
        assert!(parse_suggestions(r#"{"suggestions": "none"}"#, 4).unwrap().is_empty());
        assert!(parse_suggestions("{}", 4).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(
            parse_suggestions("Sorry, I can't help with that.", 4),
            Err(SuggestionError::Malformed(_))
        ));
    }

    #[test]
    fn test_promote_assigns_real_id() {
        let suggestion = parse_suggestions(r#"{"suggestions": [{"title": "A", "group": "G"}]}"#, 4)
            .unwrap()
            .remove(0);
        let item = promote(&suggestion);

        assert!(!utils::is_suggestion_id(&item.id));
        assert_eq!(item.title, "A");
        assert_eq!(item.group, "G");
        assert_eq!(item.download_url, "#");
    }

    #[test]
    fn test_provider_requires_api_key() {
        let config = SuggestionConfig::default();
        assert!(matches!(
            GeminiSuggestionProvider::new(&config),
            Err(SuggestionError::NotConfigured { .. })
        ));

        let disabled = SuggestionConfig {
            enabled: false,
            api_key: Some("key".to_string()),
            ..SuggestionConfig::default()
        };
        assert!(GeminiSuggestionProvider::new(&disabled).is_err());
    }

    #[test]
    fn test_offer_numbers_from_one_and_matches_term() {
        let offer = SuggestionOffer::new(
            Page::General,
            "  Inventory ",
            vec![Item::placeholder("ai-1-aaaaaaa", "Inventory Turnover")]
        );

        assert_eq!(offer.term, "Inventory");
        assert!(offer.get(0).is_none());
        assert_eq!(offer.get(1).unwrap().title, "Inventory Turnover");
        assert!(offer.get(2).is_none());
        assert!(offer.matches(Page::General, "inventory"));
        assert!(!offer.matches(Page::Special, "inventory"));
        assert!(!offer.matches(Page::General, "stock"));
    }

    #[test]
    fn test_offer_save_load_and_discard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offer.json");
        assert_eq!(SuggestionOffer::load(&path).unwrap(), None);

        let offer = SuggestionOffer::new(
            Page::Special,
            "stock",
            vec![Item::placeholder("ai-1-bbbbbbb", "Stock Aging").with_group("Financial Reports")]
        );
        offer.save(&path).unwrap();
        assert_eq!(SuggestionOffer::load(&path).unwrap(), Some(offer));

        SuggestionOffer::discard(&path).unwrap();
        assert!(!path.exists());
        SuggestionOffer::discard(&path).unwrap();
    }

    #[test]
    fn test_corrupt_offer_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offer.json");
        std::fs::write(&path, "[").unwrap();
        assert!(matches!(
            SuggestionOffer::load(&path),
            Err(SuggestionError::Malformed(_))
        ));
    }

    #[test]
    fn test_prompt_mentions_term_and_limit() {
        let text = prompt("inventory", 4);
        assert!(text.contains("\"inventory\""));
        assert!(text.contains("up to 4"));
    }
}
