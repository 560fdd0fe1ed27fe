use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Incorrect password. Please try again.")]
    GateRejected,

    #[error("No item with id {id}")]
    UnknownItem { id: String },

    #[error("An item with id {id} already exists")]
    DuplicateItem { id: String },

    #[error("No suggestion number {number} ({offered} offered)")]
    UnknownSuggestion { number: usize, offered: usize },

    #[error("Saved suggestions belong to the {page} page")]
    OfferForOtherPage { page: String }
}

#[derive(Debug, Error)]
pub enum BannerError {
    #[error("Announcement request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to fetch announcement: status {status}")]
    Status { status: u16 }
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Suggestions are not configured: {reason}")]
    NotConfigured { reason: String },

    #[error("Suggestion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Suggestion service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed suggestion response: {0}")]
    Malformed(String),

    #[error("Failed to access saved suggestions: {0}")]
    Offer(#[from] std::io::Error)
}

impl From<serde_json::Error> for SuggestionError {
    fn from(err: serde_json::Error) -> Self {
        SuggestionError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors: Vec<(Box<dyn std::error::Error>, &str)> = vec![
            (
                Box::new(BoardError::GateRejected),
                "Incorrect password. Please try again."
            ),
            (
                Box::new(BoardError::UnknownItem {
                    id: "42".to_string()
                }),
                "No item with id 42"
            ),
            (
                Box::new(BoardError::UnknownSuggestion {
                    number: 5,
                    offered: 2
                }),
                "No suggestion number 5 (2 offered)"
            ),
            (
                Box::new(BannerError::Status { status: 404 }),
                "Failed to fetch announcement: status 404"
            ),
            (
                Box::new(SuggestionError::Malformed("expected value".to_string())),
                "Malformed suggestion response: expected value"
            ),
        ];

        for (error, expected) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: SuggestionError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SuggestionError::Malformed(_)));
    }
}
