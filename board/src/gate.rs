//! Passphrase gate in front of editing and the special page.
//!
//! This is a clutter toggle, not access control: the phrase is shared,
//! stored in plain text, and anyone with the configuration can read it.

use config::GateConfig;
use serde::Serialize;

pub const REJECTED_MESSAGE: &str = "Incorrect password. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Open,
    Rejected { message: String }
}

impl GateDecision {
    pub fn is_open(&self) -> bool {
        matches!(self, GateDecision::Open)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewGate {
    passphrase: Option<String>
}

impl ViewGate {
    pub fn new(passphrase: Option<String>) -> Self {
        Self {
            passphrase: passphrase.filter(|p| !p.is_empty())
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.passphrase.clone())
    }

    /// Whether a passphrase is configured at all.
    pub fn is_guarded(&self) -> bool {
        self.passphrase.is_some()
    }

    /// Compares a submitted phrase. An unguarded gate is always open.
    pub fn check(&self, submitted: Option<&str>) -> GateDecision {
        match (&self.passphrase, submitted) {
            (None, _) => GateDecision::Open,
            (Some(expected), Some(given)) if given == expected => GateDecision::Open,
            _ => GateDecision::Rejected {
                message: REJECTED_MESSAGE.to_string()
            }
        }
    }
}
