use metrics::{counter, histogram};

pub const INITIALIZE_TOTAL: &str = "linkboard.store.initialize";
pub const WRITE_TOTAL: &str = "linkboard.store.write";
pub const WRITE_ITEMS: &str = "linkboard.store.write.items";

/// How a store operation ended, as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Seeded,
    Loaded,
    Ok,
    Failed,
    Unchanged
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Seeded => "seeded",
            Outcome::Loaded => "loaded",
            Outcome::Ok => "ok",
            Outcome::Failed => "failed",
            Outcome::Unchanged => "unchanged"
        }
    }
}

/// Metric emission for one store.
#[derive(Debug, Clone)]
pub struct StoreTelemetry {
    collection: String,
    enabled: bool
}

impl StoreTelemetry {
    pub fn new(collection: impl Into<String>, enabled: bool) -> Self {
        Self {
            collection: collection.into(),
            enabled
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record_initialize(&self, outcome: Outcome) {
        if !self.enabled {
            return;
        }
        let labels = [
            ("collection", self.collection.clone()),
            ("outcome", outcome.as_str().to_string())
        ];
        counter!(INITIALIZE_TOTAL, &labels).increment(1);
    }

    pub fn record_write(&self, outcome: Outcome, items: usize) {
        if !self.enabled {
            return;
        }
        let labels = [
            ("collection", self.collection.clone()),
            ("outcome", outcome.as_str().to_string())
        ];
        counter!(WRITE_TOTAL, &labels).increment(1);

        if outcome == Outcome::Ok {
            histogram!(WRITE_ITEMS, "collection" => self.collection.clone())
                .record(items as f64);
        }
    }
}
