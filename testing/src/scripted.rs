use async_trait::async_trait;
use errors::AdapterError;
use lb_core::{CollectionAdapter, Item, RawRecord, records_for};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// How one scripted adapter call behaves.
#[derive(Debug, Clone, Default)]
pub struct Step {
    delay: Option<Duration>,
    failure: Option<String>
}

impl Step {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            delay: None,
            failure: Some(reason.into())
        }
    }

    /// Stalls the call for `delay` before it completes.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A call the adapter received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterCall {
    List { collection: String },
    Replace { collection: String, items: Vec<Item> }
}

#[derive(Default)]
struct Script {
    collections: HashMap<String, Vec<RawRecord>>,
    list_steps: VecDeque<Step>,
    replace_steps: VecDeque<Step>,
    calls: Vec<AdapterCall>
}

/// In-memory adapter driven by queued [`Step`]s.
///
/// Each call pops the next step for its kind; with no step queued the call
/// simply succeeds. A failing replace leaves stored records untouched.
#[derive(Default)]
pub struct ScriptedAdapter {
    script: Mutex<Script>
}

impl ScriptedAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw records as-is, so tests can plant malformed data.
    pub fn with_records(self, collection: &str, records: Vec<RawRecord>) -> Self {
        self.script
            .lock()
            .collections
            .insert(collection.to_string(), records);
        self
    }

    pub fn with_items(self, collection: &str, items: &[Item]) -> Self {
        self.with_records(collection, records_for(items))
    }

    pub fn on_list(&self, step: Step) -> &Self {
        self.script.lock().list_steps.push_back(step);
        self
    }

    pub fn on_replace(&self, step: Step) -> &Self {
        self.script.lock().replace_steps.push_back(step);
        self
    }

    pub fn calls(&self) -> Vec<AdapterCall> {
        self.script.lock().calls.clone()
    }

    pub fn list_count(&self) -> usize {
        self.count(|call| matches!(call, AdapterCall::List { .. }))
    }

    pub fn replace_count(&self) -> usize {
        self.count(|call| matches!(call, AdapterCall::Replace { .. }))
    }

    fn count(&self, predicate: impl Fn(&AdapterCall) -> bool) -> usize {
        self.script.lock().calls.iter().filter(|c| predicate(c)).count()
    }

    /// Records currently stored for `collection`.
    pub fn stored(&self, collection: &str) -> Vec<RawRecord> {
        self.script
            .lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn stored_items(&self, collection: &str) -> Vec<Item> {
        self.stored(collection)
            .into_iter()
            .map(RawRecord::into_item)
            .collect()
    }
}

async fn run(step: Step) -> Result<(), String> {
    if let Some(delay) = step.delay {
        tokio::time::sleep(delay).await;
    }
    match step.failure {
        Some(reason) => Err(reason),
        None => Ok(())
    }
}

#[async_trait]
impl CollectionAdapter for ScriptedAdapter {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<RawRecord>, AdapterError> {
        let step = {
            let mut script = self.script.lock();
            script.calls.push(AdapterCall::List {
                collection: collection.to_string()
            });
            script.list_steps.pop_front().unwrap_or_default()
        };

        run(step)
            .await
            .map_err(|reason| AdapterError::fetch(collection, reason))?;
        Ok(self.stored(collection))
    }

    async fn replace_all(&self, collection: &str, items: &[Item]) -> Result<(), AdapterError> {
        let step = {
            let mut script = self.script.lock();
            script.calls.push(AdapterCall::Replace {
                collection: collection.to_string(),
                items: items.to_vec()
            });
            script.replace_steps.pop_front().unwrap_or_default()
        };

        run(step)
            .await
            .map_err(|reason| AdapterError::write(collection, reason))?;
        tracing::debug!(collection, count = items.len(), "Scripted replace applied");
        self.script
            .lock()
            .collections
            .insert(collection.to_string(), records_for(items));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_calls_succeed_and_are_recorded() {
        let adapter = ScriptedAdapter::new();
        adapter
            .replace_all("c", &[Item::placeholder("1", "A")])
            .await
            .unwrap();
        let listed = adapter.list_all("c").await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(adapter.replace_count(), 1);
        assert_eq!(adapter.list_count(), 1);
        assert!(matches!(adapter.calls()[0], AdapterCall::Replace { .. }));
    }

    #[tokio::test]
    async fn test_failed_replace_keeps_records() {
        let adapter = ScriptedAdapter::new().with_items("c", &[Item::placeholder("1", "A")]);
        adapter.on_replace(Step::fail("quota exceeded"));

        let err = adapter.replace_all("c", &[]).await.unwrap_err();
        assert!(matches!(err, AdapterError::Write { .. }));
        assert_eq!(adapter.stored("c").len(), 1);
    }

    #[tokio::test]
    async fn test_steps_are_consumed_in_order() {
        let adapter = ScriptedAdapter::new();
        adapter.on_list(Step::fail("offline")).on_list(Step::pass());

        assert!(adapter.list_all("c").await.is_err());
        assert!(adapter.list_all("c").await.is_ok());
        assert!(adapter.list_all("c").await.is_ok());
    }
}
