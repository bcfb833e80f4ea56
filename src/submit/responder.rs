use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::time::sleep;

use crate::submit::outcome::{OutcomeTemplates, ResponseKey, ResponseOutcome};

/// Simulated network delay before any answer.
pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 500;

/// Stand-in for the network endpoint a form posts to.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn call(&self, key: ResponseKey) -> ResponseOutcome;
}

/// Answers every call with the canned outcome for its key after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockResponder {
    delay: Duration,
    templates: OutcomeTemplates,
}

impl MockResponder {
    pub fn new(delay: Duration, templates: OutcomeTemplates) -> Self {
        Self { delay, templates }
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_RESPONSE_DELAY_MS),
            OutcomeTemplates::default(),
        )
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn call(&self, key: ResponseKey) -> ResponseOutcome {
        debug!("mock responder: '{}' in {:?}", key, self.delay);
        sleep(self.delay).await;
        self.templates.outcome_for(key)
    }
}

/// Plays back a fixed list of outcomes, then keeps repeating the last one.
///
/// The key passed to `call` is ignored.
#[derive(Debug)]
pub struct ScriptedResponder {
    delay: Duration,
    script: Mutex<VecDeque<ResponseOutcome>>,
    last: Mutex<ResponseOutcome>,
    calls: AtomicUsize,
}

impl ScriptedResponder {
    /// An empty script answers `Success` forever.
    pub fn new(delay: Duration, outcomes: Vec<ResponseOutcome>) -> Self {
        let last = outcomes.last().cloned().unwrap_or(ResponseOutcome::Success);
        Self {
            delay,
            script: Mutex::new(outcomes.into()),
            last: Mutex::new(last),
            calls: AtomicUsize::new(0),
        }
    }

    /// Script built from keys, expanded through `templates`.
    pub fn from_keys(delay: Duration, keys: &[ResponseKey], templates: &OutcomeTemplates) -> Self {
        Self::new(delay, keys.iter().map(|&k| templates.outcome_for(k)).collect())
    }

    /// Number of calls answered so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> ResponseOutcome {
        let next = match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };

        let mut last = match self.last.lock() {
            Ok(last) => last,
            Err(poisoned) => poisoned.into_inner(),
        };

        match next {
            Some(outcome) => {
                *last = outcome.clone();
                outcome
            }
            None => last.clone(),
        }
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn call(&self, _key: ResponseKey) -> ResponseOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.delay).await;
        let outcome = self.next_outcome();
        debug!("scripted responder: call {} -> {:?}", call, outcome);
        outcome
    }
}
