//! Round observation hooks.

use std::sync::Arc;

use crate::strategy::SynthesisOutcome;

/// Trait for observing round events (host messager, metrics, tests).
///
/// Callbacks are notifications only; the round report stays the
/// authoritative record of what happened.
pub trait RoundObserver: Send + Sync {
    /// A marked declaration matched a registered strategy.
    fn on_match(&self, marker: &str, declaration: &str);

    /// Synthesis finished for a declaration.
    fn on_outcome(&self, declaration: &str, outcome: SynthesisOutcome);

    /// Synthesis failed; the message is what the diagnostic will carry.
    fn on_failure(&self, declaration: &str, error: &str);
}

pub type ObserverPtr = Arc<dyn RoundObserver>;

/// Observer that drops every event.
#[derive(Debug, Default)]
pub struct NullObserver;

impl RoundObserver for NullObserver {
    fn on_match(&self, _marker: &str, _declaration: &str) {}

    fn on_outcome(&self, _declaration: &str, _outcome: SynthesisOutcome) {}

    fn on_failure(&self, _declaration: &str, _error: &str) {}
}
