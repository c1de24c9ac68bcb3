//! Synthesis strategy contract and test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use graft_host::maker::ToolchainGeneration;

use crate::facade::ClassFacade;
use crate::{GraftError, Result};

/// Per-round state handed to every strategy invocation.
#[derive(Debug, Clone, Copy)]
pub struct RoundContext {
    /// Generation of the host toolchain running this round.
    pub generation: ToolchainGeneration,
}

impl RoundContext {
    /// Context for an explicit generation.
    pub fn new(generation: ToolchainGeneration) -> Self {
        Self { generation }
    }
}

/// Outcome of one synthesis invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// A new member was appended.
    Generated,

    /// The target member already existed; nothing was changed.
    AlreadyPresent,
}

/// A synthesis algorithm keyed by the marker that selects it.
///
/// Strategies receive exclusive ownership of a fresh facade per match. A
/// failing invocation must leave the member list untouched: build the whole
/// member first, append it last.
pub trait SynthesisStrategy: Send + Sync {
    /// Marker name this strategy is registered under.
    fn marker(&self) -> &str;

    /// Inspect the facade and append at most one synthesized member.
    fn synthesize(&self, facade: &mut ClassFacade<'_>, ctx: &RoundContext) -> Result<SynthesisOutcome>;
}

impl<S: SynthesisStrategy + ?Sized> SynthesisStrategy for Arc<S> {
    fn marker(&self) -> &str {
        (**self).marker()
    }

    fn synthesize(&self, facade: &mut ClassFacade<'_>, ctx: &RoundContext) -> Result<SynthesisOutcome> {
        (**self).synthesize(facade, ctx)
    }
}

/// A scripted strategy for tests.
#[derive(Debug)]
pub struct MockStrategy {
    marker: String,
    fail_reason: Option<String>,
    invocations: AtomicUsize,
}

impl MockStrategy {
    /// Create a mock that reports `AlreadyPresent` for every declaration.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            fail_reason: None,
            invocations: AtomicUsize::new(0),
        }
    }

    /// Create a mock that fails every declaration with a synthesis error.
    pub fn failing(marker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            fail_reason: Some(reason.into()),
            invocations: AtomicUsize::new(0),
        }
    }

    /// Number of declarations this mock was invoked on.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::Relaxed)
    }
}

impl SynthesisStrategy for MockStrategy {
    fn marker(&self) -> &str {
        &self.marker
    }

    fn synthesize(&self, facade: &mut ClassFacade<'_>, _ctx: &RoundContext) -> Result<SynthesisOutcome> {
        self.invocations.fetch_add(1, Ordering::Relaxed);

        match &self.fail_reason {
            Some(reason) => Err(GraftError::Synthesis {
                marker: self.marker.clone(),
                declaration: facade.qualified_name().to_string(),
                reason: reason.clone(),
            }),
            None => Ok(SynthesisOutcome::AlreadyPresent),
        }
    }
}
