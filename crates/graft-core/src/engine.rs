//! Discovery and dispatch over a compilation round.
//!
//! The host invokes [`SynthesisEngine::run_round`] once per round. For each
//! registered marker the engine enumerates the working set, builds a fresh
//! facade per marked declaration and hands it to the strategy. Every error
//! is caught locally and attached to the declaration as a diagnostic; one
//! declaration's failure never blocks the others, and a round always runs to
//! completion. Cross-declaration ordering is unspecified.

use std::collections::HashMap;
use std::sync::Arc;

use graft_host::maker::ToolchainGeneration;
use graft_host::unit::{ClassId, CompilationUnit};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::facade::ClassFacade;
use crate::observer::{NullObserver, ObserverPtr};
use crate::strategy::{RoundContext, SynthesisOutcome, SynthesisStrategy};

/// Severity of a diagnostic attached to a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// A diagnostic attached to one declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,

    /// Qualified name of the offending declaration.
    pub declaration: String,

    pub message: String,

    /// Structured payload for host-side tooling.
    pub metadata: Option<serde_json::Value>,
}

/// Summary of one discovery-and-synthesis round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundReport {
    /// Declarations that carried a registered marker.
    pub matched: usize,

    /// Declarations that received a synthesized member.
    pub generated: usize,

    /// Declarations skipped because the member already existed.
    pub already_present: usize,

    pub diagnostics: Vec<Diagnostic>,
}

impl RoundReport {
    /// True when no declaration produced an error diagnostic.
    pub fn is_clean(&self) -> bool {
        self.diagnostics
            .iter()
            .all(|diagnostic| diagnostic.severity != Severity::Error)
    }
}

/// The discovery/dispatch engine.
///
/// Strategies are registered under the marker name they report; one generic
/// loop serves every marker kind.
pub struct SynthesisEngine {
    generation: ToolchainGeneration,
    strategies: HashMap<String, Box<dyn SynthesisStrategy>>,
    observer: ObserverPtr,
}

impl SynthesisEngine {
    /// Engine for the detected host generation.
    pub fn new() -> Self {
        Self::for_generation(ToolchainGeneration::detect())
    }

    /// Engine pinned to an explicit generation.
    pub fn for_generation(generation: ToolchainGeneration) -> Self {
        Self {
            generation,
            strategies: HashMap::new(),
            observer: Arc::new(NullObserver),
        }
    }

    /// Generation this engine resolves construction operations for.
    pub fn generation(&self) -> ToolchainGeneration {
        self.generation
    }

    /// Register a strategy under its marker name. The last registration for
    /// a marker wins.
    pub fn with_strategy(mut self, strategy: impl SynthesisStrategy + 'static) -> Self {
        self.strategies
            .insert(strategy.marker().to_string(), Box::new(strategy));
        self
    }

    /// Attach an observer for round events.
    pub fn with_observer(mut self, observer: ObserverPtr) -> Self {
        self.observer = observer;
        self
    }

    /// Run one discovery-and-synthesis pass over the working set.
    #[instrument(skip_all, fields(generation = self.generation.as_str()))]
    pub fn run_round(&self, unit: &mut CompilationUnit) -> RoundReport {
        let mut report = RoundReport::default();
        let ctx = RoundContext::new(self.generation);

        for (marker, strategy) in &self.strategies {
            let matches: Vec<ClassId> = unit
                .class_ids()
                .into_iter()
                .filter(|id| unit.symbol(*id).has_marker(marker))
                .collect();
            debug!(marker, matches = matches.len(), "marker discovery complete");

            for id in matches {
                let declaration = unit.symbol(id).qualified_name.clone();
                report.matched += 1;
                self.observer.on_match(marker, &declaration);

                let mut facade = ClassFacade::new(unit, id);
                match strategy.synthesize(&mut facade, &ctx) {
                    Ok(outcome) => {
                        match outcome {
                            SynthesisOutcome::Generated => report.generated += 1,
                            SynthesisOutcome::AlreadyPresent => report.already_present += 1,
                        }
                        self.observer.on_outcome(&declaration, outcome);
                    }
                    Err(err) => {
                        let message = err.to_string();
                        warn!(%declaration, error = %message, "synthesis failed");
                        self.observer.on_failure(&declaration, &message);
                        report.diagnostics.push(Diagnostic {
                            severity: Severity::Error,
                            declaration,
                            message,
                            metadata: Some(json!({ "marker": marker })),
                        });
                    }
                }
            }
        }

        info!(
            matched = report.matched,
            generated = report.generated,
            diagnostics = report.diagnostics.len(),
            "round complete"
        );
        report
    }
}

impl Default for SynthesisEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::MockStrategy;
    use crate::to_string::{ToStringStrategy, TO_STRING_MARKER, TO_STRING_METHOD};
    use graft_host::marker::Marker;
    use graft_host::symbol::ClassSymbol;
    use graft_host::tree::{ClassDecl, FieldDecl, Member};
    use std::sync::Mutex;

    fn marked_class(unit: &mut CompilationUnit, qualified: &str, simple: &str) -> ClassId {
        unit.add_class(
            ClassSymbol::new(qualified).with_marker(Marker::new(TO_STRING_MARKER)),
            ClassDecl::new(simple).with_member(Member::Field(FieldDecl::new("x", "int"))),
        )
    }

    #[test]
    fn test_round_synthesizes_every_marked_declaration() {
        let mut unit = CompilationUnit::new();
        let first = marked_class(&mut unit, "a.First", "First");
        let second = marked_class(&mut unit, "b.Second", "Second");
        unit.add_class(ClassSymbol::new("c.Unmarked"), ClassDecl::new("Unmarked"));

        let engine = SynthesisEngine::for_generation(ToolchainGeneration::Modern)
            .with_strategy(ToStringStrategy::new());
        let report = engine.run_round(&mut unit);

        assert_eq!(report.matched, 2);
        assert_eq!(report.generated, 2);
        assert!(report.is_clean());
        assert!(unit.tree(first).unwrap().contains_member(TO_STRING_METHOD));
        assert!(unit.tree(second).unwrap().contains_member(TO_STRING_METHOD));
    }

    #[test]
    fn test_failures_stay_isolated_per_declaration() {
        let mut unit = CompilationUnit::new();
        unit.add_sourceless(
            ClassSymbol::new("lib.Precompiled").with_marker(Marker::new(TO_STRING_MARKER)),
        );
        let healthy = marked_class(&mut unit, "a.Healthy", "Healthy");

        let engine = SynthesisEngine::for_generation(ToolchainGeneration::Modern)
            .with_strategy(ToStringStrategy::new());
        let report = engine.run_round(&mut unit);

        assert_eq!(report.matched, 2);
        assert_eq!(report.generated, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].declaration, "lib.Precompiled");
        assert!(!report.is_clean());
        assert!(unit.tree(healthy).unwrap().contains_member(TO_STRING_METHOD));
    }

    #[test]
    fn test_unregistered_markers_are_ignored() {
        let mut unit = CompilationUnit::new();
        unit.add_class(
            ClassSymbol::new("a.Tagged").with_marker(Marker::new("Builder")),
            ClassDecl::new("Tagged"),
        );

        let strategy = Arc::new(MockStrategy::new(TO_STRING_MARKER));
        let engine = SynthesisEngine::for_generation(ToolchainGeneration::Modern)
            .with_strategy(strategy.clone());
        let report = engine.run_round(&mut unit);

        assert_eq!(report.matched, 0);
        assert_eq!(strategy.invocations(), 0);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_second_round_finds_members_already_present() {
        let mut unit = CompilationUnit::new();
        marked_class(&mut unit, "a.Point", "Point");

        let engine = SynthesisEngine::for_generation(ToolchainGeneration::Modern)
            .with_strategy(ToStringStrategy::new());

        let first = engine.run_round(&mut unit);
        assert_eq!(first.generated, 1);

        let second = engine.run_round(&mut unit);
        assert_eq!(second.matched, 1);
        assert_eq!(second.generated, 0);
        assert_eq!(second.already_present, 1);
        assert!(second.is_clean());
    }

    #[test]
    fn test_failing_strategy_produces_diagnostics_for_each_match() {
        let mut unit = CompilationUnit::new();
        marked_class(&mut unit, "a.First", "First");
        marked_class(&mut unit, "b.Second", "Second");

        let engine = SynthesisEngine::for_generation(ToolchainGeneration::Modern)
            .with_strategy(MockStrategy::failing(TO_STRING_MARKER, "scripted failure"));
        let report = engine.run_round(&mut unit);

        assert_eq!(report.matched, 2);
        assert_eq!(report.generated, 0);
        assert_eq!(report.diagnostics.len(), 2);
        for diagnostic in &report.diagnostics {
            assert_eq!(diagnostic.severity, Severity::Error);
            assert!(diagnostic.message.contains("scripted failure"));
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<String>>,
    }

    impl crate::observer::RoundObserver for RecordingObserver {
        fn on_match(&self, marker: &str, declaration: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("match {marker} {declaration}"));
        }

        fn on_outcome(&self, declaration: &str, outcome: SynthesisOutcome) {
            self.events
                .lock()
                .unwrap()
                .push(format!("outcome {declaration} {outcome:?}"));
        }

        fn on_failure(&self, declaration: &str, _error: &str) {
            self.events.lock().unwrap().push(format!("failure {declaration}"));
        }
    }

    #[test]
    fn test_observer_sees_match_and_outcome() {
        let mut unit = CompilationUnit::new();
        marked_class(&mut unit, "a.Point", "Point");

        let observer = Arc::new(RecordingObserver::default());
        let engine = SynthesisEngine::for_generation(ToolchainGeneration::Modern)
            .with_strategy(ToStringStrategy::new())
            .with_observer(observer.clone());
        engine.run_round(&mut unit);

        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].starts_with("match ToString a.Point"));
        assert!(events[1].starts_with("outcome a.Point Generated"));
    }
}
