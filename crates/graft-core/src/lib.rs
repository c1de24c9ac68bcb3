//! # Graft Core
//!
//! Marker-driven member synthesis over host compilation trees.
//!
//! During a compilation round the engine finds declarations carrying a
//! declarative marker, binds each to a facade over its semantic symbol and
//! mutable syntax tree, and lets the registered strategy append a
//! synthesized member. The result is handed back to the host pipeline as if
//! the member had been hand-written.
//!
//! ## Features
//!
//! - Registry-driven discovery: marker name to strategy, one generic loop
//! - Facades binding symbol identity to mutable trees, append-only
//! - A compatibility shim resolving tree-construction operations across
//!   host toolchain generations, cached process-wide
//! - Per-declaration diagnostics; one failure never blocks a round
//!
//! ## Example
//!
//! ```rust,ignore
//! use graft_core::{SynthesisEngine, ToStringStrategy};
//! use graft_host::CompilationUnit;
//!
//! let engine = SynthesisEngine::new().with_strategy(ToStringStrategy::new());
//!
//! let mut unit = CompilationUnit::new();
//! // ... host registers the round's declarations ...
//! let report = engine.run_round(&mut unit);
//! assert!(report.is_clean());
//! ```

pub mod accessor;
pub mod engine;
pub mod error;
pub mod facade;
pub mod observer;
pub mod shim;
pub mod strategy;
pub mod to_string;

pub use engine::{Diagnostic, RoundReport, Severity, SynthesisEngine};
pub use error::{GraftError, Result};
pub use facade::{ClassFacade, FieldView};
pub use observer::{NullObserver, ObserverPtr, RoundObserver};
pub use shim::{ConstructionHandle, MethodParts, OpTag, ParamShape, ShimCache};
pub use strategy::{MockStrategy, RoundContext, SynthesisOutcome, SynthesisStrategy};
pub use to_string::{ToStringStrategy, TO_STRING_MARKER, TO_STRING_METHOD};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        ClassFacade, GraftError, Result, RoundContext, RoundReport, SynthesisEngine,
        SynthesisOutcome, SynthesisStrategy, ToStringStrategy,
    };
}
