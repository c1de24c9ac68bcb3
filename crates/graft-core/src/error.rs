//! Error types for the synthesis engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, GraftError>;

/// Error taxonomy of the synthesis engine.
///
/// Every variant ends up as a diagnostic attached to the offending
/// declaration; the discovery loop catches all of them locally and none
/// escapes a round.
#[derive(Debug, Error)]
pub enum GraftError {
    /// The compatibility shim found no operation for the detected toolchain
    /// generation.
    #[error("no `{operation}` construction available for the {generation} toolchain")]
    Resolution {
        generation: &'static str,
        operation: String,
    },

    /// Mutation attempted on a facade without an accessible source tree.
    #[error("declaration `{declaration}` has no source tree; `{operation}` rejected")]
    State {
        declaration: String,
        operation: &'static str,
    },

    /// A marker was found on a declaration shape the strategy cannot handle.
    #[error("marker `{marker}` on `{declaration}` is unsupported: {reason}")]
    Synthesis {
        marker: String,
        declaration: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_declaration() {
        let err = GraftError::State {
            declaration: "lib.Precompiled".to_string(),
            operation: "append_member",
        };

        assert!(err.to_string().contains("lib.Precompiled"));
        assert!(err.to_string().contains("append_member"));
    }
}
