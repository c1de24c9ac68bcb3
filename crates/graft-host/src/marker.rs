//! Declarative markers attached to declarations and members.
//!
//! Markers are the host-side analogue of source annotations: read-only tags
//! that drive discovery. A declaration-level marker carries one string
//! argument defaulting to the empty string; member-level markers carry none.

use serde::{Deserialize, Serialize};

/// A marker read by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    /// Simple marker name, e.g. `ToString`.
    pub name: String,

    /// Optional argument for declaration-level markers.
    pub argument: Option<String>,
}

impl Marker {
    /// Create a marker with no argument.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
        }
    }

    /// Set the marker argument.
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    /// Argument value, defaulting to the empty string when absent.
    pub fn argument_or_default(&self) -> &str {
        self.argument.as_deref().unwrap_or("")
    }
}

/// Find a marker by simple name in a marker list.
pub fn find_marker<'a>(markers: &'a [Marker], name: &str) -> Option<&'a Marker> {
    markers.iter().find(|marker| marker.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_defaults_to_empty() {
        let marker = Marker::new("ToString");
        assert_eq!(marker.argument_or_default(), "");

        let marker = Marker::new("ToString").with_argument("concat");
        assert_eq!(marker.argument_or_default(), "concat");
    }

    #[test]
    fn test_find_by_name() {
        let markers = vec![Marker::new("BuildProperty"), Marker::new("ToString")];
        assert!(find_marker(&markers, "ToString").is_some());
        assert!(find_marker(&markers, "EqualsAndHashCode").is_none());
    }
}
