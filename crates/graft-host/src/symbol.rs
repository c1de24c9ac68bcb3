//! Semantic symbols resolved by prior compilation phases.
//!
//! Symbols are the host's authoritative identity for a declaration. They are
//! read-only input to the engine; mutation happens on trees, never here.

use serde::{Deserialize, Serialize};

use crate::flags::Modifiers;
use crate::marker::{find_marker, Marker};

/// Classification of a member symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Field,
    Method,
}

impl MemberKind {
    /// Human-readable description used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Method => "method",
        }
    }
}

/// Shape of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclShape {
    Class,
    Interface,
    Annotation,
}

impl DeclShape {
    /// Human-readable description used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            DeclShape::Class => "class",
            DeclShape::Interface => "interface",
            DeclShape::Annotation => "annotation",
        }
    }
}

/// Resolved identity of one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSymbol {
    pub kind: MemberKind,
    pub name: String,
    pub type_spelling: String,
    pub flags: Modifiers,
    pub markers: Vec<Marker>,
}

impl MemberSymbol {
    /// Create a member symbol of the given kind.
    pub fn new(kind: MemberKind, name: impl Into<String>, type_spelling: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            type_spelling: type_spelling.into(),
            flags: Modifiers::empty(),
            markers: Vec::new(),
        }
    }

    /// Attach a member-level marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }
}

/// Resolved identity of one class-like declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSymbol {
    /// Fully qualified name, e.g. `org.example.Point`.
    pub qualified_name: String,

    pub shape: DeclShape,
    pub flags: Modifiers,
    pub markers: Vec<Marker>,

    /// Member symbols in declaration order.
    pub members: Vec<MemberSymbol>,
}

impl ClassSymbol {
    /// Create a class symbol with the given qualified name.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            shape: DeclShape::Class,
            flags: Modifiers::empty(),
            markers: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Set the declaration shape.
    pub fn with_shape(mut self, shape: DeclShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the modifier flags.
    pub fn with_flags(mut self, flags: Modifiers) -> Self {
        self.flags = flags;
        self
    }

    /// Attach a declaration-level marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Append a member symbol in declaration order.
    pub fn with_member(mut self, member: MemberSymbol) -> Self {
        self.members.push(member);
        self
    }

    /// Simple name: the segment after the last `.` of the qualified name.
    pub fn simple_name(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(dot) => &self.qualified_name[dot + 1..],
            None => &self.qualified_name,
        }
    }

    /// True if the declaration carries the named marker.
    pub fn has_marker(&self, name: &str) -> bool {
        self.marker(name).is_some()
    }

    /// Declaration-level marker by simple name.
    pub fn marker(&self, name: &str) -> Option<&Marker> {
        find_marker(&self.markers, name)
    }

    /// True if a member of this simple name is known to the symbol.
    pub fn contains_member(&self, name: &str) -> bool {
        self.members.iter().any(|member| member.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_name_strips_package() {
        let symbol = ClassSymbol::new("org.example.domain.Point");
        assert_eq!(symbol.simple_name(), "Point");

        let unqualified = ClassSymbol::new("Point");
        assert_eq!(unqualified.simple_name(), "Point");
    }

    #[test]
    fn test_marker_lookup() {
        let symbol = ClassSymbol::new("org.example.User")
            .with_marker(Marker::new("ToString").with_argument(""));

        assert!(symbol.has_marker("ToString"));
        assert!(!symbol.has_marker("Builder"));
        assert_eq!(symbol.marker("ToString").unwrap().argument_or_default(), "");
    }

    #[test]
    fn test_contains_member() {
        let symbol = ClassSymbol::new("org.example.User")
            .with_member(MemberSymbol::new(MemberKind::Field, "name", "String"))
            .with_member(MemberSymbol::new(MemberKind::Method, "getName", "String"));

        assert!(symbol.contains_member("getName"));
        assert!(!symbol.contains_member("setName"));
    }
}
