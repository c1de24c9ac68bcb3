//! Facade unifying a declaration's semantic identity and its mutable tree.
//!
//! A facade is built fresh per discovery match and owned by the strategy
//! invocation that received it. It holds the opaque handle issued by the
//! compilation unit plus a few fields derived at construction time; it has
//! no identity of its own beyond that handle. Member-list mutations are
//! append-only: nothing is ever removed or reordered.

use graft_host::flags::Modifiers;
use graft_host::marker::Marker;
use graft_host::symbol::{ClassSymbol, MemberKind};
use graft_host::tree::{ClassDecl, Member};
use graft_host::unit::{ClassId, CompilationUnit};

use crate::{GraftError, Result};

/// Read view of one declared field, in syntactic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub type_spelling: String,
}

/// Facade over one `(semantic symbol, tree node)` pair.
///
/// A declaration supplied pre-compiled has no tree; such a facade supports
/// the read surface only and rejects every mutation with a state error.
pub struct ClassFacade<'a> {
    unit: &'a mut CompilationUnit,
    class: ClassId,
    qualified_name: String,
    simple_name: String,
    has_tree: bool,
}

impl<'a> ClassFacade<'a> {
    /// Bind a facade over the given declaration.
    pub fn new(unit: &'a mut CompilationUnit, class: ClassId) -> Self {
        let symbol = unit.symbol(class);
        let qualified_name = symbol.qualified_name.clone();
        let simple_name = symbol.simple_name().to_string();
        let has_tree = unit.tree(class).is_some();

        Self {
            unit,
            class,
            qualified_name,
            simple_name,
            has_tree,
        }
    }

    /// Fully qualified name of the declaration.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Simple name of the declaration.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// True when the declaration has an accessible source body.
    pub fn has_tree(&self) -> bool {
        self.has_tree
    }

    /// The declaration's resolved symbol.
    pub fn symbol(&self) -> &ClassSymbol {
        self.unit.symbol(self.class)
    }

    /// Declaration-level marker by name, preferring the tree's copy.
    pub fn marker(&self, name: &str) -> Option<&Marker> {
        match self.unit.tree(self.class) {
            Some(tree) => tree.marker(name).or_else(|| self.symbol().marker(name)),
            None => self.symbol().marker(name),
        }
    }

    /// True if the current member list already defines a member of this
    /// simple name. Name-only match, not a full signature.
    pub fn contains_member(&self, name: &str) -> bool {
        match self.unit.tree(self.class) {
            Some(tree) => tree.contains_member(name),
            None => self.symbol().contains_member(name),
        }
    }

    /// Fields declared directly on this declaration, in syntactic order.
    /// Inherited members are never included.
    pub fn declared_fields(&self) -> Vec<FieldView> {
        match self.unit.tree(self.class) {
            Some(tree) => tree
                .fields()
                .map(|field| FieldView {
                    name: field.name.clone(),
                    type_spelling: field.type_spelling.clone(),
                })
                .collect(),
            None => self
                .symbol()
                .members
                .iter()
                .filter(|member| member.kind == MemberKind::Field)
                .map(|member| FieldView {
                    name: member.name.clone(),
                    type_spelling: member.type_spelling.clone(),
                })
                .collect(),
        }
    }

    /// Names of members carrying the given marker. Informational only.
    pub fn members_with_marker(&self, name: &str) -> Vec<String> {
        match self.unit.tree(self.class) {
            Some(tree) => tree
                .members
                .iter()
                .filter(|member| member.markers().iter().any(|marker| marker.name == name))
                .map(|member| member.name().to_string())
                .collect(),
            None => self
                .symbol()
                .members
                .iter()
                .filter(|member| member.markers.iter().any(|marker| marker.name == name))
                .map(|member| member.name.clone())
                .collect(),
        }
    }

    fn tree_mut(&mut self, operation: &'static str) -> Result<&mut ClassDecl> {
        let declaration = self.qualified_name.clone();
        self.unit
            .tree_mut(self.class)
            .ok_or(GraftError::State {
                declaration,
                operation,
            })
    }

    /// Append a synthesized member, preserving the existing order.
    ///
    /// Later compilation phases observe the member as if hand-written.
    pub fn append_member(&mut self, member: Member) -> Result<()> {
        let tree = self.tree_mut("append_member")?;
        tree.members.push(member);
        Ok(())
    }

    /// Replace the declaration's modifier flags.
    pub fn set_modifiers(&mut self, flags: Modifiers) -> Result<()> {
        let tree = self.tree_mut("set_modifiers")?;
        tree.mods = flags;
        Ok(())
    }

    /// OR the given flags into the declaration's set. Never clears
    /// previously set bits.
    pub fn add_modifiers(&mut self, flags: Modifiers) -> Result<()> {
        let tree = self.tree_mut("add_modifiers")?;
        tree.mods |= flags;
        Ok(())
    }

    /// Register a fully-qualified type reference needed by synthesized code.
    /// Idempotent.
    pub fn register_import(&mut self, target: &str) -> Result<()> {
        if !self.has_tree {
            return Err(GraftError::State {
                declaration: self.qualified_name.clone(),
                operation: "register_import",
            });
        }

        self.unit.register_import(target);
        Ok(())
    }
}
