//! Syntax tree nodes for declaration bodies.
//!
//! These are the mutable structural representations owned by a compilation
//! unit. Members appended here before the final compiled form is fixed are
//! observed by later phases as if they had been hand-written.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::flags::Modifiers;
use crate::marker::{find_marker, Marker};

/// Binary operators as stored in trees.
///
/// The stored form is generation-independent; only the construction surfaces
/// in [`crate::maker`] differ in how they accept one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Plus,
    Minus,
    Mul,
    Div,
}

impl BinOp {
    /// Every operator constant the host publishes.
    pub const ALL: [BinOp; 4] = [BinOp::Plus, BinOp::Minus, BinOp::Mul, BinOp::Div];

    /// Host spelling of the operator constant.
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Plus => "PLUS",
            BinOp::Minus => "MINUS",
            BinOp::Mul => "MUL",
            BinOp::Div => "DIV",
        }
    }

    /// Source spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Plus => "+",
            BinOp::Minus => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// String literal.
    Literal(String),

    /// Reference to a name in scope.
    Ident(String),

    /// Qualified member access, `target.member`.
    Select { target: Box<Expr>, member: String },

    /// Binary operation.
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Call expression.
    Apply { callee: Box<Expr>, args: Vec<Expr> },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(text) => write!(f, "\"{}\"", text),
            Expr::Ident(name) => write!(f, "{}", name),
            Expr::Select { target, member } => write!(f, "{}.{}", target, member),
            Expr::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op.symbol(), rhs),
            Expr::Apply { callee, args } => {
                write!(f, "{}(", callee)?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A statement node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    /// `return <expr>;`
    Return(Expr),
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Return(expr) => write!(f, "return {};", expr),
        }
    }
}

/// An ordered statement block with the host's flags word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub flags: u64,
    pub stmts: Vec<Stmt>,
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub type_spelling: String,
}

/// A field declaration node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,

    /// Syntactic type spelling exactly as written, e.g. `String[]`.
    pub type_spelling: String,

    pub mods: Modifiers,
    pub markers: Vec<Marker>,
}

impl FieldDecl {
    /// Create a field with the given name and syntactic type spelling.
    pub fn new(name: impl Into<String>, type_spelling: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_spelling: type_spelling.into(),
            mods: Modifiers::empty(),
            markers: Vec::new(),
        }
    }

    /// Set the modifier flags.
    pub fn with_modifiers(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }

    /// Attach a member-level marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }
}

/// A method declaration node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub mods: Modifiers,
    pub return_type: String,
    pub type_params: Vec<String>,
    pub params: Vec<Param>,
    pub throws: Vec<String>,

    /// Absent for bodyless declarations.
    pub body: Option<Block>,

    /// Marker-member default value; only newer generations carry one.
    pub default_value: Option<Expr>,

    pub markers: Vec<Marker>,
}

impl MethodDecl {
    /// Replace the method's modifier flags.
    pub fn set_modifiers(&mut self, mods: Modifiers) {
        self.mods = mods;
    }

    /// OR the given flags into the current set; previously set bits stay.
    pub fn add_modifiers(&mut self, mods: Modifiers) {
        self.mods |= mods;
    }

    /// Attach a member-level marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }
}

/// One entry of a declaration's ordered member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
}

impl Member {
    /// Simple name of the member.
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Method(method) => &method.name,
        }
    }

    /// Markers attached to the member.
    pub fn markers(&self) -> &[Marker] {
        match self {
            Member::Field(field) => &field.markers,
            Member::Method(method) => &method.markers,
        }
    }

    /// True for syntactic variable declarations.
    pub fn is_field(&self) -> bool {
        matches!(self, Member::Field(_))
    }
}

/// A class-like declaration node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub mods: Modifiers,
    pub markers: Vec<Marker>,

    /// Members in syntactic declaration order.
    pub members: Vec<Member>,
}

impl ClassDecl {
    /// Create an empty declaration with the given simple name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mods: Modifiers::empty(),
            markers: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Set the modifier flags.
    pub fn with_modifiers(mut self, mods: Modifiers) -> Self {
        self.mods = mods;
        self
    }

    /// Attach a declaration-level marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Append a member in declaration order.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Declaration-level marker by simple name.
    pub fn marker(&self, name: &str) -> Option<&Marker> {
        find_marker(&self.markers, name)
    }

    /// True if a member of this simple name is declared.
    pub fn contains_member(&self, name: &str) -> bool {
        self.members.iter().any(|member| member.name() == name)
    }

    /// Fields declared directly on this declaration, in syntactic order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|member| match member {
            Member::Field(field) => Some(field),
            Member::Method(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_order_is_declaration_order() {
        let class = ClassDecl::new("Point")
            .with_member(Member::Field(FieldDecl::new("b", "int")))
            .with_member(Member::Field(FieldDecl::new("a", "int")));

        let names: Vec<&str> = class.fields().map(|field| field.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_contains_member_matches_simple_name() {
        let class = ClassDecl::new("User").with_member(Member::Field(FieldDecl::new("name", "String")));

        assert!(class.contains_member("name"));
        assert!(!class.contains_member("toString"));
    }

    #[test]
    fn test_expr_display_renders_concat_chain() {
        let chain = Expr::Binary {
            op: BinOp::Plus,
            lhs: Box::new(Expr::Literal("name=".to_string())),
            rhs: Box::new(Expr::Ident("name".to_string())),
        };

        assert_eq!(chain.to_string(), "\"name=\" + name");
    }

    #[test]
    fn test_method_add_modifiers_never_clears() {
        let mut method = MethodDecl {
            name: "toString".to_string(),
            mods: Modifiers::PUBLIC,
            return_type: "String".to_string(),
            type_params: Vec::new(),
            params: Vec::new(),
            throws: Vec::new(),
            body: None,
            default_value: None,
            markers: Vec::new(),
        };

        method.add_modifiers(Modifiers::FINAL);
        assert!(method.mods.contains(Modifiers::PUBLIC));
        assert!(method.mods.contains(Modifiers::FINAL));
    }
}
