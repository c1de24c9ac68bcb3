//! # Graft Host
//!
//! The host compilation environment's structural model, as seen by the
//! synthesis engine.
//!
//! This crate carries everything the host toolchain hands across the
//! extension boundary during a compilation round:
//!
//! - Syntax tree nodes for declaration bodies ([`tree`])
//! - Read-only semantic symbols resolved by earlier phases ([`symbol`])
//! - Modifier flag words ([`flags`]) and declarative markers ([`marker`])
//! - The generation-specific tree-construction surfaces ([`maker`])
//! - The compilation unit binding symbols to their trees ([`unit`])
//!
//! Symbols are immutable input; trees are owned by the compilation unit and
//! may be mutated by the engine before later phases run.

pub mod flags;
pub mod marker;
pub mod maker;
pub mod symbol;
pub mod tree;
pub mod unit;

pub use flags::Modifiers;
pub use marker::Marker;
pub use maker::ToolchainGeneration;
pub use symbol::{ClassSymbol, DeclShape, MemberKind, MemberSymbol};
pub use tree::{BinOp, Block, ClassDecl, Expr, FieldDecl, Member, MethodDecl, Param, Stmt};
pub use unit::{ClassId, CompilationUnit};
