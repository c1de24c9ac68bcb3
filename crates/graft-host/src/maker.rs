//! Tree-construction surfaces of the host toolchain.
//!
//! Most node factories are stable across releases and live at module level.
//! Two are not: binary expressions (legacy hosts publish operators as small
//! integer opcodes, modern hosts as the [`BinOp`] enum) and method
//! declarations (the factory grew from five to eight parameters). Those live
//! under [`legacy`] and [`modern`], one surface per generation, both building
//! the same tree nodes.

use crate::flags::Modifiers;
use crate::tree::{BinOp, Block, Expr, MethodDecl, Param, Stmt};

/// A version family of the host toolchain whose extension-API shape differs
/// from adjacent families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolchainGeneration {
    Legacy,
    Modern,
}

impl ToolchainGeneration {
    /// Environment variable overriding the detected generation.
    pub const ENV_OVERRIDE: &'static str = "GRAFT_TOOLCHAIN";

    /// Detect the host generation.
    ///
    /// Honors `GRAFT_TOOLCHAIN` (`legacy` / `modern`); otherwise reports the
    /// host default, which is the modern family.
    pub fn detect() -> Self {
        match std::env::var(Self::ENV_OVERRIDE) {
            Ok(value) if value.eq_ignore_ascii_case("legacy") => ToolchainGeneration::Legacy,
            _ => ToolchainGeneration::Modern,
        }
    }

    /// Human-readable generation name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolchainGeneration::Legacy => "legacy",
            ToolchainGeneration::Modern => "modern",
        }
    }
}

/// Build a string literal node.
pub fn literal(text: impl Into<String>) -> Expr {
    Expr::Literal(text.into())
}

/// Build an identifier reference.
pub fn ident(name: impl Into<String>) -> Expr {
    Expr::Ident(name.into())
}

/// Build a qualified member access, `target.member`.
pub fn select(target: Expr, member: impl Into<String>) -> Expr {
    Expr::Select {
        target: Box::new(target),
        member: member.into(),
    }
}

/// Build a call expression.
pub fn apply(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Apply {
        callee: Box::new(callee),
        args,
    }
}

/// Build a return statement.
pub fn ret(expr: Expr) -> Stmt {
    Stmt::Return(expr)
}

/// Build a statement block.
pub fn block(flags: u64, stmts: Vec<Stmt>) -> Block {
    Block { flags, stmts }
}

/// Construction surface of legacy host generations.
pub mod legacy {
    use super::*;

    /// Binary operator opcodes as the legacy host publishes them.
    pub const PLUS: i32 = 71;
    pub const MINUS: i32 = 72;
    pub const MUL: i32 = 73;
    pub const DIV: i32 = 74;

    /// The legacy host's static opcode table in `(name, opcode)` form.
    pub const OPCODES: &[(&str, i32)] = &[
        ("PLUS", PLUS),
        ("MINUS", MINUS),
        ("MUL", MUL),
        ("DIV", DIV),
    ];

    /// Build a binary expression from a legacy opcode.
    ///
    /// Opcodes outside the published table are rejected.
    pub fn binary(opcode: i32, lhs: Expr, rhs: Expr) -> Option<Expr> {
        let op = match opcode {
            PLUS => BinOp::Plus,
            MINUS => BinOp::Minus,
            MUL => BinOp::Mul,
            DIV => BinOp::Div,
            _ => return None,
        };

        Some(Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// Five-parameter method factory of the legacy generation.
    pub fn method_def(
        mods: Modifiers,
        name: &str,
        return_type: &str,
        params: Vec<Param>,
        body: Block,
    ) -> MethodDecl {
        MethodDecl {
            name: name.to_string(),
            mods,
            return_type: return_type.to_string(),
            type_params: Vec::new(),
            params,
            throws: Vec::new(),
            body: Some(body),
            default_value: None,
            markers: Vec::new(),
        }
    }
}

/// Construction surface of modern host generations.
pub mod modern {
    use super::*;

    /// Build a binary expression from the operator enum.
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Look up an operator constant by name, case-insensitively.
    pub fn binary_op_by_name(name: &str) -> Option<BinOp> {
        BinOp::ALL
            .iter()
            .copied()
            .find(|op| op.name().eq_ignore_ascii_case(name))
    }

    /// Eight-parameter method factory of the modern generation.
    #[allow(clippy::too_many_arguments)]
    pub fn method_def(
        mods: Modifiers,
        name: &str,
        return_type: &str,
        type_params: Vec<String>,
        params: Vec<Param>,
        throws: Vec<String>,
        body: Block,
        default_value: Option<Expr>,
    ) -> MethodDecl {
        MethodDecl {
            name: name.to_string(),
            mods,
            return_type: return_type.to_string(),
            type_params,
            params,
            throws,
            body: Some(body),
            default_value,
            markers: Vec::new(),
        }
    }
}
