//! Version compatibility shim over the host's construction surfaces.
//!
//! The host's extension API is explicitly unstable: binary operators are
//! integer opcodes in legacy generations and enumeration constants in modern
//! ones, and the method factory changed arity between the two. Every such
//! lookup is funneled through one resolver per generation and cached
//! process-wide, so the cost is paid once per distinct operation and behaves
//! as a direct call thereafter. Failed resolutions are never cached; a retry
//! with identical inputs fails again deterministically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use dashmap::DashMap;
use graft_host::flags::Modifiers;
use graft_host::maker::{legacy, modern, ToolchainGeneration};
use graft_host::tree::{BinOp, Block, Expr, MethodDecl, Param};
use tracing::debug;

use crate::{GraftError, Result};

/// Generation-opaque binary operator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    /// Legacy integer opcode.
    Legacy(i32),

    /// Modern enumeration constant.
    Modern(BinOp),
}

impl OpTag {
    /// Build a binary node through the generation this tag belongs to.
    pub fn build(self, lhs: Expr, rhs: Expr) -> Result<Expr> {
        match self {
            OpTag::Legacy(opcode) => {
                legacy::binary(opcode, lhs, rhs).ok_or_else(|| GraftError::Resolution {
                    generation: ToolchainGeneration::Legacy.as_str(),
                    operation: format!("Binary#{opcode}"),
                })
            }
            OpTag::Modern(op) => Ok(modern::binary(op, lhs, rhs)),
        }
    }
}

/// Parameter shape of a construction operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamShape {
    /// `(mods, name, ret, params, body)` — the legacy five-parameter form.
    Args5,

    /// `(mods, name, ret, type_params, params, throws, body, default)` —
    /// the modern eight-parameter form.
    Args8,
}

impl ParamShape {
    /// The shape a generation's factory actually exposes.
    pub fn for_generation(generation: ToolchainGeneration) -> Self {
        match generation {
            ToolchainGeneration::Legacy => ParamShape::Args5,
            ToolchainGeneration::Modern => ParamShape::Args8,
        }
    }
}

/// Uniform inputs for a resolved method factory.
#[derive(Debug, Clone)]
pub struct MethodParts {
    pub mods: Modifiers,
    pub name: String,
    pub return_type: String,
    pub params: Vec<Param>,
    pub body: Block,
}

/// Operations the construction resolver knows how to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ConstructOp {
    MethodDef,
}

/// A resolved construction operation, invocable without further lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructionHandle {
    generation: ToolchainGeneration,
    op: ConstructOp,
}

impl ConstructionHandle {
    /// Build a method node through the generation-correct factory.
    pub fn method(&self, parts: MethodParts) -> MethodDecl {
        match self.generation {
            ToolchainGeneration::Legacy => legacy::method_def(
                parts.mods,
                &parts.name,
                &parts.return_type,
                parts.params,
                parts.body,
            ),
            ToolchainGeneration::Modern => modern::method_def(
                parts.mods,
                &parts.name,
                &parts.return_type,
                Vec::new(),
                parts.params,
                Vec::new(),
                parts.body,
                None,
            ),
        }
    }
}

/// Lookup strategy for one toolchain generation.
///
/// One implementation exists per supported generation; the right one is
/// picked once per resolution and never consulted again for cached entries.
trait OperationResolver: Send + Sync {
    fn generation(&self) -> ToolchainGeneration;

    /// Look up a binary operator by its host spelling.
    fn binary_operator(&self, name: &str) -> Option<OpTag>;

    /// Look up a construction operation by owner type, name and shape.
    fn construction(&self, owner: &str, name: &str, shape: ParamShape) -> Option<ConstructionHandle>;
}

/// Legacy generations publish operators as static constants; the lookup is
/// an exact-name scan of the opcode table.
struct LegacyResolver;

impl OperationResolver for LegacyResolver {
    fn generation(&self) -> ToolchainGeneration {
        ToolchainGeneration::Legacy
    }

    fn binary_operator(&self, name: &str) -> Option<OpTag> {
        legacy::OPCODES
            .iter()
            .find(|(constant, _)| *constant == name)
            .map(|(_, opcode)| OpTag::Legacy(*opcode))
    }

    fn construction(&self, owner: &str, name: &str, shape: ParamShape) -> Option<ConstructionHandle> {
        if owner == "TreeMaker" && name == "MethodDef" && shape == ParamShape::Args5 {
            Some(ConstructionHandle {
                generation: ToolchainGeneration::Legacy,
                op: ConstructOp::MethodDef,
            })
        } else {
            None
        }
    }
}

/// Modern generations publish operators as enumeration constants; the host
/// matches those case-insensitively.
struct ModernResolver;

impl OperationResolver for ModernResolver {
    fn generation(&self) -> ToolchainGeneration {
        ToolchainGeneration::Modern
    }

    fn binary_operator(&self, name: &str) -> Option<OpTag> {
        modern::binary_op_by_name(name).map(OpTag::Modern)
    }

    fn construction(&self, owner: &str, name: &str, shape: ParamShape) -> Option<ConstructionHandle> {
        if owner == "TreeMaker" && name == "MethodDef" && shape == ParamShape::Args8 {
            Some(ConstructionHandle {
                generation: ToolchainGeneration::Modern,
                op: ConstructOp::MethodDef,
            })
        } else {
            None
        }
    }
}

fn resolver_for(generation: ToolchainGeneration) -> &'static dyn OperationResolver {
    match generation {
        ToolchainGeneration::Legacy => &LegacyResolver,
        ToolchainGeneration::Modern => &ModernResolver,
    }
}

static GLOBAL_CACHE: OnceLock<ShimCache> = OnceLock::new();

/// Process-wide cache of resolved operation handles.
///
/// Entries are created lazily on first use and immutable thereafter; nothing
/// is invalidated during a process lifetime. Concurrent first-resolution is
/// tolerated: resolution is pure, so redundant lookups insert equal-by-value
/// results.
#[derive(Debug, Default)]
pub struct ShimCache {
    binary_ops: DashMap<(ToolchainGeneration, String), OpTag>,
    constructions: DashMap<(ToolchainGeneration, String, String, ParamShape), ConstructionHandle>,
    binary_lookups: AtomicU64,
    construction_lookups: AtomicU64,
}

impl ShimCache {
    /// Create an empty cache. Production code shares [`ShimCache::global`];
    /// private instances exist for tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache instance.
    pub fn global() -> &'static ShimCache {
        GLOBAL_CACHE.get_or_init(ShimCache::new)
    }

    /// Resolve a binary operator by host spelling for the given generation.
    ///
    /// Legacy generations look the name up in the static opcode table;
    /// modern generations match an enumeration constant case-insensitively.
    pub fn resolve_binary_operator(
        &self,
        generation: ToolchainGeneration,
        name: &str,
    ) -> Result<OpTag> {
        let key = (generation, name.to_string());
        if let Some(tag) = self.binary_ops.get(&key) {
            return Ok(*tag);
        }

        self.binary_lookups.fetch_add(1, Ordering::Relaxed);
        let tag = resolver_for(generation)
            .binary_operator(name)
            .ok_or_else(|| GraftError::Resolution {
                generation: generation.as_str(),
                operation: format!("Binary operator {name}"),
            })?;

        debug!(generation = generation.as_str(), name, ?tag, "binary operator resolved");
        self.binary_ops.insert(key, tag);
        Ok(tag)
    }

    /// Resolve a construction operation whose parameter shape differs across
    /// generations.
    pub fn resolve_construction_handle(
        &self,
        generation: ToolchainGeneration,
        owner: &str,
        name: &str,
        shape: ParamShape,
    ) -> Result<ConstructionHandle> {
        let key = (generation, owner.to_string(), name.to_string(), shape);
        if let Some(handle) = self.constructions.get(&key) {
            return Ok(*handle);
        }

        self.construction_lookups.fetch_add(1, Ordering::Relaxed);
        let handle = resolver_for(generation)
            .construction(owner, name, shape)
            .ok_or_else(|| GraftError::Resolution {
                generation: generation.as_str(),
                operation: format!("{owner}.{name}/{shape:?}"),
            })?;

        debug!(generation = generation.as_str(), owner, name, "construction handle resolved");
        self.constructions.insert(key, handle);
        Ok(handle)
    }

    /// Number of uncached binary-operator lookups performed so far.
    pub fn binary_lookups(&self) -> u64 {
        self.binary_lookups.load(Ordering::Relaxed)
    }

    /// Number of uncached construction lookups performed so far.
    pub fn construction_lookups(&self) -> u64 {
        self.construction_lookups.load(Ordering::Relaxed)
    }
}
