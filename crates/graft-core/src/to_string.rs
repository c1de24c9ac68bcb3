//! Text-representation generator.
//!
//! For a marked class `Point { String name; String[] tags; }` the appended
//! member is logically
//!
//! ```text
//! public String toString() {
//!     return "Point{" + "name=" + name + ", tags=" + Arrays.toString(tags) + "}";
//! }
//! ```
//!
//! Fields are concatenated in syntactic declaration order; inherited members
//! are excluded. Text-typed field values are not quoted or escaped.

use graft_host::flags::Modifiers;
use graft_host::maker;
use graft_host::symbol::DeclShape;
use graft_host::tree::{Expr, Member, MethodDecl};
use tracing::debug;

use crate::facade::ClassFacade;
use crate::shim::{MethodParts, ParamShape, ShimCache};
use crate::strategy::{RoundContext, SynthesisOutcome, SynthesisStrategy};
use crate::{GraftError, Result};

/// Marker selecting this strategy.
pub const TO_STRING_MARKER: &str = "ToString";

/// Name of the synthesized member.
pub const TO_STRING_METHOD: &str = "toString";

/// Return-type spelling of the synthesized member.
const STRING_TYPE: &str = "String";

/// Textual array conversion utility and the import it needs.
const ARRAYS_TYPE: &str = "Arrays";
const ARRAYS_CONVERSION: &str = "toString";
const ARRAYS_IMPORT: &str = "java.util.Arrays";

/// Operator spelling resolved through the shim.
const CONCAT_OPERATOR: &str = "PLUS";

/// Strategy appending a `toString` method that concatenates the
/// declaration's own fields.
#[derive(Debug, Default)]
pub struct ToStringStrategy;

impl ToStringStrategy {
    pub fn new() -> Self {
        Self
    }

    fn build_method(&self, facade: &mut ClassFacade<'_>, ctx: &RoundContext) -> Result<MethodDecl> {
        let shim = ShimCache::global();
        let plus = shim.resolve_binary_operator(ctx.generation, CONCAT_OPERATOR)?;
        let label = facade.simple_name().to_string();

        let mut chain = maker::literal(format!("{label}{{"));
        for (index, field) in facade.declared_fields().iter().enumerate() {
            let prefix = if index == 0 {
                format!("{}=", field.name)
            } else {
                format!(", {}=", field.name)
            };
            chain = plus.build(chain, maker::literal(prefix))?;

            let value = if field.type_spelling.ends_with("[]") {
                facade.register_import(ARRAYS_IMPORT)?;
                self.array_conversion(&field.name)
            } else {
                maker::ident(&field.name)
            };
            chain = plus.build(chain, value)?;
        }
        chain = plus.build(chain, maker::literal("}"))?;

        let body = maker::block(0, vec![maker::ret(chain)]);
        let factory = shim.resolve_construction_handle(
            ctx.generation,
            "TreeMaker",
            "MethodDef",
            ParamShape::for_generation(ctx.generation),
        )?;

        Ok(factory.method(MethodParts {
            mods: Modifiers::PUBLIC,
            name: TO_STRING_METHOD.to_string(),
            return_type: STRING_TYPE.to_string(),
            params: Vec::new(),
            body,
        }))
    }

    /// `Arrays.toString(<field>)`
    fn array_conversion(&self, field: &str) -> Expr {
        maker::apply(
            maker::select(maker::ident(ARRAYS_TYPE), ARRAYS_CONVERSION),
            vec![maker::ident(field)],
        )
    }
}

impl SynthesisStrategy for ToStringStrategy {
    fn marker(&self) -> &str {
        TO_STRING_MARKER
    }

    fn synthesize(&self, facade: &mut ClassFacade<'_>, ctx: &RoundContext) -> Result<SynthesisOutcome> {
        let shape = facade.symbol().shape;
        if shape != DeclShape::Class {
            return Err(GraftError::Synthesis {
                marker: TO_STRING_MARKER.to_string(),
                declaration: facade.qualified_name().to_string(),
                reason: format!("cannot synthesize a method body on a {}", shape.as_str()),
            });
        }

        if facade.contains_member(TO_STRING_METHOD) {
            debug!(declaration = facade.qualified_name(), "toString already declared, skipping");
            return Ok(SynthesisOutcome::AlreadyPresent);
        }

        // The member is assembled in full before the single append below, so
        // a failure anywhere leaves the member list untouched.
        let method = self.build_method(facade, ctx)?;
        facade.append_member(Member::Method(method))?;

        debug!(declaration = facade.qualified_name(), "toString synthesized");
        Ok(SynthesisOutcome::Generated)
    }
}
