//! Drops the fully-qualified receiver left behind by [`ChangeMethodOwner`](super::ChangeMethodOwner).
//!
//! `com.acme.List.of(a)` becomes `List.of(a)` plus `import com.acme.List;`,
//! but only for calls the owner change recorded, and only when the unit has
//! no other use for the simple name: no import of the origin owner and no
//! other type called `List` imported or declared.

use super::imports::ImportEdits;
use super::{ExecutionContext, Pass, PassStats};
use crate::ast::*;
use crate::config::Config;
use crate::error::Result;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifyQualifiedOwner {
    origin: String,
    target: String,
    change_key: String,
}

impl SimplifyQualifiedOwner {
    pub fn new(config: &Config) -> Self {
        Self {
            origin: config.origin.clone(),
            target: config.target.clone(),
            change_key: config.change_key(),
        }
    }

    /// Whether the simple name of the target already means something else in `unit`
    fn simple_name_taken(&self, unit: &Ast) -> bool {
        let simple = simple_name(&self.target);
        let imported_elsewhere = unit
            .imports
            .iter()
            .any(|import| import.imported_simple_name() == Some(simple) && import.name != self.target);
        imported_elsewhere || unit.declares_type(simple)
    }
}

impl Pass for SimplifyQualifiedOwner {
    fn name(&self) -> &'static str {
        "simplify-qualified-owner"
    }

    fn process(&self, unit: &mut Ast, ctx: &mut ExecutionContext) -> Result<PassStats> {
        let mut stats = PassStats::default();
        let changed = ctx.message_set(&self.change_key);
        if changed.is_empty() {
            return Ok(stats);
        }

        let has_origin_import = unit.imports_type(&self.origin);
        if has_origin_import || self.simple_name_taken(unit) {
            log::debug!(
                "{}: keeping {} calls qualified (origin import: {})",
                self.name(),
                changed.len(),
                has_origin_import
            );
            return Ok(stats);
        }

        let mut simplifier = Simplifier {
            target: &self.target,
            changed: &changed,
            simplified: 0,
        };
        simplifier.visit_ast(unit);
        stats.references_simplified = simplifier.simplified;

        if stats.references_simplified > 0 {
            let mut imports = ImportEdits::new();
            imports.add_if_absent(self.target.as_str());
            stats.imports_added = imports.apply(unit).added;
        }
        log::debug!("{} end: {}", self.name(), stats);
        Ok(stats)
    }
}

struct Simplifier<'a> {
    target: &'a str,
    changed: &'a BTreeSet<NodeId>,
    simplified: usize,
}

impl AstVisitorMut for Simplifier<'_> {
    fn visit_method_call(&mut self, call: &mut MethodCallExpr) {
        walk_method_call_mut(self, call);
        if !self.changed.contains(&call.id) {
            return;
        }
        let Some(ref mut receiver) = call.target else {
            return;
        };
        if !receiver.is_fully_qualified_class_reference(self.target) {
            return;
        }

        let span = receiver.span();
        **receiver = Expr::Identifier(IdentifierExpr {
            name: simple_name(self.target).to_string(),
            ty: Some(JavaType::class(self.target)),
            span,
        });
        log::trace!("call {}: receiver shortened to {}", call.id, simple_name(self.target));
        self.simplified += 1;
    }
}
