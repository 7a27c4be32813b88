//! Owner change: `origin.method(..)` → `target.method(..)`
//!
//! The new receiver is always spelled fully qualified, because the simple
//! name of the target may still mean the origin type in this unit. Every
//! rewritten call is recorded in the execution context so
//! [`SimplifyQualifiedOwner`](super::SimplifyQualifiedOwner) can shorten it
//! when that is safe.

use super::imports::ImportEdits;
use super::matcher::MethodMatcher;
use super::{ExecutionContext, Pass, PassStats};
use crate::ast::build::qualified;
use crate::ast::*;
use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeMethodOwner {
    matcher: MethodMatcher,
    origin: String,
    target: String,
    change_key: String,
}

impl ChangeMethodOwner {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            matcher: MethodMatcher::parse(&config.method_pattern())?,
            origin: config.origin.clone(),
            target: config.target.clone(),
            change_key: config.change_key(),
        })
    }

    pub fn change_key(&self) -> &str {
        &self.change_key
    }
}

impl Pass for ChangeMethodOwner {
    fn name(&self) -> &'static str {
        "change-method-owner"
    }

    fn process(&self, unit: &mut Ast, ctx: &mut ExecutionContext) -> Result<PassStats> {
        log::debug!("{} start: '{}' -> {}", self.name(), self.matcher, self.target);

        let mut rewriter = OwnerRewriter {
            pass: self,
            ctx,
            stats: PassStats::default(),
        };
        rewriter.visit_ast(unit);
        let mut stats = rewriter.stats;

        if stats.calls_rewritten > 0 {
            let mut imports = ImportEdits::new();
            imports.remove_if_unused(self.origin.as_str());
            let changes = imports.apply(unit);
            stats.imports_removed = changes.removed;
        }
        log::debug!("{} end: {}", self.name(), stats);
        Ok(stats)
    }
}

struct OwnerRewriter<'a> {
    pass: &'a ChangeMethodOwner,
    ctx: &'a mut ExecutionContext,
    stats: PassStats,
}

impl OwnerRewriter<'_> {
    fn rewrite_call(&mut self, call: &mut MethodCallExpr) {
        let method_type = match retarget(call, &self.pass.target) {
            Ok(method_type) => method_type,
            Err(e) => {
                log::warn!("call {} left unchanged: {}", call.id, e);
                self.stats.calls_skipped += 1;
                return;
            }
        };

        let span = call.target.as_ref().map(|t| t.span()).unwrap_or_default();
        let mut receiver = qualified(&self.pass.target);
        if let Expr::FieldAccess(ref mut access) = receiver {
            access.span = span;
        }

        log::trace!("call {} -> {}.{}", call.id, self.pass.target, call.name);
        call.target = Some(Box::new(receiver));
        call.method_type = Some(method_type);
        self.ctx.put_message_in_set(&self.pass.change_key, call.id);
        self.stats.calls_rewritten += 1;
    }
}

/// Same method on the target owner, keeping the origin's type parameters
fn retarget(call: &MethodCallExpr, target: &str) -> Result<MethodType> {
    let method_type = call
        .method_type
        .as_ref()
        .ok_or_else(|| Error::template_error("call has no resolved method"))?;
    match method_type.declaring_type {
        JavaType::Class(ref class) => Ok(method_type
            .clone()
            .with_declaring_type(JavaType::parameterized(target, class.type_params.clone()))),
        ref other => Err(Error::template_error(format!("declaring type {} is not a class type", other))),
    }
}

impl AstVisitorMut for OwnerRewriter<'_> {
    fn visit_method_call(&mut self, call: &mut MethodCallExpr) {
        walk_method_call_mut(self, call);
        if self.pass.matcher.matches(call) {
            self.rewrite_call(call);
        }
    }
}
