//! In-file helper rewrite
//!
//! Every call matching the family's factory (`java.util.List.of(..)`) becomes
//! an unqualified call to the family helper (`listOf(..)`) with the same
//! arguments. Once a host type has been fully visited, one helper per
//! distinct arity recorded for it is appended to its body unless a compatible
//! member is already there.

use super::helper::HelperFamily;
use super::imports::ImportEdits;
use super::matcher::MethodMatcher;
use super::scope::{ArityUsageIndex, TypeScopes};
use super::{ExecutionContext, Pass, PassStats};
use crate::ast::*;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionOfBackport {
    family: HelperFamily,
}

impl CollectionOfBackport {
    pub fn new(family: HelperFamily) -> Self {
        Self { family }
    }

    pub fn family(&self) -> HelperFamily {
        self.family
    }
}

impl Pass for CollectionOfBackport {
    fn name(&self) -> &'static str {
        "collection-of-backport"
    }

    fn process(&self, unit: &mut Ast, _ctx: &mut ExecutionContext) -> Result<PassStats> {
        log::debug!(
            "{} start: matcher='{}' types={}",
            self.name(),
            self.family.matcher(),
            unit.type_decls.len()
        );

        let shadowed = self.family.shadowed_types(unit);
        if !shadowed.is_empty() {
            log::debug!("{}: spelling out {:?}, their simple names are taken", self.name(), shadowed);
        }

        let mut rewriter = HelperRewriter {
            family: self.family,
            shadowed,
            matcher: self.family.matcher(),
            scopes: TypeScopes::new(unit.package_name()),
            usage: ArityUsageIndex::new(),
            ids: std::mem::take(&mut unit.ids),
            imports: ImportEdits::new(),
            stats: PassStats::default(),
            error: None,
        };
        rewriter.visit_ast(unit);

        let HelperRewriter { ids, imports, mut stats, error, usage, .. } = rewriter;
        unit.ids = ids;
        if let Some(error) = error {
            return Err(error);
        }
        if !usage.is_empty() {
            return Err(Error::internal_error("arities recorded for a type that was never closed"));
        }

        let changes = imports.apply(unit);
        stats.imports_added = changes.added;
        stats.imports_removed = changes.removed;
        log::debug!("{} end: {}", self.name(), stats);
        Ok(stats)
    }
}

struct HelperRewriter {
    family: HelperFamily,
    /// Library types written fully qualified in synthesized helpers
    shadowed: Vec<&'static str>,
    matcher: &'static MethodMatcher,
    scopes: TypeScopes,
    usage: ArityUsageIndex,
    ids: IdAllocator,
    imports: ImportEdits,
    stats: PassStats,
    error: Option<Error>,
}

impl HelperRewriter {
    fn rewrite_call(&mut self, call: &mut MethodCallExpr) {
        let host = self.scopes.host().and_then(|scope| Some((scope.id, scope.fqn.clone()?)));
        let Some((host_id, host_fqn)) = host else {
            log::debug!("call {} to {} has no type that can declare a helper", call.id, self.matcher);
            self.stats.calls_skipped += 1;
            return;
        };

        match rebuild_method_type(call, &host_fqn, self.family) {
            Ok(method_type) => {
                log::trace!("call {} -> {}.{}", call.id, host_fqn, method_type.name);
                call.target = None;
                call.name = method_type.name.clone();
                call.method_type = Some(method_type);
                self.usage.record(host_id, call.arity());
                self.stats.calls_rewritten += 1;
            }
            Err(e) => {
                log::warn!("call {} left unchanged: {}", call.id, e);
                self.stats.calls_skipped += 1;
            }
        }
    }

    /// Append the helpers recorded for `decl`, skipping arities it already serves
    fn synthesize_into(&mut self, decl: &mut TypeDecl, arity: usize) {
        let helper_name = self.family.helper_name();
        if let Some(existing) = self.family.find_compatible(decl, arity) {
            if !existing.is_static() {
                log::warn!(
                    "{} already declares a non-static {} taking {} arguments; rewritten calls bind to it",
                    decl,
                    helper_name,
                    arity
                );
            }
            self.stats.helpers_reused += 1;
            return;
        }

        match self.family.synthesize_spelling_out(&mut self.ids, arity, &self.shadowed) {
            Some(helper) => {
                log::trace!("{}: adding {} for arity {}", decl, helper_name, arity);
                decl.members_mut().push(ClassMember::Method(helper));
                self.stats.helpers_synthesized += 1;
                for import in self.family.imports() {
                    if !self.shadowed.contains(&import) {
                        self.imports.add_if_absent(import);
                    }
                }
            }
            None => log::warn!("{}: no {} helper for arity {}", decl, helper_name, arity),
        }
    }
}

/// Resolved type of the rewritten call: declared on the host, same type parameters.
fn rebuild_method_type(call: &MethodCallExpr, host_fqn: &str, family: HelperFamily) -> Result<MethodType> {
    if !family.accepts_arity(call.arity()) {
        return Err(Error::template_error(format!(
            "{} takes key/value pairs, found {} arguments",
            family.helper_name(),
            call.arity()
        )));
    }
    match call.method_type.as_ref().map(|t| &t.declaring_type) {
        Some(JavaType::Class(class)) => Ok(MethodType::new(
            JavaType::parameterized(host_fqn, class.type_params.clone()),
            family.helper_name(),
        )),
        Some(other) => Err(Error::template_error(format!("declaring type {} is not a class type", other))),
        None => Err(Error::template_error("call has no resolved method")),
    }
}

impl AstVisitorMut for HelperRewriter {
    fn visit_type_decl(&mut self, decl: &mut TypeDecl, site: TypeSite) {
        self.scopes.enter(decl, site);
        walk_type_decl_mut(self, decl);

        let Some(scope) = self.scopes.exit() else {
            self.error = Some(Error::internal_error(format!("type scope stack empty leaving {}", decl)));
            return;
        };
        for arity in self.usage.take(scope.id) {
            self.synthesize_into(decl, arity);
        }
    }

    fn visit_anonymous_class(&mut self, class: &mut ClassDecl) {
        self.scopes.enter_anonymous(class);
        walk_members_mut(self, &mut class.body);
        self.scopes.exit();
    }

    fn visit_method_call(&mut self, call: &mut MethodCallExpr) {
        // Arguments first so nested factory calls are rewritten inside-out.
        walk_method_call_mut(self, call);
        if self.matcher.matches(call) {
            self.rewrite_call(call);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;

    fn list_of(ids: &mut IdAllocator, args: Vec<Expr>) -> Expr {
        let mut node = call_node(ids, Some(ident("List")), "of", args);
        node.method_type = Some(MethodType::new(
            JavaType::parameterized("java.util.List", vec![JavaType::TypeVar("E".into())]),
            "of",
        ));
        Expr::MethodCall(node)
    }

    #[test]
    fn test_rewritten_call_is_declared_on_host() {
        let mut ids = IdAllocator::new();
        let stmt = expr_stmt(list_of(&mut ids, vec![int_lit(1), int_lit(2)]));
        let test = class(
            &mut ids,
            vec![],
            "Test",
            vec![ClassMember::Method(method(vec![], None, "run", vec![], vec![stmt]))],
        );
        let mut unit = Ast::new(Some("com.acme"), ids);
        unit.type_decls.push(test);

        let stats = CollectionOfBackport::new(HelperFamily::List)
            .process(&mut unit, &mut ExecutionContext::new())
            .unwrap();
        assert_eq!(stats.calls_rewritten, 1);
        assert_eq!(stats.helpers_synthesized, 1);
        assert_eq!(stats.imports_added, 3);

        let ClassMember::Method(ref run) = unit.type_decls[0].members()[0] else {
            panic!("expected method");
        };
        let Stmt::Expression(ref stmt) = run.body.as_ref().unwrap().statements[0] else {
            panic!("expected expression statement");
        };
        let Expr::MethodCall(ref call) = stmt.expr else {
            panic!("expected call");
        };
        assert!(call.target.is_none());
        assert_eq!(call.name, "listOf");
        let method_type = call.method_type.as_ref().unwrap();
        assert_eq!(method_type.declaring_type.to_string(), "com.acme.Test<E>");
        assert_eq!(method_type.name, "listOf");
    }

    #[test]
    fn test_odd_map_arity_is_skipped() {
        let mut ids = IdAllocator::new();
        let mut node = call_node(&mut ids, Some(ident("Map")), "of", vec![int_lit(1), int_lit(2), int_lit(3)]);
        node.method_type = Some(MethodType::new(JavaType::class("java.util.Map"), "of"));
        let original = Expr::MethodCall(node);
        let stmt = expr_stmt(original.clone());
        let test = class(
            &mut ids,
            vec![],
            "Test",
            vec![ClassMember::Method(method(vec![], None, "run", vec![], vec![stmt]))],
        );
        let mut unit = Ast::new(None, ids);
        unit.type_decls.push(test);
        let before = unit.clone();

        let stats = CollectionOfBackport::new(HelperFamily::Map)
            .process(&mut unit, &mut ExecutionContext::new())
            .unwrap();
        assert_eq!(stats.calls_skipped, 1);
        assert!(!stats.changed());
        assert_eq!(unit, before);
    }
}
