//! Attr shim - receiver resolution for hosts without a type resolver
//!
//! The backport passes only match calls whose `method_type` is filled in. A
//! host with a real symbol table sets it directly; this shim covers the common
//! case from imports alone:
//! - `List.of(..)` where `List` comes from a single-type import, a type
//!   declared in the unit, `java.lang`, or a wildcard import of a known package
//! - `java.util.List.of(..)` spelled out as a qualified chain
//! - unqualified `foo(..)`, resolved to the enclosing type
//!
//! Calls that already carry a `method_type` are left alone.

use crate::ast::*;
use crate::error::Result;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Library types the shim can see through wildcard imports, with their type variables
static KNOWN_TYPES: Lazy<BTreeMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut known: BTreeMap<&'static str, &'static [&'static str]> = BTreeMap::new();
    known.insert("java.util.Collection", &["E"]);
    known.insert("java.util.List", &["E"]);
    known.insert("java.util.Set", &["E"]);
    known.insert("java.util.Map", &["K", "V"]);
    known.insert("java.util.ArrayList", &["E"]);
    known.insert("java.util.HashSet", &["E"]);
    known.insert("java.util.LinkedHashSet", &["E"]);
    known.insert("java.util.HashMap", &["K", "V"]);
    known.insert("java.util.Optional", &["T"]);
    known.insert("java.util.Arrays", &[]);
    known.insert("java.util.Collections", &[]);
    known.insert("java.util.Objects", &[]);
    known.insert("java.lang.Integer", &[]);
    known.insert("java.lang.Long", &[]);
    known.insert("java.lang.Math", &[]);
    known.insert("java.lang.String", &[]);
    known.insert("java.lang.System", &[]);
    known
});

/// Class type for `fqn`, parameterized by its type variables when they are known
pub fn class_type_of(fqn: &str) -> JavaType {
    match KNOWN_TYPES.get(fqn) {
        Some(vars) if !vars.is_empty() => JavaType::parameterized(
            fqn,
            vars.iter().map(|v| JavaType::TypeVar(v.to_string())).collect(),
        ),
        _ => JavaType::class(fqn),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttrStats {
    pub calls_resolved: usize,
    pub calls_unresolved: usize,
}

pub struct Attr {
    pub stats: AttrStats,
}

impl Default for Attr {
    fn default() -> Self {
        Self::new()
    }
}

impl Attr {
    pub fn new() -> Self {
        Self { stats: AttrStats::default() }
    }

    /// Fill in `method_type` on every call the shim can resolve
    pub fn process(&mut self, ast: &mut Ast) -> Result<()> {
        let mut resolver = Resolver::for_unit(ast);
        log::debug!(
            "attr start: imports={} declared_types={}",
            resolver.single_imports.len(),
            resolver.declared.len()
        );
        resolver.visit_ast(ast);
        log::debug!(
            "attr end: resolved={} unresolved={}",
            resolver.stats.calls_resolved,
            resolver.stats.calls_unresolved
        );
        self.stats = resolver.stats;
        Ok(())
    }
}

struct Resolver {
    package: String,
    /// simple name -> fqn, from single-type imports
    single_imports: BTreeMap<String, String>,
    wildcard_packages: Vec<String>,
    /// simple name -> fqn, for types declared in this unit
    declared: BTreeMap<String, String>,
    /// Fully-qualified names of the enclosing named types, innermost last
    enclosing: Vec<Option<String>>,
    stats: AttrStats,
}

impl Resolver {
    fn for_unit(ast: &Ast) -> Self {
        let mut single_imports = BTreeMap::new();
        let mut wildcard_packages = Vec::new();
        for import in ast.imports.iter().filter(|i| !i.is_static) {
            if import.is_wildcard {
                wildcard_packages.push(import.name.clone());
            } else {
                single_imports.insert(simple_name(&import.name).to_string(), import.name.clone());
            }
        }

        let mut declared = BTreeMap::new();
        fn collect(decls: &[TypeDecl], prefix: &str, declared: &mut BTreeMap<String, String>) {
            for decl in decls {
                let fqn = if prefix.is_empty() {
                    decl.name().to_string()
                } else {
                    format!("{}.{}", prefix, decl.name())
                };
                declared.entry(decl.name().to_string()).or_insert_with(|| fqn.clone());
                for member in decl.members() {
                    if let ClassMember::TypeDecl(nested) = member {
                        collect(std::slice::from_ref(nested), &fqn, declared);
                    }
                }
            }
        }
        collect(&ast.type_decls, ast.package_name(), &mut declared);

        Self {
            package: ast.package_name().to_string(),
            single_imports,
            wildcard_packages,
            declared,
            enclosing: Vec::new(),
            stats: AttrStats::default(),
        }
    }

    /// Resolve a simple type name used as a call receiver
    fn resolve_simple(&self, name: &str) -> Option<String> {
        if !name.starts_with(|c: char| c.is_uppercase()) {
            return None;
        }
        if let Some(fqn) = self.single_imports.get(name) {
            return Some(fqn.clone());
        }
        if let Some(fqn) = self.declared.get(name) {
            return Some(fqn.clone());
        }
        let lang = format!("java.lang.{}", name);
        if KNOWN_TYPES.contains_key(lang.as_str()) {
            return Some(lang);
        }
        self.wildcard_packages
            .iter()
            .map(|package| format!("{}.{}", package, name))
            .find(|fqn| KNOWN_TYPES.contains_key(fqn.as_str()))
    }

    fn resolve_receiver(&self, target: &mut Expr) -> Option<String> {
        match target {
            Expr::Identifier(ident) => {
                if let Some(JavaType::Class(ref class)) = ident.ty {
                    return Some(class.fqn.clone());
                }
                let fqn = self.resolve_simple(&ident.name)?;
                ident.ty = Some(class_type_of(&fqn));
                Some(fqn)
            }
            Expr::FieldAccess(_) => {
                let name = target.qualified_name()?;
                let first_is_package = name.starts_with(|c: char| c.is_lowercase());
                let last_is_type = simple_name(&name).starts_with(|c: char| c.is_uppercase());
                (first_is_package && last_is_type).then_some(name)
            }
            _ => None,
        }
    }
}

impl AstVisitorMut for Resolver {
    fn visit_type_decl(&mut self, decl: &mut TypeDecl, site: TypeSite) {
        let fqn = match (site, self.enclosing.last()) {
            (TypeSite::TopLevel, _) => Some(if self.package.is_empty() {
                decl.name().to_string()
            } else {
                format!("{}.{}", self.package, decl.name())
            }),
            (TypeSite::Member, Some(Some(outer))) => Some(format!("{}.{}", outer, decl.name())),
            _ => None,
        };
        self.enclosing.push(fqn);
        walk_type_decl_mut(self, decl);
        self.enclosing.pop();
    }

    fn visit_anonymous_class(&mut self, class: &mut ClassDecl) {
        self.enclosing.push(None);
        walk_members_mut(self, &mut class.body);
        self.enclosing.pop();
    }

    fn visit_method_call(&mut self, call: &mut MethodCallExpr) {
        walk_method_call_mut(self, call);
        if call.method_type.is_some() {
            return;
        }

        let owner = match call.target {
            Some(ref mut target) => self.resolve_receiver(target),
            None => self.enclosing.last().cloned().flatten(),
        };
        match owner {
            Some(fqn) => {
                log::trace!("attr: {}.{} -> {}", fqn, call.name, call.id);
                call.method_type = Some(MethodType::new(class_type_of(&fqn), call.name.clone()));
                self.stats.calls_resolved += 1;
            }
            None => self.stats.calls_unresolved += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;

    fn unit_with_call(imports: Vec<ImportDecl>, receiver: Expr) -> Ast {
        let mut ids = IdAllocator::new();
        let stmt = expr_stmt(call(&mut ids, Some(receiver), "of", vec![string_lit("a")]));
        let test = class(
            &mut ids,
            vec![],
            "Test",
            vec![ClassMember::Method(method(vec![], None, "run", vec![], vec![stmt]))],
        );
        let mut ast = Ast::new(Some("com.acme"), ids);
        ast.imports = imports;
        ast.type_decls.push(test);
        ast
    }

    fn first_call(ast: &Ast) -> &MethodCallExpr {
        let ClassMember::Method(ref m) = ast.type_decls[0].members()[0] else {
            panic!("expected method");
        };
        let Stmt::Expression(ref stmt) = m.body.as_ref().unwrap().statements[0] else {
            panic!("expected expression statement");
        };
        let Expr::MethodCall(ref call) = stmt.expr else {
            panic!("expected call");
        };
        call
    }

    #[test]
    fn test_resolves_single_import_with_type_variables() {
        let mut ast = unit_with_call(vec![ImportDecl::single("java.util.List")], ident("List"));
        Attr::new().process(&mut ast).unwrap();
        let method_type = first_call(&ast).method_type.clone().unwrap();
        assert_eq!(method_type.declaring_type.to_string(), "java.util.List<E>");
        assert_eq!(method_type.name, "of");
    }

    #[test]
    fn test_resolves_wildcard_and_qualified_receivers() {
        let mut ast = unit_with_call(vec![ImportDecl::wildcard("java.util")], ident("Map"));
        Attr::new().process(&mut ast).unwrap();
        assert_eq!(
            first_call(&ast).method_type.as_ref().and_then(|t| t.declaring_type.fqn()),
            Some("java.util.Map")
        );

        let mut ast = unit_with_call(vec![], qualified("java.util.Set"));
        Attr::new().process(&mut ast).unwrap();
        assert_eq!(
            first_call(&ast).method_type.as_ref().and_then(|t| t.declaring_type.fqn()),
            Some("java.util.Set")
        );
    }

    #[test]
    fn test_leaves_unknown_receivers_unresolved() {
        let mut ast = unit_with_call(vec![], ident("List"));
        let mut attr = Attr::new();
        attr.process(&mut ast).unwrap();
        assert!(first_call(&ast).method_type.is_none());
        assert_eq!(attr.stats.calls_unresolved, 1);

        let mut ast = unit_with_call(vec![ImportDecl::single("java.util.List")], ident("list"));
        Attr::new().process(&mut ast).unwrap();
        assert!(first_call(&ast).method_type.is_none());
    }
}
