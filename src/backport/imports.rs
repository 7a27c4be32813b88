//! Import bookkeeping requested by the passes.
//!
//! Passes only queue requests while they walk the tree; the edits are applied
//! once the walk is over, removals first.

use crate::ast::*;
use std::collections::BTreeSet;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportEdits {
    add: BTreeSet<String>,
    remove: BTreeSet<String>,
}

/// Imports actually added and removed by [`ImportEdits::apply`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportChanges {
    pub added: usize,
    pub removed: usize,
}

impl ImportEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_if_absent(&mut self, fqn: impl Into<String>) {
        self.add.insert(fqn.into());
    }

    pub fn remove_if_unused(&mut self, fqn: impl Into<String>) {
        self.remove.insert(fqn.into());
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    pub fn apply(self, ast: &mut Ast) -> ImportChanges {
        let mut changes = ImportChanges::default();

        for fqn in &self.remove {
            if references_type(ast, fqn) {
                log::trace!("import {} still referenced, kept", fqn);
                continue;
            }
            let before = ast.imports.len();
            ast.imports.retain(|import| import.is_static || import.is_wildcard || import.name != *fqn);
            changes.removed += before - ast.imports.len();
        }

        for fqn in &self.add {
            if !needs_import(ast, fqn) {
                continue;
            }
            let simple = simple_name(fqn);
            if ast.imports.iter().any(|import| import.imported_simple_name() == Some(simple)) {
                log::warn!("not importing {}: another import already binds '{}'", fqn, simple);
                continue;
            }
            let index = ast
                .imports
                .iter()
                .position(|import| !import.is_static && import.name.as_str() > fqn.as_str())
                .unwrap_or(ast.imports.len());
            ast.imports.insert(index, ImportDecl::single(fqn.as_str()));
            changes.added += 1;
        }

        changes
    }
}

/// Whether `fqn` must be imported to be usable by its simple name
fn needs_import(ast: &Ast, fqn: &str) -> bool {
    let package = package_name(fqn);
    !(package.is_empty() || package == "java.lang" || package == ast.package_name() || ast.imports_type(fqn))
}

/// Whether anything in the unit refers to `fqn` through its simple name.
///
/// Fully-qualified spellings do not count; they need no import.
pub fn references_type(ast: &Ast, fqn: &str) -> bool {
    let mut scanner = ReferenceScanner {
        fqn,
        simple: simple_name(fqn),
        found: false,
    };
    scanner.visit_ast(ast);
    scanner.found
}

struct ReferenceScanner<'a> {
    fqn: &'a str,
    simple: &'a str,
    found: bool,
}

impl ReferenceScanner<'_> {
    fn type_ref_mentions(&self, type_ref: &TypeRef) -> bool {
        let name = type_ref.name.as_str();
        let direct = name == self.simple
            || name.strip_prefix(self.simple).map_or(false, |rest| rest.starts_with('.'));
        direct || type_ref.type_args.iter().any(|arg| self.type_ref_mentions(arg))
    }
}

impl AstVisitor for ReferenceScanner<'_> {
    fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        if self.type_ref_mentions(type_ref) {
            self.found = true;
        }
    }

    fn visit_identifier(&mut self, ident: &IdentifierExpr) {
        let mentions = match ident.ty {
            Some(JavaType::Class(ref class)) => class.fqn == self.fqn,
            _ => ident.name == self.simple,
        };
        if mentions {
            self.found = true;
        }
    }
}
