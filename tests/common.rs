// Common test utilities
#![allow(dead_code)]

use tolc_backport::ast::build::*;
use tolc_backport::ast::*;
use tolc_backport::attr::Attr;

pub fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Build a unit and resolve its calls with the attribution shim.
///
/// Imports ending in `.*` become on-demand imports.
pub fn unit<F>(package: Option<&str>, imports: &[&str], types: F) -> Ast
where
    F: FnOnce(&mut IdAllocator) -> Vec<TypeDecl>,
{
    let mut ids = IdAllocator::new();
    let type_decls = types(&mut ids);
    let mut ast = Ast::new(package, ids);
    ast.imports = imports
        .iter()
        .map(|name| match name.strip_suffix(".*") {
            Some(package) => ImportDecl::wildcard(package),
            None => ImportDecl::single(*name),
        })
        .collect();
    ast.type_decls = type_decls;
    Attr::new().process(&mut ast).expect("attribution");
    ast
}

/// `receiver.name(args)`; a dotted receiver is spelled as a qualified chain
pub fn call_on(ids: &mut IdAllocator, receiver: &str, name: &str, args: Vec<Expr>) -> Expr {
    let target = if receiver.contains('.') { qualified(receiver) } else { ident(receiver) };
    call(ids, Some(target), name, args)
}

pub fn strings(values: &[&str]) -> Vec<Expr> {
    values.iter().map(|v| string_lit(*v)).collect()
}

pub fn public_method(name: &str, body: Vec<Stmt>) -> ClassMember {
    ClassMember::Method(method(vec![Modifier::Public], None, name, vec![], body))
}

/// `Type name = init;`
pub fn declare(type_ref: TypeRef, name: &str, init: Expr) -> Stmt {
    local_var(type_ref, name, Some(init))
}

/// Parameter counts of the members of `decl` named `name`, in member order
pub fn helper_arities(decl: &TypeDecl, name: &str) -> Vec<usize> {
    decl.methods_named(name).map(|m| m.parameters.len()).collect()
}

/// Nested member type of `decl` called `name`
pub fn member_type<'a>(decl: &'a TypeDecl, name: &str) -> &'a TypeDecl {
    decl.members()
        .iter()
        .find_map(|member| match member {
            ClassMember::TypeDecl(nested) if nested.name() == name => Some(nested),
            _ => None,
        })
        .expect("member type")
}

pub fn import_names(ast: &Ast) -> Vec<String> {
    ast.imports.iter().map(|import| import.to_string()).collect()
}
