//! Abstract Syntax Tree (AST) representation for Java compilation units
//!
//! This module defines the AST nodes the backport passes read and rewrite.
//! Parsing is a host concern: trees are produced by a host parser or built
//! directly with the helpers in [`build`].

mod ids;
mod nodes;
mod types;
mod visitor;
mod printer;
pub mod build;

pub use ids::*;
pub use nodes::*;
pub use types::*;
pub use visitor::*;
pub use printer::*;

use std::fmt;

/// Source location information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Location {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

/// Span of source code (start and end locations)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    pub fn from_to(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start: Location::new(start_line, start_col, 0),
            end: Location::new(end_line, end_col, 0),
        }
    }
}

/// Compilation unit root node
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub package_decl: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub type_decls: Vec<TypeDecl>,
    /// Allocator for ids of nodes created inside this unit
    pub ids: IdAllocator,
    pub span: Span,
}

impl Ast {
    pub fn new(package: Option<&str>, ids: IdAllocator) -> Self {
        Self {
            package_decl: package.map(|name| PackageDecl { name: name.to_string(), span: Span::default() }),
            imports: Vec::new(),
            type_decls: Vec::new(),
            ids,
            span: Span::default(),
        }
    }

    /// Package name, empty for the default package
    pub fn package_name(&self) -> &str {
        self.package_decl.as_ref().map_or("", |p| p.name.as_str())
    }

    /// Fully-qualified name of a type declared in this unit, given its nesting path
    pub fn qualify(&self, nested_path: &[&str]) -> String {
        let mut fqn = self.package_name().to_string();
        for name in nested_path {
            if !fqn.is_empty() {
                fqn.push('.');
            }
            fqn.push_str(name);
        }
        fqn
    }

    /// Whether any import makes `fqn` visible by its simple name
    pub fn imports_type(&self, fqn: &str) -> bool {
        self.imports.iter().any(|import| import.is_from_type(fqn))
    }

    /// Whether a type with simple name `name` is declared anywhere in this unit
    pub fn declares_type(&self, name: &str) -> bool {
        fn search(decls: &[TypeDecl], name: &str) -> bool {
            decls.iter().any(|decl| {
                decl.name() == name
                    || decl.members().iter().any(|member| match member {
                        ClassMember::TypeDecl(nested) => search(std::slice::from_ref(nested), name),
                        _ => false,
                    })
            })
        }
        search(&self.type_decls, name)
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AstPrinter::new().print(self))
    }
}
