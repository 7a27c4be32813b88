//! Per-type bookkeeping for the helper rewrite: which arities each host type
//! needs, and which enclosing type may host a helper.

use crate::ast::{ClassDecl, Modifier, NodeId, TypeDecl, TypeSite};
use std::collections::{BTreeMap, BTreeSet};

/// Arities of rewritten calls, keyed by the id of the type that will host the helper.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArityUsageIndex {
    arities: BTreeMap<NodeId, BTreeSet<usize>>,
}

impl ArityUsageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, type_id: NodeId, arity: usize) {
        self.arities.entry(type_id).or_default().insert(arity);
    }

    pub fn arities(&self, type_id: NodeId) -> Option<&BTreeSet<usize>> {
        self.arities.get(&type_id)
    }

    /// Drain the arities recorded for `type_id`, in ascending order
    pub fn take(&mut self, type_id: NodeId) -> BTreeSet<usize> {
        self.arities.remove(&type_id).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.arities.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Class,
    Interface,
    Enum,
    Anonymous,
}

/// One enclosing type on the traversal stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScope {
    pub id: NodeId,
    pub kind: ScopeKind,
    /// `None` for anonymous and local types and anything nested in them
    pub fqn: Option<String>,
    /// Whether a `private static` helper declared here is legal Java 8
    pub can_host: bool,
}

/// Stack of enclosing types, innermost last.
#[derive(Debug, Clone)]
pub struct TypeScopes {
    package: String,
    frames: Vec<TypeScope>,
}

impl TypeScopes {
    pub fn new(package: impl Into<String>) -> Self {
        Self { package: package.into(), frames: Vec::new() }
    }

    pub fn enter(&mut self, decl: &TypeDecl, site: TypeSite) {
        let kind = match decl {
            TypeDecl::Class(_) => ScopeKind::Class,
            TypeDecl::Interface(_) => ScopeKind::Interface,
            TypeDecl::Enum(_) => ScopeKind::Enum,
        };
        let parent = self.frames.last();
        let fqn = match site {
            TypeSite::TopLevel if self.package.is_empty() => Some(decl.name().to_string()),
            TypeSite::TopLevel => Some(format!("{}.{}", self.package, decl.name())),
            TypeSite::Member => parent
                .and_then(|p| p.fqn.as_ref())
                .map(|outer| format!("{}.{}", outer, decl.name())),
            TypeSite::Local => None,
        };

        // Nested classes of interfaces are implicitly static.
        let in_interface = parent.map_or(false, |p| p.kind == ScopeKind::Interface);
        let is_static = decl.modifiers().contains(&Modifier::Static);
        let can_host = fqn.is_some()
            && match (kind, site) {
                (ScopeKind::Interface, _) => false,
                (ScopeKind::Enum, _) => true,
                (_, TypeSite::TopLevel) => true,
                (_, TypeSite::Member) => is_static || in_interface,
                _ => false,
            };

        self.frames.push(TypeScope { id: decl.id(), kind, fqn, can_host });
    }

    pub fn enter_anonymous(&mut self, class: &ClassDecl) {
        self.frames.push(TypeScope {
            id: class.id,
            kind: ScopeKind::Anonymous,
            fqn: None,
            can_host: false,
        });
    }

    pub fn exit(&mut self) -> Option<TypeScope> {
        self.frames.pop()
    }

    pub fn current(&self) -> Option<&TypeScope> {
        self.frames.last()
    }

    /// Innermost enclosing type that may declare a helper
    pub fn host(&self) -> Option<&TypeScope> {
        self.frames.iter().rev().find(|frame| frame.can_host)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
