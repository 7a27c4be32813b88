//! Helper families and helper synthesis.
//!
//! A family ties a factory method (`java.util.List.of`) to the Java 8 helper
//! that replaces it (`listOf`) and to the library types the helper body uses.

use super::matcher::MethodMatcher;
use crate::ast::build::*;
use crate::ast::*;
use once_cell::sync::Lazy;

static LIST_OF: Lazy<MethodMatcher> = Lazy::new(|| MethodMatcher::new("java.util.List", "of"));
static SET_OF: Lazy<MethodMatcher> = Lazy::new(|| MethodMatcher::new("java.util.Set", "of"));
static MAP_OF: Lazy<MethodMatcher> = Lazy::new(|| MethodMatcher::new("java.util.Map", "of"));

pub const COLLECTIONS: &str = "java.util.Collections";
const COLLECTIONS_NAME: &str = "Collections";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelperFamily {
    List,
    Set,
    Map,
}

impl HelperFamily {
    pub fn helper_name(self) -> &'static str {
        match self {
            HelperFamily::List => "listOf",
            HelperFamily::Set => "setOf",
            HelperFamily::Map => "mapOf",
        }
    }

    /// Matcher for the factory call this family replaces
    pub fn matcher(self) -> &'static MethodMatcher {
        match self {
            HelperFamily::List => &*LIST_OF,
            HelperFamily::Set => &*SET_OF,
            HelperFamily::Map => &*MAP_OF,
        }
    }

    /// Interface type the helper returns
    pub fn interface(self) -> &'static str {
        match self {
            HelperFamily::List => "java.util.List",
            HelperFamily::Set => "java.util.Set",
            HelperFamily::Map => "java.util.Map",
        }
    }

    /// Mutable container the helper fills
    pub fn container(self) -> &'static str {
        match self {
            HelperFamily::List => "java.util.ArrayList",
            HelperFamily::Set => "java.util.LinkedHashSet",
            HelperFamily::Map => "java.util.HashMap",
        }
    }

    /// Imports the synthesized helper body needs
    pub fn imports(self) -> [&'static str; 3] {
        [self.interface(), self.container(), COLLECTIONS]
    }

    pub fn is_key_value(self) -> bool {
        self == HelperFamily::Map
    }

    /// Whether a call with `arity` arguments can be served by this family's helper
    pub fn accepts_arity(self, arity: usize) -> bool {
        !self.is_key_value() || arity % 2 == 0
    }

    fn type_vars(self) -> &'static [&'static str] {
        match self {
            HelperFamily::Map => &["K", "V"],
            _ => &["E"],
        }
    }

    fn local_name(self) -> &'static str {
        match self {
            HelperFamily::List => "list",
            HelperFamily::Set => "set",
            HelperFamily::Map => "map",
        }
    }

    fn unmodifiable_view(self) -> &'static str {
        match self {
            HelperFamily::List => "unmodifiableList",
            HelperFamily::Set => "unmodifiableSet",
            HelperFamily::Map => "unmodifiableMap",
        }
    }

    /// Existing direct member of `decl` that already serves calls of `arity`.
    ///
    /// A varargs method whose fixed parameters fit in `arity` counts as well.
    pub fn find_compatible(self, decl: &TypeDecl, arity: usize) -> Option<&MethodDecl> {
        decl.methods_named(self.helper_name()).find(|method| {
            let params = method.parameters.len();
            params == arity || (method.is_varargs() && params - 1 <= arity)
        })
    }

    /// Build the helper for `arity`, e.g. for the list family and arity 2:
    ///
    /// ```text
    /// private static <E> List<E> listOf(E e1, E e2) {
    ///     List<E> list = new ArrayList<E>();
    ///     list.add(e1);
    ///     list.add(e2);
    ///     return Collections.unmodifiableList(list);
    /// }
    /// ```
    ///
    /// Returns `None` when the family cannot take `arity` arguments.
    pub fn synthesize(self, ids: &mut IdAllocator, arity: usize) -> Option<MethodDecl> {
        self.synthesize_spelling_out(ids, arity, &[])
    }

    /// Types among [`imports`](Self::imports) whose simple name `unit` already
    /// binds to a different type, through a single import or a declaration.
    pub fn shadowed_types(self, unit: &Ast) -> Vec<&'static str> {
        self.imports()
            .into_iter()
            .filter(|fqn| {
                let simple = simple_name(fqn);
                unit.declares_type(simple)
                    || unit
                        .imports
                        .iter()
                        .any(|import| import.imported_simple_name() == Some(simple) && import.name != *fqn)
            })
            .collect()
    }

    /// Same as [`synthesize`](Self::synthesize), but the types in `spelled_out`
    /// are written with their fully-qualified name.
    pub fn synthesize_spelling_out(
        self,
        ids: &mut IdAllocator,
        arity: usize,
        spelled_out: &[&str],
    ) -> Option<MethodDecl> {
        if !self.accepts_arity(arity) {
            return None;
        }

        let spell = |fqn: &'static str| if spelled_out.contains(&fqn) { fqn } else { simple_name(fqn) };
        let vars = self.type_vars();
        let interface = generic_type(spell(self.interface()), vars);
        let container = generic_type(spell(self.container()), vars);
        let local = self.local_name();

        let mut parameters = Vec::with_capacity(arity);
        let mut body = vec![local_var(interface.clone(), local, Some(new_object(container, vec![])))];
        match self {
            HelperFamily::Map => {
                for pair in 1..=arity / 2 {
                    let key = format!("k{}", pair);
                    let value = format!("v{}", pair);
                    parameters.push(param(type_ref("K"), key.as_str()));
                    parameters.push(param(type_ref("V"), value.as_str()));
                    body.push(expr_stmt(call(ids, Some(ident(local)), "put", vec![ident(key), ident(value)])));
                }
            }
            HelperFamily::List | HelperFamily::Set => {
                for n in 1..=arity {
                    let element = format!("e{}", n);
                    parameters.push(param(type_ref("E"), element.as_str()));
                    body.push(expr_stmt(call(ids, Some(ident(local)), "add", vec![ident(element)])));
                }
            }
        }
        let collections = if spelled_out.contains(&COLLECTIONS) {
            qualified(COLLECTIONS)
        } else {
            ident(COLLECTIONS_NAME)
        };
        body.push(return_stmt(Some(call(ids, Some(collections), self.unmodifiable_view(), vec![ident(local)]))));

        let mut helper = method(
            vec![Modifier::Private, Modifier::Static],
            Some(interface),
            self.helper_name(),
            parameters,
            body,
        );
        helper.type_params = vars.iter().map(|v| type_param(*v)).collect();
        Some(helper)
    }
}
