//! Method signature matcher.

use crate::ast::{JavaType, MethodCallExpr};
use crate::config::is_java_identifier;
use crate::error::{Error, Result};
use std::fmt;

/// Matches calls by resolved owner type and method name, any arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMatcher {
    owner: String,
    name: String,
}

impl MethodMatcher {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self { owner: owner.into(), name: name.into() }
    }

    /// Parse `"java.util.List of(..)"`. The argument list must be the `(..)` wildcard.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = || Error::pattern_error(pattern);
        let (owner, signature) = pattern.trim().split_once(' ').ok_or_else(invalid)?;
        let name = signature.trim().strip_suffix("(..)").ok_or_else(invalid)?;

        if !owner.split('.').all(is_java_identifier) || !is_java_identifier(name) {
            return Err(invalid());
        }
        Ok(Self::new(owner, name))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unresolved calls never match.
    pub fn matches(&self, call: &MethodCallExpr) -> bool {
        match call.method_type {
            Some(ref method_type) => {
                method_type.name == self.name
                    && matches!(method_type.declaring_type, JavaType::Class(ref class) if class.fqn == self.owner)
            }
            None => false,
        }
    }
}

impl fmt::Display for MethodMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(..)", self.owner, self.name)
    }
}
