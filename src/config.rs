//! Owner-change configuration
//!
//! The owner-change chain is driven by three strings supplied by the host:
//! the fully-qualified origin owner, the method name, and the fully-qualified
//! target owner. They are used verbatim to build the method matcher and the
//! change-record key.

use crate::error::{Error, Result};

/// Environment variable holding the origin owner type
pub const ENV_ORIGIN: &str = "BACKPORT_ORIGIN";
/// Environment variable holding the factory method name
pub const ENV_METHOD: &str = "BACKPORT_METHOD";
/// Environment variable holding the target owner type
pub const ENV_TARGET: &str = "BACKPORT_TARGET";

/// Prefix of the execution-context key under which rewritten call ids are recorded
pub const CHANGE_KEY_PREFIX: &str = "Method change to ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fully-qualified type the factory method is currently declared on, e.g. `java.util.List`
    pub origin: String,
    /// Simple method name, e.g. `of`
    pub method: String,
    /// Fully-qualified type the calls are moved to, e.g. `org.acme.List`
    pub target: String,
}

impl Config {
    pub fn new(origin: impl Into<String>, method: impl Into<String>, target: impl Into<String>) -> Result<Self> {
        let config = Self {
            origin: origin.into(),
            method: method.into(),
            target: target.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration through `lookup`, one call per variable name.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut require = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::config_error(format!("missing {}", name)))
        };
        let origin = require(ENV_ORIGIN)?;
        let method = require(ENV_METHOD)?;
        let target = require(ENV_TARGET)?;
        Self::new(origin, method, target)
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn validate(&self) -> Result<()> {
        if !is_qualified_name(&self.origin) {
            return Err(Error::config_error(format!(
                "origin '{}' is not a fully-qualified type name",
                self.origin
            )));
        }
        if !is_qualified_name(&self.target) {
            return Err(Error::config_error(format!(
                "target '{}' is not a fully-qualified type name",
                self.target
            )));
        }
        if !is_java_identifier(&self.method) {
            return Err(Error::config_error(format!("method '{}' is not an identifier", self.method)));
        }
        if self.origin == self.target {
            return Err(Error::config_error(format!(
                "origin and target are both '{}'",
                self.origin
            )));
        }
        Ok(())
    }

    /// Key under which the owner-change pass records the calls it rewrote.
    pub fn change_key(&self) -> String {
        format!("{}{}", CHANGE_KEY_PREFIX, self.target)
    }

    /// Matcher pattern for the origin method, `"<origin> <method>(..)"`.
    pub fn method_pattern(&self) -> String {
        format!("{} {}(..)", self.origin, self.method)
    }
}

/// `a.b.C` style name with at least one package segment.
pub(crate) fn is_qualified_name(name: &str) -> bool {
    let mut segments = 0;
    for segment in name.split('.') {
        if !is_java_identifier(segment) {
            return false;
        }
        segments += 1;
    }
    segments >= 2
}

pub(crate) fn is_java_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
