//! Backport passes for Java collection factory calls
//!
//! Each pass rewrites one compilation unit in place and reports what it did:
//!
//! - `CollectionOfBackport`: `List.of(a, b)` → `listOf(a, b)` plus a
//!   synthesized `private static` helper in the enclosing type
//! - `ChangeMethodOwner`: `List.of(a)` → `com.acme.List.of(a)`, recording the
//!   rewritten calls in the execution context
//! - `SimplifyQualifiedOwner`: `com.acme.List.of(a)` → `List.of(a)` with an
//!   import, for the calls recorded by `ChangeMethodOwner`
//!
//! Passes are composed by a [`PassChain`], which runs them in order over one
//! unit with one shared [`ExecutionContext`].

pub mod collection_of;
pub mod context;
pub mod helper;
pub mod imports;
pub mod matcher;
pub mod owner;
pub mod qualify;
pub mod scope;

pub use collection_of::CollectionOfBackport;
pub use context::ExecutionContext;
pub use helper::HelperFamily;
pub use matcher::MethodMatcher;
pub use owner::ChangeMethodOwner;
pub use qualify::SimplifyQualifiedOwner;

use crate::ast::Ast;
use crate::config::Config;
use crate::error::Result;
use std::fmt;
use std::ops::AddAssign;

/// A rewrite over one compilation unit
pub trait Pass: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, unit: &mut Ast, ctx: &mut ExecutionContext) -> Result<PassStats>;
}

/// Per-pass counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub calls_rewritten: usize,
    /// Matched calls left untouched (no legal host, unbuildable replacement)
    pub calls_skipped: usize,
    pub helpers_synthesized: usize,
    /// Helper requests satisfied by a member that already existed
    pub helpers_reused: usize,
    pub references_simplified: usize,
    pub imports_added: usize,
    pub imports_removed: usize,
}

impl PassStats {
    /// Whether the pass modified the unit
    pub fn changed(&self) -> bool {
        self.calls_rewritten > 0
            || self.helpers_synthesized > 0
            || self.references_simplified > 0
            || self.imports_added > 0
            || self.imports_removed > 0
    }
}

impl AddAssign for PassStats {
    fn add_assign(&mut self, other: Self) {
        self.calls_rewritten += other.calls_rewritten;
        self.calls_skipped += other.calls_skipped;
        self.helpers_synthesized += other.helpers_synthesized;
        self.helpers_reused += other.helpers_reused;
        self.references_simplified += other.references_simplified;
        self.imports_added += other.imports_added;
        self.imports_removed += other.imports_removed;
    }
}

impl fmt::Display for PassStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rewritten={} skipped={} synthesized={} reused={} simplified={} imports=+{}/-{}",
            self.calls_rewritten,
            self.calls_skipped,
            self.helpers_synthesized,
            self.helpers_reused,
            self.references_simplified,
            self.imports_added,
            self.imports_removed
        )
    }
}

/// Outcome of one chain run over one unit
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChainReport {
    pub passes: Vec<(&'static str, PassStats)>,
}

impl ChainReport {
    pub fn changed(&self) -> bool {
        self.passes.iter().any(|(_, stats)| stats.changed())
    }

    pub fn total(&self) -> PassStats {
        let mut total = PassStats::default();
        for (_, stats) in &self.passes {
            total += *stats;
        }
        total
    }

    pub fn stats_for(&self, pass: &str) -> Option<&PassStats> {
        self.passes.iter().find(|(name, _)| *name == pass).map(|(_, stats)| stats)
    }
}

/// Ordered sequence of passes sharing one execution context per unit
#[derive(Default)]
pub struct PassChain {
    passes: Vec<Box<dyn Pass>>,
}

impl PassChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// `List.of(..)` → `listOf(..)` with synthesized helpers
    pub fn list_of() -> Self {
        Self::new().with_pass(CollectionOfBackport::new(HelperFamily::List))
    }

    pub fn set_of() -> Self {
        Self::new().with_pass(CollectionOfBackport::new(HelperFamily::Set))
    }

    pub fn map_of() -> Self {
        Self::new().with_pass(CollectionOfBackport::new(HelperFamily::Map))
    }

    /// Move `origin.method(..)` calls to `target`, then drop the qualification where an import suffices
    pub fn change_method_owner(config: &Config) -> Result<Self> {
        Ok(Self::new()
            .with_pass(ChangeMethodOwner::new(config)?)
            .with_pass(SimplifyQualifiedOwner::new(config)))
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every pass over `unit`.
    ///
    /// The passes work on a copy; `unit` is replaced only when all of them
    /// succeed, so a failing chain leaves it as it was.
    pub fn run_unit(&self, unit: &mut Ast) -> Result<ChainReport> {
        let mut working = unit.clone();
        let mut ctx = ExecutionContext::new();
        let mut report = ChainReport::default();

        for pass in &self.passes {
            let stats = pass.process(&mut working, &mut ctx)?;
            log::debug!("{}: {}", pass.name(), stats);
            report.passes.push((pass.name(), stats));
        }

        *unit = working;
        Ok(report)
    }

    /// Run the chain over each unit independently; one result per unit
    pub fn run_units(&self, units: &mut [Ast]) -> Vec<Result<ChainReport>> {
        units
            .iter_mut()
            .enumerate()
            .map(|(index, unit)| {
                let result = self.run_unit(unit);
                if let Err(ref e) = result {
                    log::warn!("unit {} left unchanged: {}", index, e);
                }
                result
            })
            .collect()
    }
}

impl fmt::Debug for PassChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassChain").field("passes", &self.pass_names()).finish()
    }
}
