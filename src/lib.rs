//! Collection factory backports for Java ASTs
//!
//! Rewrites Java 9+ collection factory calls into Java 8 compatible code:
//!
//! ```text
//! List<String> xs = List.of("a", "b");
//!     ↓ PassChain::list_of()
//! List<String> xs = listOf("a", "b");
//! ...
//! private static <E> List<E> listOf(E e1, E e2) { ... }
//! ```
//!
//! and moves factory calls to another owner type (`PassChain::change_method_owner`).
//!
//! ## Architecture
//!
//! - **ast**: Java syntax tree, builders and printer
//! - **attr**: fills in resolved method types from imports for hosts without a resolver
//! - **backport**: the rewrite passes and the chain that composes them
//! - **config**: owner-change configuration (`BACKPORT_*` environment variables)
//!
//! ## Flow
//!
//! ```text
//! host AST → Attr → PassChain [pass 1 → pass 2 → ...] → AST → AstPrinter
//!                       └──── ExecutionContext ────┘
//! ```

pub mod ast;
pub mod attr;
pub mod backport;
pub mod config;
pub mod error;

pub use backport::{ChainReport, ExecutionContext, HelperFamily, Pass, PassChain, PassStats};
pub use config::Config;
pub use error::{Error, Result};
