//! # symtree-regex
//!
//! A regular-expression engine whose source syntax is a tree of operators
//! rather than text. Callers build an [Expr] by composition ([Expr::cat],
//! [Expr::or], [Expr::star], [Expr::plus], [Expr::opt] and literals), or
//! lower one from a host's own tagged-tree encoding via [RawExpr] and
//! [TryFrom]. [compile] turns an [Expr] into a [Dfa] by Thompson
//! construction followed by subset construction; [matches] and
//! [expr_matches] then check whether a string belongs to the language it
//! describes.
//!
//! ```
//! use symtree_regex::Expr;
//!
//! // cat("0", plus("1"), "0") matches strings of a 0, one or more 1s, and a 0
//! let expr = Expr::cat([
//!     Expr::literal("0"),
//!     Expr::plus(Expr::literal("1")),
//!     Expr::literal("0"),
//! ]);
//! let dfa = symtree_regex::compile(&expr).unwrap();
//! assert!(symtree_regex::matches(&dfa, "0110"));
//! assert!(symtree_regex::matches(&dfa, "010"));
//! assert!(!symtree_regex::matches(&dfa, "00"));
//! assert!(!symtree_regex::matches(&dfa, "01"));
//! ```
//!
//! ## Modules
//! * [expr]: the [Expr]/[RawExpr] tree types and [n_or_more].
//! * [nfa]: the Thompson-constructed NFA, and its subset construction into
//!   a [Dfa].
//! * [dfa]: the DFA and its evaluator.
//!
//! Elements of the alphabet are extended unicode grapheme clusters, so a
//! literal like `"é"` matches as one symbol regardless of how many Unicode
//! scalar values it's encoded with underneath.
//!
//! ## Concurrency
//! A compiled [Dfa] is `Send + Sync` and immutable, so the same instance can
//! be shared across threads and matched against concurrently without
//! synchronization. Compiling is independent work: each [compile] call uses
//! its own private builder state, not any shared counter.

mod compile;
pub mod dfa;
pub mod expr;
pub mod nfa;


pub use compile::{compile, expr_matches, matches, CompileError};
pub use dfa::Dfa;
pub use expr::{n_or_more, Expr, OpKind, ParseError, PreconditionError, RawExpr};
