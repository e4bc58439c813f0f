//! An ordered model of context-free grammars, as extracted from Yacc/Bison specifications.
//! Every rewrite in this workspace takes a `Grammar` by reference and returns a new one.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

pub mod error;
pub mod grammar;
pub mod rhs_closure;
pub mod rule;
pub mod rule_builder;
pub mod symbol_bit_matrix;
pub mod symbol_bit_set;

pub use crate::error::{GrammarError, RewriteError};
pub use crate::grammar::{Grammar, Productions, SymbolKind};
pub use crate::rule::Rule;
pub use crate::rule_builder::{GrammarBuilder, ProductionBuilder};
pub use crate::symbol_bit_matrix::SymbolBitMatrix;
pub use crate::symbol_bit_set::SymbolBitSet;
pub use cfg_rewrite_symbol::{FreshNames, Symbol, SymbolName, EMPTY_NAME};

/// Upper bound on the rounds of every fixed-point loop.
pub const MAX_ROUNDS: usize = 100;

pub(crate) mod local_prelude {
    pub use crate::grammar::{Grammar, Productions};
    pub use crate::rule::Rule;
    pub use cfg_rewrite_symbol::Symbol;
}
