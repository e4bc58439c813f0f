//! Errors raised while building or rewriting grammars.

use thiserror::Error;

use crate::local_prelude::*;

/// A grammar that does not satisfy the structural invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// There is no production other than `__empty` to serve as the start symbol.
    #[error("grammar has no start symbol")]
    NoStartSymbol,
    /// A production with zero alternatives.
    #[error("production `{lhs}` has no rules")]
    EmptyProduction {
        /// The offending production.
        lhs: Symbol,
    },
    /// The `__empty` production is not exactly `__empty : __empty ;`.
    #[error("production `__empty` must have the single rule `__empty`, found: {rules}")]
    MalformedEpsilon {
        /// The rules found for `__empty`, formatted.
        rules: String,
    },
}

/// A rewrite that had to be abandoned.
#[derive(Error, Debug, Clone)]
pub enum RewriteError {
    /// The recursive alternatives of an indirectly left-recursive production lead
    /// with more than one distinct nonterminal.
    #[error(
        "cannot handle multiple indirect recursion from a single production: \
         `{production}` leads with {}",
        join(.symbols)
    )]
    MultipleRecursiveSymbols {
        /// The production that could not be resolved.
        production: Symbol,
        /// The distinct recursive leading symbols, in rule order.
        symbols: Vec<Symbol>,
    },
    /// A fixed-point loop hit its round limit.
    #[error("{pass} did not converge within {rounds} rounds")]
    DidNotConverge {
        /// The pass that was running.
        pass: &'static str,
        /// The number of rounds executed.
        rounds: usize,
        /// The last computed grammar.
        last: Box<Grammar>,
    },
}

impl RewriteError {
    /// Reports a pass that ran out of rounds.
    pub fn did_not_converge(pass: &'static str, rounds: usize, last: Grammar) -> Self {
        log::warn!("{} did not converge within {} rounds", pass, rounds);
        RewriteError::DidNotConverge {
            pass,
            rounds,
            last: Box::new(last),
        }
    }

    /// For non-convergence, returns the last computed grammar.
    pub fn into_last_snapshot(self) -> Option<Grammar> {
        match self {
            RewriteError::DidNotConverge { last, .. } => Some(*last),
            RewriteError::MultipleRecursiveSymbols { .. } => None,
        }
    }
}

fn join(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(|sym| format!("`{}`", sym))
        .collect::<Vec<_>>()
        .join(", ")
}
