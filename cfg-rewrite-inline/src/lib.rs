//! Rewrites that collapse productions into the places that use them.
//!
//! Every pass runs to a fixed point, bounded by [`MAX_ROUNDS`]. A pass that
//! runs out of rounds returns [`RewriteError::DidNotConverge`] holding the last
//! grammar it computed.
//!
//! [`MAX_ROUNDS`]: cfg_rewrite_grammar::MAX_ROUNDS

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

mod alias;
mod nullable;
mod single_rule;
mod singleton;

use cfg_rewrite_grammar::{Grammar, RewriteError};

/// Inlining rewrites on a grammar.
pub trait GrammarInlineExt {
    /// Contracts alias productions `A → B` by substituting `B` for `A`
    /// everywhere. The start symbol is never contracted.
    fn remove_redundant_rules(&self) -> Result<Grammar, RewriteError>;

    /// Splices productions with a single, non-recursive rule into every rule
    /// that refers to them, then drops productions nothing refers to.
    fn inline_single_rule_productions(&self) -> Result<Grammar, RewriteError>;

    /// Substitutes productions referenced exactly once into their only use
    /// site.
    fn inline_singleton_productions(&self) -> Result<Grammar, RewriteError>;

    /// Expands every optional occurrence of a nullable symbol into its present
    /// and absent forms, so that only the start symbol keeps an epsilon
    /// alternative.
    fn remove_opt_rules(&self) -> Result<Grammar, RewriteError>;
}

impl GrammarInlineExt for Grammar {
    fn remove_redundant_rules(&self) -> Result<Grammar, RewriteError> {
        alias::remove_redundant_rules(self)
    }

    fn inline_single_rule_productions(&self) -> Result<Grammar, RewriteError> {
        single_rule::inline_single_rule_productions(self)
    }

    fn inline_singleton_productions(&self) -> Result<Grammar, RewriteError> {
        singleton::inline_singleton_productions(self)
    }

    fn remove_opt_rules(&self) -> Result<Grammar, RewriteError> {
        nullable::remove_opt_rules(self)
    }
}
