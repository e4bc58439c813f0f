//! Left-recursion elimination.
//!
//! Direct left recursion `A → A α | β` is turned into right recursion. Indirect
//! left recursion is only handled for cycles that pass through an alternative
//! consisting of a single recursive symbol: such a cycle is turned into direct
//! left recursion, which the direct pass can then remove.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

mod direct;
mod helpers;
mod indirect;

pub use crate::indirect::IndirectResolution;

use cfg_rewrite_grammar::{Grammar, RewriteError};

/// Left-recursion rewrites on a grammar.
pub trait GrammarRecursionExt {
    /// Rewrites every directly left-recursive production into right recursion.
    fn remove_direct_left_recursion(&self) -> Grammar;

    /// Turns indirect left recursion into direct left recursion, where the
    /// cycle allows it. Cycles that remain are reported in the result.
    fn remove_indirect_left_recursion(&self) -> Result<IndirectResolution, RewriteError>;
}

impl GrammarRecursionExt for Grammar {
    fn remove_direct_left_recursion(&self) -> Grammar {
        direct::remove_direct_left_recursion(self)
    }

    fn remove_indirect_left_recursion(&self) -> Result<IndirectResolution, RewriteError> {
        indirect::remove_indirect_left_recursion(self)
    }
}
