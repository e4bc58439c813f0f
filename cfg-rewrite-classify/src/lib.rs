//! Classification of left recursion in grammars.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

mod leading;
mod left_recursion;

pub use crate::leading::LeadingGraph;
pub use crate::left_recursion::LeftRecursion;

use cfg_rewrite_grammar::{Grammar, Productions, RewriteError};

/// Left-recursion queries on a grammar.
pub trait GrammarClassifyExt {
    /// Returns the graph of leading nonterminals.
    fn leading_graph(&self) -> LeadingGraph<'_>;

    /// Returns the productions that lead with their own name in some
    /// alternative, in grammar order.
    fn direct_left_recursive(&self) -> Productions;

    /// Returns the productions that take part in indirect left-recursion
    /// cycles, as far as the analysis detects them.
    fn indirect_left_recursive(&self) -> Result<Productions, RewriteError>;
}

impl GrammarClassifyExt for Grammar {
    fn leading_graph(&self) -> LeadingGraph<'_> {
        LeadingGraph::new(self)
    }

    fn direct_left_recursive(&self) -> Productions {
        LeftRecursion::new(self).direct()
    }

    fn indirect_left_recursive(&self) -> Result<Productions, RewriteError> {
        LeftRecursion::new(self).indirect()
    }
}
