//! Sets of nonterminals in the form of a bit vector.

use std::iter;

use bit_vec::BitVec;

use crate::local_prelude::*;

/// A set of a grammar's nonterminals, indexed by production order.
///
/// Symbols without a production are never members.
#[derive(Clone, Debug)]
pub struct SymbolBitSet<'g> {
    grammar: &'g Grammar,
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a, 'g> {
    grammar: &'g Grammar,
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl<'g> SymbolBitSet<'g> {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new(grammar: &'g Grammar) -> Self {
        Self::from_elem(grammar, false)
    }

    /// Constructs a `SymbolBitSet` with every nonterminal set to `elem`.
    pub fn from_elem(grammar: &'g Grammar, elem: bool) -> Self {
        SymbolBitSet {
            grammar,
            bit_vec: BitVec::from_elem(grammar.num_productions(), elem),
        }
    }

    /// Marks every nonterminal with an alternative that is exactly `[__empty]`,
    /// including `__empty` itself.
    pub fn epsilon(&mut self) {
        for (idx, rules) in self.grammar.productions().values().enumerate() {
            if rules.iter().any(Rule::is_epsilon) {
                self.bit_vec.set(idx, true);
            }
        }
    }

    /// Sets membership of a symbol. Returns false if the symbol has no
    /// production.
    pub fn set(&mut self, sym: &Symbol, elem: bool) -> bool {
        match self.grammar.index_of(sym) {
            Some(idx) => {
                self.bit_vec.set(idx, elem);
                true
            }
            None => false,
        }
    }

    /// Sets membership by production position.
    pub fn set_index(&mut self, idx: usize, elem: bool) {
        self.bit_vec.set(idx, elem);
    }

    /// Checks membership of a symbol.
    pub fn contains(&self, sym: &Symbol) -> bool {
        self.grammar
            .index_of(sym)
            .map_or(false, |idx| self.bit_vec[idx])
    }

    /// Checks membership by production position.
    pub fn contains_index(&self, idx: usize) -> bool {
        self.bit_vec.get(idx).unwrap_or(false)
    }

    /// Removes all members of `other`.
    pub fn subtract(&mut self, other: &SymbolBitSet) {
        self.bit_vec.difference(&other.bit_vec);
    }

    /// Returns the number of members.
    pub fn count(&self) -> usize {
        self.bit_vec.iter().filter(|&present| present).count()
    }

    /// Checks whether there are no members.
    pub fn is_clear(&self) -> bool {
        self.bit_vec.none()
    }

    /// The grammar this set refers to.
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Iterates over the members, in production order.
    pub fn iter(&self) -> Iter<'_, 'g> {
        Iter {
            grammar: self.grammar,
            iter: self.bit_vec.iter().enumerate(),
        }
    }
}

impl<'a, 'g> Iterator for Iter<'a, 'g> {
    type Item = &'g Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, is_present) in &mut self.iter {
            if is_present {
                return self.grammar.symbol_at(idx);
            }
        }
        None
    }
}
