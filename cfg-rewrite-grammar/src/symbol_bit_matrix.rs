//! Relations between nonterminals in the form of a bit matrix.

use std::ops::{Deref, DerefMut};

use bit_matrix::BitMatrix;

use crate::grammar::SymbolKind;
use crate::local_prelude::*;

/// A square bit matrix over a grammar's nonterminals, indexed by production
/// order.
#[derive(Clone, Debug)]
pub struct SymbolBitMatrix<'g> {
    grammar: &'g Grammar,
    bit_matrix: BitMatrix,
}

impl<'g> SymbolBitMatrix<'g> {
    /// Creates an empty relation.
    pub fn new(grammar: &'g Grammar) -> Self {
        let num_syms = grammar.num_productions();
        SymbolBitMatrix {
            grammar,
            bit_matrix: BitMatrix::new(num_syms, num_syms),
        }
    }

    /// Sets the relation between two nonterminals. Returns false if either
    /// symbol has no production.
    pub fn set(&mut self, row: &Symbol, col: &Symbol, included: bool) -> bool {
        match (self.grammar.index_of(row), self.grammar.index_of(col)) {
            (Some(row), Some(col)) => {
                self.bit_matrix.set(row, col, included);
                true
            }
            _ => false,
        }
    }

    /// Checks the relation between two nonterminals.
    pub fn contains(&self, row: &Symbol, col: &Symbol) -> bool {
        match (self.grammar.index_of(row), self.grammar.index_of(col)) {
            (Some(row), Some(col)) => self.bit_matrix[(row, col)],
            _ => false,
        }
    }

    /// Returns the direct derivation matrix: `A` derives `B` iff `B` occurs in
    /// some alternative of `A`. Every nonterminal derives itself.
    pub fn direct_derivation_matrix(grammar: &'g Grammar) -> Self {
        let mut derivation = Self::new(grammar);

        for (lhs_idx, rules) in grammar.productions().values().enumerate() {
            derivation.bit_matrix.set(lhs_idx, lhs_idx, true);
            for sym in rules.iter().flat_map(|rule| rule.iter()) {
                match grammar.kind_of(sym) {
                    SymbolKind::NonTerminal | SymbolKind::Epsilon => {
                        if let Some(sym_idx) = grammar.index_of(sym) {
                            derivation.bit_matrix.set(lhs_idx, sym_idx, true);
                        }
                    }
                    SymbolKind::Terminal => {}
                }
            }
        }
        derivation
    }

    /// Returns the reachability matrix.
    pub fn reachability_matrix(grammar: &'g Grammar) -> Self {
        let mut result = Self::direct_derivation_matrix(grammar);
        result.transitive_closure();
        result.reflexive_closure();
        result
    }

    /// Iterates over the nonterminals related to `row`.
    pub fn iter_row_syms(&self, row: &Symbol) -> impl Iterator<Item = &'g Symbol> + '_ {
        let grammar = self.grammar;
        self.grammar
            .index_of(row)
            .into_iter()
            .flat_map(move |row| self.bit_matrix.iter_row(row).enumerate())
            .filter_map(move |(idx, present)| if present { grammar.symbol_at(idx) } else { None })
    }
}

impl<'g> Deref for SymbolBitMatrix<'g> {
    type Target = BitMatrix;
    fn deref(&self) -> &Self::Target {
        &self.bit_matrix
    }
}

impl<'g> DerefMut for SymbolBitMatrix<'g> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bit_matrix
    }
}
