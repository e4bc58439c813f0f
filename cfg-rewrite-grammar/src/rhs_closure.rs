//! Transitive closure of symbol properties over rule right-hand sides.

use crate::local_prelude::*;
use crate::symbol_bit_set::SymbolBitSet;

impl Grammar {
    /// If **all** symbols on the RHS of some alternative have the property, the
    /// LHS has it too. Terminals never have the property. Updates the given set
    /// transitively.
    pub fn rhs_closure_for_all(&self, property: &mut SymbolBitSet) {
        // For every nonterminal, the positions of productions that mention it.
        let mut occurences: Vec<Vec<usize>> = vec![vec![]; self.num_productions()];
        for (lhs_idx, rules) in self.productions().values().enumerate() {
            for sym in rules.iter().flat_map(|rule| rule.iter()) {
                if let Some(sym_idx) = self.index_of(sym) {
                    if occurences[sym_idx].last() != Some(&lhs_idx) {
                        occurences[sym_idx].push(lhs_idx);
                    }
                }
            }
        }

        let mut work_stack: Vec<usize> = (0..self.num_productions())
            .filter(|&idx| property.contains_index(idx))
            .collect();

        while let Some(work_idx) = work_stack.pop() {
            for &lhs_idx in &occurences[work_idx] {
                if property.contains_index(lhs_idx) {
                    continue;
                }
                let rules = &self.productions()[lhs_idx];
                let satisfied = rules
                    .iter()
                    .any(|rule| rule.iter().all(|sym| property.contains(sym)));
                if satisfied {
                    property.set_index(lhs_idx, true);
                    work_stack.push(lhs_idx);
                }
            }
        }
    }
}
