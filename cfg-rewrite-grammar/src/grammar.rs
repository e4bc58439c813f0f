//! Definitions of the grammar type.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GrammarError;
use crate::rule::Rule;
use crate::rule_builder::GrammarBuilder;
use crate::symbol_bit_matrix::SymbolBitMatrix;
use crate::symbol_bit_set::SymbolBitSet;
use cfg_rewrite_symbol::Symbol;

/// Ordered map from nonterminals to their alternatives.
pub type Productions = IndexMap<Symbol, Vec<Rule>>;

/// Context-free grammar type.
///
/// Productions keep their insertion order. The start symbol is the first
/// production, and the `__empty` production is always present.
///
/// Grammars are immutable. Rewrites return new grammars, built with
/// [`fn rebuild`].
///
/// [`fn rebuild`]: Grammar::rebuild
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Productions", into = "Productions")
)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grammar {
    /// The start symbol.
    start: Symbol,
    /// All productions, start symbol first.
    productions: Productions,
}

/// What a symbol is, relative to a particular grammar.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SymbolKind {
    /// The reserved `__empty` symbol.
    Epsilon,
    /// A symbol with a production.
    NonTerminal,
    /// A symbol without a production.
    Terminal,
}

impl Grammar {
    /// Creates a grammar from an ordered map. The first production becomes the
    /// start symbol. The `__empty` production is appended if missing.
    pub fn new(mut productions: Productions) -> Result<Self, GrammarError> {
        let start = match productions.get_index(0) {
            Some((start, _)) if !start.is_epsilon() => start.clone(),
            _ => return Err(GrammarError::NoStartSymbol),
        };
        if let Some((lhs, _)) = productions.iter().find(|(_, rules)| rules.is_empty()) {
            return Err(GrammarError::EmptyProduction { lhs: lhs.clone() });
        }
        match productions.get(&Symbol::empty()) {
            Some(rules) if rules.len() != 1 || !rules[0].is_epsilon() => {
                let rules = rules
                    .iter()
                    .map(|rule| format!("[{}]", rule))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(GrammarError::MalformedEpsilon { rules });
            }
            Some(_) => {}
            None => {
                productions.insert(Symbol::empty(), vec![Rule::epsilon()]);
            }
        }
        Ok(Grammar { start, productions })
    }

    /// Starts building a grammar.
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// Creates a grammar that shares this grammar's start symbol.
    ///
    /// The start symbol is moved to the front and the `__empty` production is
    /// reinstated, so rewrites cannot break either invariant.
    pub fn rebuild(&self, mut productions: Productions) -> Grammar {
        debug_assert!(
            productions.contains_key(&self.start),
            "rewrite dropped the start symbol `{}`",
            self.start
        );
        if productions.get_index_of(&self.start).map_or(false, |idx| idx != 0) {
            if let Some(rules) = productions.shift_remove(&self.start) {
                let mut reordered = Productions::with_capacity(productions.len() + 1);
                reordered.insert(self.start.clone(), rules);
                reordered.extend(productions);
                productions = reordered;
            }
        }
        productions.insert(Symbol::empty(), vec![Rule::epsilon()]);
        Grammar {
            start: self.start.clone(),
            productions,
        }
    }

    /// The start symbol.
    pub fn start(&self) -> &Symbol {
        &self.start
    }

    /// Returns the ordered map of productions.
    pub fn productions(&self) -> &Productions {
        &self.productions
    }

    /// Converts into the ordered map of productions.
    pub fn into_productions(self) -> Productions {
        self.productions
    }

    /// Returns the alternatives of a nonterminal.
    pub fn rules_of(&self, sym: &Symbol) -> Option<&[Rule]> {
        self.productions.get(sym).map(|rules| &rules[..])
    }

    /// Returns an iterator over all `(lhs, rule)` pairs.
    pub fn rules(&self) -> impl Iterator<Item = (&Symbol, &Rule)> {
        self.productions
            .iter()
            .flat_map(|(lhs, rules)| rules.iter().map(move |rule| (lhs, rule)))
    }

    /// Returns the number of productions, including `__empty`.
    pub fn num_productions(&self) -> usize {
        self.productions.len()
    }

    /// Returns the position of a nonterminal in production order.
    pub fn index_of(&self, sym: &Symbol) -> Option<usize> {
        self.productions.get_index_of(sym)
    }

    /// Returns the nonterminal at the given position.
    pub fn symbol_at(&self, idx: usize) -> Option<&Symbol> {
        self.productions.get_index(idx).map(|(sym, _)| sym)
    }

    /// Classifies a symbol relative to this grammar.
    pub fn kind_of(&self, sym: &Symbol) -> SymbolKind {
        if sym.is_epsilon() {
            SymbolKind::Epsilon
        } else if self.productions.contains_key(sym) {
            SymbolKind::NonTerminal
        } else {
            SymbolKind::Terminal
        }
    }

    /// Checks whether a symbol has a production, other than `__empty`.
    pub fn is_non_terminal(&self, sym: &Symbol) -> bool {
        self.kind_of(sym) == SymbolKind::NonTerminal
    }

    /// Iterates over nonterminals other than `__empty`, in production order.
    pub fn non_terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.productions.keys().filter(|sym| !sym.is_epsilon())
    }

    /// Collects the set of terminal symbols, in order of first occurrence.
    pub fn terminals(&self) -> IndexSet<Symbol> {
        self.rules()
            .flat_map(|(_, rule)| rule.iter())
            .filter(|sym| self.kind_of(sym) == SymbolKind::Terminal)
            .cloned()
            .collect()
    }

    /// Returns the set of nonterminals reachable from the start symbol.
    pub fn reachable(&self) -> SymbolBitSet<'_> {
        let reachability = SymbolBitMatrix::reachability_matrix(self);
        let mut reachable = SymbolBitSet::new(self);
        for sym in reachability.iter_row_syms(&self.start) {
            reachable.set(sym, true);
        }
        reachable
    }

    /// Formats the grammar to a `String`. The output looks like this:
    ///
    /// ```ignore
    /// start ::= a 'x' b | c;
    /// a ::= y;
    /// ```
    pub fn stringify_to_bnf(&self) -> String {
        let mut result = String::new();
        for (lhs, rules) in &self.productions {
            let rhs = rules
                .iter()
                .map(|rule| rule.to_string())
                .collect::<Vec<_>>()
                .join(" | ");
            result.push_str(&format!("{} ::= {};\n", lhs, rhs));
        }
        result
    }
}

impl TryFrom<Productions> for Grammar {
    type Error = GrammarError;

    fn try_from(productions: Productions) -> Result<Self, Self::Error> {
        Grammar::new(productions)
    }
}

impl From<Grammar> for Productions {
    fn from(grammar: Grammar) -> Self {
        grammar.productions
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify_to_bnf())
    }
}
