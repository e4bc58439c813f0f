//! Grammar rules: one alternative of a production.

use std::fmt;
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::local_prelude::*;

/// A never-empty sequence of symbols.
///
/// The epsilon symbol only ever appears alone. An empty sequence becomes
/// `[__empty]`, and `__empty` is dropped from sequences that have other symbols.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Symbol>", into = "Vec<Symbol>"))]
#[derive(Clone, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Rule {
    syms: Vec<Symbol>,
}

impl Rule {
    /// Creates a normalized rule.
    pub fn new<I, S>(syms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let mut syms: Vec<Symbol> = syms.into_iter().map(Into::into).collect();
        if syms.len() > 1 {
            syms.retain(|sym| !sym.is_epsilon());
        }
        if syms.is_empty() {
            syms.push(Symbol::empty());
        }
        Rule { syms }
    }

    /// The rule `[__empty]`.
    pub fn epsilon() -> Self {
        Rule {
            syms: vec![Symbol::empty()],
        }
    }

    /// Checks whether this is the rule `[__empty]`.
    pub fn is_epsilon(&self) -> bool {
        self.syms.len() == 1 && self.syms[0].is_epsilon()
    }

    /// The leading symbol.
    pub fn leading(&self) -> &Symbol {
        &self.syms[0]
    }

    /// Returns the symbol if this rule consists of exactly one symbol.
    pub fn single(&self) -> Option<&Symbol> {
        match &self.syms[..] {
            [sym] => Some(sym),
            _ => None,
        }
    }

    /// The rule without its leading symbol. Becomes `[__empty]` for rules of
    /// length one.
    pub fn tail(&self) -> Rule {
        Rule::new(self.syms[1..].iter().cloned())
    }

    /// Returns a copy of this rule with `sym` appended.
    pub fn with_suffix(&self, sym: &Symbol) -> Rule {
        Rule::new(self.syms.iter().chain(Some(sym)).cloned())
    }

    /// Checks whether `sym` occurs anywhere in this rule.
    pub fn references(&self, sym: &Symbol) -> bool {
        self.syms.contains(sym)
    }

    /// The symbols of this rule.
    pub fn syms(&self) -> &[Symbol] {
        &self.syms[..]
    }

    /// Converts into the symbol vector.
    pub fn into_syms(self) -> Vec<Symbol> {
        self.syms
    }
}

impl Deref for Rule {
    type Target = [Symbol];

    fn deref(&self) -> &[Symbol] {
        &self.syms[..]
    }
}

impl<'a> IntoIterator for &'a Rule {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.syms.iter()
    }
}

impl FromIterator<Symbol> for Rule {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Rule::new(iter)
    }
}

impl From<Vec<Symbol>> for Rule {
    fn from(syms: Vec<Symbol>) -> Self {
        Rule::new(syms)
    }
}

impl From<Rule> for Vec<Symbol> {
    fn from(rule: Rule) -> Self {
        rule.syms
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sym) in self.syms.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", sym)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert!(Rule::new(Vec::<Symbol>::new()).is_epsilon());
        assert_eq!(
            Rule::new(["__empty", "a", "__empty"]),
            Rule::new(["a"])
        );
        assert!(Rule::new(["__empty", "__empty"]).is_epsilon());
    }

    #[test]
    fn test_tail_of_single_symbol() {
        assert!(Rule::new(["a"]).tail().is_epsilon());
        assert_eq!(Rule::new(["a", "b", "c"]).tail(), Rule::new(["b", "c"]));
    }
}
