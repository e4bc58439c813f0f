use indexmap::IndexSet;

use cfg_rewrite_grammar::{FreshNames, Grammar, Rule, Symbol};

/// Every name in use: production names and every symbol on a right-hand side,
/// terminals included.
pub(crate) fn taken_names(grammar: &Grammar) -> IndexSet<Symbol> {
    grammar
        .productions()
        .keys()
        .chain(grammar.rules().flat_map(|(_, rule)| rule.iter()))
        .cloned()
        .collect()
}

/// Helper productions introduced while rewriting one production.
pub(crate) struct Helpers<'a> {
    fresh: FreshNames,
    taken: &'a mut IndexSet<Symbol>,
    created: Vec<(Symbol, Vec<Rule>)>,
}

impl<'a> Helpers<'a> {
    /// Names helpers after `base`. `taken` holds every name in use, across all
    /// productions of the rewritten grammar.
    pub(crate) fn new(base: &Symbol, taken: &'a mut IndexSet<Symbol>) -> Self {
        Helpers {
            fresh: FreshNames::new(base),
            taken,
            created: vec![],
        }
    }

    pub(crate) fn fresh(&mut self) -> Symbol {
        let taken = &*self.taken;
        let sym = self.fresh.next_sym(|sym| taken.contains(sym));
        self.taken.insert(sym.clone());
        sym
    }

    pub(crate) fn define(&mut self, lhs: Symbol, rules: Vec<Rule>) {
        self.created.push((lhs, rules));
    }

    /// Moves several alternatives into a fresh helper and returns the rule
    /// referring to it. A single alternative is returned as is.
    pub(crate) fn combine(&mut self, mut rules: Vec<Rule>) -> Option<Rule> {
        match rules.len() {
            0 => None,
            1 => rules.pop(),
            _ => {
                let helper = self.fresh();
                let rule = Rule::new([&helper]);
                self.define(helper, rules);
                Some(rule)
            }
        }
    }

    /// Returns the helpers, in creation order.
    pub(crate) fn into_productions(self) -> Vec<(Symbol, Vec<Rule>)> {
        self.created
    }
}
