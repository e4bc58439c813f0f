use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use log::{debug, trace};

use cfg_rewrite_grammar::{Grammar, Productions, RewriteError, Rule, Symbol, MAX_ROUNDS};

pub(crate) fn inline_singleton_productions(grammar: &Grammar) -> Result<Grammar, RewriteError> {
    let mut current = grammar.clone();
    for round in 1..=MAX_ROUNDS {
        let candidates = singletons(&current);
        if candidates.is_empty() {
            debug!("singleton inlining converged after {} rounds", round);
            return Ok(current);
        }
        trace!("{} singletons in round {}", candidates.len(), round);

        let mut productions: Productions = current
            .productions()
            .iter()
            .map(|(lhs, rules)| {
                let rules = rules
                    .iter()
                    .flat_map(|rule| substitute(rule, &current, &candidates))
                    .collect();
                (lhs.clone(), rules)
            })
            .collect();

        let referenced = referenced(&productions, current.start());
        productions.retain(|lhs, _| referenced.contains(lhs));
        current = current.rebuild(productions);
    }
    Err(RewriteError::did_not_converge(
        "inline_singleton_productions",
        MAX_ROUNDS,
        current,
    ))
}

/// Nonterminals referenced exactly once, other than the start symbol and
/// those that refer to themselves.
fn singletons(grammar: &Grammar) -> IndexSet<&Symbol> {
    let mut counts: IndexMap<&Symbol, usize> = IndexMap::new();
    for (_, rule) in grammar.rules() {
        for sym in rule.iter().filter(|sym| grammar.is_non_terminal(sym)) {
            *counts.entry(sym).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .filter(|&(sym, count)| count == 1 && sym != grammar.start())
        .filter(|&(sym, _)| {
            let rules = grammar.rules_of(sym).unwrap_or(&[]);
            !rules.iter().any(|rule| rule.references(sym))
        })
        .map(|(sym, _)| sym)
        .collect()
}

/// Replaces each candidate occurrence in `rule` with each of the candidate's
/// alternatives. Emits one rule per combination.
fn substitute(rule: &Rule, grammar: &Grammar, candidates: &IndexSet<&Symbol>) -> Vec<Rule> {
    let positions: Vec<(usize, &[Rule])> = rule
        .iter()
        .enumerate()
        .filter(|(_, sym)| candidates.contains(sym))
        .filter_map(|(idx, sym)| grammar.rules_of(sym).map(|rules| (idx, rules)))
        .collect();
    if positions.is_empty() {
        return vec![rule.clone()];
    }

    positions
        .iter()
        .map(|&(_, alternatives)| alternatives.iter())
        .multi_cartesian_product()
        .map(|choice| {
            let mut chosen = positions.iter().map(|&(idx, _)| idx).zip(choice).peekable();
            let mut syms = Vec::with_capacity(rule.len());
            for (idx, sym) in rule.iter().enumerate() {
                match chosen.next_if(|&(pos, _)| pos == idx) {
                    Some((_, alternative)) => syms.extend(alternative.iter().cloned()),
                    None => syms.push(sym.clone()),
                }
            }
            Rule::new(syms)
        })
        .collect()
}

/// Productions mentioned by some other production. The start symbol and
/// `__empty` always count.
fn referenced(productions: &Productions, start: &Symbol) -> IndexSet<Symbol> {
    let mut referenced: IndexSet<Symbol> = productions
        .iter()
        .flat_map(|(lhs, rules)| {
            rules
                .iter()
                .flat_map(|rule| rule.iter())
                .filter(move |&sym| sym != lhs)
        })
        .filter(|&sym| productions.contains_key(sym))
        .cloned()
        .collect();
    referenced.insert(start.clone());
    referenced.insert(Symbol::empty());
    referenced
}
