use std::slice;

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use cfg_rewrite_grammar::{Grammar, Productions, RewriteError, Rule, Symbol, MAX_ROUNDS};

pub(crate) fn inline_single_rule_productions(grammar: &Grammar) -> Result<Grammar, RewriteError> {
    let mut current = grammar.clone();
    for round in 1..=MAX_ROUNDS {
        let candidates: IndexMap<&Symbol, &Rule> = current
            .productions()
            .iter()
            .filter(|&(lhs, _)| !lhs.is_epsilon())
            .filter_map(|(lhs, rules)| match &rules[..] {
                [rule] if !rule.references(lhs) => Some((lhs, rule)),
                _ => None,
            })
            .collect();
        if candidates.is_empty() {
            debug!("single-rule inlining converged after {} rounds", round);
            return Ok(current);
        }
        trace!("{} single-rule productions in round {}", candidates.len(), round);

        let mut productions: Productions = current
            .productions()
            .iter()
            .map(|(lhs, rules)| {
                let rules = rules.iter().map(|rule| splice(rule, &candidates)).collect();
                (lhs.clone(), rules)
            })
            .collect();

        let referenced: IndexSet<Symbol> = productions
            .values()
            .flatten()
            .flat_map(|rule| rule.iter())
            .cloned()
            .collect();
        let start = current.start();
        productions
            .retain(|lhs, _| lhs == start || lhs.is_epsilon() || referenced.contains(lhs));

        let unchanged = productions.len() == current.num_productions();
        current = current.rebuild(productions);
        if unchanged {
            debug!("single-rule inlining stable after {} rounds", round);
            return Ok(current);
        }
    }
    Err(RewriteError::did_not_converge(
        "inline_single_rule_productions",
        MAX_ROUNDS,
        current,
    ))
}

fn splice(rule: &Rule, candidates: &IndexMap<&Symbol, &Rule>) -> Rule {
    rule.iter()
        .flat_map(|sym| match candidates.get(sym) {
            Some(inlined) => inlined.syms(),
            None => slice::from_ref(sym),
        })
        .cloned()
        .collect()
}
