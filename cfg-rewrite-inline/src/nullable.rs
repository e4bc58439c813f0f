use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, trace};

use cfg_rewrite_grammar::{
    Grammar, Productions, RewriteError, Rule, Symbol, SymbolBitSet, MAX_ROUNDS,
};

pub(crate) fn remove_opt_rules(grammar: &Grammar) -> Result<Grammar, RewriteError> {
    let mut current = grammar.clone();
    for round in 1..=MAX_ROUNDS {
        let productions = match expand(&current) {
            Some(productions) => productions,
            None => {
                debug!("optional rule expansion converged after {} rounds", round);
                return Ok(current);
            }
        };
        current = current.rebuild(productions);
    }
    Err(RewriteError::did_not_converge(
        "remove_opt_rules",
        MAX_ROUNDS,
        current,
    ))
}

/// Performs one round. Returns `None` when no production other than the start
/// symbol has an epsilon alternative.
fn expand(grammar: &Grammar) -> Option<Productions> {
    let nullable = nullable(grammar)?;
    let nulling = nulling(grammar, &nullable);
    debug!(
        "{} nullable and {} nulling productions",
        nullable.count(),
        nulling.count()
    );

    let mut productions = Productions::with_capacity(grammar.num_productions());
    for (lhs, rules) in grammar.productions() {
        if nulling.contains(lhs) {
            trace!("dropping nulling `{}`", lhs);
            continue;
        }
        let lhs_nullable = nullable.contains(lhs);
        let mut alternatives = IndexSet::new();
        for rule in rules {
            for alternative in present_or_absent(rule, &nullable, &nulling) {
                if !(lhs_nullable && alternative.is_epsilon()) {
                    alternatives.insert(alternative);
                }
            }
        }
        if !alternatives.is_empty() {
            productions.insert(lhs.clone(), alternatives.into_iter().collect());
        }
    }
    Some(productions)
}

/// Nonterminals that derive epsilon, other than the start symbol and
/// `__empty`. Returns `None` when no such nonterminal has an epsilon
/// alternative of its own.
fn nullable(grammar: &Grammar) -> Option<SymbolBitSet<'_>> {
    let mut nullable = SymbolBitSet::new(grammar);
    for (lhs, rules) in grammar.productions() {
        if lhs != grammar.start() && !lhs.is_epsilon() && rules.iter().any(Rule::is_epsilon) {
            nullable.set(lhs, true);
        }
    }
    if nullable.is_clear() {
        return None;
    }
    grammar.rhs_closure_for_all(&mut nullable);
    nullable.set(grammar.start(), false);
    Some(nullable)
}

/// Nullable nonterminals that derive nothing but epsilon.
fn nulling<'g>(grammar: &'g Grammar, nullable: &SymbolBitSet<'g>) -> SymbolBitSet<'g> {
    let mut nulling = nullable.clone();
    let mut changed = true;
    while changed {
        changed = false;
        let members: Vec<&Symbol> = nulling.iter().collect();
        for lhs in members {
            let derives_more = grammar.rules_of(lhs).map_or(false, |rules| {
                rules
                    .iter()
                    .flat_map(|rule| rule.iter())
                    .any(|sym| !sym.is_epsilon() && !nulling.contains(sym))
            });
            if derives_more {
                nulling.set(lhs, false);
                changed = true;
            }
        }
    }
    nulling
}

/// Every combination of keeping or omitting the nullable occurrences in a
/// rule, keeping first. Nulling occurrences are always omitted.
fn present_or_absent(rule: &Rule, nullable: &SymbolBitSet, nulling: &SymbolBitSet) -> Vec<Rule> {
    rule.iter()
        .map(|sym| {
            if nulling.contains(sym) {
                vec![None]
            } else if nullable.contains(sym) {
                vec![Some(sym), None]
            } else {
                vec![Some(sym)]
            }
        })
        .multi_cartesian_product()
        .map(|choice| choice.into_iter().flatten().cloned().collect())
        .collect()
}
