use log::{debug, trace, warn};

use cfg_rewrite_classify::LeftRecursion;
use cfg_rewrite_grammar::{Grammar, Productions, Rule, Symbol};

use crate::helpers::{taken_names, Helpers};

pub(crate) fn remove_direct_left_recursion(grammar: &Grammar) -> Grammar {
    let direct = LeftRecursion::new(grammar).direct_set();
    if direct.is_clear() {
        return grammar.clone();
    }
    debug!(
        "removing direct left recursion from {} productions",
        direct.count()
    );

    let mut taken = taken_names(grammar);
    let mut productions = Productions::with_capacity(grammar.num_productions());
    for (lhs, rules) in grammar.productions() {
        if !direct.contains(lhs) {
            productions.insert(lhs.clone(), rules.clone());
            continue;
        }
        let mut helpers = Helpers::new(lhs, &mut taken);
        let rewritten = eliminate(lhs, rules, &mut helpers);
        productions.insert(lhs.clone(), rewritten);
        productions.extend(helpers.into_productions());
    }
    grammar.rebuild(productions)
}

/// Rewrites `A → A α | β` for a single production `A`.
fn eliminate(lhs: &Symbol, rules: &[Rule], helpers: &mut Helpers) -> Vec<Rule> {
    let (recursive, non_recursive): (Vec<&Rule>, Vec<&Rule>) =
        rules.iter().partition(|rule| rule.leading() == lhs);
    // `A → A` adds nothing.
    let tails: Vec<Rule> = recursive
        .iter()
        .filter(|rule| rule.len() > 1)
        .map(|rule| rule.tail())
        .collect();
    let non_recursive: Vec<Rule> = non_recursive.into_iter().cloned().collect();

    let tail = match helpers.combine(tails) {
        Some(tail) => tail,
        None if non_recursive.is_empty() => {
            warn!("`{}` only derives itself", lhs);
            return rules.to_vec();
        }
        None => {
            trace!("`{}` loses its trivial self-loop", lhs);
            return non_recursive;
        }
    };

    match helpers.combine(non_recursive) {
        None => {
            warn!("`{}` has no non-recursive alternative", lhs);
            vec![tail.with_suffix(lhs)]
        }
        Some(head) if head.is_epsilon() || head == tail => {
            trace!("`{}` becomes right-recursive in place", lhs);
            vec![tail.with_suffix(lhs), head]
        }
        Some(head) => {
            let prime = helpers.fresh();
            trace!("`{}` becomes right-recursive through `{}`", lhs, prime);
            helpers.define(prime.clone(), vec![tail.with_suffix(&prime), tail]);
            vec![head.with_suffix(&prime), head]
        }
    }
}
