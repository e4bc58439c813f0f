use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use cfg_rewrite_grammar::{Grammar, Productions, RewriteError, Rule, Symbol, MAX_ROUNDS};

type Aliases<'g> = IndexMap<&'g Symbol, &'g Symbol>;

pub(crate) fn remove_redundant_rules(grammar: &Grammar) -> Result<Grammar, RewriteError> {
    let mut current = grammar.clone();
    for round in 1..=MAX_ROUNDS {
        let productions = match contract(&current) {
            Some(productions) => productions,
            None => {
                debug!("alias contraction converged after {} rounds", round);
                return Ok(current);
            }
        };
        current = current.rebuild(productions);
    }
    Err(RewriteError::did_not_converge(
        "remove_redundant_rules",
        MAX_ROUNDS,
        current,
    ))
}

/// Performs one round. Returns `None` when nothing can be contracted.
fn contract(grammar: &Grammar) -> Option<Productions> {
    let aliases: Aliases = grammar
        .productions()
        .iter()
        .filter(|&(lhs, _)| lhs != grammar.start() && !lhs.is_epsilon())
        .filter_map(|(lhs, rules)| match &rules[..] {
            [rule] => rule.single().map(|target| (lhs, target)),
            _ => None,
        })
        .collect();
    let substitution = resolve_chains(&aliases);
    if substitution.is_empty() {
        return None;
    }
    debug!("contracting {} aliases", substitution.len());

    let productions = grammar
        .productions()
        .iter()
        .filter(|&(lhs, _)| !substitution.contains_key(lhs))
        .map(|(lhs, rules)| {
            let rules = rules
                .iter()
                .map(|rule| substitute(rule, &substitution))
                .collect();
            (lhs.clone(), rules)
        })
        .collect();
    Some(productions)
}

/// Follows alias chains to their final targets. Aliases that lead into a cycle
/// of aliases are left out.
fn resolve_chains<'g>(aliases: &Aliases<'g>) -> Aliases<'g> {
    let mut substitution = Aliases::with_capacity(aliases.len());
    for (&alias, &target) in aliases {
        let mut seen = IndexSet::new();
        seen.insert(alias);
        let mut resolved = target;
        let mut cyclic = false;
        while let Some(&next) = aliases.get(resolved) {
            if !seen.insert(resolved) {
                cyclic = true;
                break;
            }
            resolved = next;
        }
        if cyclic {
            trace!("`{}` leads into an alias cycle", alias);
        } else {
            trace!("`{}` is an alias of `{}`", alias, resolved);
            substitution.insert(alias, resolved);
        }
    }
    substitution
}

fn substitute(rule: &Rule, substitution: &Aliases) -> Rule {
    rule.iter()
        .map(|sym| substitution.get(sym).copied().unwrap_or(sym))
        .cloned()
        .collect()
}
