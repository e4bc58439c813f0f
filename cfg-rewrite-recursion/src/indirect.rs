use indexmap::{IndexMap, IndexSet};
use log::{debug, trace, warn};

use cfg_rewrite_classify::LeftRecursion;
use cfg_rewrite_grammar::{Grammar, Productions, RewriteError, Rule, Symbol};

use crate::helpers::{taken_names, Helpers};

/// The outcome of indirect left-recursion removal.
#[derive(Clone, Debug)]
pub struct IndirectResolution {
    /// The rewritten grammar.
    pub grammar: Grammar,
    /// Productions of the rewritten grammar that still take part in indirect
    /// left recursion.
    pub unresolved: Productions,
}

impl IndirectResolution {
    /// Checks whether every detected cycle was resolved.
    pub fn is_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Rewritten productions of each cyclic production: its own entry first, then
/// its helpers.
type Rewritten = IndexMap<Symbol, Vec<(Symbol, Vec<Rule>)>>;

pub(crate) fn remove_indirect_left_recursion(
    grammar: &Grammar,
) -> Result<IndirectResolution, RewriteError> {
    let cyclic = LeftRecursion::new(grammar).indirect()?;
    if cyclic.is_empty() {
        return Ok(IndirectResolution {
            grammar: grammar.clone(),
            unresolved: Productions::new(),
        });
    }
    debug!(
        "resolving indirect left recursion among {} productions",
        cyclic.len()
    );

    let mut taken = taken_names(grammar);
    let mut rewritten = Rewritten::with_capacity(cyclic.len());
    for (lhs, rules) in &cyclic {
        let prods = collapse(lhs, rules, &cyclic, &mut taken)?;
        rewritten.insert(lhs.clone(), prods);
    }

    let mut productions = Productions::with_capacity(grammar.num_productions());
    for (lhs, rules) in grammar.productions() {
        let prods = match rewritten.get(lhs) {
            Some(prods) => prods,
            None => {
                productions.insert(lhs.clone(), rules.clone());
                continue;
            }
        };
        productions.extend(prods.iter().cloned());

        let singular = prods[0]
            .1
            .iter()
            .find_map(|rule| rule.single().filter(|sym| rewritten.contains_key(*sym)));
        if let Some(singular) = singular {
            trace!("splicing `{}` into `{}`", singular, lhs);
            let replacement = &rewritten[singular][0].1;
            if let Some(own) = productions.get_mut(lhs) {
                own.retain(|rule| rule.single() != Some(singular));
                own.extend(replacement.iter().cloned());
            }
        }
    }

    let grammar = grammar.rebuild(productions);
    let unresolved = LeftRecursion::new(&grammar).indirect()?;
    for lhs in unresolved.keys() {
        warn!("indirect left recursion through `{}` was left unresolved", lhs);
    }
    Ok(IndirectResolution {
        grammar,
        unresolved,
    })
}

/// Collapses the alternatives of one cyclic production into `[head, tail]`.
fn collapse(
    lhs: &Symbol,
    rules: &[Rule],
    cyclic: &Productions,
    taken: &mut IndexSet<Symbol>,
) -> Result<Vec<(Symbol, Vec<Rule>)>, RewriteError> {
    let (recursive, non_recursive): (Vec<&Rule>, Vec<&Rule>) = rules
        .iter()
        .partition(|rule| cyclic.contains_key(rule.leading()));

    let leading: IndexSet<&Symbol> = recursive.iter().map(|rule| rule.leading()).collect();
    if leading.len() > 1 {
        return Err(RewriteError::MultipleRecursiveSymbols {
            production: lhs.clone(),
            symbols: leading.into_iter().cloned().collect(),
        });
    }

    let tail = match &recursive[..] {
        [] => return Ok(vec![(lhs.clone(), rules.to_vec())]),
        [rule] if rule.len() == 1 => {
            trace!("`{}` keeps its recursive singular rule", lhs);
            return Ok(vec![(lhs.clone(), rules.to_vec())]);
        }
        [rule] => Some((*rule).clone()),
        _ => None,
    };

    let mut helpers = Helpers::new(lhs, taken);
    let tail = match tail {
        Some(tail) => tail,
        None => {
            let recursive_sym = recursive[0].leading();
            let helper = helpers.fresh();
            helpers.define(
                helper.clone(),
                recursive.iter().map(|rule| rule.tail()).collect(),
            );
            Rule::new([recursive_sym, &helper])
        }
    };
    let head = helpers.combine(non_recursive.into_iter().cloned().collect());

    let own_rules: Vec<Rule> = head.into_iter().chain(Some(tail)).collect();
    let mut prods = vec![(lhs.clone(), own_rules)];
    prods.extend(helpers.into_productions());
    Ok(prods)
}
