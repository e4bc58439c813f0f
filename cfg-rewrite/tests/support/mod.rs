#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};

use cfg_rewrite::{Grammar, Productions, Rule, Symbol, SymbolKind};

/// A terminal string, as displayed symbols.
pub type Sentence = Vec<String>;

/// Symbols written as `'x'` are literals.
pub fn sym(text: &str) -> Symbol {
    match text.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        Some(literal) if !literal.is_empty() => Symbol::literal(literal),
        _ => Symbol::name(text),
    }
}

pub fn grammar(productions: &[(&str, &[&[&str]])]) -> Grammar {
    let productions: Productions = productions
        .iter()
        .map(|&(lhs, rules)| {
            let rules = rules
                .iter()
                .map(|syms| Rule::new(syms.iter().map(|text| sym(text))))
                .collect();
            (Symbol::name(lhs), rules)
        })
        .collect();
    Grammar::new(productions).unwrap()
}

/// Every terminal string of at most `max_len` symbols derivable from the start
/// symbol.
pub fn language(grammar: &Grammar, max_len: usize) -> BTreeSet<Sentence> {
    let mut derived: HashMap<Symbol, BTreeSet<Sentence>> = HashMap::new();
    loop {
        let mut changed = false;
        for (lhs, rule) in grammar.rules() {
            let mut partial: BTreeSet<Sentence> = BTreeSet::new();
            partial.insert(vec![]);
            for sym in rule.iter() {
                let options: BTreeSet<Sentence> = match grammar.kind_of(sym) {
                    SymbolKind::Epsilon => [vec![]].into_iter().collect(),
                    SymbolKind::Terminal => [vec![sym.to_string()]].into_iter().collect(),
                    SymbolKind::NonTerminal => derived.get(sym).cloned().unwrap_or_default(),
                };
                partial = partial
                    .iter()
                    .flat_map(|prefix| {
                        options
                            .iter()
                            .filter(move |suffix| prefix.len() + suffix.len() <= max_len)
                            .map(move |suffix| {
                                prefix.iter().chain(suffix.iter()).cloned().collect()
                            })
                    })
                    .collect();
            }
            let entry = derived.entry(lhs.clone()).or_default();
            for sentence in partial {
                changed |= entry.insert(sentence);
            }
        }
        if !changed {
            break;
        }
    }
    derived.remove(grammar.start()).unwrap_or_default()
}

pub fn assert_eq(left: &Grammar, right: &Grammar) {
    if left != right {
        eprintln!(
            "Left:\n{}\nRight:\n{}",
            left.stringify_to_bnf(),
            right.stringify_to_bnf()
        );
        panic!("Grammars expected to be equal");
    }
}

pub fn assert_same_language(left: &Grammar, right: &Grammar, max_len: usize) {
    let left_language = language(left, max_len);
    let right_language = language(right, max_len);
    if left_language != right_language {
        eprintln!(
            "Left:\n{}\nRight:\n{}",
            left.stringify_to_bnf(),
            right.stringify_to_bnf()
        );
        eprintln!(
            "Only left: {:?}\nOnly right: {:?}",
            left_language.difference(&right_language).collect::<Vec<_>>(),
            right_language.difference(&left_language).collect::<Vec<_>>()
        );
        panic!("Languages expected to be equal");
    }
}

pub fn arith() -> Grammar {
    grammar(&[
        ("expr", &[&["expr", "'+'", "term"], &["term"]]),
        ("term", &[&["term", "'*'", "factor"], &["factor"]]),
        ("factor", &[&["'('", "expr", "')'"], &["NUM"]]),
    ])
}

pub fn optional_list() -> Grammar {
    grammar(&[
        ("start", &[&["opt", "items"]]),
        ("opt", &[&["'v'"], &["__empty"]]),
        ("items", &[&["items", "item"], &["__empty"]]),
        ("item", &[&["'x'"], &["'y'"]]),
    ])
}

pub fn aliases() -> Grammar {
    grammar(&[
        ("s", &[&["a", "'x'"], &["b"]]),
        ("a", &[&["b"]]),
        ("b", &[&["c"]]),
        ("c", &[&["'y'"], &["'z'", "s"]]),
    ])
}

pub fn indirect() -> Grammar {
    grammar(&[
        ("s", &[&["a"]]),
        ("a", &[&["b"], &["'x'"]]),
        ("b", &[&["a", "'y'"], &["'z'"]]),
    ])
}
