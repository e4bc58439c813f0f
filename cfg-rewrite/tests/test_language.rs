mod support;

use cfg_rewrite::{Grammar, GrammarClassifyExt, GrammarInlineExt, Pass, Pipeline, Rule, Symbol};
use test_case::test_case;

const MAX_LEN: usize = 6;

#[test_case(support::arith ; "arith")]
#[test_case(support::optional_list ; "optional list")]
#[test_case(support::aliases ; "aliases")]
#[test_case(support::indirect ; "indirect")]
fn test_every_pass_preserves_language(input: fn() -> Grammar) {
    let input = input();
    for pass in Pass::ALL {
        let output = pass.apply(&input).unwrap();
        eprintln!("checking {}", pass);
        support::assert_same_language(&input, &output, MAX_LEN);
    }
}

#[test_case(support::arith ; "arith")]
#[test_case(support::optional_list ; "optional list")]
#[test_case(support::aliases ; "aliases")]
#[test_case(support::indirect ; "indirect")]
fn test_default_pipeline_preserves_language(input: fn() -> Grammar) {
    let input = input();
    let output = Pipeline::default().run(&input).unwrap();
    support::assert_same_language(&input, &output, MAX_LEN);
    assert!(output.direct_left_recursive().is_empty());
}

#[test]
fn test_language_enumeration() {
    let language = support::language(&support::indirect(), 3);
    let sentences: Vec<String> = language.iter().map(|sentence| sentence.join(" ")).collect();
    assert_eq!(
        sentences,
        vec![
            "'x'",
            "'x' 'y'",
            "'x' 'y' 'y'",
            "'z'",
            "'z' 'y'",
            "'z' 'y' 'y'",
        ]
    );
}

#[test_case(support::arith ; "arith")]
#[test_case(support::optional_list ; "optional list")]
#[test_case(support::aliases ; "aliases")]
#[test_case(support::indirect ; "indirect")]
fn test_inlining_does_not_grow_reachable_set(input: fn() -> Grammar) {
    let input = input();
    for output in [
        input.inline_single_rule_productions().unwrap(),
        input.inline_singleton_productions().unwrap(),
    ] {
        assert!(output.reachable().count() <= input.reachable().count());
        for dropped in input.non_terminals().filter(|lhs| output.rules_of(lhs).is_none()) {
            assert!(
                !output.rules().any(|(_, rule)| rule.references(dropped)),
                "`{}` was dropped but is still referenced",
                dropped
            );
        }
    }
}

#[test_case(support::optional_list ; "optional list")]
#[test_case(support::arith ; "arith")]
fn test_only_start_keeps_epsilon_alternative(input: fn() -> Grammar) {
    let output = input().remove_opt_rules().unwrap();
    for (lhs, rule) in output.rules() {
        if lhs != output.start() && !lhs.is_epsilon() {
            assert_ne!(rule, &Rule::epsilon(), "`{}` is still nullable", lhs);
        }
    }
}

#[test]
fn test_optional_list_expansion() {
    let output = support::optional_list().remove_opt_rules().unwrap();
    let expected = support::grammar(&[
        ("start", &[&["opt", "items"], &["opt"], &["items"], &["__empty"]]),
        ("opt", &[&["'v'"]]),
        ("items", &[&["items", "item"], &["item"]]),
        ("item", &[&["'x'"], &["'y'"]]),
    ]);
    support::assert_eq(&output, &expected);
    assert_eq!(
        output.rules_of(&Symbol::name("start")).map(<[Rule]>::len),
        Some(4)
    );
}
