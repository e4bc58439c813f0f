use std::fs;

use cfg_rewrite_grammar::{Grammar, GrammarError, Productions, Rule, Symbol};
use cfg_rewrite_load::{GrammarLoadExt, LoadError};
use test_case::test_case;

/// Symbols written as `'x'` are literals.
fn sym(text: &str) -> Symbol {
    match text.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        Some(literal) if !literal.is_empty() => Symbol::literal(literal),
        _ => Symbol::name(text),
    }
}

fn grammar(productions: &[(&str, &[&[&str]])]) -> Grammar {
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

fn arith() -> Grammar {
    grammar(&[
        ("expr", &[&["expr", "'+'", "term"], &["term"]]),
        ("term", &[&["NUM"], &["'('", "expr", "')'"]]),
    ])
}

fn parse_position(error: LoadError) -> (usize, usize, Option<String>) {
    match error {
        LoadError::Parse {
            line, col, token, ..
        } => (line, col, token),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

const ARITH_BISON: &str = r#"%{
#include <stdio.h>
%}
%token NUM
%left '+'
%%
/* expressions */
expr : expr '+' term { $$ = $1 + $3; }
     | term          { $$ = $1; }
     ;

term : NUM
     | '(' expr ')'  { $$ = $2; /* } */ }
     ;
%%
int main(void) { return yyparse(); }
"#;

#[test]
fn test_load_bison_sections() {
    let loaded = Grammar::load_bison(ARITH_BISON).unwrap();
    assert_eq!(loaded, arith());
    assert_eq!(loaded.start(), &Symbol::name("expr"));
}

#[test]
fn test_load_bison_without_markers() {
    let loaded = Grammar::load_bison("expr : expr '+' term | term ; term : NUM | '(' expr ')' ;");
    assert_eq!(loaded.unwrap(), arith());
}

#[test]
fn test_load_bison_empty_alternatives() {
    let loaded = Grammar::load_bison("list : list item | ; item : %empty | 'x' ;").unwrap();
    let expected = grammar(&[
        ("list", &[&["list", "item"], &[]]),
        ("item", &[&["__empty"], &["'x'"]]),
    ]);
    assert_eq!(loaded, expected);
}

#[test]
fn test_load_bison_prec_is_dropped() {
    let text = "e : e '-' e | '-' e %prec UMINUS | NUM ;";
    let expected = grammar(&[("e", &[&["e", "'-'", "e"], &["'-'", "e"], &["NUM"]])]);
    assert_eq!(Grammar::load_bison(text).unwrap(), expected);
}

#[test]
fn test_load_bison_string_literals_and_comments() {
    let text = "cmp : a \"==\" b // equality\n | a \"<\\\"\" b ;";
    let expected = grammar(&[("cmp", &[&["a", "'=='", "b"], &["a", "'<\"'", "b"]])]);
    assert_eq!(Grammar::load_bison(text).unwrap(), expected);
}

#[test]
fn test_load_bison_repeated_production_appends() {
    let loaded = Grammar::load_bison("a : b ; c : d ; a : e ;").unwrap();
    let expected = grammar(&[("a", &[&["b"], &["e"]]), ("c", &[&["d"]])]);
    assert_eq!(loaded, expected);
    assert_eq!(loaded.symbol_at(1), Some(&Symbol::name("c")));
}

#[test]
fn test_load_bison_missing_colon() {
    let error = Grammar::load_bison("%token X\n%%\na : b ;\nc d ;\n").unwrap_err();
    assert_eq!(parse_position(error), (4, 3, Some("d".to_string())));
}

#[test]
fn test_load_bison_missing_semicolon() {
    let error = Grammar::load_bison("a : b\n  | c").unwrap_err();
    assert!(error.to_string().contains("missing `;`"));
}

#[test]
fn test_load_bison_unsupported_directive() {
    let error = Grammar::load_bison("a : b\n  | %left c ;").unwrap_err();
    assert_eq!(parse_position(error), (2, 5, Some("%left".to_string())));
}

#[test]
fn test_load_bison_unbalanced_action() {
    let error = Grammar::load_bison("%%\na : b { x(); ;\n").unwrap_err();
    assert!(matches!(
        error,
        LoadError::Unbalanced {
            what: "action block",
            line: 2,
            col: 7
        }
    ));
}

#[test]
fn test_load_bison_without_rules() {
    let error = Grammar::load_bison("%token X\n%%\n%%\n").unwrap_err();
    assert!(matches!(
        error,
        LoadError::Grammar(GrammarError::NoStartSymbol)
    ));
}

#[test]
fn test_to_bison() {
    let expected = "expr :\n    expr '+' term\n  | term\n;\n\n\
                    term :\n    NUM\n  | '(' expr ')'\n;\n\n\
                    __empty :\n    __empty\n;";
    assert_eq!(arith().to_bison(), expected);
}

#[test]
fn test_snapshot_format() {
    let grammar = grammar(&[("expr", &[&["expr", "'+'", "term"], &["term"]]), ("term", &[&["NUM"]])]);
    let expected = r#"{
  expr: [
    [:expr, "+", :term],
    [:term]
  ],

  term: [
    [:NUM]
  ],

  __empty: [
    [:__empty]
  ]
}"#;
    assert_eq!(grammar.to_snapshot(), expected);
}

#[test]
fn test_snapshot_quotes_unusual_names() {
    let grammar = Grammar::new(
        [(
            Symbol::name("a-b"),
            vec![Rule::new([Symbol::name("2nd"), Symbol::literal("\\\"")])],
        )]
        .into_iter()
        .collect(),
    )
    .unwrap();
    let snapshot = grammar.to_snapshot();
    assert!(snapshot.contains(r#"  "a-b": ["#));
    assert!(snapshot.contains(r#"    [:"2nd", "\\\""]"#));
}

#[test_case("{ expr: [[:expr, \"+\", :term], [:term]], term: [[:NUM]] }" ; "plain keys")]
#[test_case("{ \"expr\" => [[:expr, '+', :term], [:term],], :term => [[:NUM],], }" ; "arrow keys and trailing commas")]
#[test_case("# generated\n{\n  expr: [ # first\n    [:expr, \"+\", :term],\n    [:term]\n  ],\n  term: [[:NUM]]\n}\n" ; "comments")]
#[test_case("{ expr: [[:expr, \"+\", :term]], term: [[:NUM]], expr: [[:term]] }" ; "repeated keys append")]
fn test_load_snapshot(text: &str) {
    let expected = grammar(&[("expr", &[&["expr", "'+'", "term"], &["term"]]), ("term", &[&["NUM"]])]);
    assert_eq!(Grammar::load_snapshot(text).unwrap(), expected);
}

#[test]
fn test_load_snapshot_empty_rule_is_epsilon() {
    let loaded = Grammar::load_snapshot("{ opt: [[:x], []] }").unwrap();
    assert_eq!(loaded, grammar(&[("opt", &[&["x"], &["__empty"]])]));
}

#[test]
fn test_load_snapshot_error_position() {
    let error = Grammar::load_snapshot("{ a: [[:b] }").unwrap_err();
    assert_eq!(
        error.to_string(),
        "parse error at line 1 column 12: expected `,` or `]`, found `}`"
    );
    assert_eq!(parse_position(error), (1, 12, Some("}".to_string())));
}

#[test]
fn test_load_snapshot_is_not_evaluated() {
    let error = Grammar::load_snapshot("{ a: [[:b]] }.each { |k| system(k) }").unwrap_err();
    assert_eq!(parse_position(error), (1, 14, Some(".".to_string())));
}

#[test]
fn test_load_snapshot_unexpected_end() {
    let error = Grammar::load_snapshot("{ a: [[:b]],\n").unwrap_err();
    assert!(matches!(error, LoadError::Parse { line: 2, col: 1, token: None, .. }));
}

#[test]
fn test_load_snapshot_invalid_grammar() {
    assert!(matches!(
        Grammar::load_snapshot("{}"),
        Err(LoadError::Grammar(GrammarError::NoStartSymbol))
    ));
    assert!(matches!(
        Grammar::load_snapshot("{ a: [] }"),
        Err(LoadError::Grammar(GrammarError::EmptyProduction { .. }))
    ));
}

#[test]
fn test_round_trips() {
    let grammar = grammar(&[
        ("stmt", &[&["IF", "expr", "stmt"], &["expr", "';'"], &[]]),
        ("expr", &[&["expr", "'=='", "expr"], &["'\\'"], &["ID"]]),
    ]);
    assert_eq!(Grammar::load_bison(&grammar.to_bison()).unwrap(), grammar);
    assert_eq!(Grammar::load_snapshot(&grammar.to_snapshot()).unwrap(), grammar);
}

#[test]
fn test_load_files() {
    let dir = std::env::temp_dir().join(format!("cfg-rewrite-load-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let bison = dir.join("arith.y");
    let snapshot = dir.join("arith.snapshot");
    fs::write(&bison, ARITH_BISON).unwrap();
    fs::write(&snapshot, arith().to_snapshot()).unwrap();

    assert_eq!(Grammar::load_bison_file(&bison).unwrap(), arith());
    assert_eq!(Grammar::load_snapshot_file(&snapshot).unwrap(), arith());
    assert!(matches!(
        Grammar::load_bison_file(dir.join("missing.y")),
        Err(LoadError::Io(_))
    ));
    fs::remove_dir_all(&dir).unwrap();
}
