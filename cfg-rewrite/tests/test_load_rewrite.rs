#![cfg(feature = "cfg-rewrite-load")]

mod support;

use cfg_rewrite::{Grammar, GrammarClassifyExt, GrammarLoadExt, Pipeline};

const PARSE_Y: &str = r#"%{
int yylex(void);
%}
%token NUM
%%
expr : expr '+' term { $$ = $1 + $3; }
     | term
     ;
term : NUM
     | '(' expr ')' { $$ = $2; }
     ;
%%
"#;

#[test]
fn test_load_rewrite_save() {
    let input = Grammar::load_bison(PARSE_Y).unwrap();
    assert_eq!(input.direct_left_recursive().len(), 1);

    let output = Pipeline::default().run(&input).unwrap();
    let expected = "expr :\n    term expr_1\n  | term\n;\n\n\
                    expr_1 :\n    '+' term expr_1\n  | '+' term\n;\n\n\
                    term :\n    NUM\n  | '(' expr ')'\n;\n\n\
                    __empty :\n    __empty\n;";
    assert_eq!(output.to_bison(), expected);
    support::assert_same_language(&input, &output, 7);
}

#[test]
fn test_saved_grammars_load_back() {
    let output = Pipeline::default()
        .run(&Grammar::load_bison(PARSE_Y).unwrap())
        .unwrap();
    support::assert_eq(&Grammar::load_bison(&output.to_bison()).unwrap(), &output);
    support::assert_eq(&Grammar::load_snapshot(&output.to_snapshot()).unwrap(), &output);
}
