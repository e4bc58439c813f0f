use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use cfg_rewrite::{Grammar, GrammarLoadExt, MAX_ROUNDS};

/// `s` leads into a chain of productions longer than the round limit, ending
/// in the indirect cycle `c`, `d`.
fn long_chain_snapshot() -> String {
    let len = MAX_ROUNDS + 20;
    let mut text = String::from("{\n  s: [[:n0]],\n");
    for idx in 0..len {
        text.push_str(&format!("  n{}: [[:n{}, :x], [:y]],\n", idx, idx + 1));
    }
    text.push_str(&format!("  n{}: [[:c, :x]],\n", len));
    text.push_str("  c: [[:d, :y], [:w]],\n  d: [[:c, :z], [:w]]\n}\n");
    text
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cfg-rewrite-cli-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cfg_rewrite(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cfg-rewrite"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_rewrites_bison_file() {
    let dir = scratch_dir("bison");
    let input = dir.join("arith.y");
    let output = dir.join("arith.out.y");
    fs::write(&input, "%%\nexpr : expr '+' NUM | NUM ;\n%%\n").unwrap();

    let result = cfg_rewrite(&[input.to_str().unwrap(), "-o", output.to_str().unwrap()]);
    assert!(result.status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "expr :\n    NUM expr_1\n  | NUM\n;\n\n\
         expr_1 :\n    '+' NUM expr_1\n  | '+' NUM\n;\n\n\
         __empty :\n    __empty\n;\n"
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_non_convergence_fails_without_flag() {
    let dir = scratch_dir("fail");
    let input = dir.join("chain.snapshot");
    fs::write(&input, long_chain_snapshot()).unwrap();

    let result = cfg_rewrite(&[input.to_str().unwrap(), "-p", "remove-indirect-left-recursion"]);
    assert!(!result.status.success());
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert_eq!(
        stderr.matches("did not converge").count(),
        1,
        "stderr: {}",
        stderr
    );
    assert!(result.stdout.is_empty());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_keep_last_snapshot_writes_last_grammar() {
    let dir = scratch_dir("keep");
    let input = dir.join("chain.snapshot");
    let output = dir.join("chain.out.snapshot");
    fs::write(&input, long_chain_snapshot()).unwrap();

    let result = cfg_rewrite(&[
        input.to_str().unwrap(),
        "-p",
        "remove-indirect-left-recursion",
        "--keep-last-snapshot",
        "--to",
        "snapshot",
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(result.status.success());
    assert_eq!(
        Grammar::load_snapshot_file(&output).unwrap(),
        Grammar::load_snapshot_file(&input).unwrap()
    );
    fs::remove_dir_all(&dir).unwrap();
}
