mod cli;

use std::fs;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};
use thiserror::Error;

use cfg_rewrite::{Grammar, GrammarLoadExt, LoadError, RewriteError};

use crate::cli::{Cli, Format};

#[derive(Error, Debug)]
enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let grammar = match cli.input_format() {
        Format::Bison => Grammar::load_bison_file(&cli.input)?,
        Format::Snapshot => Grammar::load_snapshot_file(&cli.input)?,
    };
    info!(
        "loaded {} productions from {}",
        grammar.num_productions(),
        cli.input.display()
    );

    let pipeline = cli.pipeline();
    let rewritten = match pipeline.run(&grammar) {
        Ok(rewritten) => rewritten,
        Err(RewriteError::DidNotConverge { pass, rounds, last }) if cli.keep_last_snapshot => {
            warn!(
                "{} did not converge within {} rounds, writing its last grammar",
                pass, rounds
            );
            *last
        }
        Err(err) => return Err(err.into()),
    };

    let text = match cli.to {
        Format::Bison => rewritten.to_bison(),
        Format::Snapshot => rewritten.to_snapshot(),
    };
    match &cli.output {
        Some(path) => fs::write(path, text + "\n")?,
        None => println!("{}", text),
    }
    Ok(())
}
