use std::io;

use thiserror::Error;

use cfg_rewrite_grammar::GrammarError;

/// Errors from loading a grammar. Lines and columns are one-indexed.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read grammar: {0}")]
    Io(#[from] io::Error),
    /// An action block or comment is never closed.
    #[error("unterminated {what} starting at line {line} column {col}")]
    Unbalanced {
        what: &'static str,
        line: usize,
        col: usize,
    },
    /// The text does not have the expected structure.
    #[error("parse error at line {line} column {col}: {reason}{}", found(.token))]
    Parse {
        reason: String,
        line: usize,
        col: usize,
        token: Option<String>,
    },
    /// The loaded productions do not form a valid grammar.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

impl LoadError {
    pub(crate) fn parse(
        reason: impl Into<String>,
        (line, col): (usize, usize),
        token: Option<String>,
    ) -> Self {
        LoadError::Parse {
            reason: reason.into(),
            line,
            col,
            token,
        }
    }
}

fn found(token: &Option<String>) -> String {
    match token {
        Some(token) => format!(", found `{}`", token),
        None => String::new(),
    }
}
