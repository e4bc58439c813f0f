//! Reading and writing grammars.
//!
//! Two formats are supported. Bison grammar files are read by extracting the
//! rules section and discarding actions, comments and precedence annotations.
//! Snapshots are a literal map from production names to rule lists:
//!
//! ```text
//! {
//!   expr: [
//!     [:expr, "+", :term],
//!     [:term]
//!   ],
//!
//!   term: [
//!     [:NUM]
//!   ]
//! }
//! ```

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

mod bison;
mod error;
mod scanner;
mod snapshot;

use std::fs;
use std::path::Path;

use log::debug;

use cfg_rewrite_grammar::Grammar;

pub use crate::error::LoadError;

/// Loading and saving of grammars.
pub trait GrammarLoadExt: Sized {
    /// Loads the rules section of a Bison grammar.
    fn load_bison(text: &str) -> Result<Self, LoadError>;

    /// Reads and loads a Bison grammar file.
    fn load_bison_file(path: impl AsRef<Path>) -> Result<Self, LoadError>;

    /// Loads a snapshot.
    fn load_snapshot(text: &str) -> Result<Self, LoadError>;

    /// Reads and loads a snapshot file.
    fn load_snapshot_file(path: impl AsRef<Path>) -> Result<Self, LoadError>;

    /// Writes the grammar as Bison rules, without actions.
    fn to_bison(&self) -> String;

    /// Writes the grammar as a snapshot.
    fn to_snapshot(&self) -> String;
}

impl GrammarLoadExt for Grammar {
    fn load_bison(text: &str) -> Result<Self, LoadError> {
        bison::load(text)
    }

    fn load_bison_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!("loading Bison grammar from {}", path.display());
        bison::load(&fs::read_to_string(path)?)
    }

    fn load_snapshot(text: &str) -> Result<Self, LoadError> {
        snapshot::load(text)
    }

    fn load_snapshot_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!("loading snapshot from {}", path.display());
        snapshot::load(&fs::read_to_string(path)?)
    }

    fn to_bison(&self) -> String {
        bison::write(self)
    }

    fn to_snapshot(&self) -> String {
        snapshot::write(self)
    }
}
