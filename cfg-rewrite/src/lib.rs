//! Rewriting of context-free grammars extracted from Yacc/Bison specifications.
//!
//! Every rewrite takes a [`Grammar`] by reference and returns a new one. The
//! rewrites are available as extension traits and as [`Pass`]es that a
//! [`Pipeline`] runs in order.
//!
//! ```ignore
//! use cfg_rewrite::{Grammar, GrammarLoadExt, Pipeline};
//!
//! let grammar = Grammar::load_bison_file("parse.y")?;
//! let rewritten = Pipeline::default().run(&grammar)?;
//! println!("{}", rewritten.to_bison());
//! ```

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

mod pipeline;

pub use crate::pipeline::{Pass, Pipeline, UnknownPass};
pub use cfg_rewrite_classify as classify;
pub use cfg_rewrite_classify::GrammarClassifyExt;
pub use cfg_rewrite_grammar::*;
pub use cfg_rewrite_inline::GrammarInlineExt;
#[cfg(feature = "cfg-rewrite-load")]
pub use cfg_rewrite_load as load;
#[cfg(feature = "cfg-rewrite-load")]
pub use cfg_rewrite_load::{GrammarLoadExt, LoadError};
pub use cfg_rewrite_recursion::{GrammarRecursionExt, IndirectResolution};
pub use cfg_rewrite_symbol as symbol;
