//! A type that can represent symbols in a context-free grammar. Symbols are distinguished by their
//! names, and by whether they were written as a word or as a quoted literal.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]

mod source;
mod symbol;

pub use self::source::FreshNames;
pub use self::symbol::{Symbol, SymbolName, EMPTY_NAME};
