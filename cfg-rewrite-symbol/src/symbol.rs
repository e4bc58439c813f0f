use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shared, immutable symbol name.
pub type SymbolName = Arc<str>;

/// Name of the reserved epsilon symbol.
pub const EMPTY_NAME: &str = "__empty";

/// A common grammar symbol type.
///
/// Whether a symbol is a terminal or a nonterminal is not recorded here. That is
/// decided by the grammar: a symbol is a nonterminal iff some production is keyed
/// by it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub enum Symbol {
    /// A word identifier, such as `expr` or `IDENT`.
    Name(SymbolName),
    /// A quoted terminal, such as `'+'`. Stored without quotes.
    Literal(SymbolName),
}

impl Symbol {
    /// Creates a word symbol.
    pub fn name(name: impl AsRef<str>) -> Self {
        Symbol::Name(name.as_ref().into())
    }

    /// Creates a quoted literal symbol.
    pub fn literal(text: impl AsRef<str>) -> Self {
        Symbol::Literal(text.as_ref().into())
    }

    /// The epsilon symbol, `__empty`.
    pub fn empty() -> Self {
        Symbol::Name(EMPTY_NAME.into())
    }

    /// Checks whether this is the epsilon symbol.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Name(name) if &**name == EMPTY_NAME)
    }

    /// The symbol's text, without quotes.
    pub fn as_str(&self) -> &str {
        match self {
            Symbol::Name(name) | Symbol::Literal(name) => name,
        }
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::name(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol::Name(name.into())
    }
}

impl From<&Symbol> for Symbol {
    fn from(sym: &Symbol) -> Self {
        sym.clone()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Name(name) => f.write_str(name),
            Symbol::Literal(text) => write!(f, "'{}'", text),
        }
    }
}
