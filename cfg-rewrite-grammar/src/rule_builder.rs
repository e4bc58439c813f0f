//! Grammars can be built with the builder pattern.

use crate::error::GrammarError;
use crate::local_prelude::*;

/// The grammar builder.
#[derive(Clone, Debug, Default)]
pub struct GrammarBuilder {
    productions: Productions,
}

/// Builds the alternatives of one production.
#[derive(Clone, Debug)]
pub struct ProductionBuilder {
    builder: GrammarBuilder,
    lhs: Symbol,
}

impl GrammarBuilder {
    /// Creates a grammar builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a production. The first production becomes the start
    /// symbol.
    pub fn rule(mut self, lhs: impl Into<Symbol>) -> ProductionBuilder {
        let lhs = lhs.into();
        self.productions.entry(lhs.clone()).or_default();
        ProductionBuilder { builder: self, lhs }
    }

    /// Validates and returns the grammar.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        Grammar::new(self.productions)
    }
}

impl ProductionBuilder {
    /// Adds an alternative to the current production.
    pub fn rhs<I, S>(mut self, syms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let rule = Rule::new(syms);
        self.push(rule);
        self
    }

    /// Adds the `__empty` alternative to the current production.
    pub fn epsilon(mut self) -> Self {
        self.push(Rule::epsilon());
        self
    }

    /// Starts building another production.
    pub fn rule(self, lhs: impl Into<Symbol>) -> ProductionBuilder {
        self.builder.rule(lhs)
    }

    /// Validates and returns the grammar.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        self.builder.build()
    }

    fn push(&mut self, rule: Rule) {
        self.builder
            .productions
            .entry(self.lhs.clone())
            .or_default()
            .push(rule);
    }
}
