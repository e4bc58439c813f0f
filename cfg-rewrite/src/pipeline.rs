//! Configured sequences of rewrites.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use log::{info, warn};
use thiserror::Error;

use cfg_rewrite_grammar::{Grammar, RewriteError};
use cfg_rewrite_inline::GrammarInlineExt;
use cfg_rewrite_recursion::GrammarRecursionExt;

/// A single grammar rewrite.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Pass {
    /// Alias contraction.
    RemoveRedundantRules,
    /// Indirect left recursion to direct left recursion.
    RemoveIndirectLeftRecursion,
    /// Direct left recursion to right recursion.
    RemoveDirectLeftRecursion,
    /// Splicing of single-rule productions.
    InlineSingleRuleProductions,
    /// Substitution of productions referenced once.
    InlineSingletonProductions,
    /// Expansion of optional occurrences of nullable symbols.
    RemoveOptRules,
}

impl Pass {
    /// Every pass, in the order they are usually run.
    pub const ALL: [Pass; 6] = [
        Pass::RemoveRedundantRules,
        Pass::RemoveIndirectLeftRecursion,
        Pass::RemoveDirectLeftRecursion,
        Pass::InlineSingleRuleProductions,
        Pass::InlineSingletonProductions,
        Pass::RemoveOptRules,
    ];

    /// The kebab-case name of the pass.
    pub fn name(self) -> &'static str {
        match self {
            Pass::RemoveRedundantRules => "remove-redundant-rules",
            Pass::RemoveIndirectLeftRecursion => "remove-indirect-left-recursion",
            Pass::RemoveDirectLeftRecursion => "remove-direct-left-recursion",
            Pass::InlineSingleRuleProductions => "inline-single-rule-productions",
            Pass::InlineSingletonProductions => "inline-singleton-productions",
            Pass::RemoveOptRules => "remove-opt-rules",
        }
    }

    /// Applies the pass. Cycles left by indirect left-recursion removal are
    /// logged, not returned.
    pub fn apply(self, grammar: &Grammar) -> Result<Grammar, RewriteError> {
        match self {
            Pass::RemoveRedundantRules => grammar.remove_redundant_rules(),
            Pass::RemoveIndirectLeftRecursion => {
                let resolution = grammar.remove_indirect_left_recursion()?;
                if !resolution.is_resolved() {
                    warn!(
                        "{}: left recursion through {} remains",
                        self,
                        resolution.unresolved.keys().join(", ")
                    );
                }
                Ok(resolution.grammar)
            }
            Pass::RemoveDirectLeftRecursion => Ok(grammar.remove_direct_left_recursion()),
            Pass::InlineSingleRuleProductions => grammar.inline_single_rule_productions(),
            Pass::InlineSingletonProductions => grammar.inline_singleton_productions(),
            Pass::RemoveOptRules => grammar.remove_opt_rules(),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pass name that is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown pass `{name}`, expected one of: {}", Pass::ALL.iter().join(", "))]
pub struct UnknownPass {
    /// The name that was given.
    pub name: String,
}

impl FromStr for Pass {
    type Err = UnknownPass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Pass::ALL
            .iter()
            .copied()
            .find(|pass| pass.name() == name)
            .ok_or_else(|| UnknownPass {
                name: name.to_string(),
            })
    }
}

/// An ordered list of passes.
///
/// Parses from and displays as a comma-separated list of pass names.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pipeline {
    passes: Vec<Pass>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new([
            Pass::RemoveRedundantRules,
            Pass::RemoveIndirectLeftRecursion,
            Pass::RemoveDirectLeftRecursion,
            Pass::InlineSingletonProductions,
        ])
    }
}

impl Pipeline {
    /// Creates a pipeline that runs `passes` in order.
    pub fn new(passes: impl IntoIterator<Item = Pass>) -> Self {
        Pipeline {
            passes: passes.into_iter().collect(),
        }
    }

    /// The passes, in order.
    pub fn passes(&self) -> &[Pass] {
        &self.passes[..]
    }

    /// Threads the grammar through every pass.
    ///
    /// Stops at the first pass that fails. A failure to converge carries the
    /// last grammar that pass computed.
    pub fn run(&self, grammar: &Grammar) -> Result<Grammar, RewriteError> {
        let mut current = grammar.clone();
        for (step, &pass) in self.passes.iter().enumerate() {
            let before = current.num_productions();
            current = pass.apply(&current)?;
            info!(
                "[{}/{}] {}: {} -> {} productions",
                step + 1,
                self.passes.len(),
                pass,
                before,
                current.num_productions()
            );
        }
        Ok(current)
    }
}

impl FromIterator<Pass> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Pass>>(iter: I) -> Self {
        Pipeline::new(iter)
    }
}

impl FromStr for Pipeline {
    type Err = UnknownPass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|name| !name.trim().is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.passes.iter().join(","))
    }
}
