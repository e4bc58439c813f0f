//! Source of fresh helper names.

use crate::Symbol;

/// A deterministic source of helper symbols derived from one base name.
///
/// Generates `base_1`, `base_2`, ... in order, skipping any name the caller
/// reports as taken. Running the same rewrite twice on the same grammar gives the
/// same names.
#[derive(Clone, Debug)]
pub struct FreshNames {
    base: Symbol,
    next_id: u32,
}

impl FreshNames {
    /// Creates a source of names derived from `base`.
    pub fn new(base: &Symbol) -> Self {
        FreshNames {
            base: base.clone(),
            next_id: 1,
        }
    }

    /// Generates a new symbol for which `taken` returns false.
    pub fn next_sym(&mut self, mut taken: impl FnMut(&Symbol) -> bool) -> Symbol {
        loop {
            let candidate = Symbol::name(format!("{}_{}", self.base.as_str(), self.next_id));
            self.next_id += 1;
            if !taken(&candidate) {
                return candidate;
            }
        }
    }

    /// Returns the number of names generated or skipped so far.
    pub fn num_generated(&self) -> u32 {
        self.next_id - 1
    }
}
