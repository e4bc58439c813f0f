use log::{debug, trace};

use cfg_rewrite_grammar::{
    Grammar, Productions, RewriteError, SymbolBitMatrix, SymbolBitSet, MAX_ROUNDS,
};

use crate::leading::LeadingGraph;

/// Detection of left recursion through the leading-symbol graph.
pub struct LeftRecursion<'g> {
    grammar: &'g Grammar,
    graph: LeadingGraph<'g>,
}

impl<'g> LeftRecursion<'g> {
    /// Analyzes a grammar.
    pub fn new(grammar: &'g Grammar) -> Self {
        LeftRecursion {
            grammar,
            graph: LeadingGraph::new(grammar),
        }
    }

    /// Returns the leading-symbol graph.
    pub fn graph(&self) -> &LeadingGraph<'g> {
        &self.graph
    }

    /// Returns the set of productions that have a self-loop in the graph.
    pub fn direct_set(&self) -> SymbolBitSet<'g> {
        let mut direct = SymbolBitSet::new(self.grammar);
        for lhs in self.graph.nodes().iter() {
            if self.graph.has_edge(lhs, lhs) {
                direct.set(lhs, true);
            }
        }
        direct
    }

    /// Returns the directly left-recursive productions, in grammar order.
    ///
    /// An empty map means there is no direct left recursion.
    pub fn direct(&self) -> Productions {
        self.sub_productions(&self.direct_set())
    }

    /// Returns the productions that take part in indirect left recursion.
    ///
    /// Starting from all nodes without self-loops, keeps only the nodes that
    /// are targets of some edge, restricts edges to the kept nodes and drops
    /// nodes left without edges, until nothing changes. This approximates the
    /// maximal cyclic subgraph. An empty map means no indirect recursion was
    /// detected, not that there is none.
    pub fn indirect(&self) -> Result<Productions, RewriteError> {
        let mut nodes = self.graph.nodes().clone();
        nodes.subtract(&self.direct_set());
        let mut edges: SymbolBitMatrix<'g> = self.graph.edges().clone();

        for round in 1..=MAX_ROUNDS {
            let mut targets = SymbolBitSet::new(self.grammar);
            for node in nodes.iter() {
                for target in edges.iter_row_syms(node) {
                    targets.set(target, true);
                }
            }

            let mut kept = nodes.clone();
            let mut changed = false;
            for node in nodes.iter() {
                if !targets.contains(node) {
                    trace!("`{}` is not led to by any candidate", node);
                    kept.set(node, false);
                    changed = true;
                }
            }

            let kept_syms: Vec<_> = kept.iter().collect();
            for &node in &kept_syms {
                let row: Vec<_> = edges.iter_row_syms(node).collect();
                for target in row {
                    if !kept.contains(target) {
                        edges.set(node, target, false);
                        changed = true;
                    }
                }
            }
            for &node in &kept_syms {
                if edges.iter_row_syms(node).next().is_none() {
                    kept.set(node, false);
                    changed = true;
                }
            }

            nodes = kept;
            if !changed {
                debug!(
                    "indirect left recursion: {} productions after {} rounds",
                    nodes.count(),
                    round
                );
                return Ok(self.sub_productions(&nodes));
            }
        }

        Err(RewriteError::did_not_converge(
            "indirect_left_recursive",
            MAX_ROUNDS,
            self.grammar.clone(),
        ))
    }

    fn sub_productions(&self, set: &SymbolBitSet<'g>) -> Productions {
        set.iter()
            .filter_map(|lhs| {
                self.grammar
                    .rules_of(lhs)
                    .map(|rules| (lhs.clone(), rules.to_vec()))
            })
            .collect()
    }
}
