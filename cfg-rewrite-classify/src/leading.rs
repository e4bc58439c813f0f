use cfg_rewrite_grammar::{Grammar, Symbol, SymbolBitMatrix, SymbolBitSet, SymbolKind};

/// For each production, the distinct nonterminals that lead one of its
/// alternatives.
///
/// Only the first symbol of every alternative is considered. Terminals and
/// `__empty` are never part of the graph. A production belongs to the graph
/// iff it has at least one edge.
#[derive(Clone, Debug)]
pub struct LeadingGraph<'g> {
    grammar: &'g Grammar,
    edges: SymbolBitMatrix<'g>,
    nodes: SymbolBitSet<'g>,
}

impl<'g> LeadingGraph<'g> {
    /// Computes the graph for a grammar.
    pub fn new(grammar: &'g Grammar) -> Self {
        let mut edges = SymbolBitMatrix::new(grammar);
        let mut nodes = SymbolBitSet::new(grammar);
        for (lhs, rule) in grammar.rules() {
            let leading = rule.leading();
            match grammar.kind_of(leading) {
                SymbolKind::NonTerminal => {
                    edges.set(lhs, leading, true);
                    nodes.set(lhs, true);
                }
                SymbolKind::Terminal | SymbolKind::Epsilon => {}
            }
        }
        LeadingGraph {
            grammar,
            edges,
            nodes,
        }
    }

    /// The grammar this graph was computed for.
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Productions with at least one leading nonterminal.
    pub fn nodes(&self) -> &SymbolBitSet<'g> {
        &self.nodes
    }

    /// The underlying relation.
    pub fn edges(&self) -> &SymbolBitMatrix<'g> {
        &self.edges
    }

    /// Checks whether some alternative of `from` leads with `to`.
    pub fn has_edge(&self, from: &Symbol, to: &Symbol) -> bool {
        self.edges.contains(from, to)
    }

    /// Iterates over the nonterminals leading the alternatives of `lhs`, in
    /// grammar order.
    pub fn leading(&self, lhs: &Symbol) -> impl Iterator<Item = &'g Symbol> + '_ {
        self.edges.iter_row_syms(lhs)
    }

    /// Iterates over the nodes and their edge sets.
    pub fn iter(&self) -> impl Iterator<Item = (&'g Symbol, Vec<&'g Symbol>)> + '_ {
        self.nodes
            .iter()
            .map(move |lhs| (lhs, self.leading(lhs).collect()))
    }

    /// Checks whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_clear()
    }
}
