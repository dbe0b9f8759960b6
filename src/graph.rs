//! Intersection graphs
//!
//! Columns of a sparsity matrix become nodes; two columns are adjacent when
//! they are both non-zero in at least one row. The graph is computed once per
//! run and shared by every k-probe of the search.

use crate::matrix::BooleanMatrix;
use rustc_hash::FxHashSet;
use std::fmt;

/// A graph node, identified by its matrix column (or row) index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node(usize);

impl Node {
    /// Creates a node with the given index
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the node index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Unordered edge, stored with `lo < hi`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    lo: usize,
    hi: usize,
}

impl Edge {
    /// Creates an edge between two distinct nodes
    ///
    /// # Panics
    /// Panics if `a == b`.
    pub fn new(a: usize, b: usize) -> Self {
        assert_ne!(a, b, "self loop on node {a}");
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Returns the endpoints as `(smaller, larger)`
    pub fn endpoints(self) -> (usize, usize) {
        (self.lo, self.hi)
    }
}

/// Undirected simple graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
    edge_index: FxHashSet<Edge>,
}

impl Graph {
    /// Creates a graph with `num_nodes` nodes and the given edges
    ///
    /// Duplicate edges are dropped; edges are kept in sorted order.
    ///
    /// # Panics
    /// Panics if an edge refers to a node `>= num_nodes` or is a self loop.
    pub fn new(num_nodes: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut graph = Self {
            nodes: (0..num_nodes).map(Node::new).collect(),
            edges: Vec::new(),
            adjacency: vec![Vec::new(); num_nodes],
            edge_index: FxHashSet::default(),
        };

        let mut sorted: Vec<Edge> = edges.into_iter().map(|(a, b)| Edge::new(a, b)).collect();
        sorted.sort_unstable();
        sorted.dedup();
        for edge in sorted {
            graph.insert(edge);
        }
        graph
    }

    fn insert(&mut self, edge: Edge) {
        let (lo, hi) = edge.endpoints();
        assert!(
            hi < self.nodes.len(),
            "edge ({lo}, {hi}) outside graph of {} nodes",
            self.nodes.len()
        );
        if self.edge_index.insert(edge) {
            self.edges.push(edge);
            self.adjacency[lo].push(hi);
            self.adjacency[hi].push(lo);
        }
    }

    /// Nodes in index order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in lexicographic order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `a` and `b` are adjacent (in either order)
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a != b && self.edge_index.contains(&Edge::new(a, b))
    }

    /// Neighbors of a node
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Degree of a node
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Largest degree in the graph (0 for an empty graph)
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Derives the column intersection graph of a matrix
///
/// Columns `i < j` are adjacent iff some row is true in both.
pub fn derive_graph(matrix: &BooleanMatrix) -> Graph {
    let cols = matrix.cols();
    let columns: Vec<Vec<bool>> = (0..cols).map(|c| matrix.column(c).collect()).collect();

    let mut edges = Vec::new();
    for i in 0..cols {
        for j in (i + 1)..cols {
            let shared = columns[i]
                .iter()
                .zip(&columns[j])
                .any(|(&a, &b)| a && b);
            if shared {
                edges.push((i, j));
            }
        }
    }

    Graph::new(cols, edges)
}

/// Derives the row intersection graph of a matrix
///
/// Rows `i < j` are adjacent iff some column is true in both.
pub fn derive_row_graph(matrix: &BooleanMatrix) -> Graph {
    derive_graph(&matrix.transpose())
}
