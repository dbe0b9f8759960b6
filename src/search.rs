//! Minimum coloring search
//!
//! Iterative deepening over the number of colors: the graph is derived once,
//! then k = 1, 2, ... is encoded and checked with a fresh SAT solver until the
//! first satisfiable k. Because a graph with n nodes is always n-colorable, the
//! loop never needs more than n probes.

use crate::encoder::{encode, ConstraintSystem};
use crate::engine::{rustsat_adapter::RustSatAdapter, SATSolver, SolveResult};
use crate::graph::{derive_graph, derive_row_graph, Edge, Graph, Node};
use crate::matrix::BooleanMatrix;
use crate::{ColoringError, Result};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Which intersection graph to color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphKind {
    /// One node per column, adjacent when sharing a non-zero row
    #[default]
    Columns,
    /// One node per row, adjacent when sharing a non-zero column
    Rows,
}

/// Search options
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Largest color count to probe (None = up to the number of nodes)
    pub max_colors: Option<u32>,
    /// Wall-clock budget for the whole search in milliseconds (None = no timeout)
    ///
    /// Checked before every probe; a running probe is never cut short.
    pub timeout_ms: Option<u64>,
    /// Graph to derive from the matrix
    pub graph: GraphKind,
}

/// A color per node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coloring {
    num_colors: u32,
    colors: Vec<u32>,
}

impl Coloring {
    /// Creates a coloring using colors `0..num_colors`
    pub fn new(num_colors: u32, colors: Vec<u32>) -> Self {
        Self { num_colors, colors }
    }

    /// Number of colors available to this coloring
    pub fn num_colors(&self) -> u32 {
        self.num_colors
    }

    /// Color of a node
    pub fn color_of(&self, node: usize) -> u32 {
        self.colors[node]
    }

    /// Colors indexed by node
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    /// Number of colored nodes
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if no node is colored
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterates over `(node, color)` pairs in node order
    pub fn iter(&self) -> impl Iterator<Item = (Node, u32)> + '_ {
        self.colors
            .iter()
            .enumerate()
            .map(|(idx, &color)| (Node::new(idx), color))
    }

    /// Groups nodes by color; entry `c` lists the nodes with color `c`
    pub fn color_classes(&self) -> Vec<Vec<Node>> {
        let mut classes = vec![Vec::new(); self.num_colors as usize];
        for (node, color) in self.iter() {
            if let Some(class) = classes.get_mut(color as usize) {
                class.push(node);
            }
        }
        classes
    }

    /// Edges whose endpoints share a color
    pub fn conflicts(&self, graph: &Graph) -> Vec<Edge> {
        graph
            .edges()
            .iter()
            .copied()
            .filter(|edge| {
                let (a, b) = edge.endpoints();
                self.colors.get(a).is_some_and(|ca| self.colors.get(b) == Some(ca))
            })
            .collect()
    }

    /// Returns true if every node of `graph` has an in-range color and no edge
    /// is monochromatic
    pub fn is_proper(&self, graph: &Graph) -> bool {
        self.colors.len() == graph.num_nodes()
            && self.colors.iter().all(|&c| c < self.num_colors)
            && self.conflicts(graph).is_empty()
    }
}

/// Statistics collected for one k-probe
#[derive(Debug, Clone)]
pub struct ProbeStatistics {
    colors: u32,
    satisfiable: bool,
    encoding_time: Duration,
    solving_time: Duration,
    num_variables: u32,
    num_clauses: u32,
}

impl ProbeStatistics {
    /// Color count probed
    pub fn colors(&self) -> u32 {
        self.colors
    }

    /// Whether the probe was satisfiable
    pub fn is_sat(&self) -> bool {
        self.satisfiable
    }

    /// Returns encoding time in milliseconds
    pub fn encoding_time(&self) -> u64 {
        self.encoding_time.as_millis() as u64
    }

    /// Returns solving time in milliseconds
    pub fn solving_time(&self) -> u64 {
        self.solving_time.as_millis() as u64
    }

    /// Returns total time in milliseconds
    pub fn total_time(&self) -> u64 {
        self.encoding_time() + self.solving_time()
    }

    /// Returns number of variables
    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// Returns number of clauses
    pub fn num_clauses(&self) -> u32 {
        self.num_clauses
    }
}

/// Result of a search
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// A minimum coloring was found
    Found {
        /// The coloring; `num_colors()` is the chromatic number
        coloring: Coloring,
        /// One entry per probe, in order
        probes: Vec<ProbeStatistics>,
    },
    /// Every color count up to the bound was unsatisfiable
    Exhausted {
        /// The bound that was reached
        max_colors: u32,
        /// One entry per probe, in order
        probes: Vec<ProbeStatistics>,
    },
}

impl SearchOutcome {
    /// Returns true if a coloring was found
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// Returns the coloring if one was found
    pub fn coloring(&self) -> Option<&Coloring> {
        match self {
            SearchOutcome::Found { coloring, .. } => Some(coloring),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    /// Returns the minimum number of colors if one was found
    pub fn num_colors(&self) -> Option<u32> {
        self.coloring().map(Coloring::num_colors)
    }

    /// Returns the per-probe statistics
    pub fn probes(&self) -> &[ProbeStatistics] {
        match self {
            SearchOutcome::Found { probes, .. } => probes,
            SearchOutcome::Exhausted { probes, .. } => probes,
        }
    }
}

/// States of the iterative deepening loop
#[derive(Debug)]
enum SearchState {
    Probing(u32),
    Found(Coloring),
    Exhausted { max_colors: u32 },
}

/// Chromatic number search (uses batsat by default)
pub struct ColoringSearch {
    options: Options,
}

impl ColoringSearch {
    /// Creates a new search with the given options
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Returns the options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Derives the graph selected by the options
    pub fn derive(&self, matrix: &BooleanMatrix) -> Graph {
        match self.options.graph {
            GraphKind::Columns => derive_graph(matrix),
            GraphKind::Rows => derive_row_graph(matrix),
        }
    }

    /// Finds a minimum coloring of the matrix's intersection graph
    pub fn find_minimum_coloring(&self, matrix: &BooleanMatrix) -> Result<SearchOutcome> {
        self.find_minimum_coloring_with(matrix, RustSatAdapter::batsat, |_| {})
    }

    /// Derives the intersection graph of `matrix` and colors it with a custom
    /// SAT solver, see [`ColoringSearch::solve_with`]
    pub fn find_minimum_coloring_with<S, F, P>(
        &self,
        matrix: &BooleanMatrix,
        new_solver: F,
        on_probe: P,
    ) -> Result<SearchOutcome>
    where
        S: SATSolver,
        F: FnMut() -> S,
        P: FnMut(u32),
    {
        let graph = self.derive(matrix);
        info!(
            rows = matrix.rows(),
            cols = matrix.cols(),
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            "derived intersection graph"
        );
        self.solve_with(&graph, new_solver, on_probe)
    }

    /// Finds a minimum coloring of `graph` using batsat
    pub fn solve(&self, graph: &Graph) -> Result<SearchOutcome> {
        self.solve_with(graph, RustSatAdapter::batsat, |_| {})
    }

    /// Finds a minimum coloring of `graph` with a custom SAT solver
    ///
    /// `new_solver` is called once per probe; `on_probe` is told the color
    /// count before each probe starts.
    pub fn solve_with<S, F, P>(
        &self,
        graph: &Graph,
        mut new_solver: F,
        mut on_probe: P,
    ) -> Result<SearchOutcome>
    where
        S: SATSolver,
        F: FnMut() -> S,
        P: FnMut(u32),
    {
        let start = Instant::now();
        let num_nodes = graph.num_nodes();
        let mut probes = Vec::new();

        let mut state = if num_nodes == 0 {
            SearchState::Found(Coloring::new(0, Vec::new()))
        } else if self.options.max_colors == Some(0) {
            SearchState::Exhausted { max_colors: 0 }
        } else {
            SearchState::Probing(1)
        };

        loop {
            state = match state {
                SearchState::Probing(k) => {
                    self.check_budget(start, k)?;
                    info!(colors = k, "attempting with {} colors", k);
                    on_probe(k);

                    let mut solver = new_solver();
                    let (coloring, stats) = probe(graph, k, &mut solver, start)?;
                    probes.push(stats);

                    match coloring {
                        Some(coloring) => SearchState::Found(coloring),
                        None if k as usize >= num_nodes => {
                            return Err(ColoringError::EncodingInconsistency(format!(
                                "no {k}-coloring found for a graph of {num_nodes} nodes"
                            )));
                        }
                        None if self.options.max_colors.is_some_and(|max| k >= max) => {
                            SearchState::Exhausted { max_colors: k }
                        }
                        None => SearchState::Probing(k + 1),
                    }
                }
                SearchState::Found(coloring) => {
                    info!(colors = coloring.num_colors(), probes = probes.len(), "coloring found");
                    return Ok(SearchOutcome::Found { coloring, probes });
                }
                SearchState::Exhausted { max_colors } => {
                    info!(max_colors, "no coloring within bound");
                    return Ok(SearchOutcome::Exhausted { max_colors, probes });
                }
            };
        }
    }

    fn check_budget(&self, start: Instant, colors: u32) -> Result<()> {
        let Some(timeout_ms) = self.options.timeout_ms else {
            return Ok(());
        };
        let elapsed = start.elapsed();
        if elapsed >= Duration::from_millis(timeout_ms) {
            warn!(colors, timeout_ms, "time budget exceeded");
            return Err(ColoringError::ResourceExhausted {
                colors,
                elapsed_ms: elapsed.as_millis() as u64,
            });
        }
        Ok(())
    }
}

/// Encodes and checks one color count
fn probe<S: SATSolver>(
    graph: &Graph,
    colors: u32,
    solver: &mut S,
    start: Instant,
) -> Result<(Option<Coloring>, ProbeStatistics)> {
    let encoding_start = Instant::now();
    let system = encode(graph, colors);
    let encoding_time = encoding_start.elapsed();

    let counts = system.family_counts();
    debug!(
        colors,
        variables = system.cnf().num_variables,
        clauses = system.cnf().num_clauses(),
        adjacent_not_same_color = counts.adjacent_not_same_color,
        at_least_one_color = counts.at_least_one_color,
        at_most_one_color = counts.at_most_one_color,
        "encoded coloring constraints"
    );

    let solving_start = Instant::now();
    let result = if solver.load(system.cnf()) {
        solver.solve()?
    } else {
        SolveResult::Unsat
    };
    let solving_time = solving_start.elapsed();

    let stats = ProbeStatistics {
        colors,
        satisfiable: result == SolveResult::Sat,
        encoding_time,
        solving_time,
        num_variables: system.cnf().num_variables,
        num_clauses: system.cnf().num_clauses() as u32,
    };
    debug!(colors, ?result, solving_ms = stats.solving_time(), "probe finished");

    match result {
        SolveResult::Sat => {
            let coloring = extract_coloring(solver, &system, graph)?;
            Ok((Some(coloring), stats))
        }
        SolveResult::Unsat => Ok((None, stats)),
        SolveResult::Interrupted => {
            warn!(colors, "solver interrupted");
            Err(ColoringError::ResourceExhausted {
                colors,
                elapsed_ms: start.elapsed().as_millis() as u64,
            })
        }
    }
}

/// Reads the coloring out of a satisfying model
///
/// Every node must have exactly one true color variable and the decoded
/// coloring must be proper.
fn extract_coloring<S: SATSolver>(
    solver: &S,
    system: &ConstraintSystem,
    graph: &Graph,
) -> Result<Coloring> {
    let vars = system.variables();
    let mut colors = Vec::with_capacity(graph.num_nodes());

    for node in 0..graph.num_nodes() {
        let assigned: Vec<u32> = (0..vars.num_colors())
            .filter(|&color| solver.value_of(vars.var(node, color)))
            .collect();

        match assigned.as_slice() {
            [color] => {
                trace!(node, color, "extracted color");
                colors.push(*color);
            }
            [] => {
                return Err(ColoringError::EncodingInconsistency(format!(
                    "node {node} has no color in the model"
                )));
            }
            many => {
                return Err(ColoringError::EncodingInconsistency(format!(
                    "node {node} has colors {many:?} in the model"
                )));
            }
        }
    }

    let coloring = Coloring::new(vars.num_colors(), colors);
    if let Some(edge) = coloring.conflicts(graph).first() {
        let (a, b) = edge.endpoints();
        return Err(ColoringError::EncodingInconsistency(format!(
            "adjacent nodes {a} and {b} share color {}",
            coloring.color_of(a)
        )));
    }
    Ok(coloring)
}

/// Finds a minimum coloring of the column intersection graph of `matrix`
///
/// Convenience wrapper around [`ColoringSearch`] with the batsat backend.
pub fn find_minimum_coloring(
    matrix: &BooleanMatrix,
    max_colors: Option<u32>,
) -> Result<SearchOutcome> {
    let options = Options {
        max_colors,
        ..Options::default()
    };
    ColoringSearch::new(options).find_minimum_coloring(matrix)
}
