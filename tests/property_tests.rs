//! Property-based tests for graph derivation, encoding and search
//!
//! Matrices are kept small so that the chromatic number can be cross-checked
//! by exhaustive enumeration.

use chromatic_rs::encoder::encode;
use chromatic_rs::engine::{rustsat_adapter::RustSatAdapter, SATSolver, SolveResult};
use chromatic_rs::graph::{derive_graph, Graph};
use chromatic_rs::matrix::BooleanMatrix;
use chromatic_rs::search::{ColoringSearch, Options};
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn matrix_strategy(max_rows: usize, max_cols: usize) -> impl Strategy<Value = BooleanMatrix> {
    (0..=max_rows, 0..=max_cols).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(any::<bool>(), rows * cols)
            .prop_map(move |cells| BooleanMatrix::new(rows, cols, cells).unwrap())
    })
}

fn solve(graph: &Graph, k: u32) -> SolveResult {
    let system = encode(graph, k);
    let mut solver = RustSatAdapter::batsat();
    if !solver.load(system.cnf()) {
        return SolveResult::Unsat;
    }
    solver.solve().unwrap()
}

/// Tries every assignment of `k` colors to the nodes
fn is_colorable(graph: &Graph, k: u32) -> bool {
    let n = graph.num_nodes();
    if n == 0 {
        return true;
    }
    if k == 0 {
        return false;
    }
    let mut colors = vec![0u32; n];
    loop {
        let proper = graph.edges().iter().all(|e| {
            let (a, b) = e.endpoints();
            colors[a] != colors[b]
        });
        if proper {
            return true;
        }
        // next assignment in base k
        let mut idx = 0;
        loop {
            if idx == n {
                return false;
            }
            colors[idx] += 1;
            if colors[idx] < k {
                break;
            }
            colors[idx] = 0;
            idx += 1;
        }
    }
}

/// First-fit coloring in node order
fn greedy_coloring(graph: &Graph) -> (u32, Vec<u32>) {
    let mut colors: Vec<Option<u32>> = vec![None; graph.num_nodes()];
    let mut used = 0;
    for node in 0..graph.num_nodes() {
        let taken: Vec<u32> = graph
            .neighbors(node)
            .iter()
            .filter_map(|&n| colors[n])
            .collect();
        let color = (0..).find(|c| !taken.contains(c)).unwrap();
        colors[node] = Some(color);
        used = used.max(color + 1);
    }
    (used, colors.into_iter().map(|c| c.unwrap()).collect())
}

// ============================================================================
// Graph derivation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn edges_match_column_intersection(matrix in matrix_strategy(6, 7)) {
        let graph = derive_graph(&matrix);
        prop_assert_eq!(graph.num_nodes(), matrix.cols());

        for i in 0..matrix.cols() {
            prop_assert!(!graph.has_edge(i, i));
            for j in (i + 1)..matrix.cols() {
                let shared = (0..matrix.rows()).any(|r| matrix.get(r, i) && matrix.get(r, j));
                prop_assert_eq!(graph.has_edge(i, j), shared);
                prop_assert_eq!(graph.has_edge(j, i), shared);
            }
        }
    }

    #[test]
    fn edges_ignore_row_order(matrix in matrix_strategy(6, 7)) {
        let rows: Vec<Vec<bool>> = (0..matrix.rows()).rev().map(|r| matrix.row(r).to_vec()).collect();
        let reversed = if rows.is_empty() {
            matrix.clone()
        } else {
            BooleanMatrix::from_rows(&rows).unwrap()
        };
        let original = derive_graph(&matrix);
        let flipped = derive_graph(&reversed);
        prop_assert_eq!(original.edges(), flipped.edges());
    }

    #[test]
    fn edges_are_sorted_pairs(matrix in matrix_strategy(6, 7)) {
        let graph = derive_graph(&matrix);
        let endpoints: Vec<_> = graph.edges().iter().map(|e| e.endpoints()).collect();
        for window in endpoints.windows(2) {
            prop_assert!(window[0] < window[1]);
        }
        for (a, b) in endpoints {
            prop_assert!(a < b);
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sat_models_are_proper_colorings(matrix in matrix_strategy(5, 6), k in 1u32..5) {
        let graph = derive_graph(&matrix);
        let system = encode(&graph, k);
        let vars = system.variables();

        let mut solver = RustSatAdapter::batsat();
        if solver.load(system.cnf()) && solver.solve().unwrap() == SolveResult::Sat {
            let mut colors = Vec::new();
            for node in 0..graph.num_nodes() {
                let assigned: Vec<u32> = (0..k).filter(|&c| solver.value_of(vars.var(node, c))).collect();
                prop_assert_eq!(assigned.len(), 1);
                colors.push(assigned[0]);
            }
            for edge in graph.edges() {
                let (a, b) = edge.endpoints();
                prop_assert_ne!(colors[a], colors[b]);
            }
        }
    }

    #[test]
    fn greedy_coloring_satisfies_encoding(matrix in matrix_strategy(5, 7), extra in 0u32..3) {
        let graph = derive_graph(&matrix);
        let (used, colors) = greedy_coloring(&graph);
        let system = encode(&graph, used + extra);
        let assignment = system.assignment_for(&colors).unwrap();
        prop_assert!(system.cnf().is_satisfied_by(&assignment));
    }

    #[test]
    fn satisfiability_is_monotone(matrix in matrix_strategy(5, 6), k in 1u32..5) {
        let graph = derive_graph(&matrix);
        if solve(&graph, k) == SolveResult::Sat {
            prop_assert_eq!(solve(&graph, k + 1), SolveResult::Sat);
        }
    }

    #[test]
    fn encoding_agrees_with_enumeration(matrix in matrix_strategy(4, 5), k in 0u32..4) {
        let graph = derive_graph(&matrix);
        let expected = if is_colorable(&graph, k) { SolveResult::Sat } else { SolveResult::Unsat };
        prop_assert_eq!(solve(&graph, k), expected);
    }
}

// ============================================================================
// Search
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn search_finds_chromatic_number(matrix in matrix_strategy(5, 6)) {
        let graph = derive_graph(&matrix);
        let outcome = ColoringSearch::new(Options::default()).solve(&graph).unwrap();
        let coloring = outcome.coloring().unwrap();

        prop_assert!(coloring.is_proper(&graph));
        let k = coloring.num_colors();
        prop_assert!(is_colorable(&graph, k));
        if k > 0 {
            prop_assert!(!is_colorable(&graph, k - 1));
        }
    }

    #[test]
    fn search_never_exceeds_node_count(matrix in matrix_strategy(5, 6)) {
        let graph = derive_graph(&matrix);
        let outcome = ColoringSearch::new(Options::default()).solve(&graph).unwrap();

        prop_assert!(outcome.probes().len() <= graph.num_nodes());
        prop_assert!(outcome.num_colors().unwrap() as usize <= graph.num_nodes());
        for (idx, probe) in outcome.probes().iter().enumerate() {
            prop_assert_eq!(probe.colors(), idx as u32 + 1);
        }
    }

    #[test]
    fn search_respects_greedy_bound(matrix in matrix_strategy(5, 7)) {
        let graph = derive_graph(&matrix);
        let (greedy, _) = greedy_coloring(&graph);
        let outcome = ColoringSearch::new(Options::default()).solve(&graph).unwrap();

        prop_assert!(outcome.num_colors().unwrap() <= greedy);
        prop_assert!(outcome.num_colors().unwrap() as usize <= graph.max_degree() + 1);
    }
}
