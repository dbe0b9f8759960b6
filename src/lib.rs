//! # chromatic-rs
//!
//! Minimum coloring of sparse-matrix intersection graphs.
//!
//! A 0/1 sparsity pattern induces a graph with one node per column, where two
//! columns are adjacent when they share a non-zero row. The chromatic number of
//! that graph is found by iterative deepening: for k = 1, 2, ... the question
//! "is the graph k-colorable?" is encoded as CNF and handed to a SAT solver,
//! and the first satisfiable k wins.
//!
//! ## Example
//!
//! ```rust
//! use chromatic_rs::matrix::parse_matrix;
//! use chromatic_rs::search::{ColoringSearch, Options, SearchOutcome};
//!
//! let matrix = parse_matrix("110\n011\n101").unwrap();
//! let search = ColoringSearch::new(Options::default());
//!
//! match search.find_minimum_coloring(&matrix).unwrap() {
//!     SearchOutcome::Found { coloring, .. } => assert_eq!(coloring.num_colors(), 3),
//!     SearchOutcome::Exhausted { .. } => unreachable!(),
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2024_compatibility)]

/// Boolean sparsity matrices and their text format
pub mod matrix;

/// Intersection graphs derived from matrices
pub mod graph;

/// Clause container with DIMACS-style literals
pub mod cnf;

/// CNF encoding of proper k-coloring
pub mod encoder;

/// SAT solver trait and backends
pub mod engine;

/// Iterative-deepening search for the chromatic number
pub mod search;

/// Error types
pub mod error {
    //! Error types for chromatic-rs

    use thiserror::Error;

    /// Errors that can occur while reading a matrix or searching for a coloring
    #[derive(Error, Debug)]
    pub enum ColoringError {
        /// A matrix row does not match the width of the rows before it
        #[error("malformed input at line {line}: expected {expected} entries, found {found}")]
        MalformedInput {
            /// 1-based line number in the source text
            line: usize,
            /// Width established by the first row
            expected: usize,
            /// Width of the offending row
            found: usize,
        },

        /// The solver model does not decode to a proper coloring
        #[error("encoding inconsistency: {0}")]
        EncodingInconsistency(String),

        /// The search ran out of its time budget or the backend gave up
        #[error("resource exhausted while probing {colors} colors after {elapsed_ms} ms")]
        ResourceExhausted {
            /// Color count being probed when the budget ran out
            colors: u32,
            /// Wall-clock time spent so far
            elapsed_ms: u64,
        },

        /// The SAT backend reported an error
        #[error("solver error: {0}")]
        Solver(String),

        /// Invalid argument
        #[error("invalid argument: {0}")]
        InvalidArgument(String),

        /// Reading the input failed
        #[error(transparent)]
        Io(#[from] std::io::Error),
    }

    /// Result type for chromatic-rs operations
    pub type Result<T> = std::result::Result<T, ColoringError>;
}

// Re-export commonly used types
pub use error::{ColoringError, Result};
pub use graph::{derive_graph, derive_row_graph, Graph};
pub use matrix::{parse_matrix, BooleanMatrix};
pub use search::{find_minimum_coloring, Coloring, ColoringSearch, SearchOutcome};
