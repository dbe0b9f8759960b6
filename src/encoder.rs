//! CNF encoding of proper k-coloring
//!
//! One boolean variable per `(node, color)` pair, true iff the node takes that
//! color. Three clause families pin the assignment down to proper colorings:
//!
//! - adjacent nodes never share a color
//! - every node has at least one color
//! - no node has two colors
//!
//! The translation is direct; no symmetry breaking or variable elimination.

use crate::cnf::CNF;
use crate::graph::Graph;
use crate::{ColoringError, Result};

/// Variable numbering for a `(node, color)` grid
///
/// Variables start at 1 (DIMACS convention) and are laid out node-major:
/// `var(n, c) = n * k + c + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorVariables {
    num_nodes: usize,
    num_colors: u32,
}

impl ColorVariables {
    /// Largest variable a grid may use; literals are `i32`
    pub const MAX_VARIABLES: u32 = i32::MAX as u32;

    /// Creates the numbering for `num_nodes` nodes and `num_colors` colors
    ///
    /// The grid must fit in [`Self::MAX_VARIABLES`] variables.
    pub fn new(num_nodes: usize, num_colors: u32) -> Self {
        debug_assert!(
            u32::try_from(num_nodes)
                .ok()
                .and_then(|n| n.checked_mul(num_colors))
                .is_some_and(|total| total <= Self::MAX_VARIABLES),
            "{num_nodes} nodes x {num_colors} colors exceeds {} variables",
            Self::MAX_VARIABLES
        );
        Self {
            num_nodes,
            num_colors,
        }
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of colors
    pub fn num_colors(&self) -> u32 {
        self.num_colors
    }

    /// Returns the variable for `node` having `color`
    pub fn var(&self, node: usize, color: u32) -> u32 {
        debug_assert!(node < self.num_nodes && color < self.num_colors);
        node as u32 * self.num_colors + color + 1
    }

    /// Returns the positive literal for `node` having `color`
    pub fn lit(&self, node: usize, color: u32) -> i32 {
        self.var(node, color) as i32
    }

    /// Maps a variable back to its `(node, color)` pair
    pub fn decode(&self, var: u32) -> Option<(usize, u32)> {
        if var == 0 || var > self.total_variables() {
            return None;
        }
        let idx = var - 1;
        Some(((idx / self.num_colors) as usize, idx % self.num_colors))
    }

    /// Returns the total number of variables
    pub fn total_variables(&self) -> u32 {
        self.num_nodes as u32 * self.num_colors
    }
}

/// The clause families of the encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseFamily {
    /// `!var(i,c) | !var(j,c)` for every edge and color
    AdjacentNotSameColor,
    /// `var(n,0) | ... | var(n,k-1)` for every node
    AtLeastOneColor,
    /// `!var(n,c1) | !var(n,c2)` for every node and color pair
    AtMostOneColor,
}

/// Clause counts per family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilyCounts {
    /// Adjacent-not-same-color clauses
    pub adjacent_not_same_color: usize,
    /// At-least-one-color clauses
    pub at_least_one_color: usize,
    /// At-most-one-color clauses
    pub at_most_one_color: usize,
}

impl FamilyCounts {
    /// Count for one family
    pub fn get(&self, family: ClauseFamily) -> usize {
        match family {
            ClauseFamily::AdjacentNotSameColor => self.adjacent_not_same_color,
            ClauseFamily::AtLeastOneColor => self.at_least_one_color,
            ClauseFamily::AtMostOneColor => self.at_most_one_color,
        }
    }

    /// Sum over all families
    pub fn total(&self) -> usize {
        self.adjacent_not_same_color + self.at_least_one_color + self.at_most_one_color
    }
}

/// Encoded k-coloring question for one graph
#[derive(Debug, Clone)]
pub struct ConstraintSystem {
    variables: ColorVariables,
    cnf: CNF,
    counts: FamilyCounts,
}

impl ConstraintSystem {
    /// Variable numbering
    pub fn variables(&self) -> ColorVariables {
        self.variables
    }

    /// Number of colors this system encodes
    pub fn num_colors(&self) -> u32 {
        self.variables.num_colors()
    }

    /// The clauses
    pub fn cnf(&self) -> &CNF {
        &self.cnf
    }

    /// Clause counts per family
    pub fn family_counts(&self) -> FamilyCounts {
        self.counts
    }

    /// Builds the boolean assignment that corresponds to a coloring
    ///
    /// `colors[n]` is the color of node `n`. The result is indexed by
    /// `var - 1`, ready for [`CNF::is_satisfied_by`].
    pub fn assignment_for(&self, colors: &[u32]) -> Result<Vec<bool>> {
        if colors.len() != self.variables.num_nodes() {
            return Err(ColoringError::InvalidArgument(format!(
                "coloring covers {} nodes, graph has {}",
                colors.len(),
                self.variables.num_nodes()
            )));
        }

        let mut assignment = vec![false; self.variables.total_variables() as usize];
        for (node, &color) in colors.iter().enumerate() {
            if color >= self.num_colors() {
                return Err(ColoringError::InvalidArgument(format!(
                    "color {color} of node {node} outside [0, {})",
                    self.num_colors()
                )));
            }
            assignment[self.variables.var(node, color) as usize - 1] = true;
        }
        Ok(assignment)
    }
}

/// Encodes "can `graph` be properly colored with `num_colors` colors?"
///
/// With zero colors and at least one node, every at-least-one-color clause
/// is empty, so the system is unsatisfiable.
pub fn encode(graph: &Graph, num_colors: u32) -> ConstraintSystem {
    let variables = ColorVariables::new(graph.num_nodes(), num_colors);
    let mut cnf = CNF::with_variables(variables.total_variables());
    let mut counts = FamilyCounts::default();

    for edge in graph.edges() {
        let (i, j) = edge.endpoints();
        for color in 0..num_colors {
            cnf.add_clause(vec![-variables.lit(i, color), -variables.lit(j, color)]);
            counts.adjacent_not_same_color += 1;
        }
    }

    for node in 0..graph.num_nodes() {
        let clause = (0..num_colors).map(|color| variables.lit(node, color)).collect();
        cnf.add_clause(clause);
        counts.at_least_one_color += 1;
    }

    for node in 0..graph.num_nodes() {
        for c1 in 0..num_colors {
            for c2 in (c1 + 1)..num_colors {
                cnf.add_clause(vec![-variables.lit(node, c1), -variables.lit(node, c2)]);
                counts.at_most_one_color += 1;
            }
        }
    }

    ConstraintSystem {
        variables,
        cnf,
        counts,
    }
}
