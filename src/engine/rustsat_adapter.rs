//! Adapters for rustsat solver backends
//!
//! Provides adapters to use rustsat-compatible SAT solvers as coloring oracles.

use super::{SATSolver, SolveResult};
use crate::{ColoringError, Result};
use rustsat::solvers::{Solve, SolverResult};
use rustsat::types::{Assignment, Clause, Lit, TernaryVal, Var};

/// Adapter that wraps rustsat solvers to implement our SATSolver trait
///
/// This allows any rustsat-compatible solver to be used by the search.
///
/// # Example
///
/// ```ignore
/// use rustsat_batsat::BasicSolver;
/// let solver = RustSatAdapter::new(BasicSolver::default());
/// ```
pub struct RustSatAdapter<S> {
    solver: S,
    num_vars: u32,
    num_clauses: u32,
    max_var_seen: u32,
    trivially_unsat: bool,
    model: Option<Assignment>,
}

impl<S> RustSatAdapter<S> {
    /// Creates a new adapter wrapping the given solver
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            num_vars: 0,
            num_clauses: 0,
            max_var_seen: 0,
            trivially_unsat: false,
            model: None,
        }
    }

    /// Returns the wrapped solver
    pub fn into_inner(self) -> S {
        self.solver
    }
}

impl RustSatAdapter<rustsat_batsat::BasicSolver> {
    /// Creates an adapter around a default batsat solver
    pub fn batsat() -> Self {
        Self::new(rustsat_batsat::BasicSolver::default())
    }
}

fn to_lit(lit: i32) -> Lit {
    let var = Var::new(lit.unsigned_abs() - 1);
    if lit > 0 {
        var.pos_lit()
    } else {
        var.neg_lit()
    }
}

impl<S: Solve> SATSolver for RustSatAdapter<S> {
    fn add_variables(&mut self, num_vars: u32) {
        // RustSat auto-creates variables as needed when clauses are added
        // Just track the count for our interface
        self.num_vars += num_vars;
    }

    fn add_clause(&mut self, lits: &[i32]) -> bool {
        self.num_clauses += 1;
        self.model = None;

        if lits.is_empty() {
            self.trivially_unsat = true;
            return false;
        }

        for &lit in lits {
            let var = lit.unsigned_abs();
            debug_assert!(var != 0, "literal 0 is not a variable");
            debug_assert!(var - 1 <= Var::MAX_IDX, "variable {var} exceeds rustsat range");
            self.max_var_seen = self.max_var_seen.max(var);
        }

        let lits_vec: Vec<Lit> = lits.iter().map(|&lit| to_lit(lit)).collect();
        let clause = Clause::from(&lits_vec[..]);
        if self.solver.add_clause(clause).is_err() {
            self.trivially_unsat = true;
            return false;
        }
        true
    }

    fn solve(&mut self) -> Result<SolveResult> {
        self.model = None;
        if self.trivially_unsat {
            return Ok(SolveResult::Unsat);
        }

        let result = self
            .solver
            .solve()
            .map_err(|e| ColoringError::Solver(e.to_string()))?;

        match result {
            SolverResult::Sat => {
                if self.max_var_seen > 0 {
                    let assignment = self
                        .solver
                        .solution(Var::new(self.max_var_seen - 1))
                        .map_err(|e| ColoringError::Solver(e.to_string()))?;
                    self.model = Some(assignment);
                }
                Ok(SolveResult::Sat)
            }
            SolverResult::Unsat => Ok(SolveResult::Unsat),
            SolverResult::Interrupted => Ok(SolveResult::Interrupted),
        }
    }

    fn value_of(&self, var: u32) -> bool {
        if var == 0 || var > self.max_var_seen {
            return false;
        }
        match &self.model {
            Some(assignment) => matches!(assignment.var_value(Var::new(var - 1)), TernaryVal::True),
            None => false,
        }
    }

    fn num_variables(&self) -> u32 {
        self.num_vars
    }

    fn num_clauses(&self) -> u32 {
        self.num_clauses
    }
}
