//! SAT solver trait and implementations

pub mod rustsat_adapter;

use crate::cnf::CNF;
use crate::Result;

/// Outcome of a satisfiability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    /// A model exists and can be read with [`SATSolver::value_of`]
    Sat,
    /// No model exists
    Unsat,
    /// The backend stopped before deciding (limit reached, interrupt)
    Interrupted,
}

/// Core SAT solver trait
///
/// This trait defines the interface that all SAT solver backends must implement.
/// Variables are 1-indexed, and literals are represented as signed integers
/// (positive for true, negative for false).
pub trait SATSolver {
    /// Adds the given number of variables to the solver
    fn add_variables(&mut self, num_vars: u32);

    /// Adds a clause to the solver
    ///
    /// Returns false if the clause is trivially unsatisfiable
    ///
    /// # Arguments
    /// * `lits` - Slice of literals (1-indexed, negated by sign)
    fn add_clause(&mut self, lits: &[i32]) -> bool;

    /// Solves the current formula
    ///
    /// A check the backend gave up on is `Interrupted`, never `Unsat`;
    /// backend failures are errors.
    fn solve(&mut self) -> Result<SolveResult>;

    /// Returns the assignment of a variable in the solution
    ///
    /// Only valid after solve() returns `Sat`. Variables are 1-indexed;
    /// unassigned variables read as false.
    fn value_of(&self, var: u32) -> bool;

    /// Returns the number of variables in the solver
    fn num_variables(&self) -> u32;

    /// Returns the number of clauses added
    fn num_clauses(&self) -> u32;

    /// Declares the variables of `cnf` and adds all of its clauses
    ///
    /// Returns false if some clause was rejected as trivially unsatisfiable.
    fn load(&mut self, cnf: &CNF) -> bool {
        self.add_variables(cnf.num_variables);
        let mut consistent = true;
        for clause in &cnf.clauses {
            consistent &= self.add_clause(clause);
        }
        consistent
    }
}

/// A scripted SAT solver for testing
///
/// This solver doesn't actually solve anything - it records variables and
/// clauses and answers with a preset result and model. Useful for driving the
/// search through paths a real backend never takes.
#[derive(Debug, Clone)]
pub struct ScriptedSolver {
    num_vars: u32,
    clauses: Vec<Vec<i32>>,
    result: SolveResult,
    model: Vec<bool>,
}

impl ScriptedSolver {
    /// Creates a solver that answers `Unsat`
    pub fn unsat() -> Self {
        Self {
            num_vars: 0,
            clauses: Vec::new(),
            result: SolveResult::Unsat,
            model: Vec::new(),
        }
    }

    /// Creates a solver that answers `Sat` with the given model
    ///
    /// `model[v - 1]` is the value of variable `v`.
    pub fn sat(model: Vec<bool>) -> Self {
        Self {
            result: SolveResult::Sat,
            model,
            ..Self::unsat()
        }
    }

    /// Creates a solver that answers `Interrupted`
    pub fn interrupted() -> Self {
        Self {
            result: SolveResult::Interrupted,
            ..Self::unsat()
        }
    }

    /// Clauses received so far
    pub fn clauses(&self) -> &[Vec<i32>] {
        &self.clauses
    }
}

impl Default for ScriptedSolver {
    fn default() -> Self {
        Self::unsat()
    }
}

impl SATSolver for ScriptedSolver {
    fn add_variables(&mut self, num_vars: u32) {
        self.num_vars += num_vars;
    }

    fn add_clause(&mut self, lits: &[i32]) -> bool {
        self.clauses.push(lits.to_vec());
        !lits.is_empty()
    }

    fn solve(&mut self) -> Result<SolveResult> {
        Ok(self.result)
    }

    fn value_of(&self, var: u32) -> bool {
        if var == 0 || var > self.num_vars {
            false
        } else {
            self.model.get((var - 1) as usize).copied().unwrap_or(false)
        }
    }

    fn num_variables(&self) -> u32 {
        self.num_vars
    }

    fn num_clauses(&self) -> u32 {
        self.clauses.len() as u32
    }
}
