//! Clause container
//!
//! Literals follow the DIMACS convention: variables are 1-indexed and a
//! negative literal is the negation of its variable.

/// CNF representation
#[derive(Debug, Clone, Default)]
pub struct CNF {
    /// Number of variables
    pub num_variables: u32,
    /// CNF clauses (each clause is a vec of literals, negative = negated)
    pub clauses: Vec<Vec<i32>>,
}

impl CNF {
    /// Creates a new empty CNF
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty CNF over a fixed number of variables
    pub fn with_variables(num_variables: u32) -> Self {
        Self {
            num_variables,
            clauses: Vec::new(),
        }
    }

    /// Adds a clause to the CNF
    ///
    /// An empty clause is kept as is and makes the formula unsatisfiable.
    pub fn add_clause(&mut self, clause: Vec<i32>) {
        // Update max variable
        for &lit in &clause {
            let var = lit.unsigned_abs();
            if var > self.num_variables {
                self.num_variables = var;
            }
        }
        self.clauses.push(clause);
    }

    /// Number of clauses
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Total number of literal occurrences
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Vec::len).sum()
    }

    /// Returns true if any clause is empty
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Vec::is_empty)
    }

    /// Evaluates the formula under a total assignment
    ///
    /// `assignment[v - 1]` is the value of variable `v`; variables past the end
    /// of the slice read as false.
    pub fn is_satisfied_by(&self, assignment: &[bool]) -> bool {
        self.clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let value = assignment
                    .get(lit.unsigned_abs() as usize - 1)
                    .copied()
                    .unwrap_or(false);
                if lit > 0 { value } else { !value }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_clause_tracks_max_variable() {
        let mut cnf = CNF::new();
        cnf.add_clause(vec![1, -3]);
        cnf.add_clause(vec![-2]);
        assert_eq!(cnf.num_variables, 3);
        assert_eq!(cnf.num_clauses(), 2);
        assert_eq!(cnf.num_literals(), 3);
    }

    #[test]
    fn declared_variables_are_kept() {
        let mut cnf = CNF::with_variables(10);
        cnf.add_clause(vec![1, 2]);
        assert_eq!(cnf.num_variables, 10);
    }

    #[test]
    fn evaluation() {
        let mut cnf = CNF::new();
        cnf.add_clause(vec![1, 2]);
        cnf.add_clause(vec![-1, -2]);

        assert!(cnf.is_satisfied_by(&[true, false]));
        assert!(cnf.is_satisfied_by(&[false, true]));
        assert!(!cnf.is_satisfied_by(&[true, true]));
        assert!(!cnf.is_satisfied_by(&[false, false]));
    }

    #[test]
    fn empty_clause_is_unsatisfiable() {
        let mut cnf = CNF::new();
        cnf.add_clause(vec![]);
        assert!(cnf.has_empty_clause());
        assert!(!cnf.is_satisfied_by(&[]));
    }

    #[test]
    fn empty_formula_is_satisfiable() {
        assert!(CNF::new().is_satisfied_by(&[]));
    }
}
