//!
//! Table definitions
//!
//! ## StateTable
//!
//! the prob assigned for each state at a position, `F[k]` or `B[k]`,
//! indexed by the DP index of the model (0 = start, last = end).
//!
use crate::prob::Prob;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub struct StateTable(Vec<Prob>);

impl StateTable {
    ///
    /// table of `n_states` rows, all p=0
    ///
    pub fn zero(n_states: usize) -> Self {
        StateTable(vec![Prob::zero(); n_states])
    }
    pub fn n_states(&self) -> usize {
        self.0.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Prob> + '_ {
        self.0.iter()
    }
    ///
    /// sum of all rows
    ///
    pub fn sum(&self) -> Prob {
        self.0.iter().sum()
    }
    ///
    /// max of `|log p_a - log p_b|` over the rows
    ///
    pub fn diff(&self, other: &StateTable) -> f64 {
        assert_eq!(self.n_states(), other.n_states());
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.log_diff(*b))
            .fold(0.0, f64::max)
    }
}

impl Index<usize> for StateTable {
    type Output = Prob;
    fn index(&self, k: usize) -> &Prob {
        &self.0[k]
    }
}

impl IndexMut<usize> for StateTable {
    fn index_mut(&mut self, k: usize) -> &mut Prob {
        &mut self.0[k]
    }
}

impl std::fmt::Display for StateTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (k, p) in self.0.iter().enumerate() {
            writeln!(f, "{}\t{}", k, p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prob::p;

    #[test]
    fn table_ops() {
        let mut t = StateTable::zero(3);
        assert_eq!(t.n_states(), 3);
        assert!(t.sum().is_zero());
        t[0] = p(0.25);
        t[2] = p(0.5);
        assert_abs_diff_eq!(t.sum(), p(0.75), epsilon = 1e-12);

        let mut u = t.clone();
        assert_eq!(t.diff(&u), 0.0);
        u[1] = p(0.1);
        assert_eq!(t.diff(&u), f64::INFINITY);
        u[1] = p(0.0);
        u[2] = p(0.25);
        assert_abs_diff_eq!(t.diff(&u), 2f64.ln(), epsilon = 1e-12);
    }
}
