//!
//! Posterior probability of emitting states
//!
use super::distribution::Symbol;
use super::model::Model;
use super::table::StateTable;

impl<T: Symbol> Model<T> {
    ///
    /// Posterior probability that `x[i]` was emitted from state `k`
    ///
    /// ```text
    /// P(k emits x[i] | x) = f_i+1[k] b_i+1[k] / P(x)
    /// ```
    ///
    /// Returns one table per emission. Silent states are always p=0, and
    /// each table sums to 1 if the emissions are possible. If they are
    /// not, every table is p=0.
    ///
    pub fn posterior(&self, emissions: &[T]) -> Vec<StateTable> {
        let forward = self.forward(emissions);
        let backward = self.backward(emissions);
        let full_prob = forward.full_prob();
        (1..=emissions.len())
            .map(|i| {
                let mut table = StateTable::zero(self.n_all_states());
                if full_prob.is_zero() {
                    return table;
                }
                for &k in self.emitting.iter() {
                    table[k] = forward.table(i)[k] * backward.table(i)[k] / full_prob;
                }
                table
            })
            .collect()
    }
}
