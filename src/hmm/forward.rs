//!
//! Forward algorithm definitions
//!
use super::distribution::Symbol;
use super::model::Model;
use super::table::StateTable;
use crate::prob::Prob;

///
/// Forward tables of an emission sequence.
///
/// `tables[i]` is the table after emitting `x[:i]`, so there are
/// `emissions.len() + 1` tables.
///
#[derive(Debug, Clone)]
pub struct ForwardResult {
    pub tables: Vec<StateTable>,
    end: usize,
}

impl ForwardResult {
    /// The number of emissions that this result stores.
    pub fn n_emissions(&self) -> usize {
        self.tables.len() - 1
    }
    pub fn table(&self, i: usize) -> &StateTable {
        &self.tables[i]
    }
    ///
    /// `P(x)` = `f_n[end]`
    ///
    pub fn full_prob(&self) -> Prob {
        self.tables[self.tables.len() - 1][self.end]
    }
}

impl<T: Symbol> Model<T> {
    ///
    /// Run Forward algorithm to the emissions
    ///
    /// `f_i[k]` = P(emits `x[:i]` and now in state `k`)
    ///
    /// For an emitting `k` the last action was emitting `x[i-1]` from `k`;
    /// for a silent `k` only silent states were traversed after it.
    ///
    pub fn forward(&self, emissions: &[T]) -> ForwardResult {
        let mut tables = Vec::with_capacity(emissions.len() + 1);
        tables.push(self.f_init());
        for emission in emissions.iter() {
            let table = self.f_step(emission, &tables[tables.len() - 1]);
            tables.push(table);
        }
        ForwardResult {
            tables,
            end: self.end_index(),
        }
    }
    ///
    /// Total log probability `log P(x)` of the emissions.
    ///
    /// Keeps only the last table. `Prob::zero()` if the model cannot
    /// generate the emissions.
    ///
    pub fn log_probability(&self, emissions: &[T]) -> Prob {
        let table = emissions
            .iter()
            .fold(self.f_init(), |table, emission| self.f_step(emission, &table));
        table[self.end_index()]
    }
    ///
    /// `f_0`: start has p=1, then silent states reachable from start
    ///
    fn f_init(&self) -> StateTable {
        let mut table = StateTable::zero(self.n_all_states());
        table[self.start_index()] = Prob::one();
        self.f_silent(&mut table);
        table
    }
    ///
    /// Calculate `f_i` from `f_i-1` and the emission `x[i-1]`
    ///
    /// ```text
    /// f_i[k] = e_k(x[i-1]) \sum_{l: parents} t_lk f_i-1[l]   (k: emitting)
    /// ```
    ///
    fn f_step(&self, emission: &T, prev: &StateTable) -> StateTable {
        let mut table = StateTable::zero(self.n_all_states());
        for &k in self.emitting.iter() {
            let p_emit = self.p_emit(k, emission);
            if p_emit.is_zero() {
                continue;
            }
            let from_parents: Prob = self.parents[k]
                .iter()
                .map(|&(l, p_trans)| p_trans * prev[l])
                .sum();
            table[k] = p_emit * from_parents;
        }
        self.f_silent(&mut table);
        table
    }
    ///
    /// Fold silent transitions within the same position
    ///
    /// ```text
    /// f_i[k] = \sum_{l: parents} t_lk f_i[l]   (k: silent)
    /// ```
    ///
    /// Visiting silent states in topological order guarantees every silent
    /// parent is already final.
    ///
    fn f_silent(&self, table: &mut StateTable) {
        let start = self.start_index();
        for &k in self.silent_order.iter() {
            if k == start {
                continue;
            }
            table[k] = self.parents[k]
                .iter()
                .map(|&(l, p_trans)| p_trans * table[l])
                .sum();
        }
    }
}
