//!
//! Backward algorithm definitions
//!
use super::distribution::Symbol;
use super::model::Model;
use super::table::StateTable;
use crate::prob::Prob;

///
/// Backward tables of an emission sequence.
///
/// `tables[i]` corresponds to the suffix `x[i:]`; there are
/// `emissions.len() + 1` tables.
///
#[derive(Debug, Clone)]
pub struct BackwardResult {
    pub tables: Vec<StateTable>,
    start: usize,
}

impl BackwardResult {
    /// The number of emissions that this result stores.
    pub fn n_emissions(&self) -> usize {
        self.tables.len() - 1
    }
    pub fn table(&self, i: usize) -> &StateTable {
        &self.tables[i]
    }
    ///
    /// `P(x)` = `b_0[start]`
    ///
    pub fn full_prob(&self) -> Prob {
        self.tables[0][self.start]
    }
}

///
/// Backward Algorithm
///
impl<T: Symbol> Model<T> {
    ///
    /// Run Backward algorithm to the emissions
    ///
    /// `b_i[k]` = P(emits `x[i:]` and reaches end | in state `k` at position `i`)
    ///
    pub fn backward(&self, emissions: &[T]) -> BackwardResult {
        let n = emissions.len();
        let mut tables = Vec::with_capacity(n + 1);
        tables.push(self.b_table(None));
        // feed the emissions backward
        for i in (0..n).rev() {
            let table = self.b_table(Some((&emissions[i], &tables[tables.len() - 1])));
            tables.push(table);
        }
        // reverse the vector, so that tables[i] corresponds to x[i:]
        tables.reverse();
        BackwardResult {
            tables,
            start: self.start_index(),
        }
    }
    ///
    /// Calculate `b_i` from `b_i+1` and the emission `x[i]`.
    /// `next` is `None` for `b_n`, where only end has p=1.
    ///
    /// ```text
    /// b_i[k] =   \sum_{l: silent childs}   t_kl b_i[l]
    ///          + \sum_{l: emitting childs} t_kl e_l(x[i]) b_i+1[l]
    /// ```
    ///
    /// Silent childs are resolved first, in reverse topological order.
    ///
    fn b_table(&self, next: Option<(&T, &StateTable)>) -> StateTable {
        let mut table = StateTable::zero(self.n_all_states());
        let end = self.end_index();
        if next.is_none() {
            table[end] = Prob::one();
        }
        for &k in self.silent_order.iter().rev() {
            if k == end {
                continue;
            }
            table[k] = self.b_value(k, &table, next);
        }
        for &k in self.emitting.iter() {
            table[k] = self.b_value(k, &table, next);
        }
        table
    }
    fn b_value(&self, k: usize, table: &StateTable, next: Option<(&T, &StateTable)>) -> Prob {
        self.childs[k]
            .iter()
            .map(|&(l, p_trans)| {
                if self.states[l].is_silent() {
                    p_trans * table[l]
                } else {
                    match next {
                        Some((emission, next_table)) => {
                            p_trans * self.p_emit(l, emission) * next_table[l]
                        }
                        None => Prob::zero(),
                    }
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::hmm::mocks::{mock_example, mock_profile};

    #[test]
    fn backward_matches_forward_example() {
        let model = mock_example();
        let seq: Vec<char> = "ACGACTATTCGAT".chars().collect();
        let b = model.backward(&seq);
        assert_eq!(b.n_emissions(), 13);
        assert_abs_diff_eq!(
            b.full_prob().to_log_value(),
            -22.73896159971087,
            epsilon = 1e-7
        );
    }
    #[test]
    fn backward_matches_forward_profile() {
        let model = mock_profile(b"ACGTACGT");
        let reads: [&[u8]; 5] = [b"ACGTACGT", b"ACTACGT", b"GTACG", b"AACGTTACGT", b""];
        for read in reads.iter() {
            let f = model.forward(read);
            let b = model.backward(read);
            println!("{:?} f={} b={}", read, f.full_prob(), b.full_prob());
            assert_abs_diff_eq!(f.full_prob(), b.full_prob(), epsilon = 1e-9);
        }
    }
    #[test]
    fn backward_impossible() {
        let model = mock_example();
        let seq: Vec<char> = "ACGNT".chars().collect();
        assert!(model.backward(&seq).full_prob().is_zero());
    }
}
