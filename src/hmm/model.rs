//!
//! Baked, immutable HMM
//!
//! Index space of every DP table:
//!
//! ```text
//! 0          start
//! 1..=n      registered states (insertion order)
//! n+1        end
//! ```
//!
use super::distribution::Symbol;
use super::params::HmmParams;
use super::state::{State, StateId};
use crate::prob::Prob;
use fnv::FnvHashMap;

///
/// Non-fatal findings of `bake`
///
#[derive(Debug, Clone)]
pub struct BakeDiagnostics<T: Symbol> {
    /// states with no path from start
    pub unreachable_from_start: Vec<State<T>>,
    /// states with no path to end
    pub cannot_reach_end: Vec<State<T>>,
    /// emitting states whose distribution does not sum to 1
    pub unnormalized_emissions: Vec<State<T>>,
}

impl<T: Symbol> BakeDiagnostics<T> {
    pub fn is_clean(&self) -> bool {
        self.unreachable_from_start.is_empty()
            && self.cannot_reach_end.is_empty()
            && self.unnormalized_emissions.is_empty()
    }
}

///
/// HMM ready for inference.
///
/// Produced by `HmmBuilder::bake`. It has no interior mutability, so a
/// `&Model` can be shared between threads and queried concurrently.
///
#[derive(Debug, Clone)]
pub struct Model<T: Symbol> {
    pub(crate) name: String,
    pub(crate) params: HmmParams,
    /// all states in index order
    pub(crate) states: Vec<State<T>>,
    pub(crate) index: FnvHashMap<StateId, usize>,
    /// emitting states, ascending index
    pub(crate) emitting: Vec<usize>,
    /// silent states (start and end included) in topological order
    pub(crate) silent_order: Vec<usize>,
    /// `childs[k]` = `(l, log t_kl)` sorted by `l`
    pub(crate) childs: Vec<Vec<(usize, Prob)>>,
    /// `parents[l]` = `(k, log t_kl)` sorted by `k`
    pub(crate) parents: Vec<Vec<(usize, Prob)>>,
    pub(crate) diagnostics: BakeDiagnostics<T>,
}

impl<T: Symbol> Model<T> {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn params(&self) -> &HmmParams {
        &self.params
    }
    ///
    /// Registered states (start and end excluded) in insertion order
    ///
    pub fn states(&self) -> &[State<T>] {
        &self.states[1..self.states.len() - 1]
    }
    ///
    /// Number of registered states (start and end excluded)
    ///
    pub fn n_states(&self) -> usize {
        self.states.len() - 2
    }
    ///
    /// Number of transitions with nonzero probability
    ///
    pub fn n_edges(&self) -> usize {
        self.childs.iter().map(|c| c.len()).sum()
    }
    pub fn start(&self) -> &State<T> {
        &self.states[self.start_index()]
    }
    pub fn end(&self) -> &State<T> {
        &self.states[self.end_index()]
    }
    pub(crate) fn start_index(&self) -> usize {
        0
    }
    pub(crate) fn end_index(&self) -> usize {
        self.states.len() - 1
    }
    /// number of rows of a DP table (start and end included)
    pub(crate) fn n_all_states(&self) -> usize {
        self.states.len()
    }
    ///
    /// Index of the state in DP tables, if it belongs to this model
    ///
    pub fn state_index(&self, state: &State<T>) -> Option<usize> {
        self.index.get(&state.id()).copied()
    }
    ///
    /// State at the DP table index
    ///
    pub fn state(&self, index: usize) -> &State<T> {
        &self.states[index]
    }
    ///
    /// Normalized transition probability `source -> target`
    /// (`Prob::zero()` if there is no such transition)
    ///
    pub fn transition_prob(&self, source: &State<T>, target: &State<T>) -> Prob {
        match (self.state_index(source), self.state_index(target)) {
            (Some(k), Some(l)) => self.childs[k]
                .iter()
                .find(|(m, _)| *m == l)
                .map(|(_, p)| *p)
                .unwrap_or_else(Prob::zero),
            _ => Prob::zero(),
        }
    }
    ///
    /// Iterate all transitions as `(source, target, prob)`
    ///
    pub fn transitions(&self) -> impl Iterator<Item = (&State<T>, &State<T>, Prob)> + '_ {
        self.childs.iter().enumerate().flat_map(move |(k, childs)| {
            childs
                .iter()
                .map(move |&(l, p)| (&self.states[k], &self.states[l], p))
        })
    }
    ///
    /// Outgoing transitions of a state as `(target, prob)`
    ///
    pub fn childs(&self, state: &State<T>) -> impl Iterator<Item = (&State<T>, Prob)> + '_ {
        let k = self.state_index(state);
        k.into_iter()
            .flat_map(move |k| self.childs[k].iter())
            .map(move |&(l, p)| (&self.states[l], p))
    }
    ///
    /// Silent states (start and end included) in the order they are
    /// resolved within one position
    ///
    pub fn silent_order(&self) -> impl Iterator<Item = &State<T>> + '_ {
        self.silent_order.iter().map(move |&k| &self.states[k])
    }
    pub fn diagnostics(&self) -> &BakeDiagnostics<T> {
        &self.diagnostics
    }
    /// emission probability of the state at `k`
    pub(crate) fn p_emit(&self, k: usize, emission: &T) -> Prob {
        self.states[k].emission_log_probability(emission)
    }
}

impl<T: Symbol> std::fmt::Display for Model<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Model {} ({} states)", self.name, self.n_states())?;
        for (source, target, p) in self.transitions() {
            writeln!(f, "{}\t{}\t{}", source.name(), target.name(), p.to_value())?;
        }
        Ok(())
    }
}
