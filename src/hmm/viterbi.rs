//!
//! Viterbi algorithm definitions
//!
//! Same recurrence as Forward, with `max` in place of `sum` and a
//! back-pointer per (position, state).
//!
use super::distribution::Symbol;
use super::model::Model;
use super::state::State;
use super::table::StateTable;
use crate::prob::Prob;
use itertools::Itertools;

///
/// Most likely state path of an emission sequence.
///
/// * `log_prob`
///     joint probability of the emissions and the path
/// * `path`
///     `(position, state)` from start to end (both included), where
///     `position` is the number of emissions consumed when the state was
///     entered. Empty when `log_prob` is zero.
///
#[derive(Debug, Clone)]
pub struct ViterbiResult<T: Symbol> {
    pub log_prob: Prob,
    pub path: Vec<(usize, State<T>)>,
}

impl<T: Symbol> ViterbiResult<T> {
    ///
    /// The emissions can be generated by the model or not
    ///
    pub fn is_possible(&self) -> bool {
        !self.log_prob.is_zero()
    }
    ///
    /// Names of the states in the path
    ///
    pub fn names(&self) -> Vec<&str> {
        self.path.iter().map(|(_, s)| s.name()).collect()
    }
}

impl<T: Symbol> std::fmt::Display for ViterbiResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.path.iter().map(|(_, s)| s.name()).join(", "))
    }
}

/// back-pointer of a (position, state) cell
type Trace = Vec<Option<usize>>;

impl<T: Symbol> Model<T> {
    ///
    /// Run Viterbi algorithm to the emissions
    ///
    /// Ties are broken towards the predecessor with the smaller index,
    /// i.e. the one registered first.
    ///
    pub fn viterbi(&self, emissions: &[T]) -> ViterbiResult<T> {
        let mut scores = Vec::with_capacity(emissions.len() + 1);
        let mut traces = Vec::with_capacity(emissions.len() + 1);
        let (score, trace) = self.v_init();
        scores.push(score);
        traces.push(trace);
        for emission in emissions.iter() {
            let (score, trace) = self.v_step(emission, &scores[scores.len() - 1]);
            scores.push(score);
            traces.push(trace);
        }

        let n = emissions.len();
        let log_prob = scores[n][self.end_index()];
        if log_prob.is_zero() {
            return ViterbiResult {
                log_prob,
                path: Vec::new(),
            };
        }
        ViterbiResult {
            log_prob,
            path: self.traceback(&traces, n),
        }
    }
    fn v_init(&self) -> (StateTable, Trace) {
        let mut score = StateTable::zero(self.n_all_states());
        let mut trace = vec![None; self.n_all_states()];
        score[self.start_index()] = Prob::one();
        self.v_silent(&mut score, &mut trace);
        (score, trace)
    }
    fn v_step(&self, emission: &T, prev: &StateTable) -> (StateTable, Trace) {
        let mut score = StateTable::zero(self.n_all_states());
        let mut trace = vec![None; self.n_all_states()];
        for &k in self.emitting.iter() {
            let p_emit = self.p_emit(k, emission);
            if p_emit.is_zero() {
                continue;
            }
            if let Some((l, p)) = self.best_parent(k, prev) {
                score[k] = p_emit * p;
                trace[k] = Some(l);
            }
        }
        self.v_silent(&mut score, &mut trace);
        (score, trace)
    }
    fn v_silent(&self, score: &mut StateTable, trace: &mut Trace) {
        let start = self.start_index();
        for &k in self.silent_order.iter() {
            if k == start {
                continue;
            }
            if let Some((l, p)) = self.best_parent(k, score) {
                score[k] = p;
                trace[k] = Some(l);
            }
        }
    }
    ///
    /// `argmax_l t_lk s[l]` over the parents of `k`.
    /// Parents are sorted by index and only a strictly better score
    /// replaces the current best.
    ///
    fn best_parent(&self, k: usize, score: &StateTable) -> Option<(usize, Prob)> {
        let mut best: Option<(usize, Prob)> = None;
        for &(l, p_trans) in self.parents[k].iter() {
            let p = p_trans * score[l];
            if p.is_zero() {
                continue;
            }
            match best {
                Some((_, p_best)) if p <= p_best => {}
                _ => best = Some((l, p)),
            }
        }
        best
    }
    ///
    /// Follow back-pointers from `(n, end)` to `(0, start)`
    ///
    fn traceback(&self, traces: &[Trace], n: usize) -> Vec<(usize, State<T>)> {
        let mut path = Vec::new();
        let mut i = n;
        let mut k = self.end_index();
        loop {
            path.push((i, self.states[k].clone()));
            match traces[i][k] {
                Some(l) => {
                    if !self.states[k].is_silent() {
                        i -= 1;
                    }
                    k = l;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::builder::HmmBuilder;
    use crate::hmm::mocks::{mock_example, mock_profile};
    use crate::prob::p;

    #[test]
    fn viterbi_example() {
        let model = mock_example();
        let seq: Vec<char> = "ACGACTATTCGAT".chars().collect();
        let r = model.viterbi(&seq);
        assert!(r.is_possible());
        assert_eq!(
            r.to_string(),
            "example - start, s1, s2, s2, s2, s2, s2, s2, s2, s2, s2, s2, s2, s3, example - end"
        );
        // positions
        let positions: Vec<usize> = r.path.iter().map(|(i, _)| *i).collect();
        let mut expected: Vec<usize> = (0..=13).collect();
        expected.push(13);
        assert_eq!(positions, expected);
        // viterbi path is one of the paths summed in forward
        assert!(r.log_prob <= model.log_probability(&seq));
    }
    #[test]
    fn viterbi_impossible() {
        let model = mock_example();
        let seq: Vec<char> = "ACGNT".chars().collect();
        let r = model.viterbi(&seq);
        assert!(!r.is_possible());
        assert_eq!(r.log_prob.to_log_value(), f64::NEG_INFINITY);
        assert!(r.path.is_empty());
        assert_eq!(r.to_string(), "");
    }
    #[test]
    fn viterbi_silent_chain() {
        let model = mock_profile(b"ACGTAC");
        let r = model.viterbi(b"TAC");
        assert_eq!(
            r.names(),
            vec!["profile - start", "D1", "D2", "D3", "M4", "M5", "M6", "profile - end"]
        );
        let positions: Vec<usize> = r.path.iter().map(|(i, _)| *i).collect();
        assert_eq!(positions, vec![0, 0, 0, 0, 1, 2, 3, 3]);
    }
    #[test]
    fn viterbi_deletion_between_emissions() {
        let model = mock_profile(b"ACGTAC");
        let r = model.viterbi(b"ACAC");
        assert_eq!(
            r.names(),
            vec!["profile - start", "M1", "M2", "D3", "D4", "M5", "M6", "profile - end"]
        );
        // D3 and D4 share the position of the preceding emission by M2
        let positions: Vec<usize> = r.path.iter().map(|(i, _)| *i).collect();
        assert_eq!(positions, vec![0, 1, 2, 2, 2, 3, 4, 4]);
    }
    #[test]
    fn viterbi_insertion() {
        let model = mock_profile(b"ACGT");
        let r = model.viterbi(b"ACGGT");
        let names = r.names();
        assert_eq!(names.len(), 7);
        assert_eq!(names[0], "profile - start");
        assert_eq!(names[6], "profile - end");
        assert!(names.iter().any(|s| s.starts_with('I')));
    }
    #[test]
    fn viterbi_tie_prefers_first_registered() {
        // two identical branches a and b; a is registered first
        let mut hmm = HmmBuilder::new("tie");
        let a = State::emitting(vec![('A', 1.0)], "a");
        let b = State::emitting(vec![('A', 1.0)], "b");
        hmm.add_states(&[a.clone(), b.clone()]).unwrap();
        hmm.add_transition(&hmm.start(), &b, 0.5).unwrap();
        hmm.add_transition(&hmm.start(), &a, 0.5).unwrap();
        hmm.add_transition(&a, &hmm.end(), 1.0).unwrap();
        hmm.add_transition(&b, &hmm.end(), 1.0).unwrap();
        let model = hmm.bake().unwrap();
        for _ in 0..10 {
            let r = model.viterbi(&['A']);
            assert_eq!(r.names(), vec!["tie - start", "a", "tie - end"]);
            assert_abs_diff_eq!(r.log_prob, p(0.5), epsilon = 1e-12);
        }
    }
    #[test]
    fn viterbi_empty_sequence() {
        let mut hmm = HmmBuilder::new("skip");
        let s1 = State::emitting(vec![('A', 1.0)], "s1");
        let d = State::silent("d");
        hmm.add_states(&[s1.clone(), d.clone()]).unwrap();
        hmm.add_transition(&hmm.start(), &s1, 0.5).unwrap();
        hmm.add_transition(&hmm.start(), &d, 0.5).unwrap();
        hmm.add_transition(&d, &hmm.end(), 1.0).unwrap();
        hmm.add_transition(&s1, &hmm.end(), 1.0).unwrap();
        let model = hmm.bake().unwrap();
        let r = model.viterbi(&[]);
        assert_eq!(r.names(), vec!["skip - start", "d", "skip - end"]);
        assert!(r.path.iter().all(|(i, _)| *i == 0));
    }
}
