//!
//! Sampling emissions from the Model
//!
use super::distribution::Symbol;
use super::model::Model;
use super::state::State;
use rand::prelude::*;

///
/// Result of a random walk from start.
///
/// * `emissions`
///     emitted symbols
/// * `path`
///     visited `(position, state)`, in the same convention as
///     `ViterbiResult::path`
/// * `reached_end`
///     false if the walk was truncated by `max_len` or got stuck
///
#[derive(Debug, Clone)]
pub struct Sample<T: Symbol> {
    pub emissions: Vec<T>,
    pub path: Vec<(usize, State<T>)>,
    pub reached_end: bool,
}

///
/// pick randomly from the choices with its own probability.
///
fn pick_with_prob<R: Rng, X: Copy>(rng: &mut R, choices: &[(X, f64)]) -> Option<X> {
    choices.choose_weighted(rng, |item| item.1).ok().map(|item| item.0)
}

impl<T: Symbol> Model<T> {
    ///
    /// Walk the model from start until end is reached, or until the next
    /// state would emit a symbol beyond `max_len`. Silent states after the
    /// last allowed emission (end included) are still walked.
    ///
    pub fn sample<R: Rng>(&self, rng: &mut R, max_len: usize) -> Sample<T> {
        let end = self.end_index();
        let mut k = self.start_index();
        let mut emissions = Vec::new();
        let mut path = vec![(0, self.states[k].clone())];

        while k != end {
            let choices: Vec<(usize, f64)> = self.childs[k]
                .iter()
                .map(|&(l, p)| (l, p.to_value()))
                .collect();
            let l = match pick_with_prob(rng, &choices) {
                Some(l) => l,
                None => break,
            };
            if !self.states[l].is_silent() && emissions.len() == max_len {
                break;
            }
            k = l;
            if let Some(distribution) = self.states[k].distribution() {
                let symbols: Vec<(&T, f64)> = distribution.support().collect();
                match symbols.choose_weighted(rng, |item| item.1) {
                    Ok(&(symbol, _)) => emissions.push(symbol.clone()),
                    Err(_) => break,
                }
            }
            path.push((emissions.len(), self.states[k].clone()));
        }

        Sample {
            reached_end: k == end,
            emissions,
            path,
        }
    }
}
