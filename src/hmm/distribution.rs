//!
//! Discrete emission distribution over a finite alphabet
//!
use crate::prob::Prob;
use fnv::FnvHashMap;
use std::hash::Hash;

///
/// Alphabet symbol that can be emitted by a state.
///
/// Blanket-implemented for any `Eq + Hash + Clone + Debug` type,
/// e.g. `u8` or `char`.
///
pub trait Symbol: Eq + Hash + Clone + std::fmt::Debug {}
impl<T: Eq + Hash + Clone + std::fmt::Debug> Symbol for T {}

///
/// Mapping `symbol -> probability`.
///
/// The distribution is stored as given; it is never renormalized.
/// Symbols outside of the support have probability 0.
///
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteDistribution<T: Symbol> {
    /// symbols in declaration order
    symbols: Vec<T>,
    probs: FnvHashMap<T, f64>,
}

impl<T: Symbol> DiscreteDistribution<T> {
    ///
    /// Create from `(symbol, probability)` pairs.
    /// A symbol given twice keeps the last probability.
    ///
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut symbols = Vec::new();
        let mut probs = FnvHashMap::default();
        for (symbol, prob) in pairs {
            if probs.insert(symbol.clone(), prob).is_none() {
                symbols.push(symbol);
            }
        }
        DiscreteDistribution { symbols, probs }
    }
    ///
    /// Uniform distribution on the symbols
    ///
    pub fn uniform(symbols: &[T]) -> Self {
        let n = symbols.len() as f64;
        DiscreteDistribution::new(symbols.iter().map(|s| (s.clone(), 1.0 / n)))
    }
    ///
    /// Probability of `symbol` (0 if not in the support)
    ///
    pub fn probability(&self, symbol: &T) -> f64 {
        self.probs.get(symbol).copied().unwrap_or(0.0)
    }
    ///
    /// Log probability of `symbol` (`-inf` if not in the support)
    ///
    pub fn log_probability(&self, symbol: &T) -> Prob {
        match self.probs.get(symbol) {
            Some(&prob) => Prob::from_prob(prob),
            None => Prob::zero(),
        }
    }
    ///
    /// Declared symbols with their probability, in declaration order
    ///
    pub fn support(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.symbols.iter().map(move |s| (s, self.probs[s]))
    }
    /// number of declared symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
    ///
    /// Sum of all declared probabilities
    ///
    pub fn total(&self) -> f64 {
        self.probs.values().sum()
    }
    ///
    /// Check that `total()` is 1 within `tolerance`
    ///
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total() - 1.0).abs() <= tolerance
    }
}

impl<T: Symbol> std::iter::FromIterator<(T, f64)> for DiscreteDistribution<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        DiscreteDistribution::new(iter)
    }
}

impl<T: Symbol> From<Vec<(T, f64)>> for DiscreteDistribution<T> {
    fn from(pairs: Vec<(T, f64)>) -> Self {
        DiscreteDistribution::new(pairs)
    }
}

impl<T: Symbol> std::fmt::Display for DiscreteDistribution<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (symbol, prob)) in self.support().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", symbol, prob)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acgt() -> DiscreteDistribution<char> {
        DiscreteDistribution::new(vec![('A', 0.2), ('C', 0.3), ('G', 0.3), ('T', 0.2)])
    }

    #[test]
    fn distribution_lookup() {
        let d = acgt();
        assert_eq!(d.len(), 4);
        assert_eq!(d.probability(&'C'), 0.3);
        assert_abs_diff_eq!(d.log_probability(&'A').to_log_value(), 0.2f64.ln());
        // unseen symbol
        assert_eq!(d.probability(&'N'), 0.0);
        assert!(d.log_probability(&'N').is_zero());
    }
    #[test]
    fn distribution_is_not_renormalized() {
        let d: DiscreteDistribution<u8> = vec![(b'A', 0.5), (b'C', 0.25)].into_iter().collect();
        assert_abs_diff_eq!(d.total(), 0.75);
        assert!(!d.is_normalized(1e-9));
        assert_eq!(d.probability(&b'A'), 0.5);
        assert!(acgt().is_normalized(1e-9));
    }
    #[test]
    fn distribution_uniform_and_order() {
        let d = DiscreteDistribution::uniform(&['T', 'G', 'C', 'A']);
        let symbols: Vec<char> = d.support().map(|(s, _)| *s).collect();
        assert_eq!(symbols, vec!['T', 'G', 'C', 'A']);
        for (_, prob) in d.support() {
            assert_abs_diff_eq!(prob, 0.25);
        }
        assert_eq!(d.to_string(), "{'T': 0.25, 'G': 0.25, 'C': 0.25, 'A': 0.25}");
    }
    #[test]
    fn distribution_duplicate_symbol_keeps_last() {
        let d = DiscreteDistribution::new(vec![('A', 0.1), ('A', 0.9)]);
        assert_eq!(d.len(), 1);
        assert_eq!(d.probability(&'A'), 0.9);
    }
}
