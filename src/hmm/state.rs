//!
//! State: a named node of the HMM, silent or emitting
//!
use super::distribution::{DiscreteDistribution, Symbol};
use crate::prob::Prob;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_STATE_ID: AtomicU64 = AtomicU64::new(0);

///
/// Process-unique identity of a `State`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u64);

impl StateId {
    fn next() -> StateId {
        StateId(NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct StateInner<T: Symbol> {
    name: String,
    distribution: Option<DiscreteDistribution<T>>,
}

///
/// Handle of an HMM state.
///
/// * `name`
///     display name, not required to be unique
/// * `distribution`
///     emission distribution, or `None` for a silent state
///
/// Cloning yields the same state (same `StateId`); two states built
/// separately are different even if their names are equal.
///
#[derive(Debug)]
pub struct State<T: Symbol> {
    id: StateId,
    inner: Arc<StateInner<T>>,
}

impl<T: Symbol> State<T> {
    ///
    /// Create a new state. `None` distribution makes it silent.
    ///
    pub fn new<S: Into<String>>(distribution: Option<DiscreteDistribution<T>>, name: S) -> Self {
        State {
            id: StateId::next(),
            inner: Arc::new(StateInner {
                name: name.into(),
                distribution,
            }),
        }
    }
    ///
    /// Create an emitting state
    ///
    pub fn emitting<D, S>(distribution: D, name: S) -> Self
    where
        D: Into<DiscreteDistribution<T>>,
        S: Into<String>,
    {
        State::new(Some(distribution.into()), name)
    }
    ///
    /// Create a silent state
    ///
    pub fn silent<S: Into<String>>(name: S) -> Self {
        State::new(None, name)
    }
    pub fn id(&self) -> StateId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.inner.name
    }
    pub fn distribution(&self) -> Option<&DiscreteDistribution<T>> {
        self.inner.distribution.as_ref()
    }
    ///
    /// A silent state has no emission and consumes no symbol.
    ///
    pub fn is_silent(&self) -> bool {
        self.inner.distribution.is_none()
    }
    ///
    /// Log probability of emitting `symbol` from this state.
    /// Silent states emit nothing, so it is always `-inf` for them.
    ///
    pub fn emission_log_probability(&self, symbol: &T) -> Prob {
        match &self.inner.distribution {
            Some(d) => d.log_probability(symbol),
            None => Prob::zero(),
        }
    }
}

impl<T: Symbol> Clone for State<T> {
    fn clone(&self) -> Self {
        State {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Symbol> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<T: Symbol> Eq for State<T> {}

impl<T: Symbol> std::hash::Hash for State<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: Symbol> std::fmt::Display for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.distribution() {
            Some(d) => write!(f, "{} {}", self.name(), d),
            None => write!(f, "{} (silent)", self.name()),
        }
    }
}
