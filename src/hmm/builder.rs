//!
//! HmmBuilder: mutable transition graph under construction
//!
//! ```text
//! let mut builder = HmmBuilder::new("example");
//! builder.add_states(&[s1.clone(), s2.clone()])?;
//! builder.add_transition(&builder.start(), &s1, 0.9)?;
//! ...
//! let model = builder.bake()?;
//! ```
//!
use super::distribution::Symbol;
use super::params::HmmParams;
use super::state::{State, StateId};
use crate::error::HmmError;
use fnv::FnvHashMap;
use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};

/// node index of the reserved start state in `HmmBuilder::graph`
pub(crate) const START_NODE: usize = 0;
/// node index of the reserved end state in `HmmBuilder::graph`
pub(crate) const END_NODE: usize = 1;

///
/// Transition graph under construction.
///
/// Nodes are states (start and end are always present), edge weights are
/// unnormalized transition weights. Turned into an immutable `Model` by
/// `bake`.
///
pub struct HmmBuilder<T: Symbol> {
    pub(crate) name: String,
    pub(crate) params: HmmParams,
    pub(crate) graph: DiGraph<State<T>, f64>,
    index: FnvHashMap<StateId, NodeIndex>,
}

impl<T: Symbol> HmmBuilder<T> {
    ///
    /// Create an empty model with default `HmmParams`
    ///
    pub fn new<S: Into<String>>(name: S) -> Self {
        HmmBuilder::with_params(name, HmmParams::default())
    }
    pub fn with_params<S: Into<String>>(name: S, params: HmmParams) -> Self {
        let name = name.into();
        let mut graph = DiGraph::new();
        let mut index = FnvHashMap::default();
        let start = State::silent(format!("{} - start", name));
        let end = State::silent(format!("{} - end", name));
        index.insert(start.id(), graph.add_node(start));
        index.insert(end.id(), graph.add_node(end));
        HmmBuilder {
            name,
            params,
            graph,
            index,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn params(&self) -> &HmmParams {
        &self.params
    }
    ///
    /// Handle of the silent start state
    ///
    pub fn start(&self) -> State<T> {
        self.graph[NodeIndex::new(START_NODE)].clone()
    }
    ///
    /// Handle of the silent end state
    ///
    pub fn end(&self) -> State<T> {
        self.graph[NodeIndex::new(END_NODE)].clone()
    }
    ///
    /// Register a state.
    ///
    /// Adding the same handle twice is an error.
    ///
    pub fn add_state(&mut self, state: &State<T>) -> Result<(), HmmError> {
        if self.index.contains_key(&state.id()) {
            return Err(HmmError::DuplicateState {
                name: state.name().to_string(),
                model: self.name.clone(),
            });
        }
        let node = self.graph.add_node(state.clone());
        self.index.insert(state.id(), node);
        debug!("add_state {} as {:?}", state.name(), node);
        Ok(())
    }
    ///
    /// Register states in order. Stops at the first failing state.
    ///
    pub fn add_states(&mut self, states: &[State<T>]) -> Result<(), HmmError> {
        for state in states {
            self.add_state(state)?;
        }
        Ok(())
    }
    ///
    /// Add a transition `source -> target` with (unnormalized) `weight`.
    ///
    /// Both endpoints must be registered in this builder. Specifying
    /// the same pair again overwrites the previous weight.
    ///
    pub fn add_transition(
        &mut self,
        source: &State<T>,
        target: &State<T>,
        weight: f64,
    ) -> Result<(), HmmError> {
        let s = self.node_of(source)?;
        let t = self.node_of(target)?;
        if t.index() == START_NODE || s.index() == END_NODE {
            return Err(HmmError::ReservedEndpoint {
                source_name: source.name().to_string(),
                target_name: target.name().to_string(),
            });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(HmmError::InvalidWeight {
                source_name: source.name().to_string(),
                target_name: target.name().to_string(),
                weight,
            });
        }
        // update_edge replaces the weight of an existing edge
        self.graph.update_edge(s, t, weight);
        Ok(())
    }
    ///
    /// Add a transition with `params.default_weight`
    ///
    pub fn add_edge(&mut self, source: &State<T>, target: &State<T>) -> Result<(), HmmError> {
        let weight = self.params.default_weight;
        self.add_transition(source, target, weight)
    }
    ///
    /// Registered states (start and end excluded) in insertion order
    ///
    pub fn states(&self) -> impl Iterator<Item = &State<T>> + '_ {
        self.graph
            .node_indices()
            .skip(END_NODE + 1)
            .map(move |v| &self.graph[v])
    }
    ///
    /// Number of registered states (start and end excluded)
    ///
    pub fn n_states(&self) -> usize {
        self.graph.node_count() - 2
    }
    ///
    /// Number of distinct transitions
    ///
    pub fn n_edges(&self) -> usize {
        self.graph.edge_count()
    }
    ///
    /// Current weight of `source -> target`, if any
    ///
    pub fn weight(&self, source: &State<T>, target: &State<T>) -> Option<f64> {
        let s = *self.index.get(&source.id())?;
        let t = *self.index.get(&target.id())?;
        self.graph.find_edge(s, t).map(|e| self.graph[e])
    }
    fn node_of(&self, state: &State<T>) -> Result<NodeIndex, HmmError> {
        self.index
            .get(&state.id())
            .copied()
            .ok_or_else(|| HmmError::UnknownState {
                name: state.name().to_string(),
                model: self.name.clone(),
            })
    }
}
