//!
//! Baking: HmmBuilder -> Model
//!
//! 1. normalize outgoing weights of each state into log probabilities
//! 2. order silent states topologically (silent cycles are rejected)
//! 3. check reachability from start and to end
//! 4. freeze the index space used by DP tables
//!
use super::builder::{HmmBuilder, END_NODE, START_NODE};
use super::distribution::Symbol;
use super::model::{BakeDiagnostics, Model};
use super::state::State;
use crate::error::HmmError;
use crate::prob::Prob;
use fnv::FnvHashMap;
use log::{debug, info, warn};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef, Reversed};
use petgraph::Direction;

type Adjacency = Vec<Vec<(usize, Prob)>>;

impl<T: Symbol> HmmBuilder<T> {
    ///
    /// Validate and freeze the graph into a `Model`.
    ///
    /// Fails with
    /// * `UnreachableState` if a state other than end has no outgoing
    ///   transition of positive weight (or, with `strict_reachability`,
    ///   if a state is not on any start-to-end path)
    /// * `SilentCycle` if silent states form a cycle
    ///
    pub fn bake(self) -> Result<Model<T>, HmmError> {
        let states = self.ordered_states();
        let n = states.len();
        let end = n - 1;

        let (childs, parents) = self.normalized_transitions(&states)?;
        let silent_order = silent_order(&states, &childs)?;
        let emitting: Vec<usize> = (0..n).filter(|&k| !states[k].is_silent()).collect();

        let (unreachable_from_start, cannot_reach_end) = reachability(n, &childs);
        if self.params.strict_reachability {
            if let Some(&k) = unreachable_from_start.first() {
                return Err(HmmError::UnreachableState {
                    name: states[k].name().to_string(),
                    reason: "no path from start".to_string(),
                });
            }
            if let Some(&k) = cannot_reach_end.first() {
                return Err(HmmError::UnreachableState {
                    name: states[k].name().to_string(),
                    reason: "no path to end".to_string(),
                });
            }
        }
        for &k in unreachable_from_start.iter() {
            warn!("state {} is unreachable from start", states[k].name());
        }
        for &k in cannot_reach_end.iter() {
            warn!("state {} cannot reach end", states[k].name());
        }
        let unnormalized_emissions: Vec<State<T>> = emitting
            .iter()
            .map(|&k| &states[k])
            .filter(|s| {
                s.distribution()
                    .map_or(false, |d| !d.is_normalized(self.params.tolerance))
            })
            .cloned()
            .collect();
        for s in unnormalized_emissions.iter() {
            warn!("emissions of state {} do not sum to 1", s.name());
        }

        let diagnostics = BakeDiagnostics {
            unreachable_from_start: unreachable_from_start
                .iter()
                .map(|&k| states[k].clone())
                .collect(),
            cannot_reach_end: cannot_reach_end.iter().map(|&k| states[k].clone()).collect(),
            unnormalized_emissions,
        };
        let index = states
            .iter()
            .enumerate()
            .map(|(k, s)| (s.id(), k))
            .collect::<FnvHashMap<_, _>>();
        info!(
            "baked {}: {} states ({} emitting, {} silent), end={}",
            self.name,
            n,
            emitting.len(),
            silent_order.len(),
            end
        );

        Ok(Model {
            name: self.name,
            params: self.params,
            states,
            index,
            emitting,
            silent_order,
            childs,
            parents,
            diagnostics,
        })
    }
    ///
    /// States in DP index order: start, registered states, end
    ///
    fn ordered_states(&self) -> Vec<State<T>> {
        let mut states = Vec::with_capacity(self.graph.node_count());
        states.push(self.graph[NodeIndex::new(START_NODE)].clone());
        states.extend(self.states().cloned());
        states.push(self.graph[NodeIndex::new(END_NODE)].clone());
        states
    }
    /// builder node -> DP index
    fn to_index(&self, v: NodeIndex) -> usize {
        match v.index() {
            START_NODE => 0,
            END_NODE => self.graph.node_count() - 1,
            k => k - 1,
        }
    }
    ///
    /// `t_kl = w_kl / sum_m w_km` in log space.
    /// Zero-weight transitions are dropped.
    ///
    fn normalized_transitions(&self, states: &[State<T>]) -> Result<(Adjacency, Adjacency), HmmError> {
        let n = states.len();
        let mut childs: Adjacency = vec![Vec::new(); n];
        let mut parents: Adjacency = vec![Vec::new(); n];
        for v in self.graph.node_indices() {
            let k = self.to_index(v);
            if k == n - 1 {
                continue;
            }
            let total: f64 = self
                .graph
                .edges_directed(v, Direction::Outgoing)
                .map(|e| *e.weight())
                .sum();
            if total <= 0.0 {
                return Err(HmmError::UnreachableState {
                    name: states[k].name().to_string(),
                    reason: "no outgoing transition with positive weight".to_string(),
                });
            }
            for e in self.graph.edges_directed(v, Direction::Outgoing) {
                let w = *e.weight();
                if w > 0.0 {
                    let l = self.to_index(e.target());
                    let prob = Prob::from_prob(w / total);
                    childs[k].push((l, prob));
                    parents[l].push((k, prob));
                }
            }
        }
        for adj in childs.iter_mut().chain(parents.iter_mut()) {
            adj.sort_by_key(|&(l, _)| l);
        }
        for (k, adj) in childs.iter().enumerate() {
            let sum: Prob = adj.iter().map(|&(_, p)| p).sum();
            debug!("{} sum of outgoing={}", states[k].name(), sum.to_value());
        }
        Ok((childs, parents))
    }
}

///
/// Topological order of silent states over silent -> silent transitions.
///
fn silent_order<T: Symbol>(states: &[State<T>], childs: &Adjacency) -> Result<Vec<usize>, HmmError> {
    let n = states.len();
    let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(n, 0);
    for _ in 0..n {
        graph.add_node(());
    }
    for (k, adj) in childs.iter().enumerate() {
        if !states[k].is_silent() {
            continue;
        }
        for &(l, _) in adj.iter().filter(|&&(l, _)| states[l].is_silent()) {
            if k == l {
                return Err(HmmError::SilentCycle {
                    name: states[k].name().to_string(),
                });
            }
            graph.add_edge(NodeIndex::new(k), NodeIndex::new(l), ());
        }
    }
    let order = toposort(&graph, None).map_err(|cycle| HmmError::SilentCycle {
        name: states[cycle.node_id().index()].name().to_string(),
    })?;
    Ok(order
        .into_iter()
        .map(|v| v.index())
        .filter(|&k| states[k].is_silent())
        .collect())
}

///
/// States not reachable from start, and states that cannot reach end,
/// in ascending index order.
///
fn reachability(n: usize, childs: &Adjacency) -> (Vec<usize>, Vec<usize>) {
    let mut graph: DiGraph<(), ()> = DiGraph::with_capacity(n, 0);
    for _ in 0..n {
        graph.add_node(());
    }
    for (k, adj) in childs.iter().enumerate() {
        for &(l, _) in adj.iter() {
            graph.add_edge(NodeIndex::new(k), NodeIndex::new(l), ());
        }
    }
    let mut from_start = vec![false; n];
    let mut bfs = Bfs::new(&graph, NodeIndex::new(0));
    while let Some(v) = bfs.next(&graph) {
        from_start[v.index()] = true;
    }
    let mut to_end = vec![false; n];
    let reversed = Reversed(&graph);
    let mut bfs = Bfs::new(reversed, NodeIndex::new(n - 1));
    while let Some(v) = bfs.next(reversed) {
        to_end[v.index()] = true;
    }
    let unreachable = (0..n).filter(|&k| !from_start[k]).collect();
    let dead = (0..n).filter(|&k| !to_end[k]).collect();
    (unreachable, dead)
}
