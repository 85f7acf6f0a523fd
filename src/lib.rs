//!
//! hmmgraph: discrete-emission hidden Markov models on explicit state graphs
//!
//! Build a graph of silent and emitting states with `hmm::HmmBuilder`,
//! bake it into an immutable `hmm::Model`, and score sequences with the
//! forward and Viterbi algorithms.
//!
pub mod error;
pub mod hmm;
pub mod prelude;
pub mod prob;

#[macro_use]
extern crate approx;
