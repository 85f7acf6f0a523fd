//!
//! Discrete-emission hidden Markov model
//!
//! * Build
//!     `HmmBuilder` collects states and weighted transitions, including the
//!     reserved silent `start` and `end` states
//! * Bake
//!     `HmmBuilder::bake` validates and normalizes the graph into an
//!     immutable `Model`
//! * Infer
//!     `Model::log_probability` (forward), `Model::viterbi`,
//!     `Model::backward`, `Model::posterior`
//! * Sample
//!     `Model::sample` draws emissions from the model
//!
pub mod backward;
pub mod bake;
pub mod builder;
pub mod distribution;
pub mod forward;
pub mod mocks;
pub mod model;
pub mod params;
pub mod posterior;
pub mod sample;
pub mod state;
pub mod table;
pub mod viterbi;

// re-export
pub use backward::BackwardResult;
pub use builder::HmmBuilder;
pub use distribution::{DiscreteDistribution, Symbol};
pub use forward::ForwardResult;
pub use model::{BakeDiagnostics, Model};
pub use params::HmmParams;
pub use sample::Sample;
pub use state::{State, StateId};
pub use table::StateTable;
pub use viterbi::ViterbiResult;
