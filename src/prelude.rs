//!
//! globally-available parts
//!
pub use crate::error::HmmError;
pub use crate::hmm::{DiscreteDistribution, HmmBuilder, HmmParams, Model, State, ViterbiResult};
pub use crate::prob::{lp, p, Prob};
