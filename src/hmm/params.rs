//!
//! HmmParams: knobs of model construction and baking
//!

///
/// Parameters used by `HmmBuilder` while building and baking.
///
#[derive(Debug, Clone, PartialEq)]
pub struct HmmParams {
    ///
    /// weight assigned by `add_edge`. Not validated here; a negative or
    /// non-finite value makes `add_edge` return `InvalidWeight`.
    pub default_weight: f64,
    ///
    /// tolerance for the normalization check of emission distributions
    /// in bake (outgoing transitions are always renormalized)
    pub tolerance: f64,
    ///
    /// if true, states unreachable from start (or unable to reach end)
    /// fail the bake instead of being reported as warnings
    pub strict_reachability: bool,
}

impl HmmParams {
    pub fn new(default_weight: f64, tolerance: f64, strict_reachability: bool) -> HmmParams {
        HmmParams {
            default_weight,
            tolerance,
            strict_reachability,
        }
    }
    /// reject dead states in bake
    pub fn strict() -> HmmParams {
        HmmParams {
            strict_reachability: true,
            ..HmmParams::default()
        }
    }
}

impl Default for HmmParams {
    fn default() -> Self {
        HmmParams::new(1.0, 1e-9, false)
    }
}

impl std::fmt::Display for HmmParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "default_weight: {}", self.default_weight)?;
        writeln!(f, "tolerance: {}", self.tolerance)?;
        writeln!(f, "strict_reachability: {}", self.strict_reachability)
    }
}
