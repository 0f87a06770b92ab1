//! Optimizer configuration.
//!
//! All tunable weights, bands, and search parameters in one place.
//! The optimizer is a pure function of its inputs plus this struct and
//! a PRNG seed; no module-level state is consulted.

use serde::{Deserialize, Serialize};

/// Configuration for the assignment optimizer.
///
/// Defaults reproduce the reference tuning. Weights scale the soft
/// terms of the class cost; bands define the hard profile targets.
///
/// # Example
/// ```
/// use classforge::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_seed(42)
///     .with_head_band(1, 4)
///     .with_exploration_rate(0.1);
/// assert_eq!(config.head_min, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Outer-loop iteration cap.
    pub max_swaps: u32,
    /// Consecutive non-improving iterations before the search stops.
    pub stagnation_limit: u32,
    /// Weight of the academic-mean term.
    pub w_distrib: f64,
    /// Weight of the gender-ratio term.
    pub w_parity: f64,
    /// Reserved profile weight.
    pub w_profiles: f64,
    /// Reserved friendship weight.
    pub w_friends: f64,
    /// Minimum head-profile students per class.
    pub head_min: usize,
    /// Maximum head-profile students per class.
    pub head_max: usize,
    /// Maximum low-tier students per class.
    pub niv1_max: usize,
    /// Reserved lower low-tier bound.
    pub niv1_min: usize,
    /// Second-language code exempted from the specialization rule.
    pub default_lv2: String,
    /// Option codes marking a specialized class.
    pub specialized_opts: Vec<String>,
    /// Probability of picking a random partner class instead of the
    /// most complementary one.
    pub exploration_rate: f64,
    /// Per-class cap on sampled swap candidates.
    pub sample_size: usize,
    /// PRNG seed. `None` seeds from the OS; a fixed value makes the
    /// run reproducible bit for bit.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_swaps: 2000,
            stagnation_limit: 50,
            w_distrib: 5.0,
            w_parity: 4.0,
            w_profiles: 10.0,
            w_friends: 1000.0,
            head_min: 2,
            head_max: 5,
            niv1_max: 4,
            niv1_min: 0,
            default_lv2: "ESP".to_string(),
            specialized_opts: vec!["LATIN".to_string(), "CHAV".to_string()],
            exploration_rate: 0.2,
            sample_size: 25,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Sets the PRNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the outer-loop cap.
    pub fn with_max_swaps(mut self, max_swaps: u32) -> Self {
        self.max_swaps = max_swaps;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, limit: u32) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the head-profile band.
    pub fn with_head_band(mut self, head_min: usize, head_max: usize) -> Self {
        self.head_min = head_min;
        self.head_max = head_max;
        self
    }

    /// Sets the low-tier cap.
    pub fn with_niv1_max(mut self, niv1_max: usize) -> Self {
        self.niv1_max = niv1_max;
        self
    }

    /// Sets the academic and parity weights.
    pub fn with_weights(mut self, w_distrib: f64, w_parity: f64) -> Self {
        self.w_distrib = w_distrib;
        self.w_parity = w_parity;
        self
    }

    /// Sets the random-partner probability (clamped to [0, 1]).
    pub fn with_exploration_rate(mut self, rate: f64) -> Self {
        self.exploration_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the swap-sample cap.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Sets the default second language.
    pub fn with_default_lv2(mut self, code: impl Into<String>) -> Self {
        self.default_lv2 = code.into();
        self
    }
}
