//! Ranking options shared by both estimators.

use serde::{Deserialize, Serialize};

use crate::error::{RankError, Result};

pub const DEFAULT_DAMPING_FACTOR: f64 = 0.85;
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;
pub const DEFAULT_TOLERANCE: f64 = 0.001;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Options for the sampling and iterative estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Probability that the surfer follows a link instead of teleporting
    pub damping_factor: f64,
    /// Number of Monte Carlo draws
    pub sample_count: usize,
    /// Largest per-page change that still counts as converged
    pub convergence_tolerance: f64,
    /// Safety cap on relaxation rounds
    pub max_iterations: usize,
    /// Seed for the sampler; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping_factor: DEFAULT_DAMPING_FACTOR,
            sample_count: DEFAULT_SAMPLE_COUNT,
            convergence_tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
        }
    }
}

impl RankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping_factor(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.convergence_tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every option, failing on the first invalid one.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping_factor)?;
        check_sample_count(self.sample_count)?;
        check_tolerance(self.convergence_tolerance)?;
        if self.max_iterations == 0 {
            return Err(RankError::InvalidIterationCap(self.max_iterations));
        }
        Ok(())
    }
}

pub(crate) fn check_damping(damping_factor: f64) -> Result<()> {
    // NaN fails the range check too
    if (0.0..=1.0).contains(&damping_factor) {
        Ok(())
    } else {
        Err(RankError::InvalidDampingFactor(damping_factor))
    }
}

pub(crate) fn check_sample_count(n: usize) -> Result<()> {
    if n >= 1 {
        Ok(())
    } else {
        Err(RankError::InvalidSampleCount(n))
    }
}

pub(crate) fn check_tolerance(tolerance: f64) -> Result<()> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(RankError::InvalidTolerance(tolerance))
    }
}
