use crate::algos::model_based::mdp::PolicyStability;
use crate::common::error::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs shared by policy iteration and value iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Gamma, within `[0, 1]`.
    pub discount: f64,
    /// A step whose signed delta falls below this counts as converged.
    pub threshold: f64,
    /// Evaluation sweeps allowed before giving up with a warning.
    pub max_steps: usize,
    /// Only consulted by value iteration.
    pub policy_stability: PolicyStability,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            discount: 1.0,
            threshold: 1e-5,
            max_steps: 1000,
            policy_stability: PolicyStability::default(),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(Error::InvalidDiscount(self.discount));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridWorldConfig {
    pub shape: (usize, usize),
    pub terminal_states: Vec<usize>,
    pub step_reward: f64,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            shape: (4, 4),
            terminal_states: vec![3, 12],
            step_reward: -1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridWorldConfig,
    pub solver: SolverConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config = serde_json::from_str::<Config>(json)?;
        config.solver.validate()?;

        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;

        Self::from_json_str(&json)
    }
}
