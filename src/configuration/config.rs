//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario is one reproducible run: the masses and initial
//! positions/velocities of every body plus the numerical parameters.
//!
//! - [`ParametersConfig`] – step size, run length, softening
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper loaded from YAML
//!
//! # YAML format
//!
//! ```yaml
//! name: two-body circular
//!
//! parameters:
//!   h0: 0.01         # fixed step size
//!   t_end: 20.0      # run length for the headless driver
//!   eps2: 0.0        # optional, squared softening length (default 0)
//!
//! bodies:
//!   - x: [ -1.0, 0.0, 0.0 ]
//!     v: [  0.0, 0.5, 0.0 ]
//!     m: 1.0
//!   - x: [  1.0, 0.0, 0.0 ]
//!     v: [  0.0, -0.5, 0.0 ]
//!     m: 1.0
//! ```
//!
//! Shapes are only checked when the config is turned into a runtime
//! [`Scenario`](crate::simulation::scenario::Scenario).

use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Global numerical parameters for a scenario
/// G is fixed at 1, so unknown keys (a `G` included) are rejected
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParametersConfig {
    pub h0: f64, // fixed time step size
    #[serde(default)]
    pub t_end: f64, // run length, 0 = let the caller decide
    #[serde(default)]
    pub eps2: f64, // softening, 0 = exact inverse-square law
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position, 3 components
    pub v: Vec<f64>, // initial velocity, 3 components
    pub m: f64,      // mass, positive
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn masses(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.m).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_defaults() {
        let cfg = ScenarioConfig::from_yaml_str(
            "parameters:\n  h0: 0.01\nbodies:\n  - x: [1, 0, 0]\n    v: [0, 1, 0]\n    m: 2.0\n",
        )
        .unwrap();
        assert_eq!(cfg.name, None);
        assert_eq!(cfg.parameters.eps2, 0.0);
        assert_eq!(cfg.parameters.t_end, 0.0);
        assert_eq!(cfg.masses(), vec![2.0]);
        assert_eq!(cfg.bodies[0].x, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn missing_step_is_an_error() {
        let err = ScenarioConfig::from_yaml_str("parameters: {}\nbodies: []\n").unwrap_err();
        assert!(matches!(err, LoadError::Yaml(_)));
    }

    #[test]
    fn gravitational_constant_is_not_configurable() {
        let err = ScenarioConfig::from_yaml_str(
            "parameters:\n  h0: 0.01\n  G: 7.0\nbodies:\n  - x: [1, 0, 0]\n    v: [0, 1, 0]\n    m: 2.0\n",
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Yaml(_)));
    }
}
