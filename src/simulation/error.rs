//! Error types for building and running a simulation

use thiserror::Error;

/// Invalid scenario input, reported before any integration happens
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("scenario has no bodies")]
    Empty,

    #[error("{what} has {found} rows, expected {expected} (one per mass)")]
    RowCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("body {body}: {what} has {found} components, expected 3")]
    Shape {
        body: usize,
        what: &'static str,
        found: usize,
    },

    #[error("body {body}: mass must be positive and finite, got {mass}")]
    NonPositiveMass { body: usize, mass: f64 },

    #[error("body {body}: {what} is not finite")]
    NonFinite { body: usize, what: &'static str },

    #[error("step size must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("softening eps2 must be finite and non-negative, got {0}")]
    InvalidSoftening(f64),

    #[error("total mass is not finite")]
    TotalMassOverflow,

    #[error("bodies {first} and {second} start at the same position")]
    CoincidentBodies { first: usize, second: usize },
}

/// Errors surfaced by the orchestrator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("advance() called before reset()")]
    NotReset,

    /// Non-finite positions or velocities after a step, usually two bodies
    /// passing (almost) through each other with no softening
    #[error("state became non-finite at t = {time}")]
    NumericDegeneracy { time: f64 },
}
