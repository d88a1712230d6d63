//! Simulation orchestrator
//!
//! A `Scenario` owns one configuration (masses, initial positions and
//! velocities, parameters), shifted into the barycentric frame at
//! construction. It is driven frame by frame by an external caller:
//!
//! ```text
//! Scenario::new / build_scenario  ->  reset()  ->  advance() per frame
//! ```
//!
//! `reset()` throws away the current stepper and starts a new, independent
//! trajectory from the same normalized initial state. Switching scenarios
//! means building a new `Scenario`; nothing is carried over.

use tracing::{debug, trace, warn};

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::error::{ConfigurationError, SimulationError};
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::Rk4;
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyMatrix, NVec3, PhaseState};
use crate::simulation::diagnostics;

/// One sample of the trajectory, handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: f64,
    /// N positions, ordered like the input masses
    pub positions: Vec<NVec3>,
    /// Smallest pairwise distance seen since the last reset,
    /// `None` for a single body
    pub min_separation: Option<f64>,
}

/// Runtime bundle for one scenario
#[derive(Debug)]
pub struct Scenario {
    parameters: Parameters,
    gravity: NewtonianGravity,
    initial: PhaseState, // barycentric initial state
    stepper: Option<Rk4<PhaseState, NewtonianGravity>>,
    min_separation: Option<f64>,
}

impl Scenario {
    /// Validate the inputs and normalize them to the barycentric frame.
    /// No integration happens until [`reset`](Self::reset).
    pub fn new(
        parameters: Parameters,
        masses: Vec<f64>,
        init_positions: Vec<NVec3>,
        init_velocities: Vec<NVec3>,
    ) -> Result<Self, ConfigurationError> {
        let n = masses.len();
        if n == 0 {
            return Err(ConfigurationError::Empty);
        }
        if init_positions.len() != n {
            return Err(ConfigurationError::RowCount {
                what: "initial positions",
                expected: n,
                found: init_positions.len(),
            });
        }
        if init_velocities.len() != n {
            return Err(ConfigurationError::RowCount {
                what: "initial velocities",
                expected: n,
                found: init_velocities.len(),
            });
        }
        if !(parameters.h0.is_finite() && parameters.h0 > 0.0) {
            return Err(ConfigurationError::InvalidStep(parameters.h0));
        }
        if !(parameters.eps2.is_finite() && parameters.eps2 >= 0.0) {
            return Err(ConfigurationError::InvalidSoftening(parameters.eps2));
        }
        for (body, &mass) in masses.iter().enumerate() {
            if !(mass.is_finite() && mass > 0.0) {
                return Err(ConfigurationError::NonPositiveMass { body, mass });
            }
        }
        // Barycentric weights divide by the sum
        if !diagnostics::total_mass(&masses).is_finite() {
            return Err(ConfigurationError::TotalMassOverflow);
        }
        for body in 0..n {
            if !init_positions[body].iter().all(|c| c.is_finite()) {
                return Err(ConfigurationError::NonFinite { body, what: "initial position" });
            }
            if !init_velocities[body].iter().all(|c| c.is_finite()) {
                return Err(ConfigurationError::NonFinite { body, what: "initial velocity" });
            }
        }
        for first in 0..n {
            for second in (first + 1)..n {
                if init_positions[first] == init_positions[second] {
                    return Err(ConfigurationError::CoincidentBodies { first, second });
                }
            }
        }

        // Barycentric frame: centre of mass at the origin, zero net momentum
        let pos = BodyMatrix::from_rows(init_positions);
        let vel = BodyMatrix::from_rows(init_velocities);
        let com_pos = pos.weighted_mean(&masses);
        let com_vel = vel.weighted_mean(&masses);
        let initial = PhaseState {
            pos: pos.shifted(&com_pos),
            vel: vel.shifted(&com_vel),
        };

        debug!(
            bodies = n,
            h = parameters.h0,
            com_shift = ?com_pos,
            vel_shift = ?com_vel,
            "scenario configured"
        );

        // G is always the fixed constant, only softening comes from parameters
        let gravity = NewtonianGravity::new(masses).with_softening(parameters.eps2);

        Ok(Self {
            parameters,
            gravity,
            initial,
            stepper: None,
            min_separation: None,
        })
    }

    /// Build from the YAML-facing config, checking every vector has 3 components
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, ConfigurationError> {
        let parameters = Parameters::from(&cfg.parameters);

        let mut positions = Vec::with_capacity(cfg.bodies.len());
        let mut velocities = Vec::with_capacity(cfg.bodies.len());
        for (body, bc) in cfg.bodies.iter().enumerate() {
            positions.push(to_vec3(body, "position", &bc.x)?);
            velocities.push(to_vec3(body, "velocity", &bc.v)?);
        }

        Self::new(
            parameters,
            cfg.bodies.iter().map(|bc: &BodyConfig| bc.m).collect(),
            positions,
            velocities,
        )
    }

    /// Start a fresh trajectory at `t = 0` from the normalized initial state
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        let stepper = Rk4::new(self.gravity.clone(), self.parameters.h0, self.initial.clone())?;
        self.stepper = Some(stepper);
        self.min_separation = None;
        debug!(bodies = self.body_count(), "scenario reset");
        Ok(())
    }

    /// Advance the trajectory by one frame.
    ///
    /// The first call after `reset()` returns the initial state at `t = 0`;
    /// each later call performs one RK4 step of size `h0`.
    pub fn advance(&mut self) -> Result<Frame, SimulationError> {
        let stepper = self.stepper.as_mut().ok_or(SimulationError::NotReset)?;
        let (time, state) = stepper.advance();

        if !state.is_finite() {
            warn!(time, "non-finite state, bodies collided or passed too close");
            return Err(SimulationError::NumericDegeneracy { time });
        }

        if let Some(d) = diagnostics::min_separation(&state.pos) {
            self.min_separation = Some(self.min_separation.map_or(d, |m| m.min(d)));
        }

        let positions = state.pos.clone().into_rows();
        trace!(time, min_separation = ?self.min_separation, "frame");

        Ok(Frame {
            time,
            positions,
            min_separation: self.min_separation,
        })
    }

    pub fn masses(&self) -> &[f64] {
        &self.gravity.masses
    }

    pub fn body_count(&self) -> usize {
        self.gravity.masses.len()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn gravity(&self) -> &NewtonianGravity {
        &self.gravity
    }

    pub fn step_size(&self) -> f64 {
        self.parameters.h0
    }

    /// Initial positions after the barycentric shift
    pub fn initial_positions(&self) -> &BodyMatrix {
        &self.initial.pos
    }

    /// Initial velocities after the barycentric shift
    pub fn initial_velocities(&self) -> &BodyMatrix {
        &self.initial.vel
    }

    /// Current `(time, state)` of the running trajectory, if reset
    pub fn state(&self) -> Option<(f64, &PhaseState)> {
        self.stepper.as_ref().map(|s| (s.time(), s.state()))
    }

    /// Running minimum pairwise separation since the last reset
    pub fn min_separation(&self) -> Option<f64> {
        self.min_separation
    }

    pub fn is_ready(&self) -> bool {
        self.stepper.is_some()
    }
}

fn to_vec3(body: usize, what: &'static str, v: &[f64]) -> Result<NVec3, ConfigurationError> {
    match v {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(ConfigurationError::Shape {
            body,
            what,
            found: v.len(),
        }),
    }
}
