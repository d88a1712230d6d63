//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size and run length,
//! - optional softening `eps2` (G itself is fixed, see `forces::G`)

use crate::configuration::config::ParametersConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub h0: f64, // fixed step size
    pub t_end: f64, // run length used by the headless driver
    pub eps2: f64, // squared softening length, 0 = none
}

impl Parameters {
    /// Step `h0`, no softening
    pub fn with_step(h0: f64) -> Self {
        Self {
            h0,
            t_end: 0.0,
            eps2: 0.0,
        }
    }

    /// Number of frames after the seed needed to reach `t_end`
    pub fn frame_count(&self) -> usize {
        if self.h0 > 0.0 && self.t_end > 0.0 {
            (self.t_end / self.h0).ceil() as usize
        } else {
            0
        }
    }
}

impl From<&ParametersConfig> for Parameters {
    fn from(cfg: &ParametersConfig) -> Self {
        Self {
            h0: cfg.h0,
            t_end: cfg.t_end,
            eps2: cfg.eps2,
        }
    }
}
