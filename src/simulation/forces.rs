//! Acceleration model for the n-body engine
//!
//! Direct pairwise Newtonian gravity. `NewtonianGravity` is both an
//! [`Acceleration`] term and the [`Derivative`] fed to the RK4 stepper,
//! mapping `(pos, vel)` to `(vel, acc)`.

use super::integrator::Derivative;
use super::states::{BodyMatrix, NVec3, PhaseState};

/// Gravitational constant of the unitless system
pub const G: f64 = 1.0;

/// Acceleration sources operating on a position matrix
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, t: f64, pos: &BodyMatrix, out: &mut [NVec3]);
}

/// 3D Newtonian gravity, direct n^2 sum
///
/// With `eps2 == 0` this is the exact law
/// `a_i = -G sum_j m_j (x_i - x_j) / |x_i - x_j|^3`, with no guard against
/// coincident bodies: a zero separation produces non-finite accelerations.
/// A positive `eps2` adds a squared softening length to every separation.
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct NewtonianGravity {
    pub G: f64,           // gravitational constant
    pub eps2: f64,        // squared softening length, 0 = none
    pub masses: Vec<f64>, // one mass per body, fixed for the scenario
}

impl NewtonianGravity {
    pub fn new(masses: Vec<f64>) -> Self {
        Self {
            G,
            eps2: 0.0,
            masses,
        }
    }

    pub fn with_softening(mut self, eps2: f64) -> Self {
        self.eps2 = eps2;
        self
    }

    /// Fresh acceleration buffer for `pos`
    pub fn accelerations(&self, pos: &BodyMatrix) -> BodyMatrix {
        let mut out = BodyMatrix::zeros(pos.len());
        self.acceleration(0.0, pos, out.rows_mut());
        out
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, pos: &BodyMatrix, out: &mut [NVec3]) {
        let n = pos.len();
        debug_assert_eq!(n, self.masses.len());
        debug_assert_eq!(n, out.len());

        // Each unordered pair (i, j), i < j, once; equal and opposite
        for i in 0..n {
            let xi = pos.row(i);
            let mi = self.masses[i];

            for j in (i + 1)..n {
                let xj = pos.row(j);
                let mj = self.masses[j];

                // r points from i to j: i is pulled along +r, j along -r
                let r = xj - xi;
                let d2 = r.dot(&r) + self.eps2;

                let inv_r = d2.sqrt().recip();
                let coef = self.G * inv_r * inv_r * inv_r;

                out[i] += coef * mj * r;
                out[j] -= coef * mi * r;
            }
        }
    }
}

impl Derivative<PhaseState> for NewtonianGravity {
    fn derivative(&self, _t: f64, y: &PhaseState) -> PhaseState {
        PhaseState {
            pos: y.vel.clone(),
            vel: self.accelerations(&y.pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(dist: f64) -> BodyMatrix {
        BodyMatrix::from_rows(vec![
            NVec3::new(-dist / 2.0, 0.0, 0.0),
            NVec3::new(dist / 2.0, 0.0, 0.0),
        ])
    }

    #[test]
    fn unit_pair_acceleration() {
        let g = NewtonianGravity::new(vec![1.0, 1.0]);
        let acc = g.accelerations(&pair(2.0));
        assert!((acc.row(0) - NVec3::new(0.25, 0.0, 0.0)).norm() < 1e-15);
        assert!((acc.row(1) - NVec3::new(-0.25, 0.0, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn derivative_maps_velocity_to_position_rate() {
        let g = NewtonianGravity::new(vec![1.0, 1.0]);
        let vel = BodyMatrix::from_rows(vec![NVec3::new(0.0, 0.5, 0.0), NVec3::new(0.0, -0.5, 0.0)]);
        let y = PhaseState {
            pos: pair(2.0),
            vel: vel.clone(),
        };
        let dy = g.derivative(0.0, &y);
        assert_eq!(dy.pos, vel);
        assert_eq!(dy.vel, g.accelerations(&y.pos));
    }

    #[test]
    fn coincident_bodies_are_not_finite() {
        let g = NewtonianGravity::new(vec![1.0, 1.0]);
        let acc = g.accelerations(&pair(0.0));
        assert!(!acc.is_finite());
    }

    #[test]
    fn softening_keeps_close_pairs_finite() {
        let g = NewtonianGravity::new(vec![1.0, 1.0]).with_softening(0.1);
        let acc = g.accelerations(&pair(0.0));
        assert!(acc.is_finite());
        assert!(g.accelerations(&pair(1e-9)).row(0).norm() < 1e9);
    }
}
