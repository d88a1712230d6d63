//! Core state types for the N-body simulation.
//!
//! - `NVec3` is a plain nalgebra 3-vector (position, velocity, acceleration)
//! - `BodyMatrix` is an N x 3 matrix, one `NVec3` row per body
//! - `PhaseState` pairs the position and velocity matrices; this is the
//!   state the RK4 stepper integrates
//!
//! Row-count mismatches in the arithmetic below are precondition violations
//! and panic. Correctly built states never trigger them.

use std::ops::{Add, Mul, Sub};

use nalgebra::Vector3;

pub type NVec3 = Vector3<f64>;

/// N x 3 matrix stored row-major as one `NVec3` per body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyMatrix {
    rows: Vec<NVec3>,
}

impl BodyMatrix {
    /// N rows of zeros
    pub fn zeros(n: usize) -> Self {
        Self {
            rows: vec![NVec3::zeros(); n],
        }
    }

    pub fn from_rows(rows: Vec<NVec3>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy of row `i`
    pub fn row(&self, i: usize) -> NVec3 {
        self.rows[i]
    }

    pub fn set_row(&mut self, i: usize, v: NVec3) {
        self.rows[i] = v;
    }

    pub fn rows(&self) -> &[NVec3] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [NVec3] {
        &mut self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NVec3> {
        self.rows.iter()
    }

    /// Weighted mean of the rows: sum(w_i * row_i) / sum(w_i)
    pub fn weighted_mean(&self, weights: &[f64]) -> NVec3 {
        assert_eq!(self.rows.len(), weights.len(), "weight count must match row count");
        let total: f64 = weights.iter().sum();
        let sum = self
            .rows
            .iter()
            .zip(weights)
            .fold(NVec3::zeros(), |acc, (r, w)| acc + r * *w);
        sum / total
    }

    /// Every row minus `offset`
    pub fn shifted(&self, offset: &NVec3) -> Self {
        Self {
            rows: self.rows.iter().map(|r| r - offset).collect(),
        }
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(|c| c.is_finite()))
    }

    pub fn into_rows(self) -> Vec<NVec3> {
        self.rows
    }
}

impl From<Vec<NVec3>> for BodyMatrix {
    fn from(rows: Vec<NVec3>) -> Self {
        Self::from_rows(rows)
    }
}

impl Add for BodyMatrix {
    type Output = BodyMatrix;

    fn add(mut self, rhs: BodyMatrix) -> BodyMatrix {
        assert_eq!(self.rows.len(), rhs.rows.len(), "row count mismatch in add");
        for (a, b) in self.rows.iter_mut().zip(rhs.rows.iter()) {
            *a += b;
        }
        self
    }
}

impl Sub for BodyMatrix {
    type Output = BodyMatrix;

    fn sub(mut self, rhs: BodyMatrix) -> BodyMatrix {
        assert_eq!(self.rows.len(), rhs.rows.len(), "row count mismatch in sub");
        for (a, b) in self.rows.iter_mut().zip(rhs.rows.iter()) {
            *a -= b;
        }
        self
    }
}

impl Mul<f64> for BodyMatrix {
    type Output = BodyMatrix;

    fn mul(mut self, s: f64) -> BodyMatrix {
        for r in self.rows.iter_mut() {
            *r *= s;
        }
        self
    }
}

/// Combined (position, velocity) state of every body
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseState {
    pub pos: BodyMatrix, // N x 3 positions
    pub vel: BodyMatrix, // N x 3 velocities
}

impl PhaseState {
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}

impl Add for PhaseState {
    type Output = PhaseState;

    fn add(self, rhs: PhaseState) -> PhaseState {
        PhaseState {
            pos: self.pos + rhs.pos,
            vel: self.vel + rhs.vel,
        }
    }
}

impl Mul<f64> for PhaseState {
    type Output = PhaseState;

    fn mul(self, s: f64) -> PhaseState {
        PhaseState {
            pos: self.pos * s,
            vel: self.vel * s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[[f64; 3]]) -> BodyMatrix {
        rows.iter().map(|r| NVec3::new(r[0], r[1], r[2])).collect::<Vec<_>>().into()
    }

    #[test]
    fn elementwise_ops() {
        let a = m(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = m(&[[0.5, 0.5, 0.5], [1.0, 1.0, 1.0]]);

        assert_eq!(a.clone() + b.clone(), m(&[[1.5, 2.5, 3.5], [5.0, 6.0, 7.0]]));
        assert_eq!(a.clone() - b, m(&[[0.5, 1.5, 2.5], [3.0, 4.0, 5.0]]));
        assert_eq!(a * 2.0, m(&[[2.0, 4.0, 6.0], [8.0, 10.0, 12.0]]));
    }

    #[test]
    fn weighted_mean_and_shift() {
        let pos = m(&[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0]]);
        let com = pos.weighted_mean(&[2.0, 1.0]);
        assert!((com - NVec3::new(1.0, 0.0, 0.0)).norm() < 1e-15);

        let shifted = pos.shifted(&com);
        assert_eq!(shifted.row(0), NVec3::new(-1.0, 0.0, 0.0));
        assert_eq!(shifted.row(1), NVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn row_access() {
        let mut z = BodyMatrix::zeros(3);
        assert_eq!(z.len(), 3);
        z.set_row(1, NVec3::new(1.0, 2.0, 2.0));
        assert_eq!(z.row(1).norm(), 3.0);
        assert_eq!(z.row(0), NVec3::zeros());
    }

    #[test]
    fn finiteness() {
        let mut z = BodyMatrix::zeros(2);
        assert!(z.is_finite());
        z.set_row(0, NVec3::new(f64::NAN, 0.0, 0.0));
        assert!(!z.is_finite());
    }

    #[test]
    #[should_panic]
    fn mismatched_rows_panic() {
        let _ = BodyMatrix::zeros(2) + BodyMatrix::zeros(3);
    }
}
