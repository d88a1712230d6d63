//! Conserved-quantity and separation diagnostics over a `PhaseState`

use super::forces::NewtonianGravity;
use super::states::{BodyMatrix, NVec3, PhaseState};

pub fn total_mass(masses: &[f64]) -> f64 {
    masses.iter().sum()
}

/// Mass-weighted mean position
pub fn center_of_mass(masses: &[f64], pos: &BodyMatrix) -> NVec3 {
    pos.weighted_mean(masses)
}

/// sum(m_i v_i)
pub fn total_momentum(masses: &[f64], vel: &BodyMatrix) -> NVec3 {
    vel.iter()
        .zip(masses)
        .fold(NVec3::zeros(), |acc, (v, m)| acc + v * *m)
}

pub fn kinetic_energy(masses: &[f64], vel: &BodyMatrix) -> f64 {
    vel.iter()
        .zip(masses)
        .map(|(v, m)| 0.5 * m * v.norm_squared())
        .sum()
}

/// -G sum_{i<j} m_i m_j / sqrt(|x_i - x_j|^2 + eps2)
pub fn potential_energy(gravity: &NewtonianGravity, pos: &BodyMatrix) -> f64 {
    let n = pos.len();
    let mut u = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = ((pos.row(j) - pos.row(i)).norm_squared() + gravity.eps2).sqrt();
            u -= gravity.G * gravity.masses[i] * gravity.masses[j] / d;
        }
    }
    u
}

pub fn total_energy(gravity: &NewtonianGravity, state: &PhaseState) -> f64 {
    kinetic_energy(&gravity.masses, &state.vel) + potential_energy(gravity, &state.pos)
}

/// Smallest distance between any two bodies, `None` with fewer than two
pub fn min_separation(pos: &BodyMatrix) -> Option<f64> {
    let n = pos.len();
    let mut min: Option<f64> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = (pos.row(i) - pos.row(j)).norm();
            min = Some(match min {
                Some(m) if m <= d => m,
                _ => d,
            });
        }
    }
    min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_body_energy() {
        let gravity = NewtonianGravity::new(vec![1.0, 1.0]);
        let state = PhaseState {
            pos: BodyMatrix::from_rows(vec![NVec3::new(-1.0, 0.0, 0.0), NVec3::new(1.0, 0.0, 0.0)]),
            vel: BodyMatrix::from_rows(vec![NVec3::new(0.0, 0.5, 0.0), NVec3::new(0.0, -0.5, 0.0)]),
        };
        // K = 2 * 0.5 * 0.25, U = -1 / 2
        assert!((kinetic_energy(&gravity.masses, &state.vel) - 0.25).abs() < 1e-15);
        assert!((potential_energy(&gravity, &state.pos) + 0.5).abs() < 1e-15);
        assert!((total_energy(&gravity, &state) + 0.25).abs() < 1e-15);
        assert_eq!(total_momentum(&gravity.masses, &state.vel), NVec3::zeros());
    }

    #[test]
    fn separation() {
        let pos = BodyMatrix::from_rows(vec![
            NVec3::new(0.0, 0.0, 0.0),
            NVec3::new(3.0, 4.0, 0.0),
            NVec3::new(0.0, 0.0, 2.0),
        ]);
        assert_eq!(min_separation(&pos), Some(2.0));
        assert_eq!(min_separation(&BodyMatrix::zeros(1)), None);
    }
}
