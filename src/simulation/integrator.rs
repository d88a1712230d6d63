//! Fixed-step time integrator
//!
//! `Rk4` is a classic 4-stage Runge-Kutta stepper over any state type that
//! can be added and scaled. It is driven from outside: every call to
//! [`Rk4::advance`] yields exactly one `(t, state)` pair, starting with the
//! untouched seed at `t = 0`. There is no step control and no rewind; a new
//! trajectory means a new `Rk4`.

use std::ops::{Add, Mul};

use super::error::ConfigurationError;

/// Right-hand side of `dy/dt = f(t, y)`
pub trait Derivative<S> {
    fn derivative(&self, t: f64, y: &S) -> S;
}

impl<S, F> Derivative<S> for F
where
    F: Fn(f64, &S) -> S,
{
    fn derivative(&self, t: f64, y: &S) -> S {
        self(t, y)
    }
}

/// Fixed-step RK4 stepper holding the only mutable state of a trajectory
#[derive(Debug, Clone)]
pub struct Rk4<S, D> {
    f: D,
    h: f64,
    steps: u64, // completed RK4 updates
    y: S,
    seeded: bool, // seed pair already handed out
}

impl<S, D> Rk4<S, D>
where
    S: Clone + Add<Output = S> + Mul<f64, Output = S>,
    D: Derivative<S>,
{
    /// Stepper starting at `t = 0` with state `y0` and step `h`
    pub fn new(f: D, h: f64, y0: S) -> Result<Self, ConfigurationError> {
        if !(h.is_finite() && h > 0.0) {
            return Err(ConfigurationError::InvalidStep(h));
        }
        Ok(Self {
            f,
            h,
            steps: 0,
            y: y0,
            seeded: false,
        })
    }

    /// Yield the next `(t, y)` pair.
    ///
    /// The first call returns the seed without touching the derivative.
    /// Each later call performs one RK4 update:
    /// - k1 = f(t, y)
    /// - k2 = f(t + h/2, y + h/2 k1)
    /// - k3 = f(t + h/2, y + h/2 k2)
    /// - k4 = f(t + h, y + h k3)
    /// - y' = y + h/6 (k1 + 2 k2 + 2 k3 + k4)
    pub fn advance(&mut self) -> (f64, &S) {
        if !self.seeded {
            self.seeded = true;
            return (self.time(), &self.y);
        }

        let h = self.h;
        let half_h = 0.5 * h;
        let t = self.time();
        let y = &self.y;

        let k1 = self.f.derivative(t, y);
        let k2 = self.f.derivative(t + half_h, &(y.clone() + k1.clone() * half_h));
        let k3 = self.f.derivative(t + half_h, &(y.clone() + k2.clone() * half_h));
        let k4 = self.f.derivative(t + h, &(y.clone() + k3.clone() * h));

        let incr = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0);
        self.y = incr + self.y.clone();

        // t_n = n * h, not a running sum, so times stay exact multiples of h
        self.steps += 1;
        (self.time(), &self.y)
    }

    /// Time of the current state
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.h
    }

    pub fn state(&self) -> &S {
        &self.y
    }

    pub fn step_size(&self) -> f64 {
        self.h
    }

    /// Number of RK4 updates performed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_advance_is_seed() {
        let calls = std::cell::Cell::new(0);
        let f = |_t: f64, y: &f64| {
            calls.set(calls.get() + 1);
            *y
        };
        let mut rk = Rk4::new(f, 0.1, 2.0).unwrap();
        let (t, y) = rk.advance();
        assert_eq!(t, 0.0);
        assert_eq!(*y, 2.0);
        assert_eq!(calls.get(), 0);

        rk.advance();
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn exponential_growth_matches_rk4_factor() {
        // y' = y, one step multiplies by 1 + h + h^2/2 + h^3/6 + h^4/24
        let h: f64 = 0.1;
        let mut rk = Rk4::new(|_t: f64, y: &f64| *y, h, 1.0).unwrap();
        rk.advance();
        let (t, y) = rk.advance();
        let factor = 1.0 + h + h * h / 2.0 + h.powi(3) / 6.0 + h.powi(4) / 24.0;
        assert_eq!(t, h);
        assert!((*y - factor).abs() < 1e-14);
    }

    #[test]
    fn exact_for_cubic_in_time() {
        // y' = 3t^2 -> y = t^3, integrated exactly by RK4
        let mut rk = Rk4::new(|t: f64, _y: &f64| 3.0 * t * t, 0.25, 0.0).unwrap();
        rk.advance();
        for _ in 0..8 {
            rk.advance();
        }
        assert_eq!(rk.steps(), 8);
        assert!((rk.state() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn times_are_multiples_of_h() {
        let h = 0.01;
        let mut rk = Rk4::new(|_t: f64, _y: &f64| 0.0, h, 0.0).unwrap();
        for n in 0..500u32 {
            let (t, _) = rk.advance();
            assert_eq!(t, n as f64 * h);
        }
    }

    #[test]
    fn rejects_bad_step() {
        let f = |_t: f64, y: &f64| *y;
        assert!(matches!(Rk4::new(f, 0.0, 1.0), Err(ConfigurationError::InvalidStep(_))));
        assert!(Rk4::new(f, -0.1, 1.0).is_err());
        assert!(Rk4::new(f, f64::NAN, 1.0).is_err());
    }
}
