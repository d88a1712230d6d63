use std::time::Instant;

use crate::simulation::forces::{Acceleration, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{BodyMatrix, NVec3};

/// Deterministic spread of `n` bodies, no rand needed
fn make_positions(n: usize) -> Vec<NVec3> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            NVec3::new(
                (i_f * 0.37).sin() * 5.0 + i_f * 1e-3,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            )
        })
        .collect()
}

fn make_scenario(n: usize) -> Option<Scenario> {
    let mut params = Parameters::with_step(0.001);
    params.eps2 = 1e-4;
    Scenario::new(params, vec![1.0; n], make_positions(n), vec![NVec3::zeros(); n]).ok()
}

/// Time one direct-sum acceleration evaluation for growing N
pub fn bench_gravity() {
    let ns = [50, 100, 200, 400, 800, 1600];

    for n in ns {
        let pos = BodyMatrix::from_rows(make_positions(n));
        let gravity = NewtonianGravity::new(vec![1.0; n]).with_softening(1e-4);
        let mut out = vec![NVec3::zeros(); n];

        // Warm up
        gravity.acceleration(0.0, &pos, &mut out);

        let t0 = Instant::now();
        gravity.acceleration(0.0, &pos, &mut out);
        let dt = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, gravity = {:8.6} s", dt);
    }
}

/// Time full orchestrator frames (one RK4 step each) for growing N
/// Prints CSV, paste into a spreadsheet to graph
pub fn bench_rk4() {
    println!("N,frame_ms");

    for n in (50..=800).step_by(50) {
        // Small n: average over more frames to smooth noise
        let frames = if n <= 200 { 20 } else { 3 };

        let Some(mut scenario) = make_scenario(n) else {
            continue;
        };
        if scenario.reset().is_err() {
            continue;
        }
        // Seed frame, no integration
        let _ = scenario.advance();

        let t0 = Instant::now();
        for _ in 0..frames {
            if scenario.advance().is_err() {
                break;
            }
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / frames as f64;

        println!("{},{:.6}", n, ms);
    }
}
