pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{BodyMatrix, PhaseState, NVec3};
pub use simulation::forces::{Acceleration, NewtonianGravity, G};
pub use simulation::integrator::{Derivative, Rk4};
pub use simulation::error::{ConfigurationError, SimulationError};
pub use simulation::params::Parameters;
pub use simulation::scenario::{Frame, Scenario};

pub use configuration::config::{BodyConfig, LoadError, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_rk4};
