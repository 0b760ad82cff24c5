mod types;
mod controls;
mod aero;
mod hydro;
mod terms;
mod dynamics;
mod integrator;
mod snapshot;

pub use types::{BoatState, BoatStepDebug, ControlInput, ControlState};
pub use controls::{advance_controls, decay_toward_zero, integrate_toward};
pub use aero::{compute_sail_forces, AeroDiagnostics, SailForces};
pub use hydro::{compute_hull_forces, engine_grip, HullForces};
pub use dynamics::{step_boat, step_boat_dbg};
pub use integrator::BoatIntegrator;
pub use snapshot::{BoatSnapshot, DerivedReadouts};
