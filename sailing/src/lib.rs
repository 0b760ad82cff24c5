//! Sail, wind and hull physics shared by the simulation loop and its tests.
//!
//! This crate intentionally avoids any ECS types. Every function here is a
//! pure transform of plain data so the integrator can be driven from a Bevy
//! schedule, a test harness or a replay tool alike.

mod math;
pub use math::{heading_basis, wrap_angle, Vec3f};

mod boat_specs;
pub use boat_specs::{
    point_of_sail_for, windpost_sloop, BoatPhysicsSpec, FoilSpec, PointOfSail, PointOfSailKind,
};

mod wind;
pub use wind::WindField;

pub mod sail_physics;
pub use sail_physics::{
    advance_controls, compute_hull_forces, compute_sail_forces, step_boat, step_boat_dbg,
    AeroDiagnostics, BoatIntegrator, BoatSnapshot, BoatState, BoatStepDebug, ControlInput,
    ControlState, DerivedReadouts, HullForces, SailForces,
};

pub mod waves;
