use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::RwLock;
use sailing::waves::HullAttitude;
use sailing::{BoatIntegrator, BoatSnapshot, BoatStepDebug};
use tracing::debug;

use crate::script::ControlIntents;
use crate::{sanitize_dt, SimClock, SimSettings};

#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct BoatSim(pub BoatIntegrator);

/// Diagnostics of the last completed tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct BoatTelemetry(pub BoatStepDebug);

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct BoatAttitude(pub HullAttitude);

/// One completed tick as seen by readers outside the schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PublishedSnapshot {
    pub tick: u64,
    pub sim_time: f32,
    pub snapshot: BoatSnapshot,
}

/// Latest snapshot, shared with any thread. The boat tick is the only writer
/// and replaces the whole value under the lock, so readers never see a
/// half-written snapshot.
#[derive(Resource, Debug, Clone, Default)]
pub struct SnapshotBuffer(Arc<RwLock<Option<PublishedSnapshot>>>);

impl SnapshotBuffer {
    pub fn publish(&self, snap: PublishedSnapshot) {
        *self.0.write() = Some(snap);
    }

    pub fn latest(&self) -> Option<PublishedSnapshot> {
        *self.0.read()
    }
}

pub fn tick_boat(
    time: Res<Time>,
    settings: Res<SimSettings>,
    mut clock: ResMut<SimClock>,
    mut intents: ResMut<ControlIntents>,
    mut sim: ResMut<BoatSim>,
    mut telemetry: ResMut<BoatTelemetry>,
    buffer: Res<SnapshotBuffer>,
) {
    if std::mem::take(&mut intents.reset_pending) {
        sim.reset();
        telemetry.0 = BoatStepDebug::default();
        buffer.publish(PublishedSnapshot {
            tick: clock.ticks,
            sim_time: clock.elapsed,
            snapshot: sim.snapshot(),
        });
        debug!(t = clock.elapsed, "Boat reset");
    }

    let dt = sanitize_dt(time.delta_secs(), settings.dt_max);
    clock.last_dt = dt;
    if dt <= 0.0 {
        return;
    }

    clock.elapsed += dt;
    clock.ticks += 1;
    let input = intents.take_input();
    let snapshot = sim.tick(dt, clock.elapsed, input);
    telemetry.0 = *sim.last_step();
    buffer.publish(PublishedSnapshot { tick: clock.ticks, sim_time: clock.elapsed, snapshot });
}

pub fn update_attitude(
    clock: Res<SimClock>,
    sim: Res<BoatSim>,
    mut attitude: ResMut<BoatAttitude>,
) {
    if clock.last_dt <= 0.0 {
        return;
    }
    attitude.0.update(&sim.snapshot(), clock.elapsed, clock.last_dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sailing::{BoatPhysicsSpec, WindField};

    #[test]
    fn readers_on_other_threads_see_whole_snapshots() {
        let buffer = SnapshotBuffer::default();
        let mut sim = BoatIntegrator::new(BoatPhysicsSpec::default(), WindField::default());

        let reader = {
            let buffer = buffer.clone();
            std::thread::spawn(move || {
                let mut last_tick = 0;
                for _ in 0..10_000 {
                    if let Some(p) = buffer.latest() {
                        assert!(p.tick >= last_tick, "tick went backwards");
                        // Time and tick are written together
                        assert!((p.sim_time - p.tick as f32 * 0.01).abs() < 1e-3);
                        assert!(p.snapshot.position.is_finite());
                        last_tick = p.tick;
                    }
                }
                last_tick
            })
        };

        for tick in 1..=2_000u64 {
            let t = tick as f32 * 0.01;
            let snapshot = sim.tick(0.01, t, Default::default());
            buffer.publish(PublishedSnapshot { tick, sim_time: t, snapshot });
        }
        let seen = reader.join().expect("reader thread");
        assert!(seen <= 2_000);
        assert_eq!(buffer.latest().map(|p| p.tick), Some(2_000));
    }
}
