use bevy::prelude::*;
use sailing::PointOfSailKind;
use tracing::{debug, info};

use crate::boat::{BoatSim, BoatTelemetry};
use crate::{SimClock, SimSettings};

#[derive(Resource, Debug, Clone, Default)]
pub struct TelemetryLog {
    pub next_log_at: f32,
    pub last_point_of_sail: Option<PointOfSailKind>,
    pub last_engine_on: bool,
}

pub fn log_telemetry(
    clock: Res<SimClock>,
    settings: Res<SimSettings>,
    sim: Res<BoatSim>,
    telemetry: Res<BoatTelemetry>,
    mut log: ResMut<TelemetryLog>,
) {
    if clock.last_dt <= 0.0 {
        return;
    }
    let snap = sim.snapshot();
    let d = &snap.derived;

    if snap.engine_on != log.last_engine_on {
        debug!(
            t = clock.elapsed,
            engine_on = snap.engine_on,
            throttle = snap.throttle,
            "Engine toggled"
        );
        log.last_engine_on = snap.engine_on;
    }
    if log.last_point_of_sail != Some(d.point_of_sail) {
        debug!(
            t = clock.elapsed,
            point_of_sail = ?d.point_of_sail,
            twa_deg = d.true_wind_angle.to_degrees(),
            "Point of sail changed"
        );
        log.last_point_of_sail = Some(d.point_of_sail);
    }

    if clock.elapsed < log.next_log_at {
        return;
    }
    log.next_log_at = clock.elapsed + settings.log_interval_secs;
    let t = &telemetry.0;
    info!(
        t = clock.elapsed,
        tick = clock.ticks,
        x = snap.position.x,
        z = snap.position.z,
        heading_deg = snap.heading.to_degrees(),
        speed = snap.speed,
        v_forward = t.v_forward,
        v_right = t.v_right,
        rudder_deg = snap.rudder_angle.to_degrees(),
        sail_deg = snap.sail_angle.to_degrees(),
        deploy = snap.sail_deploy_fraction,
        engine_on = snap.engine_on,
        throttle = snap.throttle,
        point_of_sail = ?d.point_of_sail,
        trim_eff = d.trim_efficiency,
        drive_eff = d.drive_efficiency,
        apparent_speed = t.apparent_speed,
        tau_total = t.tau_total,
        "Boat"
    );
}

pub fn exit_when_done(
    clock: Res<SimClock>,
    settings: Res<SimSettings>,
    mut exit: EventWriter<AppExit>,
    mut sent: Local<bool>,
) {
    let Some(duration) = settings.duration_secs else {
        return;
    };
    if *sent || clock.elapsed < duration {
        return;
    }
    info!(t = clock.elapsed, ticks = clock.ticks, "Duration reached, exiting");
    exit.write(AppExit::Success);
    *sent = true;
}
