use std::path::PathBuf;

use bevy::prelude::Resource;
use clap::Parser;

use crate::Config;

#[derive(Parser, Debug, Resource, Clone)]
#[command(name = "windpost-sim")]
#[command(about = "Headless sailing simulator", long_about = None)]
pub struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,
    /// Stop after this many seconds of simulated time
    #[arg(long)]
    pub duration: Option<f32>,
    /// Frame rate of the headless loop (overrides [sim].tick_hz)
    #[arg(long)]
    pub tick_hz: Option<f64>,
}

impl Args {
    /// Command-line flags win over whatever the config file says.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(secs) = self.duration {
            cfg.sim.duration_secs = Some(secs);
        }
        if let Some(hz) = self.tick_hz {
            cfg.sim.tick_hz = hz;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from(["windpost-sim", "--duration", "12.5", "--tick-hz", "30"]);
        assert_eq!(args.config, PathBuf::from("config.toml"));
        let mut cfg = Config::default();
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.sim.duration_secs, Some(12.5));
        assert_eq!(cfg.sim.tick_hz, 30.0);
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let args = Args::parse_from(["windpost-sim", "--config", "other.toml"]);
        let mut cfg = Config::default();
        cfg.sim.duration_secs = Some(3.0);
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.sim.duration_secs, Some(3.0));
        assert_eq!(cfg.sim.tick_hz, 60.0);
    }
}
