use std::{net::SocketAddr, path::PathBuf, time::Duration};

use clap::Parser;

use crate::acquisitions::DEFAULT_ACQUISITION_URL;

const MAX_LOOKAHEAD_DAYS: i64 = 366;
const MAX_SWEEP_INTERVAL_HOURS: u64 = 24 * 366;

#[derive(Debug, Clone, Parser)]
#[command(name = "backend", about = "Landsat watch-list server")]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Base URL of the USGS acquisition calendar API
    #[arg(long, env = "USGS_ACQUISITION_URL", default_value = DEFAULT_ACQUISITION_URL)]
    pub acquisition_url: String,

    /// Scene catalogue endpoint queried by /get_landsat_data
    #[arg(long, env = "SCENE_CATALOG_URL", default_value = "http://localhost:8081/scenes")]
    pub scene_catalog_url: String,

    /// Days of overpasses returned after a submission
    #[arg(long, env = "LOOKAHEAD_DAYS", default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..=MAX_LOOKAHEAD_DAYS))]
    pub lookahead_days: u32,

    /// Hours between notification sweeps (0 disables them)
    #[arg(long, env = "SWEEP_INTERVAL_HOURS", default_value_t = 24, value_parser = clap::value_parser!(u64).range(0..=MAX_SWEEP_INTERVAL_HOURS))]
    pub sweep_interval_hours: u64,

    /// Directory with the built frontend to serve at /
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn lookahead(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.lookahead_days))
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_hours > 0).then(|| Duration::from_secs(self.sweep_interval_hours.saturating_mul(3600)))
    }
}
