//! Ride log export.
//!
//! One comma-separated record per ride, no header:
//! `rideId,riderName,pickup,destination,fare,driverName,timestamp`.
//! This is the input format of the offline ride analytics jobs.

use crate::models::ride::Ride;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn render_ride_log(rides: &[Ride]) -> String {
    let mut out = String::with_capacity(rides.len() * 64);
    for ride in rides {
        out.push_str(&ride.log_record());
        out.push('\n');
    }
    out
}

/// Write the log next to `path` and rename it into place
pub fn write_ride_log(path: &Path, rides: &[Ride]) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    let mut file = fs::File::create(&tmp_path)
        .context(format!("Failed to create ride log: {}", tmp_path.display()))?;
    file.write_all(render_ride_log(rides).as_bytes())
        .context("Failed to write ride log")?;
    file.sync_all().context("Failed to sync ride log")?;

    fs::rename(&tmp_path, path)
        .context(format!("Failed to move ride log into place: {}", path.display()))?;

    Ok(())
}
