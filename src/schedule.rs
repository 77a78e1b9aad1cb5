//! Scans of the $SCHED sector.

use hifitime::Epoch;

use crate::time::mjd_hr_to_epoch;

/// One station's participation in a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct StationScan {
    /// The full site name (not the site_ID used in the VEX file).
    pub site_name: String,

    /// Seconds after the scan start at which this station starts recording.
    pub scan_start_sec: f64,

    /// Seconds after the scan start at which this station stops recording.
    pub scan_end_sec: f64,

    /// \[GB\]
    pub data_size_gb: f64,
}

/// A `scan ... endscan` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    /// The MJD of the day this scan starts on.
    pub mjd_floor: u32,

    /// The UT hour on `mjd_floor` at which this scan starts. Not range
    /// checked.
    pub start_hour: f64,

    pub mode: String,

    pub source: String,

    /// In the order listed in the VEX file.
    pub stations: Vec<StationScan>,
}

impl ScheduleEntry {
    /// The (fractional) MJD of the scan start.
    pub fn start_mjd(&self) -> f64 {
        f64::from(self.mjd_floor) + self.start_hour / 24.0
    }

    /// The scan start as a UTC [`Epoch`].
    pub fn start_epoch(&self) -> Epoch {
        mjd_hr_to_epoch(self.mjd_floor, self.start_hour)
    }

    /// The length of the scan \[seconds\]. This is taken from the first
    /// listed station; `None` if no stations take part.
    pub fn duration_sec(&self) -> Option<f64> {
        self.stations.first().map(|s| s.scan_end_sec)
    }

    /// The latest end time of any station in this scan \[seconds\].
    pub fn longest_station_sec(&self) -> Option<f64> {
        self.stations
            .iter()
            .map(|s| s.scan_end_sec)
            .reduce(f64::max)
    }

    /// The (fractional) MJD of the scan end, using [`Self::duration_sec`].
    pub fn stop_mjd(&self) -> Option<f64> {
        self.duration_sec()
            .map(|d| self.start_mjd() + d / 86400.0)
    }

    /// The names of the stations in this scan, in VEX order.
    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(|s| s.site_name.as_str())
    }
}
