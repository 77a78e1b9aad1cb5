//! Read VEX-format VLBI schedules into a form an observation simulator can use.

pub mod array;
mod error;
pub mod read;
pub mod schedule;
pub mod sefd;
pub mod time;

pub use array::{ArrayStation, SiteRecord, StationIdMap};
pub use error::VexError;
pub use read::field::extract_field;
pub use schedule::{ScheduleEntry, StationScan};
pub use sefd::{NoSiteTable, SefdLookup, SiteTable, DEFAULT_SEFD};
pub use time::vexdate_to_mjd_hr;

use std::path::{Path, PathBuf};

use vec1::Vec1;

/// A source defined in the $SOURCE sector. The coordinates are kept as they
/// are written in the VEX file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub name: String,
    pub ra: String,
    pub dec: String,
    pub coordinate_frame: String,
}

/// The frequency setup of the first $FREQ definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySetting {
    /// \[Hz\]
    pub center_frequency_hz: f64,
    /// \[Hz\]
    pub bandwidth_hz: f64,
}

/// Everything read from a VEX file. Only one observing mode is supported.
#[derive(Debug, Clone, PartialEq)]
pub struct VexDocument {
    /// The file this was read from, if it was read from a file.
    pub filename: Option<PathBuf>,

    /// The same as `freq.bandwidth_hz` \[Hz\].
    pub bandwidth_hz: f64,

    /// The same as `freq.center_frequency_hz` \[Hz\].
    pub center_frequency_hz: f64,

    /// All sources, in file order. Empty if there is no $SOURCE sector.
    pub sources: Vec<SourceRecord>,

    pub freq: FrequencySetting,

    /// All sites, in file order.
    pub sites: Vec<SiteRecord>,

    /// All scans, in file order.
    pub schedule: Vec<ScheduleEntry>,

    /// site_ID -> site name.
    pub station_ids: StationIdMap,
}

impl VexDocument {
    /// Read a VEX file. SEFDs of the sites are taken from `sefd_lookup`.
    pub fn from_file<P: AsRef<Path>>(
        file: P,
        sefd_lookup: &dyn SefdLookup,
    ) -> Result<VexDocument, VexError> {
        read::read_vex_file(file.as_ref(), sefd_lookup)
    }

    /// Parse the contents of a VEX file. SEFDs of the sites are taken from
    /// `sefd_lookup`.
    pub fn parse_str(text: &str, sefd_lookup: &dyn SefdLookup) -> Result<VexDocument, VexError> {
        read::read_vex(text, sefd_lookup)
    }

    /// The array table expected by the observation simulator, one row per
    /// site.
    pub fn array_table(&self) -> Result<Vec1<ArrayStation>, VexError> {
        array::array_table(&self.sites)
    }

    /// The array table rows of the stations taking part in a scan, in the
    /// scan's order.
    pub fn subarray(&self, scan: &ScheduleEntry) -> Vec<ArrayStation> {
        scan.site_names()
            .filter_map(|name| self.sites.iter().find(|s| s.name == name))
            .map(ArrayStation::from)
            .collect()
    }

    /// All scans observing `source`.
    pub fn scans_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a ScheduleEntry> {
        self.schedule.iter().filter(move |s| s.source == source)
    }

    /// All scans observing `source`; it is an error if there are none.
    pub fn scans_of_required(&self, source: &str) -> Result<Vec1<&ScheduleEntry>, VexError> {
        let scans = self.schedule.iter().filter(|s| s.source == source).collect();
        Vec1::try_from_vec(scans).map_err(|_| VexError::NoScheduleOverlap(source.to_string()))
    }

    pub fn source(&self, name: &str) -> Option<&SourceRecord> {
        self.sources.iter().find(|s| s.name == name)
    }
}
