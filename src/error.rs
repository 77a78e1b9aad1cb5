//! Errors that can abort the reading of a VEX file.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VexError {
    #[error("Couldn't read '{}': {source}", .file.display())]
    Io {
        file: PathBuf,
        source: std::io::Error,
    },

    #[error("The VEX file has no ${0} sector, but it is required")]
    MissingSector(&'static str),

    #[error("Line {line_num}: station '{id}' isn't defined by any site_ID in the $SITE sector")]
    UnmappedStation { id: String, line_num: usize },

    #[error("Line {line_num}: the {sector} block ending here never set '{field}'")]
    MissingField {
        sector: &'static str,
        field: &'static str,
        line_num: usize,
    },

    #[error("Line {line_num}: expected at least {expected} numbers for '{field}', found {found}")]
    TooFewNumbers {
        field: &'static str,
        expected: usize,
        found: usize,
        line_num: usize,
    },

    #[error("The first def block of the $FREQ sector has no chan_def line")]
    NoChannelDefinition,

    #[error("'{0}' is not a VEX date (expected something like 2016y099d05h00m00s)")]
    InvalidDate(String),

    #[error("Couldn't parse '{0}' as a number")]
    ParseNumber(String),

    #[error("The $SITE sector defines no sites; an array table can't be empty")]
    NoSites,

    #[error("No scans in the schedule observe source '{0}'")]
    NoScheduleOverlap(String),
}
