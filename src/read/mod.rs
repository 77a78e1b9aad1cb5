pub mod field;
mod freq;
mod mode;
pub mod sector;
mod sched;
mod site;
mod source;

use std::path::Path;

use log::{debug, warn};

use crate::{sefd::SefdLookup, VexDocument, VexError};
use sector::{Sector, Sectors};

pub(crate) use freq::FreqParser;
pub(crate) use mode::ModeParser;
pub(crate) use sched::SchedParser;
pub(crate) use site::SiteParser;
pub(crate) use source::SourceParser;

/// A line-by-line state machine for one VEX sector. A fresh parser is made
/// for every sector of every document.
pub(crate) trait SectorParse {
    type Output;

    /// The name of the sector this parser consumes, e.g. "SOURCE".
    const SECTOR: &'static str;

    /// Feed the next (non-blank) line of the sector. `line_num` is the
    /// 1-indexed line number within the whole file.
    fn parse_line(&mut self, line_num: usize, line: &str) -> Result<(), VexError>;

    /// No more lines; produce the sector's records.
    fn finish(self) -> Result<Self::Output, VexError>;
}

/// Run a sector parser over every line of a sector.
pub(crate) fn parse_sector<P: SectorParse>(
    mut parser: P,
    sector: &Sector,
) -> Result<P::Output, VexError> {
    for (line_num, line) in sector.numbered_lines() {
        if line.trim().is_empty() {
            continue;
        }
        parser.parse_line(line_num, line)?;
    }
    parser.finish()
}

/// Find a sector that must be present.
fn required_sector<'s, 'a>(
    sectors: &'s Sectors<'a>,
    name: &'static str,
) -> Result<&'s Sector<'a>, VexError> {
    sectors.get(name).ok_or(VexError::MissingSector(name))
}

/// Parse the text of a whole VEX file.
pub(crate) fn read_vex(text: &str, sefd: &dyn SefdLookup) -> Result<VexDocument, VexError> {
    let sectors = Sectors::split(text.lines());
    debug!("Found {} sectors", sectors.len());

    let sources = match sectors.get(SourceParser::SECTOR) {
        Some(sector) => parse_sector(SourceParser::default(), sector)?,
        None => vec![],
    };
    debug!("Read {} sources", sources.len());

    let freq = parse_sector(
        FreqParser::default(),
        required_sector(&sectors, FreqParser::SECTOR)?,
    )?;
    debug!(
        "Centre frequency: {} Hz, bandwidth: {} Hz",
        freq.center_frequency_hz, freq.bandwidth_hz
    );

    let (sites, station_ids) = parse_sector(
        SiteParser::new(sefd),
        required_sector(&sectors, SiteParser::SECTOR)?,
    )?;
    debug!("Read {} sites", sites.len());

    let schedule = parse_sector(
        SchedParser::new(&station_ids),
        required_sector(&sectors, SchedParser::SECTOR)?,
    )?;
    debug!("Read {} scans", schedule.len());

    // Only used to check our one-mode assumption.
    if let Some(sector) = sectors.iter().find(|s| s.is_named(ModeParser::SECTOR)) {
        let num_modes = parse_sector(ModeParser::default(), sector)?;
        if num_modes > 1 {
            warn!("The $MODE sector defines {num_modes} modes; only one mode per file is supported");
        }
    }

    Ok(VexDocument {
        filename: None,
        bandwidth_hz: freq.bandwidth_hz,
        center_frequency_hz: freq.center_frequency_hz,
        sources,
        freq,
        sites,
        schedule,
        station_ids,
    })
}

/// Read and parse a VEX file on disk.
pub(crate) fn read_vex_file(file: &Path, sefd: &dyn SefdLookup) -> Result<VexDocument, VexError> {
    debug!("Using VEX file: {}", file.display());
    let text = std::fs::read_to_string(file).map_err(|source| VexError::Io {
        file: file.to_path_buf(),
        source,
    })?;
    let mut vex = read_vex(&text, sefd)?;
    vex.filename = Some(file.to_path_buf());
    Ok(vex)
}
