//! The $SCHED sector.

use log::trace;

use super::{
    field::{extract_field, locate_field, parse_leading_numbers, starts_with_keyword},
    SectorParse,
};
use crate::{
    array::StationIdMap,
    schedule::{ScheduleEntry, StationScan},
    time::vexdate_to_mjd_hr,
    VexError,
};

#[derive(Debug, Default)]
struct PendingScan {
    start: Option<(u32, f64)>,
    mode: Option<String>,
    source: Option<String>,
    stations: Vec<StationScan>,
}

impl PendingScan {
    fn finish(self, line_num: usize) -> Result<ScheduleEntry, VexError> {
        let missing = |field| VexError::MissingField {
            sector: SchedParser::SECTOR,
            field,
            line_num,
        };
        let (mjd_floor, start_hour) = self.start.ok_or_else(|| missing("start"))?;
        Ok(ScheduleEntry {
            mjd_floor,
            start_hour,
            mode: self.mode.ok_or_else(|| missing("mode"))?,
            source: self.source.ok_or_else(|| missing("source"))?,
            stations: self.stations,
        })
    }
}

pub(crate) struct SchedParser<'m> {
    station_ids: &'m StationIdMap,
    in_scan: bool,
    pending: PendingScan,
    schedule: Vec<ScheduleEntry>,
}

impl<'m> SchedParser<'m> {
    /// `station_ids` must hold every site_ID of the $SITE sector.
    pub(crate) fn new(station_ids: &'m StationIdMap) -> SchedParser<'m> {
        SchedParser {
            station_ids,
            in_scan: false,
            pending: PendingScan::default(),
            schedule: vec![],
        }
    }
}

impl SectorParse for SchedParser<'_> {
    type Output = Vec<ScheduleEntry>;
    const SECTOR: &'static str = "SCHED";

    fn parse_line(&mut self, line_num: usize, line: &str) -> Result<(), VexError> {
        if starts_with_keyword(line, "scan") {
            self.in_scan = true;
            self.pending = PendingScan::default();
        }
        if !self.in_scan {
            return Ok(());
        }

        if let Some(start) = extract_field("start", line) {
            self.pending.start = Some(vexdate_to_mjd_hr(&start)?);
        }
        if let Some(mode) = extract_field("mode", line) {
            self.pending.mode = Some(mode);
        }
        if let Some(source) = extract_field("source", line) {
            self.pending.source = Some(source);
        }
        if let Some(field) = locate_field("station", line).filter(|f| !f.value.is_empty()) {
            // e.g. station = Aa:    0 sec:  600 sec:    0.000 GB:   :       : 1;
            let site_name = self.station_ids.resolve(&field.value, line_num)?;
            let [scan_start_sec, scan_end_sec, data_size_gb] =
                parse_leading_numbers::<3>(field.tail, "station", line_num)?;
            self.pending.stations.push(StationScan {
                site_name: site_name.to_string(),
                scan_start_sec,
                scan_end_sec,
                data_size_gb,
            });
        }

        if starts_with_keyword(line, "endscan") {
            let scan = std::mem::take(&mut self.pending).finish(line_num)?;
            trace!(
                "Line {line_num}: scan of {} with {} stations",
                scan.source,
                scan.stations.len()
            );
            self.schedule.push(scan);
            self.in_scan = false;
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, VexError> {
        Ok(self.schedule)
    }
}
