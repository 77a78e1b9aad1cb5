//! The $SOURCE sector.

use log::trace;

use super::{
    field::{extract_field, starts_with_keyword},
    SectorParse,
};
use crate::{SourceRecord, VexError};

#[derive(Debug, Default)]
struct PendingSource {
    name: Option<String>,
    ra: Option<String>,
    dec: Option<String>,
    coordinate_frame: Option<String>,
}

impl PendingSource {
    fn finish(self, line_num: usize) -> Result<SourceRecord, VexError> {
        let missing = |field| VexError::MissingField {
            sector: SourceParser::SECTOR,
            field,
            line_num,
        };
        Ok(SourceRecord {
            name: self.name.ok_or_else(|| missing("source_name"))?,
            ra: self.ra.ok_or_else(|| missing("ra"))?,
            dec: self.dec.ok_or_else(|| missing("dec"))?,
            coordinate_frame: self
                .coordinate_frame
                .ok_or_else(|| missing("ref_coord_frame"))?,
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct SourceParser {
    in_def: bool,
    pending: PendingSource,
    sources: Vec<SourceRecord>,
}

impl SectorParse for SourceParser {
    type Output = Vec<SourceRecord>;
    const SECTOR: &'static str = "SOURCE";

    fn parse_line(&mut self, line_num: usize, line: &str) -> Result<(), VexError> {
        if starts_with_keyword(line, "def") {
            self.in_def = true;
        }
        if !self.in_def {
            return Ok(());
        }

        let p = &mut self.pending;
        for (name, slot) in [
            ("source_name", &mut p.name),
            ("ra", &mut p.ra),
            ("dec", &mut p.dec),
            ("ref_coord_frame", &mut p.coordinate_frame),
        ] {
            if let Some(v) = extract_field(name, line) {
                *slot = Some(v);
            }
        }

        if starts_with_keyword(line, "enddef") {
            let source = std::mem::take(&mut self.pending).finish(line_num)?;
            trace!("Line {line_num}: source {}", source.name);
            self.sources.push(source);
            self.in_def = false;
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, VexError> {
        Ok(self.sources)
    }
}
