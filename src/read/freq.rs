//! The $FREQ sector.
//!
//! Only the first `def` block is supported. Within it, the last `chan_def`
//! line determines the frequency setting.

use log::{trace, warn};

use super::{
    field::{is_comment, parse_leading_numbers, starts_with_keyword},
    SectorParse,
};
use crate::{FrequencySetting, VexError};

#[derive(Debug, Default)]
pub(crate) struct FreqParser {
    in_def: bool,
    num_defs: usize,
    setting: Option<FrequencySetting>,
}

impl SectorParse for FreqParser {
    type Output = FrequencySetting;
    const SECTOR: &'static str = "FREQ";

    fn parse_line(&mut self, line_num: usize, line: &str) -> Result<(), VexError> {
        if starts_with_keyword(line, "def") {
            if self.num_defs > 0 {
                warn!("Line {line_num}: multiple $FREQ definitions aren't supported; only the first is used");
            }
            self.num_defs += 1;
            self.in_def = true;
        }

        if self.in_def && self.num_defs == 1 && !is_comment(line) && line.contains("chan_def") {
            // e.g. chan_def = &B: 227296.875 MHz : U : 58.59375 MHz : &CH01 : &BBC01 : &L_cal;
            let [freq_mhz, bw_mhz] = parse_leading_numbers::<2>(line, "chan_def", line_num)?;
            trace!("Line {line_num}: chan_def {freq_mhz} MHz, {bw_mhz} MHz");
            self.setting = Some(FrequencySetting {
                center_frequency_hz: freq_mhz * 1e6,
                bandwidth_hz: bw_mhz * 1e6,
            });
        }

        if starts_with_keyword(line, "enddef") {
            self.in_def = false;
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, VexError> {
        self.setting.ok_or(VexError::NoChannelDefinition)
    }
}
