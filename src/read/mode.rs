//! The $MODE sector. Nothing in it is kept; only the number of modes is
//! counted, because everything else assumes there is exactly one.

use super::{field::starts_with_keyword, SectorParse};
use crate::VexError;

#[derive(Debug, Default)]
pub(crate) struct ModeParser {
    num_defs: usize,
}

impl SectorParse for ModeParser {
    type Output = usize;
    const SECTOR: &'static str = "MODE";

    fn parse_line(&mut self, _line_num: usize, line: &str) -> Result<(), VexError> {
        if starts_with_keyword(line, "def") {
            self.num_defs += 1;
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, VexError> {
        Ok(self.num_defs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::{parse_sector, sector::Sectors};

    #[test]
    fn count_modes() {
        let text = "$MODE;
def 1mm;
     ref $FREQ = 230G:Aa:Ax;
enddef;
* def commented;
def 345;
enddef;";
        let sectors = Sectors::split(text.lines());
        let n = parse_sector(ModeParser::default(), sectors.get("MODE").unwrap()).unwrap();
        assert_eq!(n, 2);
    }
}
