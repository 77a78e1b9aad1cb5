//! Station SEFD lookups.
//!
//! VEX files don't carry SEFDs, so these come from an external table keyed by
//! station name.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{read::field::parse_numbers, VexError};

/// The SEFD \[Jy\] given to a station that the lookup doesn't know about.
pub const DEFAULT_SEFD: f64 = 10000.0;

/// Something that can give the SEFD of a station from its name.
pub trait SefdLookup {
    /// The station's SEFD \[Jy\], if it is known.
    fn sefd(&self, station: &str) -> Option<f64>;
}

impl SefdLookup for HashMap<String, f64> {
    fn sefd(&self, station: &str) -> Option<f64> {
        self.get(station).copied()
    }
}

/// A lookup that knows no stations; every station gets [`DEFAULT_SEFD`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSiteTable;

impl SefdLookup for NoSiteTable {
    fn sefd(&self, _station: &str) -> Option<f64> {
        None
    }
}

/// SEFDs read from an array table file, e.g.
///
/// ```text
/// #Site  X(m)          Y(m)          Z(m)           SEFDR   SEFDL   ...
/// ALMA   2225061.164   -5440057.370  -2481681.150   90      90      ...
/// ```
///
/// The first column is the station name, and the station's SEFD is the fourth
/// number after it. Lines starting with `#` are comments, and rows without a
/// SEFD are skipped. The file is read once; lookups don't touch the disk.
#[derive(Debug, Clone)]
pub struct SiteTable {
    /// Where the table came from.
    pub file: PathBuf,

    sefds: HashMap<String, f64>,
}

impl SiteTable {
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<SiteTable, VexError> {
        let file = file.as_ref();
        debug!("Using site table: {}", file.display());
        let text = std::fs::read_to_string(file).map_err(|source| VexError::Io {
            file: file.to_path_buf(),
            source,
        })?;
        let sefds = parse_site_table(&text);
        debug!("Site table has {} stations", sefds.len());

        Ok(SiteTable {
            file: file.to_path_buf(),
            sefds,
        })
    }

    pub fn len(&self) -> usize {
        self.sefds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sefds.is_empty()
    }
}

impl SefdLookup for SiteTable {
    fn sefd(&self, station: &str) -> Option<f64> {
        self.sefds.get(station).copied()
    }
}

/// Parse the text of an array table. A row without a readable SEFD is skipped
/// with a warning; it only matters if its station is ever looked up.
fn parse_site_table(text: &str) -> HashMap<String, f64> {
    let mut sefds = HashMap::new();
    for (i, line) in text.lines().enumerate() {
        let line_num = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut columns = line.splitn(2, char::is_whitespace);
        let name = columns.next().unwrap_or_default();
        let rest = columns.next().unwrap_or_default();
        let sefd = match parse_numbers(rest) {
            Ok(numbers) => numbers.get(3).copied(),
            Err(e) => {
                warn!("Site table line {line_num}: {e}; skipping station '{name}'");
                continue;
            }
        };
        match sefd {
            // The first occurrence of a station wins.
            Some(sefd) => {
                sefds.entry(name.to_string()).or_insert(sefd);
            }
            None => warn!(
                "Site table line {line_num}: station '{name}' has no SEFD column (expected X Y Z SEFD ...); skipping it"
            ),
        }
    }
    sefds
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TABLE: &str = "#Site X(m) Y(m) Z(m) SEFDR SEFDL FR_PAR FR_EL FR_OFF DR_RE DR_IM DL_RE DL_IM
ALMA   2225061.164   -5440057.370  -2481681.150   90      90      1 0 0  0 0 0 0
APEX   2225039.530   -5441197.630  -2479303.360   3500    3500    1 -1 0  0 0 0 0

SMT   -1828796.200   -5054406.800   3427865.200   11900   11900   1 1 0  0 0 0 0
";

    #[test]
    fn read_a_table() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(TABLE.as_bytes()).unwrap();
        let table = SiteTable::from_file(f.path()).unwrap();

        assert_eq!(table.len(), 3);
        assert_abs_diff_eq!(table.sefd("ALMA").unwrap(), 90.0);
        assert_abs_diff_eq!(table.sefd("APEX").unwrap(), 3500.0);
        assert_abs_diff_eq!(table.sefd("SMT").unwrap(), 11900.0);
        assert!(table.sefd("JCMT").is_none());
    }

    #[test]
    fn short_rows_are_skipped() {
        let sefds = parse_site_table("# header\nALMA 1 2 3\nSMT 1 2 3 11900 11900\n");
        assert_eq!(sefds.len(), 1);
        assert_eq!(sefds.sefd("ALMA"), None);
        assert_eq!(sefds.sefd("SMT"), Some(11900.0));
    }

    #[test]
    fn a_bad_row_doesnt_spoil_the_table() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(TABLE.as_bytes()).unwrap();
        f.write_all(b"JCMT -5464584.68 -2493001.17\n").unwrap();
        let table = SiteTable::from_file(f.path()).unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.sefd("JCMT").is_none());
        assert_abs_diff_eq!(table.sefd("ALMA").unwrap(), 90.0);
    }

    #[test]
    fn missing_table_file() {
        let result = SiteTable::from_file("/this/path/does/not/exist/SITES.txt");
        assert!(matches!(result, Err(VexError::Io { .. })));
    }

    #[test]
    fn in_memory_lookups() {
        let table = HashMap::from([("ALMA".to_string(), 90.0)]);
        assert_eq!(table.sefd("ALMA"), Some(90.0));
        assert_eq!(table.sefd("SMT"), None);
        assert_eq!(NoSiteTable.sefd("ALMA"), None);
    }
}
