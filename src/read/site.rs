//! The $SITE sector.

use log::{trace, warn};

use super::{
    field::{extract_field, locate_field, parse_leading_numbers, starts_with_keyword},
    SectorParse,
};
use crate::{
    array::{SiteRecord, StationIdMap},
    sefd::{SefdLookup, DEFAULT_SEFD},
    VexError,
};

#[derive(Debug, Default)]
struct PendingSite {
    /// The site_name and its SEFD.
    name: Option<(String, f64)>,
    id: Option<String>,
    position: Option<(f64, f64, f64)>,
}

pub(crate) struct SiteParser<'l> {
    sefd_lookup: &'l dyn SefdLookup,
    in_def: bool,
    pending: PendingSite,
    sites: Vec<SiteRecord>,
    station_ids: StationIdMap,
}

impl<'l> SiteParser<'l> {
    pub(crate) fn new(sefd_lookup: &'l dyn SefdLookup) -> SiteParser<'l> {
        SiteParser {
            sefd_lookup,
            in_def: false,
            pending: PendingSite::default(),
            sites: vec![],
            station_ids: StationIdMap::default(),
        }
    }

    fn lookup_sefd(&self, name: &str) -> f64 {
        match self.sefd_lookup.sefd(name) {
            Some(sefd) => sefd,
            None => {
                warn!("No SEFD known for station {name}; using {DEFAULT_SEFD}");
                DEFAULT_SEFD
            }
        }
    }

    /// Close the pending block. The site_ID mapping is only made here, so
    /// that it uses the block's final site_name regardless of line order.
    fn end_def(&mut self, line_num: usize) -> Result<(), VexError> {
        let pending = std::mem::take(&mut self.pending);
        let missing = |field| VexError::MissingField {
            sector: Self::SECTOR,
            field,
            line_num,
        };
        let (name, sefd) = pending.name.ok_or_else(|| missing("site_name"))?;
        let position_xyz_m = pending.position.ok_or_else(|| missing("site_position"))?;

        if let Some(id) = pending.id {
            trace!("Line {line_num}: site_ID {id} is {name}");
            if let Some(old) = self.station_ids.insert(id.clone(), name.clone()) {
                warn!("site_ID {id} was {old}, is now {name}");
            }
        }
        self.sites.push(SiteRecord {
            name,
            position_xyz_m,
            sefd,
        });
        Ok(())
    }
}

impl SectorParse for SiteParser<'_> {
    type Output = (Vec<SiteRecord>, StationIdMap);
    const SECTOR: &'static str = "SITE";

    fn parse_line(&mut self, line_num: usize, line: &str) -> Result<(), VexError> {
        if starts_with_keyword(line, "def") {
            self.in_def = true;
        }
        if !self.in_def {
            return Ok(());
        }

        if let Some(name) = extract_field("site_name", line) {
            let sefd = self.lookup_sefd(&name);
            self.pending.name = Some((name, sefd));
        }
        if let Some(id) = extract_field("site_ID", line) {
            self.pending.id = Some(id);
        }
        if let Some(field) = locate_field("site_position", line) {
            // e.g. site_position = 2225061.164 m: -5440057.370 m: -2481681.150 m;
            let [x, y, z] = parse_leading_numbers::<3>(field.raw, "site_position", line_num)?;
            self.pending.position = Some((x, y, z));
        }

        if starts_with_keyword(line, "enddef") {
            self.end_def(line_num)?;
            self.in_def = false;
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Output, VexError> {
        Ok((self.sites, self.station_ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        read::{parse_sector, sector::Sectors},
        sefd::NoSiteTable,
    };
    use approx::assert_abs_diff_eq;
    use std::collections::HashMap;

    const SITES: &str = "$SITE;
def ALMA;
     site_type = fixed;
     site_name = ALMA;
     site_ID = Aa;
* comment: site_position = 0 0 0;
     site_position = 2225061.164 m: -5440057.370 m: -2481681.150 m;
enddef;
def SMT;
     site_type = fixed;
     site_ID = Mg;
     site_name = SMT;
     site_position = -1828796.200 m: -5054406.800 m:  3427865.200 m;
enddef;
";

    fn parse(
        text: &str,
        lookup: &dyn SefdLookup,
    ) -> Result<(Vec<SiteRecord>, StationIdMap), VexError> {
        let sectors = Sectors::split(text.lines());
        parse_sector(SiteParser::new(lookup), sectors.get("SITE").unwrap())
    }

    #[test]
    fn sites_and_ids() {
        let table = HashMap::from([("ALMA".to_string(), 90.0), ("SMT".to_string(), 11900.0)]);
        let (sites, ids) = parse(SITES, &table).unwrap();

        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].name, "ALMA");
        assert_abs_diff_eq!(sites[0].position_xyz_m.0, 2225061.164);
        assert_abs_diff_eq!(sites[0].position_xyz_m.1, -5440057.370);
        assert_abs_diff_eq!(sites[0].position_xyz_m.2, -2481681.150);
        assert_abs_diff_eq!(sites[0].sefd, 90.0);
        assert_eq!(sites[1].name, "SMT");
        assert_abs_diff_eq!(sites[1].position_xyz_m.2, 3427865.2);
        assert_abs_diff_eq!(sites[1].sefd, 11900.0);

        assert_eq!(ids.len(), 2);
        assert_eq!(ids.get("Aa"), Some("ALMA"));
        // site_ID came before site_name in this block.
        assert_eq!(ids.get("Mg"), Some("SMT"));
    }

    #[test]
    fn unknown_sefds_get_the_default() {
        let (sites, _) = parse(SITES, &NoSiteTable).unwrap();
        for site in sites {
            assert_abs_diff_eq!(site.sefd, DEFAULT_SEFD);
        }
    }

    #[test]
    fn one_line_site() {
        let (sites, ids) = parse(
            "$SITE;\ndef ALMA;\nsite_name=ALMA; site_ID=A; site_position= 1 2 3;\nenddef;",
            &NoSiteTable,
        )
        .unwrap();
        assert_eq!(sites[0].position_xyz_m, (1.0, 2.0, 3.0));
        assert_eq!(ids.get("A"), Some("ALMA"));
    }

    #[test]
    fn sites_without_ids_arent_mapped() {
        let (sites, ids) = parse(
            "$SITE;\ndef X;\nsite_name = X;\nsite_position = 1 m: 2 m: 3 m;\nenddef;",
            &NoSiteTable,
        )
        .unwrap();
        assert_eq!(sites.len(), 1);
        assert!(ids.is_empty());
    }

    #[test]
    fn later_site_name_replaces_its_sefd() {
        let table = HashMap::from([("ALMA".to_string(), 90.0), ("SMT".to_string(), 11900.0)]);
        let (sites, ids) = parse(
            "$SITE;\ndef X;\nsite_name = ALMA;\nsite_ID = Aa;\nsite_name = SMT;\nsite_position = 1 m: 2 m: 3 m;\nenddef;",
            &table,
        )
        .unwrap();
        assert_eq!(sites[0].name, "SMT");
        assert_abs_diff_eq!(sites[0].sefd, 11900.0);
        assert_eq!(ids.get("Aa"), Some("SMT"));
    }

    #[test]
    fn missing_name() {
        let result = parse(
            "$SITE;\ndef X;\nsite_ID = Aa;\nsite_position = 1 m: 2 m: 3 m;\nenddef;",
            &NoSiteTable,
        );
        assert!(matches!(
            result,
            Err(VexError::MissingField {
                sector: "SITE",
                field: "site_name",
                line_num: 5,
            })
        ));
    }

    #[test]
    fn missing_position() {
        let result = parse("$SITE;\ndef X;\nsite_name = X;\nenddef;", &NoSiteTable);
        assert!(matches!(
            result,
            Err(VexError::MissingField {
                sector: "SITE",
                field: "site_position",
                line_num: 4,
            })
        ));
    }
}
