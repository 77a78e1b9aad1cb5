//! Sites of the array and the table handed to the observation simulator.

use std::collections::HashMap;

use vec1::Vec1;

use crate::VexError;

/// A station defined in the $SITE sector.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteRecord {
    pub name: String,

    /// Geocentric X, Y, Z \[metres\].
    pub position_xyz_m: (f64, f64, f64),

    /// \[Jy\]
    pub sefd: f64,
}

/// Maps the short station identifiers used in $SCHED (site_ID) to full site
/// names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationIdMap(HashMap<String, String>);

impl StationIdMap {
    /// Map `id` to `site_name`, returning the name previously mapped to `id`,
    /// if any.
    pub fn insert(&mut self, id: String, site_name: String) -> Option<String> {
        self.0.insert(id, site_name)
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(|s| s.as_str())
    }

    /// Get the site name for a station identifier used on line `line_num`. An
    /// unknown identifier is an error.
    pub fn resolve(&self, id: &str, line_num: usize) -> Result<&str, VexError> {
        self.get(id).ok_or_else(|| VexError::UnmappedStation {
            id: id.to_string(),
            line_num,
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A row of the array table that the observation simulator consumes. Besides
/// position and SEFD, the simulator's table carries polarimetric leakage and
/// field-rotation columns; VEX files say nothing about those, so they are
/// zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayStation {
    pub name: String,
    /// \[metres\]
    pub x: f64,
    /// \[metres\]
    pub y: f64,
    /// \[metres\]
    pub z: f64,
    /// Right-circular SEFD \[Jy\].
    pub sefd_r: f64,
    /// Left-circular SEFD \[Jy\].
    pub sefd_l: f64,
    pub d_r: f64,
    pub d_l: f64,
    pub fr_par: f64,
    pub fr_elev: f64,
    pub fr_off: f64,
}

impl From<&SiteRecord> for ArrayStation {
    fn from(site: &SiteRecord) -> Self {
        let (x, y, z) = site.position_xyz_m;
        ArrayStation {
            name: site.name.clone(),
            x,
            y,
            z,
            sefd_r: site.sefd,
            sefd_l: site.sefd,
            d_r: 0.0,
            d_l: 0.0,
            fr_par: 0.0,
            fr_elev: 0.0,
            fr_off: 0.0,
        }
    }
}

/// Build the simulator's array table from the sites, in $SITE order.
pub fn array_table(sites: &[SiteRecord]) -> Result<Vec1<ArrayStation>, VexError> {
    let stations = sites.iter().map(ArrayStation::from).collect();
    Vec1::try_from_vec(stations).map_err(|_| VexError::NoSites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn alma() -> SiteRecord {
        SiteRecord {
            name: "ALMA".into(),
            position_xyz_m: (2225061.164, -5440057.370, -2481681.150),
            sefd: 90.0,
        }
    }

    #[test]
    fn table_rows() {
        let table = array_table(&[alma()]).unwrap();
        assert_eq!(table.len(), 1);
        let row = table.first();
        assert_eq!(row.name, "ALMA");
        assert_abs_diff_eq!(row.x, 2225061.164);
        assert_abs_diff_eq!(row.y, -5440057.370);
        assert_abs_diff_eq!(row.z, -2481681.150);
        assert_abs_diff_eq!(row.sefd_r, 90.0);
        assert_abs_diff_eq!(row.sefd_l, 90.0);
        assert_abs_diff_eq!(row.d_r + row.d_l + row.fr_par + row.fr_elev + row.fr_off, 0.0);
    }

    #[test]
    fn empty_tables_are_errors() {
        assert!(matches!(array_table(&[]), Err(VexError::NoSites)));
    }

    #[test]
    fn unmapped_ids() {
        let mut ids = StationIdMap::default();
        assert_eq!(ids.insert("Aa".into(), "ALMA".into()), None);
        assert_eq!(ids.resolve("Aa", 1).unwrap(), "ALMA");
        assert!(matches!(
            ids.resolve("Sm", 42),
            Err(VexError::UnmappedStation { line_num: 42, .. })
        ));
    }
}
