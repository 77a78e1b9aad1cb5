//! Conversion of VEX dates into MJDs and UT hours.

use hifitime::Epoch;

use crate::{read::field::scan_numbers, VexError};

/// MJD 0 is 1858-11-17, so this is the first year with a whole new year's day.
const FIRST_YEAR: i32 = 1859;
const LAST_YEAR: i32 = 9999;

/// Convert a VEX date (e.g. "2016y099d05h00m00s") into the (integer) Modified
/// Julian Day it falls on and the UT hour within that day. All VEX times are
/// treated as UT.
///
/// The hour isn't range checked; e.g. "30h" gives an hour of 30.0 on the same
/// day. The year must have four digits (and fall after MJD 0), and the day of
/// year must be within 1 to 366.
pub fn vexdate_to_mjd_hr(vexdate: &str) -> Result<(u32, f64), VexError> {
    let invalid = || VexError::InvalidDate(vexdate.to_string());

    let fields: Vec<&str> = scan_numbers(vexdate).collect();
    let [year, doy, hour, minute, second] = match fields.as_slice() {
        [y, d, h, m, s, ..] => [*y, *d, *h, *m, *s],
        _ => return Err(invalid()),
    };
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let doy: i64 = doy.parse().map_err(|_| invalid())?;
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) || !(1..=366).contains(&doy) {
        return Err(invalid());
    }
    let hour: f64 = hour.parse().map_err(|_| invalid())?;
    let minute: f64 = minute.parse().map_err(|_| invalid())?;
    let second: f64 = second.parse().map_err(|_| invalid())?;

    let mjd = mjd_of_new_year(year)
        .and_then(|new_year| new_year.checked_add(doy - 1))
        .ok_or_else(invalid)?;
    let mjd_floor = u32::try_from(mjd).map_err(|_| invalid())?;
    let hour = hour + minute / 60.0 + second / 3600.0;

    Ok((mjd_floor, hour))
}

/// The MJD of 00:00 UTC on the 1st of January of the given (proleptic
/// Gregorian) year.
fn mjd_of_new_year(year: i32) -> Option<i64> {
    let e = Epoch::maybe_from_gregorian_utc(year, 1, 1, 0, 0, 0, 0).ok()?;
    // Midnight lands on a whole day; rounding only strips float noise.
    Some(e.to_mjd_utc_days().round() as i64)
}

/// The [`Epoch`] corresponding to an MJD and a UT hour.
pub fn mjd_hr_to_epoch(mjd_floor: u32, hour: f64) -> Epoch {
    Epoch::from_mjd_utc(f64::from(mjd_floor) + hour / 24.0)
}
