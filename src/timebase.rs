//! Julian Day and Local Sidereal Time.
//!
//! Leaf time-scale conversions used by every other engine in the crate:
//! calendar date → continuous Julian Day, and Julian Day + observer
//! longitude → Local Sidereal Time in degrees.
//!
//! Sources: Meeus, *Astronomical Algorithms*, ch. 7 (Julian Day) and
//! ch. 12 (sidereal time, the GMST cubic polynomial).

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Julian Day of the J2000.0 epoch (2000 January 1, 12:00 UT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Convert a Gregorian calendar instant to a Julian Day number.
///
/// Uses the Meeus integer day-number form: the `a = (14 - month) / 12`
/// leap-correction term folds January and February into the preceding
/// year, the `(153m + 2) / 5` polynomial accumulates the days of the
/// shifted months, and the century terms apply the Gregorian leap rule.
/// The fractional day is offset by −12 h because an astronomical day
/// begins at noon.
///
/// Total over all valid calendar dates; no error conditions.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use night_sky_lib::timebase::julian_day;
///
/// let noon = NaiveDate::from_ymd_opt(2000, 1, 1)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
/// assert_eq!(julian_day(noon), 2_451_545.0);
/// ```
pub fn julian_day(dt: NaiveDateTime) -> f64 {
    let year = dt.year() as i64;
    let month = dt.month() as i64;
    let day = dt.day() as i64;

    // Integer arithmetic throughout; all operands are positive after the
    // +4800 year shift, so `/` is a true floor here.
    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;

    let jdn = day + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045;

    let day_fraction = (dt.hour() as f64 - 12.0) / 24.0
        + dt.minute() as f64 / 1440.0
        + dt.second() as f64 / 86400.0;

    jdn as f64 + day_fraction
}

/// Local Sidereal Time in degrees, always in `[0, 360)`.
///
/// Greenwich Sidereal Time from the Meeus cubic polynomial in Julian
/// centuries since J2000, plus the observer's east longitude. The final
/// normalization uses `rem_euclid`, not `%`: the polynomial goes negative
/// for dates before 2000 and the result must stay non-negative.
pub fn local_sidereal_time(dt: NaiveDateTime, longitude_deg: f64) -> f64 {
    let d = julian_day(dt) - J2000_JD;
    let t = d / 36525.0;

    let gst = 280.46061837 + 360.98564736629 * d + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;

    (gst + longitude_deg).rem_euclid(360.0)
}

/// Local Sidereal Time in hours, `[0, 24)`. Convenience for the
/// constellation engine, which works in right-ascension hours.
pub fn local_sidereal_hours(dt: NaiveDateTime, longitude_deg: f64) -> f64 {
    local_sidereal_time(dt, longitude_deg) / 15.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn jd_known_epochs() {
        // J2000.0 reference epoch
        assert_eq!(julian_day(at(2000, 1, 1, 12, 0, 0)), 2_451_545.0);
        // Midnight is half a day earlier
        assert_eq!(julian_day(at(2000, 1, 1, 0, 0, 0)), 2_451_544.5);
        // The engine's reference new-moon date at noon
        assert_eq!(julian_day(at(2000, 1, 6, 12, 0, 0)), 2_451_550.0);
    }

    #[test]
    fn jd_fractional_day() {
        let jd_noon = julian_day(at(2024, 6, 15, 12, 0, 0));
        let jd_six_hours_later = julian_day(at(2024, 6, 15, 18, 0, 0));
        assert!((jd_six_hours_later - jd_noon - 0.25).abs() < 1e-9);
    }

    #[test]
    fn jd_monotonic_across_boundaries() {
        // Month, year, and leap-day boundaries in order
        let instants = [
            at(1999, 12, 31, 23, 59, 59),
            at(2000, 1, 1, 0, 0, 0),
            at(2000, 2, 28, 12, 0, 0),
            at(2000, 2, 29, 12, 0, 0),
            at(2000, 3, 1, 12, 0, 0),
            at(2024, 12, 31, 23, 0, 0),
            at(2025, 1, 1, 1, 0, 0),
        ];
        for pair in instants.windows(2) {
            assert!(
                julian_day(pair[0]) < julian_day(pair[1]),
                "JD should increase from {:?} to {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn lst_at_j2000_matches_gst_constant() {
        // At J2000.0 with longitude 0 the polynomial reduces to its
        // constant term, 280.46061837°.
        let lst = local_sidereal_time(at(2000, 1, 1, 12, 0, 0), 0.0);
        assert!((lst - 280.46061837).abs() < 1e-6, "LST at J2000 = {lst}");
    }

    #[test]
    fn lst_longitude_offset() {
        let dt = at(2024, 3, 20, 21, 0, 0);
        let greenwich = local_sidereal_time(dt, 0.0);
        let east_90 = local_sidereal_time(dt, 90.0);
        assert!((east_90 - (greenwich + 90.0).rem_euclid(360.0)).abs() < 1e-9);
    }

    #[test]
    fn lst_always_in_range() {
        let dates = [
            at(1987, 4, 10, 0, 0, 0),
            at(1999, 12, 31, 23, 59, 59),
            at(2000, 1, 1, 12, 0, 0),
            at(2026, 8, 7, 21, 0, 0),
            at(2100, 6, 1, 3, 30, 0),
        ];
        for dt in dates {
            for lng in [-180.0, -74.006, 0.0, 139.69, 180.0] {
                let lst = local_sidereal_time(dt, lng);
                assert!(
                    (0.0..360.0).contains(&lst),
                    "LST out of range at {dt:?} lng {lng}: {lst}"
                );
            }
        }
    }

    #[test]
    fn lst_hours_conversion() {
        let dt = at(2024, 10, 1, 21, 0, 0);
        let deg = local_sidereal_time(dt, -74.006);
        let hours = local_sidereal_hours(dt, -74.006);
        assert!((hours * 15.0 - deg).abs() < 1e-9);
        assert!((0.0..24.0).contains(&hours));
    }
}
