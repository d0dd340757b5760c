//! Request validation and report assembly.
//!
//! This is the single guarded entry point of the crate: the core math
//! modules are total over their numeric domain and do no validation, so
//! unparseable dates, out-of-range coordinates, and malformed colors are
//! rejected here, before anything reaches them. Everything downstream of
//! a successful validation is deterministic — identical requests produce
//! byte-identical reports.

use crate::constellations::visible_constellations;
use crate::moon::moon_phase;
use crate::planets::visible_planets;
use crate::renderer::{render_moon_svg, render_star_map_svg, MOON_LIGHT_FILL};
use crate::{MoonPhaseReport, SkyReport};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed local hour at which the evening sky is evaluated. Date-only
/// requests need a representative instant for sidereal-time-dependent
/// output; 21:00 keeps the result an actual night sky.
pub const OBSERVATION_HOUR: u32 = 21;

/// A report request: date, observer coordinates, optional moon tint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyRequest {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Observer latitude in degrees, `[-90, 90]`.
    pub latitude: f64,
    /// Observer longitude in degrees, `[-180, 180]`.
    pub longitude: f64,
    /// Optional `#RRGGBB` fill for the lit moon, substituted for the
    /// renderer's default white.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moon_light_color: Option<String>,
}

/// Boundary validation failures. The core never sees a request that
/// produces one of these.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Date string failed to parse as `YYYY-MM-DD`
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Latitude outside [-90, 90] (NaN included)
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180] (NaN included)
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// Moon light color is not a #RRGGBB string
    #[error("invalid moon light color {0:?}: expected #RRGGBB")]
    InvalidColor(String),
}

/// Validate a request and assemble the complete report.
///
/// The three engines run independently off the same instant, the
/// renderer turns their outputs into markup, and the requested moon
/// light color (if any) is substituted into the moon disc as a final
/// text pass.
///
/// # Example
/// ```
/// use night_sky_lib::report::{generate_report, SkyRequest};
///
/// let request = SkyRequest {
///     date: "2000-01-06".to_string(),
///     latitude: 40.7128,
///     longitude: -74.0060,
///     moon_light_color: None,
/// };
/// let report = generate_report(&request).unwrap();
/// assert_eq!(report.moon_phase.name, "New Moon");
/// ```
pub fn generate_report(request: &SkyRequest) -> Result<SkyReport, ReportError> {
    let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
        .map_err(|_| ReportError::InvalidDate(request.date.clone()))?;

    if !(-90.0..=90.0).contains(&request.latitude) {
        return Err(ReportError::LatitudeOutOfRange(request.latitude));
    }
    if !(-180.0..=180.0).contains(&request.longitude) {
        return Err(ReportError::LongitudeOutOfRange(request.longitude));
    }
    if let Some(color) = &request.moon_light_color {
        if !is_valid_color(color) {
            return Err(ReportError::InvalidColor(color.clone()));
        }
    }

    let dt = date
        .and_hms_opt(OBSERVATION_HOUR, 0, 0)
        .expect("fixed observation hour is a valid time");

    let moon = moon_phase(dt);
    let mut moon_svg = render_moon_svg(moon.phase_fraction);
    if let Some(color) = &request.moon_light_color {
        moon_svg = apply_moon_light_color(moon_svg, color);
    }

    let constellations: Vec<String> =
        visible_constellations(dt, request.latitude, request.longitude)
            .into_iter()
            .map(str::to_string)
            .collect();
    let planets = visible_planets(dt, request.latitude, request.longitude);
    let star_map_svg =
        render_star_map_svg(&constellations, dt, request.latitude, request.longitude);

    Ok(SkyReport {
        date: request.date.clone(),
        formatted_date: format_long_date(date),
        location: Some(format_location(request.latitude, request.longitude)),
        moon_phase: MoonPhaseReport {
            name: moon.phase.name().to_string(),
            illumination: (moon.illumination * 100.0).round() as u8,
            emoji: moon.phase.emoji().to_string(),
            svg_path: moon_svg,
        },
        constellations,
        planets,
        star_map_svg,
    })
}

/// `#RRGGBB` check: hash sign plus exactly six hex digits.
fn is_valid_color(color: &str) -> bool {
    let mut chars = color.chars();
    chars.next() == Some('#')
        && color.len() == 7
        && chars.all(|c| c.is_ascii_hexdigit())
}

/// Substitute the renderer's default white moon fill with a custom tint.
/// Pure white is a no-op: the markup already carries it.
fn apply_moon_light_color(svg: String, color: &str) -> String {
    if color.eq_ignore_ascii_case(MOON_LIGHT_FILL) {
        svg
    } else {
        svg.replace(MOON_LIGHT_FILL, color)
    }
}

/// Human-readable date with an ordinal day suffix: "January 6th, 2000".
fn format_long_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

/// English ordinal suffix for a day of month. The teens are all "th".
fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Observer coordinates as a display string: "40.7128°N, 74.0060°W".
fn format_location(latitude: f64, longitude: f64) -> String {
    let lat_dir = if latitude >= 0.0 { "N" } else { "S" };
    let lng_dir = if longitude >= 0.0 { "E" } else { "W" };
    format!(
        "{:.4}°{}, {:.4}°{}",
        latitude.abs(),
        lat_dir,
        longitude.abs(),
        lng_dir
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_york(date: &str) -> SkyRequest {
        SkyRequest {
            date: date.to_string(),
            latitude: 40.7128,
            longitude: -74.0060,
            moon_light_color: None,
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["", "2024-13-01", "01/06/2000", "2024-02-30", "yesterday"] {
            let result = generate_report(&new_york(bad));
            assert!(
                matches!(result, Err(ReportError::InvalidDate(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let mut request = new_york("2024-06-01");
        request.latitude = 90.5;
        assert!(matches!(
            generate_report(&request),
            Err(ReportError::LatitudeOutOfRange(_))
        ));

        let mut request = new_york("2024-06-01");
        request.latitude = f64::NAN;
        assert!(matches!(
            generate_report(&request),
            Err(ReportError::LatitudeOutOfRange(_))
        ));

        let mut request = new_york("2024-06-01");
        request.longitude = -181.0;
        assert!(matches!(
            generate_report(&request),
            Err(ReportError::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["red", "#FFF", "#GGHHII", "FFFFFF", "#FFFFFF0"] {
            let mut request = new_york("2024-06-01");
            request.moon_light_color = Some(bad.to_string());
            assert!(
                matches!(generate_report(&request), Err(ReportError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn reference_new_moon_report() {
        let report = generate_report(&new_york("2000-01-06")).unwrap();
        assert_eq!(report.moon_phase.name, "New Moon");
        assert_eq!(report.moon_phase.emoji, "🌑");
        assert!(report.moon_phase.illumination <= 1);
        assert_eq!(report.formatted_date, "January 6th, 2000");
    }

    #[test]
    fn full_moon_report_fifteen_days_later() {
        let report = generate_report(&new_york("2000-01-21")).unwrap();
        assert_eq!(report.moon_phase.name, "Full Moon");
        assert!(report.moon_phase.illumination >= 95);
    }

    #[test]
    fn report_upholds_selection_floors() {
        let report = generate_report(&new_york("2024-08-15")).unwrap();
        assert!((4..=5).contains(&report.constellations.len()));
        assert!(report.planets.iter().filter(|p| p.is_visible).count() >= 2);
        assert_eq!(report.planets.len(), 5);
    }

    #[test]
    fn identical_requests_are_byte_identical() {
        let a = generate_report(&new_york("2024-03-15")).unwrap();
        let b = generate_report(&new_york("2024-03-15")).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn moon_light_color_is_substituted() {
        // Near-full moon so the markup actually contains a lit fill
        let mut request = new_york("2000-01-21");
        request.moon_light_color = Some("#FFCC88".to_string());
        let report = generate_report(&request).unwrap();
        assert!(report.moon_phase.svg_path.contains("#FFCC88"));
        assert!(!report.moon_phase.svg_path.contains(MOON_LIGHT_FILL));
        // The star map keeps its own palette
        assert!(!report.star_map_svg.contains("#FFCC88"));
    }

    #[test]
    fn pure_white_color_is_a_no_op() {
        let mut request = new_york("2000-01-21");
        request.moon_light_color = Some("#FFFFFF".to_string());
        let tinted = generate_report(&request).unwrap();
        let plain = generate_report(&new_york("2000-01-21")).unwrap();
        assert_eq!(tinted.moon_phase.svg_path, plain.moon_phase.svg_path);
    }

    #[test]
    fn location_string_uses_hemisphere_letters() {
        let report = generate_report(&new_york("2024-06-01")).unwrap();
        assert_eq!(report.location.as_deref(), Some("40.7128°N, 74.0060°W"));

        let mut request = new_york("2024-06-01");
        request.latitude = -33.8688;
        request.longitude = 151.2093;
        let report = generate_report(&request).unwrap();
        assert_eq!(report.location.as_deref(), Some("33.8688°S, 151.2093°E"));
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(23), "rd");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn valid_color_check() {
        assert!(is_valid_color("#FFFFFF"));
        assert!(is_valid_color("#00aaff"));
        assert!(!is_valid_color("#00aaf"));
        assert!(!is_valid_color("00aaffx"));
        assert!(!is_valid_color("#00aafg"));
    }

    #[test]
    fn boundary_coordinates_are_accepted() {
        for (lat, lng) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            let mut request = new_york("2024-06-01");
            request.latitude = lat;
            request.longitude = lng;
            assert!(generate_report(&request).is_ok(), "({lat}, {lng})");
        }
    }
}
