//! # Sky Almanac Core Library
//!
//! This library computes a complete night-sky report — moon phase, visible
//! constellations, naked-eye planets, and SVG sky art — as a pure function of
//! a calendar date and an observer location.
//!
//! ## Design Philosophy
//!
//! ### Determinism
//! - **No wall clock, no RNG**: every quantity derives from the requested
//!   date, latitude, and longitude. Two calls with identical inputs produce
//!   byte-identical output, including the generated SVG markup.
//! - **Seeded variety**: day-to-day variation (circumpolar picks, background
//!   star fields, planet blackout dates) comes from explicit hashes of the
//!   date number, never from a mutable random generator.
//!
//! ### Honest approximation
//! The engine trades ephemeris precision for closed-form formulas:
//! - Moon phase from the mean synodic month against a reference new moon
//! - Constellation visibility from seasonal catalogs and sidereal time,
//!   not per-star horizon altitude
//! - Planet visibility from orbital-phase heuristics, not true ephemerides
//!
//! Results are plausible and stable, suitable for display, and documented as
//! approximations wherever they cut corners.
//!
//! ### Data Flow
//! 1. **Time base**: date → Julian Day and Local Sidereal Time
//! 2. **Engines**: moon phase, constellation selection, planet visibility
//!    (independent, no shared state)
//! 3. **Renderer**: engine outputs → SVG moon disc and star map
//! 4. **Report**: everything assembled into one [`SkyReport`]
//!
//! ## Core Types
//!
//! The library exports the response types consumed by callers:
//! - [`SkyReport`]: the complete assembled almanac for one request
//! - [`MoonPhaseReport`]: the moon section of the report

use serde::{Deserialize, Serialize};

// Module declarations
pub mod cache;
pub mod config;
pub mod constellations;
pub mod moon;
pub mod planets;
pub mod renderer;
pub mod report;
pub mod svg;
pub mod timebase;

pub use planets::VisiblePlanet;

/// The moon section of a [`SkyReport`].
///
/// `illumination` is a rounded percentage (0–100) rather than the raw
/// fraction, because this struct is the wire format consumed by display
/// clients. `svg_path` is the complete moon-disc markup with any
/// requested light color already substituted in.
///
/// # Example
/// ```
/// use night_sky_lib::MoonPhaseReport;
///
/// let phase = MoonPhaseReport {
///     name: "Full Moon".to_string(),
///     illumination: 100,
///     emoji: "🌕".to_string(),
///     svg_path: "<svg/>".to_string(),
/// };
/// assert_eq!(phase.illumination, 100);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhaseReport {
    /// One of the eight conventional phase names (e.g. "Waxing Gibbous")
    pub name: String,
    /// Illuminated fraction as a whole percentage, 0–100
    pub illumination: u8,
    /// Fixed glyph for the phase (🌑 through 🌘)
    pub emoji: String,
    /// Self-contained SVG markup for the shaded moon disc
    pub svg_path: String,
}

/// Complete night-sky report for one date and location.
///
/// This is the single response object of the request/response contract:
/// callers (an HTTP layer, a CLI, a cache) receive it whole and never
/// re-derive parts of it. Serialized field names are camelCase to match
/// the JavaScript clients that consume the JSON form.
///
/// Invariants upheld by [`report::generate_report`]:
/// - `constellations` holds at most 5 names, and at least 4
/// - at least 2 entries of `planets` have `is_visible == true`
/// - identical requests produce byte-identical reports
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyReport {
    /// The requested date, echoed back in `YYYY-MM-DD` form
    pub date: String,
    /// Human-readable date with ordinal day suffix, e.g. "January 6th, 2000"
    pub formatted_date: String,
    /// Human-readable observer coordinates, e.g. "40.7128°N, 74.0060°W"
    pub location: Option<String>,
    /// Moon phase name, illumination, emoji, and rendered disc
    pub moon_phase: MoonPhaseReport,
    /// Up to five constellation names selected for the evening sky
    pub constellations: Vec<String>,
    /// All five naked-eye planets with visibility flags and sky positions
    pub planets: Vec<VisiblePlanet>,
    /// Self-contained SVG markup for the star map
    pub star_map_svg: String,
}
