//! Moon phase from the mean synodic month.
//!
//! Phase fraction is days elapsed since a reference new moon divided by
//! the mean synodic month, so accuracy is about ±1 day against the true
//! lunation (the real month varies ±0.3 d around the mean). Illumination
//! is the standard half-cosine proxy, exact at new and full.

use crate::timebase::julian_day;
use chrono::NaiveDateTime;
use std::f64::consts::TAU;

/// Julian Day of the reference new moon (2000 January 6, ~14:24 UT).
pub const REFERENCE_NEW_MOON_JD: f64 = 2_451_550.1;

/// Mean synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.530_59;

/// The eight conventional moon phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Classify a phase fraction in `[0, 1)` into one of the eight phases.
    ///
    /// Boundaries are fixed and exhaustive: New owns a ±0.025 band around
    /// the cycle wrap, the quarters and full own ±0.025 bands around 0.25,
    /// 0.5, 0.75, and the crescent/gibbous ranges fill the gaps.
    pub fn from_fraction(fraction: f64) -> MoonPhase {
        let f = fraction.rem_euclid(1.0);
        if f < 0.025 {
            MoonPhase::New
        } else if f < 0.225 {
            MoonPhase::WaxingCrescent
        } else if f < 0.275 {
            MoonPhase::FirstQuarter
        } else if f < 0.475 {
            MoonPhase::WaxingGibbous
        } else if f < 0.525 {
            MoonPhase::Full
        } else if f < 0.725 {
            MoonPhase::WaningGibbous
        } else if f < 0.775 {
            MoonPhase::LastQuarter
        } else if f < 0.975 {
            MoonPhase::WaningCrescent
        } else {
            MoonPhase::New
        }
    }

    /// Conventional English phase name.
    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Fixed glyph for the phase.
    pub fn emoji(self) -> &'static str {
        match self {
            MoonPhase::New => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::Full => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }
}

/// Everything the phase engine derives for one instant.
#[derive(Clone, Copy, Debug)]
pub struct MoonPhaseInfo {
    /// Position in the synodic cycle, `[0, 1)`; 0 = new, 0.5 = full.
    pub phase_fraction: f64,
    /// Illuminated fraction of the disc, `[0, 1]`.
    pub illumination: f64,
    /// Classified phase.
    pub phase: MoonPhase,
}

/// Illuminated fraction for a phase fraction: `0.5 * (1 - cos(2π f))`.
///
/// Exactly 0 at new moon, exactly 1 at full, rising then falling across
/// the cycle. This is a deterministic function of the fraction — the two
/// are never reported inconsistently.
pub fn illumination_fraction(phase_fraction: f64) -> f64 {
    0.5 * (1.0 - (TAU * phase_fraction).cos())
}

/// Compute the moon phase for a calendar instant.
///
/// 1. Instant → Julian Day
/// 2. Days since the reference new moon, floored-modulo the synodic month
///    (`rem_euclid`, so dates before 2000 still yield a non-negative age)
/// 3. Normalize to a phase fraction in `[0, 1)`
/// 4. Half-cosine illumination and eight-way classification
///
/// No failure modes: any valid calendar instant produces a result.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use night_sky_lib::moon::{moon_phase, MoonPhase};
///
/// let dt = NaiveDate::from_ymd_opt(2000, 1, 6)
///     .unwrap()
///     .and_hms_opt(21, 0, 0)
///     .unwrap();
/// let info = moon_phase(dt);
/// assert_eq!(info.phase, MoonPhase::New);
/// ```
pub fn moon_phase(dt: NaiveDateTime) -> MoonPhaseInfo {
    let jd = julian_day(dt);
    let age_days = (jd - REFERENCE_NEW_MOON_JD).rem_euclid(SYNODIC_MONTH);
    let phase_fraction = age_days / SYNODIC_MONTH;

    MoonPhaseInfo {
        phase_fraction,
        illumination: illumination_fraction(phase_fraction),
        phase: MoonPhase::from_fraction(phase_fraction),
    }
}
