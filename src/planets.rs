//! Naked-eye planet visibility heuristics.
//!
//! This is an explicit stand-in for ephemeris data: each planet's position
//! in its own orbit is reduced to a single phase fraction of its orbital
//! period, and visibility, sky-position text, and magnitude all derive
//! from fixed rules over that fraction. The numbers are plausible and
//! deterministic, not astrometric. The ≥2-visible floor at the end is a
//! presentation guarantee, not an astronomical fact.

use crate::constellations::{date_number, mix_hash};
use crate::timebase::{julian_day, J2000_JD};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Visibility result for one planet.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisiblePlanet {
    pub name: String,
    /// Textual sky-position description for display.
    pub position: String,
    /// Apparent magnitude; lower is brighter.
    pub magnitude: f64,
    pub is_visible: bool,
}

/// Static orbital data for one planet: sidereal period and the apparent
/// magnitude range to interpolate across.
struct PlanetSpec {
    name: &'static str,
    period_days: f64,
    magnitude_brightest: f64,
    magnitude_dimmest: f64,
}

static PLANETS: [PlanetSpec; 5] = [
    PlanetSpec {
        name: "Mercury",
        period_days: 87.969,
        magnitude_brightest: -1.9,
        magnitude_dimmest: 2.0,
    },
    PlanetSpec {
        name: "Venus",
        period_days: 224.701,
        magnitude_brightest: -4.6,
        magnitude_dimmest: -3.8,
    },
    PlanetSpec {
        name: "Mars",
        period_days: 686.980,
        magnitude_brightest: -2.9,
        magnitude_dimmest: 1.8,
    },
    PlanetSpec {
        name: "Jupiter",
        period_days: 4_332.589,
        magnitude_brightest: -2.9,
        magnitude_dimmest: -1.6,
    },
    PlanetSpec {
        name: "Saturn",
        period_days: 10_759.22,
        magnitude_brightest: -0.5,
        magnitude_dimmest: 1.5,
    },
];

/// Index of Jupiter in [`PLANETS`]; exempt from the blackout perturbation.
const JUPITER: usize = 3;

/// Orbit phase in `[0, 1)`: days since J2000, floored-modulo the period.
fn orbit_phase(jd: f64, period_days: f64) -> f64 {
    (jd - J2000_JD).rem_euclid(period_days) / period_days
}

/// Apparent magnitude interpolated between the planet's brightest and
/// dimmest values. The parameter `|phase - 0.5| * 2` is 0 mid-cycle
/// (treated as opposition-like, brightest) and 1 at the cycle ends.
/// A simplification, not true phase-angle photometry.
fn interpolated_magnitude(spec: &PlanetSpec, phase: f64) -> f64 {
    let t = (phase - 0.5).abs() * 2.0;
    spec.magnitude_brightest + (spec.magnitude_dimmest - spec.magnitude_brightest) * t
}

/// Which horizon the observer's meridian faces: northern observers look
/// south to the ecliptic, southern observers look north.
fn meridian_direction(latitude: f64) -> &'static str {
    if latitude >= 0.0 {
        "southern"
    } else {
        "northern"
    }
}

/// Position text and visibility for one planet at one orbit phase.
/// Fixed phase-range rules per planet; see module docs for intent.
fn position_and_visibility(index: usize, phase: f64, latitude: f64) -> (String, bool) {
    let meridian = meridian_direction(latitude);
    match index {
        // Mercury: only visible around greatest elongation, always low
        0 => {
            if (0.35..0.65).contains(&phase) {
                if phase < 0.5 {
                    ("Low on the western horizon at dusk".to_string(), true)
                } else {
                    ("Low on the eastern horizon at dawn".to_string(), true)
                }
            } else {
                ("Lost in the Sun's glare".to_string(), false)
            }
        }
        // Venus: always visible, alternating evening and morning star
        1 => {
            if phase < 0.5 {
                ("Evening star, low in the west after sunset".to_string(), true)
            } else {
                ("Morning star, low in the east before dawn".to_string(), true)
            }
        }
        // Mars
        2 => match phase {
            p if p < 0.25 => ("Low in the eastern sky after dusk".to_string(), true),
            p if p < 0.5 => (
                format!("High in the {meridian} sky around midnight"),
                true,
            ),
            p if p < 0.75 => (
                "Sinking toward the western horizon before dawn".to_string(),
                true,
            ),
            _ => ("Too close to the Sun to observe".to_string(), false),
        },
        // Jupiter
        3 => match phase {
            p if p < 0.25 => ("Rising in the east as darkness falls".to_string(), true),
            p if p < 0.5 => (
                format!("Blazing high in the {meridian} sky at midnight"),
                true,
            ),
            p if p < 0.75 => (
                "Setting in the west in the early hours".to_string(),
                true,
            ),
            _ => ("Behind the Sun this season".to_string(), false),
        },
        // Saturn
        _ => match phase {
            p if p < 0.25 => ("Climbing in the southeastern sky".to_string(), true),
            p if p < 0.5 => (
                format!("Well placed in the {meridian} sky at midnight"),
                true,
            ),
            p if p < 0.75 => ("Low in the southwest before dawn".to_string(), true),
            _ => ("Too close to the Sun to observe".to_string(), false),
        },
    }
}

/// Compute visibility for the five naked-eye planets.
///
/// After the per-planet rules, a date-keyed perturbation forces each
/// non-Jupiter planet invisible on roughly one date in eleven (variety
/// without randomness), and a final pass flips the Venus/Jupiter backup
/// pair visible if fewer than two planets survived — the report never
/// shows an empty sky.
pub fn visible_planets(dt: NaiveDateTime, latitude: f64, _longitude: f64) -> Vec<VisiblePlanet> {
    let jd = julian_day(dt);
    let date_num = date_number(dt.date());

    let mut results: Vec<VisiblePlanet> = PLANETS
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let phase = orbit_phase(jd, spec.period_days);
            let magnitude = interpolated_magnitude(spec, phase);
            let (mut position, mut is_visible) = position_and_visibility(index, phase, latitude);

            // Blackout perturbation: spreads one skipped date in eleven
            // across the planets. Jupiter is exempt so the backup pair
            // below always has a bright anchor.
            if index != JUPITER && is_visible {
                let key = mix_hash(date_num.wrapping_add(index as u64 * 7));
                if key % 11 == 0 {
                    position = "Hidden below the horizon tonight".to_string();
                    is_visible = false;
                }
            }

            VisiblePlanet {
                name: spec.name.to_string(),
                position,
                magnitude,
                is_visible,
            }
        })
        .collect();

    // Floor: at least two visible planets, forced via the backup pair.
    for backup in ["Venus", "Jupiter"] {
        if results.iter().filter(|p| p.is_visible).count() >= 2 {
            break;
        }
        if let Some(planet) = results
            .iter_mut()
            .find(|p| p.name == backup && !p.is_visible)
        {
            planet.is_visible = true;
            planet.position = "Faintly visible near the horizon at dusk".to_string();
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn evening(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(21, 0, 0)
            .unwrap()
    }

    #[test]
    fn orbit_phase_is_normalized() {
        let jd = julian_day(evening(2024, 6, 1));
        for spec in &PLANETS {
            let phase = orbit_phase(jd, spec.period_days);
            assert!((0.0..1.0).contains(&phase), "{}: {phase}", spec.name);
        }
        // Dates before J2000 must normalize too
        let early = julian_day(evening(1987, 4, 10));
        for spec in &PLANETS {
            let phase = orbit_phase(early, spec.period_days);
            assert!((0.0..1.0).contains(&phase), "{}: {phase}", spec.name);
        }
    }

    #[test]
    fn magnitude_stays_within_planet_range() {
        for spec in &PLANETS {
            for step in 0..=10 {
                let phase = step as f64 / 10.0 * 0.999;
                let mag = interpolated_magnitude(spec, phase);
                assert!(
                    (spec.magnitude_brightest..=spec.magnitude_dimmest).contains(&mag),
                    "{} magnitude {mag} outside [{}, {}]",
                    spec.name,
                    spec.magnitude_brightest,
                    spec.magnitude_dimmest
                );
            }
        }
    }

    #[test]
    fn magnitude_brightest_mid_cycle() {
        for spec in &PLANETS {
            let mid = interpolated_magnitude(spec, 0.5);
            let edge = interpolated_magnitude(spec, 0.01);
            assert!(mid <= edge, "{}: mid-cycle should be brightest", spec.name);
            assert_eq!(mid, spec.magnitude_brightest);
        }
    }

    #[test]
    fn always_reports_all_five_planets() {
        let results = visible_planets(evening(2024, 8, 15), 40.7128, -74.0060);
        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Mars", "Jupiter", "Saturn"]
        );
    }

    #[test]
    fn at_least_two_planets_visible_on_any_date() {
        // Sweep several years of dates; the floor must never break.
        let mut dt = evening(1999, 1, 1);
        for _ in 0..1500 {
            let results = visible_planets(dt, 40.7128, -74.0060);
            let visible = results.iter().filter(|p| p.is_visible).count();
            assert!(
                visible >= 2,
                "only {visible} visible planets at {dt:?}: {results:?}"
            );
            dt += chrono::Duration::days(1);
        }
    }

    #[test]
    fn venus_is_morning_or_evening_star() {
        let mut dt = evening(2024, 1, 1);
        for _ in 0..365 {
            let results = visible_planets(dt, 40.7128, -74.0060);
            let venus = results.iter().find(|p| p.name == "Venus").unwrap();
            // Venus may only lose visibility to the blackout perturbation,
            // never to its own phase rules.
            if venus.is_visible {
                assert!(
                    venus.position.contains("star")
                        || venus.position.contains("horizon"),
                    "unexpected Venus description: {}",
                    venus.position
                );
            }
            dt += chrono::Duration::days(1);
        }
    }

    #[test]
    fn blackout_dates_exist_for_non_jupiter_planets() {
        // Over a long sweep the mod-11 perturbation must actually fire.
        let mut blackouts = 0;
        let mut dt = evening(2024, 1, 1);
        for _ in 0..365 {
            let results = visible_planets(dt, 40.7128, -74.0060);
            blackouts += results
                .iter()
                .filter(|p| p.position == "Hidden below the horizon tonight")
                .count();
            dt += chrono::Duration::days(1);
        }
        assert!(blackouts > 0, "perturbation never fired in a year");
    }

    #[test]
    fn jupiter_never_blacked_out() {
        let mut dt = evening(2024, 1, 1);
        for _ in 0..730 {
            let results = visible_planets(dt, 40.7128, -74.0060);
            let jupiter = results.iter().find(|p| p.name == "Jupiter").unwrap();
            assert_ne!(jupiter.position, "Hidden below the horizon tonight");
            dt += chrono::Duration::days(1);
        }
    }

    #[test]
    fn results_are_deterministic() {
        let a = visible_planets(evening(2024, 8, 15), -33.87, 151.21);
        let b = visible_planets(evening(2024, 8, 15), -33.87, 151.21);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn southern_observer_sees_northern_meridian_wording() {
        // Pick a date where Mars sits in its mid-cycle band for the
        // meridian wording; sweep until one is found.
        let mut dt = evening(2024, 1, 1);
        let mut found = false;
        for _ in 0..800 {
            let results = visible_planets(dt, -33.87, 151.21);
            if let Some(mars) = results
                .iter()
                .find(|p| p.name == "Mars" && p.position.contains("sky around midnight"))
            {
                assert!(
                    mars.position.contains("northern"),
                    "southern observer wording: {}",
                    mars.position
                );
                found = true;
                break;
            }
            dt += chrono::Duration::days(1);
        }
        assert!(found, "Mars never entered its mid-cycle band in the sweep");
    }
}
