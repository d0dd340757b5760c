//! SVG rendering for the moon disc and the star map.
//!
//! Both renderers are pure string-producing functions: shape records go
//! into an [`svg::Document`] and markup comes out. The star field is
//! decorative — positions come from a date-seeded linear congruential
//! generator, not a star catalog — while constellation stick figures use
//! the static geometry from the catalog module.

use crate::constellations::{date_number, figure_for, mix_hash, DEFAULT_FIGURE};
use crate::svg::{Document, Element};
use crate::timebase::local_sidereal_hours;
use chrono::NaiveDateTime;
use std::f64::consts::TAU;

/// Moon viewport is a fixed 100×100 coordinate space.
pub const MOON_CANVAS: u32 = 100;
/// Moon disc radius within the viewport.
const MOON_RADIUS: f64 = 45.0;
/// Default fill for the lit portion of the disc. The report layer
/// substitutes this exact string when a custom moon light color is
/// requested, so it must appear verbatim in the markup.
pub const MOON_LIGHT_FILL: &str = "#FFFFFF";
/// Fill for the unlit disc.
const MOON_DARK_FILL: &str = "#1C1C2E";

/// Tolerance around the exact new/quarter/full fractions that collapses
/// to the special-cased solid and half discs.
const PHASE_SNAP: f64 = 0.02;

/// Star map canvas size.
const MAP_WIDTH: u32 = 600;
const MAP_HEIGHT: u32 = 400;
/// Background star count.
const BACKGROUND_STARS: usize = 200;
/// Anchor points for up to five constellation figures, spread so the
/// ~90px-wide figures never collide.
const FIGURE_ANCHORS: [(f64, f64); 5] = [
    (80.0, 70.0),
    (300.0, 50.0),
    (470.0, 100.0),
    (150.0, 250.0),
    (400.0, 260.0),
];
const FIGURE_SCALE: f64 = 0.9;

/// Render the shaded moon disc for a phase fraction.
///
/// Exact new and full collapse to solid discs and the quarters to exact
/// half discs; every other phase draws the lit region between the outer
/// limb semicircle and an elliptical terminator arc. The terminator's
/// horizontal semi-axis is the phase-angle curvature factor times the
/// radius — zero at the quarters (a straight line), approaching the full
/// radius toward new and full — and the arc sweep flips between the
/// waxing and waning halves of the cycle so the lit side is correct.
pub fn render_moon_svg(phase_fraction: f64) -> String {
    let f = phase_fraction.rem_euclid(1.0);
    let mut doc = Document::new(MOON_CANVAS, MOON_CANVAS);

    // Unlit disc underneath everything
    doc.push(Element::Circle {
        cx: 50.0,
        cy: 50.0,
        r: MOON_RADIUS,
        fill: MOON_DARK_FILL.to_string(),
        opacity: None,
    });

    let top = 50.0 - MOON_RADIUS;
    let bottom = 50.0 + MOON_RADIUS;

    if f < PHASE_SNAP || f > 1.0 - PHASE_SNAP {
        // New moon: the dark disc alone
    } else if (f - 0.5).abs() < PHASE_SNAP {
        // Full moon: solid lit disc
        doc.push(Element::Circle {
            cx: 50.0,
            cy: 50.0,
            r: MOON_RADIUS,
            fill: MOON_LIGHT_FILL.to_string(),
            opacity: None,
        });
    } else if (f - 0.25).abs() < PHASE_SNAP {
        // First quarter: exact right half disc
        doc.push(Element::Path {
            d: format!("M 50 {top} A {MOON_RADIUS} {MOON_RADIUS} 0 0 1 50 {bottom} Z"),
            fill: MOON_LIGHT_FILL.to_string(),
        });
    } else if (f - 0.75).abs() < PHASE_SNAP {
        // Last quarter: exact left half disc
        doc.push(Element::Path {
            d: format!("M 50 {top} A {MOON_RADIUS} {MOON_RADIUS} 0 0 0 50 {bottom} Z"),
            fill: MOON_LIGHT_FILL.to_string(),
        });
    } else {
        // Crescent or gibbous: outer limb on the lit side, elliptical
        // terminator back across the disc.
        let waxing = f < 0.5;
        let terminator_rx = round1((TAU * f).cos().abs() * MOON_RADIUS);

        // Waxing light grows on the right limb, waning on the left.
        let limb_sweep = if waxing { 1 } else { 0 };
        // Crescents bow the terminator toward the lit limb, gibbous
        // phases away from it.
        let terminator_sweep = match (waxing, f) {
            (true, f) if f < 0.25 => 0,
            (true, _) => 1,
            (false, f) if f < 0.75 => 0,
            (false, _) => 1,
        };

        doc.push(Element::Path {
            d: format!(
                "M 50 {top} A {MOON_RADIUS} {MOON_RADIUS} 0 0 {limb_sweep} 50 {bottom} \
                 A {terminator_rx} {MOON_RADIUS} 0 0 {terminator_sweep} 50 {top} Z"
            ),
            fill: MOON_LIGHT_FILL.to_string(),
        });
    }

    doc.render()
}

/// Render the star map: a dark canvas, ~200 seeded background stars, and
/// a labeled stick figure for each requested constellation.
///
/// Background star positions are reproducible decoration — a linear
/// congruential generator seeded from the date number, not real star
/// positions. Figures take a small offset from the sidereal hour and the
/// observer latitude so the map shifts from night to night.
pub fn render_star_map_svg(
    constellation_names: &[String],
    dt: NaiveDateTime,
    latitude: f64,
    longitude: f64,
) -> String {
    let mut doc = Document::new(MAP_WIDTH, MAP_HEIGHT);
    doc.push(Element::Rect {
        x: 0.0,
        y: 0.0,
        width: MAP_WIDTH as f64,
        height: MAP_HEIGHT as f64,
        fill: "#0B1026".to_string(),
    });

    // Background star field
    let mut lcg = Lcg::new(mix_hash(date_number(dt.date())) as u32);
    for _ in 0..BACKGROUND_STARS {
        let x = round1(lcg.next_unit() * MAP_WIDTH as f64);
        let y = round1(lcg.next_unit() * MAP_HEIGHT as f64);
        let r = round2(0.3 + lcg.next_unit());
        let opacity = round2(0.3 + lcg.next_unit() * 0.7);
        doc.push(Element::Circle {
            cx: x,
            cy: y,
            r,
            fill: "#E8ECFF".to_string(),
            opacity: Some(opacity),
        });
    }

    // Nightly drift: east-west from the sidereal hour, north-south from
    // the observer latitude. Small on purpose; anchors do the layout.
    let lst = local_sidereal_hours(dt, longitude);
    let dx = round1((lst - 12.0) / 12.0 * 18.0);
    let dy = round1(latitude / 90.0 * 14.0);

    for (index, name) in constellation_names.iter().take(FIGURE_ANCHORS.len()).enumerate() {
        let (anchor_x, anchor_y) = FIGURE_ANCHORS[index];
        let figure = figure_for(name).unwrap_or(&DEFAULT_FIGURE);

        let place = |(sx, sy): (f32, f32)| {
            (
                round1(anchor_x + dx + sx as f64 * FIGURE_SCALE),
                round1(anchor_y + dy + sy as f64 * FIGURE_SCALE),
            )
        };

        // Lines under the stars
        for &(a, b) in figure.lines {
            let (x1, y1) = place(figure.stars[a]);
            let (x2, y2) = place(figure.stars[b]);
            doc.push(Element::Line {
                x1,
                y1,
                x2,
                y2,
                stroke: "#7E8FC9".to_string(),
                stroke_width: 1.0,
                opacity: Some(0.55),
            });
        }
        for &star in figure.stars {
            let (cx, cy) = place(star);
            doc.push(Element::Circle {
                cx,
                cy,
                r: 1.6,
                fill: "#FFFFFF".to_string(),
                opacity: None,
            });
        }

        let (label_x, label_y) = (
            round1(anchor_x + dx + 10.0),
            round1(anchor_y + dy + 86.0 * FIGURE_SCALE),
        );
        doc.push(Element::Text {
            x: label_x,
            y: label_y,
            content: name.clone(),
            fill: "#A9B8E8".to_string(),
            font_size: 11.0,
        });
    }

    doc.render()
}

/// Linear congruential generator (Numerical Recipes constants). Only
/// used for decorative star placement; the seed fixes the whole field.
struct Lcg {
    state: u32,
}

impl Lcg {
    fn new(seed: u32) -> Self {
        Lcg { state: seed }
    }

    /// Next value in `[0, 1)`, from the high bits of the state.
    fn next_unit(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.state >> 8) as f64 / 16_777_216.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
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
    fn new_moon_is_entirely_dark() {
        let markup = render_moon_svg(0.0);
        assert!(markup.contains(MOON_DARK_FILL));
        assert!(
            !markup.contains(MOON_LIGHT_FILL),
            "new moon must not contain any lit shape"
        );
    }

    #[test]
    fn full_moon_is_entirely_light() {
        let markup = render_moon_svg(0.5);
        // A lit circle covering the whole disc sits on top
        assert!(markup.contains(&format!(
            "<circle cx=\"50\" cy=\"50\" r=\"45\" fill=\"{MOON_LIGHT_FILL}\""
        )));
    }

    #[test]
    fn quarters_render_half_discs() {
        let first = render_moon_svg(0.25);
        let last = render_moon_svg(0.75);
        assert!(first.contains("A 45 45 0 0 1 50 95 Z"), "{first}");
        assert!(last.contains("A 45 45 0 0 0 50 95 Z"), "{last}");
        assert_ne!(first, last);
    }

    #[test]
    fn crescent_and_gibbous_use_terminator_arc() {
        for phase in [0.1, 0.35, 0.6, 0.9] {
            let markup = render_moon_svg(phase);
            // Two arcs in one path: limb then terminator
            let path_start = markup.find("<path").expect("lit path present");
            let arcs = markup[path_start..].matches(" A ").count();
            assert_eq!(arcs, 2, "expected limb + terminator arcs at {phase}: {markup}");
            assert!(markup.contains(MOON_LIGHT_FILL));
        }
    }

    #[test]
    fn waxing_and_waning_crescents_differ() {
        assert_ne!(render_moon_svg(0.1), render_moon_svg(0.9));
    }

    #[test]
    fn phase_wraps_outside_unit_interval() {
        assert_eq!(render_moon_svg(1.35), render_moon_svg(0.35));
        assert_eq!(render_moon_svg(-0.25), render_moon_svg(0.75));
    }

    #[test]
    fn star_map_is_deterministic() {
        let names = vec!["Orion".to_string(), "Cassiopeia".to_string()];
        let a = render_star_map_svg(&names, evening(2024, 1, 15), 40.7128, -74.0060);
        let b = render_star_map_svg(&names, evening(2024, 1, 15), 40.7128, -74.0060);
        assert_eq!(a, b);
    }

    #[test]
    fn star_map_changes_with_date() {
        let names = vec!["Orion".to_string()];
        let a = render_star_map_svg(&names, evening(2024, 1, 15), 40.7128, -74.0060);
        let b = render_star_map_svg(&names, evening(2024, 1, 16), 40.7128, -74.0060);
        assert_ne!(a, b, "background field and offsets should shift nightly");
    }

    #[test]
    fn star_map_has_full_background_field() {
        let markup = render_star_map_svg(&[], evening(2024, 6, 1), 0.0, 0.0);
        let circles = markup.matches("<circle").count();
        assert_eq!(circles, BACKGROUND_STARS);
    }

    #[test]
    fn unknown_constellation_gets_placeholder_shape() {
        let names = vec!["Zubeneschamali Prime".to_string()];
        let markup = render_star_map_svg(&names, evening(2024, 6, 1), 40.7128, -74.0060);
        // 200 background stars + the 4-star placeholder
        let circles = markup.matches("<circle").count();
        assert_eq!(circles, BACKGROUND_STARS + DEFAULT_FIGURE.stars.len());
        assert!(markup.contains("Zubeneschamali Prime"));
    }

    #[test]
    fn known_figures_draw_their_stars_and_labels() {
        let names = vec!["Orion".to_string(), "Crux".to_string()];
        let markup = render_star_map_svg(&names, evening(2024, 2, 1), -33.87, 151.21);
        let circles = markup.matches("<circle").count();
        // Orion has 7 stars, Crux 4
        assert_eq!(circles, BACKGROUND_STARS + 7 + 4);
        assert!(markup.contains(">Orion</text>"));
        assert!(markup.contains(">Crux</text>"));
    }

    #[test]
    fn at_most_five_figures_are_drawn() {
        let names: Vec<String> = (0..8).map(|i| format!("Constellation {i}")).collect();
        let markup = render_star_map_svg(&names, evening(2024, 2, 1), 40.0, -74.0);
        let labels = markup.matches("</text>").count();
        assert_eq!(labels, 5);
    }
}
