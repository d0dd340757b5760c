//! # Sky Almanac Application Entry Point
//!
//! This binary wraps the report engine in a small CLI: pick a date and
//! location (arguments or config-file defaults), generate the report,
//! and print it as a human summary or JSON. SVG output can be dumped to
//! files for inspection in a browser.

// Test modules
#[cfg(test)]
mod tests;

// Re-export library types for internal use
pub use night_sky_lib::{config::Config, SkyReport};

// Application dependencies
use anyhow::Context;
use chrono::Local;
use night_sky_lib::cache::ReportCache;
use night_sky_lib::report::SkyRequest;
use std::time::Duration;
use std::{env, fs};

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Flags: --json for machine output, --svg to dump the graphics.
    // Positional arguments: [DATE] [LAT LNG], all optional.
    let args: Vec<String> = env::args().skip(1).collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let svg_mode = args.iter().any(|a| a == "--svg");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let config = Config::load();

    let date = positional
        .first()
        .map(|s| s.to_string())
        .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
    let latitude = positional
        .get(1)
        .map(|s| s.parse())
        .transpose()
        .context("latitude must be a number")?
        .unwrap_or(config.observer.latitude);
    let longitude = positional
        .get(2)
        .map(|s| s.parse())
        .transpose()
        .context("longitude must be a number")?
        .unwrap_or(config.observer.longitude);

    // Pure white is the renderer default; only a real tint is forwarded
    let moon_light_color = if config.display.moon_light_color.eq_ignore_ascii_case("#FFFFFF") {
        None
    } else {
        Some(config.display.moon_light_color.clone())
    };

    let request = SkyRequest {
        date,
        latitude,
        longitude,
        moon_light_color,
    };

    // One-shot CLI runs still go through the cache so repeated dates in
    // a long-lived shell session (watch, cron) reuse the same store path
    // an HTTP caller would.
    let mut cache = ReportCache::new(Duration::from_secs(config.cache.ttl_minutes * 60));
    let report = cache.get_or_generate(&request)?;

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if svg_mode {
        fs::write("sky-moon.svg", &report.moon_phase.svg_path).context("write sky-moon.svg")?;
        fs::write("sky-starmap.svg", &report.star_map_svg).context("write sky-starmap.svg")?;
        eprintln!("Wrote sky-moon.svg and sky-starmap.svg");
    }

    Ok(())
}

/// Human-readable terminal summary of a report.
fn print_summary(report: &SkyReport) {
    println!("🌌 Sky Almanac — {}", report.formatted_date);
    if let Some(location) = &report.location {
        println!("📍 {location}");
    }
    println!();
    println!(
        "{} {} — {}% illuminated",
        report.moon_phase.emoji, report.moon_phase.name, report.moon_phase.illumination
    );
    println!();

    println!("✨ Constellations overhead:");
    for name in &report.constellations {
        println!("   • {name}");
    }
    println!();

    println!("🪐 Planets:");
    for planet in &report.planets {
        let marker = if planet.is_visible { "✓" } else { "✗" };
        println!(
            "   {marker} {:<8} (mag {:>5.1})  {}",
            planet.name, planet.magnitude, planet.position
        );
    }
}
