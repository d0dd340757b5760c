//! Constellation catalog and evening-sky selection.
//!
//! Selection is a heuristic, not rigorous horizon-altitude visibility:
//! a seasonal catalog is filtered by circular right-ascension distance
//! from the local sidereal time, topped up with 1–2 circumpolar picks,
//! and padded from a fixed common list so the sky never looks empty.
//! The 4–5 name floor is a presentation guarantee, not astronomy.
//!
//! All variety is seeded from the date number (`day + month*100 +
//! year*10000`) through an explicit hash, so a given date always
//! produces the same picks.

use crate::timebase::local_sidereal_hours;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Astronomical season, northern-hemisphere convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season for a calendar date using the 21st/20th solstice and
    /// equinox thresholds (Dec 21 – Mar 20 = winter, and so on).
    pub fn for_date(date: NaiveDate) -> Season {
        match (date.month(), date.day()) {
            (12, 21..) | (1, _) | (2, _) | (3, ..=20) => Season::Winter,
            (3, _) | (4, _) | (5, _) | (6, ..=20) => Season::Spring,
            (6, _) | (7, _) | (8, _) | (9, ..=20) => Season::Summer,
            _ => Season::Fall,
        }
    }

    /// The opposite season, for southern-hemisphere observers
    /// (winter↔summer, spring↔fall).
    pub fn inverted(self) -> Season {
        match self {
            Season::Winter => Season::Summer,
            Season::Spring => Season::Fall,
            Season::Summer => Season::Winter,
            Season::Fall => Season::Spring,
        }
    }
}

/// Which hemisphere's observers a catalog entry suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    Both,
}

impl Hemisphere {
    fn suits(self, latitude: f64) -> bool {
        match self {
            Hemisphere::Both => true,
            Hemisphere::North => latitude >= 0.0,
            Hemisphere::South => latitude < 0.0,
        }
    }
}

/// One static catalog entry: a constellation with its approximate
/// right-ascension center and its season/hemisphere affinity.
#[derive(Debug)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub abbreviation: &'static str,
    /// Approximate RA of the constellation's center, in hours.
    pub ra_hours: f64,
    pub season: Season,
    pub hemisphere: Hemisphere,
}

const fn entry(
    name: &'static str,
    abbreviation: &'static str,
    ra_hours: f64,
    season: Season,
    hemisphere: Hemisphere,
) -> CatalogEntry {
    CatalogEntry {
        name,
        abbreviation,
        ra_hours,
        season,
        hemisphere,
    }
}

/// Seasonal catalog, six constellations per season. RA centers are
/// approximate (constellations span hours of RA); they only need to be
/// close enough for the 6-hour selection window.
pub static SEASONAL_CATALOG: &[CatalogEntry] = &[
    // Winter
    entry("Orion", "Ori", 5.5, Season::Winter, Hemisphere::Both),
    entry("Taurus", "Tau", 4.5, Season::Winter, Hemisphere::Both),
    entry("Gemini", "Gem", 7.0, Season::Winter, Hemisphere::Both),
    entry("Canis Major", "CMa", 6.8, Season::Winter, Hemisphere::Both),
    entry("Auriga", "Aur", 6.0, Season::Winter, Hemisphere::North),
    entry("Perseus", "Per", 3.3, Season::Winter, Hemisphere::North),
    // Spring
    entry("Leo", "Leo", 10.7, Season::Spring, Hemisphere::Both),
    entry("Virgo", "Vir", 13.4, Season::Spring, Hemisphere::Both),
    entry("Boötes", "Boo", 14.6, Season::Spring, Hemisphere::North),
    entry("Cancer", "Cnc", 8.7, Season::Spring, Hemisphere::Both),
    entry("Hydra", "Hya", 10.2, Season::Spring, Hemisphere::Both),
    entry("Corvus", "Crv", 12.4, Season::Spring, Hemisphere::South),
    // Summer
    entry("Cygnus", "Cyg", 20.6, Season::Summer, Hemisphere::North),
    entry("Lyra", "Lyr", 18.8, Season::Summer, Hemisphere::North),
    entry("Aquila", "Aql", 19.7, Season::Summer, Hemisphere::Both),
    entry("Scorpius", "Sco", 16.9, Season::Summer, Hemisphere::Both),
    entry("Sagittarius", "Sgr", 19.1, Season::Summer, Hemisphere::Both),
    entry("Hercules", "Her", 17.1, Season::Summer, Hemisphere::North),
    // Fall
    entry("Pegasus", "Peg", 22.7, Season::Fall, Hemisphere::Both),
    entry("Andromeda", "And", 0.8, Season::Fall, Hemisphere::North),
    entry("Aquarius", "Aqr", 22.4, Season::Fall, Hemisphere::Both),
    entry("Pisces", "Psc", 0.5, Season::Fall, Hemisphere::Both),
    entry("Aries", "Ari", 2.6, Season::Fall, Hemisphere::Both),
    entry("Cetus", "Cet", 1.7, Season::Fall, Hemisphere::South),
];

/// Always-visible set for northern mid-latitudes.
pub static CIRCUMPOLAR_NORTH: [&str; 5] =
    ["Ursa Minor", "Cassiopeia", "Cepheus", "Draco", "Camelopardalis"];

/// Always-visible set for southern mid-latitudes.
pub static CIRCUMPOLAR_SOUTH: [&str; 5] = ["Crux", "Carina", "Centaurus", "Octans", "Musca"];

/// Padding list used when the seasonal + circumpolar selection comes up
/// short of the 4-name floor. Ordered by recognizability.
pub static COMMON_FALLBACK: [&str; 6] =
    ["Ursa Major", "Orion", "Cassiopeia", "Leo", "Cygnus", "Scorpius"];

/// Integer date key used to seed all date-derived variety:
/// `day + month*100 + year*10000`.
pub fn date_number(date: NaiveDate) -> u64 {
    (date.day() as i64 + date.month() as i64 * 100 + date.year() as i64 * 10_000) as u64
}

/// SplitMix64 finalizer. An explicit seeded hash, used instead of any
/// mutable random generator so the same date always hashes the same way.
pub(crate) fn mix_hash(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Circular distance between two right ascensions in hours, in `[0, 12]`.
/// Handles the wrap at the 24h/0h boundary.
fn circular_ra_distance(ra_hours: f64, lst_hours: f64) -> f64 {
    let diff = (ra_hours - lst_hours).abs();
    if diff > 12.0 {
        24.0 - diff
    } else {
        diff
    }
}

/// Select up to five constellation names for the evening sky.
///
/// 1. Season from the date, inverted south of the equator
/// 2. LST hours from the time base
/// 3. Seasonal entries within 6 h circular RA distance of the meridian,
///    sorted nearest-first
/// 4. 1–2 circumpolar picks, hashed from the date number (seasonal picks
///    are capped so the circumpolar names always survive the 5-name cut)
/// 5. Pad from [`COMMON_FALLBACK`] to at least 4, skipping duplicates
pub fn visible_constellations(
    dt: NaiveDateTime,
    latitude: f64,
    longitude: f64,
) -> Vec<&'static str> {
    let mut season = Season::for_date(dt.date());
    if latitude < 0.0 {
        season = season.inverted();
    }
    let lst = local_sidereal_hours(dt, longitude);

    let mut seasonal: Vec<&CatalogEntry> = SEASONAL_CATALOG
        .iter()
        .filter(|e| e.season == season)
        .filter(|e| e.hemisphere.suits(latitude))
        .filter(|e| circular_ra_distance(e.ra_hours, lst) <= 6.0)
        .collect();
    seasonal.sort_by(|a, b| {
        circular_ra_distance(a.ra_hours, lst).total_cmp(&circular_ra_distance(b.ra_hours, lst))
    });

    let pool: &[&'static str; 5] = if latitude >= 0.0 {
        &CIRCUMPOLAR_NORTH
    } else {
        &CIRCUMPOLAR_SOUTH
    };
    let h = mix_hash(date_number(dt.date()));
    let first = (h % pool.len() as u64) as usize;
    let second = ((h >> 8) % pool.len() as u64) as usize;
    let mut circumpolar = vec![pool[first]];
    if second != first {
        circumpolar.push(pool[second]);
    }

    let mut names: Vec<&'static str> = seasonal
        .iter()
        .take(5 - circumpolar.len())
        .map(|e| e.name)
        .collect();
    for name in circumpolar {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    for name in COMMON_FALLBACK {
        if names.len() >= 4 {
            break;
        }
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names.truncate(5);
    names
}

// --- Stick-figure geometry -------------------------------------------------

/// Stick-figure rendering data for one constellation: star positions in a
/// local ~100×80 pixel space, plus index pairs for the connecting lines.
#[derive(Debug)]
pub struct Figure {
    pub stars: &'static [(f32, f32)],
    pub lines: &'static [(usize, usize)],
}

/// Placeholder shape for constellations without catalog geometry: a
/// four-star diamond. Graceful degradation, not an error.
pub static DEFAULT_FIGURE: Figure = Figure {
    stars: &[(50.0, 20.0), (70.0, 45.0), (50.0, 70.0), (30.0, 45.0)],
    lines: &[(0, 1), (1, 2), (2, 3), (3, 0)],
};

static ORION: Figure = Figure {
    stars: &[
        (62.0, 18.0), // Betelgeuse
        (38.0, 20.0), // Bellatrix
        (55.0, 42.0), // Alnitak
        (50.0, 44.0), // Alnilam
        (45.0, 46.0), // Mintaka
        (58.0, 70.0), // Saiph
        (35.0, 68.0), // Rigel
    ],
    lines: &[(0, 2), (1, 4), (2, 3), (3, 4), (2, 5), (4, 6)],
};

static URSA_MAJOR: Figure = Figure {
    stars: &[
        (20.0, 20.0),
        (22.0, 40.0),
        (42.0, 44.0),
        (40.0, 24.0),
        (56.0, 28.0),
        (70.0, 32.0),
        (86.0, 42.0),
    ],
    lines: &[(0, 1), (1, 2), (2, 3), (3, 0), (3, 4), (4, 5), (5, 6)],
};

static URSA_MINOR: Figure = Figure {
    stars: &[
        (50.0, 8.0), // Polaris
        (45.0, 22.0),
        (40.0, 36.0),
        (34.0, 48.0),
        (20.0, 54.0),
        (14.0, 42.0),
        (28.0, 38.0),
    ],
    lines: &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 3)],
};

static CASSIOPEIA: Figure = Figure {
    stars: &[
        (10.0, 40.0),
        (28.0, 24.0),
        (46.0, 38.0),
        (64.0, 20.0),
        (82.0, 34.0),
    ],
    lines: &[(0, 1), (1, 2), (2, 3), (3, 4)],
};

static CEPHEUS: Figure = Figure {
    stars: &[
        (30.0, 60.0),
        (70.0, 60.0),
        (74.0, 30.0),
        (50.0, 12.0),
        (26.0, 30.0),
    ],
    lines: &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)],
};

static DRACO: Figure = Figure {
    stars: &[
        (10.0, 70.0),
        (22.0, 60.0),
        (34.0, 52.0),
        (46.0, 46.0),
        (58.0, 40.0),
        (66.0, 28.0),
        (58.0, 16.0),
        (46.0, 14.0),
    ],
    lines: &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7), (7, 5)],
};

static LEO: Figure = Figure {
    stars: &[
        (30.0, 62.0), // Regulus
        (28.0, 46.0),
        (36.0, 32.0),
        (48.0, 22.0),
        (62.0, 26.0),
        (66.0, 38.0),
        (88.0, 52.0), // Denebola
        (70.0, 58.0),
    ],
    lines: &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7), (7, 0)],
};

static SCORPIUS: Figure = Figure {
    stars: &[
        (18.0, 10.0),
        (28.0, 18.0),
        (38.0, 30.0),
        (42.0, 42.0), // Antares
        (44.0, 56.0),
        (50.0, 68.0),
        (62.0, 74.0),
        (74.0, 70.0),
        (80.0, 60.0),
    ],
    lines: &[
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 4),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 8),
    ],
};

static CYGNUS: Figure = Figure {
    stars: &[
        (50.0, 10.0), // Deneb
        (50.0, 36.0),
        (50.0, 72.0), // Albireo
        (22.0, 44.0),
        (78.0, 30.0),
    ],
    lines: &[(0, 1), (1, 2), (1, 3), (1, 4)],
};

static LYRA: Figure = Figure {
    stars: &[
        (40.0, 14.0), // Vega
        (48.0, 24.0),
        (34.0, 26.0),
        (44.0, 44.0),
        (30.0, 46.0),
    ],
    lines: &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 4), (3, 4)],
};

static TAURUS: Figure = Figure {
    stars: &[
        (48.0, 46.0), // Aldebaran
        (41.0, 38.0),
        (35.0, 30.0),
        (55.0, 40.0),
        (62.0, 32.0),
        (22.0, 12.0),
        (78.0, 10.0),
    ],
    lines: &[(0, 1), (1, 2), (2, 5), (0, 3), (3, 4), (4, 6)],
};

static GEMINI: Figure = Figure {
    stars: &[
        (36.0, 12.0), // Castor
        (60.0, 14.0), // Pollux
        (34.0, 34.0),
        (58.0, 36.0),
        (30.0, 56.0),
        (56.0, 58.0),
        (24.0, 72.0),
        (50.0, 74.0),
    ],
    lines: &[(0, 2), (2, 4), (4, 6), (1, 3), (3, 5), (5, 7), (2, 3)],
};

static PEGASUS: Figure = Figure {
    stars: &[
        (30.0, 24.0),
        (70.0, 20.0),
        (74.0, 60.0),
        (26.0, 64.0),
        (12.0, 40.0),
    ],
    lines: &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 4)],
};

static CRUX: Figure = Figure {
    stars: &[(50.0, 10.0), (50.0, 70.0), (24.0, 44.0), (72.0, 40.0)],
    lines: &[(0, 1), (2, 3)],
};

static ANDROMEDA: Figure = Figure {
    stars: &[
        (12.0, 60.0),
        (32.0, 48.0),
        (52.0, 36.0),
        (72.0, 24.0),
        (88.0, 14.0),
    ],
    lines: &[(0, 1), (1, 2), (2, 3), (3, 4)],
};

static CANIS_MAJOR: Figure = Figure {
    stars: &[
        (40.0, 20.0), // Sirius
        (52.0, 30.0),
        (36.0, 38.0),
        (46.0, 54.0),
        (34.0, 66.0),
        (56.0, 70.0),
    ],
    lines: &[(0, 1), (0, 2), (2, 3), (3, 4), (3, 5)],
};

/// Stick-figure geometry for a constellation name, if the catalog has it.
/// Callers fall back to [`DEFAULT_FIGURE`] for unknown names.
pub fn figure_for(name: &str) -> Option<&'static Figure> {
    match name {
        "Orion" => Some(&ORION),
        "Ursa Major" => Some(&URSA_MAJOR),
        "Ursa Minor" => Some(&URSA_MINOR),
        "Cassiopeia" => Some(&CASSIOPEIA),
        "Cepheus" => Some(&CEPHEUS),
        "Draco" => Some(&DRACO),
        "Leo" => Some(&LEO),
        "Scorpius" => Some(&SCORPIUS),
        "Cygnus" => Some(&CYGNUS),
        "Lyra" => Some(&LYRA),
        "Taurus" => Some(&TAURUS),
        "Gemini" => Some(&GEMINI),
        "Pegasus" => Some(&PEGASUS),
        "Crux" => Some(&CRUX),
        "Andromeda" => Some(&ANDROMEDA),
        "Canis Major" => Some(&CANIS_MAJOR),
        _ => None,
    }
}
