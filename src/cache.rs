//! In-memory report cache with TTL.
//!
//! The engine is pure CPU, so caching is strictly a courtesy to callers
//! that serve the same date/location repeatedly (an HTTP layer, a
//! kiosk). The store is an explicit value owned and injected by the
//! caller — there is no process-wide singleton — and entries expire by
//! age, checked on access.

use crate::report::{generate_report, ReportError, SkyRequest};
use crate::SkyReport;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache key: the full request identity. Coordinates are keyed by their
/// bit patterns so lookups are exact, never tolerance-based.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
struct CacheKey {
    date: String,
    latitude_bits: u64,
    longitude_bits: u64,
    moon_light_color: Option<String>,
}

impl CacheKey {
    fn for_request(request: &SkyRequest) -> CacheKey {
        CacheKey {
            date: request.date.clone(),
            latitude_bits: request.latitude.to_bits(),
            longitude_bits: request.longitude.to_bits(),
            moon_light_color: request.moon_light_color.clone(),
        }
    }
}

struct CacheEntry {
    report: SkyReport,
    stored_at: Instant,
}

/// TTL-evicting report store, keyed by the full request.
pub struct ReportCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl ReportCache {
    pub fn new(ttl: Duration) -> Self {
        ReportCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Look up a fresh entry for the request; expired entries are
    /// dropped on the way out.
    pub fn get(&mut self, request: &SkyRequest) -> Option<SkyReport> {
        let key = CacheKey::for_request(request);
        match self.entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.report.clone()),
            Some(_) => {
                self.entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, request: &SkyRequest, report: SkyReport) {
        self.entries.insert(
            CacheKey::for_request(request),
            CacheEntry {
                report,
                stored_at: Instant::now(),
            },
        );
    }

    /// Cached report for the request, generating and storing on a miss.
    /// Validation errors are never cached.
    pub fn get_or_generate(&mut self, request: &SkyRequest) -> Result<SkyReport, ReportError> {
        if let Some(report) = self.get(request) {
            return Ok(report);
        }
        let report = generate_report(request)?;
        self.insert(request, report.clone());
        Ok(report)
    }

    /// Drop every expired entry. Useful for long-lived callers that
    /// would otherwise only evict keys they happen to touch.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
