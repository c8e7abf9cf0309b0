use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::almanac::{Almanac, AlmanacError, LOCATION, SEED};
use crate::range_map::Location;

/// Running minimum shared between rayon workers.
struct AtomicMin(AtomicU64);

impl AtomicMin {
    fn new() -> Self {
        AtomicMin(AtomicU64::new(Location::MAX))
    }

    /// Retries the swap against the latest value until it lands or is no longer an improvement.
    fn offer(&self, candidate: Location) {
        let mut cur = self.0.load(Ordering::Relaxed);
        while candidate < cur {
            match self
                .0
                .compare_exchange_weak(cur, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }

    fn into_inner(self) -> Location {
        self.0.into_inner()
    }
}

pub fn compute_seed_locations(almanac: &Almanac) -> Result<Vec<Location>, AlmanacError> {
    let pipeline = almanac.pipeline(SEED, LOCATION)?;
    Ok(almanac.seeds.iter().map(|&seed| pipeline.apply(seed)).collect())
}

pub fn lowest_location(almanac: &Almanac) -> Result<Option<Location>, AlmanacError> {
    Ok(compute_seed_locations(almanac)?.into_iter().min())
}

/// Runs every seed of every seed range through the maps.
pub fn lowest_location_brute_force(almanac: &Almanac) -> Result<Option<Location>, AlmanacError> {
    let pipeline = almanac.pipeline(SEED, LOCATION)?;
    let seed_ranges = almanac.seed_ranges()?;
    if seed_ranges.iter().all(|range| range.is_empty()) {
        return Ok(None);
    }

    let lowest = AtomicMin::new();
    for range in seed_ranges {
        debug!(start = range.start, end = range.end, "scanning seed range");
        range
            .into_par_iter()
            .for_each(|seed| lowest.offer(pipeline.apply(seed)));
    }
    Ok(Some(lowest.into_inner()))
}

/// Walks locations upwards through the inverted maps and stops at the first one
/// whose seed was planted and maps forward onto it again. The inverted maps fall
/// back to identity outside their rules, so a location no seed reaches can still
/// invert to a planted seed.
///
/// No stage outputs more than the larger of its input and its rule outputs, so
/// every reachable location sits at or below `bound`. `None` means no location
/// up to there leads back to a seed.
pub fn lowest_location_inverse_scan(almanac: &Almanac) -> Result<Option<Location>, AlmanacError> {
    let pipeline = almanac.pipeline(SEED, LOCATION)?;
    let seed_ranges = almanac.seed_ranges()?;
    let bound = seed_ranges
        .iter()
        .map(|range| range.end)
        .max()
        .unwrap_or(0)
        .max(pipeline.output_bound());
    let inverse = pipeline.reverse();

    debug!(bound, "scanning locations through the inverted maps");
    Ok((0..=bound).find(|&location| {
        let seed = inverse.apply(location);
        seed_ranges.iter().any(|range| range.contains(&seed)) && pipeline.apply(seed) == location
    }))
}
