//! Gravity source selection: find the nearest planet-like body and compute
//! the unit direction toward it.
//!
//! Explicitly tagged sources always win. When the world tags nothing, the
//! selector falls back to the largest roughly-uniform static body, which is
//! a scale heuristic standing in for a real sphere test.

use glam::Vec3;

use crate::collaborators::{CandidateBody, WorldQuery};
use crate::frame::safe_normal;

/// Range below which the body counts as coincident with its source and
/// gravity direction is undefined.
pub const MIN_SOURCE_RANGE: f32 = 1.0;

/// Minimum squared scale magnitude for an untagged body to count as a planet.
pub const FALLBACK_MIN_SCALE_SQ: f32 = 100.0;

/// Minimum smallest-to-largest axis scale ratio for an untagged body to
/// count as a planet. Flat floors fall below it.
pub const FALLBACK_MIN_AXIS_RATIO: f32 = 0.2;

/// Returns `true` if `scale` is large enough and uniform enough to be a planet.
pub fn is_planet_like(scale: Vec3) -> bool {
    let scale = scale.abs();
    if scale.length_squared() < FALLBACK_MIN_SCALE_SQ {
        return false;
    }
    let max = scale.max_element();
    let min = scale.min_element();
    !(max > 0.0 && min / max < FALLBACK_MIN_AXIS_RATIO)
}

/// The largest planet-like body among `candidates`, if any.
///
/// Ties keep the first candidate seen.
pub fn largest_planet_like(candidates: &[CandidateBody]) -> Option<Vec3> {
    let mut best: Option<(f32, Vec3)> = None;
    for candidate in candidates {
        if !is_planet_like(candidate.scale) {
            continue;
        }
        let scale_sq = candidate.scale.length_squared();
        if best.is_none_or(|(best_sq, _)| scale_sq > best_sq) {
            best = Some((scale_sq, candidate.position));
        }
    }
    best.map(|(_, position)| position)
}

/// Collects source positions: every tagged source, or the single fallback
/// body when nothing is tagged.
pub fn collect_sources(world: &dyn WorldQuery) -> Vec<Vec3> {
    let tagged = world.tagged_gravity_sources();
    if !tagged.is_empty() {
        return tagged;
    }
    largest_planet_like(&world.candidate_bodies())
        .into_iter()
        .collect()
}

/// The source nearest to `position`, independent of slice order for
/// distinct distances.
pub fn nearest_source(position: Vec3, sources: &[Vec3]) -> Option<Vec3> {
    sources
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .min_by(|a, b| {
            a.distance_squared(position)
                .total_cmp(&b.distance_squared(position))
        })
}

/// Unit direction from `position` toward `source`, or exactly zero when the
/// two are closer than [`MIN_SOURCE_RANGE`].
pub fn direction_toward(position: Vec3, source: Vec3) -> Vec3 {
    let to_source = source - position;
    if to_source.length() < MIN_SOURCE_RANGE {
        return Vec3::ZERO;
    }
    safe_normal(to_source)
}

/// Full selector: nearest source and the direction toward it, or the zero
/// sentinel when no source qualifies.
pub fn select_gravity_direction(position: Vec3, world: &dyn WorldQuery) -> Vec3 {
    let sources = collect_sources(world);
    match nearest_source(position, &sources) {
        Some(source) => direction_toward(position, source),
        None => Vec3::ZERO,
    }
}
