use std::f64::consts::TAU;

use crate::catalog::CatalogRecord;
use crate::elements::epoch::parse_epoch;
use crate::elements::error::EpochParseError;
use crate::elements::types::MeanElementSet;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// rev/day -> rad/s
pub fn mean_motion_rad_s(rev_per_day: f64) -> f64 {
    rev_per_day * TAU / SECONDS_PER_DAY
}

/// Catalog first derivative (stored as ṅ/2, rev/day²) -> ṅ in rad/s².
pub fn mean_motion_dot_rad_s2(half_rev_per_day2: f64) -> f64 {
    half_rev_per_day2 * TAU / (SECONDS_PER_DAY * SECONDS_PER_DAY) * 2.0
}

/// Catalog second derivative (stored as n̈/6, rev/day³) -> n̈ in rad/s³.
pub fn mean_motion_ddot_rad_s3(sixth_rev_per_day3: f64) -> f64 {
    sixth_rev_per_day3 * TAU / (SECONDS_PER_DAY * SECONDS_PER_DAY * SECONDS_PER_DAY) * 6.0
}

/// Convert a catalog record from catalog units to working units.
pub fn normalize(record: &CatalogRecord) -> Result<MeanElementSet, EpochParseError> {
    let epoch = parse_epoch(&record.epoch)?;
    Ok(MeanElementSet {
        epoch,
        mean_motion: mean_motion_rad_s(record.mean_motion),
        mean_motion_dot: mean_motion_dot_rad_s2(record.mean_motion_dot),
        mean_motion_ddot: mean_motion_ddot_rad_s3(record.mean_motion_ddot),
        eccentricity: record.eccentricity,
        inclination: record.inclination.to_radians(),
        raan: record.ra_of_asc_node.to_radians(),
        arg_of_pericenter: record.arg_of_pericenter.to_radians(),
        mean_anomaly: record.mean_anomaly.to_radians(),
        bstar: record.bstar,
    })
}
