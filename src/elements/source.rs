use chrono::{TimeZone, Utc};
use serde::Deserialize;

use crate::catalog::CatalogRecord;
use crate::elements::error::ElementsError;
use crate::elements::units::{
    mean_motion_ddot_rad_s3, mean_motion_dot_rad_s2, mean_motion_rad_s, normalize,
};
use crate::elements::types::MeanElementSet;

/// Where a record's mean elements are taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ElementSource {
    /// The individual GP fields of the catalog record.
    #[default]
    Fields,
    /// The record's raw two-line element set.
    Tle,
}

impl ElementSource {
    pub fn mean_elements(&self, record: &CatalogRecord) -> Result<MeanElementSet, ElementsError> {
        let elements = match self {
            ElementSource::Fields => normalize(record)?,
            ElementSource::Tle => from_tle(record)?,
        };
        if !elements.is_finite() {
            return Err(ElementsError::NonFinite);
        }
        Ok(elements)
    }
}

fn from_tle(record: &CatalogRecord) -> Result<MeanElementSet, ElementsError> {
    let (line1, line2) = match (&record.tle_line1, &record.tle_line2) {
        (Some(line1), Some(line2)) => (line1, line2),
        _ => return Err(ElementsError::MissingTle),
    };

    let elements =
        sgp4::Elements::from_tle(Some(record.name.clone()), line1.as_bytes(), line2.as_bytes())?;

    if elements.norad_id != u64::from(record.catalog_id) {
        log::warn!(
            "Record {}: TLE lines carry catalog number {}",
            record.catalog_id,
            elements.norad_id
        );
    }

    Ok(MeanElementSet {
        epoch: Utc.from_utc_datetime(&elements.datetime),
        mean_motion: mean_motion_rad_s(elements.mean_motion),
        mean_motion_dot: mean_motion_dot_rad_s2(elements.mean_motion_dot),
        mean_motion_ddot: mean_motion_ddot_rad_s3(elements.mean_motion_ddot),
        eccentricity: elements.eccentricity,
        inclination: elements.inclination.to_radians(),
        raan: elements.right_ascension.to_radians(),
        arg_of_pericenter: elements.argument_of_perigee.to_radians(),
        mean_anomaly: elements.mean_anomaly.to_radians(),
        bstar: elements.drag_term,
    })
}
