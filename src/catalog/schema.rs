//! Space-Track GP keys and how they map onto [`CatalogRecord`].
//!
//! Space-Track publishes numeric values as JSON strings, other tools write
//! plain numbers. Both are accepted.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use super::record::CatalogRecord;

#[derive(Debug, Deserialize)]
pub(super) struct GpEntry {
    #[serde(rename = "OBJECT_NAME", default)]
    object_name: Option<String>,
    #[serde(rename = "NORAD_CAT_ID", deserialize_with = "catalog_id")]
    norad_cat_id: u32,
    #[serde(rename = "BSTAR", deserialize_with = "number")]
    bstar: f64,
    #[serde(rename = "MEAN_MOTION_DOT", deserialize_with = "number")]
    mean_motion_dot: f64,
    #[serde(rename = "MEAN_MOTION_DDOT", deserialize_with = "number")]
    mean_motion_ddot: f64,
    #[serde(rename = "MEAN_MOTION", deserialize_with = "number")]
    mean_motion: f64,
    #[serde(rename = "ECCENTRICITY", deserialize_with = "number")]
    eccentricity: f64,
    #[serde(rename = "INCLINATION", deserialize_with = "number")]
    inclination: f64,
    #[serde(rename = "RA_OF_ASC_NODE", deserialize_with = "number")]
    ra_of_asc_node: f64,
    #[serde(rename = "ARG_OF_PERICENTER", deserialize_with = "number")]
    arg_of_pericenter: f64,
    #[serde(rename = "MEAN_ANOMALY", deserialize_with = "number")]
    mean_anomaly: f64,
    #[serde(rename = "EPOCH")]
    epoch: String,
    #[serde(rename = "PERIOD", deserialize_with = "number")]
    period: f64,
    #[serde(rename = "TLE_LINE1", default)]
    tle_line1: Option<String>,
    #[serde(rename = "TLE_LINE2", default)]
    tle_line2: Option<String>,
}

impl From<GpEntry> for CatalogRecord {
    fn from(entry: GpEntry) -> Self {
        CatalogRecord {
            name: entry.object_name.unwrap_or_default(),
            catalog_id: entry.norad_cat_id,
            bstar: entry.bstar,
            mean_motion_dot: entry.mean_motion_dot,
            mean_motion_ddot: entry.mean_motion_ddot,
            mean_motion: entry.mean_motion,
            eccentricity: entry.eccentricity,
            inclination: entry.inclination,
            ra_of_asc_node: entry.ra_of_asc_node,
            arg_of_pericenter: entry.arg_of_pericenter,
            mean_anomaly: entry.mean_anomaly,
            epoch: entry.epoch,
            period_minutes: entry.period,
            tle_line1: entry.tle_line1,
            tle_line2: entry.tle_line2,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdOrString {
    Id(u32),
    Text(String),
}

fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid number {:?}", text))),
    }
}

fn catalog_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    match IdOrString::deserialize(deserializer)? {
        IdOrString::Id(id) => Ok(id),
        IdOrString::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid catalog id {:?}", text))),
    }
}
