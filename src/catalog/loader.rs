use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::catalog::error::CatalogError;
use crate::catalog::record::CatalogRecord;
use crate::catalog::schema::GpEntry;

/// Load a catalog file. Records keep their file order.
pub fn load_catalog(path: &Path, period_tolerance: f64) -> Result<Vec<CatalogRecord>, CatalogError> {
    let file = File::open(path)?;
    decode_catalog(BufReader::new(file), period_tolerance)
}

/// Decode a JSON array of GP records.
///
/// An empty array is an error: a trace with zero records is never a valid run.
/// Records whose period disagrees with `1440 / mean_motion` by more than
/// `period_tolerance` (relative) are kept, but logged.
pub fn decode_catalog<R: Read>(
    reader: R,
    period_tolerance: f64,
) -> Result<Vec<CatalogRecord>, CatalogError> {
    let entries: Vec<GpEntry> = serde_json::from_reader(reader)?;
    if entries.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut records = Vec::with_capacity(entries.len());

    for entry in entries {
        let record = CatalogRecord::from(entry);
        record
            .check()
            .map_err(|reason| CatalogError::InvalidRecord {
                catalog_id: record.catalog_id,
                reason,
            })?;

        if !seen.insert(record.catalog_id) {
            return Err(CatalogError::DuplicateId(record.catalog_id));
        }

        let mismatch = record.period_mismatch();
        if mismatch > period_tolerance {
            log::warn!(
                "Record {}: period {} min differs from 1440/n by {:.2e} (relative)",
                record.catalog_id,
                record.period_minutes,
                mismatch
            );
        }

        records.push(record);
    }

    log::debug!("Decoded {} catalog records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SPACE_TRACK_JSON: &str = r#"[
        {
            "CCSDS_OMM_VERS": "2.0",
            "OBJECT_NAME": "ISS (ZARYA)",
            "NORAD_CAT_ID": "25544",
            "EPOCH": "2019-03-24T05:11:47.000000",
            "MEAN_MOTION": "15.52425742",
            "ECCENTRICITY": "0.00024590",
            "INCLINATION": "51.6443",
            "RA_OF_ASC_NODE": "63.6267",
            "ARG_OF_PERICENTER": "113.3867",
            "MEAN_ANOMALY": "73.3736",
            "BSTAR": "0.44330000000000",
            "MEAN_MOTION_DOT": "0.00002291",
            "MEAN_MOTION_DDOT": "0.0000000000000",
            "PERIOD": "92.768",
            "TLE_LINE0": "0 ISS (ZARYA)",
            "TLE_LINE1": "1 25544U 98067A   19083.21651620  .00002291  00000-0  44330-4 0  9996",
            "TLE_LINE2": "2 25544  51.6443  63.6267 0002459 113.3867  73.3736 15.52425742162054"
        },
        {
            "OBJECT_NAME": "NOAA 15",
            "NORAD_CAT_ID": 25338,
            "EPOCH": "2021-02-12T06:33:01.123456",
            "MEAN_MOTION": 14.25999028,
            "ECCENTRICITY": 0.0010174,
            "INCLINATION": 98.6888,
            "RA_OF_ASC_NODE": 60.5105,
            "ARG_OF_PERICENTER": 94.0151,
            "MEAN_ANOMALY": 266.2180,
            "BSTAR": 0.00010066,
            "MEAN_MOTION_DOT": 0.00000058,
            "MEAN_MOTION_DDOT": 0,
            "PERIOD": 100.982
        }
    ]"#;

    #[test]
    fn decodes_string_and_numeric_values_in_file_order() {
        let records = decode_catalog(SPACE_TRACK_JSON.as_bytes(), 5e-3).unwrap();
        assert_eq!(records.len(), 2);

        let iss = &records[0];
        assert_eq!(iss.catalog_id, 25544);
        assert_eq!(iss.name, "ISS (ZARYA)");
        assert_eq!(iss.mean_motion, 15.52425742);
        assert_eq!(iss.eccentricity, 0.0002459);
        assert_eq!(iss.mean_motion_dot, 0.00002291);
        assert_eq!(iss.period_minutes, 92.768);
        assert_eq!(iss.epoch, "2019-03-24T05:11:47.000000");
        assert!(iss.tle_line1.as_deref().unwrap().starts_with("1 25544U"));

        let noaa = &records[1];
        assert_eq!(noaa.catalog_id, 25338);
        assert_eq!(noaa.mean_motion_ddot, 0.0);
        assert!(noaa.tle_line1.is_none());
        assert!(noaa.tle_line2.is_none());
    }

    #[test]
    fn empty_catalog_is_fatal() {
        let err = decode_catalog("[]".as_bytes(), 5e-3).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = decode_catalog("[{\"OBJECT_NAME\": ".as_bytes(), 5e-3).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));

        let err = decode_catalog("{\"OBJECT_NAME\": \"X\"}".as_bytes(), 5e-3).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn missing_or_non_numeric_field_is_fatal() {
        let missing = SPACE_TRACK_JSON.replace("\"MEAN_MOTION\": 14.25999028,", "");
        let err = decode_catalog(missing.as_bytes(), 5e-3).unwrap_err();
        assert!(err.to_string().contains("MEAN_MOTION"));

        let garbled = SPACE_TRACK_JSON.replace("\"15.52425742\"", "\"fifteen\"");
        let err = decode_catalog(garbled.as_bytes(), 5e-3).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn invalid_record_reports_catalog_id() {
        let json = SPACE_TRACK_JSON.replace("\"0.00024590\"", "\"1.5\"");
        match decode_catalog(json.as_bytes(), 5e-3).unwrap_err() {
            CatalogError::InvalidRecord { catalog_id, reason } => {
                assert_eq!(catalog_id, 25544);
                assert!(reason.contains("eccentricity"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = SPACE_TRACK_JSON.replace("\"NORAD_CAT_ID\": 25338", "\"NORAD_CAT_ID\": 25544");
        let err = decode_catalog(json.as_bytes(), 5e-3).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(25544)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SPACE_TRACK_JSON.as_bytes()).unwrap();

        let records = load_catalog(file.path(), 5e-3).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.catalog_id).collect();
        assert_eq!(ids, vec![25544, 25338]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("absent.json"), 5e-3).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
