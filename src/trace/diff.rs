use crate::trace::error::TraceError;
use crate::trace::reader::{Trace, TraceRecord};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub position_m: f64,
    pub velocity_m_s: f64,
    pub time_s: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            position_m: 1e-3,
            velocity_m_s: 1e-6,
            time_s: 1e-9,
        }
    }
}

/// Worst-case differences between the same record in two traces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordDiff {
    pub catalog_id: u32,
    pub max_position_error: f64,
    pub max_velocity_error: f64,
    pub max_time_error: f64,
}

impl RecordDiff {
    pub fn within(&self, tolerance: &Tolerance) -> bool {
        self.max_position_error <= tolerance.position_m
            && self.max_velocity_error <= tolerance.velocity_m_s
            && self.max_time_error <= tolerance.time_s
    }
}

/// Compare two traces record by record.
///
/// Traces with different headers or record ids cannot be compared and are
/// reported as [`TraceError::Mismatch`]. NaN anywhere in a sample makes that
/// record's errors NaN, which never counts as within tolerance.
pub fn compare(reference: &Trace, candidate: &Trace) -> Result<Vec<RecordDiff>, TraceError> {
    if reference.header != candidate.header {
        return Err(TraceError::Mismatch(format!(
            "headers differ: {:?} vs {:?}",
            reference.header, candidate.header
        )));
    }

    reference
        .records
        .iter()
        .zip(&candidate.records)
        .enumerate()
        .map(|(index, (a, b))| {
            if a.catalog_id != b.catalog_id {
                return Err(TraceError::Mismatch(format!(
                    "record {}: catalog id {} vs {}",
                    index, a.catalog_id, b.catalog_id
                )));
            }
            Ok(diff_record(a, b))
        })
        .collect()
}

fn diff_record(a: &TraceRecord, b: &TraceRecord) -> RecordDiff {
    let mut diff = RecordDiff {
        catalog_id: a.catalog_id,
        max_position_error: 0.0,
        max_velocity_error: 0.0,
        max_time_error: 0.0,
    };
    for (x, y) in a.samples.iter().zip(&b.samples) {
        diff.max_time_error = nan_max(
            diff.max_time_error,
            (x.seconds_since_epoch - y.seconds_since_epoch).abs(),
        );
        diff.max_position_error = nan_max(diff.max_position_error, distance(x.position, y.position));
        diff.max_velocity_error = nan_max(diff.max_velocity_error, distance(x.velocity, y.velocity));
    }
    diff
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
}

fn nan_max(current: f64, value: f64) -> f64 {
    if current.is_nan() || value.is_nan() {
        f64::NAN
    } else {
        current.max(value)
    }
}
