/// Header bytes: record count and samples per period.
pub const HEADER_LEN: u64 = 8;
pub const RECORD_ID_LEN: u64 = 4;
/// Seven f64 per sample.
pub const SAMPLE_LEN: u64 = 7 * 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceHeader {
    pub record_count: u32,
    /// N. Each record holds N + 1 samples.
    pub samples_per_period: u32,
}

impl TraceHeader {
    pub fn samples_per_record(&self) -> usize {
        self.samples_per_period as usize + 1
    }

    pub fn record_len(&self) -> u64 {
        RECORD_ID_LEN + (u64::from(self.samples_per_period) + 1) * SAMPLE_LEN
    }
}

/// Exact size of a trace with `record_count` records of N + 1 samples, or
/// `None` if that size does not fit in a u64.
pub fn expected_len(record_count: u32, samples_per_period: u32) -> Option<u64> {
    let header = TraceHeader {
        record_count,
        samples_per_period,
    };
    u64::from(record_count)
        .checked_mul(header.record_len())?
        .checked_add(HEADER_LEN)
}
