use std::io::Write;

use crate::trace::error::TraceError;
use crate::trace::format::TraceHeader;
use crate::trace::sample::Sample;

/// Streams a trace: header first, then records in the order they arrive.
pub struct TraceWriter<W: Write> {
    inner: W,
    header: TraceHeader,
    records_written: u32,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(mut inner: W, header: TraceHeader) -> Result<Self, TraceError> {
        let record_count = to_i32("record count", header.record_count)?;
        let samples_per_period = to_i32("samples per period", header.samples_per_period)?;
        inner.write_all(&record_count.to_le_bytes())?;
        inner.write_all(&samples_per_period.to_le_bytes())?;
        Ok(Self {
            inner,
            header,
            records_written: 0,
        })
    }

    pub fn write_record(&mut self, catalog_id: u32, samples: &[Sample]) -> Result<(), TraceError> {
        let expected = self.header.samples_per_record();
        if samples.len() != expected {
            return Err(TraceError::SampleCount {
                catalog_id,
                expected,
                actual: samples.len(),
            });
        }
        if self.records_written >= self.header.record_count {
            return Err(TraceError::RecordCount {
                declared: self.header.record_count,
                written: self.records_written + 1,
            });
        }

        self.inner
            .write_all(&to_i32("catalog id", catalog_id)?.to_le_bytes())?;
        for sample in samples {
            for value in sample.values() {
                self.inner.write_all(&value.to_le_bytes())?;
            }
        }
        self.records_written += 1;
        Ok(())
    }

    /// Check that every declared record was written and flush.
    pub fn finish(mut self) -> Result<W, TraceError> {
        if self.records_written != self.header.record_count {
            return Err(TraceError::RecordCount {
                declared: self.header.record_count,
                written: self.records_written,
            });
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

fn to_i32(what: &'static str, value: u32) -> Result<i32, TraceError> {
    i32::try_from(value).map_err(|_| TraceError::OutOfRange {
        what,
        value: u64::from(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::format::expected_len;

    fn samples(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|k| Sample {
                seconds_since_epoch: k as f64,
                position: [1.0, 2.0, 3.0],
                velocity: [4.0, 5.0, 6.0],
            })
            .collect()
    }

    #[test]
    fn writes_little_endian_layout() {
        let header = TraceHeader {
            record_count: 1,
            samples_per_period: 1,
        };
        let mut writer = TraceWriter::new(Vec::new(), header).unwrap();
        writer.write_record(25544, &samples(2)).unwrap();
        let bytes = writer.finish().unwrap();

        assert_eq!(bytes.len() as u64, expected_len(1, 1).unwrap());
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[1, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &25544i32.to_le_bytes());
        assert_eq!(&bytes[12..20], &0.0f64.to_le_bytes());
        assert_eq!(&bytes[20..28], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[60..68], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 8..], &6.0f64.to_le_bytes());
    }

    #[test]
    fn size_follows_header() {
        let header = TraceHeader {
            record_count: 3,
            samples_per_period: 11,
        };
        let mut writer = TraceWriter::new(Vec::new(), header).unwrap();
        for id in [1, 2, 3] {
            writer.write_record(id, &samples(12)).unwrap();
        }
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes.len() as u64, 8 + 3 * (4 + 12 * 56));
    }

    #[test]
    fn rejects_wrong_sample_count() {
        let header = TraceHeader {
            record_count: 1,
            samples_per_period: 11,
        };
        let mut writer = TraceWriter::new(Vec::new(), header).unwrap();
        let err = writer.write_record(7, &samples(11)).unwrap_err();
        assert!(matches!(
            err,
            TraceError::SampleCount {
                catalog_id: 7,
                expected: 12,
                actual: 11
            }
        ));
        writer.write_record(7, &samples(12)).unwrap();
        assert_eq!(writer.finish().unwrap().len() as u64, expected_len(1, 11).unwrap());
    }

    #[test]
    fn record_count_is_enforced() {
        let header = TraceHeader {
            record_count: 1,
            samples_per_period: 1,
        };
        let writer = TraceWriter::new(Vec::new(), header).unwrap();
        assert!(matches!(
            writer.finish().unwrap_err(),
            TraceError::RecordCount {
                declared: 1,
                written: 0
            }
        ));

        let mut writer = TraceWriter::new(Vec::new(), header).unwrap();
        writer.write_record(1, &samples(2)).unwrap();
        assert!(writer.write_record(2, &samples(2)).is_err());
    }

    #[test]
    fn ids_beyond_i32_are_rejected() {
        let header = TraceHeader {
            record_count: 1,
            samples_per_period: 1,
        };
        let mut writer = TraceWriter::new(Vec::new(), header).unwrap();
        let err = writer.write_record(u32::MAX, &samples(2)).unwrap_err();
        assert!(matches!(err, TraceError::OutOfRange { what: "catalog id", .. }));
    }
}
