use std::fs;
use std::path::Path;

use crate::trace::error::TraceError;
use crate::trace::format::{expected_len, TraceHeader};
use crate::trace::sample::Sample;

#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub catalog_id: u32,
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub header: TraceHeader,
    pub records: Vec<TraceRecord>,
}

impl Trace {
    /// Parse a complete trace. Truncated data and trailing bytes are errors.
    pub fn parse(bytes: &[u8]) -> Result<Self, TraceError> {
        let mut cursor = Cursor { bytes, offset: 0 };

        let record_count = cursor.read_count("record count")?;
        let samples_per_period = cursor.read_count("samples per period")?;
        let header = TraceHeader {
            record_count,
            samples_per_period,
        };

        let expected = expected_len(record_count, samples_per_period).ok_or_else(|| {
            TraceError::Malformed(format!(
                "header declares {} records of {} samples, more than any file can hold",
                record_count,
                header.samples_per_record()
            ))
        })?;
        if bytes.len() as u64 != expected {
            return Err(TraceError::Malformed(format!(
                "header declares {} records of {} samples ({} bytes), file has {} bytes",
                record_count,
                header.samples_per_record(),
                expected,
                bytes.len()
            )));
        }

        let mut records = Vec::with_capacity(record_count as usize);
        for _ in 0..record_count {
            let catalog_id = cursor.read_count("catalog id")?;
            let samples = (0..header.samples_per_record())
                .map(|_| cursor.read_sample())
                .collect::<Result<Vec<_>, _>>()?;
            records.push(TraceRecord {
                catalog_id,
                samples,
            });
        }

        Ok(Trace { header, records })
    }
}

pub fn read_trace(path: &Path) -> Result<Trace, TraceError> {
    let bytes = fs::read(path)?;
    Trace::parse(&bytes)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl Cursor<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], TraceError> {
        let end = self.offset + N;
        let chunk = self
            .bytes
            .get(self.offset..end)
            .ok_or_else(|| TraceError::Malformed(format!("unexpected end of data at byte {}", self.offset)))?;
        self.offset = end;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        Ok(out)
    }

    fn read_count(&mut self, what: &str) -> Result<u32, TraceError> {
        let value = i32::from_le_bytes(self.take::<4>()?);
        u32::try_from(value).map_err(|_| TraceError::Malformed(format!("negative {}: {}", what, value)))
    }

    fn read_sample(&mut self) -> Result<Sample, TraceError> {
        let mut values = [0.0; 7];
        for value in &mut values {
            *value = f64::from_le_bytes(self.take::<8>()?);
        }
        Ok(Sample::from_values(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::writer::TraceWriter;

    fn sample_trace() -> Vec<u8> {
        let header = TraceHeader {
            record_count: 2,
            samples_per_period: 2,
        };
        let mut writer = TraceWriter::new(Vec::new(), header).unwrap();
        for id in [25544, 25338] {
            let samples: Vec<_> = (0..3u32)
                .map(|k| Sample {
                    seconds_since_epoch: f64::from(k) * 100.0,
                    position: [f64::from(id), 0.5, -0.25],
                    velocity: [7500.0, -1.0, f64::from(k)],
                })
                .collect();
            writer.write_record(id, &samples).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn reads_back_written_trace() {
        let trace = Trace::parse(&sample_trace()).unwrap();
        assert_eq!(trace.header.record_count, 2);
        assert_eq!(trace.header.samples_per_period, 2);
        assert_eq!(trace.records[0].catalog_id, 25544);
        assert_eq!(trace.records[1].catalog_id, 25338);
        assert_eq!(trace.records[1].samples.len(), 3);
        assert_eq!(trace.records[1].samples[2].seconds_since_epoch, 200.0);
        assert_eq!(trace.records[1].samples[2].position, [25338.0, 0.5, -0.25]);
        assert_eq!(trace.records[1].samples[2].velocity, [7500.0, -1.0, 2.0]);
    }

    #[test]
    fn rejects_truncated_and_padded_files() {
        let bytes = sample_trace();
        assert!(matches!(
            Trace::parse(&bytes[..bytes.len() - 1]),
            Err(TraceError::Malformed(_))
        ));
        assert!(matches!(Trace::parse(&bytes[..6]), Err(TraceError::Malformed(_))));

        let mut padded = bytes.clone();
        padded.push(0);
        assert!(matches!(Trace::parse(&padded), Err(TraceError::Malformed(_))));
    }

    #[test]
    fn rejects_negative_header() {
        let mut bytes = (-1i32).to_le_bytes().to_vec();
        bytes.extend_from_slice(&11i32.to_le_bytes());
        assert!(matches!(Trace::parse(&bytes), Err(TraceError::Malformed(_))));
    }

    #[test]
    fn rejects_header_too_large_for_any_file() {
        let mut bytes = i32::MAX.to_le_bytes().to_vec();
        bytes.extend_from_slice(&i32::MAX.to_le_bytes());
        assert!(matches!(Trace::parse(&bytes), Err(TraceError::Malformed(_))));
    }
}
