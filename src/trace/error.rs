use thiserror::Error;

use crate::propagator::PropagationError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplerError {
    #[error("samples per period must be at least 1")]
    ZeroSamples,
    #[error("period must be positive, got {0} s")]
    InvalidPeriod(f64),
    #[error("sample {step}: {source}")]
    Propagation {
        step: u32,
        #[source]
        source: PropagationError,
    },
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{what} {value} does not fit in a 32-bit field")]
    OutOfRange { what: &'static str, value: u64 },
    #[error("record {catalog_id} has {actual} samples, expected {expected}")]
    SampleCount {
        catalog_id: u32,
        expected: usize,
        actual: usize,
    },
    #[error("header declares {declared} records, {written} written")]
    RecordCount { declared: u32, written: u32 },
    #[error("invalid destination path {0}")]
    InvalidDestination(String),
    #[error("malformed trace: {0}")]
    Malformed(String),
    #[error("traces differ: {0}")]
    Mismatch(String),
}
