//! Sampling and the binary trace format.
//!
//! ```text
//! header:   i32 record_count, i32 samples_per_period (N)
//! record:   i32 catalog_id, then N + 1 times:
//!           f64 seconds_since_epoch, f64 x3 position (m), f64 x3 velocity (m/s)
//! ```
//!
//! Everything is little-endian.

mod diff;
mod error;
mod file;
mod format;
mod reader;
mod sample;
mod sampler;
mod writer;

pub use diff::{compare, Tolerance};
pub use error::{SamplerError, TraceError};
pub use file::TraceFile;
pub use format::{expected_len, TraceHeader};
pub use reader::{read_trace, Trace};
pub use sample::Sample;
pub use sampler::sample_period;

#[cfg(test)]
pub(crate) use sampler::fakes;
