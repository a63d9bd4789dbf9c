mod error;
mod runner;

pub use error::{RecordError, RunError};
pub use runner::{generate, process_record, RunSummary};
