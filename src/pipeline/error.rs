use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::elements::ElementsError;
use crate::trace::{SamplerError, TraceError};

/// Why a single record could not be turned into samples.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Elements(#[from] ElementsError),
    #[error(transparent)]
    Sampling(#[from] SamplerError),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("record {catalog_id}: {source}")]
    Record {
        catalog_id: u32,
        #[source]
        source: RecordError,
    },
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),
}
