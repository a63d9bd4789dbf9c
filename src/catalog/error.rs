use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("catalog contains no records")]
    Empty,
    #[error("invalid record {catalog_id}: {reason}")]
    InvalidRecord { catalog_id: u32, reason: String },
    #[error("duplicate catalog id {0}")]
    DuplicateId(u32),
}
