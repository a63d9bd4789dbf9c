mod error;
mod loader;
mod record;
mod schema;

pub use error::CatalogError;
pub use loader::{decode_catalog, load_catalog};
pub use record::CatalogRecord;

#[cfg(test)]
pub(crate) use record::fixtures;
