mod epoch;
mod error;
mod source;
mod types;
mod units;

pub use error::ElementsError;
pub use source::ElementSource;
pub use types::MeanElementSet;
pub use units::normalize;
