mod context;
mod error;
mod sgp4_propagator;

pub use context::{Geopotential, OpsMode, PropagatorContext};
pub use error::PropagationError;
pub use sgp4_propagator::Sgp4Propagator;

use chrono::{DateTime, Utc};

use crate::elements::MeanElementSet;

/// An instant expressed as an exact offset from an element set's epoch.
///
/// The offset is kept as the `f64` seconds it was computed from, so the
/// propagator sees exactly the value written to the trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInstant {
    pub epoch: DateTime<Utc>,
    pub seconds_since_epoch: f64,
}

impl TargetInstant {
    pub fn new(epoch: DateTime<Utc>, seconds_since_epoch: f64) -> Self {
        Self {
            epoch,
            seconds_since_epoch,
        }
    }
}

/// Position in m and velocity in m/s, in the propagator's inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

pub trait Propagator: Sync {
    fn propagate(
        &self,
        elements: &MeanElementSet,
        at: TargetInstant,
    ) -> Result<StateVector, PropagationError>;
}
