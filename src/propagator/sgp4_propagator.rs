use sgp4::{Constants, MinutesSinceEpoch, Orbit};

use crate::elements::MeanElementSet;
use crate::propagator::context::{OpsMode, PropagatorContext};
use crate::propagator::error::PropagationError;
use crate::propagator::{Propagator, StateVector, TargetInstant};

const SECONDS_PER_MINUTE: f64 = 60.0;
const METERS_PER_KM: f64 = 1000.0;

/// SGP4/SDP4 through the `sgp4` crate. Output frame is TEME.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator {
    context: PropagatorContext,
}

impl Sgp4Propagator {
    pub fn new(context: PropagatorContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &PropagatorContext {
        &self.context
    }

    fn constants(&self, elements: &MeanElementSet) -> Result<Constants, PropagationError> {
        let orbit = Orbit::from_kozai_elements(
            &self.context.geopotential.model(),
            elements.inclination,
            elements.raan,
            elements.eccentricity,
            elements.arg_of_pericenter,
            elements.mean_anomaly,
            elements.mean_motion * SECONDS_PER_MINUTE,
        )
        .map_err(|e| PropagationError::Elements(e.to_string()))?;

        let epoch = elements.epoch.naive_utc();
        let (years_since_j2000, epoch_to_sidereal_time): (f64, fn(f64) -> f64) =
            match self.context.mode {
                OpsMode::Improved => (
                    sgp4::julian_years_since_j2000(&epoch),
                    sgp4::iau_epoch_to_sidereal_time,
                ),
                OpsMode::Afspc => (
                    sgp4::julian_years_since_j2000_afspc_compatibility_mode(&epoch),
                    sgp4::afspc_epoch_to_sidereal_time,
                ),
            };

        Constants::new(
            self.context.geopotential.model(),
            epoch_to_sidereal_time,
            years_since_j2000,
            elements.bstar,
            orbit,
        )
        .map_err(|e| PropagationError::Elements(e.to_string()))
    }
}

impl Propagator for Sgp4Propagator {
    fn propagate(
        &self,
        elements: &MeanElementSet,
        at: TargetInstant,
    ) -> Result<StateVector, PropagationError> {
        let constants = self.constants(elements)?;
        let minutes = MinutesSinceEpoch(at.seconds_since_epoch / SECONDS_PER_MINUTE);

        let prediction = match self.context.mode {
            OpsMode::Improved => constants.propagate(minutes),
            OpsMode::Afspc => constants.propagate_afspc_compatibility_mode(minutes),
        }
        .map_err(|e| PropagationError::Propagation {
            seconds_since_epoch: at.seconds_since_epoch,
            message: e.to_string(),
        })?;

        Ok(StateVector {
            position: prediction.position.map(|v| v * METERS_PER_KM),
            velocity: prediction.velocity.map(|v| v * METERS_PER_KM),
        })
    }
}
