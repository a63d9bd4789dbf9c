use crate::elements::MeanElementSet;
use crate::propagator::{Propagator, TargetInstant};
use crate::trace::error::SamplerError;
use crate::trace::sample::Sample;

/// Sample one orbital period at `samples_per_period + 1` evenly spaced
/// offsets, `t_k = k * period / N` for `k = 0..=N`.
///
/// The first propagator failure aborts the whole record.
pub fn sample_period<P: Propagator + ?Sized>(
    elements: &MeanElementSet,
    period_minutes: f64,
    samples_per_period: u32,
    propagator: &P,
) -> Result<Vec<Sample>, SamplerError> {
    if samples_per_period == 0 {
        return Err(SamplerError::ZeroSamples);
    }
    let period_seconds = period_minutes * 60.0;
    if !(period_seconds.is_finite() && period_seconds > 0.0) {
        return Err(SamplerError::InvalidPeriod(period_seconds));
    }

    let steps = f64::from(samples_per_period);
    (0..=samples_per_period)
        .map(|k| -> Result<Sample, SamplerError> {
            let offset = f64::from(k) * period_seconds / steps;
            let state = propagator
                .propagate(elements, TargetInstant::new(elements.epoch, offset))
                .map_err(|source| SamplerError::Propagation { step: k, source })?;
            Ok(Sample {
                seconds_since_epoch: offset,
                position: state.position,
                velocity: state.velocity,
            })
        })
        .collect()
}
