use num_traits::{Float, FromPrimitive};
use tracing::debug;

use crate::estimate::Estimate;
use crate::math::{mean, population_standard_deviation};
use crate::Result;

/// The observed value is the mean of the calibrated observations
///
/// # Errors
/// Returns [`crate::Error::EmptySequence`] when there are no observations.
pub fn observed_value<E: Float + FromPrimitive>(calibrated: &[E]) -> Result<E> {
    mean(calibrated)
}

/// Error variance of the observed value
///
/// The standard error is taken as the assumed error of a single instrument plus the spread of the
/// calibrated observations across the room, which stands in for the representation error of
/// observing an average through point measurements.
///
/// # Errors
/// Returns [`crate::Error::EmptySequence`] when there are no observations.
pub fn observation_error_variance<E: Float + FromPrimitive>(
    calibrated: &[E],
    instrument_error: E,
) -> Result<E> {
    let spread = population_standard_deviation(calibrated)?;
    Ok((instrument_error + spread).powi(2))
}

/// Summarise the calibrated observations as a single estimate
///
/// # Errors
/// Returns [`crate::Error::EmptySequence`] when there are no observations.
pub fn observe<E: Float + FromPrimitive + std::fmt::Debug>(
    calibrated: &[E],
    instrument_error: E,
) -> Result<Estimate<E>> {
    let value = observed_value(calibrated)?;
    let error_variance = observation_error_variance(calibrated, instrument_error)?;
    debug!(?value, ?error_variance, "observation");
    Ok(Estimate::new(value, error_variance))
}
