use num_traits::{Float, FromPrimitive};

use crate::estimate::Estimate;
use crate::math::mean;
use crate::Result;

/// The model predicts the mean of the intercalibration readings everywhere in the room
///
/// The intercalibration mean is assumed to be free of bias.
///
/// # Errors
/// Returns [`crate::Error::EmptySequence`] when there are no readings.
pub fn model_value<E: Float + FromPrimitive>(intercalibration_readings: &[E]) -> Result<E> {
    mean(intercalibration_readings)
}

/// The model error is a guess at the half width of the plausible temperature range
pub fn model_error_variance<E: Float>(assumed_range_half_width: E) -> E {
    assumed_range_half_width.powi(2)
}

/// # Errors
/// Returns [`crate::Error::EmptySequence`] when there are no readings.
pub fn model<E: Float + FromPrimitive>(
    intercalibration_readings: &[E],
    assumed_range_half_width: E,
) -> Result<Estimate<E>> {
    Ok(Estimate::new(
        model_value(intercalibration_readings)?,
        model_error_variance(assumed_range_half_width),
    ))
}
