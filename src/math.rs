use ndarray::ArrayView1;
use num_traits::{Float, FromPrimitive};

use crate::{Error, Result};

/// Compute the arithmetic mean of `values`
///
/// # Errors
/// Returns [`Error::EmptySequence`] when `values` is empty.
///
/// # Examples
///
/// ```
/// use scalar_analysis::math::mean;
///
/// let readings: Vec<f64> = vec![19.0, 20.0, 21.0];
/// assert_eq!(mean(&readings).unwrap(), 20.0);
/// ```
pub fn mean<E: Float + FromPrimitive>(values: &[E]) -> Result<E> {
    ArrayView1::from(values)
        .mean()
        .ok_or(Error::EmptySequence("mean"))
}

/// Compute the population standard deviation of `values`
///
/// The sum of squared deviations is divided by `N`, not `N - 1`: the values are treated as the
/// complete set of realised samples rather than a draw from a larger population.
///
/// # Errors
/// Returns [`Error::EmptySequence`] when `values` is empty.
///
/// # Examples
///
/// ```
/// use scalar_analysis::math::population_standard_deviation;
///
/// let readings: Vec<f64> = vec![1.0, 3.0];
/// assert_eq!(population_standard_deviation(&readings).unwrap(), 1.0);
/// ```
pub fn population_standard_deviation<E: Float + FromPrimitive>(values: &[E]) -> Result<E> {
    if values.is_empty() {
        return Err(Error::EmptySequence("standard deviation"));
    }
    Ok(ArrayView1::from(values).std(E::zero()))
}

/// Unbiased sample variance of `values`, dividing by `N - 1`
///
/// # Errors
/// Returns [`Error::TooFewSamples`] when fewer than two values are supplied.
pub fn sample_variance<E: Float + FromPrimitive>(values: &[E]) -> Result<E> {
    if values.len() < 2 {
        return Err(Error::TooFewSamples(values.len()));
    }
    Ok(ArrayView1::from(values).var(E::one()))
}
