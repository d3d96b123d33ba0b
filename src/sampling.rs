use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::{Distribution, StandardNormal};
use num_traits::{Float, FromPrimitive};
use tracing::debug;

use crate::analysis::analysed_value;
use crate::estimate::Estimate;
use crate::math::{mean, sample_variance};
use crate::{Error, Result};

fn invalid<E: Float>(name: &'static str, estimate: &Estimate<E>) -> Error {
    Error::InvalidVariance {
        name,
        value: estimate.error_variance.to_f64().unwrap_or(f64::NAN),
    }
}

/// Estimate the distribution of the analysed value by sampling
///
/// Draws `num_samples` independent pairs from Gaussian error models of `model` and
/// `observation`, combines each pair with `weight` and returns the sample mean with the unbiased
/// sample variance. For large `num_samples` this converges on the closed-form analysis.
///
/// # Errors
/// - [`Error::TooFewSamples`] when `num_samples < 2`
/// - [`Error::InvalidVariance`] when either error variance is negative or not finite
pub fn sample_analysis<E, R>(
    model: &Estimate<E>,
    observation: &Estimate<E>,
    weight: E,
    num_samples: usize,
    rng: &mut R,
) -> Result<Estimate<E>>
where
    E: Float + FromPrimitive + std::fmt::Debug,
    R: Rng + ?Sized,
    StandardNormal: Distribution<E>,
{
    if num_samples < 2 {
        return Err(Error::TooFewSamples(num_samples));
    }
    let model_distribution = model.to_normal().map_err(|_| invalid("model", model))?;
    let observation_distribution = observation
        .to_normal()
        .map_err(|_| invalid("observation", observation))?;

    let samples = (0..num_samples)
        .map(|_| {
            analysed_value(
                model_distribution.sample(rng),
                observation_distribution.sample(rng),
                weight,
            )
        })
        .collect::<Vec<_>>();

    let estimate = Estimate::new(mean(&samples)?, sample_variance(&samples)?);
    debug!(
        num_samples,
        value = ?estimate.value,
        error_variance = ?estimate.error_variance,
        "sampled analysis"
    );
    Ok(estimate)
}
