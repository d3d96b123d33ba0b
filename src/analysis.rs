use num_traits::Float;
use tracing::{info, warn};

use crate::estimate::Estimate;
use crate::{Error, Result};

/// The minimum-variance combination of a model estimate with an observation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Analysis<E> {
    /// Fraction of the model-observation difference added to the model value
    pub weight: E,
    pub estimate: Estimate<E>,
}

fn validate<E: Float>(name: &'static str, variance: E) -> Result<()> {
    if variance.is_finite() && variance >= E::zero() {
        Ok(())
    } else {
        Err(Error::InvalidVariance {
            name,
            value: variance.to_f64().unwrap_or(f64::NAN),
        })
    }
}

/// Compute the analysis weight `K = e_m^2 / (e_m^2 + e_o^2)`
///
/// `K` lies in `[0, 1]`. It tends to zero as the model is trusted more, and to one as the
/// observation is trusted more.
///
/// # Errors
/// - [`Error::InvalidVariance`] if either variance is negative or not finite
/// - [`Error::DegenerateVariance`] if both variances are zero
pub fn analysis_weight<E: Float>(
    model_error_variance: E,
    observation_error_variance: E,
) -> Result<E> {
    validate("model", model_error_variance)?;
    validate("observation", observation_error_variance)?;

    if model_error_variance == E::zero() {
        if observation_error_variance == E::zero() {
            return Err(Error::DegenerateVariance);
        }
        return Ok(E::zero());
    }
    // Divided through by e_m^2, the sum of two large finite variances cannot overflow
    Ok((E::one() + observation_error_variance / model_error_variance).recip())
}

/// Move the model value a fraction `weight` of the way towards the observed value
///
/// This is `model + weight * (observed - model)` written as a convex combination, which returns
/// the model value exactly for a weight of zero and the observed value exactly for a weight of
/// one.
pub fn analysed_value<E: Float>(model_value: E, observed_value: E, weight: E) -> E {
    weight.mul_add(observed_value, (E::one() - weight) * model_value)
}

/// Error variance of the analysed value, `(1 - K)^2 e_m^2 + K^2 e_o^2`
///
/// The model and observation errors are assumed to be independent.
pub fn analysis_error_variance<E: Float>(
    weight: E,
    model_error_variance: E,
    observation_error_variance: E,
) -> E {
    weight.powi(2).mul_add(
        observation_error_variance,
        (E::one() - weight).powi(2) * model_error_variance,
    )
}

/// Combine `model` and `observation` into the analysis
///
/// # Errors
/// Fails when the analysis weight is undefined, see [`analysis_weight`].
pub fn analyse<E: Float + std::fmt::Debug>(
    model: &Estimate<E>,
    observation: &Estimate<E>,
) -> Result<Analysis<E>> {
    let weight = analysis_weight(model.error_variance, observation.error_variance)?;
    if weight == E::zero() || weight == E::one() {
        warn!(
            ?weight,
            "one source has zero error variance, the other is ignored"
        );
    }

    let estimate = Estimate::new(
        analysed_value(model.value, observation.value, weight),
        analysis_error_variance(weight, model.error_variance, observation.error_variance),
    );
    info!(
        ?weight,
        value = ?estimate.value,
        error_variance = ?estimate.error_variance,
        "analysis"
    );

    Ok(Analysis { weight, estimate })
}
