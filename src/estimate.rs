use ndarray_rand::rand_distr::{Distribution, Normal, NormalError, StandardNormal};
use num_traits::Float;

/// A scalar estimate of some quantity and the variance of its error
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate<E> {
    pub value: E,
    pub error_variance: E,
}

impl<E: Float> Estimate<E> {
    pub const fn new(value: E, error_variance: E) -> Self {
        Self {
            value,
            error_variance,
        }
    }

    /// The standard deviation of the error, in the units of `value`
    pub fn standard_error(&self) -> E {
        self.error_variance.sqrt()
    }

    /// A Gaussian error model centred on the estimate
    pub(crate) fn to_normal(self) -> Result<Normal<E>, NormalError>
    where
        StandardNormal: Distribution<E>,
    {
        Normal::new(self.value, self.standard_error())
    }
}
