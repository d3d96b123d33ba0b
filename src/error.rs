use thiserror::Error;

use crate::calibration::Instrument;

#[derive(Debug, Error)]
pub enum Error {
    /// Positional calibration was asked to pair sequences of different length.
    #[error("cannot pair {observations} observations with {biases} instrument biases")]
    InputLengthMismatch { observations: usize, biases: usize },

    /// Both error variances are zero, so the analysis weight is undefined.
    #[error("model and observation error variances are both zero")]
    DegenerateVariance,

    /// A mean or standard deviation was requested over no values.
    #[error("{0} requires at least one value")]
    EmptySequence(&'static str),

    /// An error variance was negative, infinite or NaN.
    #[error("{name} error variance must be finite and non-negative, got {value}")]
    InvalidVariance { name: &'static str, value: f64 },

    /// A room reading names an instrument that was never intercalibrated.
    #[error("no intercalibration bias for instrument {0}")]
    UnknownInstrument(Instrument),

    #[error("instrument {0} appears more than once in the {1} readings")]
    DuplicateInstrument(Instrument, &'static str),

    #[error("at least two samples are needed to estimate a variance, got {0}")]
    TooFewSamples(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid readings file: {0}")]
    Csv(#[from] csv::Error),
}
