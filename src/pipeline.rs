use std::collections::HashMap;
use std::fmt;

use num_traits::{Float, FromPrimitive};
use tracing::debug;

use crate::analysis::{analyse, Analysis};
use crate::calibration::{bias_by_instrument, calibrate_by_instrument, Instrument, Reading};
use crate::config::Config;
use crate::estimate::Estimate;
use crate::model::model;
use crate::observation::observe;
use crate::Result;

/// Every intermediate quantity of a single analysis
#[derive(Clone, Debug, PartialEq)]
pub struct Assimilation<E> {
    pub bias: HashMap<Instrument, E>,
    /// Room readings with the bias of their instrument removed, in the order they were given
    pub calibrated: Vec<E>,
    pub model: Estimate<E>,
    pub observation: Estimate<E>,
    pub analysis: Analysis<E>,
}

impl<E: Float> Assimilation<E> {
    pub fn report(&self) -> Report<E> {
        Report {
            modelled: self.model.value,
            observed: self.observation.value,
            analysed: self.analysis.estimate.value,
            analysis_error: self.analysis.estimate.standard_error(),
        }
    }
}

/// The reported temperatures, in degrees Celsius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Report<E> {
    pub modelled: E,
    pub observed: E,
    pub analysed: E,
    pub analysis_error: E,
}

impl<E: fmt::Display> fmt::Display for Report<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The modeled average room temperature is {:.3} C.",
            self.modelled
        )?;
        writeln!(
            f,
            "The observed average room temperature is {:.3} C.",
            self.observed
        )?;
        writeln!(
            f,
            "The analysed average room temperature is {:.3} C.",
            self.analysed
        )?;
        write!(f, "The analysis error is {:.3} C.", self.analysis_error)
    }
}

/// Run the full analysis over `config`
///
/// The model is the mean of the intercalibration, the observation the mean of the room readings
/// after each has been corrected for the bias of the instrument which took it.
///
/// # Errors
/// - [`crate::Error::EmptySequence`] when either set of readings is empty
/// - [`crate::Error::DuplicateInstrument`] or [`crate::Error::UnknownInstrument`] when the room
///   readings cannot be matched to the intercalibration
/// - [`crate::Error::InvalidVariance`] or [`crate::Error::DegenerateVariance`] when the error
///   guesses leave the analysis weight undefined
pub fn assimilate<E: Float + FromPrimitive + fmt::Debug>(
    config: &Config<E>,
) -> Result<Assimilation<E>> {
    let bias = bias_by_instrument(&config.intercalibration)?;
    let calibrated = calibrate_by_instrument(&config.room, &bias)?;
    debug!(?calibrated, "calibrated room readings");

    let model = model(
        &Reading::values(&config.intercalibration),
        config.model_error,
    )?;
    let observation = observe(&calibrated, config.instrument_error)?;
    let analysis = analyse(&model, &observation)?;

    Ok(Assimilation {
        bias,
        calibrated,
        model,
        observation,
        analysis,
    })
}
