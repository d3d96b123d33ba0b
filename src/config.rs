use std::fs;
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::calibration::Reading;
use crate::Result;

/// Inputs to a single analysis
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config<E = f64> {
    /// Assumed standard error of a single calibrated instrument
    pub instrument_error: E,
    /// Assumed half width of the range the true value lies in, taken as the model standard error
    pub model_error: E,
    /// Side-by-side readings of every instrument at one location
    pub intercalibration: Vec<Reading<E>>,
    /// Readings taken across the room, each by an intercalibrated instrument
    pub room: Vec<Reading<E>>,
}

impl<E: DeserializeOwned> Config<E> {
    /// # Errors
    /// Returns an error if `contents` is not a valid configuration.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!(?path, "read configuration");
        Ok(config)
    }
}

impl Config<f64> {
    /// Four thermometers read side by side, then placed around the room
    pub fn reference() -> Self {
        let instruments = ["T1", "T2", "T3", "T4"];
        let pair = |values: [f64; 4]| -> Vec<Reading<f64>> {
            instruments
                .iter()
                .zip(values)
                .map(|(&instrument, value)| Reading::new(instrument, value))
                .collect()
        };

        Self {
            instrument_error: 0.5,
            model_error: 2.5,
            intercalibration: pair([20.2, 20.2, 19.0, 19.5]),
            room: pair([20.6, 20.4, 20.0, 19.5]),
        }
    }
}
