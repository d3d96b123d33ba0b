use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use itertools::Itertools;
use num_traits::{Float, FromPrimitive};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::math::mean;
use crate::{Error, Result};

/// Name of a physical instrument
#[derive(Clone, Hash, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Instrument(pub String);

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Instrument {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// A single reading taken by a named instrument
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Reading<E> {
    pub instrument: Instrument,
    pub value: E,
}

impl<E> Reading<E> {
    pub fn new(instrument: impl Into<Instrument>, value: E) -> Self {
        Self {
            instrument: instrument.into(),
            value,
        }
    }
}

impl<E: Copy> Reading<E> {
    /// Strip the instrument names, keeping the readings in order
    pub fn values(readings: &[Self]) -> Vec<E> {
        readings.iter().map(|reading| reading.value).collect()
    }
}

/// Compute the bias of each instrument from a side-by-side intercalibration
///
/// All instruments measured the same quantity at the same place and time, so the deviation of
/// each reading from their common mean is attributed to the instrument. The returned biases are
/// in the same order as `readings` and sum to zero up to rounding.
///
/// A lone instrument has nothing to be compared against, so its bias is zero.
///
/// # Errors
/// Returns [`Error::EmptySequence`] when `readings` is empty.
pub fn compute_bias<E: Float + FromPrimitive>(readings: &[E]) -> Result<Vec<E>> {
    let reference = mean(readings)?;
    if readings.len() == 1 {
        warn!("intercalibration of a single instrument cannot reveal any bias");
    }
    Ok(readings.iter().map(|&reading| reading - reference).collect())
}

/// Subtract the bias of instrument `i` from raw observation `i`
///
/// The pairing is purely positional. Callers must make sure both sequences list the instruments
/// in the same order; prefer [`calibrate_by_instrument`] when the readings carry names.
///
/// # Errors
/// Returns [`Error::InputLengthMismatch`] when the sequences differ in length.
pub fn calibrate<E: Float>(raw_observations: &[E], bias: &[E]) -> Result<Vec<E>> {
    if raw_observations.len() != bias.len() {
        return Err(Error::InputLengthMismatch {
            observations: raw_observations.len(),
            biases: bias.len(),
        });
    }

    Ok(raw_observations
        .iter()
        .zip(bias)
        .map(|(&observation, &bias)| observation - bias)
        .collect())
}

/// Compute the bias of every instrument in an intercalibration, keyed by instrument
///
/// # Errors
/// - [`Error::EmptySequence`] when `intercalibration` is empty
/// - [`Error::DuplicateInstrument`] when an instrument took more than one reading
pub fn bias_by_instrument<E: Float + FromPrimitive + fmt::Debug>(
    intercalibration: &[Reading<E>],
) -> Result<HashMap<Instrument, E>> {
    ensure_unique(intercalibration, "intercalibration")?;

    let bias = compute_bias(&Reading::values(intercalibration))?;
    let bias = intercalibration
        .iter()
        .map(|reading| reading.instrument.clone())
        .zip(bias)
        .collect::<HashMap<_, _>>();

    debug!(?bias, "computed instrument biases");
    Ok(bias)
}

/// Subtract from each room reading the bias of the instrument which took it
///
/// Unlike [`calibrate`] the result does not depend on the order in which readings are listed,
/// and every room reading must come from an intercalibrated instrument. The output keeps the
/// order of `raw_observations`.
///
/// # Errors
/// - [`Error::DuplicateInstrument`] when an instrument appears twice in `raw_observations`
/// - [`Error::UnknownInstrument`] when a reading names an instrument absent from `bias`
pub fn calibrate_by_instrument<E: Float>(
    raw_observations: &[Reading<E>],
    bias: &HashMap<Instrument, E>,
) -> Result<Vec<E>> {
    ensure_unique(raw_observations, "room")?;

    raw_observations
        .iter()
        .map(|reading| {
            bias.get(&reading.instrument)
                .map(|&bias| reading.value - bias)
                .ok_or_else(|| Error::UnknownInstrument(reading.instrument.clone()))
        })
        .collect()
}

fn ensure_unique<E>(readings: &[Reading<E>], set: &'static str) -> Result<()> {
    readings
        .iter()
        .map(|reading| &reading.instrument)
        .duplicates()
        .next()
        .map_or(Ok(()), |instrument| {
            Err(Error::DuplicateInstrument(instrument.clone(), set))
        })
}

/// Read a set of named readings from a CSV file with the header `instrument,value`
///
/// # Errors
/// Returns an error if the file cannot be read or a row cannot be parsed.
pub fn read_csv<E: DeserializeOwned>(filepath: &Path) -> Result<Vec<Reading<E>>> {
    let file = fs::read(filepath)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(&file[..]);

    let readings = rdr
        .deserialize()
        .collect::<::std::result::Result<Vec<Reading<E>>, _>>()?;

    debug!(path = ?filepath, count = readings.len(), "read readings");
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ndarray_rand::rand::seq::SliceRandom;
    use ndarray_rand::rand::{Rng, SeedableRng};
    use proptest::prelude::*;
    use rand_isaac::Isaac64Rng;

    use super::{bias_by_instrument, calibrate, calibrate_by_instrument, compute_bias, Reading};
    use crate::{Error, Result};

    const INTERCALIBRATION: [f64; 4] = [20.2, 20.2, 19.0, 19.5];
    const ROOM: [f64; 4] = [20.6, 20.4, 20.0, 19.5];

    fn named(values: &[f64]) -> Vec<Reading<f64>> {
        values
            .iter()
            .enumerate()
            .map(|(ii, &value)| Reading::new(format!("T{}", ii + 1).as_str(), value))
            .collect()
    }

    #[test]
    fn reference_biases_are_deviations_from_the_mean() -> Result<()> {
        let bias = compute_bias(&INTERCALIBRATION)?;
        let expected = [0.475, 0.475, -0.725, -0.225];

        assert_eq!(bias.len(), expected.len());
        for (calculated, expected) in bias.iter().zip(expected) {
            approx::assert_abs_diff_eq!(*calculated, expected, epsilon = 1e-12);
        }
        approx::assert_abs_diff_eq!(bias.iter().sum::<f64>(), 0., epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn bias_of_empty_intercalibration_is_an_error() {
        let empty: [f64; 0] = [];
        assert!(matches!(compute_bias(&empty), Err(Error::EmptySequence(_))));
    }

    #[test]
    fn a_single_instrument_has_zero_bias() -> Result<()> {
        assert_eq!(compute_bias(&[20.2f64])?, vec![0.]);

        let bias = bias_by_instrument(&[Reading::new("T1", 20.2f64)])?;
        let calibrated = calibrate_by_instrument(&[Reading::new("T1", 20.6)], &bias)?;
        assert_eq!(calibrated, vec![20.6]);
        Ok(())
    }

    #[test]
    fn reference_observations_are_calibrated_positionally() -> Result<()> {
        let bias = compute_bias(&INTERCALIBRATION)?;
        let calibrated = calibrate(&ROOM, &bias)?;
        let expected = [20.125, 19.925, 20.725, 19.725];

        for (calculated, expected) in calibrated.iter().zip(expected) {
            approx::assert_abs_diff_eq!(*calculated, expected, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn positional_calibration_rejects_mismatched_lengths() -> Result<()> {
        let bias = compute_bias(&INTERCALIBRATION)?;
        let result = calibrate(&ROOM[..3], &bias);
        assert!(matches!(
            result,
            Err(Error::InputLengthMismatch {
                observations: 3,
                biases: 4
            })
        ));
        Ok(())
    }

    #[test]
    fn named_calibration_matches_positional_on_aligned_data() -> Result<()> {
        let positional = calibrate(&ROOM, &compute_bias(&INTERCALIBRATION)?)?;
        let bias = bias_by_instrument(&named(&INTERCALIBRATION))?;
        let by_name = calibrate_by_instrument(&named(&ROOM), &bias)?;

        assert_eq!(positional, by_name);
        Ok(())
    }

    #[test]
    fn named_calibration_ignores_reading_order() -> Result<()> {
        let seed = 40;
        let mut rng = Isaac64Rng::seed_from_u64(seed);

        let bias = bias_by_instrument(&named(&INTERCALIBRATION))?;
        let room = named(&ROOM);
        let expected = room
            .iter()
            .map(|reading| reading.instrument.clone())
            .zip(calibrate_by_instrument(&room, &bias)?)
            .collect::<HashMap<_, _>>();

        let mut shuffled = room;
        shuffled.shuffle(&mut rng);
        let calibrated = calibrate_by_instrument(&shuffled, &bias)?;

        for (reading, calculated) in shuffled.iter().zip(calibrated) {
            assert_eq!(expected[&reading.instrument], calculated);
        }
        Ok(())
    }

    #[test]
    fn room_readings_may_cover_a_subset_of_instruments() -> Result<()> {
        let bias = bias_by_instrument(&named(&INTERCALIBRATION))?;
        let room = vec![Reading::new("T3", 20.0)];

        let calibrated = calibrate_by_instrument(&room, &bias)?;
        approx::assert_abs_diff_eq!(calibrated[0], 20.725, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn unknown_instruments_are_rejected() -> Result<()> {
        let bias = bias_by_instrument(&named(&INTERCALIBRATION))?;
        let room = vec![Reading::new("T1", 20.6), Reading::new("T9", 20.0)];

        match calibrate_by_instrument(&room, &bias) {
            Err(Error::UnknownInstrument(instrument)) => assert_eq!(instrument.0, "T9"),
            other => panic!("expected an unknown instrument, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn duplicate_instruments_are_rejected() -> Result<()> {
        let mut intercalibration = named(&INTERCALIBRATION);
        intercalibration.push(Reading::new("T2", 19.9));
        assert!(matches!(
            bias_by_instrument(&intercalibration),
            Err(Error::DuplicateInstrument(_, "intercalibration"))
        ));

        let bias = bias_by_instrument(&named(&INTERCALIBRATION))?;
        let room = vec![Reading::new("T1", 20.6), Reading::new("T1", 20.4)];
        assert!(matches!(
            calibrate_by_instrument(&room, &bias),
            Err(Error::DuplicateInstrument(_, "room"))
        ));
        Ok(())
    }

    #[test]
    fn biases_of_random_intercalibrations_sum_to_zero() -> Result<()> {
        let seed = 40;
        let mut rng = Isaac64Rng::seed_from_u64(seed);

        for _ in 0..100 {
            let num_instruments = rng.gen_range(2..32);
            let readings = (0..num_instruments)
                .map(|_| rng.gen_range(15.0..25.0))
                .collect::<Vec<f64>>();

            let bias = compute_bias(&readings)?;
            assert_eq!(bias.len(), readings.len());
            approx::assert_abs_diff_eq!(bias.iter().sum::<f64>(), 0., epsilon = 1e-9);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn calibration_preserves_length(
            raw in proptest::collection::vec(-40f64..60., 1..16),
        ) {
            let bias = compute_bias(&raw).unwrap();
            let calibrated = calibrate(&raw, &bias).unwrap();
            prop_assert_eq!(calibrated.len(), raw.len());
        }
    }
}
