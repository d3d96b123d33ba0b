#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// #![warn(clippy::cargo)]

pub mod analysis;
pub mod calibration;
pub mod config;
pub mod error;
pub mod estimate;
pub mod math;
pub mod model;
pub mod observation;
pub mod pipeline;
pub mod sampling;

pub use error::Error;

pub type Result<T> = ::std::result::Result<T, Error>;
