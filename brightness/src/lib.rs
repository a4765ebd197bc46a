//! Brightness of an orbiting reflective body seen from the ground.
//!
//! The calculators combine direct sunlight and earthshine scattered by a
//! satellite's surfaces into the flux incident on a ground observer. The
//! brightness frame is centered on the satellite with +y toward the sun's
//! projection and +z along geodetic nadir, which decouples the radiometry
//! from absolute sky position; [`observer_frame`] converts horizontal
//! altitude/azimuth observations into that frame.

pub mod brightness_frame;
pub mod earth_mesh;
pub mod observer_frame;
pub mod surface;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrightnessErrors {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("sun altitude is {0} degrees, intensity is only defined with the sun below the horizon")]
    InvalidObservationState(f64),
    #[error(
        "satellite heights ({heights}) must have length 1 or match altitudes ({altitudes}) and azimuths ({azimuths})"
    )]
    ShapeMismatch {
        heights: usize,
        altitudes: usize,
        azimuths: usize,
    },
}
