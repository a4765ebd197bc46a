//! Horizontal-frame entry points.
//!
//! Ground observations arrive as satellite altitude/azimuth/height plus the
//! sun's altitude/azimuth. [`brightness_coordinates`] rebases a single
//! observation into the brightness frame; [`calculate_intensity`] batches
//! the full pipeline over arrays of satellite positions.

use crate::brightness_frame::{self, IntensitySettings};
use crate::surface::Surface;
use crate::BrightnessErrors;
use conversions::alt_az_to_unit;
use conversions::constants::EARTH_RADIUS;
use linear_algebra::inv_3;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Converts a horizontal-frame observation into brightness-frame
/// coordinates.
///
/// Returns the vector from the satellite to the observer (meters, expressed
/// in the brightness frame's Earth-centered axes) and the satellite's angle
/// past the terminator (radians).
pub fn brightness_coordinates(
    sat_alt: f64,
    sat_az: f64,
    sat_height: f64,
    sun_alt: f64,
    sun_az: f64,
) -> Result<(Vector3<f64>, f64), BrightnessErrors> {
    if sat_height <= 0.0 {
        return Err(BrightnessErrors::InvalidGeometry(format!(
            "satellite height ({sat_height} m) must be above Earth's surface"
        )));
    }

    let sat = alt_az_to_unit(sat_alt, sat_az);
    let sun = alt_az_to_unit(sun_alt, sun_az);

    // Earth-center angle to the sub-satellite point, correcting the
    // observed zenith angle for the satellite's height
    let phi = sat.z.acos()
        - (EARTH_RADIUS / (EARTH_RADIUS + sat_height) * (sat.x * sat.x + sat.y * sat.y).sqrt())
            .asin();
    let theta = sat.y.atan2(sat.x);

    // Z: geodetic nadir direction, from Earth's center through the
    // sub-satellite point
    let z_axis = Vector3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());

    let dot = z_axis.dot(&sun);
    if dot * dot >= 1.0 {
        return Err(BrightnessErrors::InvalidGeometry(
            "sun direction is parallel to the satellite nadir direction".to_string(),
        ));
    }

    // Y: component of the sun direction perpendicular to Z, sign-fixed to
    // point toward the sun
    let beta = 1.0 / (1.0 - dot * dot).sqrt();
    let alpha = -beta * dot;
    let mut y_axis = z_axis * alpha + sun * beta;
    if y_axis.dot(&sun) < 0.0 {
        y_axis = -y_axis;
    }

    let x_axis = y_axis.cross(&z_axis);

    // the basis columns are orthonormal by construction, so the inverse is
    // well defined
    let t = inv_3(
        x_axis.x, y_axis.x, z_axis.x, x_axis.y, y_axis.y, z_axis.y, x_axis.z, y_axis.z, z_axis.z,
    );

    let dist_to_sat = (EARTH_RADIUS.powi(2) + (EARTH_RADIUS + sat_height).powi(2)
        - 2.0 * EARTH_RADIUS * (EARTH_RADIUS + sat_height) * phi.cos())
    .sqrt();

    let observer = Vector3::new(
        -dist_to_sat * (t[0] * sat.x + t[1] * sat.y + t[2] * sat.z),
        -dist_to_sat * (t[3] * sat.x + t[4] * sat.y + t[5] * sat.z),
        (EARTH_RADIUS + sat_height) - dist_to_sat * (t[6] * sat.x + t[7] * sat.y + t[8] * sat.z),
    );

    let angle_past_terminator = -(t[6] * sun.x + t[7] * sun.y + t[8] * sun.z).asin();

    Ok((observer, angle_past_terminator))
}

/// Intensity of the satellite for each horizontal-frame sample.
///
/// `sat_heights` has either one element (broadcast across all samples) or
/// one per sample. Samples are independent, each builds its own earthshine
/// mesh, so they are evaluated in parallel; output order matches the input.
///
/// Fails with [`BrightnessErrors::InvalidObservationState`] before any
/// computation when the sun is above the observer's horizontal plane.
pub fn calculate_intensity(
    surfaces: &[Surface],
    sat_heights: &[f64],
    sat_altitudes: &[f64],
    sat_azimuths: &[f64],
    sun_altitude: f64,
    sun_azimuth: f64,
    settings: &IntensitySettings,
) -> Result<Vec<f64>, BrightnessErrors> {
    if sun_altitude > 0.0 {
        return Err(BrightnessErrors::InvalidObservationState(sun_altitude));
    }

    let n = sat_altitudes.len();
    if sat_azimuths.len() != n || !(sat_heights.len() == n || sat_heights.len() == 1) {
        return Err(BrightnessErrors::ShapeMismatch {
            heights: sat_heights.len(),
            altitudes: n,
            azimuths: sat_azimuths.len(),
        });
    }

    (0..n)
        .into_par_iter()
        .map(|i| {
            let sat_height = if sat_heights.len() == 1 {
                sat_heights[0]
            } else {
                sat_heights[i]
            };
            let (observer, angle_past_terminator) = brightness_coordinates(
                sat_altitudes[i],
                sat_azimuths[i],
                sat_height,
                sun_altitude,
                sun_azimuth,
            )?;
            brightness_frame::calculate_intensity(
                surfaces,
                sat_height,
                angle_past_terminator,
                &observer,
                settings,
            )
        })
        .collect()
}
