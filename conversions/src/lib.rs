//! Angle and photometric conversions used at the calculator boundaries.

pub mod constants;

use nalgebra::Vector3;

/// Converts a horizontal-frame altitude and azimuth (degrees) to a Cartesian
/// unit vector, using the colatitude `phi = 90 - altitude`.
pub fn alt_az_to_unit(altitude: f64, azimuth: f64) -> Vector3<f64> {
    let phi = (90.0 - altitude).to_radians();
    let theta = azimuth.to_radians();
    Vector3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}

/// Converts a Cartesian unit vector to spherical angles `(phi, theta)` in
/// degrees, where `phi` is the polar angle from +z and `theta` the azimuthal
/// angle from +x.
pub fn unit_to_spherical(v: &Vector3<f64>) -> (f64, f64) {
    let phi = v.z.acos();
    let theta = v.y.atan2(v.x);
    (phi.to_degrees(), theta.to_degrees())
}

/// Converts spherical angles `(phi, theta)` in degrees back to a Cartesian
/// unit vector. Inverse of [`unit_to_spherical`] up to angle wrap.
pub fn spherical_to_unit(phi: f64, theta: f64) -> Vector3<f64> {
    let phi = phi.to_radians();
    let theta = theta.to_radians();
    Vector3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}

/// Converts an intensity in W/m^2 to an AB magnitude.
///
/// When `clip` is set, the logarithm argument is floored at
/// [`constants::AB_MAG_CLIP_FLOOR`] so that zero intensity maps to a finite
/// magnitude instead of +inf. Strictly decreasing in intensity above the
/// floor.
pub fn intensity_to_ab_mag(intensity: f64, clip: bool) -> f64 {
    let mut log_val =
        intensity * constants::WAVELENGTH / (constants::SPEED_OF_LIGHT * constants::AB_ZERO_POINT_FLUX);
    if clip && log_val < constants::AB_MAG_CLIP_FLOOR {
        log_val = constants::AB_MAG_CLIP_FLOOR;
    }
    -2.5 * log_val.log10()
}

/// Maps [`intensity_to_ab_mag`] over a slice of intensities.
pub fn intensities_to_ab_mag(intensities: &[f64], clip: bool) -> Vec<f64> {
    intensities
        .iter()
        .map(|&intensity| intensity_to_ab_mag(intensity, clip))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_alt_az_to_unit() {
        // zenith
        let v = alt_az_to_unit(90.0, 0.0);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(v.z, 1.0, epsilon = TOL);

        // on the horizon, due east
        let v = alt_az_to_unit(0.0, 90.0);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(v.z, 0.0, epsilon = TOL);
    }

    #[test]
    fn test_alt_az_to_unit_is_unit_length() {
        for alt in [-80.0, -15.0, 0.0, 30.0, 89.0] {
            for az in [0.0, 47.0, 180.0, 312.0] {
                let v = alt_az_to_unit(alt, az);
                assert_abs_diff_eq!(v.norm(), 1.0, epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_spherical_round_trip() {
        for phi in [1.0, 45.0, 90.0, 135.0, 179.0] {
            for theta in [-170.0, -45.0, 0.0, 60.0, 179.0] {
                let v = spherical_to_unit(phi, theta);
                let (phi_rt, theta_rt) = unit_to_spherical(&v);
                assert_abs_diff_eq!(phi_rt, phi, epsilon = 1e-10);
                assert_abs_diff_eq!(theta_rt, theta, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_unit_round_trip() {
        let v = Vector3::new(0.3, -0.4, 0.5).normalize();
        let (phi, theta) = unit_to_spherical(&v);
        let v_rt = spherical_to_unit(phi, theta);
        assert_abs_diff_eq!(v_rt.x, v.x, epsilon = 1e-12);
        assert_abs_diff_eq!(v_rt.y, v.y, epsilon = 1e-12);
        assert_abs_diff_eq!(v_rt.z, v.z, epsilon = 1e-12);
    }

    #[test]
    fn test_ab_mag_reference_value() {
        // direct-sun intensity of a 5 m^2 Lambertian nadir panel at 550 km,
        // 0.2 rad past the terminator
        let intensity = 1.421557692894e-9;
        assert_relative_eq!(
            intensity_to_ab_mag(intensity, true),
            2.896178453563,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_ab_mag_clip_floor() {
        // zero intensity clips to the floor rather than diverging
        assert_abs_diff_eq!(intensity_to_ab_mag(0.0, true), 12.5, epsilon = TOL);
        assert!(intensity_to_ab_mag(0.0, false).is_infinite());

        // anything below the floor maps to the same magnitude
        let floor_mag = intensity_to_ab_mag(0.0, true);
        assert_abs_diff_eq!(intensity_to_ab_mag(1e-30, true), floor_mag, epsilon = TOL);
    }

    #[test]
    fn test_ab_mag_is_strictly_decreasing() {
        let mut previous = f64::INFINITY;
        for exponent in -8..2 {
            let intensity = 10f64.powi(exponent);
            let mag = intensity_to_ab_mag(intensity, true);
            assert!(mag < previous, "magnitude must decrease as intensity grows");
            previous = mag;
        }
    }
}
