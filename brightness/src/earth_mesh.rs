//! Discretizations of Earth's surface.
//!
//! [`EarthPanels`] is the earthshine integration mesh: point samples of the
//! region simultaneously visible to the satellite and illuminated by the
//! sun. The grid is uniform in the two gnomonic angles seen from the
//! satellite, so panel areas vary across the mesh and are recovered
//! analytically from the Jacobian of the (r, phi, theta) -> (x, y, z) map.

use crate::BrightnessErrors;
use conversions::constants::EARTH_RADIUS;
use nalgebra::Vector3;

/// Uniformly spaced samples over `[start, stop]`, endpoints included.
pub(crate) fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (stop - start) * i as f64 / (n - 1) as f64)
        .collect()
}

/// Mesh of panels on Earth's surface that are visible to the satellite and
/// illuminated by the sun. Regenerated for every calculation; never cached.
pub struct EarthPanels {
    /// Panel centers (meters, brightness frame, Earth-centered).
    pub positions: Vec<Vector3<f64>>,
    /// Outward unit normals (position / R).
    pub normals: Vec<Vector3<f64>>,
    /// Differential panel areas (m^2).
    pub areas: Vec<f64>,
}

impl EarthPanels {
    /// Generates the panel mesh.
    ///
    /// `sat_z` is the satellite's distance from Earth's center (meters),
    /// `angle_past_terminator` is in radians, and the candidate grid has
    /// `density` x `density` cells before horizon clipping.
    pub fn generate(
        sat_z: f64,
        angle_past_terminator: f64,
        density: usize,
    ) -> Result<Self, BrightnessErrors> {
        let r = EARTH_RADIUS;

        if sat_z <= r {
            return Err(BrightnessErrors::InvalidGeometry(format!(
                "satellite distance from Earth's center ({sat_z} m) must exceed Earth's radius"
            )));
        }
        if density < 2 {
            return Err(BrightnessErrors::InvalidGeometry(format!(
                "earth panel density must be at least 2, got {density}"
            )));
        }

        // angular radius of Earth's limb as seen from the satellite
        let max_angle = (r / sat_z).acos();

        let angles_off_plane = linspace(-max_angle, max_angle, density);
        let angles_on_plane = linspace(angle_past_terminator, max_angle, density);

        let d_phi = (angles_off_plane[1] - angles_off_plane[0]).abs();
        let d_theta = (angles_on_plane[1] - angles_on_plane[0]).abs();

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut areas = Vec::new();

        for &phi in &angles_off_plane {
            for &theta in &angles_on_plane {
                // gnomonic-style projection: uniform angular density as
                // seen from the satellite, not uniform area density
                let nz = 1.0 / (1.0 + theta.tan().powi(2) + phi.tan().powi(2)).sqrt();

                // beyond the satellite's horizon
                if nz.acos() >= max_angle {
                    continue;
                }

                let nx = phi.tan() * nz;
                let ny = theta.tan() * nz;

                let z = nz * r;

                // closed-form partials of (x, y, z) with respect to
                // (r, phi, theta), evaluated on the surface
                let dx_dr = nx / nz * z / r;
                let dx_dphi = z.powi(3) / (r.powi(2) * phi.cos().powi(2) * theta.cos().powi(2));
                let dx_dtheta = -(ny / nz * nx / nz * z.powi(3)) / (r.powi(2) * theta.cos().powi(2));

                let dy_dr = theta.tan() * z / r;
                let dy_dphi = -(ny / nz * nx / nz * z.powi(3)) / (r.powi(2) * phi.cos().powi(2));
                let dy_dtheta = dx_dphi;

                let dz_dr = z / r;
                let dz_dphi = -(nx / nz * z.powi(3)) / (r.powi(2) * phi.cos().powi(2));
                let dz_dtheta = -(ny / nz * z.powi(3)) / (r.powi(2) * theta.cos().powi(2));

                let determinant = dx_dr * (dy_dphi * dz_dtheta - dy_dtheta * dz_dphi)
                    - dy_dr * (dx_dphi * dz_dtheta - dx_dtheta * dz_dphi)
                    + dz_dr * (dx_dphi * dy_dtheta - dx_dtheta * dy_dphi);

                positions.push(Vector3::new(nx * r, ny * r, z));
                normals.push(Vector3::new(nx, ny, nz));
                areas.push(determinant * d_phi * d_theta);
            }
        }

        Ok(Self {
            positions,
            normals,
            areas,
        })
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// A density x density mesh of ground observers on the night side of Earth
/// and within view of the satellite, in brightness-frame coordinates.
/// Row-major over (on-plane, off-plane) grid indices.
pub struct GroundObservers {
    pub sat_height: f64,
    pub angle_past_terminator: f64,
    pub density: usize,
    /// Off-plane grid angle per mesh point (radians).
    pub angles_off_plane: Vec<f64>,
    /// On-plane grid angle per mesh point (radians).
    pub angles_on_plane: Vec<f64>,
    /// Ground distance from the sub-satellite point along the off-plane
    /// direction (meters), for plotting consumers.
    pub dists_off_plane: Vec<f64>,
    /// Ground distance along the on-plane direction (meters).
    pub dists_on_plane: Vec<f64>,
    /// Observer positions on Earth's surface (meters).
    pub positions: Vec<Vector3<f64>>,
}

impl GroundObservers {
    pub fn new(
        sat_height: f64,
        angle_past_terminator: f64,
        density: usize,
    ) -> Result<Self, BrightnessErrors> {
        if sat_height <= 0.0 {
            return Err(BrightnessErrors::InvalidGeometry(format!(
                "satellite height ({sat_height} m) must be above Earth's surface"
            )));
        }
        if density < 2 {
            return Err(BrightnessErrors::InvalidGeometry(format!(
                "observer mesh density must be at least 2, got {density}"
            )));
        }

        let r = EARTH_RADIUS;
        let max_angle = (r / (r + sat_height)).acos();

        let off = linspace(-max_angle, max_angle, density);
        let on = linspace(-max_angle, angle_past_terminator, density);

        let mut angles_off_plane = Vec::with_capacity(density * density);
        let mut angles_on_plane = Vec::with_capacity(density * density);
        let mut positions = Vec::with_capacity(density * density);

        for &theta in &on {
            for &phi in &off {
                let nz = 1.0 / (1.0 + theta.tan().powi(2) + phi.tan().powi(2)).sqrt();
                let nx = phi.tan() * nz;
                let ny = theta.tan() * nz;

                angles_off_plane.push(phi);
                angles_on_plane.push(theta);
                positions.push(Vector3::new(nx * r, ny * r, nz * r));
            }
        }

        let dists_off_plane = angles_off_plane.iter().map(|a| a * r).collect();
        let dists_on_plane = angles_on_plane.iter().map(|a| a * r).collect();

        Ok(Self {
            sat_height,
            angle_past_terminator,
            density,
            angles_off_plane,
            angles_on_plane,
            dists_off_plane,
            dists_on_plane,
            positions,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.density, self.density)
    }

    /// Intensity seen by every observer in the mesh, row-major.
    pub fn calculate_intensities(
        &self,
        surfaces: &[crate::surface::Surface],
        settings: &crate::brightness_frame::IntensitySettings,
    ) -> Result<Vec<f64>, BrightnessErrors> {
        self.positions
            .iter()
            .map(|position| {
                crate::brightness_frame::calculate_intensity(
                    surfaces,
                    self.sat_height,
                    self.angle_past_terminator,
                    position,
                    settings,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    const SAT_HEIGHT: f64 = 550e3;

    #[test]
    fn test_panel_area_converges_to_half_cap() {
        // with the terminator through the sub-satellite point the mesh
        // covers half of the visible spherical cap
        let sat_z = EARTH_RADIUS + SAT_HEIGHT;
        let panels = EarthPanels::generate(sat_z, 0.0, 151).unwrap();

        let total: f64 = panels.areas.iter().sum();
        let analytic = PI * EARTH_RADIUS.powi(2) * (1.0 - EARTH_RADIUS / sat_z);

        // documented convergence tolerance at density 151
        assert_relative_eq!(total, analytic, max_relative = 4e-3);
        // regression against the precomputed reference sum
        assert_relative_eq!(total, 1.017987728360261e13, max_relative = 5e-4);
        assert!((panels.len() as i64 - 18206).abs() <= 3);
    }

    #[test]
    fn test_panel_area_full_visible_cap() {
        let sat_z = EARTH_RADIUS + SAT_HEIGHT;
        let max_angle = (EARTH_RADIUS / sat_z).acos();
        let panels = EarthPanels::generate(sat_z, -max_angle, 151).unwrap();

        let total: f64 = panels.areas.iter().sum();
        let analytic = 2.0 * PI * EARTH_RADIUS.powi(2) * (1.0 - EARTH_RADIUS / sat_z);
        assert_relative_eq!(total, analytic, max_relative = 2e-3);
    }

    #[test]
    fn test_panels_lie_on_surface_with_outward_normals() {
        let sat_z = EARTH_RADIUS + SAT_HEIGHT;
        let panels = EarthPanels::generate(sat_z, 0.1, 21).unwrap();
        assert!(!panels.is_empty());

        for (position, normal) in panels.positions.iter().zip(&panels.normals) {
            assert_relative_eq!(position.norm(), EARTH_RADIUS, max_relative = 1e-12);
            assert_abs_diff_eq!(normal.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!((normal * EARTH_RADIUS).z, position.z, max_relative = 1e-12);
            // illuminated side only: on-plane angle past the terminator
            assert!(normal.y >= -1e-12);
        }

        for &area in &panels.areas {
            assert!(area > 0.0);
        }
    }

    #[test]
    fn test_panel_generation_rejects_subsurface_satellite() {
        let result = EarthPanels::generate(EARTH_RADIUS, 0.0, 51);
        assert!(matches!(
            result,
            Err(BrightnessErrors::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_ground_observers_mesh() {
        let observers = GroundObservers::new(SAT_HEIGHT, 0.2, 11).unwrap();
        assert_eq!(observers.shape(), (11, 11));
        assert_eq!(observers.positions.len(), 121);

        let max_angle = (EARTH_RADIUS / (EARTH_RADIUS + SAT_HEIGHT)).acos();
        for (position, &theta) in observers.positions.iter().zip(&observers.angles_on_plane) {
            assert_relative_eq!(position.norm(), EARTH_RADIUS, max_relative = 1e-12);
            // night side of the terminator, within view of the satellite
            assert!(theta >= -max_angle - 1e-12);
            assert!(theta <= 0.2 + 1e-12);
        }
    }
}
