//! The brightness-frame radiometric integrator.
//!
//! Frame convention: origin at Earth's center with the satellite on the +z
//! axis at `EARTH_RADIUS + sat_height`; +y points toward the projection of
//! the sun direction, so the sun unit vector is
//! `(0, cos(angle_past_terminator), -sin(angle_past_terminator))`.

use crate::earth_mesh::EarthPanels;
use crate::surface::Surface;
use crate::BrightnessErrors;
use brdf::Brdf;
use conversions::constants::{EARTH_RADIUS, SUN_INTENSITY};
use nalgebra::Vector3;

/// Options shared by the intensity calculators.
pub struct IntensitySettings {
    /// Include flux scattered from direct sunlight.
    pub include_sun: bool,
    /// Include flux scattered from earthshine.
    pub include_earthshine: bool,
    /// The earthshine mesh has `earth_panel_density^2` candidate panels.
    pub earth_panel_density: usize,
    /// BRDF of Earth's surface; required when earthshine is included.
    pub earth_brdf: Option<Box<dyn Brdf>>,
}

impl Default for IntensitySettings {
    fn default() -> Self {
        Self {
            include_sun: true,
            include_earthshine: false,
            earth_panel_density: 151,
            earth_brdf: None,
        }
    }
}

fn clip_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

struct Panel {
    /// Unit vector from the panel toward the satellite.
    to_sat: Vector3<f64>,
    /// Panel-to-satellite distance (meters).
    dist: f64,
    area: f64,
    /// Cosine of the solar incidence angle at the panel.
    illumination: f64,
    /// Cosine between the panel normal and the direction to the satellite.
    emission: f64,
    /// Earth's BRDF evaluated from the sun through this panel to the
    /// satellite.
    earth_brdf: f64,
}

fn earthshine_panels(
    sat_z: f64,
    angle_past_terminator: f64,
    vector_to_sun: &Vector3<f64>,
    settings: &IntensitySettings,
) -> Result<Vec<Panel>, BrightnessErrors> {
    let earth_brdf = settings.earth_brdf.as_deref().ok_or_else(|| {
        BrightnessErrors::InvalidGeometry(
            "earthshine requested without an earth BRDF".to_string(),
        )
    })?;

    let mesh = EarthPanels::generate(sat_z, angle_past_terminator, settings.earth_panel_density)?;
    let sat_position = Vector3::new(0.0, 0.0, sat_z);

    let mut panels = Vec::with_capacity(mesh.len());
    for i in 0..mesh.len() {
        let position = mesh.positions[i];
        let normal = mesh.normals[i];

        let offset = sat_position - position;
        let dist = offset.norm();
        if dist == 0.0 {
            return Err(BrightnessErrors::InvalidGeometry(
                "satellite is coincident with an earthshine panel".to_string(),
            ));
        }
        let to_sat = offset / dist;

        panels.push(Panel {
            to_sat,
            dist,
            area: mesh.areas[i],
            illumination: clip_negative(normal.dot(vector_to_sun)),
            emission: clip_negative(normal.dot(&to_sat)),
            earth_brdf: earth_brdf.eval(vector_to_sun, &normal, &to_sat),
        });
    }

    Ok(panels)
}

/// Flux (W/m^2) scattered by the satellite's surfaces and received by an
/// observer at `observer_position` (meters, brightness frame).
///
/// Returns 0 when the satellite is eclipsed by Earth or below the
/// observer's horizon; these are valid states, not errors.
pub fn calculate_intensity(
    surfaces: &[Surface],
    sat_height: f64,
    angle_past_terminator: f64,
    observer_position: &Vector3<f64>,
    settings: &IntensitySettings,
) -> Result<f64, BrightnessErrors> {
    if sat_height <= 0.0 {
        return Err(BrightnessErrors::InvalidGeometry(format!(
            "satellite height ({sat_height} m) must be above Earth's surface"
        )));
    }

    let horizon_angle = (EARTH_RADIUS / (EARTH_RADIUS + sat_height)).acos();

    // inside Earth's shadow, boundary inclusive
    if angle_past_terminator >= horizon_angle {
        return Ok(0.0);
    }

    let cos_observer = observer_position.z / EARTH_RADIUS;
    if !(-1.0..=1.0).contains(&cos_observer) {
        return Err(BrightnessErrors::InvalidGeometry(format!(
            "observer z ({} m) is outside Earth's surface",
            observer_position.z
        )));
    }

    // satellite below the observer's horizon; the 1 degree margin keeps
    // sky-map edges continuous
    if cos_observer.acos() > horizon_angle + 1f64.to_radians() {
        return Ok(0.0);
    }

    let vector_to_sun = Vector3::new(
        0.0,
        angle_past_terminator.cos(),
        -angle_past_terminator.sin(),
    );

    let sat_z = sat_height + EARTH_RADIUS;
    let offset = observer_position - Vector3::new(0.0, 0.0, sat_z);
    let dist_to_observer = offset.norm();
    if dist_to_observer == 0.0 {
        return Err(BrightnessErrors::InvalidGeometry(
            "observer is coincident with the satellite".to_string(),
        ));
    }
    let sat_to_observer = offset / dist_to_observer;

    let panels = if settings.include_earthshine {
        earthshine_panels(sat_z, angle_past_terminator, &vector_to_sun, settings)?
    } else {
        Vec::new()
    };

    let mut intensity = 0.0;

    for surface in surfaces {
        let normal = surface.resolve_normal(angle_past_terminator);

        // surfaces facing away from the sun or the observer contribute
        // nothing; clipping also protects against negative-near-zero
        // cosines
        let sun_cos = clip_negative(normal.dot(&vector_to_sun));
        let observer_cos = clip_negative(normal.dot(&sat_to_observer));

        let mut sun_contribution = 0.0;
        let mut earth_contribution = 0.0;

        if settings.include_sun {
            let surface_brdf = surface
                .brdf
                .eval(&vector_to_sun, &normal, &sat_to_observer);
            sun_contribution += surface_brdf * sun_cos * observer_cos;
        }

        for panel in &panels {
            let to_panel = -panel.to_sat;
            let panel_cos = clip_negative(normal.dot(&to_panel));
            let surface_brdf = surface.brdf.eval(&to_panel, &normal, &sat_to_observer);

            earth_contribution += panel.earth_brdf
                * surface_brdf
                * panel.illumination
                * observer_cos
                * panel_cos
                * panel.emission
                * panel.area
                / (panel.dist * panel.dist);
        }

        intensity += SUN_INTENSITY * surface.area * (sun_contribution + earth_contribution)
            / (dist_to_observer * dist_to_observer);
    }

    Ok(intensity)
}
