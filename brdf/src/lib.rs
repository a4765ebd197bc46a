//! Bidirectional reflectance distribution functions.
//!
//! The [`Brdf`] trait is the contract between satellite surfaces and the
//! intensity calculators; [`models`] holds the catalog of common scattering
//! models. All vectors are unit length, and incident/outgoing vectors point
//! away from the surface.

pub mod models;

use nalgebra::Vector3;

/// A bidirectional reflectance distribution function.
///
/// Implementations must return a non-negative scattering density per
/// steradian, and must return exactly 0 whenever the incident or outgoing
/// direction is on the back side of the surface (negative dot product with
/// the normal).
pub trait Brdf: Send + Sync {
    fn eval(
        &self,
        incident: &Vector3<f64>,
        normal: &Vector3<f64>,
        outgoing: &Vector3<f64>,
    ) -> f64;
}

/// Closures with the right signature can be used directly as BRDFs, e.g. for
/// empirical models not in the catalog.
impl<F> Brdf for F
where
    F: Fn(&Vector3<f64>, &Vector3<f64>, &Vector3<f64>) -> f64 + Send + Sync,
{
    fn eval(
        &self,
        incident: &Vector3<f64>,
        normal: &Vector3<f64>,
        outgoing: &Vector3<f64>,
    ) -> f64 {
        self(incident, normal, outgoing)
    }
}

/// True when either direction lies behind the surface. Every catalog model
/// zeroes its output in this case.
pub fn back_facing(
    incident: &Vector3<f64>,
    normal: &Vector3<f64>,
    outgoing: &Vector3<f64>,
) -> bool {
    incident.dot(normal) < 0.0 || outgoing.dot(normal) < 0.0
}

/// Mirror reflection of `incident` about `normal`.
pub(crate) fn specular_direction(
    incident: &Vector3<f64>,
    normal: &Vector3<f64>,
) -> Vector3<f64> {
    normal * (2.0 * incident.dot(normal)) - incident
}
