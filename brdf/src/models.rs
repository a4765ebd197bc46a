//! Catalog of common scattering models.
//!
//! Each model is a small parameter struct implementing [`Brdf`]. The
//! formulas follow the usual stray-light literature conventions; every model
//! clips back-facing geometry to zero.

use crate::{back_facing, specular_direction, Brdf};
use nalgebra::{DMatrix, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Ideal diffuse scattering, `BRDF = albedo / pi`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Lambertian {
    pub albedo: f64,
}

impl Lambertian {
    /// `albedo` should be between 0.0 and 1.0 for a physical surface.
    pub fn new(albedo: f64) -> Self {
        Self { albedo }
    }
}

impl Brdf for Lambertian {
    fn eval(
        &self,
        incident: &Vector3<f64>,
        normal: &Vector3<f64>,
        outgoing: &Vector3<f64>,
    ) -> f64 {
        if back_facing(incident, normal, outgoing) {
            return 0.0;
        }
        self.albedo / PI
    }
}

/// ABg scattering model, `BRDF = A / (B + x^g)` where `x` is the distance
/// between the projected outgoing and specular directions.
///
/// `A / B` is the specular peak, `B` sets the knee where the profile
/// transitions to power-law decay, and `g` is the log-log slope.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Abg {
    pub a: f64,
    pub b: f64,
    pub g: f64,
}

impl Abg {
    pub fn new(a: f64, b: f64, g: f64) -> Self {
        Self { a, b, g }
    }
}

impl Brdf for Abg {
    fn eval(
        &self,
        incident: &Vector3<f64>,
        normal: &Vector3<f64>,
        outgoing: &Vector3<f64>,
    ) -> f64 {
        if back_facing(incident, normal, outgoing) {
            return 0.0;
        }

        let specular = specular_direction(incident, normal);

        // project outgoing and specular directions onto the surface plane
        let beta = outgoing - normal * outgoing.dot(normal);
        let beta_0 = &specular - normal * specular.dot(normal);
        let x = (beta - beta_0).norm();

        self.a / (self.b + x.powf(self.g))
    }
}

/// Gaussian specular lobe, `BRDF = A exp((w_r . w_o - 1) / sigma)`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Gaussian {
    pub amplitude: f64,
    pub sigma: f64,
}

impl Gaussian {
    pub fn new(amplitude: f64, sigma: f64) -> Self {
        Self { amplitude, sigma }
    }
}

impl Brdf for Gaussian {
    fn eval(
        &self,
        incident: &Vector3<f64>,
        normal: &Vector3<f64>,
        outgoing: &Vector3<f64>,
    ) -> f64 {
        if back_facing(incident, normal, outgoing) {
            return 0.0;
        }

        let specular = specular_direction(incident, normal);
        self.amplitude * ((specular.dot(outgoing) - 1.0) / self.sigma).exp()
    }
}

/// Phong model, a diffuse term plus a normalized specular lobe:
/// `BRDF = Kd / pi + Ks (n + 2) / (2 pi) (w_r . w_o)^n`.
///
/// Energy conservation requires `kd + ks <= 1`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Phong {
    pub kd: f64,
    pub ks: f64,
    pub n: f64,
}

impl Phong {
    pub fn new(kd: f64, ks: f64, n: f64) -> Self {
        Self { kd, ks, n }
    }
}

impl Brdf for Phong {
    fn eval(
        &self,
        incident: &Vector3<f64>,
        normal: &Vector3<f64>,
        outgoing: &Vector3<f64>,
    ) -> f64 {
        if back_facing(incident, normal, outgoing) {
            return 0.0;
        }

        let specular = specular_direction(incident, normal);
        let dot = specular.dot(outgoing).clamp(0.0, 1.0);

        self.kd / PI + self.ks * (self.n + 2.0) / (2.0 * PI) * dot.powf(self.n)
    }
}

/// Greynolds' binomial model for physically realistic isotropic surfaces.
///
/// `b` and `c` are the per-order coefficient matrices (rows share the power
/// of the projected-vector dot product `V`), `d` is the specularity
/// constant, and `l1` the minimum Gaussian index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Binomial {
    pub b: DMatrix<f64>,
    pub c: DMatrix<f64>,
    pub d: f64,
    pub l1: i32,
}

impl Binomial {
    pub fn new(b: DMatrix<f64>, c: DMatrix<f64>, d: f64, l1: i32) -> Self {
        Self { b, c, d, l1 }
    }
}

impl Brdf for Binomial {
    fn eval(
        &self,
        incident: &Vector3<f64>,
        normal: &Vector3<f64>,
        outgoing: &Vector3<f64>,
    ) -> f64 {
        if back_facing(incident, normal, outgoing) {
            return 0.0;
        }

        let specular = specular_direction(incident, normal);

        let rho = outgoing - normal * outgoing.dot(normal);
        let rho_0 = &specular - normal * specular.dot(normal);

        let dist = (&rho - &rho_0).norm();
        let v = rho.dot(&rho_0);

        let mut log_brdf = 0.0;
        for k in 0..self.b.nrows() {
            let mut term_1 = 0.0;
            for i in 0..self.b.ncols() {
                term_1 += self.b[(k, i)] * dist.powi(i as i32);
            }

            let mut term_2 = 0.0;
            for i in 0..self.c.ncols() {
                term_2 += self.c[(k, i)]
                    * (1.0 + self.d.powi(i as i32 + self.l1) * dist * dist).log10();
            }

            log_brdf += (term_1 + 0.5 * term_2) * v.powi(k as i32);
        }

        10f64.powf(log_brdf)
    }
}
