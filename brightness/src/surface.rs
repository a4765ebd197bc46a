use brdf::Brdf;
use nalgebra::Vector3;
use std::fmt;

/// Normal vector of a satellite surface, measured in the brightness frame.
///
/// Articulated surfaces (solar arrays tracking the sun, attitude-slewed
/// panels) expose their normal as a function of the angle past the
/// terminator; everything else is a fixed unit vector.
pub enum SurfaceNormal {
    Fixed(Vector3<f64>),
    Articulated(Box<dyn Fn(f64) -> Vector3<f64> + Send + Sync>),
}

/// One reflective facet of the satellite.
///
/// `area` is in m^2 and must be positive; the normal must be unit length.
/// Surfaces are read-only during a calculation and can be shared across
/// parallel calculator invocations.
pub struct Surface {
    pub area: f64,
    pub normal: SurfaceNormal,
    pub brdf: Box<dyn Brdf>,
}

impl Surface {
    pub fn new(area: f64, normal: SurfaceNormal, brdf: Box<dyn Brdf>) -> Self {
        Self { area, normal, brdf }
    }

    /// A surface with a fixed brightness-frame normal.
    pub fn fixed(area: f64, normal: Vector3<f64>, brdf: Box<dyn Brdf>) -> Self {
        Self::new(area, SurfaceNormal::Fixed(normal), brdf)
    }

    /// A surface whose normal depends on the angle past the terminator.
    pub fn articulated<F>(area: f64, normal: F, brdf: Box<dyn Brdf>) -> Self
    where
        F: Fn(f64) -> Vector3<f64> + Send + Sync + 'static,
    {
        Self::new(area, SurfaceNormal::Articulated(Box::new(normal)), brdf)
    }

    /// Resolves the normal for the given angle past the terminator
    /// (radians). Fixed normals ignore the angle.
    pub fn resolve_normal(&self, angle_past_terminator: f64) -> Vector3<f64> {
        match &self.normal {
            SurfaceNormal::Fixed(normal) => *normal,
            SurfaceNormal::Articulated(normal) => normal(angle_past_terminator),
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Surface")?;
        writeln!(f, "|-- Area: {:.2} m^2", self.area)?;
        match &self.normal {
            SurfaceNormal::Fixed(n) => {
                writeln!(f, "|-- Normal Vector: <{:.2}, {:.2}, {:.2}>", n.x, n.y, n.z)
            }
            SurfaceNormal::Articulated(_) => writeln!(f, "|-- Normal Vector: articulated"),
        }
    }
}
