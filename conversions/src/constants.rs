//! Physical constants shared by the brightness calculations.

pub const SPEED_OF_LIGHT: f64 = 3.0e8; // meters / second
pub const WAVELENGTH: f64 = 532e-9; // meters, photometric reference wavelength
pub const EARTH_RADIUS: f64 = 6378e3; // meters
pub const SUN_INTENSITY: f64 = 1360.0; // watts / meter^2
pub const AB_ZERO_POINT_FLUX: f64 = 3631e-26; // watts / meter^2 / hertz
pub const AB_MAG_CLIP_FLOOR: f64 = 1e-5; // dimensionless floor on the log argument
