//! Small closed-form linear algebra helpers used by the frame conversions.
//!
//! These operate on scalar components rather than matrix types so that the
//! basis inversion in the brightness-frame transform can stay allocation
//! free and exactly reproducible.

/// Computes the determinant of a 2x2 matrix.
///
/// ```text
/// A = |a11 a12|
///     |a21 a22|
/// ```
pub fn det_2(a11: f64, a12: f64, a21: f64, a22: f64) -> f64 {
    a11 * a22 - a21 * a12
}

/// Computes the determinant of a 3x3 matrix by cofactor expansion along the
/// first row.
///
/// ```text
/// A = |a11 a12 a13|
///     |a21 a22 a23|
///     |a31 a32 a33|
/// ```
#[allow(clippy::too_many_arguments)]
pub fn det_3(
    a11: f64,
    a12: f64,
    a13: f64,
    a21: f64,
    a22: f64,
    a23: f64,
    a31: f64,
    a32: f64,
    a33: f64,
) -> f64 {
    a11 * det_2(a22, a23, a32, a33) - a12 * det_2(a21, a23, a31, a33)
        + a13 * det_2(a21, a22, a31, a32)
}

/// Computes the inverse of a 3x3 matrix by cofactor expansion, returned in
/// row-major order.
///
/// The result is non-finite when the determinant is zero. Callers are
/// expected to supply a non-degenerate matrix; the frame transform always
/// inverts an orthonormal triad, which satisfies this.
#[allow(clippy::too_many_arguments)]
pub fn inv_3(
    a11: f64,
    a12: f64,
    a13: f64,
    a21: f64,
    a22: f64,
    a23: f64,
    a31: f64,
    a32: f64,
    a33: f64,
) -> [f64; 9] {
    let c = 1.0 / det_3(a11, a12, a13, a21, a22, a23, a31, a32, a33);

    [
        c * det_2(a22, a23, a32, a33),
        c * det_2(a13, a12, a33, a32),
        c * det_2(a12, a13, a22, a23),
        c * det_2(a23, a21, a33, a31),
        c * det_2(a11, a13, a31, a33),
        c * det_2(a13, a11, a23, a21),
        c * det_2(a21, a22, a31, a32),
        c * det_2(a12, a11, a32, a31),
        c * det_2(a11, a12, a21, a22),
    ]
}

/// Rotates the point (x, y, z) about the x-axis by `theta` radians using the
/// right-hand rule.
pub fn rotate_x(theta: f64, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let (sin, cos) = theta.sin_cos();
    (x, cos * y - sin * z, sin * y + cos * z)
}

/// Rotates the point (x, y, z) about the y-axis by `theta` radians using the
/// right-hand rule.
pub fn rotate_y(theta: f64, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let (sin, cos) = theta.sin_cos();
    (cos * x + sin * z, y, -sin * x + cos * z)
}

/// Rotates the point (x, y, z) about the z-axis by `theta` radians using the
/// right-hand rule.
pub fn rotate_z(theta: f64, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let (sin, cos) = theta.sin_cos();
    (cos * x - sin * y, sin * x + cos * y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_det_2() {
        assert_abs_diff_eq!(det_2(1.0, 2.0, 3.0, 4.0), -2.0, epsilon = TOL);
        assert_abs_diff_eq!(det_2(1.0, 0.0, 0.0, 1.0), 1.0, epsilon = TOL);
    }

    #[test]
    fn test_det_3() {
        let det = det_3(2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 1.0);
        assert_abs_diff_eq!(det, 2.0, epsilon = TOL);

        // singular matrix, rows are linearly dependent
        let det = det_3(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 1.0, 1.0);
        assert_abs_diff_eq!(det, 0.0, epsilon = TOL);
    }

    #[test]
    fn test_inv_3_times_original_is_identity() {
        let a = [2.0, 0.0, 1.0, 1.0, 3.0, 2.0, 1.0, 1.0, 1.0];
        let inv = inv_3(a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7], a[8]);

        for row in 0..3 {
            for col in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += inv[3 * row + k] * a[3 * k + col];
                }
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(sum, expected, epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_inv_3_of_rotation_is_transpose() {
        let (s, c) = 0.7f64.sin_cos();
        // rotation about z by 0.7 rad
        let a = [c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0];
        let inv = inv_3(a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7], a[8]);

        for row in 0..3 {
            for col in 0..3 {
                assert_abs_diff_eq!(inv[3 * row + col], a[3 * col + row], epsilon = TOL);
            }
        }
    }

    #[test]
    fn test_rotations_map_axes() {
        let (x, y, z) = rotate_z(FRAC_PI_2, 1.0, 0.0, 0.0);
        assert_abs_diff_eq!(x, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(y, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(z, 0.0, epsilon = TOL);

        let (x, y, z) = rotate_x(FRAC_PI_2, 0.0, 1.0, 0.0);
        assert_abs_diff_eq!(x, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(y, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(z, 1.0, epsilon = TOL);

        let (x, y, z) = rotate_y(FRAC_PI_2, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(x, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(y, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(z, 0.0, epsilon = TOL);
    }

    #[test]
    fn test_rotation_preserves_norm() {
        let (x, y, z) = rotate_y(1.234, 0.3, -0.4, 0.5);
        let norm = (x * x + y * y + z * z).sqrt();
        let expected = (0.3f64 * 0.3 + 0.4 * 0.4 + 0.5 * 0.5).sqrt();
        assert_abs_diff_eq!(norm, expected, epsilon = TOL);
    }
}
