//! E(3) - Euclidean group transforms
//!
//! This module provides a thin wrapper around a 3x3 orthogonal block plus a
//! translation. Unlike `nalgebra::Isometry3`, the orthogonal block may be
//! improper (determinant -1), which is required to represent the mirror
//! symmetries of a robot morphology.

use nalgebra::{Matrix3, Matrix4, Rotation3, UnitQuaternion, Vector3};
use std::ops::Mul;

/// A rigid or reflective spatial transform
///
/// Stored as an orthogonal 3x3 block (proper rotation or reflection) and a
/// translation. The equivalent homogeneous matrix always has `[0,0,0,1]` as
/// its last row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct E3 {
    /// Orthogonal block, determinant +1 (rotation) or -1 (reflection)
    pub rotation: Matrix3<f64>,
    /// Translation component
    pub translation: Vector3<f64>,
}

impl E3 {
    /// Create the identity transform
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Build a transform from an orthogonal block and a translation
    ///
    /// The caller is responsible for `rotation` being orthonormal; no
    /// validation is performed (results are meaningless otherwise).
    pub fn from_parts(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Build a transform with zero translation
    pub fn from_rotation(rotation: Matrix3<f64>) -> Self {
        Self::from_parts(rotation, Vector3::zeros())
    }

    /// The 4x4 homogeneous matrix `[[R, t], [0, 0, 0, 1]]`
    pub fn matrix(&self) -> Matrix4<f64> {
        let mut x = Matrix4::identity();
        x.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        x.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        x
    }

    /// Apply the transform to a point (rotation plus translation)
    pub fn transform_point(&self, p: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * p + self.translation
    }

    /// Apply the transform to a free vector (rotation only)
    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * v
    }

    /// True if the orthogonal block is improper (a reflection)
    pub fn is_reflection(&self) -> bool {
        self.rotation.determinant() < 0.0
    }

    /// Extract generalized coordinates: translation plus unit quaternion
    ///
    /// The quaternion is returned in (x, y, z, w) component order, the
    /// convention expected by physics backends for base configurations.
    /// Only valid for proper rotation blocks; calling this on a reflection
    /// is a caller bug.
    pub fn to_generalized_coords(&self) -> (Vector3<f64>, [f64; 4]) {
        (self.translation, quat_xyzw(&self.rotation))
    }
}

/// Composition: applies `rhs` first, then `self`
impl Mul for E3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            rotation: self.rotation * rhs.rotation,
            translation: self.rotation * rhs.translation + self.translation,
        }
    }
}

/// Convert a proper rotation matrix to a unit quaternion in (x, y, z, w) order
pub fn quat_xyzw(r: &Matrix3<f64>) -> [f64; 4] {
    let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*r));
    let c = q.coords;
    [c.x, c.y, c.z, c.w]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rot_z(angle: f64) -> Matrix3<f64> {
        *Rotation3::from_axis_angle(&Vector3::z_axis(), angle).matrix()
    }

    #[test]
    fn test_matrix_last_row() {
        let x = E3::from_parts(rot_z(0.7), Vector3::new(1.0, -2.0, 0.5)).matrix();
        assert_abs_diff_eq!(x[(3, 0)], 0.0);
        assert_abs_diff_eq!(x[(3, 1)], 0.0);
        assert_abs_diff_eq!(x[(3, 2)], 0.0);
        assert_abs_diff_eq!(x[(3, 3)], 1.0);
    }

    #[test]
    fn test_transform_point_matches_homogeneous_product() {
        let t = E3::from_parts(rot_z(0.3), Vector3::new(0.5, 1.5, -0.2));
        let p = Vector3::new(0.2, -0.7, 1.1);
        let hp = t.matrix() * p.push(1.0);
        let tp = t.transform_point(&p);

        assert_abs_diff_eq!(tp.x, hp.x, epsilon = 1e-12);
        assert_abs_diff_eq!(tp.y, hp.y, epsilon = 1e-12);
        assert_abs_diff_eq!(tp.z, hp.z, epsilon = 1e-12);
        assert_abs_diff_eq!(hp.w, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_generalized_coords_roundtrip() {
        // Extracted quaternion, converted back to a matrix, must match the
        // original rotation block, and the translation must be unchanged.
        let r = *Rotation3::from_euler_angles(0.2, -0.4, 1.1).matrix();
        let t = Vector3::new(0.3, -0.1, 0.9);
        let x = E3::from_parts(r, t);

        let (pos, [qx, qy, qz, qw]) = x.to_generalized_coords();
        assert_abs_diff_eq!(pos.x, t.x);
        assert_abs_diff_eq!(pos.y, t.y);
        assert_abs_diff_eq!(pos.z, t.z);

        let q = UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(qw, qx, qy, qz));
        let r_back = *q.to_rotation_matrix().matrix();
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(r_back[(i, j)], r[(i, j)], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_quat_xyzw_component_order() {
        // 180 degrees about z: quaternion (x, y, z, w) = (0, 0, 1, 0)
        let r = rot_z(std::f64::consts::PI);
        let [qx, qy, qz, qw] = quat_xyzw(&r);
        assert_abs_diff_eq!(qx, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(qy, 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!(qz.abs(), 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(qw, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_composition() {
        let a = E3::from_parts(rot_z(0.5), Vector3::new(1.0, 0.0, 0.0));
        let b = E3::from_parts(rot_z(-0.2), Vector3::new(0.0, 2.0, 0.0));
        let p = Vector3::new(0.4, 0.5, 0.6);

        let composed = (a * b).transform_point(&p);
        let sequential = a.transform_point(&b.transform_point(&p));

        assert_abs_diff_eq!(composed.x, sequential.x, epsilon = 1e-12);
        assert_abs_diff_eq!(composed.y, sequential.y, epsilon = 1e-12);
        assert_abs_diff_eq!(composed.z, sequential.z, epsilon = 1e-12);
    }

    #[test]
    fn test_is_reflection() {
        assert!(!E3::identity().is_reflection());
        let mirror = Matrix3::from_diagonal(&Vector3::new(-1.0, 1.0, 1.0));
        assert!(E3::from_rotation(mirror).is_reflection());
    }
}
