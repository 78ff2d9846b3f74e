//! Reflection geometry
//!
//! Householder reflections across planes in 3D. These realize the improper
//! group actions (mirror symmetries) acting on Euclidean space.

use crate::transform::E3;
use nalgebra::{Matrix3, Vector3};

/// Squared norm below which a plane normal is treated as degenerate
const DEGENERATE_NORM_SQ: f64 = 1e-24;

/// Householder reflection across the plane through the origin orthogonal to
/// `normal`
///
/// Computes `I - 2 a a^T / (a^T a)`. The result is orthogonal, symmetric and
/// involutory (`K * K == I`) with determinant -1.
///
/// # Panics
/// Panics if `normal` is (numerically) the zero vector.
pub fn reflect_matrix(normal: &Vector3<f64>) -> Matrix3<f64> {
    let norm_sq = normal.norm_squared();
    assert!(
        norm_sq > DEGENERATE_NORM_SQ,
        "reflection normal must be non-zero"
    );
    Matrix3::identity() - (normal * normal.transpose()) * (2.0 / norm_sq)
}

/// Full reflection transform about the plane with the given normal passing
/// through `point_in_plane`
///
/// The normal is normalized before computing the translation term
/// `t = 2 (p . n) n`, so the transform is an exact involution for non-unit
/// normals as well: applying it twice to any point returns the point.
///
/// # Panics
/// Panics if `normal` is (numerically) the zero vector.
pub fn reflection_transform(normal: &Vector3<f64>, point_in_plane: &Vector3<f64>) -> E3 {
    let k = reflect_matrix(normal);
    let n = normal / normal.norm();
    let t = n * (2.0 * point_in_plane.dot(&n));
    E3::from_parts(k, t)
}

/// Recover the (unit) plane normal from a Householder reflection matrix
///
/// Uses `(I - K) / 2 == n n^T`: the column of largest norm of that rank-one
/// matrix is parallel to the normal. The sign of the result is arbitrary
/// (both signs describe the same plane).
pub fn plane_normal(k: &Matrix3<f64>) -> Vector3<f64> {
    let nnt = (Matrix3::identity() - k) * 0.5;
    let mut best = nnt.column(0).into_owned();
    for j in 1..3 {
        let col = nnt.column(j).into_owned();
        if col.norm_squared() > best.norm_squared() {
            best = col;
        }
    }
    assert!(
        best.norm_squared() > DEGENERATE_NORM_SQ,
        "matrix is not a reflection"
    );
    best.normalize()
}
