//! Symmetry-group presets for common legged morphologies
//!
//! These make the robot-specific group data explicit configuration instead
//! of scattered per-robot branching: a preset bundles the joint-space signed
//! permutations, the Euclidean reflections realizing them in space, and the
//! plane offsets used to lay the orbit out side by side in a scene.
//!
//! Joint ordering convention: legs in a fixed order, three joints per leg
//! (hip abduction/adduction, hip flexion/extension, knee). Quadruped legs
//! are ordered [FL, FR, HL, HR]; biped legs [L, R].

use crate::group::{GroupElement, SymmetryGroup};
use crate::reflection::reflect_matrix;
use crate::repr::Repr;
use nalgebra::{DMatrix, Matrix3, Vector3};

const JOINTS_PER_LEG: usize = 3;

/// Lift a per-leg permutation with per-joint signs to a sparse joint-space
/// representation: slot `i` of the result takes its value from leg
/// `src_legs[i]`.
fn joint_permutation(src_legs: &[usize], joint_signs: [f64; JOINTS_PER_LEG]) -> Repr {
    let n = src_legs.len() * JOINTS_PER_LEG;
    let mut perm = Vec::with_capacity(n);
    let mut signs = Vec::with_capacity(n);
    for &src in src_legs {
        for (j, &sign) in joint_signs.iter().enumerate() {
            perm.push(src * JOINTS_PER_LEG + j);
            signs.push(sign);
        }
    }
    Repr::signed_permutation(&perm, &signs)
}

/// Momentum representation induced by a Euclidean action: the linear part
/// transforms as a vector, the angular part as a pseudo-vector (an extra
/// `det(R)` factor under reflections).
fn momentum_rep(r: &Matrix3<f64>) -> Repr {
    let det = r.determinant();
    let mut m = DMatrix::zeros(6, 6);
    for i in 0..3 {
        for j in 0..3 {
            m[(i, j)] = r[(i, j)];
            m[(i + 3, j + 3)] = det * r[(i, j)];
        }
    }
    Repr::Dense(m)
}

fn element(
    src_legs: &[usize],
    joint_signs: [f64; JOINTS_PER_LEG],
    rho_e3: Matrix3<f64>,
    offset: Vector3<f64>,
) -> GroupElement {
    let rho_qj = joint_permutation(src_legs, joint_signs);
    let rho_x = rho_qj.direct_sum_with_self();
    GroupElement {
        rho_x,
        rho_y: momentum_rep(&rho_e3),
        rho_qj,
        rho_e3: rho_e3.into(),
        offset,
    }
}

/// Klein four-group of a Solo-like quadruped (12 joints)
///
/// Elements, in order: identity, sagittal reflection (left/right leg swap,
/// abduction sign flip), transversal reflection (front/hind leg swap,
/// flexion and knee sign flip), and their composition (a proper half-turn
/// about the vertical axis). `offset` spaces the transformed copies apart
/// in the scene, one plane width per reflection.
pub fn quadruped_klein_four(offset: f64) -> SymmetryGroup {
    let n_legs = 4;
    let sagittal = reflect_matrix(&Vector3::y());
    let transversal = reflect_matrix(&Vector3::x());

    let elements = vec![
        GroupElement::identity(2 * n_legs * JOINTS_PER_LEG, 6, n_legs * JOINTS_PER_LEG),
        element(
            &[1, 0, 3, 2],
            [-1.0, 1.0, 1.0],
            sagittal,
            Vector3::new(0.0, offset, 0.0),
        ),
        element(
            &[2, 3, 0, 1],
            [1.0, -1.0, -1.0],
            transversal,
            Vector3::new(offset, 0.0, 0.0),
        ),
        element(
            &[3, 2, 1, 0],
            [-1.0, -1.0, -1.0],
            transversal * sagittal,
            Vector3::new(offset, offset, 0.0),
        ),
    ];
    SymmetryGroup::new(elements)
}

/// C2 group of a Bolt-like biped (6 joints): identity plus the sagittal
/// reflection swapping the two legs.
pub fn biped_sagittal(offset: f64) -> SymmetryGroup {
    let n_legs = 2;
    let sagittal = reflect_matrix(&Vector3::y());

    let elements = vec![
        GroupElement::identity(2 * n_legs * JOINTS_PER_LEG, 6, n_legs * JOINTS_PER_LEG),
        element(
            &[1, 0],
            [-1.0, 1.0, 1.0],
            sagittal,
            Vector3::new(0.0, offset, 0.0),
        ),
    ];
    SymmetryGroup::new(elements)
}
