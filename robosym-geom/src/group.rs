//! Finite symmetry groups acting on robot state and Euclidean space
//!
//! Each group element carries one linear representation per vector space it
//! acts on (state, momentum, joint space, Euclidean space) plus an offset
//! that places its mirror plane or rotation axis in the scene.

use crate::repr::Repr;
use crate::transform::E3;
use nalgebra::Vector3;

/// One symmetry transformation of a finite group
#[derive(Debug, Clone)]
pub struct GroupElement {
    /// Action on the full state vector `x = [q, dq]`
    pub rho_x: Repr,
    /// Action on the momentum/output vector `y = [l, k]`
    pub rho_y: Repr,
    /// Action on joint space
    pub rho_qj: Repr,
    /// Orthogonal action on Euclidean space, possibly a reflection
    pub rho_e3: Repr,
    /// Euclidean offset placing the element's plane/axis in space
    pub offset: Vector3<f64>,
}

impl GroupElement {
    /// The identity element for the given dimensions
    pub fn identity(state_dim: usize, momentum_dim: usize, joint_dim: usize) -> Self {
        Self {
            rho_x: Repr::identity(state_dim),
            rho_y: Repr::identity(momentum_dim),
            rho_qj: Repr::identity(joint_dim),
            rho_e3: Repr::identity(3),
            offset: Vector3::zeros(),
        }
    }

    /// The spatial transform `X_g` of this element: its Euclidean action
    /// placed at its offset
    pub fn spatial_transform(&self) -> E3 {
        E3::from_parts(self.rho_e3.to_matrix3(), self.offset)
    }
}

/// An ordered finite symmetry group, identity first
#[derive(Debug, Clone)]
pub struct SymmetryGroup {
    elements: Vec<GroupElement>,
}

impl SymmetryGroup {
    /// Build a group from an ordered element list
    ///
    /// # Panics
    /// Panics if the list is empty, if the first element is not the
    /// identity on Euclidean space, or if the representations of any two
    /// elements disagree in dimension (misaligned inputs are a caller bug,
    /// not a recoverable condition).
    pub fn new(elements: Vec<GroupElement>) -> Self {
        assert!(!elements.is_empty(), "a group has at least the identity");

        let first = &elements[0];
        let e3 = first.rho_e3.to_matrix3();
        let id_err = (e3 - nalgebra::Matrix3::identity()).abs().max();
        assert!(
            id_err < 1e-12 && first.offset.norm() < 1e-12,
            "the first group element must be the identity"
        );

        let x_dims = first.rho_x.dims();
        let y_dims = first.rho_y.dims();
        let qj_dims = first.rho_qj.dims();
        for (i, g) in elements.iter().enumerate() {
            assert_eq!(
                g.rho_x.dims(),
                x_dims,
                "element {}: state representation dimension mismatch",
                i
            );
            assert_eq!(
                g.rho_y.dims(),
                y_dims,
                "element {}: output representation dimension mismatch",
                i
            );
            assert_eq!(
                g.rho_qj.dims(),
                qj_dims,
                "element {}: joint representation dimension mismatch",
                i
            );
            assert_eq!(g.rho_e3.dims(), (3, 3), "element {}: rho_e3 must be 3x3", i);
        }

        Self { elements }
    }

    /// Number of group elements (including the identity)
    pub fn order(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[GroupElement] {
        &self.elements
    }

    /// Dimension of the state vector the group acts on
    pub fn state_dim(&self) -> usize {
        self.elements[0].rho_x.dims().1
    }

    /// Dimension of the momentum/output vector the group acts on
    pub fn momentum_dim(&self) -> usize {
        self.elements[0].rho_y.dims().1
    }

    /// Dimension of joint space
    pub fn joint_dim(&self) -> usize {
        self.elements[0].rho_qj.dims().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_group() {
        let g = SymmetryGroup::new(vec![GroupElement::identity(24, 6, 12)]);
        assert_eq!(g.order(), 1);
        assert_eq!(g.state_dim(), 24);
        assert_eq!(g.momentum_dim(), 6);
        assert_eq!(g.joint_dim(), 12);
    }

    #[test]
    #[should_panic(expected = "identity")]
    fn test_first_element_must_be_identity() {
        let mut e = GroupElement::identity(4, 6, 2);
        e.offset = Vector3::new(1.0, 0.0, 0.0);
        SymmetryGroup::new(vec![e]);
    }

    #[test]
    #[should_panic(expected = "mismatch")]
    fn test_misaligned_dimensions_panic() {
        let id = GroupElement::identity(4, 6, 2);
        let mut other = GroupElement::identity(4, 6, 2);
        other.rho_x = Repr::identity(6);
        SymmetryGroup::new(vec![id, other]);
    }

    #[test]
    fn test_spatial_transform_identity() {
        let id = GroupElement::identity(4, 6, 2);
        let x = id.spatial_transform();
        assert!(!x.is_reflection());
        assert_eq!(x.translation, Vector3::zeros());
    }
}
