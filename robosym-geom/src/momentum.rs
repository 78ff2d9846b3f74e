//! Centroidal momentum models
//!
//! The orbit generator cross-checks the algebraically mapped momentum
//! `rho_y * y` against a momentum recomputed from a dynamics model at the
//! transformed state. The model is an external collaborator behind the
//! `MomentumModel` trait; `LinearMomentumModel` is the in-crate stand-in,
//! made exactly group-equivariant by Reynolds averaging so the cross-check
//! is meaningful without a full rigid-body dynamics backend.

use crate::group::SymmetryGroup;
use nalgebra::{DMatrix, DVector, Vector6};

/// A dynamics-model collaborator able to evaluate centroidal momentum
pub trait MomentumModel {
    /// Centroidal momentum `[l, k]` (linear then angular, base frame) at
    /// the given joint configuration and joint velocity.
    fn momentum(&self, q_js: &DVector<f64>, dq_js: &DVector<f64>) -> Vector6<f64>;
}

/// Momentum as a fixed linear map of the state vector: `h = A [q, dq]`
#[derive(Debug, Clone)]
pub struct LinearMomentumModel {
    a: DMatrix<f64>,
}

impl LinearMomentumModel {
    /// Wrap a 6 x state_dim coefficient matrix
    ///
    /// # Panics
    /// Panics unless `a` has 6 rows and an even number of columns.
    pub fn new(a: DMatrix<f64>) -> Self {
        assert_eq!(a.nrows(), 6, "momentum has 6 components");
        assert_eq!(a.ncols() % 2, 0, "state concatenates q and dq");
        Self { a }
    }

    /// Build an exactly equivariant model by group-averaging `a`
    ///
    /// Applies the Reynolds operator `A -> 1/|G| sum_g rho_y(g)^-1 A rho_x(g)`.
    /// The result satisfies `rho_y(g) A = A rho_x(g)` for every element, so
    /// momenta computed at symmetric states are themselves symmetric.
    ///
    /// # Panics
    /// Panics on a dimension mismatch with the group, or if some `rho_y` is
    /// singular (group representations are invertible by definition).
    pub fn symmetrized(a: DMatrix<f64>, group: &SymmetryGroup) -> Self {
        assert_eq!(a.nrows(), 6, "momentum has 6 components");
        assert_eq!(
            a.ncols(),
            group.state_dim(),
            "coefficient matrix must match the group's state dimension"
        );

        let mut acc = DMatrix::zeros(6, a.ncols());
        for g in group.elements() {
            let rho_y_inv = g
                .rho_y
                .to_dense()
                .try_inverse()
                .expect("output representation must be invertible");
            acc += rho_y_inv * &a * g.rho_x.to_dense();
        }
        Self::new(acc / group.order() as f64)
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.a
    }
}

impl MomentumModel for LinearMomentumModel {
    fn momentum(&self, q_js: &DVector<f64>, dq_js: &DVector<f64>) -> Vector6<f64> {
        assert_eq!(
            q_js.len() + dq_js.len(),
            self.a.ncols(),
            "joint state does not match the model dimension"
        );
        let mut x = DVector::zeros(self.a.ncols());
        x.rows_mut(0, q_js.len()).copy_from(q_js);
        x.rows_mut(q_js.len(), dq_js.len()).copy_from(dq_js);
        let h = &self.a * x;
        Vector6::from_column_slice(h.as_slice())
    }
}
