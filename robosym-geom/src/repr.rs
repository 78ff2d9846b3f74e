//! Linear group representations
//!
//! A representation matrix may arrive densely (small Euclidean or momentum
//! actions) or sparsely (signed permutations on joint space are >90% zeros).
//! `Repr` is the typed sum over both backings: the orbit algorithm only ever
//! asks it to be applied or densified, never which backing it holds.

use nalgebra::{DMatrix, DVector, Matrix3};
use sprs::{CsMat, TriMat};

/// A linear operator applicable via multiplication, dense or sparse
#[derive(Debug, Clone)]
pub enum Repr {
    Dense(DMatrix<f64>),
    Sparse(CsMat<f64>),
}

impl Repr {
    /// The identity representation of dimension `n`
    pub fn identity(n: usize) -> Self {
        Repr::Sparse(CsMat::eye(n))
    }

    /// Build a sparse signed permutation: `y[i] = signs[i] * x[perm[i]]`
    ///
    /// # Panics
    /// Panics if `perm` and `signs` differ in length or `perm` contains an
    /// out-of-range index.
    pub fn signed_permutation(perm: &[usize], signs: &[f64]) -> Self {
        assert_eq!(
            perm.len(),
            signs.len(),
            "permutation and sign vectors must be aligned"
        );
        let n = perm.len();
        let mut tri = TriMat::new((n, n));
        for (row, (&col, &sign)) in perm.iter().zip(signs.iter()).enumerate() {
            assert!(col < n, "permutation index {} out of range", col);
            tri.add_triplet(row, col, sign);
        }
        Repr::Sparse(tri.to_csr())
    }

    /// Direct sum `self ⊕ self`: block-diagonal with two copies
    ///
    /// Used to lift a joint-space action to the state vector `x = [q, dq]`,
    /// where position and velocity coordinates transform identically.
    pub fn direct_sum_with_self(&self) -> Self {
        let (rows, cols) = self.dims();
        match self {
            Repr::Dense(m) => {
                let mut out = DMatrix::zeros(2 * rows, 2 * cols);
                out.view_mut((0, 0), (rows, cols)).copy_from(m);
                out.view_mut((rows, cols), (rows, cols)).copy_from(m);
                Repr::Dense(out)
            }
            Repr::Sparse(m) => {
                let mut tri = TriMat::new((2 * rows, 2 * cols));
                for (&val, (r, c)) in m.iter() {
                    tri.add_triplet(r, c, val);
                    tri.add_triplet(r + rows, c + cols, val);
                }
                Repr::Sparse(tri.to_csr())
            }
        }
    }

    /// (rows, cols) of the underlying matrix
    pub fn dims(&self) -> (usize, usize) {
        match self {
            Repr::Dense(m) => (m.nrows(), m.ncols()),
            Repr::Sparse(m) => (m.rows(), m.cols()),
        }
    }

    /// Apply the operator to a vector
    ///
    /// # Panics
    /// Panics on a dimension mismatch.
    pub fn apply(&self, x: &DVector<f64>) -> DVector<f64> {
        let (rows, cols) = self.dims();
        assert_eq!(
            cols,
            x.len(),
            "representation is {}x{} but vector has length {}",
            rows,
            cols,
            x.len()
        );
        match self {
            Repr::Dense(m) => m * x,
            Repr::Sparse(m) => {
                let mut y = DVector::zeros(rows);
                if m.is_csr() {
                    // outer_iterator walks rows of a CSR matrix
                    for (row, lane) in m.outer_iterator().enumerate() {
                        let mut acc = 0.0;
                        for (col, &val) in lane.iter() {
                            acc += val * x[col];
                        }
                        y[row] = acc;
                    }
                } else {
                    // CSC: outer_iterator walks columns, scatter into y
                    for (col, lane) in m.outer_iterator().enumerate() {
                        let x_col = x[col];
                        for (row, &val) in lane.iter() {
                            y[row] += val * x_col;
                        }
                    }
                }
                y
            }
        }
    }

    /// Densify into a `DMatrix`
    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Repr::Dense(m) => m.clone(),
            Repr::Sparse(m) => {
                let mut d = DMatrix::zeros(m.rows(), m.cols());
                for (&val, (r, c)) in m.iter() {
                    d[(r, c)] = val;
                }
                d
            }
        }
    }

    /// Densify into a 3x3 matrix (Euclidean-space actions)
    ///
    /// # Panics
    /// Panics unless the representation is 3x3.
    pub fn to_matrix3(&self) -> Matrix3<f64> {
        assert_eq!(self.dims(), (3, 3), "Euclidean representation must be 3x3");
        let d = self.to_dense();
        Matrix3::from_fn(|r, c| d[(r, c)])
    }
}

impl From<DMatrix<f64>> for Repr {
    fn from(m: DMatrix<f64>) -> Self {
        Repr::Dense(m)
    }
}

impl From<Matrix3<f64>> for Repr {
    fn from(m: Matrix3<f64>) -> Self {
        Repr::Dense(DMatrix::from_fn(3, 3, |r, c| m[(r, c)]))
    }
}

impl From<CsMat<f64>> for Repr {
    fn from(m: CsMat<f64>) -> Self {
        Repr::Sparse(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_apply() {
        let id = Repr::identity(4);
        let x = DVector::from_vec(vec![1.0, -2.0, 3.0, 0.5]);
        let y = id.apply(&x);
        for i in 0..4 {
            assert_abs_diff_eq!(y[i], x[i]);
        }
    }

    #[test]
    fn test_sparse_matches_dense_apply() {
        let perm = [2usize, 0, 3, 1];
        let signs = [1.0, -1.0, 1.0, -1.0];
        let sparse = Repr::signed_permutation(&perm, &signs);
        let dense = Repr::Dense(sparse.to_dense());

        let x = DVector::from_vec(vec![0.3, -0.7, 1.2, 2.5]);
        let ys = sparse.apply(&x);
        let yd = dense.apply(&x);
        for i in 0..4 {
            assert_abs_diff_eq!(ys[i], yd[i], epsilon = 1e-15);
        }
        // Spot-check the permutation semantics
        assert_abs_diff_eq!(ys[0], x[2]);
        assert_abs_diff_eq!(ys[1], -x[0]);
    }

    #[test]
    fn test_csc_apply_matches_csr() {
        let perm = [1usize, 0, 2];
        let signs = [-1.0, 1.0, 1.0];
        let csr = match Repr::signed_permutation(&perm, &signs) {
            Repr::Sparse(m) => m,
            Repr::Dense(_) => unreachable!(),
        };
        let csc = Repr::Sparse(csr.to_csc());
        let csr = Repr::Sparse(csr);

        let x = DVector::from_vec(vec![2.0, 3.0, 5.0]);
        let a = csr.apply(&x);
        let b = csc.apply(&x);
        for i in 0..3 {
            assert_abs_diff_eq!(a[i], b[i]);
        }
    }

    #[test]
    fn test_direct_sum_with_self() {
        let r = Repr::signed_permutation(&[1, 0], &[1.0, -1.0]);
        let lifted = r.direct_sum_with_self();
        assert_eq!(lifted.dims(), (4, 4));

        let x = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let y = lifted.apply(&x);
        // Both halves transform identically
        assert_abs_diff_eq!(y[0], 2.0);
        assert_abs_diff_eq!(y[1], -1.0);
        assert_abs_diff_eq!(y[2], 4.0);
        assert_abs_diff_eq!(y[3], -3.0);
    }

    #[test]
    #[should_panic(expected = "length")]
    fn test_apply_dimension_mismatch_panics() {
        let r = Repr::identity(3);
        r.apply(&DVector::from_vec(vec![1.0, 2.0]));
    }

    #[test]
    fn test_to_matrix3() {
        let mirror = Matrix3::from_diagonal(&nalgebra::Vector3::new(-1.0, 1.0, 1.0));
        let r: Repr = mirror.into();
        let back = r.to_matrix3();
        assert_abs_diff_eq!(back[(0, 0)], -1.0);
        assert_abs_diff_eq!(back[(1, 1)], 1.0);
    }
}
