//! Symmetry-orbit generation
//!
//! Applies every element of a finite symmetry group to a base robot sample
//! (joint state, base pose, centroidal momentum, contact forces) and emits
//! one transformed copy per element. Entry 0 is always the untouched base
//! sample under the identity action.

use crate::group::SymmetryGroup;
use crate::momentum::MomentumModel;
use crate::transform::E3;
use nalgebra::{DVector, Vector3, Vector6};

/// A contact force together with its point of application, world frame
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub force: Vector3<f64>,
    pub point: Vector3<f64>,
}

/// The base sample an orbit is generated from
#[derive(Debug, Clone)]
pub struct BaseSample {
    /// State vector `x = [q_js, dq_js]` (joint coordinates and velocities)
    pub x: DVector<f64>,
    /// World pose of the floating base
    pub base_pose: E3,
    /// Centroidal momentum `[l, k]` in base coordinates
    pub momentum: Vector6<f64>,
    /// Ground-reaction forces and their application points
    pub contacts: Vec<Contact>,
}

impl BaseSample {
    /// Split the state vector into joint positions and joint velocities
    ///
    /// # Panics
    /// Panics if the state vector has odd length.
    pub fn joint_state(&self) -> (DVector<f64>, DVector<f64>) {
        split_state(&self.x)
    }
}

/// One entry of an orbit: the base sample pushed through a group element
#[derive(Debug, Clone)]
pub struct OrbitSample {
    /// Transformed state vector `rho_x * x`
    pub x: DVector<f64>,
    /// Transformed base pose
    pub base_pose: E3,
    /// Algebraically mapped momentum `rho_y * y`
    pub momentum: Vector6<f64>,
    /// Momentum recomputed from the dynamics model at the transformed
    /// state, when a model was supplied
    pub momentum_model: Option<Vector6<f64>>,
    /// Transformed contact forces and application points
    pub contacts: Vec<Contact>,
    /// The spatial group transform `X_g` that produced this entry
    pub transform: E3,
}

impl OrbitSample {
    /// Split the transformed state into joint positions and velocities
    pub fn joint_state(&self) -> (DVector<f64>, DVector<f64>) {
        split_state(&self.x)
    }
}

/// The full orbit of a base sample under a symmetry group
#[derive(Debug, Clone)]
pub struct Orbit {
    samples: Vec<OrbitSample>,
}

impl Orbit {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[OrbitSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrbitSample> {
        self.samples.iter()
    }
}

impl std::ops::Index<usize> for Orbit {
    type Output = OrbitSample;

    fn index(&self, i: usize) -> &OrbitSample {
        &self.samples[i]
    }
}

fn split_state(x: &DVector<f64>) -> (DVector<f64>, DVector<f64>) {
    assert_eq!(x.len() % 2, 0, "state vector concatenates q and dq");
    let half = x.len() / 2;
    (
        x.rows(0, half).into_owned(),
        x.rows(half, half).into_owned(),
    )
}

fn as_dvector(v: &Vector6<f64>) -> DVector<f64> {
    DVector::from_column_slice(v.as_slice())
}

/// Generate the orbit of `base` under `group`
///
/// Entry 0 is the base sample itself with the identity transform attached.
/// For every subsequent element `g`:
/// - the state vector is mapped by `rho_x` (a pure linear map on the chosen
///   state parameterization, not a spatial transform),
/// - the momentum is mapped by `rho_y`,
/// - the base pose rotation becomes `R_g * R_B * R_g` and its translation is
///   carried by the full spatial transform `X_g`,
/// - forces rotate by `R_g` alone, application points map through `X_g` as
///   affine points.
///
/// When `model` is supplied, every entry additionally carries the momentum
/// re-evaluated at the transformed joint state, so the linear map can be
/// cross-checked against the dynamics model.
///
/// # Panics
/// Panics if `base.x` does not match the group's state dimension, has odd
/// length, or if the group's output representation is not 6-dimensional.
pub fn generate_orbit(
    base: &BaseSample,
    group: &SymmetryGroup,
    model: Option<&dyn MomentumModel>,
) -> Orbit {
    assert_eq!(
        base.x.len(),
        group.state_dim(),
        "state vector does not match the group's state dimension"
    );
    assert_eq!(base.x.len() % 2, 0, "state vector concatenates q and dq");
    assert_eq!(
        group.momentum_dim(),
        6,
        "momentum representation must act on [l, k]"
    );

    let mut samples = Vec::with_capacity(group.order());

    let base_model = model.map(|m| {
        let (q, dq) = base.joint_state();
        m.momentum(&q, &dq)
    });
    samples.push(OrbitSample {
        x: base.x.clone(),
        base_pose: base.base_pose,
        momentum: base.momentum,
        momentum_model: base_model,
        contacts: base.contacts.clone(),
        transform: E3::identity(),
    });

    for g in group.elements().iter().skip(1) {
        let x_g = g.spatial_transform();
        let r_g = x_g.rotation;

        let gx = g.rho_x.apply(&base.x);
        let gy = g.rho_y.apply(&as_dvector(&base.momentum));

        // Base orientation follows the R_g * R_B * R_g convention (see the
        // conjugation note in the tests below); the base position maps as a
        // point through X_g.
        let g_pose = E3::from_parts(
            r_g * base.base_pose.rotation * r_g,
            x_g.transform_point(&base.base_pose.translation),
        );

        let contacts = base
            .contacts
            .iter()
            .map(|c| Contact {
                force: r_g * c.force,
                point: x_g.transform_point(&c.point),
            })
            .collect();

        let momentum_model = model.map(|m| {
            let (gq, gdq) = split_state(&gx);
            m.momentum(&gq, &gdq)
        });

        samples.push(OrbitSample {
            x: gx,
            base_pose: g_pose,
            momentum: Vector6::from_column_slice(gy.as_slice()),
            momentum_model,
            contacts,
            transform: x_g,
        });
    }

    Orbit { samples }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::GroupElement;
    use crate::momentum::LinearMomentumModel;
    use crate::presets::{biped_sagittal, quadruped_klein_four};
    use crate::reflection::reflect_matrix;
    use crate::repr::Repr;
    use approx::assert_abs_diff_eq;
    use nalgebra::{DMatrix, Matrix3, Rotation3};

    fn quadruped_base() -> BaseSample {
        let q = [
            0.1, 1.65, -1.9, // FL
            -0.45, 0.7, -1.0, // FR
            0.35, 0.7, -1.0, // HL
            -0.2, 1.8, -1.6, // HR
        ];
        let dq = [
            0.2, -0.1, 0.3, 0.0, 0.5, -0.4, 0.1, 0.1, -0.2, -0.3, 0.0, 0.2,
        ];
        let x = DVector::from_iterator(24, q.iter().chain(dq.iter()).copied());
        let base_pose = E3::from_parts(
            *Rotation3::from_euler_angles(-0.17, -0.09, -0.09).matrix(),
            Vector3::new(0.0, 0.0, 0.35),
        );
        BaseSample {
            x,
            base_pose,
            momentum: Vector6::new(0.1, 0.1, 0.0, 0.0, -0.2, -0.2),
            contacts: vec![
                Contact {
                    force: Vector3::new(0.1, -0.1, 0.1),
                    point: Vector3::new(0.2, 0.15, 0.0),
                },
                Contact {
                    force: Vector3::new(-0.1, 0.1, 0.15),
                    point: Vector3::new(-0.2, -0.15, 0.0),
                },
            ],
        }
    }

    /// A 2-element group reflecting about the y-z plane, acting trivially
    /// on a 2-dimensional state.
    fn yz_mirror_group() -> SymmetryGroup {
        let mirror = reflect_matrix(&Vector3::x());
        let mut rho_y = DMatrix::zeros(6, 6);
        let det = mirror.determinant();
        for i in 0..3 {
            for j in 0..3 {
                rho_y[(i, j)] = mirror[(i, j)];
                rho_y[(i + 3, j + 3)] = det * mirror[(i, j)];
            }
        }
        let reflected = GroupElement {
            rho_x: Repr::identity(2),
            rho_y: Repr::Dense(rho_y),
            rho_qj: Repr::identity(1),
            rho_e3: mirror.into(),
            offset: Vector3::zeros(),
        };
        SymmetryGroup::new(vec![GroupElement::identity(2, 6, 1), reflected])
    }

    #[test]
    fn test_orbit_length_and_identity_entry() {
        let group = quadruped_klein_four(1.5);
        let base = quadruped_base();
        let orbit = generate_orbit(&base, &group, None);

        assert_eq!(orbit.len(), group.order());
        let first = &orbit[0];
        for i in 0..24 {
            assert_abs_diff_eq!(first.x[i], base.x[i]);
        }
        assert_eq!(first.base_pose, base.base_pose);
        assert!(!first.transform.is_reflection());
        assert_abs_diff_eq!(first.transform.translation.norm(), 0.0);
        assert!(first.momentum_model.is_none());
    }

    #[test]
    fn test_sagittal_force_sign_flip() {
        // Reflection about the y-z plane: the force x-component flips,
        // y and z are unchanged.
        let group = yz_mirror_group();
        let base = BaseSample {
            x: DVector::zeros(2),
            base_pose: E3::identity(),
            momentum: Vector6::zeros(),
            contacts: vec![Contact {
                force: Vector3::new(0.1, -0.1, 0.1),
                point: Vector3::new(0.3, 0.1, 0.0),
            }],
        };
        let orbit = generate_orbit(&base, &group, None);
        let f = orbit[1].contacts[0].force;
        assert_abs_diff_eq!(f.x, -0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(f.y, -0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(f.z, 0.1, epsilon = 1e-12);

        let p = orbit[1].contacts[0].point;
        assert_abs_diff_eq!(p.x, -0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_contact_moment_transforms_consistently() {
        // A transformed force still acts at its transformed application
        // point: the moment about the origin maps as a pseudo-vector,
        // r' x f' = det(R) R (r x f) for zero-offset elements.
        let group = yz_mirror_group();
        let r = Vector3::new(0.3, 0.1, 0.05);
        let f = Vector3::new(0.1, -0.1, 0.1);
        let base = BaseSample {
            x: DVector::zeros(2),
            base_pose: E3::identity(),
            momentum: Vector6::zeros(),
            contacts: vec![Contact { force: f, point: r }],
        };
        let orbit = generate_orbit(&base, &group, None);
        let c = &orbit[1].contacts[0];
        let moment = c.point.cross(&c.force);

        let mirror = reflect_matrix(&Vector3::x());
        let expected = mirror * r.cross(&f) * mirror.determinant();
        assert_abs_diff_eq!(moment.x, expected.x, epsilon = 1e-12);
        assert_abs_diff_eq!(moment.y, expected.y, epsilon = 1e-12);
        assert_abs_diff_eq!(moment.z, expected.z, epsilon = 1e-12);
    }

    #[test]
    fn test_base_rotation_convention() {
        // The base orientation is mapped as R_g * R_B * R_g, with the same
        // matrix on both sides. For the involutory reflections used here
        // this coincides with conjugation R_g * R_B * R_g^-1; for a proper
        // non-involutory R_g the two differ, so this convention is only
        // exercised (and only known valid) for involutory group actions.
        let group = quadruped_klein_four(1.5);
        let base = quadruped_base();
        let orbit = generate_orbit(&base, &group, None);

        for (g, sample) in group.elements().iter().zip(orbit.iter()).skip(1) {
            let r_g = g.rho_e3.to_matrix3();
            let expected = r_g * base.base_pose.rotation * r_g;
            for i in 0..3 {
                for j in 0..3 {
                    assert_abs_diff_eq!(
                        sample.base_pose.rotation[(i, j)],
                        expected[(i, j)],
                        epsilon = 1e-12
                    );
                }
            }
            // Transformed orientations stay orthonormal
            let rrt = sample.base_pose.rotation * sample.base_pose.rotation.transpose();
            let err = (rrt - Matrix3::identity()).abs().max();
            assert!(err < 1e-12);
        }
    }

    #[test]
    fn test_base_translation_through_spatial_transform() {
        let group = quadruped_klein_four(1.5);
        let base = quadruped_base();
        let orbit = generate_orbit(&base, &group, None);

        let sagittal = &orbit[1];
        let expected = sagittal
            .transform
            .transform_point(&base.base_pose.translation);
        assert_abs_diff_eq!(sagittal.base_pose.translation.x, expected.x, epsilon = 1e-12);
        assert_abs_diff_eq!(sagittal.base_pose.translation.y, expected.y, epsilon = 1e-12);
        assert_abs_diff_eq!(sagittal.base_pose.translation.z, expected.z, epsilon = 1e-12);
    }

    #[test]
    fn test_momentum_crosscheck_against_model() {
        // The core property the whole crate exists to demonstrate: for an
        // equivariant dynamics model, the algebraically mapped momentum
        // rho_y * y equals the momentum recomputed at the transformed state.
        let group = quadruped_klein_four(1.5);
        let a = DMatrix::from_fn(6, 24, |i, j| ((i * 13 + j * 5 + 3) as f64 * 0.377).cos());
        let model = LinearMomentumModel::symmetrized(a, &group);

        let mut base = quadruped_base();
        let (q, dq) = base.joint_state();
        base.momentum = model.momentum(&q, &dq);

        let orbit = generate_orbit(&base, &group, Some(&model));
        for sample in orbit.iter() {
            let recomputed = sample.momentum_model.expect("model was supplied");
            for i in 0..6 {
                assert_abs_diff_eq!(sample.momentum[i], recomputed[i], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_biped_orbit() {
        let group = biped_sagittal(1.0);
        let x = DVector::from_fn(12, |i, _| 0.1 * i as f64 - 0.5);
        let base = BaseSample {
            x,
            base_pose: E3::from_parts(Matrix3::identity(), Vector3::new(0.0, 0.0, 0.45)),
            momentum: Vector6::new(0.1, 0.0, 0.0, 0.0, 0.1, 0.0),
            contacts: vec![],
        };
        let orbit = generate_orbit(&base, &group, None);
        assert_eq!(orbit.len(), 2);
        // The sagittal copy sits one offset away along y
        assert_abs_diff_eq!(orbit[1].base_pose.translation.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "state dimension")]
    fn test_state_dimension_mismatch_panics() {
        let group = quadruped_klein_four(1.5);
        let base = BaseSample {
            x: DVector::zeros(10),
            base_pose: E3::identity(),
            momentum: Vector6::zeros(),
            contacts: vec![],
        };
        generate_orbit(&base, &group, None);
    }
}
