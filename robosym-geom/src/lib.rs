//! robosym-geom: geometric core for morphological-symmetry visualization
//!
//! This crate implements the numerical-geometry layer used to generate the
//! symmetry orbit of a legged robot's state: Householder reflections,
//! E(3) transforms (proper and improper), linear group representations with
//! dense or sparse backing, and the orbit generator that applies every
//! element of a finite symmetry group to a base state, its centroidal
//! momentum and its contact forces.

pub mod group;
pub mod momentum;
pub mod orbit;
pub mod presets;
pub mod reflection;
pub mod repr;
pub mod transform;

// Re-export key types
pub use group::{GroupElement, SymmetryGroup};
pub use momentum::{LinearMomentumModel, MomentumModel};
pub use orbit::{generate_orbit, BaseSample, Contact, Orbit, OrbitSample};
pub use reflection::{plane_normal, reflect_matrix, reflection_transform};
pub use repr::Repr;
pub use transform::E3;

// Re-export nalgebra for convenience
pub use nalgebra;
