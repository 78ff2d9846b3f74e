//! robosym-viz: Rerun visualization of legged-robot symmetry orbits
//!
//! Consumes orbits produced by `robosym-geom` and draws them side by side in
//! a Rerun scene: robot stick figures, base frames, centroidal-momentum
//! arrows (both the group-mapped and the model-recomputed values), contact
//! forces with their pads, and the mirror planes of the reflective group
//! elements. See `examples/klein_four_demo.rs` for a runnable scene.

pub mod scene;
pub mod skeleton;

pub use scene::{log_frame_triad, log_orbit_scene, log_reflection_plane, log_vector};
pub use skeleton::Skeleton;
