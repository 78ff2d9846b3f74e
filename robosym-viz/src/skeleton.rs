//! Simple kinematic skeletons for scene drawing
//!
//! The scene does not load robot meshes; each robot copy in the orbit is
//! drawn as a stick figure computed from the base pose and the joint
//! vector: a torso box outline plus one hip-knee-foot strip per leg.
//! Leg layout follows the joint ordering of the group presets (three
//! joints per leg: hip abduction about the leg's x axis, hip flexion and
//! knee about y).

use nalgebra::{DVector, Rotation3, Vector3};
use robosym_geom::E3;

/// Kinematic description of a stick-figure legged robot
#[derive(Debug, Clone)]
pub struct Skeleton {
    /// Hip positions in the base frame, in preset leg order
    pub hip_offsets: Vec<Vector3<f64>>,
    /// Upper (thigh) link length
    pub upper_len: f64,
    /// Lower (shank) link length
    pub lower_len: f64,
}

impl Skeleton {
    /// Solo-like quadruped: legs in [FL, FR, HL, HR] order
    pub fn quadruped() -> Self {
        Self {
            hip_offsets: vec![
                Vector3::new(0.19, 0.1, 0.0),   // FL
                Vector3::new(0.19, -0.1, 0.0),  // FR
                Vector3::new(-0.19, 0.1, 0.0),  // HL
                Vector3::new(-0.19, -0.1, 0.0), // HR
            ],
            upper_len: 0.16,
            lower_len: 0.16,
        }
    }

    /// Bolt-like biped: legs in [L, R] order
    pub fn biped() -> Self {
        Self {
            hip_offsets: vec![Vector3::new(0.0, 0.07, 0.0), Vector3::new(0.0, -0.07, 0.0)],
            upper_len: 0.2,
            lower_len: 0.2,
        }
    }

    pub fn n_legs(&self) -> usize {
        self.hip_offsets.len()
    }

    pub fn n_joints(&self) -> usize {
        3 * self.n_legs()
    }

    /// Per-leg strips of world-frame points: hip, knee, foot
    ///
    /// # Panics
    /// Panics if `q_js` does not have three entries per leg.
    pub fn leg_strips(&self, base: &E3, q_js: &DVector<f64>) -> Vec<[Vector3<f64>; 3]> {
        assert_eq!(
            q_js.len(),
            self.n_joints(),
            "joint vector does not match the skeleton layout"
        );

        self.hip_offsets
            .iter()
            .enumerate()
            .map(|(leg, hip)| {
                let q_aa = q_js[3 * leg];
                let q_fe = q_js[3 * leg + 1];
                let q_knee = q_js[3 * leg + 2];

                let r_hip = Rotation3::from_axis_angle(&Vector3::x_axis(), q_aa)
                    * Rotation3::from_axis_angle(&Vector3::y_axis(), q_fe);
                let knee = hip + r_hip * Vector3::new(0.0, 0.0, -self.upper_len);
                let r_knee = r_hip * Rotation3::from_axis_angle(&Vector3::y_axis(), q_knee);
                let foot = knee + r_knee * Vector3::new(0.0, 0.0, -self.lower_len);

                [
                    base.transform_point(hip),
                    base.transform_point(&knee),
                    base.transform_point(&foot),
                ]
            })
            .collect()
    }

    /// World-frame foot positions, one per leg
    pub fn foot_positions(&self, base: &E3, q_js: &DVector<f64>) -> Vec<Vector3<f64>> {
        self.leg_strips(base, q_js)
            .iter()
            .map(|strip| strip[2])
            .collect()
    }

    /// Torso outline through the hips in world frame, closed loop
    pub fn torso_loop(&self, base: &E3) -> Vec<Vector3<f64>> {
        let mut loop_points: Vec<Vector3<f64>> = self
            .hip_offsets
            .iter()
            .map(|h| base.transform_point(h))
            .collect();
        // FL, FR, HR, HL reads as a rectangle for the quadruped layout
        if loop_points.len() == 4 {
            loop_points.swap(2, 3);
        }
        if let Some(&first) = loop_points.first() {
            loop_points.push(first);
        }
        loop_points
    }
}
