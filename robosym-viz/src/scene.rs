//! Rerun scene logging for symmetry orbits
//!
//! Draws every entry of an orbit side by side: stick-figure robot, base
//! frame, CoM marker with linear/angular momentum arrows, contact forces
//! with contact pads, and the mirror planes of the reflective group
//! elements between the copies.

use crate::skeleton::Skeleton;
use nalgebra::{Matrix3, Vector3};
use rerun as rr;
use robosym_geom::{plane_normal, E3, Orbit};

/// Momentum arrows are normalized to this world-space length
const MOMENTUM_ARROW_LEN: f64 = 0.1;
/// Mirror planes are lifted slightly off the ground for readability
const PLANE_HEIGHT: f64 = 0.05;
const PLANE_HALF_SIZE: [f32; 3] = [0.01, 0.25, 0.1];

const COLOR_LIN_MOMENTUM: [u8; 4] = [255, 153, 0, 255];
const COLOR_ANG_MOMENTUM: [u8; 4] = [136, 204, 0, 255];
const COLOR_LIN_MOMENTUM_MODEL: [u8; 4] = [255, 204, 128, 255];
const COLOR_ANG_MOMENTUM_MODEL: [u8; 4] = [190, 226, 128, 255];
const COLOR_FORCE: [u8; 4] = [150, 39, 130, 255];
const COLOR_COM: [u8; 4] = [10, 10, 10, 255];
const COLOR_PAD: [u8; 4] = [235, 255, 255, 150];
const COLOR_PLANE: [u8; 4] = [242, 242, 242, 40];
const COLOR_SKELETON: [u8; 4] = [60, 60, 70, 255];

type LogResult = Result<(), Box<dyn std::error::Error>>;

fn vec3(v: &Vector3<f64>) -> [f32; 3] {
    [v.x as f32, v.y as f32, v.z as f32]
}

/// Column-major 3x3 for Rerun transforms
fn mat3(r: &Matrix3<f64>) -> [[f32; 3]; 3] {
    let mut cols = [[0.0f32; 3]; 3];
    for (j, col) in cols.iter_mut().enumerate() {
        for (i, v) in col.iter_mut().enumerate() {
            *v = r[(i, j)] as f32;
        }
    }
    cols
}

/// Rotation whose x axis is the given unit normal; used to orient the thin
/// side of a mirror-plane box along the plane normal.
fn basis_from_normal(n: &Vector3<f64>) -> Matrix3<f64> {
    let helper = if n.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let v = n.cross(&helper).normalize();
    let w = n.cross(&v);
    Matrix3::from_columns(&[*n, v, w])
}

/// Log a single colored arrow; zero-length vectors are skipped
pub fn log_vector(
    rec: &rr::RecordingStream,
    entity_path: &str,
    origin: &Vector3<f64>,
    vector: &Vector3<f64>,
    scale: f64,
    color: [u8; 4],
) -> LogResult {
    if vector.norm() == 0.0 {
        return Ok(());
    }
    rec.log(
        entity_path,
        &rr::Arrows3D::from_vectors([vec3(&(vector * scale))])
            .with_origins([vec3(origin)])
            .with_colors([color])
            .with_radii([0.0025]),
    )?;
    Ok(())
}

/// Log RGB axis arrows for a frame
pub fn log_frame_triad(
    rec: &rr::RecordingStream,
    entity_path: &str,
    pose: &E3,
    axis_len: f64,
) -> LogResult {
    let origin = vec3(&pose.translation);
    let axes: Vec<[f32; 3]> = (0..3)
        .map(|j| vec3(&(pose.rotation.column(j) * axis_len).into_owned()))
        .collect();
    rec.log(
        entity_path,
        &rr::Arrows3D::from_vectors(axes)
            .with_origins([origin, origin, origin])
            .with_colors([
                [255u8, 0, 0, 255],
                [0, 255, 0, 255],
                [0, 0, 255, 255],
            ])
            .with_radii([0.002]),
    )?;
    Ok(())
}

/// Log a thin translucent box representing a reflection plane
pub fn log_reflection_plane(
    rec: &rr::RecordingStream,
    entity_path: &str,
    rotation: &Matrix3<f64>,
    position: &Vector3<f64>,
    color: [u8; 4],
) -> LogResult {
    rec.log(
        entity_path,
        &rr::Transform3D::from_translation_mat3x3(vec3(position), mat3(rotation)),
    )?;
    rec.log(
        entity_path,
        &rr::Boxes3D::from_half_sizes([PLANE_HALF_SIZE]).with_colors([color]),
    )?;
    Ok(())
}

/// Log the full orbit scene
///
/// One entity subtree per orbit entry under `world/orbit/`, mirror planes
/// under `world/planes/`, plus a world-origin triad.
pub fn log_orbit_scene(rec: &rr::RecordingStream, orbit: &Orbit, skeleton: &Skeleton) -> LogResult {
    log_frame_triad(rec, "world/origin", &E3::identity(), 0.1)?;

    // Mirror planes of the reflective elements, halfway between the
    // original and its reflected copy.
    for (i, sample) in orbit.iter().enumerate().skip(1) {
        if !sample.transform.is_reflection() {
            continue;
        }
        let normal = plane_normal(&sample.transform.rotation);
        let position = sample.transform.translation / 2.0 + Vector3::new(0.0, 0.0, PLANE_HEIGHT);
        log_reflection_plane(
            rec,
            &format!("world/planes/g{:02}", i),
            &basis_from_normal(&normal),
            &position,
            COLOR_PLANE,
        )?;
    }

    for (i, sample) in orbit.iter().enumerate() {
        let path = format!("world/orbit/g{:02}", i);
        let (q, _dq) = sample.joint_state();

        // Stick figure: torso loop plus one strip per leg
        let mut strips: Vec<Vec<[f32; 3]>> = vec![skeleton
            .torso_loop(&sample.base_pose)
            .iter()
            .map(vec3)
            .collect()];
        for strip in skeleton.leg_strips(&sample.base_pose, &q) {
            strips.push(strip.iter().map(vec3).collect());
        }
        rec.log(
            format!("{}/skeleton", path).as_str(),
            &rr::LineStrips3D::new(strips)
                .with_colors([COLOR_SKELETON])
                .with_radii([0.008]),
        )?;

        log_frame_triad(rec, &format!("{}/base", path), &sample.base_pose, 0.06)?;

        // CoM marker just above the base, momentum arrows rooted there
        let com = sample
            .base_pose
            .transform_point(&Vector3::new(0.0, 0.0, 0.05));
        rec.log(
            format!("{}/com", path).as_str(),
            &rr::Points3D::new([vec3(&com)])
                .with_colors([COLOR_COM])
                .with_radii([0.02]),
        )?;

        let rot = sample.base_pose.rotation;
        let lin = rot * sample.momentum.fixed_rows::<3>(0).into_owned();
        let ang = rot * sample.momentum.fixed_rows::<3>(3).into_owned();
        log_vector(
            rec,
            &format!("{}/momentum/linear", path),
            &com,
            &lin,
            arrow_scale(&lin),
            COLOR_LIN_MOMENTUM,
        )?;
        log_vector(
            rec,
            &format!("{}/momentum/angular", path),
            &com,
            &ang,
            arrow_scale(&ang),
            COLOR_ANG_MOMENTUM,
        )?;

        // Model-recomputed momentum in paler colors, drawn on top so any
        // disagreement with the mapped momentum is visible in the scene
        if let Some(h) = sample.momentum_model {
            let lin_m = rot * h.fixed_rows::<3>(0).into_owned();
            let ang_m = rot * h.fixed_rows::<3>(3).into_owned();
            log_vector(
                rec,
                &format!("{}/momentum/linear_model", path),
                &com,
                &lin_m,
                arrow_scale(&lin_m),
                COLOR_LIN_MOMENTUM_MODEL,
            )?;
            log_vector(
                rec,
                &format!("{}/momentum/angular_model", path),
                &com,
                &ang_m,
                arrow_scale(&ang_m),
                COLOR_ANG_MOMENTUM_MODEL,
            )?;
        }

        for (j, contact) in sample.contacts.iter().enumerate() {
            log_vector(
                rec,
                &format!("{}/contacts/f{}", path, j),
                &contact.point,
                &contact.force,
                1.0,
                COLOR_FORCE,
            )?;
            let pad_center = contact.point - Vector3::new(0.0, 0.0, 0.03);
            rec.log(
                format!("{}/contacts/pad{}", path, j).as_str(),
                &rr::Transform3D::from_translation_mat3x3(
                    vec3(&pad_center),
                    mat3(&Matrix3::identity()),
                ),
            )?;
            rec.log(
                format!("{}/contacts/pad{}", path, j).as_str(),
                &rr::Boxes3D::from_half_sizes([[0.1, 0.1, 0.01]]).with_colors([COLOR_PAD]),
            )?;
        }
    }

    Ok(())
}

/// Arrow length normalization, guarding zero-norm vectors
fn arrow_scale(v: &Vector3<f64>) -> f64 {
    let n = v.norm();
    if n > 0.0 {
        MOMENTUM_ARROW_LEN / n
    } else {
        1.0
    }
}
