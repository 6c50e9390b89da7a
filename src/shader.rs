use crate::march::{march, MarchOutcome, MAX_DIST, MAX_STEPS, MIN_DIST};
use crate::math::*;
use crate::normal::NormalEstimator;
use crate::profile::Profile;
use crate::scene::Scene;

use serde::Deserialize;

pub const AMBIENT: f32 = 0.3;
pub const BACKGROUND_BLEED: f32 = 0.2;

/// Camera inputs for one frame, supplied by the host.
#[derive(Copy, Clone, Debug)]
pub struct FrameParameters {
    pub camera_position: Vec3,
    pub camera_to_world: Mat4,
    pub projection_inverse: Mat4,
}

#[derive(Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Shaded,
    Normals,
    Steps,
    Depth,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct ShadingOptions {
    pub mode: RenderMode,
    pub normal_estimator: NormalEstimator,
}

/// World space view direction through `uv`, where `uv` spans [0, 1] across the screen.
pub fn ray_direction(frame: &FrameParameters, uv: Vec2) -> Vec3 {
    let ndc = uv * 2.0 - Vec2::broadcast(1.0);
    let view = (frame.projection_inverse * Vec4::new(ndc.x, ndc.y, 0.0, 1.0)).xyz();
    let world = frame.camera_to_world * Vec4::new(view.x, view.y, view.z, 0.0);
    world.xyz().normalized()
}

/// Lambert term with an ambient floor, plus a fixed share of the backdrop.
pub fn diffuse(normal: Vec3, light_direction: Vec3, albedo: Vec3, background: Vec3) -> Vec3 {
    let dif = normal.dot(light_direction).clamp(AMBIENT, 1.0);
    albedo * dif + background * BACKGROUND_BLEED
}

/// Color of the pixel at `uv`. Alpha is always 1.
pub fn shade(scene: &Scene<'_>, frame: &FrameParameters, uv: Vec2, background: Vec3) -> Vec4 {
    shade_with(
        scene,
        frame,
        uv,
        background,
        ShadingOptions::default(),
        &mut Profile::default(),
    )
}

pub fn shade_with(
    scene: &Scene<'_>,
    frame: &FrameParameters,
    uv: Vec2,
    background: Vec3,
    options: ShadingOptions,
    profile: &mut Profile,
) -> Vec4 {
    let origin = frame.camera_position;
    let direction = ray_direction(frame, uv);
    let ray = Ray::new(origin, direction);
    let result = march(scene, ray.origin, ray.direction, MIN_DIST, MAX_DIST, false);
    profile.record(&result);

    let depth = result.depth();
    let color = if depth > MAX_DIST {
        background
    } else {
        let p = ray.point_at_parameter(depth);
        match options.mode {
            RenderMode::Shaded => {
                let normal = options.normal_estimator.normal(scene, p);
                let light_direction = (scene.light_position() - p).normalized();
                diffuse(normal, light_direction, result.surface.color, background)
            }
            RenderMode::Normals => {
                let normal = options.normal_estimator.normal(scene, p);
                normal * 0.5 + Vec3::broadcast(0.5)
            }
            RenderMode::Steps => {
                // exhausted marches are flagged in pure red
                if result.outcome == MarchOutcome::Exhausted {
                    Vec3::new(1.0, 0.0, 0.0)
                } else {
                    Vec3::broadcast(1.0 - result.steps as f32 / MAX_STEPS as f32)
                }
            }
            RenderMode::Depth => Vec3::broadcast(1.0 / (1.0 + depth)),
        }
    };
    Vec4::new(color.x, color.y, color.z, 1.0)
}
