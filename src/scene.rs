use crate::math::*;
use crate::sdf::{min_with_color, Primitive, SignedDistance, Surface};

/// Per-frame scene inputs. Nothing in the renderer mutates these.
#[derive(Copy, Clone, Debug)]
pub struct SceneParameters {
    pub floor_offset: f32,
    pub check_scale: f32,
    pub light_position: Vec3,
    pub sphere_position: Vec3,
    pub sphere_radius: f32,
    pub sphere_color: Vec3,
    // the box is parameterized but not part of the composed scene.
    pub box_position: Vec3,
    pub box_half_extents: Vec3,
    pub box_color: Vec3,
    pub box_orientation: Mat3,
}

impl Default for SceneParameters {
    fn default() -> Self {
        SceneParameters {
            floor_offset: 0.0,
            check_scale: 1.0,
            light_position: Vec3::new(2.0, 5.0, 3.0),
            sphere_position: Vec3::new(0.0, 1.0, 0.0),
            sphere_radius: 1.0,
            sphere_color: Vec3::new(1.0, 0.0, 0.0),
            box_position: Vec3::zero(),
            box_half_extents: Vec3::broadcast(0.5),
            box_color: Vec3::new(0.0, 0.5, 1.0),
            box_orientation: Mat3::identity(),
        }
    }
}

/// Composition order. Earlier entries win ties.
pub const SCENE_PRIMITIVES: [Primitive; 2] = [Primitive::Floor, Primitive::Sphere];

#[derive(Copy, Clone, Debug)]
pub struct Scene<'a> {
    pub params: &'a SceneParameters,
}

impl<'a> Scene<'a> {
    pub fn new(params: &'a SceneParameters) -> Self {
        Scene { params }
    }

    pub fn light_position(&self) -> Vec3 {
        self.params.light_position
    }
}

impl SignedDistance for Scene<'_> {
    fn surface(&self, p: Vec3) -> Surface {
        SCENE_PRIMITIVES[1..].iter().fold(
            SCENE_PRIMITIVES[0].surface(p, self.params),
            |nearest, primitive| min_with_color(nearest, primitive.surface(p, self.params)),
        )
    }
}
