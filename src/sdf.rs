use crate::math::*;
use crate::scene::SceneParameters;

/// Result of evaluating a distance field at a point.
///
/// `color` always belongs to the primitive that produced `distance`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Surface {
    pub distance: f32,
    pub color: Vec3,
}

impl Surface {
    pub const fn new(distance: f32, color: Vec3) -> Self {
        Surface { distance, color }
    }
}

/// Anything that can be queried for the nearest surface at a point.
pub trait SignedDistance {
    fn surface(&self, p: Vec3) -> Surface;

    fn distance(&self, p: Vec3) -> f32 {
        self.surface(p).distance
    }
}

impl<F> SignedDistance for F
where
    F: Fn(Vec3) -> Surface,
{
    fn surface(&self, p: Vec3) -> Surface {
        self(p)
    }
}

// `p` is moved into box space by subtracting the box position first, then rotated.
// the position itself is never rotated.
pub fn sd_box(p: Vec3, half_extents: Vec3, color: Vec3, position: Vec3, orientation: Mat3) -> Surface {
    // row vector times matrix
    let p = orientation.transposed() * (p - position);
    let q = Vec3::new(p.x.abs(), p.y.abs(), p.z.abs()) - half_extents;
    let outside = q.max_by_component(Vec3::zero()).mag();
    let inside = q.component_max().min(0.0);
    Surface::new(outside + inside, color)
}

pub fn sd_floor(p: Vec3, floor_offset: f32, color: Vec3) -> Surface {
    Surface::new(p.y + floor_offset, color)
}

pub fn sd_sphere(p: Vec3, radius: f32, color: Vec3) -> Surface {
    Surface::new(p.mag() - radius, color)
}

/// Alternating tile color along x and z. Light tiles are 2.7, dark tiles 1.0, unclamped.
pub fn checkerboard(p: Vec3, scale: f32) -> Vec3 {
    let parity = floor_mod((p.x * scale).floor() + (p.z * scale).floor(), 2.0);
    Vec3::broadcast(1.0 + 1.7 * parity)
}

/// Nearest of two surfaces. Ties keep `a`.
#[inline(always)]
pub fn min_with_color(a: Surface, b: Surface) -> Surface {
    if b.distance < a.distance {
        b
    } else {
        a
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Primitive {
    Box,
    Floor,
    Sphere,
}

impl Primitive {
    pub fn surface(&self, p: Vec3, params: &SceneParameters) -> Surface {
        match self {
            Primitive::Box => sd_box(
                p,
                params.box_half_extents,
                params.box_color,
                params.box_position,
                params.box_orientation,
            ),
            Primitive::Floor => sd_floor(
                p,
                params.floor_offset,
                checkerboard(p, params.check_scale),
            ),
            Primitive::Sphere => sd_sphere(
                p - params.sphere_position,
                params.sphere_radius,
                params.sphere_color,
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn red() -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0)
    }

    fn blue() -> Vec3 {
        Vec3::new(0.0, 0.0, 1.0)
    }

    #[test]
    fn test_sphere_distance_is_exact() {
        let radius = 1.5;
        for p in [
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, -0.2, 0.1),
            Vec3::new(1.0, 2.0, -2.0),
            Vec3::zero(),
        ] {
            let s = sd_sphere(p, radius, red());
            assert_eq!(s.distance, p.mag() - radius);
            assert_eq!(s.color, red());
        }
        let on_surface = sd_sphere(Vec3::new(0.0, radius, 0.0), radius, red());
        assert_eq!(on_surface.distance, 0.0);
    }

    #[test]
    fn test_floor_depends_only_on_y() {
        let offset = 0.75;
        let a = sd_floor(Vec3::new(-10.0, 2.0, 4.0), offset, red());
        let b = sd_floor(Vec3::new(300.0, 2.0, -9.0), offset, red());
        assert_eq!(a.distance, b.distance);
        assert_eq!(sd_floor(Vec3::new(1.0, -offset, 1.0), offset, red()).distance, 0.0);
        assert!(sd_floor(Vec3::new(0.0, -2.0, 0.0), offset, red()).distance < 0.0);
    }

    #[test]
    fn test_box_inside_and_outside() {
        let half = Vec3::new(1.0, 2.0, 3.0);
        let position = Vec3::new(5.0, 0.0, 0.0);
        let outside = sd_box(Vec3::new(8.0, 0.0, 0.0), half, blue(), position, Mat3::identity());
        assert_abs_diff_eq!(outside.distance, 2.0, epsilon = 1e-6);
        let center = sd_box(position, half, blue(), position, Mat3::identity());
        assert_abs_diff_eq!(center.distance, -1.0, epsilon = 1e-6);
        // corner region uses the euclidean distance to the corner
        let corner = sd_box(Vec3::new(7.0, 3.0, 0.0), half, blue(), position, Mat3::identity());
        assert_abs_diff_eq!(corner.distance, 2.0f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_box_orientation_rotates_local_frame() {
        // quarter turn about y swaps the x and z extents
        let rotation = Mat3::new(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let half = Vec3::new(1.0, 1.0, 4.0);
        let s = sd_box(Vec3::new(6.0, 0.0, 0.0), half, blue(), Vec3::zero(), rotation);
        assert_abs_diff_eq!(s.distance, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let light = checkerboard(Vec3::new(0.5, 0.0, 1.5), 1.0);
        let dark = checkerboard(Vec3::new(0.5, 0.0, 0.5), 1.0);
        assert_abs_diff_eq!(dark.x, 1.0);
        assert_abs_diff_eq!(light.x, 2.7, epsilon = 1e-6);
        assert_eq!(light.x, light.y);
        assert_eq!(light.y, light.z);
        // negative coordinates still land in [0, 2)
        let negative = checkerboard(Vec3::new(-0.5, 0.0, 0.5), 1.0);
        assert_abs_diff_eq!(negative.x, 2.7, epsilon = 1e-6);
    }

    #[test]
    fn test_min_with_color_tie_keeps_first() {
        let a = Surface::new(1.0, red());
        let b = Surface::new(1.0, blue());
        assert_eq!(min_with_color(a, b).color, red());
        assert_eq!(min_with_color(b, a).color, blue());
        let closer = Surface::new(0.5, blue());
        assert_eq!(min_with_color(a, closer), closer);
    }

    #[test]
    fn test_primitive_box_uses_box_parameters() {
        let params = SceneParameters {
            box_position: Vec3::new(1.0, 2.0, -3.0),
            box_half_extents: Vec3::new(0.5, 1.0, 2.0),
            box_color: blue(),
            box_orientation: Mat3::new(
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ),
            ..Default::default()
        };
        for p in [
            Vec3::new(4.0, 2.0, -3.0),
            Vec3::new(1.0, 2.0, -3.0),
            Vec3::new(-2.0, 0.5, 1.0),
        ] {
            let expected = sd_box(
                p,
                params.box_half_extents,
                params.box_color,
                params.box_position,
                params.box_orientation,
            );
            assert_eq!(Primitive::Box.surface(p, &params), expected);
        }
    }
}
