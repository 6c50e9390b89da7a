use crate::math::*;
use crate::shader::FrameParameters;

use anyhow::bail;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

use std::f32::consts::PI;

/// Pinhole camera. Only produces the matrices the shader needs.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub v_up: Vec3,
    // degrees
    pub vfov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub position_scale: f32,
}

impl Camera {
    pub fn new(look_from: Vec3, look_at: Vec3, v_up: Vec3, vfov: f32) -> Self {
        Camera {
            look_from,
            look_at,
            v_up,
            vfov,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 1000.0,
            position_scale: 1.0,
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            bail!("vfov must be in (0, 180) degrees, got {}", self.vfov);
        }
        if !(self.near > 0.0 && self.near < self.far) {
            bail!(
                "near plane must be positive and closer than the far plane, got near = {}, far = {}",
                self.near,
                self.far
            );
        }
        if !(self.aspect_ratio > 0.0) {
            bail!("aspect ratio must be positive, got {}", self.aspect_ratio);
        }
        let forward = self.look_at - self.look_from;
        if !(forward.mag_sq() > 0.0) {
            bail!("camera look_from and look_at must differ");
        }
        if !(self.v_up.mag_sq() > 0.0) {
            bail!("camera v_up must be nonzero, got {:?}", self.v_up);
        }
        // look_at_rh needs an up vector that is not parallel to the view direction
        if !(forward.normalized().cross(self.v_up.normalized()).mag() > 1e-4) {
            bail!(
                "camera v_up {:?} is parallel to the view direction {:?}",
                self.v_up,
                forward
            );
        }
        Ok(())
    }

    pub fn position(&self) -> Vec3 {
        self.look_from * self.position_scale
    }

    pub fn camera_to_world(&self) -> Mat4 {
        let view = Isometry3::look_at_rh(
            &Point3::new(self.look_from.x, self.look_from.y, self.look_from.z),
            &Point3::new(self.look_at.x, self.look_at.y, self.look_at.z),
            &Vector3::new(self.v_up.x, self.v_up.y, self.v_up.z),
        );
        to_mat4(&view.inverse().to_homogeneous())
    }

    pub fn projection_inverse(&self) -> Mat4 {
        let projection =
            Perspective3::new(self.aspect_ratio, self.vfov * PI / 180.0, self.near, self.far);
        to_mat4(&projection.inverse())
    }

    pub fn frame_parameters(&self) -> FrameParameters {
        FrameParameters {
            camera_position: self.position(),
            camera_to_world: self.camera_to_world(),
            projection_inverse: self.projection_inverse(),
        }
    }
}

fn to_mat4(m: &Matrix4<f32>) -> Mat4 {
    let column = |c: usize| Vec4::new(m[(0, c)], m[(1, c)], m[(2, c)], m[(3, c)]);
    Mat4::new(column(0), column(1), column(2), column(3))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shader::ray_direction;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new(
            Vec3::new(0.0, 1.0, 5.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            45.0,
        )
        .with_aspect_ratio(16.0 / 9.0);
        let frame = camera.frame_parameters();
        let d = ray_direction(&frame, Vec2::new(0.5, 0.5));
        assert_abs_diff_eq!(d.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(d.y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(d.z, -1.0, epsilon = 1e-5);

        // right edge leans right, top edge leans up
        assert!(ray_direction(&frame, Vec2::new(1.0, 0.5)).x > 0.0);
        assert!(ray_direction(&frame, Vec2::new(0.5, 1.0)).y > 0.0);
    }

    #[test]
    fn test_vertical_fov_spans_top_edge() {
        let camera = Camera::new(
            Vec3::zero(),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            90.0,
        );
        let top = ray_direction(&camera.frame_parameters(), Vec2::new(0.5, 1.0));
        // half of a 90 degree fov is 45 degrees above the view axis
        assert_abs_diff_eq!(top.y, -top.z, epsilon = 1e-5);
    }

    #[test]
    fn test_looking_down() {
        let camera = Camera::new(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::zero(),
            Vec3::new(0.0, 0.0, -1.0),
            60.0,
        );
        let d = ray_direction(&camera.frame_parameters(), Vec2::new(0.5, 0.5));
        assert_abs_diff_eq!(d.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_position_scale() {
        let mut camera = Camera::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::zero(),
            Vec3::new(0.0, 1.0, 0.0),
            60.0,
        );
        camera.position_scale = 2.0;
        assert_eq!(camera.frame_parameters().camera_position, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let good = Camera::new(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::zero(),
            Vec3::new(0.0, 1.0, 0.0),
            60.0,
        );
        assert!(good.validate().is_ok());
        assert!(Camera { vfov: 0.0, ..good }.validate().is_err());
        assert!(Camera { near: 10.0, far: 1.0, ..good }.validate().is_err());
        assert!(Camera { look_at: good.look_from, ..good }.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_up_along_view_axis() {
        // straight down with the default up vector has no well defined right axis
        let looking_down = Camera::new(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::zero(),
            Vec3::new(0.0, 1.0, 0.0),
            60.0,
        );
        assert!(looking_down.validate().is_err());
        let looking_up = Camera {
            look_at: Vec3::new(0.0, 10.0, 0.0),
            ..looking_down
        };
        assert!(looking_up.validate().is_err());

        let zero_up = Camera {
            look_at: Vec3::new(0.0, 5.0, -1.0),
            v_up: Vec3::zero(),
            ..looking_down
        };
        assert!(zero_up.validate().is_err());

        // tilting the up vector makes the same view valid, and its rays are finite
        let tilted = Camera {
            v_up: Vec3::new(0.0, 0.0, -1.0),
            ..looking_down
        };
        assert!(tilted.validate().is_ok());
        let d = ray_direction(&tilted.frame_parameters(), Vec2::new(0.5, 0.5));
        assert!(d.x.is_finite() && d.y.is_finite() && d.z.is_finite());
    }
}
