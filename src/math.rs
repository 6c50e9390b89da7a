pub use ultraviolet::{Mat3, Mat4, Vec2, Vec3, Vec4};

pub type Vec3Data = [f32; 3];

#[inline(always)]
pub fn vec3(data: Vec3Data) -> Vec3 {
    let [x, y, z] = data;
    Vec3::new(x, y, z)
}

// floored modulo, the result takes the sign of the divisor.
#[inline(always)]
pub fn floor_mod(x: f32, m: f32) -> f32 {
    x - m * (x / m).floor()
}

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Ray {
            origin,
            direction: direction.normalized(),
        }
    }

    #[inline(always)]
    pub fn point_at_parameter(&self, time: f32) -> Vec3 {
        self.origin + self.direction * time
    }
}
