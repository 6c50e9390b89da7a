#[derive(Copy, Clone, Debug)]
pub struct UV(pub f32, pub f32);

/// Row-major 2D buffer. Used for rendered frames as well as background images.
#[derive(Clone, Debug)]
pub struct Vec2D<T> {
    pub buffer: Vec<T>,
    pub width: usize,
    pub height: usize,
}

impl<T: Copy> Vec2D<T> {
    pub fn new(width: usize, height: usize, fill_value: T) -> Vec2D<T> {
        Vec2D {
            buffer: vec![fill_value; width * height],
            width,
            height,
        }
    }
    pub fn at(&self, x: usize, y: usize) -> T {
        self.buffer[y * self.width + x]
    }
    // nearest texel, uv clamped to the edges.
    pub fn at_uv(&self, mut uv: UV) -> T {
        uv.0 = uv.0.clamp(0.0, 1.0 - f32::EPSILON);
        uv.1 = uv.1.clamp(0.0, 1.0 - f32::EPSILON);
        self.at(
            (uv.0 * (self.width as f32)) as usize,
            (uv.1 * (self.height as f32)) as usize,
        )
    }
}

impl<T> Vec2D<T> {
    pub fn write_at(&mut self, x: usize, y: usize, value: T) {
        self.buffer[y * self.width + x] = value
    }

    pub fn total_pixels(&self) -> usize {
        self.width * self.height
    }
}
