use crate::math::*;
use crate::vec2d::{Vec2D, UV};

use anyhow::Context;

use std::path::Path;

/// Backdrop the scene is composited over.
#[derive(Clone, Debug)]
pub enum Background {
    Constant(Vec3),
    // stored top row first
    Image(Vec2D<Vec3>),
}

impl Background {
    /// Color behind the screen position `uv`, with `v` growing upwards.
    pub fn sample(&self, uv: Vec2) -> Vec3 {
        match self {
            Background::Constant(color) => *color,
            Background::Image(texture) => texture.at_uv(UV(uv.x, 1.0 - uv.y)),
        }
    }

    pub fn load_image<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        info!("loading background image at {}", path.display());
        let img = image::open(path)
            .with_context(|| format!("failed to open background image {}", path.display()))?;
        let rgb_image = img.into_rgb8();
        let (width, height) = rgb_image.dimensions();
        let mut texture = Vec2D::new(width as usize, height as usize, Vec3::zero());
        for (x, y, pixel) in rgb_image.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            texture.write_at(
                x as usize,
                y as usize,
                Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0),
            );
        }
        debug!("background is {}x{}", width, height);
        Ok(Background::Image(texture))
    }
}
