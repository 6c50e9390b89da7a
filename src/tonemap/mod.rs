use crate::math::*;
use crate::renderer::Film;

use anyhow::Context;

use std::path::Path;
use std::time::Instant;

mod clamp;
mod reinhard0;

pub use clamp::Clamp;
pub use reinhard0::Reinhard0;

// universal sign of danger
pub fn mauve() -> Vec3 {
    Vec3::new(0.878, 0.690, 1.0)
}

// rec. 709 luma weights
pub fn luminance(color: Vec3) -> f32 {
    0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z
}

pub fn is_finite(color: Vec3) -> bool {
    color.x.is_finite() && color.y.is_finite() && color.z.is_finite()
}

pub trait Tonemapper: Send + Sync {
    fn initialize(&mut self, film: &Film);
    // should tonemap a pixel from hdr to ldr
    fn map(&self, film: &Film, pixel: (usize, usize)) -> Vec3;
    fn get_name(&self) -> &str;
}

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Converter {
    // values are written as they came out of the shader
    Display,
    sRGB,
}

impl Converter {
    pub fn transfer_function(&self, color: Vec3) -> Vec3 {
        match self {
            Converter::Display => color,
            Converter::sRGB => {
                let encode = |c: f32| {
                    if c < 0.0031308 {
                        323.0 / 25.0 * c
                    } else {
                        (211.0 * c.powf(5.0 / 12.0) - 11.0) / 200.0
                    }
                };
                Vec3::new(encode(color.x), encode(color.y), encode(color.z))
            }
        }
    }

    pub fn write_to_files(
        &self,
        film: &Film,
        tonemapper: &dyn Tonemapper,
        exr_filename: &Path,
        png_filename: &Path,
    ) -> anyhow::Result<()> {
        let now = Instant::now();

        info!("saving exr image to {}", exr_filename.display());
        exr::prelude::write_rgba_file(exr_filename, film.width, film.height, |x, y| {
            let color = film.at(x, y);
            (color.x, color.y, color.z, color.w)
        })
        .with_context(|| format!("failed to write {}", exr_filename.display()))?;

        let mut img: image::RgbaImage =
            image::ImageBuffer::new(film.width as u32, film.height as u32);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let (x, y) = (x as usize, y as usize);
            let color = self.transfer_function(tonemapper.map(film, (x, y)));
            let alpha = film.at(x, y).w;
            *pixel = image::Rgba([
                to_u8(color.x),
                to_u8(color.y),
                to_u8(color.z),
                to_u8(alpha),
            ]);
        }
        info!("saving png image to {}", png_filename.display());
        img.save(png_filename)
            .with_context(|| format!("failed to write {}", png_filename.display()))?;

        info!(
            "took {}s to tonemap and output",
            (now.elapsed().as_millis() as f32) / 1000.0
        );
        Ok(())
    }
}

fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}
