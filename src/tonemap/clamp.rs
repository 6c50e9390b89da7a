use crate::math::*;
use crate::renderer::Film;

use super::{is_finite, luminance, mauve, Tonemapper};

#[derive(Clone, Debug)]
pub struct Clamp {
    exposure: f32,
    silenced: bool,
}

impl Clamp {
    pub fn new(exposure: f32, silenced: bool) -> Self {
        Self { exposure, silenced }
    }
}

impl Tonemapper for Clamp {
    fn initialize(&mut self, film: &Film) {
        if self.silenced {
            return;
        }
        let mut max_luminance = 0.0;
        let mut max_lum_xy = (0, 0);
        let mut clipped = 0usize;
        let scale = 10.0f32.powf(self.exposure);

        for y in 0..film.height {
            for x in 0..film.width {
                let color = film.at(x, y).xyz();
                let lum = luminance(color);
                if lum.is_nan() {
                    continue;
                }
                if lum > max_luminance {
                    max_luminance = lum;
                    max_lum_xy = (x, y);
                }
                if color.component_max() * scale > 1.0 {
                    clipped += 1;
                }
            }
        }

        info!(
            "max luminance occurred at {}, {}, is {}",
            max_lum_xy.0, max_lum_xy.1, max_luminance
        );
        if clipped > 0 {
            info!(
                "{} of {} pixels will be clipped",
                clipped,
                film.total_pixels()
            );
        }
    }

    fn map(&self, film: &Film, pixel: (usize, usize)) -> Vec3 {
        let color = film.at(pixel.0, pixel.1).xyz();
        if !is_finite(color) {
            return mauve();
        }
        let scaled = color * 10.0f32.powf(self.exposure);
        Vec3::new(
            scaled.x.clamp(0.0, 1.0),
            scaled.y.clamp(0.0, 1.0),
            scaled.z.clamp(0.0, 1.0),
        )
    }

    fn get_name(&self) -> &str {
        "clamp"
    }
}
