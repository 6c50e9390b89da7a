use crate::math::*;
use crate::renderer::Film;

use super::{is_finite, luminance, mauve, Tonemapper};

#[derive(Clone, Debug)]
pub struct Reinhard0 {
    key_value: f32,
    l_w: Option<f32>,
    silenced: bool,
}

impl Reinhard0 {
    const DELTA: f64 = 0.001;
    pub fn new(key_value: f32, silenced: bool) -> Self {
        Self {
            key_value,
            l_w: None,
            silenced,
        }
    }
}

impl Tonemapper for Reinhard0 {
    fn initialize(&mut self, film: &Film) {
        let mut total_luminance = 0.0;
        let mut counted = 0usize;
        let mut sum_of_log = 0.0f64;

        for y in 0..film.height {
            for x in 0..film.width {
                let lum = luminance(film.at(x, y).xyz());
                if !lum.is_finite() {
                    continue;
                }
                total_luminance += lum;
                sum_of_log += (Self::DELTA + lum.max(0.0) as f64).ln();
                counted += 1;
            }
        }

        let counted = counted.max(1);
        let avg_luminance = total_luminance / (counted as f32);
        let l_w = (sum_of_log / (counted as f64)).exp() as f32;
        if !self.silenced {
            info!(
                "computed tonemapping: avg luminance {}, l_w = {:?} (avg_log = {})",
                avg_luminance,
                l_w,
                sum_of_log / counted as f64
            );
        }
        self.l_w = Some(l_w)
    }

    fn map(&self, film: &Film, pixel: (usize, usize)) -> Vec3 {
        let color = film.at(pixel.0, pixel.1).xyz();
        if !is_finite(color) {
            return mauve();
        }
        let lum = luminance(color);
        if lum <= 0.0 {
            return Vec3::zero();
        }
        // an uninitialized tonemapper treats the frame as already adapted
        let l_w = self.l_w.unwrap_or(1.0);

        // using super basic reinhard mapping
        // Ld = L / (1 + L)
        let l = self.key_value * lum / l_w;
        let scaling_factor = l / (1.0 + l) / lum;
        color * scaling_factor
    }

    fn get_name(&self) -> &str {
        "reinhard0"
    }
}
