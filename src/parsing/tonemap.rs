use serde::Deserialize;

use crate::tonemap::{Clamp, Converter, Reinhard0, Tonemapper};

#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(tag = "type")]
pub enum TonemapSettings {
    // clamp all colors to 0 to 1, multiplying by 10^exposure beforehand (exposure defaults to 0, not changing anything)
    Clamp {
        exposure: Option<f32>,
        #[serde(default)]
        silenced: bool,
    },
    // compresses the over-bright checker tiles instead of clipping them
    Reinhard0 {
        key_value: f32,
        #[serde(default)]
        srgb: bool,
        #[serde(default)]
        silenced: bool,
    },
}

pub fn parse_tonemapper(settings: TonemapSettings) -> (Box<dyn Tonemapper>, Converter) {
    match settings {
        TonemapSettings::Clamp { exposure, silenced } => (
            Box::new(Clamp::new(exposure.unwrap_or(0.0), silenced)),
            Converter::Display,
        ),
        TonemapSettings::Reinhard0 {
            key_value,
            srgb,
            silenced,
        } => (
            Box::new(Reinhard0::new(key_value, silenced)),
            if srgb {
                Converter::sRGB
            } else {
                Converter::Display
            },
        ),
    }
}
