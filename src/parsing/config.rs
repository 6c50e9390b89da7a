use crate::math::{vec3, Mat3, Vec3Data};
use crate::normal::NormalEstimator;
use crate::parsing::tonemap::TonemapSettings;
use crate::scene::SceneParameters;
use crate::shader::{RenderMode, ShadingOptions};

use anyhow::bail;
use serde::Deserialize;

#[derive(Deserialize, Copy, Clone, Debug)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct RenderSettings {
    pub filename: Option<String>,
    pub resolution: Resolution,
    pub threads: Option<u16>,
    #[serde(default)]
    pub mode: RenderMode,
    #[serde(default)]
    pub normal_estimator: NormalEstimator,
    #[serde(default = "default_tonemap")]
    pub tonemap_settings: TonemapSettings,
}

fn default_tonemap() -> TonemapSettings {
    TonemapSettings::Clamp {
        exposure: None,
        silenced: false,
    }
}

impl RenderSettings {
    pub fn shading_options(&self) -> ShadingOptions {
        ShadingOptions {
            mode: self.mode,
            normal_estimator: self.normal_estimator,
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
            .map(|t| t as usize)
            .unwrap_or_else(num_cpus::get)
            .max(1)
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct CameraData {
    pub look_from: Vec3Data,
    pub look_at: Vec3Data,
    pub v_up: Option<Vec3Data>, // defaults to 0,1,0
    pub vfov: f32,              // degrees
    pub near: Option<f32>,
    pub far: Option<f32>,
    pub position_scale: Option<f32>, // defaults to 1
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct SceneData {
    pub floor_offset: f32,
    pub check_scale: f32,
    pub light_position: Vec3Data,
    pub sphere_position: Vec3Data,
    pub sphere_radius: f32,
    pub sphere_color: Option<Vec3Data>,
    pub box_position: Option<Vec3Data>,
    pub box_size: Option<Vec3Data>,
    pub box_color: Option<Vec3Data>,
    // columns
    pub box_orientation: Option<[Vec3Data; 3]>,
}

impl From<SceneData> for SceneParameters {
    fn from(data: SceneData) -> Self {
        let defaults = SceneParameters::default();
        SceneParameters {
            floor_offset: data.floor_offset,
            check_scale: data.check_scale,
            light_position: vec3(data.light_position),
            sphere_position: vec3(data.sphere_position),
            sphere_radius: data.sphere_radius,
            sphere_color: data.sphere_color.map(vec3).unwrap_or(defaults.sphere_color),
            box_position: data.box_position.map(vec3).unwrap_or(defaults.box_position),
            box_half_extents: data.box_size.map(vec3).unwrap_or(defaults.box_half_extents),
            box_color: data.box_color.map(vec3).unwrap_or(defaults.box_color),
            box_orientation: data
                .box_orientation
                .map(|[c0, c1, c2]| Mat3::new(vec3(c0), vec3(c1), vec3(c2)))
                .unwrap_or(defaults.box_orientation),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(tag = "type")]
pub enum BackgroundData {
    Constant { color: Vec3Data },
    Image { filename: String },
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct TOMLConfig {
    pub output_dir: Option<String>, // defaults to "output"
    pub render: RenderSettings,
    pub camera: CameraData,
    pub scene: SceneData,
    pub background: BackgroundData,
}

impl TOMLConfig {
    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or("output")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let Resolution { width, height } = self.render.resolution;
        if width == 0 || height == 0 {
            bail!("resolution must be nonzero, got {}x{}", width, height);
        }
        if self.scene.sphere_radius < 0.0 {
            bail!("sphere radius must not be negative, got {}", self.scene.sphere_radius);
        }
        Ok(())
    }
}
