pub mod config;
pub mod tonemap;

pub use config::*;
pub use tonemap::{parse_tonemapper, TonemapSettings};

use crate::background::Background;
use crate::camera::Camera;
use crate::math::{vec3, Vec3};
use crate::scene::SceneParameters;

use anyhow::Context;
use serde::de::DeserializeOwned;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Everything needed to render one frame, resolved from a config file.
#[derive(Clone, Debug)]
pub struct Setup {
    pub render_settings: RenderSettings,
    pub output_dir: PathBuf,
    pub camera: Camera,
    pub scene: SceneParameters,
    pub background: Background,
}

fn load_arbitrary<T, P>(filepath: P) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let filepath = filepath.as_ref();
    info!("loading file at {}", filepath.display());
    let mut input = String::new();
    let read_count = File::open(filepath)
        .and_then(|mut f| f.read_to_string(&mut input))
        .with_context(|| format!("failed to read {}", filepath.display()))?;
    debug!("done: {} bytes", read_count);

    parse_arbitrary(&input).with_context(|| format!("failed to parse {}", filepath.display()))
}

fn parse_arbitrary<T: DeserializeOwned>(input: &str) -> anyhow::Result<T> {
    let data: T = toml::from_str(input)?;
    Ok(data)
}

pub fn get_settings<P: AsRef<Path>>(filepath: P) -> anyhow::Result<TOMLConfig> {
    let settings: TOMLConfig = load_arbitrary(filepath)?;
    settings.validate()?;
    Ok(settings)
}

pub fn parse_settings(input: &str) -> anyhow::Result<TOMLConfig> {
    let settings: TOMLConfig = parse_arbitrary(input)?;
    settings.validate()?;
    Ok(settings)
}

pub fn parse_camera(data: &CameraData, resolution: Resolution) -> anyhow::Result<Camera> {
    let mut camera = Camera::new(
        vec3(data.look_from),
        vec3(data.look_at),
        data.v_up.map(vec3).unwrap_or(Vec3::new(0.0, 1.0, 0.0)),
        data.vfov,
    )
    .with_aspect_ratio(resolution.aspect_ratio());
    if let Some(near) = data.near {
        camera.near = near;
    }
    if let Some(far) = data.far {
        camera.far = far;
    }
    camera.position_scale = data.position_scale.unwrap_or(1.0);
    camera.validate().context("invalid camera settings")?;
    Ok(camera)
}

pub fn parse_background(data: &BackgroundData) -> anyhow::Result<Background> {
    match data {
        BackgroundData::Constant { color } => Ok(Background::Constant(vec3(*color))),
        BackgroundData::Image { filename } => Background::load_image(filename),
    }
}

pub fn construct_setup(config: TOMLConfig) -> anyhow::Result<Setup> {
    let camera = parse_camera(&config.camera, config.render.resolution)?;
    let background = parse_background(&config.background)?;
    let output_dir = PathBuf::from(config.output_dir());
    info!(
        "scene: floor at y = {}, sphere of radius {} at {:?}",
        -config.scene.floor_offset, config.scene.sphere_radius, config.scene.sphere_position
    );
    Ok(Setup {
        render_settings: config.render,
        output_dir,
        camera,
        scene: SceneParameters::from(config.scene),
        background,
    })
}
