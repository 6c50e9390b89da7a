use crate::background::Background;
use crate::march::{march, MAX_DIST, MIN_DIST};
use crate::math::*;
use crate::parsing::{parse_tonemapper, RenderSettings, Setup};
use crate::profile::Profile;
use crate::scene::Scene;
use crate::shader::{ray_direction, shade_with, FrameParameters, ShadingOptions};
use crate::vec2d::Vec2D;

use anyhow::Context;
use rayon::prelude::*;

use std::path::Path;
use std::time::Instant;

#[cfg(feature = "progress")]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "progress")]
use std::sync::Arc;
#[cfg(feature = "progress")]
use std::thread;
#[cfg(feature = "progress")]
use std::time::Duration;

/// Rendered RGBA frame.
pub type Film = Vec2D<Vec4>;

/// Screen uv of the center of pixel (x, y). v grows upwards, row 0 is the top of the image.
pub fn surface_uv(x: usize, y: usize, width: usize, height: usize) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32,
        1.0 - (y as f32 + 0.5) / height as f32,
    )
}

/// Shades every pixel of `film` independently.
pub fn render_frame(
    film: &mut Film,
    scene: &Scene<'_>,
    frame: &FrameParameters,
    background: &Background,
    options: ShadingOptions,
) -> Profile {
    let width = film.width;
    let height = film.height;

    #[cfg(feature = "progress")]
    let (pixel_count, progress_thread) = {
        let total_pixels = width * height;
        let pixel_count = Arc::new(AtomicUsize::new(0));
        let clone = pixel_count.clone();
        let thread = thread::spawn(move || {
            let mut pb = pbr::ProgressBar::new(total_pixels as u64);
            let mut local_index = 0;
            while local_index < total_pixels {
                let pixels_to_increment = clone.load(Ordering::Relaxed) - local_index;
                pb.add(pixels_to_increment as u64);
                local_index += pixels_to_increment;

                thread::sleep(Duration::from_millis(100));
            }
            pb.finish();
        });
        (pixel_count, thread)
    };

    let profile = film
        .buffer
        .par_iter_mut()
        .enumerate()
        .map(|(pixel_index, pixel_ref)| {
            let mut profile = Profile::default();
            let y: usize = pixel_index / width;
            let x: usize = pixel_index - width * y;
            let uv = surface_uv(x, y, width, height);
            let background_color = background.sample(uv);
            *pixel_ref = shade_with(scene, frame, uv, background_color, options, &mut profile);

            #[cfg(feature = "progress")]
            pixel_count.fetch_add(1, Ordering::Relaxed);

            profile
        })
        .reduce(Profile::default, |a, b| a.combine(b));

    #[cfg(feature = "progress")]
    if let Err(panic) = progress_thread.join() {
        warn!("progress bar thread threw an error {:?}", panic);
    }

    profile
}

/// Marches the center pixel with tracing enabled and logs the result.
pub fn trace_center_pixel(scene: &Scene<'_>, frame: &FrameParameters, background: &Background) {
    let uv = Vec2::new(0.5, 0.5);
    let direction = ray_direction(frame, uv);
    info!(
        "tracing center pixel from {:?} along {:?}",
        frame.camera_position, direction
    );
    let result = march(
        scene,
        frame.camera_position,
        direction,
        MIN_DIST,
        MAX_DIST,
        true,
    );
    info!(
        "march ended with {:?} after {} steps at depth {}",
        result.outcome,
        result.steps,
        result.depth()
    );
    let color = shade_with(
        scene,
        frame,
        uv,
        background.sample(uv),
        ShadingOptions::default(),
        &mut Profile::default(),
    );
    info!("center pixel color {:?}", color);
}

pub fn output_film(render_settings: &RenderSettings, output_dir: &Path, film: &Film) -> anyhow::Result<()> {
    let filename_str = render_settings
        .filename
        .clone()
        .unwrap_or_else(|| String::from("beauty"));

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let exr_filename = output_dir.join(format!("{}.exr", filename_str));
    let png_filename = output_dir.join(format!("{}.png", filename_str));

    let (mut tonemapper, converter) = parse_tonemapper(render_settings.tonemap_settings);
    tonemapper.initialize(film);
    debug!("tonemapping with {}", tonemapper.get_name());

    converter.write_to_files(film, tonemapper.as_ref(), &exr_filename, &png_filename)
}

/// Renders the configured frame and returns it with its statistics.
pub fn render(setup: &Setup) -> (Film, Profile) {
    let settings = &setup.render_settings;
    let (width, height) = (settings.resolution.width, settings.resolution.height);
    info!("starting render with film resolution {}x{}", width, height);

    let now = Instant::now();
    let mut film = Film::new(width, height, Vec4::zero());
    let scene = Scene::new(&setup.scene);
    let frame = setup.camera.frame_parameters();
    let profile = render_frame(
        &mut film,
        &scene,
        &frame,
        &setup.background,
        settings.shading_options(),
    );

    let elapsed = (now.elapsed().as_millis() as f32 / 1000.0).max(0.001);
    info!("took {}s", elapsed);
    profile.pretty_print(elapsed, settings.threads());
    (film, profile)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::camera::Camera;
    use crate::scene::SceneParameters;

    #[test]
    fn test_every_pixel_is_shaded_once() {
        let params = SceneParameters::default();
        let scene = Scene::new(&params);
        let camera = Camera::new(
            Vec3::new(0.0, 2.0, 6.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            45.0,
        )
        .with_aspect_ratio(2.0);
        let frame = camera.frame_parameters();
        let background = Background::Constant(Vec3::new(0.0, 0.0, 1.0));
        let mut film = Film::new(16, 8, Vec4::zero());
        let profile = render_frame(
            &mut film,
            &scene,
            &frame,
            &background,
            ShadingOptions::default(),
        );
        assert_eq!(profile.camera_rays, 16 * 8);
        assert_eq!(profile.hits + profile.misses, profile.camera_rays);
        assert!(film.buffer.iter().all(|c| c.w == 1.0));

        // the sphere sits in the middle of the frame and is red
        let center = film.at(8, 4);
        assert!(center.x > center.z, "{:?}", center);
        // the gray floor fills the bottom row, tinted by the background
        let bottom = film.at(8, 7);
        assert!(bottom.x >= 0.3 && bottom.x == bottom.y, "{:?}", bottom);
        assert!(bottom.z > bottom.x, "{:?}", bottom);
    }

    #[test]
    fn test_surface_uv_flips_rows() {
        let film = Film::new(2, 2, Vec4::zero());
        let top_left = surface_uv(0, 0, film.width, film.height);
        assert_eq!(top_left, Vec2::new(0.25, 0.75));
        let bottom_right = surface_uv(1, 1, film.width, film.height);
        assert_eq!(bottom_right, Vec2::new(0.75, 0.25));
    }
}
