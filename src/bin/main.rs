extern crate sdf_overlay as root;

use root::parsing::{construct_setup, get_settings, BackgroundData, TOMLConfig};
use root::renderer::{output_film, render, trace_center_pixel};
use root::scene::Scene;

#[macro_use]
extern crate tracing;

use anyhow::Context;
use structopt::StructOpt;
use tracing::level_filters::LevelFilter;

#[derive(Debug, StructOpt)]
#[structopt(rename_all = "kebab-case")]
struct Opt {
    #[structopt(long, default_value = "data/config.toml")]
    pub config: String,
    /// image to composite the scene over, replaces the configured background
    #[structopt(long)]
    pub background: Option<String>,
    /// directory to write the exr and png to
    #[structopt(long)]
    pub output: Option<String>,
    #[structopt(short = "n", long)]
    pub dry_run: bool,
    #[structopt(long, default_value = "info")]
    pub log_level: String,
}

fn parse_log_level(level: &str, default: LevelFilter) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "warn" => LevelFilter::WARN,
        "info" => LevelFilter::INFO,
        "trace" => LevelFilter::TRACE,
        "error" => LevelFilter::ERROR,
        "debug" => LevelFilter::DEBUG,
        "off" => LevelFilter::OFF,
        _ => default,
    }
}

fn apply_overrides(config: &mut TOMLConfig, opts: &Opt) {
    if let Some(filename) = &opts.background {
        config.background = BackgroundData::Image {
            filename: filename.clone(),
        };
    }
    if let Some(output) = &opts.output {
        config.output_dir = Some(output.clone());
    }
}

fn run(opts: Opt) -> anyhow::Result<()> {
    let mut config = get_settings(&opts.config)?;
    apply_overrides(&mut config, &opts);

    let threads = config.render.threads();
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("failed to build the render thread pool")?;

    let setup = construct_setup(config)?;

    if opts.dry_run {
        let scene = Scene::new(&setup.scene);
        trace_center_pixel(&scene, &setup.camera.frame_parameters(), &setup.background);
        return Ok(());
    }

    let (film, _profile) = render(&setup);
    output_film(&setup.render_settings, &setup.output_dir, &film)
}

fn main() {
    let opts = Opt::from_args();
    let level = parse_log_level(&opts.log_level, LevelFilter::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Err(err) = run(opts) {
        error!("{:?}", err);
        std::process::exit(1);
    }
}
