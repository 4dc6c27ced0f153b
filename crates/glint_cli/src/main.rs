//! Glint command line renderer.
//!
//! Renders a JSON scene description, or the built-in sample scene when
//! none is given, and writes the image to disk.

mod description;
mod sample;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::Session;

use crate::description::SceneDescription;

/// Monte Carlo path tracer for spheres and planes.
#[derive(Parser, Debug)]
#[command(name = "glint", version)]
struct Args {
    /// JSON scene description; renders the sample scene when omitted
    scene: Option<PathBuf>,

    /// Output image; the format follows the extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    threads: usize,

    /// Seed for the random sample streams
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl Args {
    /// Command line values win over the scene file.
    fn apply_overrides(&self, session: &mut Session) {
        if self.width.is_some() || self.height.is_some() {
            let settings = session.renderer().settings();
            let width = self.width.unwrap_or(settings.width);
            let height = self.height.unwrap_or(settings.height);
            session.set_size(width, height);
        }
        if let Some(samples) = self.samples {
            session.set_samples(samples);
        }
        if let Some(max_depth) = self.max_depth {
            session.set_max_depth(max_depth);
        }
        let renderer = session.renderer_mut();
        renderer.set_threads(self.threads);
        renderer.set_seed(self.seed);
    }

    /// Build the session to render.
    ///
    /// Overrides land between the output settings and the camera, so a
    /// camera without a fixed aspect matches the final image size.
    fn build_session(&self, description: Option<&SceneDescription>) -> Session {
        let mut session = Session::new();
        match description {
            Some(description) => {
                description.apply_settings(&mut session);
                self.apply_overrides(&mut session);
                description.apply_scene(&mut session);
            }
            None => {
                log::info!("No scene given, rendering the sample scene");
                sample::configure(&mut session);
                self.apply_overrides(&mut session);
                sample::populate(&mut session);
            }
        }
        session
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    log::info!("Starting Glint");

    let description = args.scene.as_deref().map(SceneDescription::load).transpose()?;
    let mut session = args.build_session(description.as_ref());
    let scene_output = description.and_then(|description| description.output).map(PathBuf::from);

    let output = args
        .output
        .clone()
        .or(scene_output)
        .unwrap_or_else(|| PathBuf::from(sample::OUTPUT));

    let start = Instant::now();
    session
        .render_to_file(&output)
        .with_context(|| format!("Failed to render {}", output.display()))?;
    log::info!("Finished in {:?}", start.elapsed());

    Ok(())
}
