//! Parallel render driver.
//!
//! Implements Monte Carlo path tracing with:
//! - Multi-sampling with per-pixel jitter for anti-aliasing
//! - Gamma correction and 8-bit quantization
//! - Row bands distributed over a fixed-size rayon worker pool

use std::path::Path;
use std::time::Instant;

use bytemuck::{Pod, Zeroable};
use glint_math::{Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};
use crate::integrator::{Background, PathTracer};
use crate::material::Color;
use crate::sampling::{gen_f32, row_rng};
use crate::{Camera, Scene};

/// One 8-bit RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Dense RGBA image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Create a new buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the dimensions; existing content is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, Rgba::BLACK);
    }

    /// Fill every pixel with `value`.
    pub fn clear(&mut self, value: Rgba) {
        self.pixels.fill(value);
    }

    /// Get the pixel at (x, y), or None outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Writes outside the image are ignored.
    pub fn set(&mut self, x: u32, y: u32, value: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = value;
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA bytes (for display or saving).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Encode the buffer to `path`; the format follows the file extension.
    ///
    /// Formats without an alpha channel (JPEG, PPM) get the RGB channels.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let image = image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec()).ok_or(
            RenderError::BufferSize {
                width: self.width,
                height: self.height,
                len: self.pixels.len(),
            },
        )?;

        let opaque_only = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "ppm" | "pnm"))
            .unwrap_or(false);

        let result = if opaque_only {
            image::DynamicImage::ImageRgba8(image).to_rgb8().save(path)
        } else {
            image.save(path)
        };

        result.map_err(|source| RenderError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Display gamma; colors are raised to 1/gamma before quantization
    pub gamma: f32,
    /// Worker threads, 0 = hardware concurrency
    pub threads: usize,
    /// Seed for the per-row random generators
    pub seed: u64,
    pub background: Background,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            samples_per_pixel: 64,
            max_depth: 10,
            gamma: 2.0,
            threads: 0,
            seed: 0,
            background: Background::default(),
        }
    }
}

impl RenderSettings {
    fn worker_count(&self) -> usize {
        let threads = if self.threads == 0 {
            std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        } else {
            self.threads
        };
        threads.clamp(1, (self.height as usize).max(1))
    }

    fn path_tracer(&self) -> PathTracer {
        PathTracer::new(self.max_depth, self.background)
    }
}

/// Apply gamma correction component-wise.
#[inline]
pub fn gamma_correct(color: Color, gamma: f32) -> Color {
    let e = 1.0 / gamma;
    Color::new(color.x.powf(e), color.y.powf(e), color.z.powf(e))
}

/// Convert a display-space color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> Rgba {
    let quantize = |c: f32| (Interval::UNIT.clamp(c) * 255.99) as u8;
    Rgba::new(quantize(color.x), quantize(color.y), quantize(color.z), 255)
}

/// The render driver: owns the settings and the output buffer.
#[derive(Debug, Clone)]
pub struct Renderer {
    settings: RenderSettings,
    image: PixelBuffer,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Self {
        let image = PixelBuffer::new(settings.width, settings.height);
        Self { settings, image }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// The buffer written by the last render.
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.settings.width = width;
        self.settings.height = height;
        self.image.resize(width, height);
    }

    pub fn set_samples(&mut self, samples_per_pixel: u32) {
        if samples_per_pixel == 0 {
            log::warn!("Sample count of 0 requested, using 1");
        }
        self.settings.samples_per_pixel = samples_per_pixel.max(1);
    }

    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.settings.max_depth = max_depth;
    }

    pub fn set_threads(&mut self, threads: usize) {
        self.settings.threads = threads;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.settings.seed = seed;
    }

    pub fn set_background(&mut self, background: Background) {
        self.settings.background = background;
    }

    /// Radiance along `ray` after `depth` bounces, with the current settings.
    pub fn trace(&self, scene: &Scene, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        self.settings.path_tracer().trace(scene, ray, depth, rng)
    }

    /// Render the scene into the owned buffer and return it.
    ///
    /// Rows are split into contiguous bands, one per worker; the call
    /// returns once every band is written.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> RenderResult<&PixelBuffer> {
        let settings = &self.settings;
        let (width, height) = (settings.width, settings.height);
        if self.image.width() != width || self.image.height() != height {
            self.image.resize(width, height);
        }
        if width == 0 || height == 0 {
            log::warn!("Skipping render of empty {}x{} image", width, height);
            return Ok(&self.image);
        }

        let workers = settings.worker_count();
        let band_rows = (height as usize).div_ceil(workers);
        let samples = settings.samples_per_pixel.max(1);
        log::info!(
            "Rendering {}x{} @ {} spp, depth {}, {} objects on {} workers",
            width,
            height,
            samples,
            settings.max_depth,
            scene.len(),
            workers
        );

        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
        let tracer = settings.path_tracer();
        let gamma = settings.gamma;
        let seed = settings.seed;
        let inv_width = 1.0 / width as f32;
        let inv_height = 1.0 / height as f32;

        let start = Instant::now();
        pool.install(|| {
            self.image
                .pixels
                .par_chunks_mut(band_rows * width as usize)
                .enumerate()
                .for_each(|(band, pixels)| {
                    let first_row = band * band_rows;
                    for (offset, row) in pixels.chunks_mut(width as usize).enumerate() {
                        let j = (first_row + offset) as u32;
                        let mut rng = row_rng(seed, j);

                        for (i, pixel) in row.iter_mut().enumerate() {
                            let mut color = Color::ZERO;
                            for _ in 0..samples {
                                let u = (i as f32 + gen_f32(&mut rng)) * inv_width;
                                let v = 1.0 - (j as f32 + gen_f32(&mut rng)) * inv_height;
                                let ray = camera.get_ray(u, v, &mut rng);
                                color += tracer.trace(scene, &ray, 0, &mut rng);
                            }
                            color /= samples as f32;
                            *pixel = color_to_rgba(gamma_correct(color, gamma));
                        }
                    }
                });
        });

        log::info!("Rendered in {:?}", start.elapsed());
        Ok(&self.image)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}
