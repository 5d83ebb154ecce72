//! Turns a frame into pixels.

use image::RgbImage;
use rayon::prelude::*;

use crate::{
    camera::Viewport,
    render::{trace::trace, TRACE_DEPTH},
    scene::Frame,
    vec3::Vec3,
};

/// Rows rendered between two progress callbacks.
pub const BAND_ROWS: usize = 16;

/// Maps a color channel onto a byte. Anything at or above 1.0 saturates.
#[inline]
pub fn quantize(channel: f64) -> u8 {
    if channel >= 1.0 {
        255
    } else {
        // Negative and NaN channels saturate to zero in the cast.
        (channel * 256.0).floor() as u8
    }
}

/// Averages a `samples` x `samples` grid of rays over the pixel whose lower
/// left corner is `(px, py)`, counting rows from the bottom.
fn sample_pixel(frame: &Frame, viewport: &Viewport, px: usize, py: usize, samples: u32) -> Vec3<f64> {
    let step = 1.0 / samples as f64;

    let mut color = Vec3::ZERO;
    for sy in 0..samples {
        for sx in 0..samples {
            let x = px as f64 + sx as f64 * step;
            let y = py as f64 + sy as f64 * step;
            color += trace(&viewport.ray(x, y), frame, TRACE_DEPTH);
        }
    }

    color / (samples * samples) as f64
}

/// Renders `frame` into `surface`, whose dimensions set the resolution.
///
/// Rows are traced in parallel, band by band from the top of the image, and
/// `progress` sees the partially filled surface after every band.
pub fn render_frame<F>(frame: &Frame, samples: u32, surface: &mut RgbImage, mut progress: F)
where
    F: FnMut(&RgbImage),
{
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let viewport = frame.camera.viewport(width, height);
    let samples = samples.max(1);

    let height = height as usize;
    let row_len = width as usize * 3;

    let mut start = 0;
    while start < height {
        let end = (start + BAND_ROWS).min(height);

        let pixels: &mut [u8] = &mut **surface;
        pixels[start * row_len..end * row_len]
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(i, row)| {
                // Image rows run top-down, view-plane rows bottom-up.
                let py = height - 1 - (start + i);
                for (px, pixel) in row.chunks_mut(3).enumerate() {
                    let color = sample_pixel(frame, &viewport, px, py, samples);
                    pixel[0] = quantize(color.x);
                    pixel[1] = quantize(color.y);
                    pixel[2] = quantize(color.z);
                }
            });

        progress(surface);
        start = end;
    }
}
