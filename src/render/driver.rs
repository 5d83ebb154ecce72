use std::time::Instant;

use image::RgbImage;
use log::{debug, info, warn};

use crate::{
    output::OutputError,
    render::{check_pairing, interpolate_frames, render_frame, RenderError, TRACE_DEPTH},
    scene::{Animation, Frame},
};

/// Receives rendered pixels as the animation plays.
pub trait Observer {
    /// Called between row bands while a frame is still being traced.
    fn progress(&mut self, _surface: &RgbImage) {}

    /// Called once per completed frame, with frame numbers counting up from
    /// zero across the whole animation.
    fn finished(&mut self, number: usize, surface: &RgbImage) -> Result<(), OutputError>;
}

/// Number of frames in a segment lasting `offset` seconds, and the alpha
/// advance between consecutive frames.
///
/// The step is `offset / count`, so alpha is measured in seconds rather than
/// as a fraction of the segment; the last frame is always pinned to the end
/// keyframe instead.
pub fn segment_schedule(offset: f64, fps: u32) -> (usize, f64) {
    let count = (offset * fps as f64).floor().max(0.0) as usize;
    let step = if count > 0 { offset / count as f64 } else { 0.0 };

    (count, step)
}

struct Playback<'a, O: ?Sized> {
    animation: &'a Animation,
    observer: &'a mut O,
    surface: RgbImage,
    number: usize,
}

impl<'a, O: Observer + ?Sized> Playback<'a, O> {
    fn emit(&mut self, frame: &Frame) -> Result<(), RenderError> {
        info!("Rendering frame {}", self.number);
        let now = Instant::now();

        let observer = &mut *self.observer;
        render_frame(frame, self.animation.samples, &mut self.surface, |surface| {
            observer.progress(surface)
        });

        info!(
            "Frame {} finished, elapsed: {:.3} s",
            self.number,
            now.elapsed().as_secs_f64()
        );
        self.observer.finished(self.number, &self.surface)?;
        self.number += 1;

        Ok(())
    }

    fn segment(&mut self, index: usize, end_index: usize) -> Result<(), RenderError> {
        let animation = self.animation;
        let (start, end) = (&animation.keyframes[index], &animation.keyframes[end_index]);

        check_pairing(start, end).map_err(|source| RenderError::Interpolation {
            start: index,
            end: end_index,
            source,
        })?;

        let (count, step) = segment_schedule(start.time_offset, animation.fps);
        if count == 0 {
            warn!(
                "Keyframe {} lasts {} s, too short for a single frame at {} fps",
                index, start.time_offset, animation.fps
            );
            return Ok(());
        }
        debug!("Segment {} -> {}: {} frame(s), step {}", index, end_index, count, step);

        for tick in 0..count {
            if tick == 0 {
                self.emit(start)?;
            } else if tick == count - 1 {
                self.emit(end)?;
            } else {
                let alpha = tick as f64 * step;
                let frame = interpolate_frames(start, end, alpha).map_err(|source| RenderError::Interpolation {
                    start: index,
                    end: end_index,
                    source,
                })?;
                self.emit(&frame)?;
            }
        }

        Ok(())
    }
}

/// Plays `animation` segment by segment, handing every frame to `observer`.
///
/// Returns the number of frames rendered.
pub fn render_animation<O>(animation: &Animation, observer: &mut O) -> Result<usize, RenderError>
where
    O: Observer + ?Sized,
{
    let keyframes = &animation.keyframes;
    if keyframes.is_empty() {
        return Err(RenderError::NoKeyframes);
    }

    if animation.max_depth != TRACE_DEPTH {
        debug!(
            "Scene asks for reflection depth {}, tracing to {}",
            animation.max_depth, TRACE_DEPTH
        );
    }
    info!(
        "Rendering {} keyframe(s) at {}x{}, {} fps, {} ray(s) per pixel",
        keyframes.len(),
        animation.width,
        animation.height,
        animation.fps,
        animation.samples * animation.samples
    );

    let mut playback = Playback {
        animation,
        observer,
        surface: RgbImage::new(animation.width, animation.height),
        number: 0,
    };

    let n = keyframes.len();
    if n == 1 {
        playback.emit(&keyframes[0])?;
        return Ok(playback.number);
    }

    let segments = if animation.looping { n } else { n - 1 };
    for index in 0..segments {
        playback.segment(index, (index + 1) % n)?;
    }

    Ok(playback.number)
}
