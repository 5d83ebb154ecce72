//! Live view of frames as they render.

use std::process;
use std::thread;
use std::time::{Duration, Instant};

use image::RgbImage;
use log::{debug, info};
use sdl2::{
    event::Event,
    keyboard::Keycode,
    pixels::PixelFormatEnum,
    render::{Canvas, Texture},
    video::Window,
    EventPump, Sdl,
};

use crate::output::OutputError;

/// Minimum time between two partial-frame refreshes.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(50);

fn display<E: ToString>(err: E) -> OutputError {
    OutputError::Display(err.to_string())
}

/// A window showing the surface being rendered.
///
/// Closing the window (or pressing Escape or Q) ends the process.
pub struct Preview {
    _context: Sdl,
    canvas: Canvas<Window>,
    texture: Texture,
    events: EventPump,
    last_refresh: Instant,
}

impl Preview {
    pub fn open(width: u32, height: u32) -> Result<Self, OutputError> {
        let context = sdl2::init().map_err(display)?;
        let video = context.video().map_err(display)?;
        let window = video
            .window("reel", width, height)
            .position_centered()
            .build()
            .map_err(display)?;

        let mut canvas = window.into_canvas().build().map_err(display)?;
        let texture = canvas
            .texture_creator()
            .create_texture_streaming(PixelFormatEnum::RGB24, width, height)
            .map_err(display)?;
        canvas.clear();
        canvas.present();

        let events = context.event_pump().map_err(display)?;

        Ok(Self {
            _context: context,
            canvas,
            texture,
            events,
            last_refresh: Instant::now(),
        })
    }

    fn pump(&mut self) {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                }
                | Event::KeyDown {
                    keycode: Some(Keycode::Q), ..
                } => {
                    info!("Preview closed, stopping");
                    process::exit(0);
                }
                _event => {}
            }
        }
    }

    fn present(&mut self) -> Result<(), OutputError> {
        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None).map_err(display)?;
        self.canvas.present();
        Ok(())
    }

    /// Uploads and presents `surface` right away.
    pub fn show(&mut self, surface: &RgbImage) -> Result<(), OutputError> {
        self.pump();

        let pitch = surface.width() as usize * 3;
        self.texture
            .update(None, surface.as_raw(), pitch)
            .map_err(display)?;
        self.present()?;

        self.last_refresh = Instant::now();
        Ok(())
    }

    /// Like [`show`](Preview::show), at most once per [`REFRESH_INTERVAL`].
    pub fn refresh(&mut self, surface: &RgbImage) -> Result<(), OutputError> {
        if self.last_refresh.elapsed() < REFRESH_INTERVAL {
            return Ok(());
        }

        debug!("Preview refresh");
        self.show(surface)
    }

    /// Keeps the last frame on screen until the window is closed.
    pub fn hold(&mut self) -> Result<(), OutputError> {
        loop {
            self.pump();
            self.present()?;
            thread::sleep(REFRESH_INTERVAL);
        }
    }
}
