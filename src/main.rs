use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use image::RgbImage;
use log::{info, warn};

#[cfg(feature = "preview")]
use reel::preview::Preview;
use reel::{
    output::{FrameWriter, OutputError},
    render::{self, Observer},
    scene::{self, Animation},
};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

/// Where rendered frames go.
struct Sinks {
    writer: Option<FrameWriter>,
    #[cfg(feature = "preview")]
    preview: Option<Preview>,
}

impl Observer for Sinks {
    #[cfg(feature = "preview")]
    fn progress(&mut self, surface: &RgbImage) {
        if let Some(preview) = &mut self.preview {
            if let Err(err) = preview.refresh(surface) {
                warn!("{}", err);
            }
        }
    }

    fn finished(&mut self, number: usize, surface: &RgbImage) -> Result<(), OutputError> {
        if let Some(writer) = &self.writer {
            let path = writer.write(number, surface)?;
            info!("Frame {} saved as {}", number, path.display());
        }

        #[cfg(feature = "preview")]
        {
            if let Some(preview) = &mut self.preview {
                preview.show(surface)?;
            }
        }

        Ok(())
    }
}

#[cfg(feature = "preview")]
fn open_preview(args: &Args, animation: &Animation) -> Result<Option<Preview>, OutputError> {
    if !args.preview {
        return Ok(None);
    }

    Preview::open(animation.width, animation.height).map(Some)
}

#[cfg(not(feature = "preview"))]
fn open_preview(args: &Args, _animation: &Animation) -> Result<Option<()>, OutputError> {
    if args.preview {
        warn!("Built without the `preview` feature, ignoring --preview");
    }

    Ok(None)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let animation = scene::load(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;

    let writer = match &args.output {
        Some(directory) => Some(FrameWriter::new(directory, args.format.into())?),
        None => None,
    };
    let preview = open_preview(&args, &animation)?;
    if writer.is_none() && preview.is_none() {
        warn!("No output directory and no preview, frames will be discarded");
    }

    let mut sinks = Sinks {
        writer,
        #[cfg(feature = "preview")]
        preview,
    };

    let now = Instant::now();
    let frames = render::render_animation(&animation, &mut sinks)?;
    info!(
        "Rendered {} frame(s), elapsed: {:.3} s",
        frames,
        now.elapsed().as_secs_f64()
    );

    #[cfg(feature = "preview")]
    {
        if let Some(preview) = &mut sinks.preview {
            info!("Close the preview window to exit");
            preview.hold()?;
        }
    }

    Ok(())
}
