//! Numbered frame files on disk.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use image::{codecs::jpeg::JpegEncoder, ColorType, ImageFormat, RgbImage};
use log::debug;

/// Quality used for every JPEG frame.
pub const JPEG_QUALITY: u8 = 70;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Png,
    Jpeg,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpg",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create output directory {}", .path.display())]
    Directory { path: PathBuf, source: io::Error },
    #[error("failed to create {}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to encode {}", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("preview window: {0}")]
    Display(String),
}

/// Writes frames as `frame_<N>.<ext>` into one directory.
#[derive(Debug)]
pub struct FrameWriter {
    directory: PathBuf,
    format: Format,
}

impl FrameWriter {
    /// Creates `directory` (and its parents) when missing.
    pub fn new<P: Into<PathBuf>>(directory: P, format: Format) -> Result<Self, OutputError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|source| OutputError::Directory {
            path: directory.clone(),
            source,
        })?;

        Ok(Self { directory, format })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path(&self, number: usize) -> PathBuf {
        self.directory
            .join(format!("frame_{}.{}", number, self.format.extension()))
    }

    /// Encodes `surface` as frame `number`, returning the file written.
    pub fn write(&self, number: usize, surface: &RgbImage) -> Result<PathBuf, OutputError> {
        let path = self.path(number);

        match self.format {
            Format::Png => surface
                .save_with_format(&path, ImageFormat::Png)
                .map_err(|source| OutputError::Encode {
                    path: path.clone(),
                    source,
                })?,
            Format::Jpeg => {
                let file = File::create(&path).map_err(|source| OutputError::Io {
                    path: path.clone(),
                    source,
                })?;
                let mut writer = BufWriter::new(file);
                JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
                    .encode(surface.as_raw(), surface.width(), surface.height(), ColorType::Rgb8)
                    .map_err(|source| OutputError::Encode {
                        path: path.clone(),
                        source,
                    })?;
            }
        }

        debug!("Wrote {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn frames_are_numbered_by_format() {
        let dir = tempfile::tempdir().unwrap();

        let png = FrameWriter::new(dir.path(), Format::Png).unwrap();
        let jpeg = FrameWriter::new(dir.path(), Format::Jpeg).unwrap();

        assert_eq!(dir.path().join("frame_12.png"), png.path(12));
        assert_eq!(dir.path().join("frame_0.jpg"), jpeg.path(0));
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let writer = FrameWriter::new(&nested, Format::Png).unwrap();

        assert!(writer.directory().is_dir());
    }

    #[test]
    fn png_frames_decode_to_the_same_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FrameWriter::new(dir.path(), Format::Png).unwrap();
        let surface = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8 * 60, y as u8 * 80, 7]));

        let path = writer.write(3, &surface).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(surface, decoded);
    }

    #[test]
    fn jpeg_frames_keep_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FrameWriter::new(dir.path(), Format::Jpeg).unwrap();
        let surface = RgbImage::from_pixel(8, 5, Rgb([200, 100, 50]));

        let path = writer.write(0, &surface).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!((8, 5), decoded.dimensions());
    }
}
