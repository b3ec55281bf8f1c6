//! Core types for raster decoding.

use image::DynamicImage;
use thiserror::Error;

/// Error types for raster decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input byte sequence was empty.
    #[error("Empty image input")]
    Empty,

    /// The container format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image decoded to a zero-width or zero-height raster.
    #[error("Image has zero dimensions ({width}x{height})")]
    ZeroDimensions { width: u32, height: u32 },
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Rotate/flip an image so it displays upright.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Orientation::Normal => img,
            Orientation::FlipHorizontal => img.fliph(),
            Orientation::Rotate180 => img.rotate180(),
            Orientation::FlipVertical => img.flipv(),
            Orientation::Transpose => img.rotate90().fliph(),
            Orientation::Rotate90CW => img.rotate90(),
            Orientation::Transverse => img.rotate270().fliph(),
            Orientation::Rotate270CW => img.rotate270(),
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded, upright raster with known non-zero dimensions.
///
/// The pixel buffer keeps whatever channel layout the source decoded to,
/// so alpha is still available for compositing at encode time.
#[derive(Debug, Clone)]
pub struct DecodedRaster {
    image: DynamicImage,
}

impl DecodedRaster {
    /// Wrap a decoded image, rejecting zero-sized rasters.
    pub fn new(image: DynamicImage) -> Result<Self, DecodeError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(DecodeError::ZeroDimensions { width, height });
        }
        Ok(Self { image })
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether the pixel buffer carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// Borrow the underlying pixel buffer.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}
