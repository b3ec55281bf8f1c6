//! Shared fixtures for unit tests.

use std::io::Cursor;
use std::sync::Mutex;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use crate::encode::{EncodeError, RasterEncoder};

/// Smooth gradient; compresses well.
pub fn gradient_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            128,
        ])
    })
}

/// Deterministic pseudo-random noise; compresses badly.
pub fn noisy_rgb(width: u32, height: u32) -> RgbImage {
    let mut state: u32 = 0x1234_5678;
    let mut next = move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 24) as u8
    };
    RgbImage::from_fn(width, height, |_, _| Rgb([next(), next(), next()]))
}

/// Left half opaque red, right half fully transparent.
pub fn translucent_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 0])
        }
    })
}

/// Encode a fixture into a container the decoder understands.
pub fn encode_fixture<I>(img: &I, format: ImageFormat) -> Vec<u8>
where
    I: Clone + Into<DynamicImage>,
{
    let dynamic: DynamicImage = img.clone().into();
    let mut buffer = Cursor::new(Vec::new());
    dynamic
        .write_to(&mut buffer, format)
        .expect("fixture encodes");
    buffer.into_inner()
}

/// Encoder that returns pre-scripted output sizes and records the
/// quality of every call.
pub struct ScriptedEncoder {
    script: Mutex<Vec<Result<usize, &'static str>>>,
    calls: Mutex<Vec<f32>>,
}

impl ScriptedEncoder {
    pub fn new(mut script: Vec<Result<usize, &'static str>>) -> Self {
        script.reverse();
        Self {
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<f32> {
        self.calls.lock().unwrap().clone()
    }
}

impl RasterEncoder for ScriptedEncoder {
    fn encode(&self, _raster: &RgbImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        self.calls.lock().unwrap().push(quality);
        match self.script.lock().unwrap().pop() {
            Some(Ok(size)) => Ok(vec![0xAB; size]),
            Some(Err(msg)) => Err(EncodeError::EncodingFailed(msg.to_string())),
            None => Err(EncodeError::EncodingFailed("script exhausted".to_string())),
        }
    }
}
