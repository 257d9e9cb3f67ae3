use crate::error::PipelineError;
use crate::tensor::{ScopedTensor, TensorLedger};
use image::{DynamicImage, ImageBuffer, RgbImage};
use std::fmt;
use std::path::PathBuf;
use tract_onnx::prelude::*;

pub const INPUT_SIZE: u32 = 224;

/// Image selected by the user, not yet decoded.
#[derive(Clone)]
pub enum ImageHandle {
    Path(PathBuf),
    #[allow(dead_code)]
    Bytes(Vec<u8>),
    #[allow(dead_code)]
    Decoded(DynamicImage),
}

impl ImageHandle {
    pub fn decode(&self) -> Result<DynamicImage, PipelineError> {
        match self {
            ImageHandle::Path(path) => image::open(path)
                .map_err(|e| PipelineError::InvalidImage(format!("{}: {}", path.display(), e))),
            ImageHandle::Bytes(bytes) => image::load_from_memory(bytes)
                .map_err(|e| PipelineError::InvalidImage(e.to_string())),
            ImageHandle::Decoded(image) => Ok(image.clone()),
        }
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImageHandle::Path(path) => write!(f, "Path({})", path.display()),
            ImageHandle::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            ImageHandle::Decoded(image) => {
                write!(f, "Decoded({}x{})", image.width(), image.height())
            }
        }
    }
}

/// Source index sampled for output index `dst`: `floor(dst * in / out)`,
/// clamped to the last input index.
fn nearest_source_index(dst: u32, in_len: u32, out_len: u32) -> u32 {
    let ratio = in_len as f64 / out_len as f64;
    ((dst as f64 * ratio).floor() as u32).min(in_len - 1)
}

pub fn resize_nearest(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (in_width, in_height) = image.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let src_x = nearest_source_index(x, in_width, width);
        let src_y = nearest_source_index(y, in_height, height);
        *image.get_pixel(src_x, src_y)
    })
}

pub fn normalize(value: u8) -> f32 {
    value as f32 / 127.5 - 1.0
}

/// Decodes `image` into a `[1, 224, 224, 3]` f32 tensor with values in [-1, 1].
pub fn preprocess(image: &ImageHandle, ledger: &TensorLedger) -> Result<ScopedTensor, PipelineError> {
    let rgb = image.decode()?.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(PipelineError::InvalidImage("image has no pixels".to_string()));
    }

    let resized = resize_nearest(&rgb, INPUT_SIZE, INPUT_SIZE);
    let size = INPUT_SIZE as usize;

    let array = tract_ndarray::Array4::from_shape_fn((1, size, size, 3), |(_, y, x, c)| {
        normalize(resized.get_pixel(x as u32, y as u32)[c])
    });

    Ok(ledger.track(array.into_tensor()))
}
