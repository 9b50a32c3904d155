// Reading the photo to heal and writing the result back out.
// Frames live as packed 0x00RRGGBB; files go through `image` as 8-bit RGB.
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use log::info;

use crate::error::Error;
use crate::types::{pack, unpack, FrameBuffer};

/// Load any format `image` can decode; alpha is dropped, grey is expanded to RGB.
pub fn load_image(path: &Path) -> Result<FrameBuffer, Error> {
    let rgb = image::open(path)
        .map_err(|source| Error::Load { path: path.to_path_buf(), source })?
        .to_rgb8();
    let frame = from_rgb(&rgb);
    info!("read image '{}' ({}x{})", path.display(), frame.width, frame.height);
    Ok(frame)
}

/// Write `frame` to `path`; the format follows the file extension.
pub fn save_image(frame: &FrameBuffer, path: &Path) -> Result<(), Error> {
    let rgb = to_rgb(frame)?;
    rgb.save(path).map_err(|source| Error::Save { path: path.to_path_buf(), source })
}

pub fn from_rgb(rgb: &RgbImage) -> FrameBuffer {
    let (w, h) = rgb.dimensions();
    let pixels = rgb.pixels().map(|p| pack(p.0)).collect();
    FrameBuffer { width: w as usize, height: h as usize, pixels }
}

pub fn to_rgb(frame: &FrameBuffer) -> Result<RgbImage, Error> {
    let raw: Vec<u8> = frame.pixels.iter().flat_map(|&p| unpack(p)).collect();
    ImageBuffer::<Rgb<u8>, _>::from_raw(frame.width as u32, frame.height as u32, raw).ok_or_else(|| {
        Error::DimensionMismatch(format!(
            "frame {}x{} holds {} pixels",
            frame.width,
            frame.height,
            frame.pixels.len()
        ))
    })
}
