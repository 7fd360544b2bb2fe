// PNG export of the current frame and silhouette.
// Visual: nothing changes on screen; two files appear next to the binary.

use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::error::Error;
use crate::types::{FrameBuffer, Mask};

/// Unpack 0x00RRGGBB pixels into an RGB image.
pub fn frame_to_image(fb: &FrameBuffer) -> RgbImage {
    RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        Rgb([((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8])
    })
}

/// Coverage as 8-bit gray: opaque silhouette = white.
pub fn mask_to_image(mask: &Mask) -> GrayImage {
    GrayImage::from_fn(mask.width as u32, mask.height as u32, |x, y| {
        let a = mask.alpha[y as usize * mask.width + x as usize];
        Luma([(a.clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}

pub fn save_png(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    frame_to_image(fb).save(path)?;
    tracing::info!(path = %path.display(), "saved frame");
    Ok(())
}

pub fn save_mask_png(mask: &Mask, path: &Path) -> Result<(), Error> {
    mask_to_image(mask).save(path)?;
    tracing::info!(path = %path.display(), "saved silhouette");
    Ok(())
}

/// Frame and silhouette together, as the `S` key does.
pub fn save_snapshot(fb: &FrameBuffer, mask: &Mask, frame_path: &Path, mask_path: &Path) -> Result<(), Error> {
    save_png(fb, frame_path)?;
    save_mask_png(mask, mask_path)
}
