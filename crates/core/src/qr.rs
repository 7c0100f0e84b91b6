//! QR card encoding and decoding.
//!
//! Every patient gets a PNG encoding their business code, rendered once at
//! registration and served as a printable card. Lookup goes the other way:
//! a photographed card is decoded back to the code.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::error::CoreError;

/// Rendered pixel size of one QR module.
const MODULE_PIXELS: u32 = 10;

/// Quiet zone around the code, in modules.
const QUIET_ZONE_MODULES: u32 = 4;

/// Render `data` as a greyscale QR image.
///
/// Low error correction keeps the symbol small; cards are scanned flat,
/// not damaged.
pub fn render(data: &str) -> Result<GrayImage, CoreError> {
    let code = QrCode::with_error_correction_level(data, EcLevel::L)
        .map_err(|e| CoreError::Internal(format!("QR encoding failed: {e}")))?;

    let modules = code.to_colors();
    let width = code.width() as u32;
    let side = (width + 2 * QUIET_ZONE_MODULES) * MODULE_PIXELS;

    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));
    for (i, module) in modules.iter().enumerate() {
        if *module != Color::Dark {
            continue;
        }
        let x0 = (i as u32 % width + QUIET_ZONE_MODULES) * MODULE_PIXELS;
        let y0 = (i as u32 / width + QUIET_ZONE_MODULES) * MODULE_PIXELS;
        for dy in 0..MODULE_PIXELS {
            for dx in 0..MODULE_PIXELS {
                img.put_pixel(x0 + dx, y0 + dy, Luma([0u8]));
            }
        }
    }
    Ok(img)
}

/// Render `data` as an in-memory PNG, ready to write to disk or a response.
pub fn render_png(data: &str) -> Result<Vec<u8>, CoreError> {
    let img = render(data)?;
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| CoreError::Internal(format!("QR PNG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Decode the first QR code found in raw image bytes (any supported format).
pub fn decode_bytes(bytes: &[u8]) -> Result<String, CoreError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| CoreError::Validation(format!("Unreadable image: {e}")))?
        .to_luma8();

    let (w, h) = img.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
            img.get_pixel(x as u32, y as u32).0[0]
        });

    let grids = prepared.detect_grids();
    let grid = grids
        .first()
        .ok_or_else(|| CoreError::Validation("No QR code found in image".into()))?;

    let (_meta, content) = grid
        .decode()
        .map_err(|e| CoreError::Validation(format!("Failed to decode QR code: {e}")))?;
    Ok(content)
}
