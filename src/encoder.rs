//! QR Encoder - Narrow Rendering Seam
//!
//! The pipeline only sees `QrEncoder`; tests substitute a stub, production
//! uses `ModuleEncoder` over the `qrcode` and `image` crates.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};
use thiserror::Error;

use crate::config::{ModuleStyle, QrOptions};

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("QR encoding failed: {0}")]
    Qr(#[from] QrError),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid color {0:?}: expected #RRGGBB")]
    Color(String),
}

/// Capability interface: payload + options in, PNG bytes out.
pub trait QrEncoder {
    fn encode(&self, payload: &str, options: &QrOptions) -> Result<Vec<u8>, EncodeError>;
}

/// Real encoder. Always level H so the symbol survives ~30% damage when
/// printed small or partially obscured.
pub struct ModuleEncoder;

impl QrEncoder for ModuleEncoder {
    fn encode(&self, payload: &str, options: &QrOptions) -> Result<Vec<u8>, EncodeError> {
        let dark = parse_hex_color(&options.dark)?;
        let light = parse_hex_color(&options.light)?;

        let code = build_symbol(payload, options.version)?;
        let image = rasterize(&code, options, dark, light);

        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(bytes)
    }
}

/// Fixed version first; if the payload overflows it, fall back to auto-fit.
/// The fallback is part of the contract, not an error.
fn build_symbol(payload: &str, version: Option<i16>) -> Result<QrCode, QrError> {
    if let Some(v) = version {
        match QrCode::with_version(payload, Version::Normal(v), EcLevel::H) {
            Ok(code) => return Ok(code),
            Err(QrError::DataTooLong) => {}
            Err(e) => return Err(e),
        }
    }
    QrCode::with_error_correction_level(payload, EcLevel::H)
}

fn rasterize(code: &QrCode, options: &QrOptions, dark: Rgba<u8>, light: Rgba<u8>) -> RgbaImage {
    let modules = code.to_colors();
    let width = code.width() as u32;
    let size = options.box_size;
    let border = options.border;
    let pixels = (width + 2 * border) * size;

    let mut image = RgbaImage::from_pixel(pixels, pixels, light);

    for my in 0..width {
        for mx in 0..width {
            if modules[(my * width + mx) as usize] != qrcode::Color::Dark {
                continue;
            }
            let origin_x = (border + mx) * size;
            let origin_y = (border + my) * size;
            for dy in 0..size {
                for dx in 0..size {
                    if module_covers(options.style, dx, dy, size) {
                        image.put_pixel(origin_x + dx, origin_y + dy, dark);
                    }
                }
            }
        }
    }

    image
}

/// Whether pixel (dx, dy) inside a module cell of `size` pixels is painted.
fn module_covers(style: ModuleStyle, dx: u32, dy: u32, size: u32) -> bool {
    let half = size as f64 / 2.0;
    let cx = dx as f64 + 0.5 - half;
    let cy = dy as f64 + 0.5 - half;
    match style {
        ModuleStyle::Normal => true,
        ModuleStyle::CircularModules => cx * cx + cy * cy <= half * half,
        ModuleStyle::RoundedModules => {
            let radius = size as f64 / 4.0;
            let inner = half - radius;
            let ex = (cx.abs() - inner).max(0.0);
            let ey = (cy.abs() - inner).max(0.0);
            ex * ex + ey * ey <= radius * radius
        }
    }
}

pub fn parse_hex_color(spec: &str) -> Result<Rgba<u8>, EncodeError> {
    let hex = spec.strip_prefix('#').unwrap_or(spec);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EncodeError::Color(spec.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| EncodeError::Color(spec.to_string()))
    };
    Ok(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255]))
}
