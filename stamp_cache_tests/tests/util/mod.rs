// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

use std::sync::Arc;

use stamp_cache::{Argb, Bitmap, Color, Palette, Surface};

/// The 2x1 stamp used throughout: index 0 then index 1.
pub(crate) fn two_pixel_stamp() -> Arc<Bitmap> {
    Arc::new(Bitmap::indexed(2, 1, 4, vec![0, 1]))
}

/// Opaque red and opaque green.
pub(crate) fn red_green_palette() -> Arc<Palette> {
    Arc::new(Palette::new(vec![
        Color::new(255, 0, 0, 255),
        Color::new(0, 255, 0, 255),
    ]))
}

/// A palette typical of subtitle stamps: a transparent background carrying a
/// stray color, a translucent outline and an opaque fill.
pub(crate) fn subtitle_palette() -> Arc<Palette> {
    Arc::new(Palette::new(vec![
        Color::new(90, 200, 30, 0),
        Color::new(16, 32, 64, 128),
        Color::new(240, 240, 10, 255),
        Color::new(0, 0, 255, 255),
    ]))
}

/// A 4x3 paletted stamp cycling through the first four palette entries.
pub(crate) fn subtitle_stamp() -> Arc<Bitmap> {
    let indices = (0..12).map(|i| (i % 4) as u8).collect();
    Arc::new(Bitmap::indexed(4, 3, 2, indices))
}

/// Encodes 8-bit pixel rows as an in-memory PNG.
pub(crate) fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

/// A compressed 3x2 RGBA stamp with a mix of opaque and translucent pixels.
pub(crate) fn png_stamp() -> Arc<Bitmap> {
    let pixels: [[u8; 4]; 6] = [
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
        [10, 20, 30, 128],
        [200, 100, 50, 0],
        [255, 255, 255, 64],
    ];
    let payload = encode_png(3, 2, png::ColorType::Rgba, pixels.as_flattened());
    Arc::new(Bitmap::compressed(3, 2, payload))
}

/// All pixels of a surface, unpacked.
pub(crate) fn channels(surface: &Surface) -> Vec<Argb> {
    surface
        .data()
        .iter()
        .map(|&px| Argb::from_packed(px))
        .collect()
}
