// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Materializing surfaces from bitmap descriptors.
//!
//! Everything here is stateless: [`create`] dispatches on the bitmap format,
//! decodes or blits the pixels and applies the channel corrections. The cache
//! decides when to call it.

use alloc::vec::Vec;

use crate::bitmap::{Bitmap, BitmapFormat, Color, Palette};
use crate::error::Error;
use crate::surface::{premultiply, Argb, Surface};

/// Highest bit depth a paletted bitmap may declare; indices are stored one per byte.
const MAX_PALETTED_BPP: u8 = 8;

/// Renders `bitmap` into a new surface.
///
/// Compressed bitmaps are decoded; paletted bitmaps are looked up in
/// `palette`, which is then mandatory. With `swap_red_blue`, red and blue are
/// exchanged in every produced pixel.
///
/// Either the whole surface is produced or an error is returned.
pub fn create(
    bitmap: &Bitmap,
    palette: Option<&Palette>,
    swap_red_blue: bool,
) -> Result<Surface, Error> {
    match bitmap.format() {
        BitmapFormat::Png => create_png(bitmap, swap_red_blue),
        BitmapFormat::Paletted => {
            let palette =
                palette.ok_or(Error::invalid_input("paletted bitmap without a palette"))?;
            create_paletted(bitmap, palette, swap_red_blue)
        }
    }
}

/// Checks `bitmap` and `palette` without rendering anything.
///
/// Reports every [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput)
/// that [`create`] would, so that bad input can be rejected before any
/// storage is set aside for it. Compressed payloads are only checked by
/// decoding them.
pub fn validate(bitmap: &Bitmap, palette: Option<&Palette>) -> Result<(), Error> {
    match bitmap.format() {
        BitmapFormat::Png => Ok(()),
        BitmapFormat::Paletted => {
            let palette =
                palette.ok_or(Error::invalid_input("paletted bitmap without a palette"))?;
            validate_paletted(bitmap, palette)
        }
    }
}

fn validate_paletted(bitmap: &Bitmap, palette: &Palette) -> Result<(), Error> {
    if bitmap.bpp() == 0 || bitmap.bpp() > MAX_PALETTED_BPP {
        return Err(Error::invalid_input("unsupported bits per pixel"));
    }
    let count = usize::try_from(u64::from(bitmap.width()) * u64::from(bitmap.height()))
        .unwrap_or(usize::MAX);
    let indices = bitmap
        .pixels()
        .get(..count)
        .ok_or(Error::invalid_input("index data shorter than the bitmap"))?;
    let palette_len = palette.len();
    if indices.iter().any(|&index| usize::from(index) >= palette_len) {
        return Err(Error::invalid_input("palette index out of range"));
    }
    Ok(())
}

/// Renders a paletted bitmap, one packed pixel per source index.
///
/// Palette entries are premultiplied by their alpha like every other surface
/// pixel, so a translucent entry does not keep its straight color values.
pub fn create_paletted(
    bitmap: &Bitmap,
    palette: &Palette,
    swap_red_blue: bool,
) -> Result<Surface, Error> {
    validate_paletted(bitmap, palette)?;

    log::debug!(
        "creating {}x{} paletted surface ({} colors)",
        bitmap.width(),
        bitmap.height(),
        palette.len()
    );
    let mut surface = Surface::new(bitmap.width(), bitmap.height())?;
    let indices = bitmap.pixels();

    let colors = working_palette(palette, swap_red_blue)?;
    for (dst, &index) in surface.data_mut().iter_mut().zip(indices) {
        *dst = *colors
            .get(usize::from(index))
            .ok_or(Error::invalid_input("palette index out of range"))?;
    }

    Ok(surface)
}

/// Packs a copy of the palette, ready to be blitted.
///
/// Entries with zero alpha are forced to black: a compositor antialiasing the
/// surface blends the color of transparent pixels into their neighbours
/// regardless of alpha, and black makes that fringe neutral.
fn working_palette(palette: &Palette, swap_red_blue: bool) -> Result<Vec<u32>, Error> {
    let mut colors = Vec::new();
    colors
        .try_reserve_exact(palette.len())
        .map_err(|e| Error::from_reserve(e, "palette copy"))?;
    colors.extend(palette.colors().iter().map(|&color| {
        let mut color = if swap_red_blue {
            color.swap_red_blue()
        } else {
            color
        };
        if color.a == 0 {
            color = Color::new(0, 0, 0, 0);
        }
        pack_premultiplied(color)
    }));
    Ok(colors)
}

fn pack_premultiplied(color: Color) -> u32 {
    Argb {
        a: color.a,
        r: premultiply(color.r, color.a),
        g: premultiply(color.g, color.a),
        b: premultiply(color.b, color.a),
    }
    .pack()
}

/// Sequential reader over a compressed payload.
///
/// Hands out consecutive byte ranges until the payload is exhausted. This is
/// the stream the PNG decoder pulls from.
#[derive(Clone, Debug)]
pub struct PayloadReader<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> PayloadReader<'a> {
    /// Starts reading at the beginning of `payload`.
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }

    /// Number of bytes handed out so far.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.payload.len() - self.offset
    }

    /// Returns the next `len` bytes.
    ///
    /// Fails with [`ErrorKind::DecodeFailure`](crate::ErrorKind::DecodeFailure),
    /// without advancing, if fewer than `len` bytes remain.
    pub fn read_range(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if len > self.remaining() {
            return Err(Error::decode_failure("payload exhausted"));
        }
        let range = &self.payload[self.offset..self.offset + len];
        self.offset += len;
        Ok(range)
    }
}

#[cfg(feature = "std")]
impl std::io::Read for PayloadReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = buf.len().min(self.remaining());
        let range = self
            .read_range(len)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::UnexpectedEof, e))?;
        buf[..len].copy_from_slice(range);
        Ok(len)
    }
}

/// Decodes a compressed bitmap into a premultiplied surface.
#[cfg(feature = "png")]
pub fn create_png(bitmap: &Bitmap, swap_red_blue: bool) -> Result<Surface, Error> {
    let mut decoder = png::Decoder::new(PayloadReader::new(bitmap.pixels()));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(decoding_error)?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(reader.output_buffer_size())
        .map_err(|e| Error::from_reserve(e, "decode buffer"))?;
    buf.resize(reader.output_buffer_size(), 0);
    let info = reader.next_frame(&mut buf).map_err(decoding_error)?;

    // The packing below assumes 8-bit samples; anything else would be misread.
    if info.bit_depth != png::BitDepth::Eight {
        return Err(Error::decode_failure(
            "unexpected sample depth after expansion",
        ));
    }
    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(Error::decode_failure("indexed samples were not expanded"));
        }
    };

    log::debug!(
        "decoded {}x{} png surface from {} bytes",
        info.width,
        info.height,
        bitmap.size()
    );
    let mut surface = Surface::new(info.width, info.height)?;
    let width = info.width as usize;
    if width == 0 || info.height == 0 {
        return Ok(surface);
    }

    let row_len = width * channels;
    let rows = buf.chunks(info.line_size).take(info.height as usize);
    for (dst_row, src_row) in surface.data_mut().chunks_exact_mut(width).zip(rows) {
        let src_row = src_row
            .get(..row_len)
            .ok_or(Error::decode_failure("decoded row shorter than the image"))?;
        for (dst, sample) in dst_row.iter_mut().zip(src_row.chunks_exact(channels)) {
            *dst = pack_sample(sample);
        }
    }

    if swap_red_blue {
        crate::surface::swap_red_blue(surface.data_mut());
    }
    Ok(surface)
}

/// Without PNG support compressed bitmaps cannot be rendered.
#[cfg(not(feature = "png"))]
pub fn create_png(_bitmap: &Bitmap, _swap_red_blue: bool) -> Result<Surface, Error> {
    Err(Error::decode_failure("png support is not enabled"))
}

#[cfg(feature = "png")]
fn pack_sample(sample: &[u8]) -> u32 {
    let color = match *sample {
        [v] => Color::new(v, v, v, 0xff),
        [v, a] => Color::new(v, v, v, a),
        [r, g, b] => Color::new(r, g, b, 0xff),
        [r, g, b, a] => Color::new(r, g, b, a),
        _ => Color::default(),
    };
    pack_premultiplied(color)
}

#[cfg(feature = "png")]
fn decoding_error(err: png::DecodingError) -> Error {
    match err {
        png::DecodingError::IoError(_) => Error::decode_failure("payload truncated"),
        png::DecodingError::LimitsExceeded => {
            Error::resource_exhausted("decoder memory limit exceeded")
        }
        _ => Error::decode_failure("malformed payload"),
    }
}
