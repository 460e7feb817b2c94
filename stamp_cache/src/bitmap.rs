// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Source bitmap and palette descriptors.

use alloc::vec::Vec;

/// How the payload of a [`Bitmap`] is encoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BitmapFormat {
    /// A compressed PNG stream.
    Png,
    /// One palette index per pixel, row-major.
    Paletted,
}

/// A source bitmap as delivered by the subtitle stream.
///
/// Bitmaps are shared as `Arc<Bitmap>` and the cache keys on the identity of
/// that `Arc`, not on the pixels: two bitmaps with identical content are still
/// two different cache entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    bpp: u8,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap from its raw parts.
    ///
    /// A `bpp` of zero marks `pixels` as a compressed payload, anything else
    /// marks it as a grid of palette indices.
    pub fn new(width: u32, height: u32, bpp: u8, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bpp,
            pixels,
        }
    }

    /// Creates a paletted bitmap with one index byte per pixel.
    pub fn indexed(width: u32, height: u32, bpp: u8, indices: Vec<u8>) -> Self {
        Self::new(width, height, bpp, indices)
    }

    /// Creates a bitmap holding a compressed PNG payload.
    ///
    /// The declared `width` and `height` are informational; the rendered
    /// surface takes its size from the decoded image.
    pub fn compressed(width: u32, height: u32, payload: Vec<u8>) -> Self {
        Self::new(width, height, 0, payload)
    }

    /// Declared width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Declared height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bits per pixel; zero for compressed payloads.
    #[inline]
    pub fn bpp(&self) -> u8 {
        self.bpp
    }

    /// The raw payload: compressed bytes or palette indices.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Size of the payload in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    /// The encoding of the payload, derived from [`Bitmap::bpp`].
    #[inline]
    pub fn format(&self) -> BitmapFormat {
        if self.bpp == 0 {
            BitmapFormat::Png
        } else {
            BitmapFormat::Paletted
        }
    }
}

/// A straight (non-premultiplied) RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 0 is fully transparent.
    pub a: u8,
}

impl Color {
    /// Creates a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the color with red and blue exchanged.
    #[inline]
    pub const fn swap_red_blue(self) -> Self {
        Self {
            r: self.b,
            g: self.g,
            b: self.r,
            a: self.a,
        }
    }
}

/// An ordered list of colors indexed by a paletted [`Bitmap`].
///
/// Like bitmaps, palettes are shared as `Arc<Palette>` and compared by
/// identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette from its entries.
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// All entries, in index order.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Returns the entry at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl FromIterator<Color> for Palette {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn format_follows_bpp() {
        assert_eq!(
            Bitmap::compressed(4, 4, vec![1, 2, 3]).format(),
            BitmapFormat::Png
        );
        assert_eq!(
            Bitmap::indexed(2, 1, 4, vec![0, 1]).format(),
            BitmapFormat::Paletted
        );
    }

    #[test]
    fn size_is_payload_length() {
        let bitmap = Bitmap::compressed(0, 0, vec![0; 17]);
        assert_eq!(bitmap.size(), 17);
        assert_eq!(bitmap.bpp(), 0);
    }

    #[test]
    fn swap_red_blue_keeps_green_and_alpha() {
        let c = Color::new(1, 2, 3, 4).swap_red_blue();
        assert_eq!(c, Color::new(3, 2, 1, 4));
    }

    #[test]
    fn palette_from_iter() {
        let palette: Palette = [Color::new(0, 0, 0, 0), Color::new(9, 9, 9, 9)]
            .into_iter()
            .collect();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get(1), Some(Color::new(9, 9, 9, 9)));
        assert_eq!(palette.get(2), None);
    }
}
