// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendered surface and its packed pixel layout.
//!
//! Pixels are premultiplied ARGB packed into a native-endian `u32` as
//! `0xAARRGGBB`, which is the layout compositors such as Cairo expect for
//! their 32-bit image surfaces.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use crate::error::Error;

/// Bytes per packed pixel.
pub(crate) const BYTES_PER_PIXEL: usize = 4;

/// An owned, fixed-format pixel buffer ready for compositing.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    /// Creation serial assigned by the owning cache, 0 when created standalone.
    serial: u64,
    data: Vec<u32>,
}

impl Surface {
    /// Allocates a fully transparent surface.
    ///
    /// Fails with [`ErrorKind::ResourceExhausted`](crate::ErrorKind::ResourceExhausted)
    /// when the pixel count overflows or the allocation fails.
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        let len = pixel_count(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::from_reserve(e, "surface allocation"))?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            serial: 0,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance in bytes between the starts of two consecutive rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// The creation serial of this surface.
    ///
    /// Every surface a [`BitmapCache`](crate::BitmapCache) creates gets a new,
    /// strictly increasing serial, so two surfaces with equal serials are the
    /// same cache entry.
    #[inline]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub(crate) fn set_serial(&mut self, serial: u64) {
        self.serial = serial;
    }

    /// Returns the packed pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.data.get(idx).copied()
    }

    /// The packed pixels, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Mutable access to the packed pixels, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// The pixels as native-endian bytes, `stride()` bytes per row.
    #[inline]
    pub fn data_as_u8_slice(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl Debug for Surface {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("serial", &self.serial)
            .finish_non_exhaustive()
    }
}

/// The four channels of a packed pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Argb {
    /// Alpha channel.
    pub a: u8,
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Argb {
    /// Splits a packed `0xAARRGGBB` pixel into channels.
    #[inline]
    pub const fn from_packed(pixel: u32) -> Self {
        let [a, r, g, b] = pixel.to_be_bytes();
        Self { a, r, g, b }
    }

    /// Packs the channels as `0xAARRGGBB`.
    #[inline]
    pub const fn pack(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }
}

/// Exchanges the red and blue channels of every packed pixel in place.
///
/// Alpha and green are left untouched.
pub fn swap_red_blue(pixels: &mut [u32]) {
    for px in pixels {
        let r = (*px & 0x00ff_0000) >> 16;
        let b = (*px & 0x0000_00ff) << 16;
        *px = (*px & 0xff00_ff00) | r | b;
    }
}

/// Multiplies a color channel by alpha, rounding to nearest.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the rounded product of two u8 values divided by 255 fits in u8"
)]
#[inline]
pub(crate) fn premultiply(channel: u8, alpha: u8) -> u8 {
    let t = u32::from(channel) * u32::from(alpha) + 0x80;
    ((t + (t >> 8)) >> 8) as u8
}

fn pixel_count(width: u32, height: u32) -> Result<usize, Error> {
    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::resource_exhausted("surface dimensions overflow"))?;
    count
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(Error::resource_exhausted("surface dimensions overflow"))?;
    Ok(count)
}
