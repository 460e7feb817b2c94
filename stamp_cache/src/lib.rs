// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stamp Cache turns subtitle bitmaps into drawable surfaces and keeps them
//! around so the same bitmap and palette are only rendered once.
//!
//! A [`Bitmap`] is either a compressed PNG payload (`bpp == 0`) or a grid of
//! palette indices (`bpp != 0`) that needs a [`Palette`]. [`BitmapCache::get`]
//! looks the pair up by identity and hands back a borrowed [`Surface`],
//! creating it on a miss.
//!
//! ```
//! use std::sync::Arc;
//! use stamp_cache::{Bitmap, BitmapCache, Color, Palette};
//!
//! let bitmap = Arc::new(Bitmap::indexed(2, 1, 4, vec![0, 1]));
//! let palette = Arc::new(Palette::new(vec![
//!     Color::new(255, 0, 0, 255),
//!     Color::new(0, 255, 0, 255),
//! ]));
//!
//! let mut cache = BitmapCache::new(false);
//! let surface = cache.get(&bitmap, Some(&palette)).unwrap();
//! assert_eq!(surface.pixel(0, 0), Some(0xffff0000));
//! assert_eq!(surface.pixel(1, 0), Some(0xff00ff00));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Implements the standard library integrations.
//! - `png` (enabled by default): Decodes compressed bitmaps. Without it, compressed
//!   bitmaps fail with [`ErrorKind::DecodeFailure`].

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitmap;
mod error;
mod surface;

pub mod cache;
pub mod factory;

pub use bitmap::{Bitmap, BitmapFormat, Color, Palette};
pub use cache::{BitmapCache, CacheConfig};
pub use error::{Error, ErrorKind};
pub use surface::{swap_red_blue, Argb, Surface};
