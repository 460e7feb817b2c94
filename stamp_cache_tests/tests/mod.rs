// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `stamp_cache`.
//!
//! - The `util` module holds fixtures shared by the tests: sample bitmaps,
//!   palettes and in-memory PNG encoding.
//! - `properties` checks the guarantees of `BitmapCache::get` that hold for any
//!   input, `scenarios` walks through concrete end-to-end cases.
//! - For test naming, put the "topic" of the test at the start of the name,
//!   e.g. `swap_png_pixels` rather than `png_pixels_swapped`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod scenarios;
mod util;
