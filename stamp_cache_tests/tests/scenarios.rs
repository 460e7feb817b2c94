// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end walks through concrete cache usage.

use std::sync::Arc;

use stamp_cache::{Argb, Bitmap, BitmapCache, ErrorKind};

use crate::util::{channels, encode_png, png_stamp, red_green_palette, two_pixel_stamp};

#[test]
fn clear_then_recreate() {
    let mut cache = BitmapCache::new(false);
    let (bitmap, palette) = (two_pixel_stamp(), red_green_palette());

    let first = cache.get(&bitmap, Some(&palette)).unwrap().clone();
    assert_eq!((first.width(), first.height()), (2, 1));
    assert_eq!(
        Argb::from_packed(first.pixel(0, 0).unwrap()),
        Argb {
            a: 255,
            r: 255,
            g: 0,
            b: 0
        }
    );
    assert_eq!(
        Argb::from_packed(first.pixel(1, 0).unwrap()),
        Argb {
            a: 255,
            r: 0,
            g: 255,
            b: 0
        }
    );

    cache.clear();
    assert!(!cache.contains(&bitmap, Some(&palette)));

    let second = cache.get(&bitmap, Some(&palette)).unwrap();
    assert_eq!(second.data(), first.data());
    assert_ne!(second.serial(), first.serial());
}

#[test]
fn decode_failure_on_truncated_payload() {
    let mut cache = BitmapCache::new(false);
    let mut payload = encode_png(8, 8, png::ColorType::Rgba, &[0x7f; 8 * 8 * 4]);
    // Keep the signature and header, cut the image data short.
    payload.truncate(40);
    let bitmap = Arc::new(Bitmap::compressed(8, 8, payload));

    let err = cache.get(&bitmap, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    assert!(!cache.contains(&bitmap, None));
    assert!(cache.is_empty());
}

#[test]
fn decode_failure_on_empty_payload() {
    let mut cache = BitmapCache::new(false);
    let bitmap = Arc::new(Bitmap::compressed(0, 0, Vec::new()));
    let err = cache.get(&bitmap, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeFailure);
}

#[test]
fn missing_palette_is_invalid_input() {
    let mut cache = BitmapCache::new(false);
    let bitmap = two_pixel_stamp();

    let err = cache.get(&bitmap, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(cache.is_empty());
    assert_eq!(cache.capacity(), 0);
}

#[test]
fn png_stamp_is_premultiplied() {
    let mut cache = BitmapCache::new(false);
    let surface = cache.get(&png_stamp(), None).unwrap();
    assert_eq!((surface.width(), surface.height()), (3, 2));
    assert_eq!(surface.stride(), 12);

    let px = channels(surface);
    assert_eq!(
        px[0],
        Argb {
            a: 255,
            r: 255,
            g: 0,
            b: 0
        }
    );
    assert_eq!(
        px[2],
        Argb {
            a: 255,
            r: 0,
            g: 0,
            b: 255
        }
    );
    assert_eq!(
        px[3],
        Argb {
            a: 128,
            r: 5,
            g: 10,
            b: 15
        }
    );
    assert_eq!(px[4], Argb::default());
    assert_eq!(
        px[5],
        Argb {
            a: 64,
            r: 64,
            g: 64,
            b: 64
        }
    );
}

#[test]
fn png_and_paletted_stamps_share_a_cache() {
    let mut cache = BitmapCache::new(false);
    let (stamp, palette, png) = (two_pixel_stamp(), red_green_palette(), png_stamp());

    let a = cache.get(&stamp, Some(&palette)).unwrap().serial();
    let b = cache.get(&png, None).unwrap().serial();
    assert_ne!(a, b);
    assert!(cache.contains(&stamp, Some(&palette)));
    assert!(cache.contains(&png, None));
    assert_eq!(cache.len(), 2);
}

#[test]
fn surface_bytes_are_native_endian_argb() {
    let mut cache = BitmapCache::new(false);
    let surface = cache
        .get(&two_pixel_stamp(), Some(&red_green_palette()))
        .unwrap();
    let bytes = surface.data_as_u8_slice();
    assert_eq!(bytes.len(), surface.stride() * surface.height() as usize);
    assert_eq!(&bytes[..4], &0xffff_0000_u32.to_ne_bytes());
}
