// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bitmap-to-surface cache.
//!
//! [`BitmapCache`] is the entry point: it asks the [`SlotStore`] whether a
//! bitmap/palette pair was rendered before and, on a miss, renders it with
//! [`factory::create`](crate::factory::create) into a free slot.
//!
//! Entries are keyed by the identity of the `Arc`s passed to
//! [`BitmapCache::get`], never by content. The cache never evicts: it grows
//! until [`BitmapCache::clear`] drops everything at once.

pub mod slots;

use alloc::sync::Arc;
use core::fmt::{Debug, Formatter};

use crate::bitmap::{Bitmap, Palette};
use crate::error::Error;
use crate::factory;
use crate::surface::Surface;
pub use slots::{Lookup, SlotId, SlotStore, INITIAL_CAPACITY};

/// Configuration fixed when a [`BitmapCache`] is created.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Exchange the red and blue channels of every produced surface, to match
    /// a host that expects the other byte order.
    pub swap_red_blue: bool,
}

/// Caches rendered surfaces by bitmap and palette identity.
///
/// Surfaces are owned by the cache and handed out as borrows, so none can be
/// used across a later [`get`](Self::get) or [`clear`](Self::clear). The
/// cache is not synchronized; wrap it in a `Mutex` to share it between
/// threads.
pub struct BitmapCache {
    config: CacheConfig,
    slots: SlotStore,
    /// Serial of the most recently created surface.
    serial: u64,
    /// Number of cache hits since last `clear_stats()`.
    cache_hits: u64,
    /// Number of cache misses since last `clear_stats()`.
    cache_misses: u64,
}

impl BitmapCache {
    /// Creates an empty cache.
    pub fn new(swap_red_blue: bool) -> Self {
        Self::with_config(CacheConfig { swap_red_blue })
    }

    /// Creates an empty cache with the given configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            config,
            slots: SlotStore::new(),
            serial: 0,
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    /// The configuration this cache was created with.
    #[inline]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Whether produced surfaces have red and blue exchanged.
    #[inline]
    pub fn swap_red_blue(&self) -> bool {
        self.config.swap_red_blue
    }

    /// Returns the surface for `bitmap` and `palette`, rendering it on a miss.
    ///
    /// A hit returns the surface created by the first call for the same pair
    /// of `Arc`s, without any rendering. Invalid input is rejected before the
    /// store is touched. If rendering fails later, while decoding or
    /// allocating, the error is returned and nothing is cached, although
    /// capacity grown for the attempt is kept.
    pub fn get(
        &mut self,
        bitmap: &Arc<Bitmap>,
        palette: Option<&Arc<Palette>>,
    ) -> Result<&Surface, Error> {
        let candidate = match self.slots.find(bitmap, palette) {
            Lookup::Hit(slot) => {
                self.cache_hits += 1;
                log::trace!("bitmap cache hit in slot {}", slot.index());
                return self
                    .slots
                    .surface(slot)
                    .ok_or(Error::invalid_input("stale slot reported as a hit"));
            }
            Lookup::Miss(candidate) => candidate,
        };

        self.cache_misses += 1;
        factory::validate(bitmap, palette.map(Arc::as_ref))?;
        let slot = self.slots.ensure_free_slot(candidate)?;
        let mut surface =
            factory::create(bitmap, palette.map(Arc::as_ref), self.config.swap_red_blue)?;
        self.serial += 1;
        surface.set_serial(self.serial);

        self.slots
            .occupy(slot, Arc::clone(bitmap), palette.cloned(), surface)
    }

    /// Whether `bitmap` and `palette` are cached, without rendering anything.
    pub fn contains(&self, bitmap: &Arc<Bitmap>, palette: Option<&Arc<Palette>>) -> bool {
        matches!(self.slots.find(bitmap, palette), Lookup::Hit(_))
    }

    /// Drops every cached surface and releases the slots.
    ///
    /// The configuration is kept; statistics are reset.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing bitmap cache ({} surfaces in {} slots)",
            self.slots.len(),
            self.slots.capacity()
        );
        self.slots.clear();
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    /// Get the number of cached surfaces.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get the number of slots, occupied or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Get the number of cache hits since last `clear_stats()`.
    #[inline]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Get the number of cache misses since last `clear_stats()`.
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses
    }

    /// Clear cache hit/miss statistics without clearing the cache itself.
    pub fn clear_stats(&mut self) {
        self.cache_hits = 0;
        self.cache_misses = 0;
    }
}

impl Default for BitmapCache {
    fn default() -> Self {
        Self::with_config(CacheConfig::default())
    }
}

impl Debug for BitmapCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BitmapCache")
            .field("config", &self.config)
            .field("slots", &self.slots)
            .field("serial", &self.serial)
            .finish_non_exhaustive()
    }
}
