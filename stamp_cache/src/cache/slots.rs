// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growable slot storage for rendered surfaces.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use hashbrown::HashMap;

use crate::bitmap::{Bitmap, Palette};
use crate::error::Error;
use crate::surface::Surface;

/// Number of slots allocated the first time the store grows.
pub const INITIAL_CAPACITY: usize = 8;

/// Position of a slot in a [`SlotStore`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// The index of the slot.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Outcome of [`SlotStore::find`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The pair is cached in this slot.
    Hit(SlotId),
    /// The pair is not cached; carries the first empty slot, if there is one.
    Miss(Option<SlotId>),
}

/// Identity of a bitmap/palette pair: the addresses of the two `Arc`s.
///
/// Occupied slots hold clones of both `Arc`s, so an address cannot be reused
/// by another descriptor while its entry is alive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct SlotKey {
    bitmap: usize,
    palette: Option<usize>,
}

impl SlotKey {
    fn new(bitmap: &Arc<Bitmap>, palette: Option<&Arc<Palette>>) -> Self {
        Self {
            bitmap: Arc::as_ptr(bitmap).addr(),
            palette: palette.map(|p| Arc::as_ptr(p).addr()),
        }
    }
}

struct Entry {
    bitmap: Arc<Bitmap>,
    palette: Option<Arc<Palette>>,
    surface: Surface,
}

enum Slot {
    Empty,
    Occupied(Entry),
}

impl Slot {
    #[inline]
    fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// An arena of slots, each empty or owning one rendered surface.
///
/// The store only grows, doubling from [`INITIAL_CAPACITY`], and only
/// [`SlotStore::clear`] empties slots again. At most one occupied slot holds a
/// given bitmap/palette pair.
pub struct SlotStore {
    slots: Vec<Slot>,
    /// Occupied slots by key.
    index: HashMap<SlotKey, SlotId>,
}

impl SlotStore {
    /// Creates an empty store with zero capacity.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Looks up the slot holding `bitmap` and `palette`, compared by identity.
    pub fn find(&self, bitmap: &Arc<Bitmap>, palette: Option<&Arc<Palette>>) -> Lookup {
        match self.index.get(&SlotKey::new(bitmap, palette)) {
            Some(&slot) => Lookup::Hit(slot),
            None => Lookup::Miss(self.slots.iter().position(Slot::is_empty).map(SlotId)),
        }
    }

    /// Returns `candidate`, or grows the store and returns its first new slot.
    ///
    /// Growth doubles the capacity, starting at [`INITIAL_CAPACITY`]. On
    /// allocation failure the store is left unchanged.
    pub fn ensure_free_slot(&mut self, candidate: Option<SlotId>) -> Result<SlotId, Error> {
        if let Some(slot) = candidate {
            return Ok(slot);
        }

        let old = self.slots.len();
        let new = old
            .checked_mul(2)
            .ok_or(Error::resource_exhausted("slot store capacity overflow"))?
            .max(INITIAL_CAPACITY);
        self.index
            .try_reserve(new - self.index.len())
            .map_err(|_| Error::resource_exhausted("slot index growth"))?;
        self.slots
            .try_reserve_exact(new - old)
            .map_err(|e| Error::from_reserve(e, "slot store growth"))?;
        self.slots.resize_with(new, || Slot::Empty);

        log::debug!("grew slot store from {old} to {new} slots");
        Ok(SlotId(old))
    }

    /// Stores `surface` in `slot` under the given key and returns it.
    ///
    /// Anything previously held by the slot is dropped. A slot outside the
    /// store, such as one handed out before a [`clear`](Self::clear), is
    /// rejected with [`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput)
    /// and the store is left unchanged.
    pub fn occupy(
        &mut self,
        slot: SlotId,
        bitmap: Arc<Bitmap>,
        palette: Option<Arc<Palette>>,
        surface: Surface,
    ) -> Result<&Surface, Error> {
        let key = SlotKey::new(&bitmap, palette.as_ref());
        let target = self
            .slots
            .get_mut(slot.0)
            .ok_or(Error::invalid_input("slot outside the store"))?;
        let entry = Entry {
            bitmap,
            palette,
            surface,
        };
        if let Slot::Occupied(old) = core::mem::replace(target, Slot::Occupied(entry)) {
            self.index
                .remove(&SlotKey::new(&old.bitmap, old.palette.as_ref()));
        }
        if let Some(previous) = self.index.insert(key, slot) {
            if previous != slot {
                self.slots[previous.0] = Slot::Empty;
            }
        }

        self.surface(slot)
            .ok_or(Error::invalid_input("slot outside the store"))
    }

    /// The surface held by `slot`, if it is occupied.
    pub fn surface(&self, slot: SlotId) -> Option<&Surface> {
        match self.slots.get(slot.0)? {
            Slot::Occupied(entry) => Some(&entry.surface),
            Slot::Empty => None,
        }
    }

    /// Drops every surface and releases the slot array.
    pub fn clear(&mut self) {
        self.slots = Vec::new();
        self.index = HashMap::new();
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of slots, occupied or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for SlotStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlotStore")
            .field("capacity", &self.slots.len())
            .field("occupied", &self.index.len())
            .finish_non_exhaustive()
    }
}
