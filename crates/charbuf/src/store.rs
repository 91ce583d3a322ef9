//! Ownership and growth of the backing character region.
//!
//! [`BufferStore`] knows nothing about text semantics: it tracks the
//! written prefix, grows the region in powers of two, and exposes raw
//! range-based primitives to the mutation code. Overlap-safe block copies
//! are centralized here in [`BufferStore::copy_within`] so no caller ever
//! reasons about copy direction.

use alloc::boxed::Box;
use core::ops::Range;

use crate::{
    error::Error,
    pool::{AllocationError, RegionPool},
};

/// Capacity floor applied on the first pooled growth.
const MIN_POOLED_CAPACITY: usize = 32;

/// Who owns the backing region.
///
/// Growth moves `Borrowed` to `Pooled` and never back. `Empty` doubles as
/// the lazy initial state and the post-release sentinel, so a released
/// store is inert rather than dangling.
#[derive(Debug)]
enum Region<'a> {
    Empty,
    Borrowed(&'a mut [char]),
    Pooled(Box<[char]>),
}

#[derive(Debug)]
pub(crate) struct BufferStore<'a, P: RegionPool> {
    region: Region<'a>,
    len: usize,
    pool: P,
}

impl<'a, P: RegionPool> BufferStore<'a, P> {
    pub(crate) fn new(pool: P) -> Self {
        Self {
            region: Region::Empty,
            len: 0,
            pool,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, pool: P) -> Result<Self, Error> {
        let mut store = Self::new(pool);
        store.ensure_capacity(capacity)?;
        Ok(store)
    }

    pub(crate) fn borrowing(region: &'a mut [char], pool: P) -> Self {
        Self {
            region: Region::Borrowed(region),
            len: 0,
            pool,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots().len()
    }

    /// View of the whole capacity, written prefix included.
    pub(crate) fn slots(&self) -> &[char] {
        match &self.region {
            Region::Empty => &[],
            Region::Borrowed(slots) => slots,
            Region::Pooled(slots) => slots,
        }
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [char] {
        match &mut self.region {
            Region::Empty => &mut [],
            Region::Borrowed(slots) => slots,
            Region::Pooled(slots) => slots,
        }
    }

    /// The written prefix.
    pub(crate) fn written(&self) -> &[char] {
        &self.slots()[..self.len]
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        self.len = len;
    }

    /// Overlap-safe block copy inside the region (`memmove` semantics).
    pub(crate) fn copy_within(&mut self, src: Range<usize>, dest: usize) {
        self.slots_mut().copy_within(src, dest);
    }

    /// Grows the region so it holds at least `requested` slots.
    ///
    /// No-op when the capacity already suffices. Otherwise rents a pooled
    /// region sized to the smallest power of two at or above the request
    /// (floored at 32 slots), copies the written prefix over, and recycles
    /// the superseded region if it was pooled. Borrowed caller memory is
    /// simply forgotten, never handed to the pool. A failed rent, or a
    /// request too large to round up, leaves the store untouched.
    pub(crate) fn ensure_capacity(&mut self, requested: usize) -> Result<(), Error> {
        if self.capacity() >= requested {
            return Ok(());
        }

        let target = requested
            .max(MIN_POOLED_CAPACITY)
            .checked_next_power_of_two()
            .ok_or(AllocationError { requested })?;
        let mut grown = self.pool.rent(target)?;
        grown[..self.len].copy_from_slice(self.written());

        match core::mem::replace(&mut self.region, Region::Pooled(grown)) {
            Region::Pooled(old) => self.pool.recycle(old),
            Region::Borrowed(_) | Region::Empty => {}
        }
        Ok(())
    }

    /// Returns pooled memory to the pool and resets to the empty state.
    ///
    /// Idempotent: only the first call after a growth recycles anything.
    pub(crate) fn release(&mut self) {
        self.len = 0;
        if let Region::Pooled(region) = core::mem::replace(&mut self.region, Region::Empty) {
            self.pool.recycle(region);
        }
    }
}

impl<'a, P: RegionPool> Drop for BufferStore<'a, P> {
    fn drop(&mut self) {
        self.release();
    }
}
