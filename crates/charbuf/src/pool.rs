//! The pool capability backing pooled buffer regions.
//!
//! The buffer never talks to a global allocator pool directly; it is handed
//! an implementation of [`RegionPool`] at construction time. That keeps the
//! rent/recycle discipline testable: tests substitute counting or failing
//! pools where production code uses [`HeapPool`] or a shared
//! [`RecyclingPool`].

use alloc::{boxed::Box, vec::Vec};
use core::cell::RefCell;

use thiserror::Error;

/// A pool could not satisfy a rent request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("allocation of {requested} character slots failed")]
pub struct AllocationError {
    /// Number of slots that were requested.
    pub requested: usize,
}

/// Source of pooled character regions.
///
/// A store rents a region whenever it grows and recycles every pooled
/// region exactly once, either when a larger region supersedes it or when
/// the store is released. Borrowed caller memory never reaches a pool.
///
/// Implementations shared between threads must synchronize internally; each
/// individual store performs its rent/recycle pairs sequentially.
pub trait RegionPool {
    /// Obtains a region of at least `slots` character slots.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] when the pool cannot satisfy the
    /// request.
    fn rent(&self, slots: usize) -> Result<Box<[char]>, AllocationError>;

    /// Returns a previously rented region to the pool.
    fn recycle(&self, region: Box<[char]>);
}

impl<P: RegionPool + ?Sized> RegionPool for &P {
    fn rent(&self, slots: usize) -> Result<Box<[char]>, AllocationError> {
        (**self).rent(slots)
    }

    fn recycle(&self, region: Box<[char]>) {
        (**self).recycle(region);
    }
}

/// Pool backed directly by the global allocator.
///
/// Renting allocates a fresh region and recycling drops it; there is no
/// reuse. The type is stateless, so one value can serve any number of
/// buffers from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapPool;

impl RegionPool for HeapPool {
    fn rent(&self, slots: usize) -> Result<Box<[char]>, AllocationError> {
        let mut region: Vec<char> = Vec::new();
        region
            .try_reserve_exact(slots)
            .map_err(|_| AllocationError { requested: slots })?;
        region.resize(slots, '\0');
        Ok(region.into_boxed_slice())
    }

    fn recycle(&self, region: Box<[char]>) {
        drop(region);
    }
}

/// Freelist pool that reuses recycled regions.
///
/// Renting hands out the first idle region large enough for the request and
/// falls back to the allocator when none fits. Interior mutability is a
/// plain [`RefCell`], so a `RecyclingPool` serves buffers on one thread;
/// callers wanting a cross-thread pool wrap their own lock around an
/// implementation of [`RegionPool`].
#[derive(Debug, Default)]
pub struct RecyclingPool {
    idle: RefCell<Vec<Box<[char]>>>,
}

impl RecyclingPool {
    /// Creates a pool with an empty freelist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of regions currently sitting idle in the freelist.
    #[must_use]
    pub fn idle_regions(&self) -> usize {
        self.idle.borrow().len()
    }
}

impl RegionPool for RecyclingPool {
    fn rent(&self, slots: usize) -> Result<Box<[char]>, AllocationError> {
        let mut idle = self.idle.borrow_mut();
        if let Some(at) = idle.iter().position(|region| region.len() >= slots) {
            return Ok(idle.swap_remove(at));
        }
        drop(idle);
        HeapPool.rent(slots)
    }

    fn recycle(&self, region: Box<[char]>) {
        self.idle.borrow_mut().push(region);
    }
}
