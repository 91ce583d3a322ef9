//! The growable character buffer and its mutation operations.

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write as _};

use crate::{
    error::Error,
    pool::{HeapPool, RegionPool},
    search,
    store::BufferStore,
};

/// Pattern length from which replace planning switches to Boyer-Moore.
const BOYER_MOORE_MIN_PATTERN: usize = 8;
/// Window length from which replace planning switches to Boyer-Moore.
const BOYER_MOORE_MIN_WINDOW: usize = 256;

/// A growable character buffer that minimizes allocations.
///
/// `CharBuf` keeps its content in one contiguous region of `char` slots and
/// mutates it in place. The region either borrows caller-supplied memory
/// (see [`CharBuf::borrowing`]) or is rented from a [`RegionPool`]; growth
/// rents a power-of-two-sized replacement, so repeated appends stay
/// amortized constant per character.
///
/// Indices and windows are validated before anything is touched: on `Err`
/// the content is unchanged. A buffer is not meant for concurrent mutation;
/// use one per thread or serialize access externally.
///
/// # Examples
///
/// ```rust
/// use charbuf::CharBuf;
///
/// let mut buf = CharBuf::new();
/// buf.append("Hello World")?;
/// buf.replace("World", "there")?;
/// buf.insert(0, ">> ")?;
/// assert_eq!(buf.to_string(), ">> Hello there");
/// # Ok::<(), charbuf::Error>(())
/// ```
#[derive(Debug)]
pub struct CharBuf<'a, P: RegionPool = HeapPool> {
    store: BufferStore<'a, P>,
}

impl CharBuf<'static, HeapPool> {
    /// Creates an empty buffer.
    ///
    /// No memory is rented until the first write.
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(HeapPool)
    }

    /// Creates a buffer pre-sized to hold at least `capacity` characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the pool cannot satisfy the
    /// request.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_in(capacity, HeapPool)
    }
}

impl Default for CharBuf<'static, HeapPool> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CharBuf<'a, HeapPool> {
    /// Creates a buffer writing into caller-supplied memory.
    ///
    /// The borrowed region is used until an operation outgrows it. Growth
    /// then switches to pooled memory once and for all; the borrowed region
    /// is left untouched from that point on and is never handed to the
    /// pool.
    pub fn borrowing(region: &'a mut [char]) -> Self {
        Self::borrowing_in(region, HeapPool)
    }
}

impl<'a, P: RegionPool> CharBuf<'a, P> {
    /// Like [`CharBuf::new`], renting from `pool` instead of the heap.
    pub fn new_in(pool: P) -> Self {
        Self {
            store: BufferStore::new(pool),
        }
    }

    /// Like [`CharBuf::with_capacity`], renting from `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the pool cannot satisfy the
    /// request.
    pub fn with_capacity_in(capacity: usize, pool: P) -> Result<Self, Error> {
        Ok(Self {
            store: BufferStore::with_capacity(capacity, pool)?,
        })
    }

    /// Like [`CharBuf::borrowing`], with growth rented from `pool`.
    pub fn borrowing_in(region: &'a mut [char], pool: P) -> Self {
        Self {
            store: BufferStore::borrowing(region, pool),
        }
    }

    /// Number of characters currently written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Total slots in the backing region.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Read-only view of the written characters.
    #[must_use]
    pub fn as_view(&self) -> &[char] {
        self.store.written()
    }

    /// Iterates over the written characters.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.as_view().iter().copied()
    }

    /// Grows the backing region to hold at least `min_capacity` slots.
    ///
    /// Never shrinks and never changes content or length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the pool cannot satisfy the
    /// request; the buffer is left untouched.
    pub fn ensure_capacity(&mut self, min_capacity: usize) -> Result<(), Error> {
        self.store.ensure_capacity(min_capacity)
    }

    /// Appends a single character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when growth fails.
    pub fn push(&mut self, c: char) -> Result<(), Error> {
        let len = self.store.len();
        self.store.ensure_capacity(len + 1)?;
        self.store.slots_mut()[len] = c;
        self.store.set_len(len + 1);
        Ok(())
    }

    /// Appends every character of `content`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when growth fails.
    pub fn append(&mut self, content: &str) -> Result<(), Error> {
        let count = content.chars().count();
        let len = self.store.len();
        self.store.ensure_capacity(len + count)?;
        let slots = self.store.slots_mut();
        for (at, c) in content.chars().enumerate() {
            slots[len + at] = c;
        }
        self.store.set_len(len + count);
        Ok(())
    }

    /// Appends a pre-decoded character slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when growth fails.
    pub fn append_chars(&mut self, content: &[char]) -> Result<(), Error> {
        let len = self.store.len();
        self.store.ensure_capacity(len + content.len())?;
        self.store.slots_mut()[len..len + content.len()].copy_from_slice(content);
        self.store.set_len(len + content.len());
        Ok(())
    }

    /// Appends `content` followed by a line feed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when growth fails.
    pub fn append_line(&mut self, content: &str) -> Result<(), Error> {
        self.append(content)?;
        self.push('\n')
    }

    /// Inserts `content` so that its first character lands at `index`.
    ///
    /// The tail `[index, len)` is shifted right in one overlap-safe block
    /// copy before the new characters are written into the gap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] when `index > len` and
    /// [`Error::Allocation`] when growth fails; either way the buffer is
    /// unchanged.
    pub fn insert(&mut self, index: usize, content: &str) -> Result<(), Error> {
        let len = self.store.len();
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        let count = content.chars().count();
        if count == 0 {
            return Ok(());
        }
        self.store.ensure_capacity(len + count)?;
        self.store.copy_within(index..len, index + count);
        let slots = self.store.slots_mut();
        for (at, c) in content.chars().enumerate() {
            slots[index + at] = c;
        }
        self.store.set_len(len + count);
        Ok(())
    }

    /// [`CharBuf::insert`] for a pre-decoded character slice.
    ///
    /// # Errors
    ///
    /// As for [`CharBuf::insert`].
    pub fn insert_chars(&mut self, index: usize, content: &[char]) -> Result<(), Error> {
        let len = self.store.len();
        if index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        if content.is_empty() {
            return Ok(());
        }
        self.store.ensure_capacity(len + content.len())?;
        self.store.copy_within(index..len, index + content.len());
        self.store.slots_mut()[index..index + content.len()].copy_from_slice(content);
        self.store.set_len(len + content.len());
        Ok(())
    }

    /// Removes the `count` characters starting at `start`.
    ///
    /// A zero `count` is a no-op. Capacity is never shrunk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] when the window exceeds the
    /// written prefix; the buffer is unchanged.
    pub fn remove(&mut self, start: usize, count: usize) -> Result<(), Error> {
        let len = self.store.len();
        Self::check_window(start, count, len)?;
        if count == 0 {
            return Ok(());
        }
        self.store.copy_within(start + count..len, start);
        self.store.set_len(len - count);
        Ok(())
    }

    /// Truncates to empty without releasing the backing region.
    pub fn clear(&mut self) {
        self.store.set_len(0);
    }

    /// Replaces every non-overlapping occurrence of `old` with `new`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when growth fails before any
    /// replacement has been applied.
    pub fn replace(&mut self, old: &str, new: &str) -> Result<(), Error> {
        let len = self.store.len();
        self.replace_in(old, new, 0, len)
    }

    /// Replaces every non-overlapping occurrence of `old` with `new`
    /// inside the window of `count` characters starting at `start`.
    ///
    /// Occurrences are planned before anything is mutated, scanning the
    /// window left to right and resuming strictly after each match, so a
    /// `new` that contains `old` can never be matched again. Replacements
    /// are then applied in order, each hit position corrected by the
    /// cumulative length drift of the ones already applied.
    ///
    /// An empty `old`, or `old` equal to `new`, is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] when the window exceeds the
    /// written prefix and [`Error::Allocation`] when growth fails; both are
    /// detected before any replacement is applied.
    pub fn replace_in(
        &mut self,
        old: &str,
        new: &str,
        start: usize,
        count: usize,
    ) -> Result<(), Error> {
        Self::check_window(start, count, self.store.len())?;
        if old.is_empty() || old == new {
            return Ok(());
        }

        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();
        let hits = plan_occurrences(&self.store.written()[start..start + count], &old);
        if hits.is_empty() {
            return Ok(());
        }

        if new.len() > old.len() {
            let growth = hits.len() * (new.len() - old.len());
            self.store.ensure_capacity(self.store.len() + growth)?;
        }

        for (applied, &hit) in hits.iter().enumerate() {
            // Prior replacements shifted everything after them by one delta
            // each; the hit was recorded in original coordinates.
            let live = if new.len() >= old.len() {
                start + hit + applied * (new.len() - old.len())
            } else {
                start + hit - applied * (old.len() - new.len())
            };

            if new.len() == old.len() {
                self.overwrite(live, &new);
            } else if new.len() < old.len() {
                self.overwrite(live, &new);
                self.remove(live + new.len(), old.len() - new.len())?;
            } else {
                self.overwrite(live, &new[..old.len()]);
                self.insert_chars(live + old.len(), &new[old.len()..])?;
            }
        }
        Ok(())
    }

    /// Replaces every occurrence of the character `old` with `new`.
    pub fn replace_char(&mut self, old: char, new: char) {
        let len = self.store.len();
        for slot in &mut self.store.slots_mut()[..len] {
            if *slot == old {
                *slot = new;
            }
        }
    }

    /// [`CharBuf::replace_char`] restricted to the window of `count`
    /// characters starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] when the window exceeds the
    /// written prefix.
    pub fn replace_char_in(
        &mut self,
        old: char,
        new: char,
        start: usize,
        count: usize,
    ) -> Result<(), Error> {
        Self::check_window(start, count, self.store.len())?;
        for slot in &mut self.store.slots_mut()[start..start + count] {
            if *slot == old {
                *slot = new;
            }
        }
        Ok(())
    }

    /// Position of the first occurrence of `pattern`, if any.
    ///
    /// An empty pattern is never found.
    #[must_use]
    pub fn index_of(&self, pattern: &str) -> Option<usize> {
        let pattern: Vec<char> = pattern.chars().collect();
        search::find_first(self.as_view(), &pattern)
    }

    /// Position of the last occurrence of `pattern`, if any.
    #[must_use]
    pub fn last_index_of(&self, pattern: &str) -> Option<usize> {
        let pattern: Vec<char> = pattern.chars().collect();
        search::find_last(self.as_view(), &pattern)
    }

    /// Whether `pattern` occurs anywhere in the buffer.
    #[must_use]
    pub fn contains(&self, pattern: &str) -> bool {
        self.index_of(pattern).is_some()
    }

    /// Materializes the `count` characters starting at `start` as an owned
    /// string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] when the window exceeds the
    /// written prefix.
    pub fn substring(&self, start: usize, count: usize) -> Result<String, Error> {
        Self::check_window(start, count, self.store.len())?;
        Ok(self.as_view()[start..start + count].iter().collect())
    }

    /// Copies the written characters into `dest`.
    ///
    /// Returns `false` without writing anything when `dest` is too short.
    pub fn copy_to(&self, dest: &mut [char]) -> bool {
        let view = self.as_view();
        if dest.len() < view.len() {
            return false;
        }
        dest[..view.len()].copy_from_slice(view);
        true
    }

    /// Returns pooled memory to the pool and resets to an empty buffer.
    ///
    /// Idempotent, and also performed on drop. A released buffer stays
    /// usable: it reads as empty and the next write rents afresh.
    pub fn release(&mut self) {
        self.store.release();
    }

    fn overwrite(&mut self, at: usize, content: &[char]) {
        self.store.slots_mut()[at..at + content.len()].copy_from_slice(content);
    }

    fn check_window(start: usize, count: usize, len: usize) -> Result<(), Error> {
        // Phrased to stay overflow-safe for degenerate start/count pairs.
        if start > len || count > len - start {
            return Err(Error::RangeOutOfBounds { start, count, len });
        }
        Ok(())
    }
}

impl<P: RegionPool> fmt::Display for CharBuf<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.iter() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<P: RegionPool> serde::Serialize for CharBuf<'_, P> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Non-overlapping occurrences of `pattern` in `window`, window-local
/// coordinates, leftmost first.
///
/// Long patterns over long windows go through the accelerated scan with a
/// greedy overlap filter; everything else resumes a naive scan strictly
/// after each match. Both produce the same plan.
fn plan_occurrences(window: &[char], pattern: &[char]) -> Vec<usize> {
    if pattern.len() >= BOYER_MOORE_MIN_PATTERN && window.len() >= BOYER_MOORE_MIN_WINDOW {
        let mut hits = Vec::new();
        let mut next_free = 0;
        for hit in search::find_all_boyer_moore(window, pattern) {
            if hit >= next_free {
                hits.push(hit);
                next_free = hit + pattern.len();
            }
        }
        hits
    } else {
        let mut hits = Vec::new();
        let mut from = 0;
        while let Some(at) = search::find_first(&window[from..], pattern) {
            let hit = from + at;
            hits.push(hit);
            from = hit + pattern.len();
        }
        hits
    }
}
