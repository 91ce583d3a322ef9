//! A low-allocation, growable character buffer.
//!
//! [`CharBuf`] keeps text in a single contiguous region of `char` slots and
//! mutates it in place: append, insert, remove and multi-occurrence replace
//! all shift data inside the same region instead of rebuilding strings.
//! The region is either borrowed from the caller or rented from a
//! [`RegionPool`], and growth rents a power-of-two-sized replacement so
//! repeated appends stay amortized constant per character.
//!
//! ```rust
//! use charbuf::CharBuf;
//!
//! let mut buf = CharBuf::new();
//! buf.append("Hello World")?;
//! buf.replace("Hello", "Hi")?;
//! assert_eq!(buf.to_string(), "Hi World");
//! # Ok::<(), charbuf::Error>(())
//! ```
//!
//! A buffer can also start out on caller-supplied memory and only touch the
//! pool once it outgrows it:
//!
//! ```rust
//! use charbuf::CharBuf;
//!
//! let mut slots = ['\0'; 16];
//! let mut buf = CharBuf::borrowing(&mut slots);
//! buf.append("tiny")?;
//! assert_eq!(buf.capacity(), 16);
//! # Ok::<(), charbuf::Error>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod builder;
mod error;
mod pool;
mod search;
mod store;

#[cfg(test)]
mod tests;

pub use builder::CharBuf;
pub use error::Error;
pub use pool::{AllocationError, HeapPool, RecyclingPool, RegionPool};
