//! Integration tests driving `charbuf` exclusively through its public API.

use charbuf::{AllocationError, CharBuf, Error, RecyclingPool, RegionPool};

#[test]
fn template_expansion_end_to_end() {
    let mut buf = CharBuf::new();
    buf.append("Dear {name}, your order {id} has shipped.")
        .unwrap();
    buf.replace("{name}", "Ada").unwrap();
    buf.replace("{id}", "#4711").unwrap();
    buf.append_line("").unwrap();
    buf.append("Thanks!").unwrap();

    assert_eq!(
        buf.to_string(),
        "Dear Ada, your order #4711 has shipped.\nThanks!"
    );
}

#[test]
fn log_line_reuse_without_per_line_allocations() {
    let pool = RecyclingPool::new();
    let mut buf = CharBuf::with_capacity_in(128, &pool).unwrap();

    for level in ["INFO", "WARN", "INFO"] {
        buf.clear();
        buf.append(level).unwrap();
        buf.append(" something happened").unwrap();
        assert!(buf.to_string().starts_with(level));
    }
    // One region rented up front, still held; nothing churned per line.
    assert_eq!(pool.idle_regions(), 0);

    drop(buf);
    assert_eq!(pool.idle_regions(), 1);
}

#[test]
fn borrowed_fast_path_never_touches_the_pool() {
    /// Pool that fails the test if the buffer asks it for anything.
    struct NoPool;

    impl RegionPool for NoPool {
        fn rent(&self, slots: usize) -> Result<Box<[char]>, AllocationError> {
            panic!("unexpected rent of {slots} slots");
        }

        fn recycle(&self, _region: Box<[char]>) {
            panic!("unexpected recycle");
        }
    }

    let mut slots = ['\0'; 32];
    let mut buf = CharBuf::borrowing_in(&mut slots, NoPool);
    buf.append("fits comfortably").unwrap();
    buf.replace("comfortably", "fine").unwrap();
    assert_eq!(buf.to_string(), "fits fine");
}

#[test]
fn mutation_pipeline_stays_consistent() {
    let mut buf = CharBuf::new();
    buf.append("the quick brown fox").unwrap();
    buf.insert(0, "[").unwrap();
    buf.push(']').unwrap();
    buf.replace("quick", "slow").unwrap();
    buf.replace_char(' ', '_');
    assert_eq!(buf.to_string(), "[the_slow_brown_fox]");

    let start = buf.index_of("slow").unwrap();
    buf.remove(start, "slow_".len()).unwrap();
    assert_eq!(buf.to_string(), "[the_brown_fox]");
}

#[test]
fn errors_carry_the_offending_arguments() {
    let mut buf = CharBuf::new();
    buf.append("abc").unwrap();

    match buf.remove(1, 5).unwrap_err() {
        Error::RangeOutOfBounds { start, count, len } => {
            assert_eq!((start, count, len), (1, 5, 3));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        buf.insert(9, "x").unwrap_err().to_string(),
        "index 9 is out of bounds for length 3"
    );
}

#[cfg(feature = "serde")]
#[test]
fn serialize_impl_is_available() {
    fn assert_serialize<T: serde::Serialize>(_: &T) {}

    let mut buf = CharBuf::new();
    buf.append("hi").unwrap();
    // `Serialize` goes through `Display`, so the string form is the contract.
    assert_serialize(&buf);
    assert_eq!(buf.to_string(), "hi");
}
