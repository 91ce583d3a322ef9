use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use crate::{CharBuf, search};

fn iterations() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

fn filled(text: &str) -> CharBuf<'static> {
    let mut buf = CharBuf::new();
    buf.append(text).unwrap();
    buf
}

/// Property: appending `tail` leaves the view ending in exactly `tail` and
/// grows the length by `tail`'s character count.
#[test]
fn append_extends_view_and_length_quickcheck() {
    fn prop(base: String, tail: String) -> bool {
        let mut buf = filled(&base);
        let before = buf.len();
        buf.append(&tail).unwrap();

        let tail_chars: Vec<char> = tail.chars().collect();
        let view = buf.as_view();
        buf.len() == before + tail_chars.len() && view[before..] == tail_chars[..]
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(String, String) -> bool);
}

/// Property: `insert(i, s)` followed by `remove(i, len(s))` restores the
/// original content and length.
#[test]
fn insert_remove_round_trip_quickcheck() {
    fn prop(base: String, inserted: String, seed: usize) -> bool {
        let mut buf = filled(&base);
        let original: Vec<char> = buf.as_view().to_vec();

        let index = seed % (buf.len() + 1);
        buf.insert(index, &inserted).unwrap();
        buf.remove(index, inserted.chars().count()).unwrap();

        buf.as_view() == original.as_slice()
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(String, String, usize) -> bool);
}

/// Property: replacing a pattern with itself never changes anything, over
/// any valid window.
#[test]
fn replace_with_self_is_noop_quickcheck() {
    fn prop(base: String, pattern: String, seed: (usize, usize)) -> bool {
        let mut buf = filled(&base);
        let original: Vec<char> = buf.as_view().to_vec();

        let start = seed.0 % (buf.len() + 1);
        let count = seed.1 % (buf.len() - start + 1);
        buf.replace_in(&pattern, &pattern, start, count).unwrap();

        buf.as_view() == original.as_slice()
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(String, String, (usize, usize)) -> bool);
}

/// Property: a full-window replace agrees with the standard library's
/// leftmost non-overlapping `str::replace`.
#[test]
fn replace_agrees_with_str_replace_quickcheck() {
    fn prop(base: String, old: String, new: String) -> bool {
        if old.is_empty() {
            return true;
        }
        let mut buf = filled(&base);
        buf.replace(&old, &new).unwrap();

        let expected: Vec<char> = base.replace(&old, &new).chars().collect();
        buf.as_view() == expected.as_slice()
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(String, String, String) -> bool);
}

/// Property: `replace(old, "")` removes every non-overlapping occurrence
/// and nothing else.
#[test]
fn replace_with_empty_removes_occurrences_quickcheck() {
    fn prop(base: String, old: String) -> bool {
        if old.is_empty() {
            return true;
        }
        let mut buf = filled(&base);
        buf.replace(&old, "").unwrap();

        let expected: Vec<char> = base.replace(&old, "").chars().collect();
        buf.as_view() == expected.as_slice()
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(String, String) -> bool);
}

/// Differential: the naive and Boyer-Moore scans report identical hit
/// sequences. A four-letter alphabet keeps collisions and overlaps common.
#[test]
fn search_algorithms_agree_quickcheck() {
    fn small_alphabet(bytes: &[u8]) -> Vec<char> {
        bytes.iter().map(|b| char::from(b'a' + (b % 4))).collect()
    }

    fn prop(text: Vec<u8>, pattern: Vec<u8>) -> bool {
        let text = small_alphabet(&text);
        let pattern = small_alphabet(&pattern);

        let naive = search::find_all(&text, &pattern);
        let accelerated = search::find_all_boyer_moore(&text, &pattern);

        naive == accelerated
            && search::find_first(&text, &pattern) == naive.first().copied()
            && search::find_last(&text, &pattern) == naive.last().copied()
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> bool);
}

/// Differential on non-ASCII input: bad-character buckets are shared by
/// low byte, which must stay invisible in the results.
#[test]
fn search_algorithms_agree_beyond_ascii_quickcheck() {
    fn wide_alphabet(bytes: &[u8]) -> Vec<char> {
        // 'a' (U+0061) and 'š' (U+0161) share bucket 0x61; 'á' (U+00E1)
        // sits alone in 0xE1.
        bytes
            .iter()
            .map(|b| match b % 3 {
                0 => 'a',
                1 => '\u{0161}',
                _ => '\u{00E1}',
            })
            .collect()
    }

    fn prop(text: Vec<u8>, pattern: Vec<u8>) -> bool {
        let text = wide_alphabet(&text);
        let pattern = wide_alphabet(&pattern);
        search::find_all(&text, &pattern) == search::find_all_boyer_moore(&text, &pattern)
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(Vec<u8>, Vec<u8>) -> bool);
}
