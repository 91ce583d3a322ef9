//! Substring search over character slices.
//!
//! Two interchangeable scans share one contract: report the start of every
//! candidate position where the pattern matches, left to right, overlapping
//! candidates included. [`find_all`] is the brute-force O(n·m) scan;
//! [`find_all_boyer_moore`] aligns the pattern at a shift, compares right
//! to left and skips ahead with the bad-character rule only. Picking one
//! over the other is purely a performance decision, so the two are held to
//! byte-identical output by a differential property test.

use alloc::vec::Vec;

/// Buckets in the bad-character table.
///
/// Characters sharing a low byte share a bucket. The bucket holds the
/// rightmost pattern index of any of them, so a shared bucket can only
/// shorten a shift, never overshoot a real occurrence.
const BAD_CHAR_BUCKETS: usize = 256;

fn bucket(c: char) -> usize {
    (c as usize) & (BAD_CHAR_BUCKETS - 1)
}

/// All match starts of `pattern` in `text`, scanned left to right.
///
/// Empty text, empty pattern, or a pattern longer than the text yield an
/// empty result.
pub(crate) fn find_all(text: &[char], pattern: &[char]) -> Vec<usize> {
    let mut hits = Vec::new();
    if text.is_empty() || pattern.is_empty() || text.len() < pattern.len() {
        return hits;
    }
    for start in 0..=(text.len() - pattern.len()) {
        if text[start..start + pattern.len()] == *pattern {
            hits.push(start);
        }
    }
    hits
}

/// Start of the first match, or `None`.
pub(crate) fn find_first(text: &[char], pattern: &[char]) -> Option<usize> {
    if text.is_empty() || pattern.is_empty() || text.len() < pattern.len() {
        return None;
    }
    (0..=(text.len() - pattern.len())).find(|&start| text[start..start + pattern.len()] == *pattern)
}

/// Start of the last match, or `None`.
pub(crate) fn find_last(text: &[char], pattern: &[char]) -> Option<usize> {
    if text.is_empty() || pattern.is_empty() || text.len() < pattern.len() {
        return None;
    }
    (0..=(text.len() - pattern.len()))
        .rev()
        .find(|&start| text[start..start + pattern.len()] == *pattern)
}

/// All match starts via Boyer-Moore restricted to the bad-character rule.
///
/// Without the good-suffix rule the worst case degrades toward the naive
/// scan on highly repetitive input, but the reported hits are identical to
/// [`find_all`] for every input.
pub(crate) fn find_all_boyer_moore(text: &[char], pattern: &[char]) -> Vec<usize> {
    let mut hits = Vec::new();
    if text.is_empty() || pattern.is_empty() || text.len() < pattern.len() {
        return hits;
    }

    let mut last_seen: [Option<usize>; BAD_CHAR_BUCKETS] = [None; BAD_CHAR_BUCKETS];
    for (at, &c) in pattern.iter().enumerate() {
        last_seen[bucket(c)] = Some(at);
    }

    let mut shift = 0;
    while shift <= text.len() - pattern.len() {
        let mismatch = (0..pattern.len())
            .rev()
            .find(|&at| text[shift + at] != pattern[at]);

        match mismatch {
            None => {
                hits.push(shift);
                let following = shift + pattern.len();
                shift += if following < text.len() {
                    match last_seen[bucket(text[following])] {
                        Some(at) => pattern.len() - at,
                        None => pattern.len() + 1,
                    }
                } else {
                    1
                };
            }
            Some(at) => {
                shift += match last_seen[bucket(text[shift + at])] {
                    Some(seen) if seen < at => at - seen,
                    Some(_) => 1,
                    None => at + 1,
                };
            }
        }
    }
    hits
}
