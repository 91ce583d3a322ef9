//! Differential fuzzing of `CharBuf` against a plain `Vec<char>` model.
//!
//! Every operation is applied to both sides; content must agree after each
//! step, and out-of-range arguments must fail on the buffer exactly when
//! the model says they are invalid.

#![no_main]

use arbitrary::Arbitrary;
use charbuf::CharBuf;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Append(String),
    Push(char),
    Insert { index: u8, content: String },
    Remove { start: u8, count: u8 },
    Replace { old: String, new: String },
    ReplaceChar { old: char, new: char },
    EnsureCapacity(u16),
    Clear,
    Release,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut buf = CharBuf::new();
    let mut model: Vec<char> = Vec::new();

    for op in ops {
        match op {
            Op::Append(content) => {
                buf.append(&content).unwrap();
                model.extend(content.chars());
            }
            Op::Push(c) => {
                buf.push(c).unwrap();
                model.push(c);
            }
            Op::Insert { index, content } => {
                let index = usize::from(index);
                let outcome = buf.insert(index, &content);
                if index <= model.len() {
                    outcome.unwrap();
                    for (at, c) in content.chars().enumerate() {
                        model.insert(index + at, c);
                    }
                } else {
                    outcome.unwrap_err();
                }
            }
            Op::Remove { start, count } => {
                let (start, count) = (usize::from(start), usize::from(count));
                let outcome = buf.remove(start, count);
                if start <= model.len() && count <= model.len() - start {
                    outcome.unwrap();
                    model.drain(start..start + count);
                } else {
                    outcome.unwrap_err();
                }
            }
            Op::Replace { old, new } => {
                buf.replace(&old, &new).unwrap();
                if !old.is_empty() && old != new {
                    let text: String = model.iter().collect();
                    model = text.replace(&old, &new).chars().collect();
                }
            }
            Op::ReplaceChar { old, new } => {
                buf.replace_char(old, new);
                for c in &mut model {
                    if *c == old {
                        *c = new;
                    }
                }
            }
            Op::EnsureCapacity(min) => {
                let before = buf.capacity();
                buf.ensure_capacity(usize::from(min)).unwrap();
                assert!(buf.capacity() >= before.max(usize::from(min)));
            }
            Op::Clear => {
                buf.clear();
                model.clear();
            }
            Op::Release => {
                buf.release();
                model.clear();
            }
        }

        assert_eq!(buf.as_view(), model.as_slice());
        assert!(buf.len() <= buf.capacity());
    }
});
