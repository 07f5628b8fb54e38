//! Hygiene rules for question names.
//!
//! The wire codec guarantees structural validity (label framing, pointer
//! loops); the rules here are policy on top of it: a name we accept must be
//! representable without escaping. Callers hand in the raw label bytes.

/// Longest single label on the wire.
pub const MAX_LABEL_LEN: usize = 63;

/// Longest full name on the wire, root byte included.
pub const MAX_NAME_LEN: usize = 255;

/// Returns true if the name violates label constraints: an empty or
/// over-length label, a wire form over 255 bytes, or a byte that cannot
/// appear unescaped in a label (anything outside visible ASCII, `.`, `\`).
pub fn is_dirty<'a, I>(labels: I) -> bool
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut wire_len = 1; // root byte
    for label in labels {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return true;
        }
        wire_len += label.len() + 1;
        if wire_len > MAX_NAME_LEN {
            return true;
        }
        for &byte in label {
            if !(0x21..=0x7e).contains(&byte) || byte == b'.' || byte == b'\\' {
                return true;
            }
        }
    }
    false
}

/// Last label of a name, ASCII-lowercased. Empty string for the root.
pub fn last_label<'a, I>(labels: I) -> String
where
    I: IntoIterator<Item = &'a [u8]>,
{
    match labels.into_iter().last() {
        Some(label) => {
            let mut tld = String::with_capacity(label.len());
            for &byte in label {
                tld.push(byte.to_ascii_lowercase() as char);
            }
            tld
        }
        None => String::new(),
    }
}
