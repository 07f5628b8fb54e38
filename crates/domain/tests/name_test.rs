use quartz_dns_domain::name::{is_dirty, last_label, MAX_LABEL_LEN};

fn labels(parts: &[&[u8]]) -> Vec<&'static [u8]> {
    // Leak is fine in tests; keeps the call sites readable.
    parts
        .iter()
        .map(|p| Box::leak(p.to_vec().into_boxed_slice()) as &'static [u8])
        .collect()
}

#[test]
fn test_clean_name() {
    assert!(!is_dirty(labels(&[b"example", b"com"]).into_iter()));
}

#[test]
fn test_root_is_clean() {
    assert!(!is_dirty(std::iter::empty::<&[u8]>()));
}

#[test]
fn test_hyphens_and_digits_are_clean() {
    assert!(!is_dirty(labels(&[b"a-1", b"xn--p1ai"]).into_iter()));
}

#[test]
fn test_space_is_dirty() {
    assert!(is_dirty(labels(&[b"ex ample", b"com"]).into_iter()));
}

#[test]
fn test_control_byte_is_dirty() {
    assert!(is_dirty(labels(&[b"ex\x07ample"]).into_iter()));
}

#[test]
fn test_high_byte_is_dirty() {
    assert!(is_dirty(labels(&[&[0x80u8, b'a'][..]]).into_iter()));
}

#[test]
fn test_dot_inside_label_is_dirty() {
    assert!(is_dirty(labels(&[b"ex.ample", b"com"]).into_iter()));
}

#[test]
fn test_backslash_is_dirty() {
    assert!(is_dirty(labels(&[b"ex\\ample"]).into_iter()));
}

#[test]
fn test_empty_label_is_dirty() {
    assert!(is_dirty(labels(&[b"example", b""]).into_iter()));
}

#[test]
fn test_overlong_label_is_dirty() {
    let long = vec![b'a'; MAX_LABEL_LEN + 1];
    assert!(is_dirty(std::iter::once(long.as_slice())));
}

#[test]
fn test_max_length_label_is_clean() {
    let max = vec![b'a'; MAX_LABEL_LEN];
    assert!(!is_dirty(std::iter::once(max.as_slice())));
}

#[test]
fn test_overlong_name_is_dirty() {
    // Five 63-byte labels put the wire form past 255 bytes.
    let label = vec![b'a'; 63];
    let parts: Vec<&[u8]> = (0..5).map(|_| label.as_slice()).collect();
    assert!(is_dirty(parts.into_iter()));
}

#[test]
fn test_last_label_lowercases() {
    assert_eq!(last_label(labels(&[b"example", b"COM"]).into_iter()), "com");
}

#[test]
fn test_last_label_single() {
    assert_eq!(last_label(labels(&[b"Example"]).into_iter()), "example");
}

#[test]
fn test_last_label_root() {
    assert_eq!(last_label(std::iter::empty::<&[u8]>()), "");
}
