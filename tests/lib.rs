//! Shared helpers for the bytequeue integration and property suites.

/// Deterministic non-repeating byte pattern of the given length.
///
/// The modulus is prime so that a slice taken at the wrong offset never
/// matches the expected bytes, which catches off-by-one errors around the
/// wrap point of the ring.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Split `data` into chunks of at most `chunk` bytes, preserving order.
pub fn chunks(data: &[u8], chunk: usize) -> Vec<Vec<u8>> {
    assert!(chunk > 0, "chunk size must be at least 1");
    data.chunks(chunk).map(<[u8]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_is_deterministic() {
        assert_eq!(pattern(300), pattern(300));
        assert_eq!(pattern(3), vec![0, 1, 2]);
        // wraps at the prime modulus, not at 256
        assert_eq!(pattern(252)[251], 0);
    }

    #[test]
    fn chunks_reassemble_to_input() {
        let data = pattern(1000);
        let split = chunks(&data, 97);
        let joined: Vec<u8> = split.concat();
        assert_eq!(joined, data);
    }
}
