//! Reversible content transforms applied at the store boundary.

/// A reversible, deterministic, length-preserving byte transform.
///
/// The entity store holds only transformed bytes; [`encode`](Self::encode)
/// runs on the write boundary and [`decode`](Self::decode) on the read
/// boundary. Implementations operate in place on exactly the slice given and
/// must not read or write outside it. `decode` must invert `encode`, so that
/// decoding what was encoded reproduces the input bytes.
///
/// Any transform satisfying this contract can replace the shipped [`Rot13`]
/// without changing the surrounding filesystem behavior.
pub trait ContentTransform: Send + Sync {
    /// Transforms plaintext bytes into their at-rest form.
    fn encode(&self, buf: &mut [u8]);

    /// Transforms at-rest bytes back into plaintext.
    fn decode(&self, buf: &mut [u8]);
}

/// ROT13 over the 52 ASCII letters; every other byte passes through.
///
/// Self-inverse: applying the rotation twice reproduces the input, so encode
/// and decode are the same operation. An obfuscation demonstration, not a
/// security mechanism.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rot13;

impl Rot13 {
    fn rotate(buf: &mut [u8]) {
        for b in buf.iter_mut() {
            *b = match *b {
                b'a'..=b'm' | b'A'..=b'M' => *b + 13,
                b'n'..=b'z' | b'N'..=b'Z' => *b - 13,
                other => other,
            };
        }
    }
}

impl ContentTransform for Rot13 {
    fn encode(&self, buf: &mut [u8]) {
        Self::rotate(buf);
    }

    fn decode(&self, buf: &mut [u8]) {
        Self::rotate(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_substitutions() {
        let mut buf = *b"hello";
        Rot13.encode(&mut buf);
        assert_eq!(&buf, b"uryyb");

        let mut buf = *b"Why";
        Rot13.encode(&mut buf);
        assert_eq!(&buf, b"Jul");
    }

    #[test]
    fn test_half_range_boundaries() {
        let mut buf = *b"amnzAMNZ";
        Rot13.encode(&mut buf);
        assert_eq!(&buf, b"nzamNZAM");
    }

    #[test]
    fn test_non_letters_pass_through() {
        let mut buf = *b"1234 !?\n\0";
        let expected = buf;
        Rot13.encode(&mut buf);
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_round_trip_all_bytes() {
        let mut buf: Vec<u8> = (0u8..=255).collect();
        let original = buf.clone();
        Rot13.encode(&mut buf);
        Rot13.decode(&mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_operates_only_on_given_slice() {
        let mut buf = *b"abcdef";
        Rot13.encode(&mut buf[..3]);
        assert_eq!(&buf, b"nopdef");
    }

    #[test]
    fn test_empty_slice() {
        let mut buf: [u8; 0] = [];
        Rot13.encode(&mut buf);
    }
}
