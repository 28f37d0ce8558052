use hex_simd::AsciiCase;
use rand::RngCore;
use subtle::ConstantTimeEq;

const RANDOM_DATA_LEN: usize = 16;

/// Opaque single-use CSRF token
///
/// Consists of 128 bits of randomness, encoded as lowercase hex. Safe to embed into forms and URLs as-is.
#[aliri_braid::braid(serde)]
pub struct Token;

impl Token {
    #[must_use]
    pub fn generate() -> Self {
        let mut buf = [0; RANDOM_DATA_LEN];
        rand::thread_rng().fill_bytes(&mut buf);

        hex_simd::encode_to_string(buf, AsciiCase::Lower).into()
    }
}

impl TokenRef {
    /// Exact, case-sensitive comparison that doesn't short-circuit on the first differing byte
    #[inline]
    #[must_use]
    pub fn matches(&self, submitted: &str) -> bool {
        self.as_str().as_bytes().ct_eq(submitted.as_bytes()).into()
    }
}
