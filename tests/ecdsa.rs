use microcrypt::ecc::curves::{Curve, SECP224R1, SECP256R1, SECP384R1, SECP521R1};
use microcrypt::ecc::ecdsa::{EcdsaSignature, sign, verify};
use microcrypt::ecc::keygen::generate_keypair;
use microcrypt::ecc::AffinePoint;
use microcrypt::error::CryptoError;
use microcrypt::hash::{sha256, sha384, sha512};
use microcrypt::rng::TrngSource;

fn unhex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

/// Replays a fixed word sequence, then fails.
struct ScriptedTrng {
    words: Vec<u32>,
    pos: usize,
}

impl ScriptedTrng {
    fn new(words: &[u32]) -> Self {
        ScriptedTrng {
            words: words.to_vec(),
            pos: 0,
        }
    }
}

impl TrngSource for ScriptedTrng {
    fn next_word(&mut self) -> Result<u32, CryptoError> {
        let word = self.words.get(self.pos).copied().ok_or(CryptoError::RngError)?;
        self.pos += 1;
        Ok(word)
    }
}

/// Deterministic mixing oracle, good enough to land in [1, n−1] within
/// a few draws on every supported curve.
struct MixTrng(u32);

impl TrngSource for MixTrng {
    fn next_word(&mut self) -> Result<u32, CryptoError> {
        self.0 = self.0.wrapping_mul(1664525).wrapping_add(1013904223);
        Ok(self.0 ^ (self.0 >> 16).wrapping_mul(0x45d9f3b))
    }
}

fn roundtrip(curve: &Curve, trng_seed: u32, hash: &[u8]) {
    let nb = curve.byte_size;

    let mut trng = MixTrng(trng_seed);
    let mut d = vec![0u8; nb];
    let mut qx = vec![0u8; nb];
    let mut qy = vec![0u8; nb];
    generate_keypair(curve, &mut trng, &mut d, &mut qx, &mut qy).unwrap();

    let mut r = vec![0u8; nb];
    let mut s = vec![0u8; nb];
    sign(curve, &mut trng, &d, hash, &mut r, &mut s).unwrap();

    let pub_key = AffinePoint { x: &qx, y: &qy };
    verify(curve, &pub_key, &EcdsaSignature { r: &r, s: &s }, hash).unwrap();

    // Any single corrupted byte must be rejected.
    let mut bad_r = r.clone();
    bad_r[nb / 2] ^= 0x04;
    assert_eq!(
        verify(curve, &pub_key, &EcdsaSignature { r: &bad_r, s: &s }, hash),
        Err(CryptoError::InvalidSignature)
    );

    let mut bad_s = s.clone();
    bad_s[0] ^= 0x01;
    assert_eq!(
        verify(curve, &pub_key, &EcdsaSignature { r: &r, s: &bad_s }, hash),
        Err(CryptoError::InvalidSignature)
    );
}

// -------------------------------------------------------
// 1. DETERMINISTIC KNOWN-ANSWER TESTS
// -------------------------------------------------------

#[test]
fn p256_sign_known_nonce() {
    let d = unhex("61c90afbf9f4eb074a088ffb621f96e5a2a697b4d9fff24945c93090ad43b204");
    let digest = sha256(b"sample message for signing");

    // Nonce words, least-significant first, as the gate draws them.
    let mut trng = ScriptedTrng::new(&[
        0x7403698b, 0x42683f1a, 0xcc89814f, 0xd8e8916d, 0x82fc9877, 0xdfee53d5, 0x34615ce7,
        0x6bc59441,
    ]);

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    sign(&SECP256R1, &mut trng, &d, &digest, &mut r, &mut s).unwrap();

    assert_eq!(r.to_vec(), unhex("cfb075999317aebe4c80894f2de3e4b7d2496d7bcf09e2f3174af61540f6bc46"));
    assert_eq!(s.to_vec(), unhex("5ac95008642f24064decc9b8ea6bedb9982d3230e9864edaa607a681586cce00"));

    let qx = unhex("9a2feb7e3d086a57276d9f6739b5b62ac85bf4e8a85e038c6ee8bfe4a58fc349");
    let qy = unhex("7e1a021d01ccd716e6f29c858f3bbdd33f90cf5106dcc1b06d9bd9025bda72fd");
    verify(
        &SECP256R1,
        &AffinePoint { x: &qx, y: &qy },
        &EcdsaSignature { r: &r, s: &s },
        &digest,
    )
    .unwrap();
}

#[test]
fn p224_sign_truncates_wider_hash() {
    // SHA-256 digest against a 28-byte curve: the leftmost 28 bytes are
    // the message representative.
    let d = unhex("76bbafdd7f7f10329705f7141ff27d0589bd695cf3da0eeea549b797");
    let digest = unhex("55133678fef52134e8db79c579249c777e830ca0b5611ae111a024794e8a5381");

    let mut trng = ScriptedTrng::new(&[
        0xdc0ef5c9, 0x5a4807c9, 0x1493394c, 0x0d45475d, 0x456e987e, 0xc969ed50, 0x6092f0f3,
    ]);

    let mut r = [0u8; 28];
    let mut s = [0u8; 28];
    sign(&SECP224R1, &mut trng, &d, &digest, &mut r, &mut s).unwrap();

    assert_eq!(r.to_vec(), unhex("e2ec883ac88c806534b6d299b20c6fedec40c89fa0f926a6a516d703"));
    assert_eq!(s.to_vec(), unhex("2668b43ce56715328f86268bfcf471f61f439a413c468d4879a42349"));

    let qx = unhex("1424c92697724b66bbb8057bcdebd2a2a01ad210e3ef613cbc632486");
    let qy = unhex("4e910f16026094f712f35bed7d0dc1a5b8c9d55fab49405ba02a1aab");
    verify(
        &SECP224R1,
        &AffinePoint { x: &qx, y: &qy },
        &EcdsaSignature { r: &r, s: &s },
        &digest,
    )
    .unwrap();
}

// -------------------------------------------------------
// 2. SIGN/VERIFY ROUND TRIPS
// -------------------------------------------------------

#[test]
fn p256_roundtrip() {
    roundtrip(&SECP256R1, 7, &sha256(b"round trip p256"));
}

#[test]
fn p384_roundtrip() {
    roundtrip(&SECP384R1, 1234, &sha384(b"round trip p384"));
}

#[test]
fn p521_roundtrip_accepts_sha512() {
    // 64 < 66, but SHA-512 is the strongest digest available.
    roundtrip(&SECP521R1, 99, &sha512(b"round trip p521"));
}

#[test]
fn verify_rejects_wrong_message() {
    let mut trng = MixTrng(42);
    let mut d = [0u8; 32];
    let mut qx = [0u8; 32];
    let mut qy = [0u8; 32];
    generate_keypair(&SECP256R1, &mut trng, &mut d, &mut qx, &mut qy).unwrap();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    sign(&SECP256R1, &mut trng, &d, &sha256(b"signed"), &mut r, &mut s).unwrap();

    assert_eq!(
        verify(
            &SECP256R1,
            &AffinePoint { x: &qx, y: &qy },
            &EcdsaSignature { r: &r, s: &s },
            &sha256(b"not signed"),
        ),
        Err(CryptoError::InvalidSignature)
    );
}

#[test]
fn verify_rejects_foreign_key() {
    let mut trng = MixTrng(43);

    let mut d = [0u8; 32];
    let mut qx = [0u8; 32];
    let mut qy = [0u8; 32];
    generate_keypair(&SECP256R1, &mut trng, &mut d, &mut qx, &mut qy).unwrap();

    let mut d2 = [0u8; 32];
    let mut qx2 = [0u8; 32];
    let mut qy2 = [0u8; 32];
    generate_keypair(&SECP256R1, &mut trng, &mut d2, &mut qx2, &mut qy2).unwrap();

    let digest = sha256(b"message");
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    sign(&SECP256R1, &mut trng, &d, &digest, &mut r, &mut s).unwrap();

    assert_eq!(
        verify(
            &SECP256R1,
            &AffinePoint { x: &qx2, y: &qy2 },
            &EcdsaSignature { r: &r, s: &s },
            &digest,
        ),
        Err(CryptoError::InvalidSignature)
    );
}

// -------------------------------------------------------
// 3. POLICY AND RANGE CHECKS
// -------------------------------------------------------

#[test]
fn hash_shorter_than_curve_is_rejected() {
    let mut trng = MixTrng(1);
    let d = [7u8; 48];
    let mut r = [0u8; 48];
    let mut s = [0u8; 48];

    assert_eq!(
        sign(&SECP384R1, &mut trng, &d, &sha256(b"m"), &mut r, &mut s),
        Err(CryptoError::WeakHash)
    );
}

#[test]
fn non_sha2_hash_length_is_rejected() {
    let mut trng = MixTrng(1);
    let d = [7u8; 32];
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];

    assert_eq!(
        sign(&SECP256R1, &mut trng, &d, &[0u8; 20], &mut r, &mut s),
        Err(CryptoError::InvalidLength)
    );
}

#[test]
fn verify_rejects_out_of_range_signature() {
    let mut trng = MixTrng(5);
    let mut d = [0u8; 32];
    let mut qx = [0u8; 32];
    let mut qy = [0u8; 32];
    generate_keypair(&SECP256R1, &mut trng, &mut d, &mut qx, &mut qy).unwrap();
    let pub_key = AffinePoint { x: &qx, y: &qy };

    let digest = sha256(b"m");
    let zero = [0u8; 32];
    let good = [1u8; 32];

    assert_eq!(
        verify(&SECP256R1, &pub_key, &EcdsaSignature { r: &zero, s: &good }, &digest),
        Err(CryptoError::InvalidSignature)
    );
    assert_eq!(
        verify(&SECP256R1, &pub_key, &EcdsaSignature { r: &good, s: &zero }, &digest),
        Err(CryptoError::InvalidSignature)
    );

    // r = n is out of range even though it is nonzero.
    let n = unhex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");
    assert_eq!(
        verify(&SECP256R1, &pub_key, &EcdsaSignature { r: &n, s: &good }, &digest),
        Err(CryptoError::InvalidSignature)
    );
}

#[test]
fn verify_rejects_off_curve_public_key() {
    let digest = sha256(b"m");
    let sig_r = [1u8; 32];
    let sig_s = [1u8; 32];

    let qx = [2u8; 32];
    let qy = [3u8; 32];
    assert_eq!(
        verify(
            &SECP256R1,
            &AffinePoint { x: &qx, y: &qy },
            &EcdsaSignature { r: &sig_r, s: &sig_s },
            &digest,
        ),
        Err(CryptoError::InvalidKey)
    );
}

#[test]
fn zero_private_key_is_rejected() {
    let mut trng = MixTrng(1);
    let d = [0u8; 32];
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];

    assert_eq!(
        sign(&SECP256R1, &mut trng, &d, &sha256(b"m"), &mut r, &mut s),
        Err(CryptoError::InvalidInput)
    );
}

#[test]
fn exhausted_trng_fails_with_rng_error() {
    let mut trng = ScriptedTrng::new(&[1, 2, 3]);
    let d = unhex("61c90afbf9f4eb074a088ffb621f96e5a2a697b4d9fff24945c93090ad43b204");
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];

    assert_eq!(
        sign(&SECP256R1, &mut trng, &d, &sha256(b"m"), &mut r, &mut s),
        Err(CryptoError::RngError)
    );
}
