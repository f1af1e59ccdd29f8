use microcrypt::error::CryptoError;
use microcrypt::hash::soft::SoftSha;
use microcrypt::hash::{Endianness, HashMode};
use microcrypt::mac::HmacContext;

fn unhex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

fn hmac(mode: HashMode, key: &[u8], parts: &[&[u8]], mac_len: usize) -> Vec<u8> {
    let mut sha = SoftSha::new(mode, Endianness::BigEndian).unwrap();
    let mut ctx = HmacContext::init(&mut sha, key).unwrap();
    for part in parts {
        ctx.update(part).unwrap();
    }

    let mut mac = vec![0u8; mac_len];
    ctx.finish(&mut mac).unwrap();
    mac
}

// -------------------------------------------------------
// 1. KNOWN-ANSWER TESTS
// -------------------------------------------------------

#[test]
fn hmac_sha256_quick_brown_fox() {
    let expected = unhex("f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8");
    assert_eq!(
        hmac(
            HashMode::Sha256,
            b"key",
            &[b"The quick brown fox jumps over the lazy dog"],
            32
        ),
        expected
    );
}

#[test]
fn hmac_rfc4231_case_1() {
    let key = [0x0bu8; 20];

    assert_eq!(
        hmac(HashMode::Sha256, &key, &[b"Hi There"], 32),
        unhex("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7")
    );
    assert_eq!(
        hmac(HashMode::Sha512, &key, &[b"Hi There"], 64),
        unhex(
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
             daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        )
    );
}

#[test]
fn hmac_rfc4231_case_2_sha224() {
    assert_eq!(
        hmac(
            HashMode::Sha224,
            b"Jefe",
            &[b"what do ya want for nothing?"],
            28
        ),
        unhex("a30e01098bc6dbbf45690f3a7e9e6d0f8bbea2a39e6148008fd05e44")
    );
}

#[test]
fn hmac_key_longer_than_block_is_hashed_first() {
    let key = [0xaau8; 131];

    assert_eq!(
        hmac(
            HashMode::Sha384,
            &key,
            &[b"Test Using Larger Than Block-Size Key - Hash Key First"],
            48
        ),
        unhex(
            "4ece084485813e9088d2c63a041bc5b44f9ef1012a2b588f3cd11f05033ac4c6\
             0c2ef6ab4030fe8296248df163f44952"
        )
    );
}

// -------------------------------------------------------
// 2. STREAMING AND TRUNCATION
// -------------------------------------------------------

#[test]
fn hmac_is_partition_independent() {
    let message = b"The quick brown fox jumps over the lazy dog";
    let whole = hmac(HashMode::Sha256, b"key", &[message], 32);

    let (a, b) = message.split_at(11);
    assert_eq!(hmac(HashMode::Sha256, b"key", &[a, b], 32), whole);
}

#[test]
fn hmac_truncates_to_requested_length() {
    let full = hmac(HashMode::Sha256, b"key", &[b"data"], 32);
    let short = hmac(HashMode::Sha256, b"key", &[b"data"], 16);

    assert_eq!(short, full[..16].to_vec());
}

#[test]
fn hmac_rejects_tag_longer_than_hash() {
    let mut sha = SoftSha::new(HashMode::Sha256, Endianness::BigEndian).unwrap();
    let mut ctx = HmacContext::init(&mut sha, b"key").unwrap();
    ctx.update(b"data").unwrap();

    let mut mac = [0u8; 33];
    assert_eq!(ctx.finish(&mut mac), Err(CryptoError::InvalidLength));
}

#[test]
fn hmac_determinism_and_key_separation() {
    let a = hmac(HashMode::Sha256, b"key-one", &[b"message"], 32);
    let b = hmac(HashMode::Sha256, b"key-one", &[b"message"], 32);
    let c = hmac(HashMode::Sha256, b"key-two", &[b"message"], 32);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn finish_invalidates_context() {
    let mut sha = SoftSha::new(HashMode::Sha256, Endianness::BigEndian).unwrap();
    let mut ctx = HmacContext::init(&mut sha, b"key").unwrap();
    ctx.update(b"data").unwrap();

    let mut mac = [0u8; 32];
    ctx.finish(&mut mac).unwrap();

    assert_eq!(ctx.update(b"more"), Err(CryptoError::InvalidInput));
}
