use microcrypt::error::CryptoError;
use microcrypt::rng::{random_modular, random_rejection, REJECTION_RETRY_LIMIT, TrngSource};

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

    fn consumed(&self) -> usize {
        self.pos
    }
}

impl TrngSource for ScriptedTrng {
    fn next_word(&mut self) -> Result<u32, CryptoError> {
        let word = self.words.get(self.pos).copied().ok_or(CryptoError::RngError)?;
        self.pos += 1;
        Ok(word)
    }
}

/// Always produces the same word.
struct ConstTrng(u32);

impl TrngSource for ConstTrng {
    fn next_word(&mut self) -> Result<u32, CryptoError> {
        Ok(self.0)
    }
}

// -------------------------------------------------------
// 1. STRICT REJECTION
// -------------------------------------------------------

#[test]
fn in_range_draw_is_accepted_verbatim() {
    let mut trng = ScriptedTrng::new(&[0x1234_5678, 0x0000_0042]);
    let lower = [1u32, 0];
    let upper = [0xffff_ffff, 0x0000_00ff];

    let mut out = [0u32; 2];
    random_rejection(&mut trng, &lower, &upper, &mut out).unwrap();

    assert_eq!(out, [0x1234_5678, 0x0000_0042]);
    assert_eq!(trng.consumed(), 2);
}

#[test]
fn out_of_range_draw_is_rejected_and_redrawn() {
    // First draw exceeds the bound even after masking; second is good.
    let mut trng = ScriptedTrng::new(&[0xffff_ffff, 0x0000_00ff, 0x0000_0007, 0x0000_0001]);
    let lower = [1u32, 0];
    let upper = [0x0000_0000, 0x0000_00f0];

    let mut out = [0u32; 2];
    random_rejection(&mut trng, &lower, &upper, &mut out).unwrap();

    assert_eq!(out, [7, 1]);
    assert_eq!(trng.consumed(), 4);
}

#[test]
fn masking_limits_the_draw_to_the_bound_width() {
    // upper has 33 significant bits; the top word must be masked to one.
    let mut trng = ScriptedTrng::new(&[0x0000_0009, 0xffff_ffff]);
    let lower = [1u32, 0];
    let upper = [0x0000_000a, 0x0000_0001];

    let mut out = [0u32; 2];
    random_rejection(&mut trng, &lower, &upper, &mut out).unwrap();

    // 0xffffffff masked to bit 33 → 1
    assert_eq!(out, [9, 1]);
}

#[test]
fn rejection_gives_up_after_the_retry_ceiling() {
    // Every masked draw is zero, below lower = 1.
    let mut trng = ScriptedTrng::new(&vec![0u32; 2 * REJECTION_RETRY_LIMIT + 8]);
    let lower = [1u32, 0];
    let upper = [0xffff_ffff, 0x7fff_ffff];

    let mut out = [0u32; 2];
    assert_eq!(
        random_rejection(&mut trng, &lower, &upper, &mut out),
        Err(CryptoError::RngError)
    );
    assert_eq!(trng.consumed(), 2 * REJECTION_RETRY_LIMIT);
}

#[test]
fn oracle_failure_propagates() {
    let mut trng = ScriptedTrng::new(&[5]);
    let lower = [1u32, 0];
    let upper = [0xffff_ffff, 0xffff_ffff];

    let mut out = [0u32; 2];
    assert_eq!(
        random_rejection(&mut trng, &lower, &upper, &mut out),
        Err(CryptoError::RngError)
    );
}

// -------------------------------------------------------
// 2. MODULAR POLICY
// -------------------------------------------------------

#[test]
fn modular_draw_reduces_into_the_interval() {
    // Wide draw is 2 words for a 1-word interval.
    let mut trng = ScriptedTrng::new(&[0xdead_beef, 0x0bad_cafe]);
    let lower = [5u32];
    let upper = [14u32];

    let mut out = [0u32; 1];
    random_modular(&mut trng, &lower, &upper, &mut out).unwrap();

    let wide = ((0x0bad_cafeu64) << 32) | 0xdead_beefu64;
    assert_eq!(out[0] as u64, wide % 10 + 5);
}

#[test]
fn modular_draw_stays_in_bounds_for_many_samples() {
    let mut trng = ConstTrng(0x9e37_79b9);
    let lower = [100u32, 0];
    let upper = [0x0000_ffff, 1];

    for _ in 0..16 {
        let mut out = [0u32; 2];
        random_modular(&mut trng, &lower, &upper, &mut out).unwrap();

        let value = ((out[1] as u64) << 32) | out[0] as u64;
        assert!(value >= 100);
        assert!(value <= ((1u64) << 32 | 0xffff));
    }
}

#[test]
fn full_width_interval_uses_the_raw_draw() {
    let mut trng = ScriptedTrng::new(&[0xaaaa_5555]);
    let lower = [0u32];
    let upper = [0xffff_ffff];

    let mut out = [0u32; 1];
    random_modular(&mut trng, &lower, &upper, &mut out).unwrap();

    assert_eq!(out[0], 0xaaaa_5555);
    assert_eq!(trng.consumed(), 1);
}

#[test]
fn inverted_interval_is_rejected() {
    let mut trng = ConstTrng(1);
    let lower = [9u32];
    let upper = [3u32];

    let mut out = [0u32; 1];
    assert_eq!(
        random_modular(&mut trng, &lower, &upper, &mut out),
        Err(CryptoError::InvalidInput)
    );
}
