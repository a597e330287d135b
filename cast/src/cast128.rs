use crate::consts::{S5, S6, S7, S8};
use crate::{to_u32, ROUND_FNS};
use cipher::{
    consts::{U16, U8},
    AlgorithmName, BlockCipher, InvalidLength, KeyInit, KeySizeUser,
};
use core::{fmt, ops::RangeInclusive};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The CAST-128 block cipher (RFC 2144).
///
/// Accepts keys of 5 to 16 bytes. Shorter keys are padded with zeros on
/// the right, and keys of 80 bits or less run 12 rounds instead of 16.
#[derive(Clone)]
pub struct Cast128 {
    km: [u32; 16],
    kr: [u8; 16],
    rounds: usize,
}

impl Cast128 {
    /// Number of rounds for keys longer than 80 bits.
    pub const ROUNDS: usize = 16;
    /// Number of rounds for keys of 80 bits or less.
    pub const SHORT_KEY_ROUNDS: usize = 12;
    /// Size of the internal words in bits.
    pub const WORD_BITS: usize = 32;
    /// Size of a block in bits.
    pub const BLOCK_BITS: usize = 64;
    /// Accepted key sizes in bits, in whole bytes.
    pub const VALID_KEY_BITS: RangeInclusive<usize> = 40..=128;

    /// Number of rounds this instance runs.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    fn expand(key: &[u8]) -> Self {
        let mut padded = Zeroizing::new([0u8; 16]);
        padded[..key.len()].copy_from_slice(key);

        let mut x = Zeroizing::new([0u32; 4]);
        for (chunk, w) in padded.chunks_exact(4).zip(x.iter_mut()) {
            *w = to_u32(chunk);
        }

        let mut km = [0u32; 16];
        let mut t = Zeroizing::new([0u32; 16]);
        key_schedule(&mut x, &mut km);
        key_schedule(&mut x, &mut t);

        let mut kr = [0u8; 16];
        for (r, &w) in kr.iter_mut().zip(t.iter()) {
            *r = (w & 0x1f) as u8;
        }

        let rounds = if key.len() <= 10 {
            Self::SHORT_KEY_ROUNDS
        } else {
            Self::ROUNDS
        };
        Self { km, kr, rounds }
    }
}

#[inline(always)]
fn b(w: &[u32; 4], i: usize) -> usize {
    (w[i / 4] >> (24 - 8 * (i % 4))) as usize & 0xff
}

/// One pass of the RFC 2144 subkey generator. Produces 16 words and leaves
/// `x` in the state the next pass continues from.
fn key_schedule(x: &mut [u32; 4], k: &mut [u32; 16]) {
    let mut z = Zeroizing::new([0u32; 4]);

    z[0] = x[0] ^ S5[b(x, 13)] ^ S6[b(x, 15)] ^ S7[b(x, 12)] ^ S8[b(x, 14)] ^ S7[b(x, 8)];
    z[1] = x[2] ^ S5[b(&z, 0)] ^ S6[b(&z, 2)] ^ S7[b(&z, 1)] ^ S8[b(&z, 3)] ^ S8[b(x, 10)];
    z[2] = x[3] ^ S5[b(&z, 7)] ^ S6[b(&z, 6)] ^ S7[b(&z, 5)] ^ S8[b(&z, 4)] ^ S5[b(x, 9)];
    z[3] = x[1] ^ S5[b(&z, 10)] ^ S6[b(&z, 9)] ^ S7[b(&z, 11)] ^ S8[b(&z, 8)] ^ S6[b(x, 11)];
    k[0] = S5[b(&z, 8)] ^ S6[b(&z, 9)] ^ S7[b(&z, 7)] ^ S8[b(&z, 6)] ^ S5[b(&z, 2)];
    k[1] = S5[b(&z, 10)] ^ S6[b(&z, 11)] ^ S7[b(&z, 5)] ^ S8[b(&z, 4)] ^ S6[b(&z, 6)];
    k[2] = S5[b(&z, 12)] ^ S6[b(&z, 13)] ^ S7[b(&z, 3)] ^ S8[b(&z, 2)] ^ S7[b(&z, 9)];
    k[3] = S5[b(&z, 14)] ^ S6[b(&z, 15)] ^ S7[b(&z, 1)] ^ S8[b(&z, 0)] ^ S8[b(&z, 12)];

    x[0] = z[2] ^ S5[b(&z, 5)] ^ S6[b(&z, 7)] ^ S7[b(&z, 4)] ^ S8[b(&z, 6)] ^ S7[b(&z, 0)];
    x[1] = z[0] ^ S5[b(x, 0)] ^ S6[b(x, 2)] ^ S7[b(x, 1)] ^ S8[b(x, 3)] ^ S8[b(&z, 2)];
    x[2] = z[1] ^ S5[b(x, 7)] ^ S6[b(x, 6)] ^ S7[b(x, 5)] ^ S8[b(x, 4)] ^ S5[b(&z, 1)];
    x[3] = z[3] ^ S5[b(x, 10)] ^ S6[b(x, 9)] ^ S7[b(x, 11)] ^ S8[b(x, 8)] ^ S6[b(&z, 3)];
    k[4] = S5[b(x, 3)] ^ S6[b(x, 2)] ^ S7[b(x, 12)] ^ S8[b(x, 13)] ^ S5[b(x, 8)];
    k[5] = S5[b(x, 1)] ^ S6[b(x, 0)] ^ S7[b(x, 14)] ^ S8[b(x, 15)] ^ S6[b(x, 13)];
    k[6] = S5[b(x, 7)] ^ S6[b(x, 6)] ^ S7[b(x, 8)] ^ S8[b(x, 9)] ^ S7[b(x, 3)];
    k[7] = S5[b(x, 5)] ^ S6[b(x, 4)] ^ S7[b(x, 10)] ^ S8[b(x, 11)] ^ S8[b(x, 7)];

    z[0] = x[0] ^ S5[b(x, 13)] ^ S6[b(x, 15)] ^ S7[b(x, 12)] ^ S8[b(x, 14)] ^ S7[b(x, 8)];
    z[1] = x[2] ^ S5[b(&z, 0)] ^ S6[b(&z, 2)] ^ S7[b(&z, 1)] ^ S8[b(&z, 3)] ^ S8[b(x, 10)];
    z[2] = x[3] ^ S5[b(&z, 7)] ^ S6[b(&z, 6)] ^ S7[b(&z, 5)] ^ S8[b(&z, 4)] ^ S5[b(x, 9)];
    z[3] = x[1] ^ S5[b(&z, 10)] ^ S6[b(&z, 9)] ^ S7[b(&z, 11)] ^ S8[b(&z, 8)] ^ S6[b(x, 11)];
    k[8] = S5[b(&z, 3)] ^ S6[b(&z, 2)] ^ S7[b(&z, 12)] ^ S8[b(&z, 13)] ^ S5[b(&z, 9)];
    k[9] = S5[b(&z, 1)] ^ S6[b(&z, 0)] ^ S7[b(&z, 14)] ^ S8[b(&z, 15)] ^ S6[b(&z, 12)];
    k[10] = S5[b(&z, 7)] ^ S6[b(&z, 6)] ^ S7[b(&z, 8)] ^ S8[b(&z, 9)] ^ S7[b(&z, 2)];
    k[11] = S5[b(&z, 5)] ^ S6[b(&z, 4)] ^ S7[b(&z, 10)] ^ S8[b(&z, 11)] ^ S8[b(&z, 6)];

    x[0] = z[2] ^ S5[b(&z, 5)] ^ S6[b(&z, 7)] ^ S7[b(&z, 4)] ^ S8[b(&z, 6)] ^ S7[b(&z, 0)];
    x[1] = z[0] ^ S5[b(x, 0)] ^ S6[b(x, 2)] ^ S7[b(x, 1)] ^ S8[b(x, 3)] ^ S8[b(&z, 2)];
    x[2] = z[1] ^ S5[b(x, 7)] ^ S6[b(x, 6)] ^ S7[b(x, 5)] ^ S8[b(x, 4)] ^ S5[b(&z, 1)];
    x[3] = z[3] ^ S5[b(x, 10)] ^ S6[b(x, 9)] ^ S7[b(x, 11)] ^ S8[b(x, 8)] ^ S6[b(&z, 3)];
    k[12] = S5[b(x, 8)] ^ S6[b(x, 9)] ^ S7[b(x, 7)] ^ S8[b(x, 6)] ^ S5[b(x, 3)];
    k[13] = S5[b(x, 10)] ^ S6[b(x, 11)] ^ S7[b(x, 5)] ^ S8[b(x, 4)] ^ S6[b(x, 7)];
    k[14] = S5[b(x, 12)] ^ S6[b(x, 13)] ^ S7[b(x, 3)] ^ S8[b(x, 2)] ^ S7[b(x, 8)];
    k[15] = S5[b(x, 14)] ^ S6[b(x, 15)] ^ S7[b(x, 1)] ^ S8[b(x, 0)] ^ S8[b(x, 13)];
}

impl KeySizeUser for Cast128 {
    type KeySize = U16;
}

impl KeyInit for Cast128 {
    fn new(key: &cipher::Key<Self>) -> Self {
        Self::expand(key)
    }

    fn new_from_slice(key: &[u8]) -> Result<Self, InvalidLength> {
        match key.len() {
            5..=16 => Ok(Self::expand(key)),
            _ => Err(InvalidLength),
        }
    }
}

impl BlockCipher for Cast128 {}

cipher::impl_simple_block_encdec!(
    Cast128, U8, cipher, block,
    encrypt: {
        let b = block.get_in();
        let (mut l, mut r) = (to_u32(&b[0..4]), to_u32(&b[4..8]));
        for i in 0..cipher.rounds {
            let t = l ^ ROUND_FNS[i % 3](r, cipher.km[i], cipher.kr[i]);
            l = r;
            r = t;
        }
        let block = block.get_out();
        block[0..4].copy_from_slice(&r.to_be_bytes());
        block[4..8].copy_from_slice(&l.to_be_bytes());
    }
    decrypt: {
        let b = block.get_in();
        let (mut l, mut r) = (to_u32(&b[0..4]), to_u32(&b[4..8]));
        for i in (0..cipher.rounds).rev() {
            let t = l ^ ROUND_FNS[i % 3](r, cipher.km[i], cipher.kr[i]);
            l = r;
            r = t;
        }
        let block = block.get_out();
        block[0..4].copy_from_slice(&r.to_be_bytes());
        block[4..8].copy_from_slice(&l.to_be_bytes());
    }
);

impl Drop for Cast128 {
    fn drop(&mut self) {
        self.km.zeroize();
        self.kr.zeroize();
    }
}

impl ZeroizeOnDrop for Cast128 {}

impl fmt::Debug for Cast128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cast128 { .. }")
    }
}

impl AlgorithmName for Cast128 {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CAST-128")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::ManuallyDrop;
    use hex_literal::hex;

    #[test]
    fn rfc2144_subkeys() {
        let c = Cast128::new(&hex!("0123456712345678234567893456789A").into());
        assert_eq!(c.km[..2], [0xBC17_3E26, 0x78A2_07EF]);
        assert_eq!(c.km[15], 0x83ED_A384);
        assert_eq!(c.kr, [21, 27, 1, 5, 3, 31, 31, 28, 16, 31, 18, 1, 29, 25, 1, 15]);
    }

    #[test]
    fn round_count_follows_key_length() {
        for len in 5..=16 {
            let c = Cast128::new_from_slice(&[0x5Au8; 16][..len]).unwrap();
            let expected = if len <= 10 { 12 } else { 16 };
            assert_eq!(c.rounds(), expected, "{} byte key", len);
        }
    }

    #[test]
    fn short_key_is_zero_padded() {
        let short = Cast128::new_from_slice(&hex!("0123456712")).unwrap();
        let padded = Cast128::new_from_slice(&hex!("01234567120000000000")).unwrap();
        assert_eq!((short.km, short.kr), (padded.km, padded.kr));
    }

    #[test]
    #[allow(unsafe_code)]
    fn schedule_is_wiped_on_drop() {
        let mut c = ManuallyDrop::new(Cast128::new(&[0x24u8; 16].into()));
        unsafe { ManuallyDrop::drop(&mut c) };
        assert_eq!(c.km, [0; 16]);
        assert_eq!(c.kr, [0; 16]);
    }
}
