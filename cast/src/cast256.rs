use crate::consts::{TM, TR};
use crate::{f1, f2, f3, to_u32, ROUND_FNS};
use cipher::{
    consts::{U16, U32},
    AlgorithmName, BlockCipher, InvalidLength, KeyInit, KeySizeUser,
};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The CAST-256 block cipher (RFC 2612).
#[derive(Clone)]
pub struct Cast256 {
    km: [u32; 48],
    kr: [u8; 48],
}

impl Cast256 {
    /// Number of rounds.
    pub const ROUNDS: usize = 48;
    /// Size of the internal words in bits.
    pub const WORD_BITS: usize = 32;
    /// Size of a block in bits.
    pub const BLOCK_BITS: usize = 128;
    /// Accepted key sizes in bits.
    pub const VALID_KEY_BITS: [usize; 5] = [128, 160, 192, 224, 256];

    fn expand(key: &[u8]) -> Self {
        let mut padded = Zeroizing::new([0u8; 32]);
        padded[..key.len()].copy_from_slice(key);

        // A..H
        let mut kw = Zeroizing::new([0u32; 8]);
        for (chunk, w) in padded.chunks_exact(4).zip(kw.iter_mut()) {
            *w = to_u32(chunk);
        }

        let mut km = [0u32; 48];
        let mut kr = [0u8; 48];
        for i in 0..12 {
            octave(&mut kw, 16 * i);
            octave(&mut kw, 16 * i + 8);

            // Kr = (A, C, E, G), Km = (H, F, D, B)
            for j in 0..4 {
                kr[4 * i + j] = (kw[2 * j] & 0x1f) as u8;
                km[4 * i + j] = kw[7 - 2 * j];
            }
        }
        Self { km, kr }
    }

    /// Forward quad-round `Q(q)`.
    #[inline(always)]
    fn quad(&self, b: &mut [u32; 4], q: usize) {
        let (m, r) = (&self.km[4 * q..], &self.kr[4 * q..]);
        b[2] ^= f1(b[3], m[0], r[0]);
        b[1] ^= f2(b[2], m[1], r[1]);
        b[0] ^= f3(b[1], m[2], r[2]);
        b[3] ^= f1(b[0], m[3], r[3]);
    }

    /// Reverse quad-round `QBAR(q)`.
    #[inline(always)]
    fn quad_inv(&self, b: &mut [u32; 4], q: usize) {
        let (m, r) = (&self.km[4 * q..], &self.kr[4 * q..]);
        b[3] ^= f1(b[0], m[3], r[3]);
        b[0] ^= f3(b[1], m[2], r[2]);
        b[1] ^= f2(b[2], m[1], r[1]);
        b[2] ^= f1(b[3], m[0], r[0]);
    }
}

/// Forward octave `W` over the key words using table entries `n..n + 8`.
fn octave(k: &mut [u32; 8], n: usize) {
    // G ^= f1(H), F ^= f2(G), ..., A ^= f1(B), H ^= f2(A)
    for j in 0..8 {
        let (dst, src) = ((14 - j) % 8, (15 - j) % 8);
        k[dst] ^= ROUND_FNS[j % 3](k[src], TM[n + j], TR[(n + j) % 32]);
    }
}

impl KeySizeUser for Cast256 {
    type KeySize = U32;
}

impl KeyInit for Cast256 {
    fn new(key: &cipher::Key<Self>) -> Self {
        Self::expand(key)
    }

    fn new_from_slice(key: &[u8]) -> Result<Self, InvalidLength> {
        match key.len() {
            16 | 20 | 24 | 28 | 32 => Ok(Self::expand(key)),
            _ => Err(InvalidLength),
        }
    }
}

impl BlockCipher for Cast256 {}

cipher::impl_simple_block_encdec!(
    Cast256, U16, cipher, block,
    encrypt: {
        let mut b = load(block.get_in());
        for q in 0..6 {
            cipher.quad(&mut b, q);
        }
        for q in 6..12 {
            cipher.quad_inv(&mut b, q);
        }
        store(&b, block.get_out());
    }
    decrypt: {
        let mut b = load(block.get_in());
        for q in (6..12).rev() {
            cipher.quad(&mut b, q);
        }
        for q in (0..6).rev() {
            cipher.quad_inv(&mut b, q);
        }
        store(&b, block.get_out());
    }
);

fn load(bytes: &[u8]) -> [u32; 4] {
    let mut b = [0u32; 4];
    for (chunk, w) in bytes.chunks_exact(4).zip(b.iter_mut()) {
        *w = to_u32(chunk);
    }
    b
}

fn store(b: &[u32; 4], bytes: &mut [u8]) {
    for (chunk, w) in bytes.chunks_exact_mut(4).zip(b.iter()) {
        chunk.copy_from_slice(&w.to_be_bytes());
    }
}

impl Drop for Cast256 {
    fn drop(&mut self) {
        self.km.zeroize();
        self.kr.zeroize();
    }
}

impl ZeroizeOnDrop for Cast256 {}

impl fmt::Debug for Cast256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cast256 { .. }")
    }
}

impl AlgorithmName for Cast256 {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CAST-256")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::ManuallyDrop;
    use hex_literal::hex;

    #[test]
    fn generated_tables() {
        assert_eq!(TM[0], 0x5A82_7999);
        assert_eq!(TM[1], 0xC95C_653A);
        assert_eq!(TM[191], 0x5A82_7999u32.wrapping_add(191u32.wrapping_mul(0x6ED9_EBA1)));
        assert_eq!(TR[..4], [19, 4, 21, 6]);
    }

    #[test]
    fn rfc2612_subkeys() {
        let c = Cast256::new_from_slice(&hex!("2342BB9EFA38542C0AF75647F29F615D")).unwrap();
        assert_eq!(c.km[..4], [0xF364_D7F9, 0x2335_00C0, 0x83CE_E501, 0x01F8_57C6]);
        assert_eq!(c.kr[..4], [28, 29, 24, 6]);
        assert_eq!((c.km[47], c.kr[47]), (0x2B8A_06F9, 24));
    }

    #[test]
    #[allow(unsafe_code)]
    fn schedule_is_wiped_on_drop() {
        let mut c = ManuallyDrop::new(Cast256::new(&[0x99u8; 32].into()));
        unsafe { ManuallyDrop::drop(&mut c) };
        assert!(c.km.iter().all(|&w| w == 0));
        assert!(c.kr.iter().all(|&r| r == 0));
    }
}
