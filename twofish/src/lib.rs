//! Pure Rust implementation of the [Twofish][1] block cipher.
//!
//! Keys of 128, 192 and 256 bits are supported. The key-dependent
//! S-boxes are fully expanded during key setup into four 256-entry tables
//! with the MDS multiplication folded in.
//!
//! # Examples
//! ```
//! use twofish::Twofish;
//! use twofish::cipher::{
//!     generic_array::GenericArray,
//!     BlockEncrypt, BlockDecrypt, KeyInit,
//! };
//! use hex_literal::hex;
//!
//! let key = [0u8; 16];
//! let plaintext = [0u8; 16];
//! let ciphertext = hex!("9F589F5CF6122C32B6BFEC2F2AE8C35A");
//!
//! let cipher = Twofish::new_from_slice(&key).unwrap();
//!
//! let mut block = GenericArray::clone_from_slice(&plaintext);
//! cipher.encrypt_block(&mut block);
//! assert_eq!(&ciphertext, block.as_slice());
//!
//! cipher.decrypt_block(&mut block);
//! assert_eq!(&plaintext, block.as_slice());
//! ```
//!
//! [1]: https://www.schneier.com/academic/twofish/
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;

use cipher::{
    consts::{U16, U32},
    AlgorithmName, BlockCipher, InvalidLength, KeyInit, KeySizeUser,
};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

mod consts;

use consts::{gf_mul, MDS_COL, Q0, Q1, RS, RS_POLY};

/// Block over which the Twofish cipher operates.
pub type Block = cipher::Block<Twofish>;
/// Twofish key of the largest (256-bit) size.
pub type Key = cipher::Key<Twofish>;

const ROUNDS: usize = 16;
const RHO: u32 = 0x0101_0101;

const Q: [&[u8; 256]; 2] = [&Q0, &Q1];

/// q-permutation order for the extra stage of 256-bit keys, per byte.
const STAGE4: [usize; 4] = [1, 0, 0, 1];
/// q-permutation order for the extra stage of 192 and 256-bit keys.
const STAGE3: [usize; 4] = [1, 1, 0, 0];
/// The three permutations applied to every byte for all key sizes.
const STAGE_LAST: [[usize; 3]; 4] = [[0, 0, 1], [1, 0, 0], [0, 1, 1], [1, 1, 0]];

/// Byte `j` of the h function before MDS mixing.
fn q_chain(j: usize, x: u8, l: &[u32]) -> u8 {
    let lb = |i: usize| (l[i] >> (8 * j)) as u8;
    let mut y = x;
    if l.len() == 4 {
        y = Q[STAGE4[j]][y as usize] ^ lb(3);
    }
    if l.len() >= 3 {
        y = Q[STAGE3[j]][y as usize] ^ lb(2);
    }
    let [a, b, c] = STAGE_LAST[j];
    y = Q[a][y as usize] ^ lb(1);
    y = Q[b][y as usize] ^ lb(0);
    Q[c][y as usize]
}

fn h(x: u32, l: &[u32]) -> u32 {
    x.to_le_bytes()
        .iter()
        .enumerate()
        .fold(0, |acc, (j, &b)| acc ^ MDS_COL[j][q_chain(j, b, l) as usize])
}

/// Reed-Solomon encoding of one 8-byte key chunk.
fn rs_mds_encode(m: &[u8]) -> u32 {
    let mut s = [0u8; 4];
    for (row, out) in RS.iter().zip(s.iter_mut()) {
        *out = row
            .iter()
            .zip(m.iter())
            .fold(0, |acc, (&r, &b)| acc ^ gf_mul(r, b, RS_POLY));
    }
    u32::from_le_bytes(s)
}

/// Twofish block cipher.
#[derive(Clone)]
pub struct Twofish {
    k: [u32; 40],
    s: [[u32; 256]; 4],
}

impl Twofish {
    /// Number of rounds.
    pub const ROUNDS: usize = ROUNDS;
    /// Size of the internal words in bits.
    pub const WORD_BITS: usize = 32;
    /// Size of a block in bits.
    pub const BLOCK_BITS: usize = 128;
    /// Accepted key sizes in bits.
    pub const VALID_KEY_BITS: [usize; 3] = [128, 192, 256];

    fn expand(key: &[u8]) -> Self {
        let n = key.len() / 8;
        let mut me = Zeroizing::new([0u32; 4]);
        let mut mo = Zeroizing::new([0u32; 4]);
        let mut sv = Zeroizing::new([0u32; 4]);

        for (i, chunk) in key.chunks_exact(8).enumerate() {
            me[i] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            mo[i] = u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
            sv[n - 1 - i] = rs_mds_encode(chunk);
        }

        let mut k = [0u32; 40];
        for (i, pair) in k.chunks_exact_mut(2).enumerate() {
            let i = i as u32;
            let a = h(2 * i * RHO, &me[..n]);
            let b = h((2 * i + 1) * RHO, &mo[..n]).rotate_left(8);
            pair[0] = a.wrapping_add(b);
            pair[1] = a.wrapping_add(b.wrapping_mul(2)).rotate_left(9);
        }

        let mut s = [[0u32; 256]; 4];
        for (j, table) in s.iter_mut().enumerate() {
            for (x, v) in table.iter_mut().enumerate() {
                *v = MDS_COL[j][q_chain(j, x as u8, &sv[..n]) as usize];
            }
        }

        Self { k, s }
    }

    #[inline(always)]
    fn g(&self, x: u32) -> u32 {
        let b = x.to_le_bytes();
        self.s[0][b[0] as usize]
            ^ self.s[1][b[1] as usize]
            ^ self.s[2][b[2] as usize]
            ^ self.s[3][b[3] as usize]
    }

    /// Pseudo-Hadamard-combined round function outputs for round `r`.
    #[inline(always)]
    fn f(&self, r0: u32, r1: u32, r: usize) -> (u32, u32) {
        let t0 = self.g(r0);
        let t1 = self.g(r1.rotate_left(8));
        let f0 = t0.wrapping_add(t1).wrapping_add(self.k[2 * r + 8]);
        let f1 = t0
            .wrapping_add(t1.wrapping_mul(2))
            .wrapping_add(self.k[2 * r + 9]);
        (f0, f1)
    }
}

impl KeySizeUser for Twofish {
    type KeySize = U32;
}

impl KeyInit for Twofish {
    fn new(key: &Key) -> Self {
        Self::expand(key)
    }

    fn new_from_slice(key: &[u8]) -> Result<Self, InvalidLength> {
        match key.len() {
            16 | 24 | 32 => Ok(Self::expand(key)),
            _ => Err(InvalidLength),
        }
    }
}

impl BlockCipher for Twofish {}

cipher::impl_simple_block_encdec!(
    Twofish, U16, cipher, block,
    encrypt: {
        let mut r = load(block.get_in());
        for (w, k) in r.iter_mut().zip(cipher.k[..4].iter()) {
            *w ^= k;
        }
        for i in 0..ROUNDS {
            let (f0, f1) = cipher.f(r[0], r[1], i);
            let c = (r[2] ^ f0).rotate_right(1);
            let d = r[3].rotate_left(1) ^ f1;
            r = [c, d, r[0], r[1]];
        }
        let out = [r[2] ^ cipher.k[4], r[3] ^ cipher.k[5], r[0] ^ cipher.k[6], r[1] ^ cipher.k[7]];
        store(&out, block.get_out());
    }
    decrypt: {
        let mut r = load(block.get_in());
        for (w, k) in r.iter_mut().zip(cipher.k[4..8].iter()) {
            *w ^= k;
        }
        for i in (0..ROUNDS).rev() {
            let (f0, f1) = cipher.f(r[0], r[1], i);
            let c = r[2].rotate_left(1) ^ f0;
            let d = (r[3] ^ f1).rotate_right(1);
            r = [c, d, r[0], r[1]];
        }
        let out = [r[2] ^ cipher.k[0], r[3] ^ cipher.k[1], r[0] ^ cipher.k[2], r[1] ^ cipher.k[3]];
        store(&out, block.get_out());
    }
);

impl Drop for Twofish {
    fn drop(&mut self) {
        self.k.zeroize();
        self.s.zeroize();
    }
}

impl ZeroizeOnDrop for Twofish {}

impl fmt::Debug for Twofish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Twofish { .. }")
    }
}

impl AlgorithmName for Twofish {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Twofish")
    }
}

fn load(b: &[u8]) -> [u32; 4] {
    let mut r = [0u32; 4];
    for (chunk, v) in b.chunks_exact(4).zip(r.iter_mut()) {
        *v = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    r
}

fn store(r: &[u32; 4], b: &mut [u8]) {
    for (chunk, v) in b.chunks_exact_mut(4).zip(r.iter()) {
        chunk.copy_from_slice(&v.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::ManuallyDrop;

    #[test]
    fn q_tables_are_permutations() {
        for q in Q.iter() {
            let mut seen = [false; 256];
            for &v in q.iter() {
                assert!(!seen[v as usize]);
                seen[v as usize] = true;
            }
        }
        assert_eq!(Q0[..8], [0xA9, 0x67, 0xB3, 0xE8, 0x04, 0xFD, 0xA3, 0x76]);
        assert_eq!(Q1[..8], [0x75, 0xF3, 0xC6, 0xF4, 0xDB, 0x7B, 0xFB, 0xC8]);
    }

    #[test]
    fn mds_columns() {
        assert_eq!(MDS_COL[0][1], 0xEFEF_5B01);
        assert_eq!(MDS_COL[1][1], 0x015B_EFEF);
        for col in MDS_COL.iter() {
            assert_eq!(col[0], 0);
        }
    }

    #[test]
    fn zero_key_subkeys() {
        let c = Twofish::new_from_slice(&[0u8; 16]).unwrap();
        assert_eq!(c.k[..4], [0x52C5_4DDE, 0x11F0_626D, 0x7CAC_9D4A, 0x4D1B_4AAA]);
        assert_eq!(c.k[38..], [0xF298_311E, 0x696E_A672]);
        assert_eq!(c.s[0][0], 0x9C9C_71B3);
        assert_eq!(c.s[3][255], 0x9186_2E91);
    }

    #[test]
    #[allow(unsafe_code)]
    fn schedule_is_wiped_on_drop() {
        let mut c = ManuallyDrop::new(Twofish::new(&Key::from([0xA5u8; 32])));
        unsafe { ManuallyDrop::drop(&mut c) };
        assert!(c.k.iter().all(|&w| w == 0));
        assert!(c.s.iter().flatten().all(|&w| w == 0));
    }
}
