//! Pure Rust implementation of the [XTEA][1] block cipher.
//!
//! XTEA is a 64-bit block cipher with a 128-bit key. It is provided for
//! compatibility with existing protocols and should be avoided in new
//! designs.
//!
//! # Examples
//! ```
//! use xtea::Xtea;
//! use xtea::cipher::{
//!     generic_array::GenericArray,
//!     BlockEncrypt, BlockDecrypt, KeyInit,
//! };
//! use hex_literal::hex;
//!
//! let key = hex!("000102030405060708090A0B0C0D0E0F");
//! let plaintext = hex!("4142434445464748");
//! let ciphertext = hex!("497DF3D072612CB5");
//!
//! let cipher = Xtea::new(GenericArray::from_slice(&key));
//!
//! let mut block = GenericArray::clone_from_slice(&plaintext);
//! cipher.encrypt_block(&mut block);
//! assert_eq!(&ciphertext, block.as_slice());
//!
//! cipher.decrypt_block(&mut block);
//! assert_eq!(&plaintext, block.as_slice());
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/XTEA
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;

use cipher::{
    consts::{U16, U8},
    AlgorithmName, BlockCipher, KeyInit, KeySizeUser,
};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Block over which the XTEA cipher operates.
pub type Block = cipher::Block<Xtea>;
/// The XTEA cipher initialization key.
pub type Key = cipher::Key<Xtea>;

const DELTA: u32 = 0x9E37_79B9;
const CYCLES: usize = 32;

/// XTEA block cipher instance.
#[derive(Clone)]
pub struct Xtea {
    k: [u32; 2 * CYCLES],
}

impl Xtea {
    /// Number of Feistel cycles (each cycle is two half-rounds).
    pub const ROUNDS: usize = CYCLES;
    /// Size of the internal words in bits.
    pub const WORD_BITS: usize = 32;
    /// Size of a block in bits.
    pub const BLOCK_BITS: usize = 64;
    /// Size of the key in bits.
    pub const KEY_BITS: usize = 128;
}

impl KeySizeUser for Xtea {
    type KeySize = U16;
}

impl KeyInit for Xtea {
    fn new(key: &Key) -> Self {
        let mut uk = Zeroizing::new([0u32; 4]);
        for (chunk, v) in key.chunks_exact(4).zip(uk.iter_mut()) {
            *v = to_u32(chunk);
        }

        let mut k = [0u32; 2 * CYCLES];
        let mut d = 0u32;
        for pair in k.chunks_exact_mut(2) {
            pair[0] = d.wrapping_add(uk[(d & 3) as usize]);
            d = d.wrapping_add(DELTA);
            pair[1] = d.wrapping_add(uk[((d >> 11) & 3) as usize]);
        }

        Self { k }
    }
}

impl BlockCipher for Xtea {}

#[inline(always)]
fn mix(x: u32) -> u32 {
    ((x << 4) ^ (x >> 5)).wrapping_add(x)
}

cipher::impl_simple_block_encdec!(
    Xtea, U8, cipher, block,
    encrypt: {
        let b = block.get_in();
        let mut l = to_u32(&b[0..4]);
        let mut r = to_u32(&b[4..8]);
        for k in cipher.k.chunks_exact(2) {
            l = l.wrapping_add(mix(r) ^ k[0]);
            r = r.wrapping_add(mix(l) ^ k[1]);
        }
        let block = block.get_out();
        block[0..4].copy_from_slice(&l.to_be_bytes());
        block[4..8].copy_from_slice(&r.to_be_bytes());
    }
    decrypt: {
        let b = block.get_in();
        let mut l = to_u32(&b[0..4]);
        let mut r = to_u32(&b[4..8]);
        for k in cipher.k.chunks_exact(2).rev() {
            r = r.wrapping_sub(mix(l) ^ k[1]);
            l = l.wrapping_sub(mix(r) ^ k[0]);
        }
        let block = block.get_out();
        block[0..4].copy_from_slice(&l.to_be_bytes());
        block[4..8].copy_from_slice(&r.to_be_bytes());
    }
);

impl Drop for Xtea {
    fn drop(&mut self) {
        self.k.zeroize();
    }
}

impl ZeroizeOnDrop for Xtea {}

impl fmt::Debug for Xtea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Xtea { .. }")
    }
}

impl AlgorithmName for Xtea {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("XTEA")
    }
}

fn to_u32(chunk: &[u8]) -> u32 {
    u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::ManuallyDrop;

    #[test]
    fn schedule_is_deterministic() {
        let key = Key::from([7u8; 16]);
        let a = Xtea::new(&key);
        let b = Xtea::new(&key);
        assert_eq!(a.k, b.k);
    }

    #[test]
    fn first_subkeys_follow_delta_progression() {
        let key = Key::from([
            0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4,
        ]);
        let c = Xtea::new(&key);
        // D = 0 selects UK[0]; D = DELTA selects UK[3] for the odd subkey
        // and UK[1] for the next even one
        assert_eq!(c.k[0], 1);
        assert_eq!(c.k[1], DELTA.wrapping_add(4));
        assert_eq!(c.k[2], DELTA.wrapping_add(2));
    }

    #[test]
    #[allow(unsafe_code)]
    fn schedule_is_wiped_on_drop() {
        let mut c = ManuallyDrop::new(Xtea::new(&Key::from([0xA5u8; 16])));
        assert!(c.k.iter().any(|&w| w != 0));
        unsafe { ManuallyDrop::drop(&mut c) };
        assert!(c.k.iter().all(|&w| w == 0));
    }
}
