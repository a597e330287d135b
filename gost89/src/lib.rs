//! Implementation of the [block cipher][1] defined in GOST 28147-89.
//!
//! The standard leaves the eight 4-bit S-boxes as a local configuration
//! parameter, so [`Gost89`] is generic over an [`Sbox`] parameter set.
//! Two sets are provided: [`Cbr`] (GostR3411-94-TestParamSet, the default)
//! and [`CryptoPro`] (GostR3411-94-CryptoProParamSet). Blocks and keys use
//! little-endian word order.
//!
//! # Examples
//! ```
//! use gost89::Gost89Cbr;
//! use gost89::cipher::{
//!     generic_array::GenericArray,
//!     BlockEncrypt, BlockDecrypt, KeyInit,
//! };
//! use hex_literal::hex;
//!
//! let key = hex!("
//!     BE5EC2006CFF9DCF52354959F1FF0CBF
//!     E95061B5A648C10387069C25997C0672
//! ");
//! let plaintext = hex!("0DF82802B741A292");
//! let ciphertext = hex!("07F9027DF7F7DF89");
//!
//! let cipher = Gost89Cbr::new(GenericArray::from_slice(&key));
//!
//! let mut block = GenericArray::clone_from_slice(&plaintext);
//! cipher.encrypt_block(&mut block);
//! assert_eq!(&ciphertext, block.as_slice());
//!
//! cipher.decrypt_block(&mut block);
//! assert_eq!(&plaintext, block.as_slice());
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/GOST_(block_cipher)
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;

use cipher::{
    consts::{U32, U8},
    AlgorithmName, BlockCipher, KeyInit, KeySizeUser,
};
use core::{fmt, marker::PhantomData};
use zeroize::{Zeroize, ZeroizeOnDrop};

mod sboxes;

pub use sboxes::{expand, Cbr, CryptoPro, ExpSbox, Params, Sbox};

/// Block over which the GOST 28147-89 cipher operates.
pub type Block = cipher::Block<Gost89>;
/// The GOST 28147-89 cipher initialization key.
pub type Key = cipher::Key<Gost89>;

/// Block cipher defined in GOST 28147-89 generic over S-box
pub struct Gost89<S: Sbox = Cbr> {
    key: [u32; 8],
    _p: PhantomData<S>,
}

impl<S: Sbox> Gost89<S> {
    /// Number of rounds.
    pub const ROUNDS: usize = 32;
    /// Size of the internal words in bits.
    pub const WORD_BITS: usize = 32;
    /// Size of a block in bits.
    pub const BLOCK_BITS: usize = 64;
    /// Size of the key in bits.
    pub const KEY_BITS: usize = 256;
}

impl<S: Sbox> KeySizeUser for Gost89<S> {
    type KeySize = U32;
}

impl<S: Sbox> KeyInit for Gost89<S> {
    fn new(key: &cipher::Key<Self>) -> Self {
        let mut key_u32 = [0u32; 8];
        key.chunks_exact(4)
            .zip(key_u32.iter_mut())
            .for_each(|(chunk, v)| *v = to_u32(chunk));
        Self {
            key: key_u32,
            _p: PhantomData,
        }
    }
}

impl<S: Sbox> BlockCipher for Gost89<S> {}

cipher::impl_simple_block_encdec!(
    <S: Sbox> Gost89, U8, cipher, block,
    encrypt: {
        let b = block.get_in();
        let mut v = (to_u32(&b[0..4]), to_u32(&b[4..8]));
        for _ in 0..3 {
            for i in (0..8).step_by(2) {
                v = cipher.two_rounds(v, i, i + 1);
            }
        }
        for i in (0..8).rev().step_by(2) {
            v = cipher.two_rounds(v, i, i - 1);
        }
        let block = block.get_out();
        block[0..4].copy_from_slice(&v.1.to_le_bytes());
        block[4..8].copy_from_slice(&v.0.to_le_bytes());
    }
    decrypt: {
        let b = block.get_in();
        let mut v = (to_u32(&b[0..4]), to_u32(&b[4..8]));
        for i in (0..8).step_by(2) {
            v = cipher.two_rounds(v, i, i + 1);
        }
        for _ in 0..3 {
            for i in (0..8).rev().step_by(2) {
                v = cipher.two_rounds(v, i, i - 1);
            }
        }
        let block = block.get_out();
        block[0..4].copy_from_slice(&v.1.to_le_bytes());
        block[4..8].copy_from_slice(&v.0.to_le_bytes());
    }
);

impl<S: Sbox> Gost89<S> {
    /// Two Feistel rounds keyed by subkeys `a` then `b`; `v` is `(N1, N2)`.
    #[inline(always)]
    fn two_rounds(&self, v: (u32, u32), a: usize, b: usize) -> (u32, u32) {
        let (mut n1, mut n2) = v;
        n2 ^= S::g(n1, self.key[a]);
        n1 ^= S::g(n2, self.key[b]);
        (n1, n2)
    }
}

impl<S: Sbox> Clone for Gost89<S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            _p: PhantomData,
        }
    }
}

impl<S: Sbox> Drop for Gost89<S> {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl<S: Sbox> ZeroizeOnDrop for Gost89<S> {}

impl<S: Sbox> fmt::Debug for Gost89<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gost89<{}> {{ .. }}", S::NAME)
    }
}

impl<S: Sbox> AlgorithmName for Gost89<S> {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GOST 28147-89 ({})", S::NAME)
    }
}

/// GOST 28147-89 with the GostR3411-94 test (CBR) parameter set
pub type Gost89Cbr = Gost89<Cbr>;
/// GOST 28147-89 with the GostR3411-94 CryptoPro parameter set
pub type Gost89CryptoPro = Gost89<CryptoPro>;

fn to_u32(chunk: &[u8]) -> u32 {
    u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::ManuallyDrop;

    #[test]
    fn key_words_are_little_endian() {
        let mut key = [0u8; 32];
        key[0] = 0x01;
        key[7] = 0x80;
        let c = Gost89Cbr::new(&key.into());
        assert_eq!(c.key[0], 0x0000_0001);
        assert_eq!(c.key[1], 0x8000_0000);
    }

    #[test]
    fn expanded_rows_are_disjoint_bit_ranges() {
        // OR-combining the rows is only XOR-equivalent when they never overlap
        let masks = [0x0007_F800u32, 0x07F8_0000, 0xF800_0007, 0x0000_07F8];
        for (row, mask) in Cbr::EXP_SBOX.iter().zip(masks.iter()) {
            assert!(row.iter().all(|&w| w & !mask == 0));
        }
    }

    #[test]
    #[allow(unsafe_code)]
    fn schedule_is_wiped_on_drop() {
        let mut c = ManuallyDrop::new(Gost89CryptoPro::new(&[0x5Au8; 32].into()));
        assert!(c.key.iter().any(|&w| w != 0));
        unsafe { ManuallyDrop::drop(&mut c) };
        assert!(c.key.iter().all(|&w| w == 0));
    }
}
