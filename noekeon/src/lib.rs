//! Pure Rust implementation of the [Noekeon][1] block cipher.
//!
//! Noekeon is a 128-bit block cipher with a 128-bit key built only from
//! bitwise operations and rotations, which makes it naturally resistant
//! to cache-timing attacks. This crate implements the indirect-key mode:
//! the working key is the user key encrypted under the null key.
//!
//! # Examples
//! ```
//! use noekeon::Noekeon;
//! use noekeon::cipher::{
//!     generic_array::GenericArray,
//!     BlockEncrypt, BlockDecrypt, KeyInit,
//! };
//! use hex_literal::hex;
//!
//! let key = [0u8; 16];
//! let plaintext = [0u8; 16];
//! let ciphertext = hex!("BA6933819299C71699A99F08F678178B");
//!
//! let cipher = Noekeon::new(GenericArray::from_slice(&key));
//!
//! let mut block = GenericArray::clone_from_slice(&plaintext);
//! cipher.encrypt_block(&mut block);
//! assert_eq!(&ciphertext, block.as_slice());
//!
//! cipher.decrypt_block(&mut block);
//! assert_eq!(&plaintext, block.as_slice());
//! ```
//!
//! [1]: https://web.archive.org/web/2019/http://gro.noekeon.org/
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;

use cipher::{
    consts::U16,
    AlgorithmName, BlockCipher, KeyInit, KeySizeUser,
};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Block over which the Noekeon cipher operates.
pub type Block = cipher::Block<Noekeon>;
/// The Noekeon cipher initialization key.
pub type Key = cipher::Key<Noekeon>;

type State = [u32; 4];

const NULL_VECTOR: State = [0; 4];

/// Round constants; `RC[16]` is used by the final output transformation.
const RC: [u32; 17] = [
    0x80, 0x1B, 0x36, 0x6C, 0xD8, 0xAB, 0x4D, 0x9A, 0x2F, 0x5E, 0xBC, 0x63, 0xC6, 0x97, 0x35,
    0x6A, 0xD4,
];

/// Linear mixing layer. The key is added between the two half-steps.
#[inline(always)]
fn theta(a: &mut State, k: &State) {
    let mut t = a[0] ^ a[2];
    t ^= t.rotate_left(8) ^ t.rotate_right(8);
    a[1] ^= t;
    a[3] ^= t;

    for (a, k) in a.iter_mut().zip(k.iter()) {
        *a ^= k;
    }

    let mut t = a[1] ^ a[3];
    t ^= t.rotate_left(8) ^ t.rotate_right(8);
    a[0] ^= t;
    a[2] ^= t;
}

/// Nonlinear layer: 32 parallel 4-bit S-boxes in bitsliced form.
#[inline(always)]
fn gamma(a: &mut State) {
    a[1] ^= !a[3] & !a[2];
    a[0] ^= a[2] & a[1];

    a.swap(0, 3);
    a[2] ^= a[0] ^ a[1] ^ a[3];

    a[1] ^= !a[3] & !a[2];
    a[0] ^= a[2] & a[1];
}

#[inline(always)]
fn pi1(a: &mut State) {
    a[1] = a[1].rotate_left(1);
    a[2] = a[2].rotate_left(5);
    a[3] = a[3].rotate_left(2);
}

#[inline(always)]
fn pi2(a: &mut State) {
    a[1] = a[1].rotate_right(1);
    a[2] = a[2].rotate_right(5);
    a[3] = a[3].rotate_right(2);
}

#[inline(always)]
fn shift_gamma_unshift(a: &mut State) {
    pi1(a);
    gamma(a);
    pi2(a);
}

/// Noekeon block cipher instance.
///
/// Holds separate working keys for the two directions: decryption runs
/// theta with `theta(working key)` so that the inverse rounds can reuse
/// the forward round structure.
#[derive(Clone)]
pub struct Noekeon {
    ek: State,
    dk: State,
}

impl Noekeon {
    /// Number of full rounds (plus one output transformation).
    pub const ROUNDS: usize = 16;
    /// Size of the internal words in bits.
    pub const WORD_BITS: usize = 32;
    /// Size of a block in bits.
    pub const BLOCK_BITS: usize = 128;
    /// Size of the key in bits.
    pub const KEY_BITS: usize = 128;
}

impl KeySizeUser for Noekeon {
    type KeySize = U16;
}

impl KeyInit for Noekeon {
    fn new(key: &Key) -> Self {
        let mut a = Zeroizing::new(load(key));

        for &rc in &RC[..16] {
            a[0] ^= rc;
            theta(&mut a, &NULL_VECTOR);
            shift_gamma_unshift(&mut a);
        }
        a[0] ^= RC[16];

        let dk = *a;
        theta(&mut a, &NULL_VECTOR);
        let ek = *a;

        Self { ek, dk }
    }
}

impl BlockCipher for Noekeon {}

cipher::impl_simple_block_encdec!(
    Noekeon, U16, cipher, block,
    encrypt: {
        let mut a = load(block.get_in());
        for &rc in &RC[..16] {
            a[0] ^= rc;
            theta(&mut a, &cipher.ek);
            shift_gamma_unshift(&mut a);
        }
        a[0] ^= RC[16];
        theta(&mut a, &cipher.ek);
        store(&a, block.get_out());
    }
    decrypt: {
        let mut a = load(block.get_in());
        for &rc in RC[1..].iter().rev() {
            theta(&mut a, &cipher.dk);
            a[0] ^= rc;
            shift_gamma_unshift(&mut a);
        }
        theta(&mut a, &cipher.dk);
        a[0] ^= RC[0];
        store(&a, block.get_out());
    }
);

impl Drop for Noekeon {
    fn drop(&mut self) {
        self.ek.zeroize();
        self.dk.zeroize();
    }
}

impl ZeroizeOnDrop for Noekeon {}

impl fmt::Debug for Noekeon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Noekeon { .. }")
    }
}

impl AlgorithmName for Noekeon {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Noekeon")
    }
}

#[inline(always)]
fn load(b: &[u8]) -> State {
    let mut a = [0u32; 4];
    for (chunk, v) in b.chunks_exact(4).zip(a.iter_mut()) {
        *v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    a
}

#[inline(always)]
fn store(a: &State, b: &mut [u8]) {
    for (chunk, v) in b.chunks_exact_mut(4).zip(a.iter()) {
        chunk.copy_from_slice(&v.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::ManuallyDrop;
    use hex_literal::hex;

    #[test]
    fn null_key_working_keys() {
        let c = Noekeon::new(&Key::default());
        // the encryption key is the null key encrypted under itself
        assert_eq!(c.ek, [0xB165_6851, 0x699E_29FA, 0x24B7_0148, 0x503D_2DFC]);
        assert_eq!(c.dk, [0x2DFB_C96A, 0x37B0_8B1F, 0xB829_A073, 0x0E13_8F19]);
    }

    #[test]
    fn sequential_key_working_keys() {
        let c = Noekeon::new(&hex!("000102030405060708090A0B0C0D0E0F").into());
        assert_eq!(c.ek, [0x4761_2542, 0x9F35_846C, 0x09BA_4486, 0x9DC2_D1ED]);
        assert_eq!(c.dk, [0x33C1_0694, 0xCEC1_FA87, 0x7D1A_6750, 0xCC36_AF06]);
    }

    #[test]
    fn decryption_key_is_theta_of_encryption_key() {
        let c = Noekeon::new(&hex!("DEADBEEF0123456789ABCDEFFEDCBA98").into());
        let mut k = c.ek;
        theta(&mut k, &NULL_VECTOR);
        assert_eq!(k, c.dk);
    }

    #[test]
    fn schedule_is_deterministic() {
        let key = Key::from([0x3Cu8; 16]);
        let (a, b) = (Noekeon::new(&key), Noekeon::new(&key));
        assert_eq!((a.ek, a.dk), (b.ek, b.dk));
    }

    #[test]
    #[allow(unsafe_code)]
    fn schedule_is_wiped_on_drop() {
        let mut c = ManuallyDrop::new(Noekeon::new(&Key::from([0x11u8; 16])));
        unsafe { ManuallyDrop::drop(&mut c) };
        assert_eq!(c.ek, [0; 4]);
        assert_eq!(c.dk, [0; 4]);
    }
}
