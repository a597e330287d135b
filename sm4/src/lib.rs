//! Pure Rust implementation of the [SM4][1] block cipher (GB/T 32907-2016).
//!
//! # Examples
//! ```
//! use sm4::Sm4;
//! use sm4::cipher::{
//!     generic_array::GenericArray,
//!     BlockEncrypt, BlockDecrypt, KeyInit,
//! };
//! use hex_literal::hex;
//!
//! let key = hex!("0123456789ABCDEFFEDCBA9876543210");
//! let plaintext = key;
//! let ciphertext = hex!("681EDF34D206965E86B3E94F536E4246");
//!
//! let cipher = Sm4::new(GenericArray::from_slice(&key));
//!
//! let mut block = GenericArray::clone_from_slice(&plaintext);
//! cipher.encrypt_block(&mut block);
//! assert_eq!(&ciphertext, block.as_slice());
//!
//! cipher.decrypt_block(&mut block);
//! assert_eq!(&plaintext, block.as_slice());
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/SM4_(cipher)
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;

use cipher::{consts::U16, AlgorithmName, BlockCipher, KeyInit, KeySizeUser};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

mod consts;

use consts::{CK, FK, SBOX, TBL};

/// Block over which the SM4 cipher operates.
pub type Block = cipher::Block<Sm4>;
/// The SM4 cipher initialization key.
pub type Key = cipher::Key<Sm4>;

#[inline(always)]
fn tau(a: u32) -> u32 {
    let b = a.to_be_bytes();
    u32::from_be_bytes([
        SBOX[b[0] as usize],
        SBOX[b[1] as usize],
        SBOX[b[2] as usize],
        SBOX[b[3] as usize],
    ])
}

#[inline(always)]
fn t_slow(x: u32) -> u32 {
    let b = tau(x);
    b ^ b.rotate_left(2) ^ b.rotate_left(10) ^ b.rotate_left(18) ^ b.rotate_left(24)
}

/// Table-driven form of [`t_slow`].
#[inline(always)]
fn t(x: u32) -> u32 {
    TBL[(x >> 24) as usize].rotate_left(24)
        ^ TBL[((x >> 16) & 0xff) as usize].rotate_left(16)
        ^ TBL[((x >> 8) & 0xff) as usize].rotate_left(8)
        ^ TBL[(x & 0xff) as usize]
}

/// Key-schedule variant of the round transform.
#[inline(always)]
fn t_prime(x: u32) -> u32 {
    let b = tau(x);
    b ^ b.rotate_left(13) ^ b.rotate_left(23)
}

/// Four rounds starting at round key `$r`.
macro_rules! sm4_rounds {
    ($t:ident, $x:ident, $rk:ident, $r:expr) => {
        $x[0] ^= $t($x[1] ^ $x[2] ^ $x[3] ^ $rk($r));
        $x[1] ^= $t($x[2] ^ $x[3] ^ $x[0] ^ $rk($r + 1));
        $x[2] ^= $t($x[3] ^ $x[0] ^ $x[1] ^ $rk($r + 2));
        $x[3] ^= $t($x[0] ^ $x[1] ^ $x[2] ^ $rk($r + 3));
    };
}

#[inline(always)]
fn crypt(x: &mut [u32; 4], rk: impl Fn(usize) -> u32) {
    sm4_rounds!(t_slow, x, rk, 0);
    sm4_rounds!(t, x, rk, 4);
    sm4_rounds!(t, x, rk, 8);
    sm4_rounds!(t, x, rk, 12);
    sm4_rounds!(t, x, rk, 16);
    sm4_rounds!(t, x, rk, 20);
    sm4_rounds!(t, x, rk, 24);
    sm4_rounds!(t_slow, x, rk, 28);
    x.reverse();
}

/// SM4 block cipher.
#[derive(Clone)]
pub struct Sm4 {
    rk: [u32; 32],
}

impl Sm4 {
    /// Number of rounds.
    pub const ROUNDS: usize = 32;
    /// Size of the internal words in bits.
    pub const WORD_BITS: usize = 32;
    /// Size of a block in bits.
    pub const BLOCK_BITS: usize = 128;
    /// Size of the key in bits.
    pub const KEY_BITS: usize = 128;
}

impl KeySizeUser for Sm4 {
    type KeySize = U16;
}

impl KeyInit for Sm4 {
    fn new(key: &Key) -> Self {
        let mut k = Zeroizing::new(load(key));
        for (w, fk) in k.iter_mut().zip(FK.iter()) {
            *w ^= fk;
        }

        let mut rk = [0u32; 32];
        for (i, (slot, ck)) in rk.iter_mut().zip(CK.iter()).enumerate() {
            let next = k[i % 4] ^ t_prime(k[(i + 1) % 4] ^ k[(i + 2) % 4] ^ k[(i + 3) % 4] ^ ck);
            k[i % 4] = next;
            *slot = next;
        }
        Self { rk }
    }
}

impl BlockCipher for Sm4 {}

cipher::impl_simple_block_encdec!(
    Sm4, U16, cipher, block,
    encrypt: {
        let mut x = load(block.get_in());
        crypt(&mut x, |i| cipher.rk[i]);
        store(&x, block.get_out());
    }
    decrypt: {
        let mut x = load(block.get_in());
        crypt(&mut x, |i| cipher.rk[31 - i]);
        store(&x, block.get_out());
    }
);

impl Drop for Sm4 {
    fn drop(&mut self) {
        self.rk.zeroize();
    }
}

impl ZeroizeOnDrop for Sm4 {}

impl fmt::Debug for Sm4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sm4 { .. }")
    }
}

impl AlgorithmName for Sm4 {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SM4")
    }
}

fn load(b: &[u8]) -> [u32; 4] {
    let mut x = [0u32; 4];
    for (chunk, v) in b.chunks_exact(4).zip(x.iter_mut()) {
        *v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    x
}

fn store(x: &[u32; 4], b: &mut [u8]) {
    for (chunk, v) in b.chunks_exact_mut(4).zip(x.iter()) {
        chunk.copy_from_slice(&v.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::ManuallyDrop;
    use hex_literal::hex;

    #[test]
    fn table_round_matches_direct_round() {
        for i in 0..=255u32 {
            for &x in &[i, i << 8, i << 16, i << 24, i * 0x0101_0101, i.wrapping_mul(0x9E37_79B9)] {
                assert_eq!(t(x), t_slow(x), "{:08x}", x);
            }
        }
    }

    #[test]
    fn round_keys() {
        let c = Sm4::new(&hex!("0123456789ABCDEFFEDCBA9876543210").into());
        assert_eq!(c.rk[..4], [0xF121_86F9, 0x4166_2B61, 0x5A6A_B19A, 0x7BA9_2077]);
        assert_eq!(c.rk[30..], [0x01CF_72E5, 0x9124_A012]);
    }

    #[test]
    #[allow(unsafe_code)]
    fn schedule_is_wiped_on_drop() {
        let mut c = ManuallyDrop::new(Sm4::new(&Key::from([0x77u8; 16])));
        unsafe { ManuallyDrop::drop(&mut c) };
        assert_eq!(c.rk, [0; 32]);
    }
}
