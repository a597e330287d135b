//! Pure Rust implementation of the [Serpent][1] block cipher.
//!
//! The S-boxes are evaluated as bitsliced boolean selections over the four
//! state words, so no table is ever indexed by secret data.
//!
//! # Examples
//! ```
//! use serpent::Serpent;
//! use serpent::cipher::{
//!     generic_array::GenericArray,
//!     BlockEncrypt, BlockDecrypt, KeyInit,
//! };
//! use hex_literal::hex;
//!
//! let key = hex!("80000000000000000000000000000000");
//! let plaintext = [0u8; 16];
//! let ciphertext = hex!("264E5481EFF42A4606ABDA06C0BFDA3D");
//!
//! let cipher = Serpent::new_from_slice(&key).unwrap();
//!
//! let mut block = GenericArray::clone_from_slice(&plaintext);
//! cipher.encrypt_block(&mut block);
//! assert_eq!(&ciphertext, block.as_slice());
//!
//! cipher.decrypt_block(&mut block);
//! assert_eq!(&plaintext, block.as_slice());
//! ```
//!
//! [1]: https://en.wikipedia.org/wiki/Serpent_(cipher)
#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;

use byteorder::{ByteOrder, LittleEndian};
use cipher::{
    consts::{U16, U32},
    AlgorithmName, BlockCipher, InvalidLength, KeyInit, KeySizeUser,
};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

mod consts;

use consts::{PHI, ROUNDS, S, S_INV};

/// Block over which the Serpent cipher operates.
pub type Block = cipher::Block<Serpent>;
/// Serpent key of the largest (256-bit) size.
pub type Key = cipher::Key<Serpent>;

type Words = [u32; 4];
type Subkeys = [Words; ROUNDS + 1];

/// Serpent block cipher.
#[derive(Clone)]
pub struct Serpent {
    k: Subkeys,
}

impl Serpent {
    /// Number of rounds.
    pub const ROUNDS: usize = ROUNDS;
    /// Size of the internal words in bits.
    pub const WORD_BITS: usize = 32;
    /// Size of a block in bits.
    pub const BLOCK_BITS: usize = 128;
    /// Accepted key sizes in bits.
    pub const VALID_KEY_BITS: [usize; 3] = [128, 192, 256];
}

/// Apply a 4-bit S-box to 32 nibbles in parallel; bit `i` of `x[j]` is
/// input bit `j` of nibble `i`.
fn apply_sbox(table: &[u8; 16], x: Words) -> Words {
    let mut y = [0u32; 4];
    for (v, &out) in table.iter().enumerate() {
        let mut sel = u32::MAX;
        for (j, &w) in x.iter().enumerate() {
            sel &= if (v >> j) & 1 == 1 { w } else { !w };
        }
        for (k, yk) in y.iter_mut().enumerate() {
            if (out >> k) & 1 == 1 {
                *yk |= sel;
            }
        }
    }
    y
}

fn linear_transform(x: Words) -> Words {
    let [mut x0, mut x1, mut x2, mut x3] = x;
    x0 = x0.rotate_left(13);
    x2 = x2.rotate_left(3);
    x1 ^= x0 ^ x2;
    x3 ^= x2 ^ (x0 << 3);
    x1 = x1.rotate_left(1);
    x3 = x3.rotate_left(7);
    x0 ^= x1 ^ x3;
    x2 ^= x3 ^ (x1 << 7);
    x0 = x0.rotate_left(5);
    x2 = x2.rotate_left(22);
    [x0, x1, x2, x3]
}

fn linear_transform_inv(x: Words) -> Words {
    let [mut x0, mut x1, mut x2, mut x3] = x;
    x2 = x2.rotate_right(22);
    x0 = x0.rotate_right(5);
    x2 ^= x3 ^ (x1 << 7);
    x0 ^= x1 ^ x3;
    x3 = x3.rotate_right(7);
    x1 = x1.rotate_right(1);
    x3 ^= x2 ^ (x0 << 3);
    x1 ^= x0 ^ x2;
    x2 = x2.rotate_right(3);
    x0 = x0.rotate_right(13);
    [x0, x1, x2, x3]
}

#[inline(always)]
fn xor(b: &mut Words, k: &Words) {
    for (b, k) in b.iter_mut().zip(k.iter()) {
        *b ^= k;
    }
}

/// Expand a 16, 24 or 32 byte key into the 33 round subkeys.
fn expand_key(source: &[u8]) -> Subkeys {
    let mut w = Zeroizing::new([0u32; 140]);
    LittleEndian::read_u32_into(source, &mut w[..source.len() / 4]);
    if source.len() < 32 {
        w[source.len() / 4] = 1;
    }

    for i in 8..140 {
        w[i] = (w[i - 8] ^ w[i - 5] ^ w[i - 3] ^ w[i - 1] ^ PHI ^ (i as u32 - 8)).rotate_left(11);
    }

    let mut k = [[0u32; 4]; ROUNDS + 1];
    for (j, (sk, chunk)) in k.iter_mut().zip(w[8..].chunks_exact(4)).enumerate() {
        let box_idx = (11 - j % 8) % 8;
        *sk = apply_sbox(&S[box_idx], [chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    k
}

impl KeySizeUser for Serpent {
    type KeySize = U32;
}

impl KeyInit for Serpent {
    fn new(key: &Key) -> Self {
        Self { k: expand_key(key) }
    }

    fn new_from_slice(key: &[u8]) -> Result<Self, InvalidLength> {
        match key.len() {
            16 | 24 | 32 => Ok(Self { k: expand_key(key) }),
            _ => Err(InvalidLength),
        }
    }
}

impl BlockCipher for Serpent {}

cipher::impl_simple_block_encdec!(
    Serpent, U16, cipher, block,
    encrypt: {
        let mut b = [0u32; 4];
        LittleEndian::read_u32_into(block.get_in(), &mut b);
        for r in 0..ROUNDS {
            xor(&mut b, &cipher.k[r]);
            b = apply_sbox(&S[r % 8], b);
            if r == ROUNDS - 1 {
                xor(&mut b, &cipher.k[ROUNDS]);
            } else {
                b = linear_transform(b);
            }
        }
        LittleEndian::write_u32_into(&b, block.get_out());
    }
    decrypt: {
        let mut b = [0u32; 4];
        LittleEndian::read_u32_into(block.get_in(), &mut b);
        xor(&mut b, &cipher.k[ROUNDS]);
        for r in (0..ROUNDS).rev() {
            if r != ROUNDS - 1 {
                b = linear_transform_inv(b);
            }
            b = apply_sbox(&S_INV[r % 8], b);
            xor(&mut b, &cipher.k[r]);
        }
        LittleEndian::write_u32_into(&b, block.get_out());
    }
);

impl Drop for Serpent {
    fn drop(&mut self) {
        self.k.zeroize();
    }
}

impl ZeroizeOnDrop for Serpent {}

opaque_debug::implement!(Serpent);

impl AlgorithmName for Serpent {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Serpent")
    }
}
