#![cfg_attr(rustfmt, rustfmt_skip)]

use cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use hex_literal::hex;
use noekeon::{Block, Noekeon};

/// Indirect-key reference vectors from the Noekeon submission
const VECTORS: &[([u8; 16], [u8; 16], [u8; 16])] = &[
    (
        hex!("00000000000000000000000000000000"),
        hex!("00000000000000000000000000000000"),
        hex!("BA6933819299C71699A99F08F678178B"),
    ),
    (
        hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"),
        hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"),
        hex!("52F88A7B283C1F7BDF7B6FAA5011C7D8"),
    ),
    (
        hex!("B1656851699E29FA24B70148503D2DFC"),
        hex!("2A78421B87C7D0924F26113F1D1349B2"),
        hex!("E5EE77A20D35A1D734A77640F008B2D9"),
    ),
    (
        hex!("000102030405060708090A0B0C0D0E0F"),
        hex!("00112233445566778899AABBCCDDEEFF"),
        hex!("669D6FF7D444AE8034893C00F023C428"),
    ),
];

#[test]
fn noekeon_vectors() {
    for (key, plaintext, ciphertext) in VECTORS {
        let cipher = Noekeon::new(GenericArray::from_slice(key));

        let mut block = GenericArray::clone_from_slice(plaintext);
        cipher.encrypt_block(&mut block);
        assert_eq!(&ciphertext[..], block.as_slice());

        cipher.decrypt_block(&mut block);
        assert_eq!(&plaintext[..], block.as_slice());
    }
}

#[test]
fn noekeon_clone_matches_original() {
    let cipher = Noekeon::new_from_slice(&hex!("000102030405060708090A0B0C0D0E0F")).unwrap();
    let copy = cipher.clone();
    drop(cipher);

    let mut block = GenericArray::clone_from_slice(&hex!("00112233445566778899AABBCCDDEEFF"));
    copy.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("669D6FF7D444AE8034893C00F023C428"));
}

#[test]
fn noekeon_blocks_roundtrip() {
    let cipher = Noekeon::new_from_slice(&hex!("B1656851699E29FA24B70148503D2DFC")).unwrap();

    let mut blocks = [Block::default(); 33];
    for (i, block) in blocks.iter_mut().enumerate() {
        block.iter_mut().enumerate().for_each(|(j, b)| {
            *b = (i * 16 + j) as u8;
        });
    }
    let blocks_cpy = blocks;
    let mut blocks2 = blocks;

    cipher.encrypt_blocks(&mut blocks);
    assert!(blocks[..] != blocks_cpy[..]);
    for block in blocks2.iter_mut() {
        cipher.encrypt_block(block);
    }
    assert_eq!(blocks[..], blocks2[..]);

    cipher.decrypt_blocks(&mut blocks);
    assert_eq!(blocks[..], blocks_cpy[..]);
}

#[test]
fn noekeon_key_bit_avalanche() {
    let key = hex!("000102030405060708090A0B0C0D0E0F");
    let plaintext = GenericArray::clone_from_slice(&hex!("00112233445566778899AABBCCDDEEFF"));

    let mut reference = plaintext;
    Noekeon::new(GenericArray::from_slice(&key)).encrypt_block(&mut reference);

    for bit in 0..128 {
        let mut flipped = key;
        flipped[bit / 8] ^= 1 << (bit % 8);
        let mut block = plaintext;
        Noekeon::new(GenericArray::from_slice(&flipped)).encrypt_block(&mut block);
        assert_ne!(block, reference, "key bit {}", bit);
    }
}

#[test]
fn noekeon_rejects_wrong_key_length() {
    assert!(Noekeon::new_from_slice(&[0u8; 15]).is_err());
    assert!(Noekeon::new_from_slice(&[0u8; 24]).is_err());
    assert!(Noekeon::new_from_slice(&[0u8; 16]).is_ok());
}
