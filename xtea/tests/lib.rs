#![cfg_attr(rustfmt, rustfmt_skip)]

use cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use hex_literal::hex;
use xtea::{Block, Xtea};

/// Reference vectors for 32-cycle XTEA with big-endian word loading
const VECTORS: &[([u8; 16], [u8; 8], [u8; 8])] = &[
    (hex!("000102030405060708090A0B0C0D0E0F"), hex!("4142434445464748"), hex!("497DF3D072612CB5")),
    (hex!("000102030405060708090A0B0C0D0E0F"), hex!("4141414141414141"), hex!("E78F2D13744341D8")),
    (hex!("00000000000000000000000000000000"), hex!("4142434445464748"), hex!("A0390589F8B8EFA5")),
    (hex!("00000000000000000000000000000000"), hex!("4141414141414141"), hex!("ED23375A821A8C2D")),
    (hex!("00112233445566778899AABBCCDDEEFF"), hex!("4142434445464748"), hex!("2FF0CED43B13C244")),
];

#[test]
fn xtea_vectors() {
    for (key, plaintext, ciphertext) in VECTORS {
        let cipher = Xtea::new(GenericArray::from_slice(key));

        let mut block = GenericArray::clone_from_slice(plaintext);
        cipher.encrypt_block(&mut block);
        assert_eq!(&ciphertext[..], block.as_slice());

        cipher.decrypt_block(&mut block);
        assert_eq!(&plaintext[..], block.as_slice());
    }
}

#[test]
fn xtea_blocks_roundtrip() {
    let cipher = Xtea::new_from_slice(&hex!("00112233445566778899AABBCCDDEEFF")).unwrap();

    let mut blocks = [Block::default(); 67];
    for (i, block) in blocks.iter_mut().enumerate() {
        block.iter_mut().enumerate().for_each(|(j, b)| {
            *b = (7 * i + j) as u8;
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
fn xtea_key_bit_avalanche() {
    let key = hex!("00112233445566778899AABBCCDDEEFF");
    let plaintext = GenericArray::clone_from_slice(&hex!("4142434445464748"));

    let mut reference = plaintext;
    Xtea::new(GenericArray::from_slice(&key)).encrypt_block(&mut reference);

    for bit in 0..128 {
        let mut flipped = key;
        flipped[bit / 8] ^= 1 << (bit % 8);
        let mut block = plaintext;
        Xtea::new(GenericArray::from_slice(&flipped)).encrypt_block(&mut block);
        assert_ne!(block, reference, "flipping key bit {} left the ciphertext unchanged", bit);
    }
}

#[test]
fn xtea_rejects_wrong_key_length() {
    assert!(Xtea::new_from_slice(&[0u8; 15]).is_err());
    assert!(Xtea::new_from_slice(&[0u8; 17]).is_err());
    assert!(Xtea::new_from_slice(&[0u8; 16]).is_ok());
}
