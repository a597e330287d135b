#![cfg_attr(rustfmt, rustfmt_skip)]

use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use hex_literal::hex;
use twofish::{Block, Twofish};

fn check(key: &[u8], plaintext: &[u8; 16], ciphertext: &[u8; 16]) {
    let cipher = Twofish::new_from_slice(key).unwrap();

    let mut block = GenericArray::clone_from_slice(plaintext);
    cipher.encrypt_block(&mut block);
    assert_eq!(&ciphertext[..], block.as_slice(), "key {:02x?}", key);

    cipher.decrypt_block(&mut block);
    assert_eq!(&plaintext[..], block.as_slice(), "key {:02x?}", key);
}

/// Vectors from appendix A.1 of the Twofish paper
#[test]
fn twofish_paper_vectors() {
    check(&[0; 16], &[0; 16], &hex!("9F589F5CF6122C32B6BFEC2F2AE8C35A"));
    check(
        &hex!("0123456789ABCDEFFEDCBA98765432100011223344556677"),
        &[0; 16],
        &hex!("CFD1D2E5A9BE9CDF501F13B892BD2248"),
    );
    check(
        &hex!("0123456789ABCDEFFEDCBA987654321000112233445566778899AABBCCDDEEFF"),
        &[0; 16],
        &hex!("37527BE0052334B89F0CFCCAE87CFA20"),
    );
}

/// ECB_TBL.TXT, 128-bit keys: each step keys with the previous plaintext
/// and encrypts the previous ciphertext
#[test]
fn twofish_ecb_table_128() {
    let mut key = [0u8; 16];
    let mut pt = [0u8; 16];
    for i in 1..=49 {
        let cipher = Twofish::new_from_slice(&key).unwrap();
        let mut block = GenericArray::clone_from_slice(&pt);
        cipher.encrypt_block(&mut block);
        match i {
            2 => assert_eq!(block.as_slice(), &hex!("D491DB16E7B1C39E86CB086B789F5419")),
            3 => assert_eq!(block.as_slice(), &hex!("019F9809DE1711858FAAC3A3BA20FBC3")),
            _ => {}
        }
        key = pt;
        pt.copy_from_slice(&block);
    }
    assert_eq!(pt, hex!("5D9D4EEFFA9151575524F115815A12E0"));
}

#[test]
fn twofish_cbc() {
    type Enc = cbc::Encryptor<Twofish>;
    type Dec = cbc::Decryptor<Twofish>;

    let key = hex!("000102030405060708090A0B0C0D0E0F");
    let iv = hex!("0F0E0D0C0B0A09080706050403020100");
    let expected = hex!("
        46231581DB1B1C4ED24EBBE393B9A7F6
        63F9D45B8DCEB764AB0D39E00772D222
        F2C5FAA4F2C2F3166C6E3E0C53581470
        E879230B4E54E2822F82EB1450A12490
    ");

    let mut blocks = [Block::default(); 4];
    for (i, block) in blocks.iter_mut().enumerate() {
        block.iter_mut().enumerate().for_each(|(j, b)| {
            *b = (7 * (16 * i + j)) as u8;
        });
    }
    let blocks_cpy = blocks;

    Enc::new_from_slices(&key, &iv).unwrap().encrypt_blocks_mut(&mut blocks);
    for (block, chunk) in blocks.iter().zip(expected.chunks(16)) {
        assert_eq!(block.as_slice(), chunk);
    }

    Dec::new_from_slices(&key, &iv).unwrap().decrypt_blocks_mut(&mut blocks);
    assert_eq!(blocks, blocks_cpy);
}

#[test]
fn twofish_blocks_roundtrip() {
    for key_len in &[16, 24, 32] {
        let key: Vec<u8> = (0..*key_len).map(|i| (255 - i) as u8).collect();
        let cipher = Twofish::new_from_slice(&key).unwrap();

        let mut blocks = [Block::default(); 37];
        for (i, block) in blocks.iter_mut().enumerate() {
            block.iter_mut().enumerate().for_each(|(j, b)| {
                *b = (i * 13 + j) as u8;
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
}

#[test]
fn twofish_key_bit_avalanche() {
    let key = hex!("0123456789ABCDEFFEDCBA9876543210");
    let plaintext = Block::default();

    let mut reference = plaintext;
    Twofish::new_from_slice(&key).unwrap().encrypt_block(&mut reference);

    for bit in 0..128 {
        let mut flipped = key;
        flipped[bit / 8] ^= 1 << (bit % 8);
        let mut block = plaintext;
        Twofish::new_from_slice(&flipped).unwrap().encrypt_block(&mut block);
        assert_ne!(block, reference, "key bit {}", bit);
    }
}

#[test]
fn twofish_rejects_wrong_key_length() {
    for len in &[0, 8, 15, 17, 20, 31, 33] {
        assert!(Twofish::new_from_slice(&vec![0u8; *len]).is_err(), "length {}", len);
    }
}
