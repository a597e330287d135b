#![cfg_attr(rustfmt, rustfmt_skip)]

use cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use ctr::cipher::{KeyIvInit, StreamCipher, StreamCipherSeek};
use hex_literal::hex;
use sm4::{Block, Sm4};

const KEY: [u8; 16] = hex!("0123456789ABCDEFFEDCBA9876543210");

/// GB/T 32907-2016 appendix A, example 1
#[test]
fn sm4_example_1() {
    let cipher = Sm4::new(&KEY.into());

    let mut block = GenericArray::clone_from_slice(&KEY);
    cipher.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("681EDF34D206965E86B3E94F536E4246"));

    cipher.decrypt_block(&mut block);
    assert_eq!(block.as_slice(), &KEY);
}

/// GB/T 32907-2016 appendix A, example 2: one million chained encryptions
#[test]
#[ignore]
fn sm4_example_2() {
    let cipher = Sm4::new(&KEY.into());

    let mut block = GenericArray::clone_from_slice(&KEY);
    for _ in 0..1_000_000 {
        cipher.encrypt_block(&mut block);
    }
    assert_eq!(block.as_slice(), &hex!("595298C7C6FD271F0402F804C33D3F66"));

    for _ in 0..1_000_000 {
        cipher.decrypt_block(&mut block);
    }
    assert_eq!(block.as_slice(), &KEY);
}

#[test]
fn sm4_blocks_roundtrip() {
    let cipher = Sm4::new(&KEY.into());

    let mut blocks = [Block::default(); 41];
    for (i, block) in blocks.iter_mut().enumerate() {
        block.iter_mut().enumerate().for_each(|(j, b)| {
            *b = (3 * i + 5 * j) as u8;
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

type Sm4Ctr = ctr::Ctr128BE<Sm4>;

const IV: [u8; 16] = hex!("000102030405060708090A0B0C0D0EFF");

const CTR_CIPHERTEXT: [u8; 56] = hex!("
    47080394E1CBE2B009832566C4B2B222
    19547441DDFD54ACBA10DBC630BB25E7
    B8A93D1562781C2C9423D135A26E5FEE
    A83315B1BD1E857A
");

fn ctr_plaintext() -> [u8; 56] {
    let mut pt = [0u8; 56];
    pt.iter_mut().enumerate().for_each(|(i, b)| *b = i as u8);
    pt
}

#[test]
fn sm4_ctr_keystream() {
    let mut buf = ctr_plaintext();
    let mut cipher = Sm4Ctr::new(&KEY.into(), &IV.into());
    cipher.apply_keystream(&mut buf);
    assert_eq!(buf[..], CTR_CIPHERTEXT[..]);

    let mut cipher = Sm4Ctr::new(&KEY.into(), &IV.into());
    cipher.apply_keystream(&mut buf);
    assert_eq!(buf, ctr_plaintext());
}

#[test]
fn sm4_ctr_seek() {
    for &pos in &[1usize, 15, 16, 17, 40] {
        let mut buf = ctr_plaintext();
        let mut cipher = Sm4Ctr::new(&KEY.into(), &IV.into());
        cipher.seek(pos as u64);
        cipher.apply_keystream(&mut buf[pos..]);
        assert_eq!(buf[pos..], CTR_CIPHERTEXT[pos..], "position {}", pos);
    }
}

#[test]
fn sm4_key_bit_avalanche() {
    let plaintext = GenericArray::clone_from_slice(&KEY);
    let mut reference = plaintext;
    Sm4::new(&KEY.into()).encrypt_block(&mut reference);

    for bit in 0..128 {
        let mut key = KEY;
        key[bit / 8] ^= 1 << (bit % 8);
        let mut block = plaintext;
        Sm4::new(&key.into()).encrypt_block(&mut block);
        assert_ne!(block, reference, "key bit {}", bit);
    }
}

#[test]
fn sm4_rejects_wrong_key_length() {
    assert!(Sm4::new_from_slice(&[0u8; 15]).is_err());
    assert!(Sm4::new_from_slice(&[0u8; 32]).is_err());
    assert!(Sm4::new_from_slice(&KEY).is_ok());
}
