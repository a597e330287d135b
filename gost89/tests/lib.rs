#![cfg_attr(rustfmt, rustfmt_skip)]

use cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use gost89::{Block, Gost89, Gost89Cbr, Gost89CryptoPro, Params, Sbox};
use hex_literal::hex;

const KEY: [u8; 32] = hex!("
    BE5EC2006CFF9DCF52354959F1FF0CBF
    E95061B5A648C10387069C25997C0672
");

fn check<S: Sbox>(key: &[u8; 32], plaintext: &[u8; 8], ciphertext: &[u8; 8]) {
    let cipher = Gost89::<S>::new(GenericArray::from_slice(key));

    let mut block = GenericArray::clone_from_slice(plaintext);
    cipher.encrypt_block(&mut block);
    assert_eq!(&ciphertext[..], block.as_slice(), "{}", S::NAME);

    cipher.decrypt_block(&mut block);
    assert_eq!(&plaintext[..], block.as_slice(), "{}", S::NAME);
}

#[test]
fn gost89_cbr() {
    check::<gost89::Cbr>(&KEY, &hex!("0DF82802B741A292"), &hex!("07F9027DF7F7DF89"));
    check::<gost89::Cbr>(&[0; 32], &[0; 8], &hex!("C9FDC2A6E20B6112"));
    check::<gost89::Cbr>(
        &hex!("000102030405060708090A0B0C0D0E0F101112131415161718191A1B1C1D1E1F"),
        &hex!("0123456789ABCDEF"),
        &hex!("619A8ED3209C803A"),
    );
}

#[test]
fn gost89_cryptopro() {
    check::<gost89::CryptoPro>(&KEY, &hex!("0DF82802B741A292"), &hex!("A53D86948AD264E5"));
    check::<gost89::CryptoPro>(&[0; 32], &[0; 8], &hex!("8D99785F93603FD9"));
    check::<gost89::CryptoPro>(
        &hex!("000102030405060708090A0B0C0D0E0F101112131415161718191A1B1C1D1E1F"),
        &hex!("0123456789ABCDEF"),
        &hex!("8BD0D8AF9EF7EE21"),
    );
}

/// A caller-supplied parameter set plugs in without touching the rounds
enum Identity {}

impl Sbox for Identity {
    // every 4-bit S-box maps x to x
    const PARAMS: Params = {
        let mut p = [0u8; 64];
        let mut i = 0;
        while i < 64 {
            let v = (i / 4) as u8;
            p[i] = (v << 4) | v;
            i += 1;
        }
        p
    };
    const NAME: &'static str = "Identity";
}

#[test]
fn gost89_custom_sbox() {
    for (i, row) in Identity::EXP_SBOX.iter().enumerate() {
        let rot = [11, 19, 27, 3][i];
        for (x, &v) in row.iter().enumerate() {
            assert_eq!(v, (x as u32).rotate_left(rot));
        }
    }

    let cipher = Gost89::<Identity>::new_from_slice(&KEY).unwrap();
    let mut block = GenericArray::clone_from_slice(&hex!("0123456789ABCDEF"));
    cipher.encrypt_block(&mut block);
    assert_ne!(block.as_slice(), &hex!("0123456789ABCDEF"));
    cipher.decrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("0123456789ABCDEF"));
}

#[test]
fn gost89_parameter_sets_differ() {
    let plaintext = hex!("0DF82802B741A292");
    let mut a = GenericArray::clone_from_slice(&plaintext);
    let mut b = GenericArray::clone_from_slice(&plaintext);
    Gost89Cbr::new(&KEY.into()).encrypt_block(&mut a);
    Gost89CryptoPro::new(&KEY.into()).encrypt_block(&mut b);
    assert_ne!(a, b);
}

#[test]
fn gost89_blocks_roundtrip() {
    let cipher = Gost89CryptoPro::new(&KEY.into());

    let mut blocks = [Block::default(); 101];
    for (i, block) in blocks.iter_mut().enumerate() {
        block.iter_mut().enumerate().for_each(|(j, b)| {
            *b = (i + j) as u8;
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
fn gost89_key_bit_avalanche() {
    let plaintext = GenericArray::clone_from_slice(&hex!("0DF82802B741A292"));
    let mut reference = plaintext;
    Gost89Cbr::new(&KEY.into()).encrypt_block(&mut reference);

    for bit in 0..256 {
        let mut key = KEY;
        key[bit / 8] ^= 1 << (bit % 8);
        let mut block = plaintext;
        Gost89Cbr::new(&key.into()).encrypt_block(&mut block);
        assert_ne!(block, reference, "key bit {}", bit);
    }
}

#[test]
fn gost89_rejects_wrong_key_length() {
    assert!(Gost89Cbr::new_from_slice(&[0u8; 16]).is_err());
    assert!(Gost89Cbr::new_from_slice(&[0u8; 33]).is_err());
}
