//! Obfuscation of the local save file.
//!
//! AES-128 in ECB mode with PKCS#7 padding. This only deters casual editing of the records file,
//! the key ships with the binary.

use aes::Aes128;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};

use crate::*;

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

pub const BLOCK_SIZE: usize = 16;

/// Key shared with every save file the game has ever written.
pub const GAME_KEY: [u8; 16] = *b"7yqZ7Fq^#3Cr3%nY";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cipher {
    key: [u8; 16],
}

impl Default for Cipher {
    fn default() -> Self {
        Self::new(GAME_KEY)
    }
}

impl Cipher {
    pub const fn new(key: [u8; 16]) -> Self {
        Self { key }
    }

    /// Pads `plaintext` to a whole number of blocks (always adding at least one byte) and
    /// encrypts it.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        Aes128EcbEnc::new(&self.key.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
    }

    /// Decrypts and strips the padding; truncated or tampered input is an error rather than a
    /// panic.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(RecordsError::Cipher);
        }
        Aes128EcbDec::new(&self.key.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| RecordsError::Cipher)
    }
}
