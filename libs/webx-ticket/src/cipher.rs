use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::TicketError;

// 96-bit GCM nonce, prepended to the ciphertext.
const NONCE_LEN: usize = 12;

enum Keyed {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

/// Symmetric cipher for opaque ticket payloads.
///
/// AES-128-GCM or AES-256-GCM, selected by key length (16 or 32 bytes).
/// Tickets are URL-safe unpadded base64 of `nonce || ciphertext`, with a
/// fresh random nonce per encryption.
pub struct Cipher {
    keyed: Keyed,
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self.keyed {
            Keyed::Aes128(_) => "Aes128",
            Keyed::Aes256(_) => "Aes256",
        };
        f.debug_struct("Cipher").field("keyed", &variant).finish()
    }
}

impl Cipher {
    pub fn new(key: &[u8]) -> Result<Self, TicketError> {
        let keyed = match key.len() {
            16 => Keyed::Aes128(
                Aes128Gcm::new_from_slice(key).map_err(|_| TicketError::KeyLength(key.len()))?,
            ),
            32 => Keyed::Aes256(
                Aes256Gcm::new_from_slice(key).map_err(|_| TicketError::KeyLength(key.len()))?,
            ),
            n => return Err(TicketError::KeyLength(n)),
        };
        Ok(Self { keyed })
    }

    /// Encrypt `src` into a ticket string.
    pub fn encode_to_string(&self, src: &[u8]) -> Result<String, TicketError> {
        let nonce = Aes128Gcm::generate_nonce(&mut OsRng);
        let ciphertext = match &self.keyed {
            Keyed::Aes128(cipher) => cipher.encrypt(&nonce, src),
            Keyed::Aes256(cipher) => cipher.encrypt(&nonce, src),
        }
        .map_err(|_| TicketError::Encrypt)?;

        let mut data = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        data.extend_from_slice(nonce.as_slice());
        data.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(data))
    }

    /// Decrypt a ticket string produced by [`Cipher::encode_to_string`].
    ///
    /// Fails on malformed base64, on input shorter than a nonce, and on
    /// any authentication failure.
    pub fn decode_string(&self, s: &str) -> Result<Vec<u8>, TicketError> {
        let data = URL_SAFE_NO_PAD.decode(s)?;
        if data.len() < NONCE_LEN {
            return Err(TicketError::InvalidLength);
        }
        let (nonce, ciphertext) = data.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce);
        match &self.keyed {
            Keyed::Aes128(cipher) => cipher.decrypt(nonce, ciphertext),
            Keyed::Aes256(cipher) => cipher.decrypt(nonce, ciphertext),
        }
        .map_err(|_| TicketError::Decrypt)
    }
}
