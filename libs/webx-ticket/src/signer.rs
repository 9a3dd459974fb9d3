use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::Mac;
use hmac::digest::{KeyInit, OutputSizeUser};

use crate::error::TicketError;

/// Signs and verifies opaque ticket payloads with a keyed MAC,
/// e.g. `Signer::<Hmac<Sha256>>`.
///
/// Signed tickets are URL-safe unpadded base64 of `payload || mac`.
pub struct Signer<M> {
    mac: M,
}

impl<M: Mac + KeyInit + Clone> Signer<M> {
    pub fn new(key: &[u8]) -> Result<Self, TicketError> {
        let mac = <M as KeyInit>::new_from_slice(key).map_err(|_| TicketError::KeyLength(key.len()))?;
        Ok(Self { mac })
    }

    /// MAC over `src`.
    pub fn signature(&self, src: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(src);
        mac.finalize().into_bytes().to_vec()
    }

    /// Encode `src` with its trailing signature into a ticket string.
    pub fn encode_to_string(&self, src: &[u8]) -> String {
        let mut data = src.to_vec();
        data.extend_from_slice(&self.signature(src));
        URL_SAFE_NO_PAD.encode(data)
    }

    /// Constant-time signature check.
    pub fn verify(&self, src: &[u8], signature: &[u8]) -> Result<(), TicketError> {
        let mut mac = self.mac.clone();
        mac.update(src);
        mac.verify_slice(signature)
            .map_err(|_| TicketError::SignatureMismatch)
    }

    /// Decode a ticket string produced by [`Signer::encode_to_string`],
    /// returning the payload after verifying its trailing signature.
    pub fn decode_string(&self, s: &str) -> Result<Vec<u8>, TicketError> {
        let data = URL_SAFE_NO_PAD.decode(s)?;
        let n = data
            .len()
            .checked_sub(M::output_size())
            .ok_or(TicketError::InvalidLength)?;
        let (value, signature) = data.split_at(n);
        self.verify(value, signature)?;
        Ok(value.to_vec())
    }
}
