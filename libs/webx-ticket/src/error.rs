/// Ticket error — returned by cipher and signer operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("invalid key length {0}")]
    KeyLength(usize),

    #[error("invalid length")]
    InvalidLength,

    #[error("invalid encoding: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("signature mismatch")]
    SignatureMismatch,

    #[error("encryption failed")]
    Encrypt,

    #[error("decryption failed")]
    Decrypt,
}
