pub mod cipher;
pub mod error;
pub mod signer;

pub use cipher::Cipher;
pub use error::TicketError;
pub use signer::Signer;
