//! Error types

use thiserror::Error;

/// Errors raised while encoding or decoding token metadata instructions.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MetadataError {
    /// A public key was not exactly 32 bytes
    #[error("{field}: public key must be 32 bytes, got {len}")]
    InvalidPubkeyLength {
        /// Name of the offending field
        field: &'static str,
        /// Length that was supplied
        len: usize,
    },
    /// A string does not fit the u32 length prefix
    #[error("{field}: string of {len} bytes exceeds the u32 length prefix")]
    StringTooLong {
        /// Name of the offending field
        field: &'static str,
        /// Byte length of the string
        len: usize,
    },
    /// A vector does not fit the u32 count prefix
    #[error("{field}: {len} items exceed the u32 count prefix")]
    TooManyItems {
        /// Name of the offending field
        field: &'static str,
        /// Number of items
        len: usize,
    },
    /// The serializer failed while writing the payload
    #[error("failed to encode {instruction}: {message}")]
    Encoding {
        /// Instruction being encoded
        instruction: &'static str,
        /// Serializer message
        message: String,
    },
    /// Instruction data is shorter than a discriminator
    #[error("instruction data too short: {len} bytes")]
    InstructionTooShort {
        /// Length of the data that was supplied
        len: usize,
    },
    /// Discriminator does not match any known instruction
    #[error("unknown instruction discriminator {0:?}")]
    UnknownDiscriminator([u8; 8]),
    /// Payload does not decode exactly into the instruction layout
    #[error("invalid instruction data for {instruction}")]
    InvalidInstructionData {
        /// Instruction selected by the discriminator
        instruction: &'static str,
    },
}
