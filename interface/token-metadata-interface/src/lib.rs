#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Token Metadata Interface: instruction wire types and codec

pub mod error;
pub mod instruction;
pub mod state;

pub use solana_pubkey::Pubkey;

use error::MetadataError;

/// Key written in place of an absent update authority.
///
/// The UpdateAuthority payload has no presence flag, so "no authority" is the
/// all-zero address (which is also the system program id).
pub const SENTINEL_AUTHORITY: Pubkey = Pubkey::new_from_array([0u8; 32]);

/// Convert raw bytes into a public key, naming `field` on failure.
pub fn pubkey_from_slice(field: &'static str, bytes: &[u8]) -> Result<Pubkey, MetadataError> {
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| MetadataError::InvalidPubkeyLength {
            field,
            len: bytes.len(),
        })?;
    Ok(Pubkey::new_from_array(array))
}

/// Map the sentinel key back to "no authority".
pub fn authority_from_sentinel(key: Pubkey) -> Option<Pubkey> {
    if key == SENTINEL_AUTHORITY {
        None
    } else {
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pubkey_from_slice_requires_32_bytes() {
        assert_eq!(
            pubkey_from_slice("mint", &[9u8; 32]).unwrap(),
            Pubkey::new_from_array([9u8; 32])
        );
        assert_eq!(
            pubkey_from_slice("mint", &[9u8; 31]),
            Err(MetadataError::InvalidPubkeyLength {
                field: "mint",
                len: 31
            })
        );
        assert!(pubkey_from_slice("mint", &[0u8; 33]).is_err());
    }

    #[test]
    fn sentinel_maps_to_none() {
        assert_eq!(authority_from_sentinel(SENTINEL_AUTHORITY), None);
        let key = Pubkey::new_from_array([4u8; 32]);
        assert_eq!(authority_from_sentinel(key), Some(key));
    }
}
