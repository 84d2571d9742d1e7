use std::sync::Once;

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;
use token_metadata_interface::{
    instruction::MetadataInstruction,
    state::{Collection, Creator, UseMethod, Uses},
};
use token_metadata_sdk::{InitializeParams, TokenMetadataClient};

pub const PROGRAM_ID: Pubkey = Pubkey::new_from_array([0xAA; 32]);
pub const METADATA: Pubkey = Pubkey::new_from_array([1; 32]);
pub const UPDATE_AUTHORITY: Pubkey = Pubkey::new_from_array([2; 32]);
pub const MINT: Pubkey = Pubkey::new_from_array([3; 32]);
pub const MINT_AUTHORITY: Pubkey = Pubkey::new_from_array([4; 32]);

static TRACING: Once = Once::new();

/// Route builder logs to the test harness output.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn client() -> TokenMetadataClient {
    init_tracing();
    TokenMetadataClient::new(PROGRAM_ID)
}

pub fn key(byte: u8) -> Pubkey {
    Pubkey::new_from_array([byte; 32])
}

pub fn creator(byte: u8, verified: bool, share: u8) -> Creator {
    Creator {
        address: key(byte),
        verified,
        share,
    }
}

pub fn initialize_params() -> InitializeParams {
    InitializeParams {
        metadata: METADATA,
        update_authority: UPDATE_AUTHORITY,
        mint: MINT,
        mint_authority: MINT_AUTHORITY,
        name: "Solana Monkey".to_string(),
        symbol: "SMB".to_string(),
        uri: "https://example.com/smb.json".to_string(),
        seller_fee_basis_points: 500,
        creators: None,
        collection: None,
        uses: None,
    }
}

pub fn full_initialize_params() -> InitializeParams {
    InitializeParams {
        creators: Some(vec![
            creator(10, true, 50),
            creator(11, false, 30),
            creator(12, true, 20),
        ]),
        collection: Some(Collection {
            key: key(20),
            verified: true,
        }),
        uses: Some(Uses {
            use_method: UseMethod::Single,
            remaining: 1,
            total: 1,
        }),
        ..initialize_params()
    }
}

/// Payload bytes following the 8-byte discriminator.
pub fn payload(ix: &Instruction) -> &[u8] {
    &ix.data[8..]
}

pub fn decode(ix: &Instruction) -> MetadataInstruction {
    MetadataInstruction::unpack(&ix.data).expect("instruction data decodes")
}

/// Expected (pubkey, is_signer, is_writable) triples.
pub fn metas(ix: &Instruction) -> Vec<(Pubkey, bool, bool)> {
    ix.accounts
        .iter()
        .map(|AccountMeta {
                  pubkey,
                  is_signer,
                  is_writable,
              }| (*pubkey, *is_signer, *is_writable))
        .collect()
}

/// Little-endian u32 length prefix followed by the string bytes.
pub fn borsh_str(s: &str) -> Vec<u8> {
    let mut out = (s.len() as u32).to_le_bytes().to_vec();
    out.extend_from_slice(s.as_bytes());
    out
}
