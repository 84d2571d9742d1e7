//! Token Metadata Interface – Rust SDK (client-side helpers)
//!
//! This crate provides:
//! - Instruction builders with correct account ordering and signer flags
//! - Transaction builders for common flows (compose Vec<Instruction>)
//!
//! Builders only encode. Signers, recent blockhashes, and submission are left to the caller.

use anyhow::Context as _;
use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;
use tracing::{debug, trace};

pub use token_metadata_interface as interface;
use interface::instruction::{
    Emit, Initialize, MetadataInstruction, RemoveKey, UpdateAuthority, UpdateField,
};
use interface::state::{Collection, Creator, Field, Uses};

/// Thin client for building instructions against a program implementing the
/// Token Metadata Interface.
///
/// The `program_id` is the program that owns the metadata account (for example
/// Token-2022, or a standalone metadata program).
pub struct TokenMetadataClient {
    pub program_id: Pubkey,
}

impl TokenMetadataClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Build an Initialize instruction.
    ///
    /// Accounts (strict order):
    /// - metadata (writable)
    /// - update_authority (readonly)
    /// - mint (readonly)
    /// - mint_authority (readonly, signer)
    /// - each verified creator (readonly, signer), in the given order
    /// - verified collection key (readonly, signer), if any
    ///
    /// An empty creators list is sent as absent.
    pub fn initialize_ix(&self, params: InitializeParams) -> anyhow::Result<Instruction> {
        let creators = params.creators.filter(|creators| !creators.is_empty());

        let mut accounts = vec![
            AccountMeta::new(params.metadata, false),
            AccountMeta::new_readonly(params.update_authority, false),
            AccountMeta::new_readonly(params.mint, false),
            AccountMeta::new_readonly(params.mint_authority, true),
        ];
        accounts.extend(verified_signer_metas(
            creators.as_deref(),
            params.collection.as_ref(),
        ));

        let ix = MetadataInstruction::Initialize(Initialize {
            name: params.name,
            symbol: params.symbol,
            uri: params.uri,
            seller_fee_basis_points: params.seller_fee_basis_points,
            creators,
            collection: params.collection,
            uses: params.uses,
        });

        self.build(ix, accounts)
    }

    /// Build an UpdateField instruction.
    ///
    /// Accounts (strict order):
    /// - metadata (writable)
    /// - update_authority (readonly, signer)
    pub fn update_field_ix(&self, params: UpdateFieldParams) -> anyhow::Result<Instruction> {
        let ix = MetadataInstruction::UpdateField(UpdateField {
            field: params.field,
            value: params.value,
        });

        self.build(
            ix,
            vec![
                AccountMeta::new(params.metadata, false),
                AccountMeta::new_readonly(params.update_authority, true),
            ],
        )
    }

    /// Build a RemoveKey instruction.
    ///
    /// Accounts (strict order):
    /// - metadata (writable)
    /// - update_authority (readonly, signer)
    pub fn remove_key_ix(&self, params: RemoveKeyParams) -> anyhow::Result<Instruction> {
        let ix = MetadataInstruction::RemoveKey(RemoveKey {
            idempotent: params.idempotent,
            key: params.key,
        });

        self.build(
            ix,
            vec![
                AccountMeta::new(params.metadata, false),
                AccountMeta::new_readonly(params.update_authority, true),
            ],
        )
    }

    /// Build an UpdateAuthority instruction.
    ///
    /// Accounts (strict order):
    /// - metadata (writable)
    /// - old_authority (readonly, signer)
    ///
    /// `new_authority: None` clears the authority; it is written as the sentinel key.
    pub fn update_authority_ix(
        &self,
        params: UpdateAuthorityParams,
    ) -> anyhow::Result<Instruction> {
        let ix = MetadataInstruction::UpdateAuthority(UpdateAuthority::new(params.new_authority));

        self.build(
            ix,
            vec![
                AccountMeta::new(params.metadata, false),
                AccountMeta::new_readonly(params.old_authority, true),
            ],
        )
    }

    /// Build an Emit instruction.
    ///
    /// Accounts (strict order):
    /// - metadata (readonly)
    pub fn emit_ix(&self, params: EmitParams) -> anyhow::Result<Instruction> {
        let ix = MetadataInstruction::Emit(Emit {
            start: params.start,
            end: params.end,
        });

        self.build(ix, vec![AccountMeta::new_readonly(params.metadata, false)])
    }

    // Transaction patterns (compose instructions; signing and submission left to caller)
    /// Initialize metadata, then write each additional key/value pair.
    ///
    /// Returns: [initialize, update_field(Key(k1)), update_field(Key(k2)), ...].
    /// The update authority must sign alongside the mint authority.
    pub fn initialize_with_additional_metadata_tx(
        &self,
        params: TxInitializeWithAdditionalMetadataParams,
    ) -> anyhow::Result<Vec<Instruction>> {
        let metadata = params.initialize.metadata;
        let update_authority = params.initialize.update_authority;

        let mut ixs = Vec::with_capacity(1 + params.additional_metadata.len());
        ixs.push(self.initialize_ix(params.initialize)?);
        for (key, value) in params.additional_metadata {
            ixs.push(
                self.update_field_ix(UpdateFieldParams {
                    metadata,
                    update_authority,
                    field: Field::Key(key),
                    value,
                })?,
            );
        }
        Ok(ixs)
    }

    /// One UpdateField per (field, value), in order.
    pub fn update_fields_tx(&self, params: TxUpdateFieldsParams) -> anyhow::Result<Vec<Instruction>> {
        params
            .fields
            .into_iter()
            .map(|(field, value)| {
                self.update_field_ix(UpdateFieldParams {
                    metadata: params.metadata,
                    update_authority: params.update_authority,
                    field,
                    value,
                })
            })
            .collect()
    }

    /// Transfer authority then immediately update a field. Requires both current and new authorities to sign.
    /// Returns: [update_authority, update_field]
    pub fn transfer_authority_then_update_field_tx(
        &self,
        params: TxTransferAuthorityThenUpdateFieldParams,
    ) -> anyhow::Result<Vec<Instruction>> {
        let transfer_ix = self.update_authority_ix(UpdateAuthorityParams {
            metadata: params.metadata,
            old_authority: params.current_update_authority,
            new_authority: Some(params.new_authority),
        })?;

        let update_ix = self.update_field_ix(UpdateFieldParams {
            metadata: params.metadata,
            update_authority: params.new_authority,
            field: params.field,
            value: params.value,
        })?;

        Ok(vec![transfer_ix, update_ix])
    }

    fn build(
        &self,
        ix: MetadataInstruction,
        accounts: Vec<AccountMeta>,
    ) -> anyhow::Result<Instruction> {
        let data = ix
            .pack()
            .with_context(|| format!("encode {} instruction", ix.name()))?;

        debug!(
            instruction = ix.name(),
            data_len = data.len(),
            accounts = accounts.len(),
            "built token metadata instruction"
        );
        trace!(?accounts, "account list");

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}

/// Readonly signer metas for verified creators, then a verified collection.
///
/// Unverified entries are skipped; relative order of creators is preserved.
pub fn verified_signer_metas(
    creators: Option<&[Creator]>,
    collection: Option<&Collection>,
) -> Vec<AccountMeta> {
    creators
        .unwrap_or_default()
        .iter()
        .filter(|creator| creator.verified)
        .map(|creator| creator.address)
        .chain(
            collection
                .filter(|collection| collection.verified)
                .map(|collection| collection.key),
        )
        .map(|key| AccountMeta::new_readonly(key, true))
        .collect()
}

// === Params ===
/// Parameters for Initialize instruction.
#[derive(Debug, Clone)]
pub struct InitializeParams {
    /// Metadata account being initialized
    pub metadata: Pubkey,
    /// Authority recorded as able to update the metadata
    pub update_authority: Pubkey,
    /// Token mint the metadata describes
    pub mint: Pubkey,
    /// Mint authority (must sign)
    pub mint_authority: Pubkey,
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// URI to off-chain metadata
    pub uri: String,
    /// Royalty in basis points
    pub seller_fee_basis_points: u16,
    /// Creators; `Some(vec![])` is treated as `None`
    pub creators: Option<Vec<Creator>>,
    /// Collection membership
    pub collection: Option<Collection>,
    /// Usage counters
    pub uses: Option<Uses>,
}

/// Parameters for UpdateField instruction.
#[derive(Debug, Clone)]
pub struct UpdateFieldParams {
    /// Metadata account
    pub metadata: Pubkey,
    /// Current update authority (must sign)
    pub update_authority: Pubkey,
    /// Field to write
    pub field: Field,
    /// New value
    pub value: String,
}

/// Parameters for RemoveKey instruction.
#[derive(Debug, Clone)]
pub struct RemoveKeyParams {
    /// Metadata account
    pub metadata: Pubkey,
    /// Current update authority (must sign)
    pub update_authority: Pubkey,
    /// User field to remove
    pub key: String,
    /// If true, a missing key is not an error
    pub idempotent: bool,
}

/// Parameters for UpdateAuthority instruction.
#[derive(Debug, Clone)]
pub struct UpdateAuthorityParams {
    /// Metadata account
    pub metadata: Pubkey,
    /// Current update authority (must sign)
    pub old_authority: Pubkey,
    /// New authority; None clears it
    pub new_authority: Option<Pubkey>,
}

/// Parameters for Emit instruction.
#[derive(Debug, Clone, Default)]
pub struct EmitParams {
    /// Metadata account
    pub metadata: Pubkey,
    /// Start offset
    pub start: Option<u64>,
    /// End offset
    pub end: Option<u64>,
}

/// Parameters for initialize_with_additional_metadata_tx transaction pattern.
#[derive(Debug, Clone)]
pub struct TxInitializeWithAdditionalMetadataParams {
    /// Initialize arguments
    pub initialize: InitializeParams,
    /// Extra key/value fields written after initialization
    pub additional_metadata: Vec<(String, String)>,
}

/// Parameters for update_fields_tx transaction pattern.
#[derive(Debug, Clone)]
pub struct TxUpdateFieldsParams {
    pub metadata: Pubkey,
    pub update_authority: Pubkey,
    /// Fields to write, in order
    pub fields: Vec<(Field, String)>,
}

/// Parameters for transfer_authority followed by update_field in one transaction.
#[derive(Debug, Clone)]
pub struct TxTransferAuthorityThenUpdateFieldParams {
    /// Metadata account
    pub metadata: Pubkey,
    /// Current update authority (signs transfer)
    pub current_update_authority: Pubkey,
    /// New authority to transfer to (signs update)
    pub new_authority: Pubkey,
    /// Field written by the new authority
    pub field: Field,
    pub value: String,
}
