//! Instruction types

use {
    crate::{
        authority_from_sentinel,
        error::MetadataError,
        state::{Collection, Creator, Field, Uses},
        SENTINEL_AUTHORITY,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    solana_pubkey::Pubkey,
};

/// Discriminator of the Initialize instruction
pub const INITIALIZE_DISCRIMINATOR: [u8; 8] = [210, 225, 30, 162, 88, 184, 77, 141];
/// Discriminator of the UpdateField instruction
pub const UPDATE_FIELD_DISCRIMINATOR: [u8; 8] = [221, 233, 49, 45, 181, 202, 220, 200];
/// Discriminator of the RemoveKey instruction
pub const REMOVE_KEY_DISCRIMINATOR: [u8; 8] = [234, 18, 32, 56, 89, 141, 37, 181];
/// Discriminator of the UpdateAuthority instruction
pub const UPDATE_AUTHORITY_DISCRIMINATOR: [u8; 8] = [215, 228, 166, 228, 84, 100, 86, 123];
/// Discriminator of the Emit instruction
pub const EMIT_DISCRIMINATOR: [u8; 8] = [250, 166, 180, 250, 13, 12, 184, 70];

/// Initialize payload: seeds a metadata record.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Initialize {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// URI pointing to off-chain metadata
    pub uri: String,
    /// Royalty in basis points
    pub seller_fee_basis_points: u16,
    /// Creators; an empty list is encoded as absent
    pub creators: Option<Vec<Creator>>,
    /// Collection membership
    pub collection: Option<Collection>,
    /// Usage counters
    pub uses: Option<Uses>,
}

/// UpdateField payload: inserts or overwrites one field.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateField {
    /// Field to write
    pub field: Field,
    /// New value
    pub value: String,
}

/// RemoveKey payload: deletes one user field.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemoveKey {
    /// If true, removing a missing key is not an error
    pub idempotent: bool,
    /// Key to remove
    pub key: String,
}

/// UpdateAuthority payload: transfers or clears the update authority.
///
/// The key has no presence flag; [`SENTINEL_AUTHORITY`] stands for "none".
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateAuthority {
    /// New authority, or the sentinel key
    pub new_authority: Pubkey,
}

impl UpdateAuthority {
    /// Build the payload, substituting the sentinel for `None`.
    pub fn new(new_authority: Option<Pubkey>) -> Self {
        Self {
            new_authority: new_authority.unwrap_or(SENTINEL_AUTHORITY),
        }
    }

    /// The new authority, with the sentinel read back as `None`.
    pub fn new_authority(&self) -> Option<Pubkey> {
        authority_from_sentinel(self.new_authority)
    }
}

/// Emit payload: asks the program to return a byte range of the metadata.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Emit {
    /// Start offset
    pub start: Option<u64>,
    /// End offset (exclusive)
    pub end: Option<u64>,
}

/// Instructions understood by a token metadata program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataInstruction {
    /// Initialize a metadata record
    Initialize(Initialize),
    /// Update one field
    UpdateField(UpdateField),
    /// Remove one user field
    RemoveKey(RemoveKey),
    /// Change the update authority
    UpdateAuthority(UpdateAuthority),
    /// Emit metadata bytes
    Emit(Emit),
}

impl MetadataInstruction {
    /// Instruction name, used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize(_) => "Initialize",
            Self::UpdateField(_) => "UpdateField",
            Self::RemoveKey(_) => "RemoveKey",
            Self::UpdateAuthority(_) => "UpdateAuthority",
            Self::Emit(_) => "Emit",
        }
    }

    /// 8-byte tag written ahead of the payload
    pub fn discriminator(&self) -> [u8; 8] {
        match self {
            Self::Initialize(_) => INITIALIZE_DISCRIMINATOR,
            Self::UpdateField(_) => UPDATE_FIELD_DISCRIMINATOR,
            Self::RemoveKey(_) => REMOVE_KEY_DISCRIMINATOR,
            Self::UpdateAuthority(_) => UPDATE_AUTHORITY_DISCRIMINATOR,
            Self::Emit(_) => EMIT_DISCRIMINATOR,
        }
    }

    /// Unpack a byte array into a MetadataInstruction
    pub fn unpack(input: &[u8]) -> Result<Self, MetadataError> {
        let (discriminator, rest) = input
            .split_first_chunk::<8>()
            .ok_or(MetadataError::InstructionTooShort { len: input.len() })?;

        match *discriminator {
            INITIALIZE_DISCRIMINATOR => decode(rest, "Initialize").map(Self::Initialize),
            UPDATE_FIELD_DISCRIMINATOR => decode(rest, "UpdateField").map(Self::UpdateField),
            REMOVE_KEY_DISCRIMINATOR => decode(rest, "RemoveKey").map(Self::RemoveKey),
            UPDATE_AUTHORITY_DISCRIMINATOR => {
                decode(rest, "UpdateAuthority").map(Self::UpdateAuthority)
            }
            EMIT_DISCRIMINATOR => decode(rest, "Emit").map(Self::Emit),
            other => Err(MetadataError::UnknownDiscriminator(other)),
        }
    }

    /// Pack the MetadataInstruction into `discriminator ++ payload`
    pub fn pack(&self) -> Result<Vec<u8>, MetadataError> {
        self.check_prefixes()?;

        let mut data = self.discriminator().to_vec();
        let written = match self {
            Self::Initialize(args) if args.creators.as_ref().is_some_and(Vec::is_empty) => {
                borsh::to_writer(
                    &mut data,
                    &Initialize {
                        creators: None,
                        ..args.clone()
                    },
                )
            }
            Self::Initialize(args) => borsh::to_writer(&mut data, args),
            Self::UpdateField(args) => borsh::to_writer(&mut data, args),
            Self::RemoveKey(args) => borsh::to_writer(&mut data, args),
            Self::UpdateAuthority(args) => borsh::to_writer(&mut data, args),
            Self::Emit(args) => borsh::to_writer(&mut data, args),
        };
        written.map_err(|e| MetadataError::Encoding {
            instruction: self.name(),
            message: e.to_string(),
        })?;
        Ok(data)
    }

    // Length prefixes are u32; reject anything wider before serializing.
    fn check_prefixes(&self) -> Result<(), MetadataError> {
        match self {
            Self::Initialize(args) => {
                check_str("name", args.name.len())?;
                check_str("symbol", args.symbol.len())?;
                check_str("uri", args.uri.len())?;
                if let Some(creators) = &args.creators {
                    check_len("creators", creators.len())?;
                }
            }
            Self::UpdateField(args) => {
                if let Field::Key(key) = &args.field {
                    check_str("field", key.len())?;
                }
                check_str("value", args.value.len())?;
            }
            Self::RemoveKey(args) => check_str("key", args.key.len())?,
            Self::UpdateAuthority(_) | Self::Emit(_) => {}
        }
        Ok(())
    }
}

fn check_str(field: &'static str, len: usize) -> Result<(), MetadataError> {
    u32::try_from(len)
        .map(|_| ())
        .map_err(|_| MetadataError::StringTooLong { field, len })
}

fn check_len(field: &'static str, len: usize) -> Result<(), MetadataError> {
    u32::try_from(len)
        .map(|_| ())
        .map_err(|_| MetadataError::TooManyItems { field, len })
}

fn decode<T: BorshDeserialize>(data: &[u8], instruction: &'static str) -> Result<T, MetadataError> {
    borsh::from_slice(data).map_err(|_| MetadataError::InvalidInstructionData { instruction })
}
