use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use token_metadata_interface::{
    instruction::MetadataInstruction,
    pubkey_from_slice,
    state::{Collection, Creator, Field, UseMethod, Uses},
};
use token_metadata_sdk::{
    EmitParams, InitializeParams, RemoveKeyParams, TokenMetadataClient,
    TxInitializeWithAdditionalMetadataParams, UpdateAuthorityParams, UpdateFieldParams,
};
use tracing_subscriber::EnvFilter;

fn parse_pubkey(field: &'static str, s: &str) -> anyhow::Result<Pubkey> {
    let bytes = bs58::decode(s)
        .into_vec()
        .with_context(|| format!("{field}: invalid base58"))?;
    Ok(pubkey_from_slice(field, &bytes)?)
}

fn encode_pubkey(key: &Pubkey) -> String {
    bs58::encode(key.to_bytes()).into_string()
}

/// `ADDRESS:SHARE[:verified]`
fn parse_creator(s: &str) -> anyhow::Result<Creator> {
    let mut parts = s.split(':');
    let address = parse_pubkey("creator", parts.next().unwrap_or_default())?;
    let share = parts
        .next()
        .context("creator: expected ADDRESS:SHARE[:verified]")?
        .parse::<u8>()
        .context("creator: share must be 0-255")?;
    let verified = parse_verified_flag("creator", parts.next())?;
    anyhow::ensure!(parts.next().is_none(), "creator: too many ':' separators");
    Ok(Creator {
        address,
        verified,
        share,
    })
}

/// `KEY[:verified]`
fn parse_collection(s: &str) -> anyhow::Result<Collection> {
    let (key, flag) = match s.split_once(':') {
        Some((key, flag)) => (key, Some(flag)),
        None => (s, None),
    };
    Ok(Collection {
        key: parse_pubkey("collection", key)?,
        verified: parse_verified_flag("collection", flag)?,
    })
}

fn parse_verified_flag(field: &str, flag: Option<&str>) -> anyhow::Result<bool> {
    match flag {
        None => Ok(false),
        Some("verified") => Ok(true),
        Some(other) => anyhow::bail!("{field}: unexpected flag {other:?}, expected \"verified\""),
    }
}

fn parse_kv(s: &str) -> anyhow::Result<(String, String)> {
    let (k, v) = s
        .split_once('=')
        .with_context(|| format!("expected key=value, got {s:?}"))?;
    Ok((k.to_string(), v.to_string()))
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UseMethodArg {
    Burn,
    Single,
    Multiple,
}

impl From<UseMethodArg> for UseMethod {
    fn from(arg: UseMethodArg) -> Self {
        match arg {
            UseMethodArg::Burn => UseMethod::Burn,
            UseMethodArg::Single => UseMethod::Single,
            UseMethodArg::Multiple => UseMethod::Multiple,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "token-metadata",
    version,
    about = "Token Metadata Interface instruction builder",
    long_about = "Builds and decodes Token Metadata Interface instructions.\nJSON is always printed to stdout; logs go to stderr (RUST_LOG)."
)]
struct Cli {
    /// Program implementing the interface (base58). Required for build commands
    #[arg(env = "TOKEN_METADATA_PROGRAM_ID", global = true, long)]
    program_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a metadata record
    #[command(alias = "init", about = "Build an Initialize instruction")]
    Initialize {
        #[arg(long)]
        metadata: String,
        #[arg(long)]
        update_authority: String,
        #[arg(long)]
        mint: String,
        #[arg(long)]
        mint_authority: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        uri: String,
        /// Royalty in basis points
        #[arg(long, default_value_t = 0)]
        seller_fee_basis_points: u16,
        /// Repeatable ADDRESS:SHARE[:verified]
        #[arg(long = "creator")]
        creators: Vec<String>,
        /// KEY[:verified]
        #[arg(long)]
        collection: Option<String>,
        /// Use method; enables uses together with --uses-total
        #[arg(long, value_enum, requires = "uses_total")]
        use_method: Option<UseMethodArg>,
        #[arg(long, requires = "use_method")]
        uses_total: Option<u64>,
        /// Defaults to --uses-total
        #[arg(long, requires = "use_method")]
        uses_remaining: Option<u64>,
        /// Repeatable key=value, each written with UpdateField after Initialize
        #[arg(long = "additional")]
        additional: Vec<String>,
    },

    /// Insert or overwrite one field
    #[command(alias = "set", about = "Build an UpdateField instruction")]
    UpdateField {
        #[arg(long)]
        metadata: String,
        #[arg(long)]
        update_authority: String,
        /// name | symbol | uri | any other key
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },

    /// Remove one user field
    #[command(alias = "rm", about = "Build a RemoveKey instruction")]
    RemoveKey {
        #[arg(long)]
        metadata: String,
        #[arg(long)]
        update_authority: String,
        #[arg(long)]
        key: String,
        /// Do not fail if the key is missing
        #[arg(long, default_value_t = false)]
        idempotent: bool,
    },

    /// Transfer or clear the update authority
    #[command(alias = "auth", about = "Build an UpdateAuthority instruction")]
    UpdateAuthority {
        #[arg(long)]
        metadata: String,
        #[arg(long)]
        old_authority: String,
        /// Omit to clear the authority
        #[arg(long)]
        new_authority: Option<String>,
    },

    /// Emit a byte range of the metadata
    #[command(about = "Build an Emit instruction")]
    Emit {
        #[arg(long)]
        metadata: String,
        #[arg(long)]
        start: Option<u64>,
        #[arg(long)]
        end: Option<u64>,
    },

    /// Decode hex instruction data
    #[command(about = "Decode instruction data (hex) into JSON")]
    Decode {
        #[arg(long)]
        data: String,
    },
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    if let Commands::Decode { data } = &args.command {
        let bytes = hex::decode(data.trim()).context("--data must be hex")?;
        let ix = MetadataInstruction::unpack(&bytes)?;
        println!("{}", serde_json::to_string_pretty(&decoded_json(&ix))?);
        return Ok(());
    }

    let program_id = args
        .program_id
        .as_deref()
        .context("--program-id or TOKEN_METADATA_PROGRAM_ID required")?;
    let client = TokenMetadataClient::new(parse_pubkey("program_id", program_id)?);

    let ixs = build_instructions(&client, args.command)?;

    tracing::info!(count = ixs.len(), "built instructions");
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "instructions": ixs.iter().map(instruction_json).collect::<Vec<_>>(),
        }))?
    );
    Ok(())
}

fn build_instructions(
    client: &TokenMetadataClient,
    command: Commands,
) -> anyhow::Result<Vec<Instruction>> {
    let ixs = match command {
        Commands::Initialize {
            metadata,
            update_authority,
            mint,
            mint_authority,
            name,
            symbol,
            uri,
            seller_fee_basis_points,
            creators,
            collection,
            use_method,
            uses_total,
            uses_remaining,
            additional,
        } => {
            let creators = creators
                .iter()
                .map(|s| parse_creator(s))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let uses = match (use_method, uses_total) {
                (Some(method), Some(total)) => Some(Uses {
                    use_method: method.into(),
                    remaining: uses_remaining.unwrap_or(total),
                    total,
                }),
                _ => None,
            };
            let initialize = InitializeParams {
                metadata: parse_pubkey("metadata", &metadata)?,
                update_authority: parse_pubkey("update_authority", &update_authority)?,
                mint: parse_pubkey("mint", &mint)?,
                mint_authority: parse_pubkey("mint_authority", &mint_authority)?,
                name,
                symbol,
                uri,
                seller_fee_basis_points,
                creators: Some(creators),
                collection: collection.as_deref().map(parse_collection).transpose()?,
                uses,
            };
            let additional_metadata = additional
                .iter()
                .map(|s| parse_kv(s))
                .collect::<anyhow::Result<Vec<_>>>()?;
            client.initialize_with_additional_metadata_tx(
                TxInitializeWithAdditionalMetadataParams {
                    initialize,
                    additional_metadata,
                },
            )?
        }
        Commands::UpdateField {
            metadata,
            update_authority,
            field,
            value,
        } => {
            // Field parsing never fails: unknown names become user keys
            let field = field.parse::<Field>().unwrap_or_else(|never| match never {});
            vec![client.update_field_ix(UpdateFieldParams {
                metadata: parse_pubkey("metadata", &metadata)?,
                update_authority: parse_pubkey("update_authority", &update_authority)?,
                field,
                value,
            })?]
        }
        Commands::RemoveKey {
            metadata,
            update_authority,
            key,
            idempotent,
        } => vec![client.remove_key_ix(RemoveKeyParams {
            metadata: parse_pubkey("metadata", &metadata)?,
            update_authority: parse_pubkey("update_authority", &update_authority)?,
            key,
            idempotent,
        })?],
        Commands::UpdateAuthority {
            metadata,
            old_authority,
            new_authority,
        } => vec![client.update_authority_ix(UpdateAuthorityParams {
            metadata: parse_pubkey("metadata", &metadata)?,
            old_authority: parse_pubkey("old_authority", &old_authority)?,
            new_authority: new_authority
                .as_deref()
                .map(|s| parse_pubkey("new_authority", s))
                .transpose()?,
        })?],
        Commands::Emit {
            metadata,
            start,
            end,
        } => vec![client.emit_ix(EmitParams {
            metadata: parse_pubkey("metadata", &metadata)?,
            start,
            end,
        })?],
        Commands::Decode { .. } => anyhow::bail!("decode does not build instructions"),
    };
    Ok(ixs)
}

fn instruction_json(ix: &Instruction) -> serde_json::Value {
    json!({
        "program_id": encode_pubkey(&ix.program_id),
        "accounts": ix.accounts.iter().map(|meta| json!({
            "pubkey": encode_pubkey(&meta.pubkey),
            "is_signer": meta.is_signer,
            "is_writable": meta.is_writable,
        })).collect::<Vec<_>>(),
        "data": hex::encode(&ix.data),
    })
}

fn decoded_json(ix: &MetadataInstruction) -> serde_json::Value {
    let args = match ix {
        MetadataInstruction::Initialize(init) => json!({
            "name": init.name,
            "symbol": init.symbol,
            "uri": init.uri,
            "seller_fee_basis_points": init.seller_fee_basis_points,
            "creators": init.creators.as_ref().map(|creators| creators.iter().map(|c| json!({
                "address": encode_pubkey(&c.address),
                "verified": c.verified,
                "share": c.share,
            })).collect::<Vec<_>>()),
            "collection": init.collection.map(|c| json!({
                "key": encode_pubkey(&c.key),
                "verified": c.verified,
            })),
            "uses": init.uses.map(|u| json!({
                "use_method": format!("{:?}", u.use_method),
                "remaining": u.remaining,
                "total": u.total,
            })),
        }),
        MetadataInstruction::UpdateField(update) => json!({
            "field": update.field.to_string(),
            "field_tag": update.field.tag(),
            "value": update.value,
        }),
        MetadataInstruction::RemoveKey(remove) => json!({
            "idempotent": remove.idempotent,
            "key": remove.key,
        }),
        MetadataInstruction::UpdateAuthority(update) => json!({
            "new_authority": update.new_authority().map(|k| encode_pubkey(&k)),
        }),
        MetadataInstruction::Emit(emit) => json!({
            "start": emit.start,
            "end": emit.end,
        }),
    };
    json!({
        "instruction": ix.name(),
        "discriminator": hex::encode(ix.discriminator()),
        "args": args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b58(byte: u8) -> String {
        bs58::encode([byte; 32]).into_string()
    }

    #[test]
    fn parses_creator_specs() {
        let creator = parse_creator(&format!("{}:40:verified", b58(5))).unwrap();
        assert_eq!(creator.address, Pubkey::new_from_array([5; 32]));
        assert_eq!(creator.share, 40);
        assert!(creator.verified);

        let creator = parse_creator(&format!("{}:60", b58(6))).unwrap();
        assert!(!creator.verified);

        assert!(parse_creator(&b58(6)).is_err());
        assert!(parse_creator(&format!("{}:300", b58(6))).is_err());
        assert!(parse_creator(&format!("{}:1:yes", b58(6))).is_err());
    }

    #[test]
    fn parses_collection_specs() {
        let collection = parse_collection(&format!("{}:verified", b58(7))).unwrap();
        assert!(collection.verified);
        assert!(!parse_collection(&b58(7)).unwrap().verified);
    }

    #[test]
    fn rejects_short_keys() {
        let err = parse_pubkey("mint", &bs58::encode([1u8; 16]).into_string()).unwrap_err();
        assert!(err.to_string().contains("mint"));
    }

    #[test]
    fn decoded_json_maps_sentinel_to_null() {
        let ix = MetadataInstruction::UpdateAuthority(
            token_metadata_interface::instruction::UpdateAuthority::new(None),
        );
        let value = decoded_json(&ix);
        assert_eq!(value["instruction"], "UpdateAuthority");
        assert!(value["args"]["new_authority"].is_null());
    }
}
