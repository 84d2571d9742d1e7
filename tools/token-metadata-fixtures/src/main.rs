use anyhow::Context;
use serde_json::json;
use solana_pubkey::Pubkey;
use token_metadata_interface::{
    state::{Collection, Creator, Field, UseMethod, Uses},
    SENTINEL_AUTHORITY,
};
use token_metadata_sdk::{
    EmitParams, InitializeParams, RemoveKeyParams, TokenMetadataClient, UpdateAuthorityParams,
    UpdateFieldParams,
};

fn main() -> anyhow::Result<()> {
    // Deterministic example inputs
    let program_id = Pubkey::new_from_array([0xAA; 32]);
    let metadata = Pubkey::new_from_array([1u8; 32]);
    let update_authority = Pubkey::new_from_array([2u8; 32]);
    let mint = Pubkey::new_from_array([3u8; 32]);
    let mint_authority = Pubkey::new_from_array([4u8; 32]);
    let new_auth = Pubkey::new_from_array([7u8; 32]);

    let client = TokenMetadataClient::new(program_id);

    let base = InitializeParams {
        metadata,
        update_authority,
        mint,
        mint_authority,
        name: "Name".to_string(),
        symbol: "SYM".to_string(),
        uri: "https://u".to_string(),
        seller_fee_basis_points: 250,
        creators: None,
        collection: None,
        uses: None,
    };
    let initialize = client.initialize_ix(base.clone())?;
    let initialize_full = client.initialize_ix(InitializeParams {
        creators: Some(vec![
            Creator {
                address: Pubkey::new_from_array([5u8; 32]),
                verified: true,
                share: 70,
            },
            Creator {
                address: Pubkey::new_from_array([6u8; 32]),
                verified: false,
                share: 30,
            },
        ]),
        collection: Some(Collection {
            key: Pubkey::new_from_array([8u8; 32]),
            verified: true,
        }),
        uses: Some(Uses {
            use_method: UseMethod::Multiple,
            remaining: 5,
            total: 10,
        }),
        ..base
    })?;

    let update_name = client.update_field_ix(UpdateFieldParams {
        metadata,
        update_authority,
        field: Field::Name,
        value: "New".into(),
    })?;
    let update_key = client.update_field_ix(UpdateFieldParams {
        metadata,
        update_authority,
        field: Field::Key("color".into()),
        value: "blue".into(),
    })?;
    let remove_key = client.remove_key_ix(RemoveKeyParams {
        metadata,
        update_authority,
        key: "my-key".into(),
        idempotent: true,
    })?;
    let transfer = client.update_authority_ix(UpdateAuthorityParams {
        metadata,
        old_authority: update_authority,
        new_authority: Some(new_auth),
    })?;
    let clear = client.update_authority_ix(UpdateAuthorityParams {
        metadata,
        old_authority: update_authority,
        new_authority: None,
    })?;
    let emit = client.emit_ix(EmitParams {
        metadata,
        start: Some(5),
        end: None,
    })?;

    let fixtures = json!({
        "Initialize": hex::encode(&initialize.data),
        "InitializeFull": hex::encode(&initialize_full.data),
        "UpdateFieldName": hex::encode(&update_name.data),
        "UpdateFieldKey": hex::encode(&update_key.data),
        "RemoveKey": hex::encode(&remove_key.data),
        "UpdateAuthority": hex::encode(&transfer.data),
        "UpdateAuthorityNone": hex::encode(&clear.data),
        "Emit": hex::encode(&emit.data),
        "ProgramId": bs58::encode(program_id.to_bytes()).into_string(),
        "SentinelAuthority": bs58::encode(SENTINEL_AUTHORITY.to_bytes()).into_string(),
        "InitializeFullSigners": initialize_full
            .accounts
            .iter()
            .filter(|meta| meta.is_signer)
            .map(|meta| hex::encode(meta.pubkey.to_bytes()))
            .collect::<Vec<_>>(),
    });

    let out_dir = std::env::var("OUT_FIXTURES_DIR").unwrap_or_else(|_| "fixtures".to_string());
    std::fs::create_dir_all(&out_dir).context("create fixtures dir")?;
    let path = format!("{}/metadata_instructions.json", out_dir);
    std::fs::write(&path, serde_json::to_vec_pretty(&fixtures)?)
        .with_context(|| format!("write {}", path))?;

    println!("wrote fixtures to {}", path);
    Ok(())
}
