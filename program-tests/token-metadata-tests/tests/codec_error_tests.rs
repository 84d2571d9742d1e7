use token_metadata_interface::{
    error::MetadataError,
    instruction::{MetadataInstruction, EMIT_DISCRIMINATOR, INITIALIZE_DISCRIMINATOR},
    pubkey_from_slice,
};
use token_metadata_interface::state::Field;
use token_metadata_sdk::{
    EmitParams, RemoveKeyParams, TxInitializeWithAdditionalMetadataParams,
    TxTransferAuthorityThenUpdateFieldParams, TxUpdateFieldsParams, UpdateAuthorityParams,
    UpdateFieldParams,
};
use token_metadata_tests::{
    client, full_initialize_params, initialize_params, key, METADATA, UPDATE_AUTHORITY,
};

#[test]
fn short_key_is_rejected_with_field_name() {
    let err = pubkey_from_slice("update_authority", &[1u8; 20]).unwrap_err();
    assert_eq!(
        err,
        MetadataError::InvalidPubkeyLength {
            field: "update_authority",
            len: 20
        }
    );
    assert_eq!(
        err.to_string(),
        "update_authority: public key must be 32 bytes, got 20"
    );
}

#[test]
fn decode_reports_instruction_on_bad_payload() {
    // Initialize discriminator followed by a string prefix that overruns the input
    let mut data = INITIALIZE_DISCRIMINATOR.to_vec();
    data.extend([0xff, 0xff, 0, 0, b'a']);
    assert_eq!(
        MetadataInstruction::unpack(&data),
        Err(MetadataError::InvalidInstructionData {
            instruction: "Initialize"
        })
    );
}

#[test]
fn decode_rejects_invalid_option_flag() {
    let mut data = EMIT_DISCRIMINATOR.to_vec();
    data.extend([2, 0]);
    assert!(MetadataInstruction::unpack(&data).is_err());
}

#[test]
fn decode_rejects_unknown_discriminator() {
    let data = [9u8; 16];
    assert_eq!(
        MetadataInstruction::unpack(&data),
        Err(MetadataError::UnknownDiscriminator([9u8; 8]))
    );
}

#[test]
fn every_builder_output_decodes() -> anyhow::Result<()> {
    let client = client();
    let mut ixs = vec![
        client.initialize_ix(initialize_params())?,
        client.initialize_ix(full_initialize_params())?,
        client.update_field_ix(UpdateFieldParams {
            metadata: METADATA,
            update_authority: UPDATE_AUTHORITY,
            field: Field::Key("color".into()),
            value: "blue".into(),
        })?,
        client.remove_key_ix(RemoveKeyParams {
            metadata: METADATA,
            update_authority: UPDATE_AUTHORITY,
            key: "color".into(),
            idempotent: true,
        })?,
        client.update_authority_ix(UpdateAuthorityParams {
            metadata: METADATA,
            old_authority: UPDATE_AUTHORITY,
            new_authority: None,
        })?,
        client.emit_ix(EmitParams {
            metadata: METADATA,
            start: Some(1),
            end: Some(2),
        })?,
    ];
    ixs.extend(client.initialize_with_additional_metadata_tx(
        TxInitializeWithAdditionalMetadataParams {
            initialize: full_initialize_params(),
            additional_metadata: vec![("series".into(), "alpha".into())],
        },
    )?);
    ixs.extend(client.update_fields_tx(TxUpdateFieldsParams {
        metadata: METADATA,
        update_authority: UPDATE_AUTHORITY,
        fields: vec![(Field::Name, "A".into()), (Field::Uri, "B".into())],
    })?);
    ixs.extend(client.transfer_authority_then_update_field_tx(
        TxTransferAuthorityThenUpdateFieldParams {
            metadata: METADATA,
            current_update_authority: UPDATE_AUTHORITY,
            new_authority: key(42),
            field: Field::Symbol,
            value: "NEW".into(),
        },
    )?);

    assert_eq!(ixs.len(), 13);
    for ix in &ixs {
        let decoded = MetadataInstruction::unpack(&ix.data)?;
        assert_eq!(decoded.discriminator(), ix.data[..8], "{}", decoded.name());
        assert_eq!(decoded.pack()?, ix.data, "{}", decoded.name());
    }
    Ok(())
}
