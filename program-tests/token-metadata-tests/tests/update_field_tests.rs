use token_metadata_interface::{
    instruction::{MetadataInstruction, UpdateField, UPDATE_FIELD_DISCRIMINATOR},
    state::Field,
};
use token_metadata_sdk::UpdateFieldParams;
use token_metadata_tests::{borsh_str, client, decode, metas, payload, METADATA, UPDATE_AUTHORITY};

fn update(field: Field, value: &str) -> UpdateFieldParams {
    UpdateFieldParams {
        metadata: METADATA,
        update_authority: UPDATE_AUTHORITY,
        field,
        value: value.to_string(),
    }
}

#[test]
fn update_field_accounts() {
    let ix = client().update_field_ix(update(Field::Name, "x")).unwrap();
    assert_eq!(
        metas(&ix),
        vec![(METADATA, false, true), (UPDATE_AUTHORITY, true, false)]
    );
}

#[test]
fn update_well_known_fields_encode_tag_only() {
    for (field, tag) in [(Field::Name, 0u8), (Field::Symbol, 1), (Field::Uri, 2)] {
        let ix = client().update_field_ix(update(field, "new")).unwrap();
        assert_eq!(&ix.data[..8], &UPDATE_FIELD_DISCRIMINATOR);

        let mut expected = vec![tag];
        expected.extend(borsh_str("new"));
        assert_eq!(payload(&ix), expected.as_slice());
    }
}

#[test]
fn update_key_field_encodes_tag_and_key() {
    let ix = client()
        .update_field_ix(update(Field::Key("rarity".into()), "legendary"))
        .unwrap();

    let mut expected = vec![3u8];
    expected.extend(borsh_str("rarity"));
    expected.extend(borsh_str("legendary"));
    assert_eq!(payload(&ix), expected.as_slice());
}

#[test]
fn update_field_round_trip() {
    let ix = client()
        .update_field_ix(update(Field::Key("".into()), ""))
        .unwrap();
    assert_eq!(
        decode(&ix),
        MetadataInstruction::UpdateField(UpdateField {
            field: Field::Key(String::new()),
            value: String::new(),
        })
    );
}

#[test]
fn update_field_hex_fixture() {
    let ix = client().update_field_ix(update(Field::Uri, "ipfs://x")).unwrap();
    assert_eq!(
        hex::encode(&ix.data),
        "dde9312db5cadcc80208000000697066733a2f2f78"
    );
}
