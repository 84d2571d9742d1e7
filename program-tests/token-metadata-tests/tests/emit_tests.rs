use token_metadata_interface::instruction::{Emit, MetadataInstruction, EMIT_DISCRIMINATOR};
use token_metadata_sdk::EmitParams;
use token_metadata_tests::{client, decode, metas, payload, METADATA};

fn emit(start: Option<u64>, end: Option<u64>) -> EmitParams {
    EmitParams {
        metadata: METADATA,
        start,
        end,
    }
}

#[test]
fn emit_start_only() {
    let ix = client().emit_ix(emit(Some(5), None)).unwrap();
    assert_eq!(&ix.data[..8], &EMIT_DISCRIMINATOR);
    assert_eq!(payload(&ix), &[1, 5, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn emit_whole_record() {
    let ix = client().emit_ix(emit(None, None)).unwrap();
    assert_eq!(payload(&ix), &[0, 0]);
}

#[test]
fn emit_end_only() {
    let ix = client().emit_ix(emit(None, Some(u64::MAX))).unwrap();
    assert_eq!(payload(&ix), &[0, 1, 255, 255, 255, 255, 255, 255, 255, 255]);
}

#[test]
fn emit_metadata_is_readonly() {
    let ix = client().emit_ix(emit(None, None)).unwrap();
    assert_eq!(metas(&ix), vec![(METADATA, false, false)]);
}

#[test]
fn emit_options_round_trip_independently() {
    for (start, end) in [(None, None), (Some(0), None), (None, Some(0)), (Some(3), Some(64))] {
        let ix = client().emit_ix(emit(start, end)).unwrap();
        assert_eq!(
            decode(&ix),
            MetadataInstruction::Emit(Emit { start, end }),
            "start={start:?} end={end:?}"
        );
    }
}
