//! Truncation tests: every strict prefix of a valid buffer must fail.

mod common;

use mlod::prelude::*;

fn assert_all_prefixes_truncated(bytes: &[u8]) {
    for k in 0..bytes.len() {
        match decode(&bytes[..k]) {
            Ok(_) => panic!("prefix of length {} of {} decoded", k, bytes.len()),
            Err(Error::TruncatedInput { path, offset }) => {
                assert!(path.starts_with("Document."), "bad path {path:?} at prefix {k}");
                assert!(offset <= k, "offset {offset} past prefix {k}");
            }
            Err(other) => panic!("unexpected error at prefix {k}: {other}"),
        }
    }
}

#[test]
fn test_minimal_document_prefixes() {
    let bytes = common::minimal_document_bytes();
    assert_all_prefixes_truncated(&bytes);
    assert!(decode(&bytes).is_ok());
}

#[test]
fn test_sample_document_prefixes() {
    let bytes = encode(&common::sample_document());
    assert_all_prefixes_truncated(&bytes);
}

#[test]
fn test_truncated_paths() {
    let bytes = encode(&Document::new(vec![common::visual_lod()]));

    let err = decode(&bytes[..2]).unwrap_err();
    assert_eq!(err.path(), Some("Document.header.signature"));

    let err = decode(&bytes[..bytes.len() - 2]).unwrap_err();
    assert_eq!(err.path(), Some("Document.lods[0].resolution"));

    // Header (12) + LOD fields (28) + 4 points (64) + 2 normals (24) + first
    // face's type (4) + 2 bytes of its first vertex.
    let err = decode(&bytes[..12 + 28 + 64 + 24 + 4 + 2]).unwrap_err();
    assert_eq!(err.path(), Some("Document.lods[0].faces[0].vertices[0].point_index"));
}

#[test]
fn test_missing_nul_is_truncation() {
    let err = <ZString as Record>::from_bytes(b"abc").unwrap_err();
    assert!(err.is_truncated());
    assert_eq!(<ZString as Record>::from_bytes(b"\0").unwrap(), ZString::default());
}

#[test]
fn test_unterminated_tag_stream() {
    let mut lod = Lod::default();
    lod.tags = vec![Tag::new("#Selected#", vec![0; 4])];
    let bytes = encode(&Document::new(vec![lod]));

    let err = decode(&bytes).unwrap_err();
    assert!(err.is_truncated());
    assert!(err.path().unwrap().starts_with("Document.lods[0].tags[1]"));
}
