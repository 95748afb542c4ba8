use fsplit_core::error::SplitError;
use fsplit_core::manifest::{Checksum, ChecksumAlgo, FileEntry, Manifest};
use proptest::prelude::*;

#[test]
fn hex_encoding_is_lowercase_no_separators() {
    let chk = Checksum::new(vec![0x00, 0x1f, 0xab, 0xff]);
    assert_eq!(chk.to_hex(), "001fabff");
}

#[test]
fn hex_decoding_accepts_uppercase() {
    let chk = Checksum::from_hex("001FABFF").unwrap();
    assert_eq!(chk.as_bytes(), &[0x00, 0x1f, 0xab, 0xff]);
}

#[test]
fn empty_checksum_round_trips_as_empty_string() {
    let chk = Checksum::default();
    assert_eq!(chk.to_hex(), "");
    assert_eq!(Checksum::from_hex("").unwrap(), chk);
}

#[test]
fn odd_length_hex_is_malformed() {
    let err = Checksum::from_hex("abc").unwrap_err();
    assert!(matches!(err, SplitError::MalformedChecksum(_)));
}

#[test]
fn non_hex_characters_are_malformed() {
    let err = Checksum::from_hex("zz00").unwrap_err();
    assert!(matches!(err, SplitError::MalformedChecksum(_)));
}

proptest! {
    #[test]
    fn hex_round_trips_for_any_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let chk = Checksum::new(bytes.clone());
        let decoded = Checksum::from_hex(&chk.to_hex()).unwrap();
        prop_assert_eq!(decoded.as_bytes(), bytes.as_slice());
    }
}

#[test]
fn algo_parses_case_insensitively() {
    assert_eq!("CRC32".parse::<ChecksumAlgo>().unwrap(), ChecksumAlgo::Crc32);
    assert_eq!("crc32".parse::<ChecksumAlgo>().unwrap(), ChecksumAlgo::Crc32);
    assert_eq!("None".parse::<ChecksumAlgo>().unwrap(), ChecksumAlgo::None);
    assert_eq!("none".parse::<ChecksumAlgo>().unwrap(), ChecksumAlgo::None);
    let err = "md5".parse::<ChecksumAlgo>().unwrap_err();
    assert!(matches!(err, SplitError::UnsupportedAlgo(_)));
}

#[test]
fn manifest_json_shape_is_stable() {
    let manifest = Manifest {
        checksum_algo: ChecksumAlgo::Crc32,
        main_file: FileEntry {
            filename: "data.bin".to_string(),
            checksum: Checksum::new(vec![0xde, 0xad, 0xbe, 0xef]),
            size: 250,
        },
        chunks: vec![FileEntry {
            filename: "data.bin.split-000".to_string(),
            checksum: Checksum::new(vec![0x01, 0x02, 0x03, 0x04]),
            size: 100,
        }],
    };

    let json = serde_json::to_value(&manifest).unwrap();
    assert_eq!(json["checksum_algo"], "CRC32");
    assert_eq!(json["main_file"]["filename"], "data.bin");
    assert_eq!(json["main_file"]["checksum"], "deadbeef");
    assert_eq!(json["main_file"]["size"], 250);
    assert_eq!(json["chunks"][0]["filename"], "data.bin.split-000");
    assert_eq!(json["chunks"][0]["checksum"], "01020304");
    assert_eq!(json["chunks"][0]["size"], 100);

    // Round trip preserves everything
    let text = serde_json::to_string_pretty(&manifest).unwrap();
    let back: Manifest = serde_json::from_str(&text).unwrap();
    assert_eq!(back.checksum_algo, manifest.checksum_algo);
    assert_eq!(back.main_file.checksum, manifest.main_file.checksum);
    assert_eq!(back.chunks[0].filename, manifest.chunks[0].filename);
    assert_eq!(back.chunks[0].size, manifest.chunks[0].size);
}

#[test]
fn unknown_algo_in_manifest_fails_decode() {
    let text = r#"{
        "checksum_algo": "MD5",
        "main_file": { "filename": "x", "checksum": "", "size": 0 },
        "chunks": []
    }"#;
    assert!(serde_json::from_str::<Manifest>(text).is_err());
}

#[test]
fn malformed_checksum_text_in_manifest_fails_decode() {
    let text = r#"{
        "checksum_algo": "CRC32",
        "main_file": { "filename": "x", "checksum": "abc", "size": 0 },
        "chunks": []
    }"#;
    let err = serde_json::from_str::<Manifest>(text).unwrap_err();
    assert!(err.to_string().contains("malformed checksum text"));
}
