use crate::*;
use bitshuffle_core::{decode, Algorithm, CodecError, Status};

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn hello_packets() -> Vec<String> {
    let packets = encode_with(b"hello world", Algorithm::Bz2, 8);
    assert!(packets.len() >= 3, "need several packets, got {}", packets.len());
    packets
}

#[test]
fn corrupted_chunk_checksum_still_decodes_ok() {
    let mut packets = hello_packets();
    let mut f = fields(&packets[1]);
    f[6] = "0".repeat(64);
    packets[1] = render(&f);

    let decoded = decode(&packets.join("\n")).unwrap();
    assert_eq!(decoded.payload, b"hello world");
    assert!(decoded.ok, "file checksum vouches for the payload");
    assert_eq!(decoded.report.chunk_mismatches, 1);
    assert_eq!(decoded.report.file_checksum_ok, Some(true));
}

#[test]
fn corrupted_chunk_data_never_decodes_ok() {
    for victim in 0..hello_packets().len() {
        let mut packets = hello_packets();
        let mut f = fields(&packets[victim]);
        // Flip the top bit of the chunk's first byte.
        let first = f[7].as_bytes()[0];
        let index = BASE64_ALPHABET.iter().position(|&c| c == first).unwrap();
        let flipped = BASE64_ALPHABET[(index + 32) % 64] as char;
        f[7].replace_range(0..1, &flipped.to_string());
        packets[victim] = render(&f);

        match decode(&packets.join("\n")) {
            Ok(decoded) => {
                assert!(!decoded.ok, "victim {victim}");
                assert_ne!(decoded.payload, b"hello world");
                assert_eq!(decoded.status(), Status::BadFileChecksum);
            }
            Err(CodecError::Compression(_)) => {}
            Err(other) => panic!("victim {victim}: unexpected error {other}"),
        }
    }
}

#[test]
fn swapped_packets_are_dropped_and_never_ok() {
    let mut packets = encode_with(&noise(4000), Algorithm::Gzip, 256);
    assert!(packets.len() >= 4);
    packets.swap(1, 2);

    match decode(&packets.join("\n")) {
        Ok(decoded) => {
            assert!(!decoded.ok);
            assert_eq!(decoded.report.sequence_mismatches, 2);
        }
        Err(CodecError::Compression(_)) => {}
        Err(other) => panic!("unexpected error {other}"),
    }
}

#[test]
fn swapping_first_two_of_two_leaves_nothing_usable() {
    let mut packets = encode_with(b"hello world", Algorithm::Gzip, 20);
    assert_eq!(packets.len(), 2);
    packets.swap(0, 1);

    let err = decode(&packets.join("\n")).unwrap_err();
    assert_eq!(err.status(), Status::InvalidPacket);
}

#[test]
fn lost_interior_packet_is_not_ok() {
    let mut packets = encode_with(&noise(4000), Algorithm::Bz2, 256);
    assert!(packets.len() >= 3);
    packets.remove(1);

    match decode(&packets.join("\n")) {
        Ok(decoded) => assert!(!decoded.ok),
        Err(CodecError::Compression(_)) => {}
        Err(other) => panic!("unexpected error {other}"),
    }
}

#[test]
fn lost_last_packet_is_not_ok() {
    let mut packets = encode_with(&noise(4000), Algorithm::Gzip, 256);
    packets.pop();

    match decode(&packets.join("\n")) {
        Ok(decoded) => {
            assert!(!decoded.ok);
            assert!(!decoded.report.complete());
        }
        Err(CodecError::Compression(_)) => {}
        Err(other) => panic!("unexpected error {other}"),
    }
}
