use crate::*;
use bitshuffle_core::{decode, Algorithm, CodecError, FormatError};
use proptest::prelude::*;

#[test]
fn round_trip_both_algorithms_many_chunk_sizes() {
    let data = noise(3000);
    for algorithm in [Algorithm::Bz2, Algorithm::Gzip] {
        for chunk_size in [1, 7, 64, 2048, 100_000] {
            let packets = encode_with(&data, algorithm, chunk_size);
            let decoded = decode(&packets.join("\n\n")).unwrap();
            assert_eq!(decoded.payload, data, "{algorithm} / {chunk_size}");
            assert!(decoded.ok, "{algorithm} / {chunk_size}");
            assert_eq!(decoded.report.used, packets.len());
        }
    }
}

#[test]
fn empty_payload_is_one_packet_and_round_trips() {
    for algorithm in [Algorithm::Bz2, Algorithm::Gzip] {
        let packets = encode_with(b"", algorithm, 16);
        assert_eq!(packets.len(), 1);

        let f = fields(&packets[0]);
        assert_eq!(f.len(), 9, "single packet carries the file checksum");
        assert_eq!(f[4], "0");
        assert_eq!(f[5], "0");

        let (payload, ok) = decode(&packets[0]).unwrap().into_parts();
        assert!(payload.is_empty());
        assert!(ok);
    }
}

#[test]
fn packet_count_follows_compressed_length() {
    let data = noise(5000);
    let compressed = Algorithm::Bz2.compress(&data, 5).unwrap();
    for chunk_size in [100, 333, 1024] {
        let packets = encode_with(&data, Algorithm::Bz2, chunk_size);
        assert_eq!(packets.len(), compressed.len().div_ceil(chunk_size));
    }
}

#[test]
fn plain_text_without_packets_is_a_format_error() {
    assert!(matches!(
        decode("no packets here"),
        Err(CodecError::Format(FormatError::NoPackets))
    ));
    assert!(matches!(decode(""), Err(CodecError::Format(FormatError::NoPackets))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn any_buffer_round_trips(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        chunk_size in 1usize..300,
        gzip in any::<bool>()
    ) {
        let algorithm = if gzip { Algorithm::Gzip } else { Algorithm::Bz2 };
        let packets = encode_with(&data, algorithm, chunk_size);
        let decoded = decode(&packets.concat()).unwrap();
        prop_assert!(decoded.ok);
        prop_assert_eq!(decoded.payload, data);
    }
}
