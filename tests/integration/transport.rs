use crate::*;
use bitshuffle_core::{decode, Algorithm, EncodeConfig};

#[test]
fn survives_hard_line_wrapping() {
    let data = noise(1500);
    let packets = encode_with(&data, Algorithm::Bz2, 200);
    let text: String = packets.iter().map(|p| wrap(p, 72) + "\r\n\r\n").collect();
    assert!(text.lines().all(|line| line.len() <= 72));

    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.payload, data);
    assert!(decoded.ok);
}

#[test]
fn survives_indentation_and_tabs() {
    let packets = encode_with(b"indented transfer", Algorithm::Gzip, 10);
    let text: String = packets
        .iter()
        .map(|p| format!("    {}\n\t\n", wrap(p, 30).replace("\r\n", "\n    \t")))
        .collect();

    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.payload, b"indented transfer");
    assert!(decoded.ok);
}

#[test]
fn ignores_chat_noise_between_packets() {
    let packets = encode_with(b"meet at the usual place", Algorithm::Bz2, 16);
    let mut text = String::from("[10:01] alice: sending the file now\n");
    for (i, packet) in packets.iter().enumerate() {
        text.push_str(&format!("[10:0{}] alice: {packet}\n", i % 10));
        text.push_str("[10:02] bob: got it (<< nice >>)\n");
    }
    text.push_str("[10:03] bob: thanks!\n");

    let decoded = decode(&text).unwrap();
    assert_eq!(decoded.payload, b"meet at the usual place");
    assert!(decoded.ok);
    assert_eq!(decoded.report.extracted, packets.len());
}

#[test]
fn message_whitespace_is_lost_but_harmless() {
    let config = EncodeConfig {
        message: "sent with love".into(),
        chunk_size: 8,
        ..EncodeConfig::default()
    };
    let packets = bitshuffle_core::encode(b"payload", &config).unwrap();
    assert!(packets[0].starts_with("((<<sent with love|"));

    let decoded = decode(&packets.join(" ")).unwrap();
    assert_eq!(decoded.payload, b"payload");
    assert!(decoded.ok);
}

#[test]
fn packets_are_ascii_and_single_line() {
    for packet in encode_with(&noise(800), Algorithm::Gzip, 64) {
        assert!(packet.is_ascii());
        assert!(!packet.contains('\n'));
        assert!(packet.starts_with("((<<") && packet.ends_with(">>))"));
    }
}
