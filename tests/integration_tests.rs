//! End-to-end scenarios across the envelope cipher, key store seam and
//! frame checksum.

use tapgate_crypto::{CryptoError, decrypt, encrypt, ENVELOPE_OVERHEAD};
use tapgate_frame::FrameError;
use tapgate_integration_tests::{Endpoint, frame_envelope, unframe_envelope};

#[test]
fn client_and_device_exchange_ping_pong() {
    let mut client = Endpoint::new("client-identity");
    let mut device = Endpoint::new("device-identity");

    let client_keys = client.identity();
    let device_keys = device.identity();

    // Client -> device
    let request = encrypt(b"ping", device_keys.public()).unwrap();
    assert_eq!(request.len(), 4 + ENVELOPE_OVERHEAD);
    let received = decrypt(&request, device_keys.private()).unwrap();
    assert_eq!(received, b"ping");

    // Device -> client
    let reply = encrypt(b"pong", client_keys.public()).unwrap();
    assert_eq!(decrypt(&reply, client_keys.private()).unwrap(), b"pong");
}

#[test]
fn framed_transport_round_trip() {
    let mut device = Endpoint::new("device-identity");
    let device_keys = device.identity();

    let envelope = encrypt(b"unlock front gate", device_keys.public()).unwrap();
    let frame = frame_envelope(&envelope);

    // The receiving transport checks the trailer before touching crypto
    let received = unframe_envelope(&frame).unwrap();
    assert_eq!(received, envelope.as_slice());
    assert_eq!(
        decrypt(received, device_keys.private()).unwrap(),
        b"unlock front gate"
    );
}

#[test]
fn frame_corruption_is_caught_before_decryption() {
    let mut device = Endpoint::new("device-identity");
    let device_keys = device.identity();

    let envelope = encrypt(b"unlock front gate", device_keys.public()).unwrap();
    let mut frame = frame_envelope(&envelope);
    frame[10] ^= 0x04;

    assert!(matches!(
        unframe_envelope(&frame),
        Err(FrameError::ChecksumMismatch { .. })
    ));
}

#[test]
fn identity_survives_reconnection() {
    let mut device = Endpoint::new("device-identity");
    let before = device.identity();

    // A payload encrypted before the "reconnect"...
    let envelope = encrypt(b"queued command", before.public()).unwrap();

    // ...still decrypts with the identity reloaded from the store.
    let after = device.identity();
    assert_eq!(before.public(), after.public());
    assert_eq!(
        decrypt(&envelope, after.private()).unwrap(),
        b"queued command"
    );
}

#[test]
fn envelope_for_one_device_is_opaque_to_another() {
    let mut gate_a = Endpoint::new("gate-a");
    let mut gate_b = Endpoint::new("gate-b");

    let keys_a = gate_a.identity();
    let keys_b = gate_b.identity();

    let envelope = encrypt(b"open", keys_a.public()).unwrap();
    assert!(matches!(
        decrypt(&envelope, keys_b.private()),
        Err(CryptoError::AuthenticationFailed)
    ));
}

#[test]
fn large_payload_round_trips() {
    let mut device = Endpoint::new("device-identity");
    let device_keys = device.identity();

    let firmware_chunk: Vec<u8> = (0..16 * 1024).map(|i| (i % 251) as u8).collect();
    let envelope = encrypt(&firmware_chunk, device_keys.public()).unwrap();
    assert_eq!(envelope.len(), firmware_chunk.len() + ENVELOPE_OVERHEAD);
    assert_eq!(
        decrypt(&envelope, device_keys.private()).unwrap(),
        firmware_chunk
    );
}
