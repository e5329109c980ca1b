//! End-to-end key derivation and payload encryption against mock wallets.

mod common;

use std::sync::Arc;

use common::{MockWallet, RejectingWallet, ACCOUNT, FIXED_SIGNATURE, GOLDEN_ENVELOPE};
use test_case::test_case;
use walletseal_core::{
    cipher, CipherEnvelope, DerivationConfig, DigestInput, EncryptionSession, ErrorKind,
    KeyDeriver, OperationError, NONCE_LEN,
};

#[tokio::test]
async fn test_golden_scenario() {
    let wallet = MockWallet::default();
    let key = KeyDeriver::default()
        .derive(ACCOUNT, &wallet)
        .await
        .expect("derive");

    let envelope =
        cipher::encrypt_with_nonce(&key, "hello world", [0; NONCE_LEN]).expect("encrypt");
    assert_eq!(envelope, GOLDEN_ENVELOPE);
    assert_eq!(
        cipher::decrypt(&key, GOLDEN_ENVELOPE).expect("decrypt"),
        "hello world"
    );
    assert_eq!(wallet.sign_requests(), 1);
}

#[tokio::test]
async fn test_derivation_is_deterministic_across_calls() {
    let wallet = MockWallet::default();
    let deriver = KeyDeriver::default();
    let first = deriver.derive(ACCOUNT, &wallet).await.expect("derive");
    let second = deriver.derive(ACCOUNT, &wallet).await.expect("derive");

    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
    let nonce = [0x5A; NONCE_LEN];
    assert_eq!(
        cipher::encrypt_with_nonce(&first, "same", nonce).expect("encrypt"),
        cipher::encrypt_with_nonce(&second, "same", nonce).expect("encrypt")
    );
    assert_eq!(wallet.sign_requests(), 2);
}

#[tokio::test]
async fn test_envelope_decrypts_in_a_later_session() {
    let deriver = KeyDeriver::default();
    let wallet = MockWallet::default();
    let writer = EncryptionSession::connect(&wallet, &wallet, &deriver)
        .await
        .expect("connect");
    let envelope = writer.encrypt("persisted note").expect("encrypt");
    drop(writer);

    let wallet = MockWallet::default();
    let reader = EncryptionSession::connect(&wallet, &wallet, &deriver)
        .await
        .expect("connect");
    assert_eq!(reader.account(), ACCOUNT);
    assert_eq!(
        reader.decrypt(&envelope).expect("decrypt"),
        "persisted note"
    );
}

#[tokio::test]
async fn test_other_account_cannot_decrypt() {
    let deriver = KeyDeriver::default();
    let alice = deriver
        .derive(ACCOUNT, &MockWallet::default())
        .await
        .expect("derive");
    let bob = deriver
        .derive(ACCOUNT, &MockWallet::new(&format!("0x{}", "11".repeat(65))))
        .await
        .expect("derive");
    assert_ne!(alice, bob);

    let envelope = cipher::encrypt(&alice, "for alice only, not for bob").expect("encrypt");
    match cipher::decrypt(&bob, &envelope) {
        Ok(recovered) => assert_ne!(recovered, "for alice only, not for bob"),
        Err(err) => assert_eq!(err.kind(), ErrorKind::Decode),
    }
}

#[tokio::test]
async fn test_text_digest_yields_a_different_key() {
    let wallet = MockWallet::default();
    let bytes_key = KeyDeriver::default()
        .derive(ACCOUNT, &wallet)
        .await
        .expect("derive");
    let text_key = KeyDeriver::new(
        DerivationConfig::default().with_digest_input(DigestInput::SignatureText),
    )
    .derive(ACCOUNT, &wallet)
    .await
    .expect("derive");
    assert_ne!(bytes_key, text_key);

    let envelope =
        cipher::encrypt_with_nonce(&text_key, "hello world", [0; NONCE_LEN]).expect("encrypt");
    assert_eq!(
        envelope,
        "00000000000000000000000000000000:ac40e363292273317d3217"
    );
}

#[tokio::test]
async fn test_connect_without_accounts() {
    let wallet = MockWallet::without_accounts();
    let err = EncryptionSession::connect(&wallet, &wallet, &KeyDeriver::default())
        .await
        .expect_err("no account");
    assert_eq!(err.message(), "Error generating the key");
    assert_eq!(err.kind(), ErrorKind::Signing);
    assert_eq!(err.trace(), Some("no wallet account available"));
    assert_eq!(wallet.sign_requests(), 0);
}

#[tokio::test]
async fn test_rejected_prompts_surface_as_signing_errors() {
    let deriver = KeyDeriver::default();
    let err = EncryptionSession::connect(&RejectingWallet, &RejectingWallet, &deriver)
        .await
        .expect_err("rejected");
    assert!(matches!(
        err,
        OperationError::KeyGeneration {
            kind: ErrorKind::Signing,
            ..
        }
    ));

    let err = deriver
        .derive(ACCOUNT, &RejectingWallet)
        .await
        .expect_err("rejected");
    assert_eq!(err.to_string(), "Error generating the key");
    assert_eq!(
        err.trace(),
        Some("user rejected the request: User denied message signature.")
    );
}

#[tokio::test]
async fn test_account_mismatch_is_reported() {
    let err = KeyDeriver::default()
        .derive("0xdef", &MockWallet::default())
        .await
        .expect_err("mismatch");
    assert_eq!(err.kind(), ErrorKind::Signing);
    assert_eq!(err.trace(), Some("account mismatch: 0xdef"));
}

#[tokio::test]
async fn test_empty_signature_is_a_signing_error() {
    let err = KeyDeriver::default()
        .derive(ACCOUNT, &MockWallet::new(""))
        .await
        .expect_err("empty signature");
    assert_eq!(err.kind(), ErrorKind::Signing);
    assert_eq!(err.trace(), Some("malformed signature: empty signature"));
}

#[test_case("not-a-valid-envelope" ; "missing separator")]
#[test_case("zz:zz" ; "invalid hex")]
#[test_case("0000:00" ; "short nonce")]
fn test_malformed_envelope_rejection(envelope: &str) {
    let key = KeyDeriver::default()
        .key_from_signature(FIXED_SIGNATURE)
        .expect("key");
    let err = cipher::decrypt(&key, envelope).expect_err("malformed");
    assert_eq!(err.message(), "Error decrypting the data");
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.trace().is_some());
}

#[test]
fn test_envelope_parts() {
    let envelope: CipherEnvelope = GOLDEN_ENVELOPE.parse().expect("parse");
    assert_eq!(envelope.nonce(), &[0; NONCE_LEN]);
    assert_eq!(envelope.ciphertext().len(), "hello world".len());
    assert_eq!(envelope.to_string(), GOLDEN_ENVELOPE);
}

#[tokio::test]
async fn test_concurrent_encryptions_share_a_session() {
    let wallet = MockWallet::default();
    let session = EncryptionSession::connect(&wallet, &wallet, &KeyDeriver::default())
        .await
        .expect("connect");
    let session = Arc::new(session);

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                let plaintext = format!("payload {i}");
                let envelope = session.encrypt(&plaintext).expect("encrypt");
                (plaintext, envelope)
            })
        })
        .collect();

    let mut nonces = std::collections::HashSet::new();
    for handle in handles {
        let (plaintext, envelope) = handle.await.expect("join");
        assert_eq!(session.decrypt(&envelope).expect("decrypt"), plaintext);
        let parsed: CipherEnvelope = envelope.parse().expect("parse");
        assert!(nonces.insert(*parsed.nonce()));
    }
}
