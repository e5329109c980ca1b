//! WebAssembly bindings for `walletseal_core`.
//!
//! Exposes key derivation and payload encryption to browser code through
//! `wasm-bindgen`. The wallet is reached through a JavaScript callback, for
//! instance one wrapping `window.ethereum.request({ method: "personal_sign" })`.
//! Derived keys stay in WASM memory; JavaScript only holds opaque handles.

#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::str::FromStr;

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use walletseal_core::{
    cipher, DerivationConfig, DigestInput, ErrorKind, KeyDeriver, OperationError,
    SymmetricKey as CoreSymmetricKey,
};

/// Opaque handle to a derived key.
#[wasm_bindgen]
pub struct SymmetricKey(CoreSymmetricKey);

#[wasm_bindgen]
impl SymmetricKey {
    /// Non-secret identifier of the key.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.0.fingerprint()
    }

    /// Name of the cipher the key is bound to (`AES-CTR`).
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn algorithm(&self) -> String {
        self.0.algorithm().name().to_string()
    }
}

/// Returns the `0x`-prefixed hex message the wallet signs.
#[wasm_bindgen(js_name = signingMessage)]
#[must_use]
pub fn signing_message() -> String {
    KeyDeriver::default().signing_message()
}

/// Derives the encryption key of `account`.
///
/// `sign` is called as `sign(messageHex, account)` and must return the
/// signature hex (or a promise of it).
///
/// # Errors
/// Returns a rejected promise carrying `{ message, kind, trace }` when the
/// signer fails or its output cannot be turned into a key.
#[wasm_bindgen(js_name = deriveKey)]
#[must_use]
pub fn derive_key(account: String, sign: Function, digest_input: Option<String>) -> Promise {
    future_to_promise(async move {
        let deriver = deriver_for(digest_input.as_deref())
            .map_err(|trace| key_generation_error(ErrorKind::Signing, trace))?;
        let signature = request_signature(&sign, &deriver.signing_message(), &account)
            .await
            .map_err(|trace| key_generation_error(ErrorKind::Signing, trace))?;
        deriver
            .key_from_signature(&signature)
            .map(|key| JsValue::from(SymmetricKey(key)))
            .map_err(|err| operation_error_to_jsvalue(&err))
    })
}

/// Encrypts `plaintext` into a `<nonce-hex>:<ciphertext-hex>` envelope.
///
/// # Errors
/// Throws `{ message, kind, trace }` on failure.
#[wasm_bindgen]
pub fn encrypt(key: &SymmetricKey, plaintext: &str) -> Result<String, JsValue> {
    cipher::encrypt(&key.0, plaintext).map_err(|err| operation_error_to_jsvalue(&err))
}

/// Decrypts an envelope produced by [`encrypt`].
///
/// # Errors
/// Throws `{ message, kind, trace }` on failure.
#[wasm_bindgen]
pub fn decrypt(key: &SymmetricKey, envelope: &str) -> Result<String, JsValue> {
    cipher::decrypt(&key.0, envelope).map_err(|err| operation_error_to_jsvalue(&err))
}

fn deriver_for(digest_input: Option<&str>) -> Result<KeyDeriver, String> {
    let config = DerivationConfig::default();
    let config = match digest_input {
        Some(value) => {
            let digest_input = DigestInput::from_str(value)
                .map_err(|_| format!("unknown digest input: {value}"))?;
            config.with_digest_input(digest_input)
        }
        None => config,
    };
    Ok(KeyDeriver::new(config))
}

async fn request_signature(
    sign: &Function,
    message_hex: &str,
    account: &str,
) -> Result<String, String> {
    let returned = sign
        .call2(
            &JsValue::NULL,
            &JsValue::from_str(message_hex),
            &JsValue::from_str(account),
        )
        .map_err(|err| describe(&err))?;
    let resolved = JsFuture::from(Promise::resolve(&returned))
        .await
        .map_err(|err| describe(&err))?;
    resolved
        .as_string()
        .ok_or_else(|| "signer did not resolve to a string".to_string())
}

fn describe(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

fn key_generation_error(kind: ErrorKind, trace: String) -> JsValue {
    operation_error_to_jsvalue(&OperationError::KeyGeneration {
        kind,
        trace: Some(trace),
    })
}

fn operation_error_to_jsvalue(error: &OperationError) -> JsValue {
    let object = Object::new();
    let fields = [
        ("message", JsValue::from_str(&error.message())),
        ("kind", JsValue::from_str(&error.kind().to_string())),
        (
            "trace",
            error.trace().map_or(JsValue::UNDEFINED, JsValue::from_str),
        ),
    ];
    for (name, value) in fields {
        if Reflect::set(&object, &JsValue::from_str(name), &value).is_err() {
            return JsValue::from_str(&error.message());
        }
    }
    object.into()
}

#[wasm_bindgen(typescript_custom_section)]
const TYPESCRIPT_DEFS: &str = r#"
export type PersonalSign = (messageHex: string, account: string) => string | Promise<string>;

export type DigestInput = "signature-bytes" | "signature-text";

export interface OperationError {
    message: "Error generating the key" | "Error encrypting the data" | "Error decrypting the data";
    kind: "signing" | "crypto_unavailable" | "decode";
    trace?: string;
}
"#;
