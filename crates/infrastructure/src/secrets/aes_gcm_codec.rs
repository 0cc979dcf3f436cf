//! AES-256-GCM secret codec.
//!
//! Encrypted blobs are laid out as `magic || nonce (12 bytes) || ciphertext`.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use trufos_application::ports::{SecretCodec, SecretCodecError};

const ENCRYPTED_PAYLOAD_MAGIC: &[u8] = b"TRUFOS-SECRETS-V1\0";
const AES_GCM_NONCE_LEN: usize = 12;

/// Length of the key in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// Encrypts secrets files with a 256-bit key held by the caller.
#[derive(Clone)]
pub struct AesGcmSecretCodec {
    key: [u8; SECRET_KEY_LEN],
}

impl std::fmt::Debug for AesGcmSecretCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesGcmSecretCodec").finish_non_exhaustive()
    }
}

impl AesGcmSecretCodec {
    /// Creates a codec from raw key bytes.
    #[must_use]
    pub const fn new(key: [u8; SECRET_KEY_LEN]) -> Self {
        Self { key }
    }

    /// Creates a codec from a base64-encoded key.
    ///
    /// # Errors
    ///
    /// Returns [`SecretCodecError::InvalidKey`] if the text is not base64 or
    /// does not decode to exactly 32 bytes.
    pub fn from_base64(encoded: &str) -> Result<Self, SecretCodecError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| SecretCodecError::InvalidKey(e.to_string()))?;
        let key: [u8; SECRET_KEY_LEN] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            SecretCodecError::InvalidKey(format!(
                "expected {SECRET_KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self::new(key))
    }

    /// Generates a random key, base64-encoded.
    #[must_use]
    pub fn generate_key() -> String {
        let mut key = [0u8; SECRET_KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut key);
        STANDARD.encode(key)
    }

    fn cipher(&self) -> Result<Aes256Gcm, SecretCodecError> {
        Aes256Gcm::new_from_slice(&self.key).map_err(|e| SecretCodecError::InvalidKey(e.to_string()))
    }
}

impl SecretCodec for AesGcmSecretCodec {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, SecretCodecError> {
        let cipher = self.cipher()?;
        let mut nonce = [0u8; AES_GCM_NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce);
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|e| SecretCodecError::Encrypt(format!("AES-GCM encrypt failed: {e}")))?;

        let mut out =
            Vec::with_capacity(ENCRYPTED_PAYLOAD_MAGIC.len() + AES_GCM_NONCE_LEN + ciphertext.len());
        out.extend_from_slice(ENCRYPTED_PAYLOAD_MAGIC);
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, stored: &[u8]) -> Result<Vec<u8>, SecretCodecError> {
        let Some(payload) = stored.strip_prefix(ENCRYPTED_PAYLOAD_MAGIC) else {
            return Err(SecretCodecError::Decrypt(
                "missing secrets file header".to_string(),
            ));
        };
        if payload.len() < AES_GCM_NONCE_LEN {
            return Err(SecretCodecError::Decrypt("truncated secrets file".to_string()));
        }

        let (nonce, ciphertext) = payload.split_at(AES_GCM_NONCE_LEN);
        self.cipher()?
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| SecretCodecError::Decrypt(format!("AES-GCM decrypt failed: {e}")))
    }
}
