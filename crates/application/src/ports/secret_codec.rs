//! Secret encryption port.

/// Error type for secret encryption.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretCodecError {
    /// The key material is unusable.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Encryption failed.
    #[error("Encryption failed: {0}")]
    Encrypt(String),

    /// Decryption failed: wrong key, wrong machine or corrupted data.
    #[error("Decryption failed: {0}")]
    Decrypt(String),
}

/// Reversible encryption of opaque byte blobs.
///
/// Used only by the store, around `.secrets.bin` files. Failing to decrypt is
/// a fatal load error.
pub trait SecretCodec: Send + Sync {
    /// Encrypts a plaintext blob.
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, SecretCodecError>;

    /// Decrypts a blob produced by [`Self::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is corrupted or was encrypted with another key.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, SecretCodecError>;
}
