//! Secret codec implementations.

mod aes_gcm_codec;

pub use aes_gcm_codec::*;
