//! Resolution of the collector insert key.
//!
//! The key is stored encrypted in process configuration. Decryption is
//! delegated to a [`Decryptor`], the boundary to whatever key-management
//! service the deployment uses.

use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::error::CredentialError;

/// Obtains the plaintext secret used to authenticate collector requests.
pub trait SecretResolver {
    fn resolve_secret(&self) -> Result<Vec<u8>, CredentialError>;
}

/// Decrypts a ciphertext blob into plaintext.
pub trait Decryptor {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CredentialError>;
}

impl<F> Decryptor for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>, CredentialError>,
{
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CredentialError> {
        self(ciphertext)
    }
}

/// Treats the decoded configuration value as the plaintext key.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughDecryptor;

impl Decryptor for PassthroughDecryptor {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CredentialError> {
        Ok(ciphertext.to_vec())
    }
}

/// Decodes a base64 ciphertext and decrypts it on every call.
pub struct EncryptedSecretResolver {
    encoded: String,
    decryptor: Box<dyn Decryptor>,
}

impl EncryptedSecretResolver {
    pub fn new(encoded: impl Into<String>, decryptor: Box<dyn Decryptor>) -> Self {
        Self {
            encoded: encoded.into(),
            decryptor,
        }
    }
}

impl fmt::Debug for EncryptedSecretResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedSecretResolver")
            .field("encoded", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl SecretResolver for EncryptedSecretResolver {
    fn resolve_secret(&self) -> Result<Vec<u8>, CredentialError> {
        let ciphertext = BASE64_STANDARD.decode(self.encoded.trim())?;
        self.decryptor.decrypt(&ciphertext)
    }
}

/// A fixed secret, for local runs and tests.
#[derive(Clone)]
pub struct StaticSecret(Vec<u8>);

impl StaticSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }
}

impl fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticSecret(<redacted>)")
    }
}

impl SecretResolver for StaticSecret {
    fn resolve_secret(&self) -> Result<Vec<u8>, CredentialError> {
        Ok(self.0.clone())
    }
}

/// Resolve a secret and check it can be sent as a header value.
pub fn resolve_header_value(resolver: &dyn SecretResolver) -> Result<String, CredentialError> {
    let secret = resolver.resolve_secret()?;
    String::from_utf8(secret).map_err(|_| CredentialError::NotUtf8)
}
