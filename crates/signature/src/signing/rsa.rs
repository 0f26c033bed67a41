use rsa::RsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::signature::{SignatureEncoding, Signer};
use sha2::Sha256;

use crate::error::{KeyFormatError, SigningError};

use super::key::{PrivateKey, load_private_key};
use super::signer::RequestSigner;

pub const RSA_PKCS1V15_SHA256: &str = "rsa-pkcs1v15-sha256";

/// RSA PKCS#1 v1.5 signer with SHA-256 digest ("SHA256withRSA").
///
/// PKCS#1 v1.5 padding is deterministic: the same key and input always
/// produce the same signature.
pub struct RsaSigner {
    signing_key: SigningKey<Sha256>,
}

impl RsaSigner {
    pub fn new(key: PrivateKey) -> Self {
        let signing_key = SigningKey::<Sha256>::new(key.into_rsa());
        Self { signing_key }
    }

    pub fn from_pem(pem: &str) -> Result<Self, KeyFormatError> {
        Ok(Self::new(load_private_key(pem)?))
    }

    /// The matching public key as `-----BEGIN PUBLIC KEY-----` PEM text.
    pub fn public_key_pem(&self) -> Result<String, KeyFormatError> {
        let private_key: &RsaPrivateKey = self.signing_key.as_ref();
        Ok(private_key.to_public_key().to_public_key_pem(LineEnding::LF)?)
    }
}

impl RequestSigner for RsaSigner {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SigningError> {
        let signature = self.signing_key.try_sign(data)?;
        Ok(signature.to_vec())
    }

    fn algorithm(&self) -> &str {
        RSA_PKCS1V15_SHA256
    }
}

/// Signs the UTF-8 bytes of `input` with SHA256withRSA.
pub fn sign(input: &str, key: &PrivateKey) -> Result<Vec<u8>, SigningError> {
    let signing_key = SigningKey::<Sha256>::new(key.as_rsa().clone());
    let signature = signing_key.try_sign(input.as_bytes())?;
    Ok(signature.to_vec())
}
