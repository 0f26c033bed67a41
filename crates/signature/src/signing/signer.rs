use crate::canonical::SigningRequest;
use crate::error::SigningError;

use super::encode_signature;

/// Trait for signing canonical request bytes.
///
/// Implementations are sync and hold no mutable state, so one signer can
/// serve concurrent callers.
pub trait RequestSigner: Send + Sync {
    /// Sign canonical bytes. Returns raw signature bytes.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SigningError>;

    /// Algorithm identifier string (e.g. "rsa-pkcs1v15-sha256").
    fn algorithm(&self) -> &str;

    /// Sign the canonical input of `request` and return it base64 encoded.
    fn sign_request(&self, request: &SigningRequest) -> Result<String, SigningError> {
        let signature = self.sign(request.signing_input().as_bytes())?;
        Ok(encode_signature(&signature))
    }
}
