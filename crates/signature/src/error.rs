/// Rejected endpoint URL or query string. Raised before any key is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedQueryError {
    #[error("Endpoint url must contain zero or one question mark")]
    MultipleQuestionMarks,
    #[error("Query parameters must follow the question mark")]
    EmptyParameterSection,
    #[error("Invalid query parameter (expected exactly one '='): {0}")]
    InvalidParameter(String),
}

#[derive(Debug, thiserror::Error)]
pub enum KeyFormatError {
    #[error("Key payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Not a PKCS#8 RSA private key: {0}")]
    PrivateKey(#[from] rsa::pkcs8::Error),
    #[error("Invalid X.509 RSA public key: {0}")]
    PublicKey(#[from] rsa::pkcs8::spki::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to compute RSA signature: {0}")]
pub struct SigningError(#[from] rsa::signature::Error);

/// The single failure type returned by the composite signing entry points.
///
/// Each variant keeps the underlying error as its source; the display text
/// is the underlying message unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SignatureGenerationError {
    #[error(transparent)]
    MalformedQuery(#[from] MalformedQueryError),
    #[error(transparent)]
    KeyFormat(#[from] KeyFormatError),
    #[error(transparent)]
    Signing(#[from] SigningError),
}

impl SignatureGenerationError {
    /// Human readable cause, suitable for showing to whoever supplied the input.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
