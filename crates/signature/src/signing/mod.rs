mod key;
mod rsa;
mod signer;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub use key::{PrivateKey, load_private_key, load_public_key};
pub use signer::RequestSigner;
pub use self::rsa::{RSA_PKCS1V15_SHA256, RsaSigner, sign};

/// Standard padded base64, single line.
pub fn encode_signature(signature: &[u8]) -> String {
    STANDARD.encode(signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_padding_and_no_wrapping() {
        assert_eq!(encode_signature(b"ab"), "YWI=");
        assert_eq!(encode_signature(&[0xfb; 100]).lines().count(), 1);
        assert_eq!(encode_signature(&[]), "");
    }
}
