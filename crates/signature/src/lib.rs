pub mod canonical;
pub mod error;
pub mod generate;
pub mod signing;

pub use canonical::{Method, QueryParameter, QueryParameterSet, SigningRequest};
pub use error::{KeyFormatError, MalformedQueryError, SignatureGenerationError, SigningError};
pub use generate::{sign_get, sign_get_url, sign_get_with_query, sign_post, sign_request};
pub use signing::{RequestSigner, RsaSigner};
