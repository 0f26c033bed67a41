use std::fmt;

use super::query::QueryParameterSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The inputs of one outbound API request that take part in its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningRequest {
    Get {
        access_token: String,
    },
    GetWithQuery {
        access_token: String,
        query: QueryParameterSet,
    },
    Post {
        access_token: String,
        json_body: String,
    },
}

impl SigningRequest {
    pub fn get(access_token: impl Into<String>) -> Self {
        Self::Get {
            access_token: access_token.into(),
        }
    }

    pub fn get_with_query(access_token: impl Into<String>, query: QueryParameterSet) -> Self {
        Self::GetWithQuery {
            access_token: access_token.into(),
            query,
        }
    }

    pub fn post(access_token: impl Into<String>, json_body: impl Into<String>) -> Self {
        Self::Post {
            access_token: access_token.into(),
            json_body: json_body.into(),
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::Get { .. } | Self::GetWithQuery { .. } => Method::Get,
            Self::Post { .. } => Method::Post,
        }
    }

    /// The canonical string that gets hashed and signed.
    ///
    /// GET trims the access token; POST concatenates token and body untouched.
    /// Verifiers depend on these exact bytes.
    pub fn signing_input(&self) -> String {
        match self {
            Self::Get { access_token } => access_token.trim().to_string(),
            Self::GetWithQuery { access_token, query } => {
                format!("{}{}", access_token.trim(), query.render())
            }
            Self::Post {
                access_token,
                json_body,
            } => format!("{access_token}{json_body}"),
        }
    }
}

pub fn build_signing_input(request: &SigningRequest) -> String {
    request.signing_input()
}
