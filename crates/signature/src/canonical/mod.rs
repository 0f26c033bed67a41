mod input;
mod query;

pub use input::{Method, SigningRequest, build_signing_input};
pub use query::{QueryParameter, QueryParameterSet, parse_query_string, render_query_string};
