use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use request_signature::{
    Method, QueryParameter, QueryParameterSet, RequestSigner, RsaSigner, SigningRequest,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[clap(version, about = "Sign outbound API requests with SHA256withRSA")]
struct Args {
    #[clap(long, env = "SIGNER_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
    #[clap(long, env = "SIGNER_PRIVATE_KEY_FILE", conflicts_with = "private_key")]
    private_key_file: Option<PathBuf>,
    #[clap(long, env = "SIGNER_PRIVATE_KEY", hide_env_values = true, allow_hyphen_values = true)]
    private_key: Option<String>,
    #[clap(long, env = "SIGNER_OUTPUT", default_value = "text")]
    output: OutputFormat,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign a GET request.
    Get {
        /// Endpoint URL; its query string takes part in the signature.
        #[clap(long)]
        url: Option<String>,
        /// Extra query parameter as name=value. Overrides a URL parameter of the same name.
        #[clap(long = "param", value_parser = parse_param)]
        params: Vec<QueryParameter>,
    },
    /// Sign a POST request.
    Post {
        /// Request body, signed verbatim after trimming.
        #[clap(long, conflicts_with = "body_file", required_unless_present = "body_file")]
        body: Option<String>,
        /// Read the request body from a file, or from stdin with "-".
        #[clap(long)]
        body_file: Option<PathBuf>,
        /// Reject bodies that are not well-formed JSON.
        #[clap(long)]
        require_json: bool,
    },
    /// Print the public key matching the private key.
    PublicKey,
}

#[derive(Serialize)]
struct SignatureOutput<'a> {
    method: &'a str,
    algorithm: &'a str,
    signature: &'a str,
}

fn parse_param(raw: &str) -> Result<QueryParameter, String> {
    match raw.split_once('=') {
        Some((name, value)) if !value.contains('=') => Ok(QueryParameter::new(name, value)),
        _ => Err(format!("expected name=value, got {raw:?}")),
    }
}

fn read_private_key(args: &Args) -> Result<String> {
    let pem = match (&args.private_key, &args.private_key_file) {
        (Some(pem), _) => pem.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading private key from {}", path.display()))?,
        (None, None) => bail!("--private-key or --private-key-file is required"),
    };
    let pem = pem.trim().to_string();
    if pem.is_empty() {
        bail!("private key cannot be empty");
    }
    Ok(pem)
}

fn read_access_token(args: &Args) -> Result<String> {
    let token = args.access_token.as_deref().map(str::trim).unwrap_or_default();
    if token.is_empty() {
        bail!("--access-token is required and cannot be empty");
    }
    Ok(token.to_string())
}

fn read_body(body: Option<&str>, body_file: Option<&PathBuf>) -> Result<String> {
    let body = match (body, body_file) {
        (Some(body), _) => body.to_string(),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("reading request body from stdin")?;
            body
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading request body from {}", path.display()))?,
        (None, None) => bail!("--body or --body-file is required"),
    };
    Ok(body.trim().to_string())
}

fn build_request(args: &Args) -> Result<Option<SigningRequest>> {
    let request = match &args.command {
        Command::Get { url, params } => {
            let access_token = read_access_token(args)?;
            let mut query = match url {
                Some(url) => QueryParameterSet::from_url(url.trim())
                    .context("parsing query parameters of the endpoint url")?,
                None => QueryParameterSet::new(),
            };
            query.extend(params.iter().cloned());
            debug!(parameters = query.len(), "collected query parameters");
            if query.is_empty() {
                SigningRequest::get(access_token)
            } else {
                SigningRequest::get_with_query(access_token, query)
            }
        }
        Command::Post {
            body,
            body_file,
            require_json,
        } => {
            let access_token = read_access_token(args)?;
            let body = read_body(body.as_deref(), body_file.as_ref())?;
            if body.is_empty() {
                bail!("request body cannot be empty for POST");
            }
            if *require_json {
                serde_json::from_str::<serde_json::Value>(&body)
                    .context("request body is not valid JSON")?;
            }
            SigningRequest::post(access_token, body)
        }
        Command::PublicKey => return Ok(None),
    };
    Ok(Some(request))
}

fn render_signature(
    format: OutputFormat,
    method: Method,
    algorithm: &str,
    signature: &str,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("{signature}\n")),
        OutputFormat::Json => {
            let output = SignatureOutput {
                method: method.as_str(),
                algorithm,
                signature,
            };
            let json = serde_json::to_string_pretty(&output).context("serializing output")?;
            Ok(format!("{json}\n"))
        }
    }
}

fn run(args: Args) -> Result<String> {
    let request = build_request(&args)?;
    let signer = RsaSigner::from_pem(&read_private_key(&args)?).context("loading private key")?;

    let Some(request) = request else {
        return signer.public_key_pem().context("encoding public key");
    };

    let method = request.method();
    debug!(%method, input_len = request.signing_input().len(), "built signing input");
    let signature = signer
        .sign_request(&request)
        .context("generating request signature")?;
    info!(%method, algorithm = signer.algorithm(), "request signed");

    render_signature(args.output, method, signer.algorithm(), &signature)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "request_signer=info".into()),
        )
        .init();

    print!("{}", run(Args::parse())?);
    Ok(())
}
