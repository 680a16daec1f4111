//! Binary entry point for the `cloudpayload` CLI.

use std::io::{self, Write};
use std::process;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use cloudpayload::{
    ConfigError, MD5_DIGEST_LEN, Payload, PayloadConfig, PayloadError, TransportHeaders,
};

mod cli;

use cli::{CatCommand, Cli, HeadersCommand};

/// Environment variable holding the `tracing` filter directive.
const LOG_ENV_VAR: &str = "CLOUDPAYLOAD_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),
    #[error("invalid --content-md5 value: {0}")]
    InvalidDigest(String),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = PayloadConfig::load_validated()?;
    match cli {
        Cli::Headers(args) => headers_command(&args, &config, &mut io::stdout().lock()),
        Cli::Cat(args) => cat_command(&args, &config).await,
    }
}

fn headers_command(
    args: &HeadersCommand,
    config: &PayloadConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut payload = build_headers_payload(args, config)?;
    payload.declare_source_length()?;
    let headers = TransportHeaders::for_payload(&payload, config);
    payload.release();

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &headers.to_map())?;
        writeln!(out)?;
    } else {
        for (name, value) in headers.iter() {
            writeln!(out, "{name}: {value}")?;
        }
    }
    Ok(())
}

fn build_headers_payload(
    args: &HeadersCommand,
    config: &PayloadConfig,
) -> Result<Payload, CliError> {
    let mut payload = Payload::builder().file(&args.path)?.config(config).build()?;
    if let Some(encoded) = args.content_md5.as_deref() {
        payload.set_content_md5(Some(decode_digest(encoded)?));
    }
    payload.set_content_type(args.content_type.clone());
    payload.set_content_disposition(args.content_disposition.clone());
    payload.set_content_language(args.content_language.clone());
    payload.set_content_encoding(args.content_encoding.clone());
    Ok(payload)
}

async fn cat_command(args: &CatCommand, config: &PayloadConfig) -> Result<(), CliError> {
    let mut payload = Payload::builder().file(&args.path)?.config(config).build()?;
    let mut stdout = tokio::io::stdout();
    let result = payload.write_to_async(&mut stdout).await;
    payload.release();
    result?;
    Ok(())
}

fn decode_digest(encoded: &str) -> Result<[u8; MD5_DIGEST_LEN], CliError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|err| CliError::InvalidDigest(err.to_string()))?;
    <[u8; MD5_DIGEST_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
        CliError::InvalidDigest(format!(
            "expected {MD5_DIGEST_LEN} bytes, got {}",
            bytes.len()
        ))
    })
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
