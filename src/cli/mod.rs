//! Command-line interface definitions for the `cloudpayload` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `cloudpayload` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cloudpayload",
    about = "Inspect and stream file payloads the way provider clients send them",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Print the transport headers a file payload would carry.
    #[command(
        name = "headers",
        about = "Print the transport headers a file payload would carry"
    )]
    Headers(HeadersCommand),
    /// Stream a file payload to standard output.
    #[command(name = "cat", about = "Stream a file payload to standard output")]
    Cat(CatCommand),
}

/// Arguments for the `cloudpayload headers` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct HeadersCommand {
    /// File to wrap. A leading `~/` expands against `HOME`.
    #[arg(value_name = "PATH")]
    pub(crate) path: String,
    /// MIME type to declare instead of the configured default.
    #[arg(long, value_name = "TYPE")]
    pub(crate) content_type: Option<String>,
    /// Precomputed MD5 digest of the file, base64 encoded.
    ///
    /// The digest is passed through as declared; it is not checked against
    /// the file content.
    #[arg(long, value_name = "BASE64")]
    pub(crate) content_md5: Option<String>,
    /// Content disposition to declare.
    #[arg(long, value_name = "DISPOSITION")]
    pub(crate) content_disposition: Option<String>,
    /// Content language to declare.
    #[arg(long, value_name = "LANGUAGE")]
    pub(crate) content_language: Option<String>,
    /// Content encoding to declare.
    #[arg(long, value_name = "ENCODING")]
    pub(crate) content_encoding: Option<String>,
    /// Print headers as a JSON object instead of `Name: value` lines.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Arguments for the `cloudpayload cat` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct CatCommand {
    /// File to stream. A leading `~/` expands against `HOME`.
    #[arg(value_name = "PATH")]
    pub(crate) path: String,
}
