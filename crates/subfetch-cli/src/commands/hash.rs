//! `subfetch hash`

use crate::cli::{HashArgs, OutputFormat};
use anyhow::{Context, Result};
use serde::Serialize;
use subfetch_hash::{Fingerprint, FingerprintConfig, Fingerprinter, LargeMemberPolicy};

/// JSON form of a fingerprint, named like the provider's query fields
#[derive(Debug, Serialize)]
struct HashOutput {
    moviehash: String,
    moviebytesize: u64,
}

/// Fingerprint configuration for the `--reject-large` flag
pub fn fingerprint_config(reject_large: bool) -> FingerprintConfig {
    FingerprintConfig {
        large_member_policy: if reject_large {
            LargeMemberPolicy::Reject
        } else {
            LargeMemberPolicy::Warn
        },
    }
}

/// Compute the fingerprint described by `args`
pub fn run(args: &HashArgs) -> Result<Fingerprint> {
    Fingerprinter::new(fingerprint_config(args.reject_large))
        .fingerprint(&args.path, args.archive)
        .with_context(|| format!("Failed to fingerprint {}", args.path.display()))
}

/// Handle `subfetch hash`
pub fn handle(args: &HashArgs, format: OutputFormat) -> Result<()> {
    let fingerprint = run(args)?;

    let output = HashOutput {
        moviehash: fingerprint.hex(),
        moviebytesize: fingerprint.size,
    };
    super::emit(
        format,
        &output,
        &format!("{} {}", output.moviehash, output.moviebytesize),
    )
}
