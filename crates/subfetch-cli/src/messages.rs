//! User-facing error messages
//!
//! Each error kind gets its own message. Lower layers keep the technical
//! detail in their `Display` output, which goes to the log.

use crate::workspace::WorkspaceError;
use subfetch_hash::FingerprintError;
use subfetch_provider::ProviderError;

/// Message shown to the user for a failed command
///
/// The first fingerprint, provider or workspace error found in the cause
/// chain decides the message.
pub fn describe_error(err: &anyhow::Error) -> String {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<FingerprintError>() {
            return describe_fingerprint_error(e);
        }
        if let Some(e) = cause.downcast_ref::<ProviderError>() {
            return describe_provider_error(e);
        }
        if let Some(e) = cause.downcast_ref::<WorkspaceError>() {
            return describe_workspace_error(e);
        }
    }

    format!("Unexpected error: {err:#}")
}

/// Message for a failed fingerprint
pub fn describe_fingerprint_error(err: &FingerprintError) -> String {
    match err {
        FingerprintError::FileTooSmall { size } => format!(
            "The video is too small to identify ({size} bytes); at least 128 KiB are needed"
        ),
        FingerprintError::NotAnArchive => "The file is not a RAR archive".to_string(),
        FingerprintError::NoFileBodyFound => {
            "No video was found at the start of the archive".to_string()
        }
        FingerprintError::UnsupportedCompression { method } => format!(
            "The archive is compressed (method 0x{method:02X}); only stored archives can be identified"
        ),
        FingerprintError::UnsupportedVolumeNaming(e) => {
            format!("Cannot work out the names of the other archive volumes: {e}")
        }
        FingerprintError::LargeFileUntested { size } => format!(
            "The archived video is larger than 4 GiB ({size} bytes); hashing it is not supported"
        ),
        FingerprintError::MalformedBlock { offset } => {
            format!("The archive is damaged near byte {offset}")
        }
        FingerprintError::Io(e) => format!("Could not read the video: {e}"),
        FingerprintError::Binary(e) => format!("Could not read the archive headers: {e}"),
    }
}

/// Message for a failed provider call
pub fn describe_provider_error(err: &ProviderError) -> String {
    match err {
        ProviderError::Configuration(detail) => {
            format!("Set an API key with --api-key or SUBFETCH_API_KEY ({detail})")
        }
        ProviderError::Authentication { message, .. } => {
            format!("The subtitle service rejected the API key: {message}")
        }
        ProviderError::DownloadLimitExceeded(message) => {
            format!("Download limit reached: {message}")
        }
        ProviderError::TooManyRequests => {
            "Too many requests; wait a moment and try again".to_string()
        }
        ProviderError::ServiceUnavailable => {
            "The subtitle service is temporarily unavailable".to_string()
        }
        ProviderError::Provider { status, message } => {
            format!("The subtitle service returned {status}: {message}")
        }
        ProviderError::Http(e) => format!("Could not reach the subtitle service: {e}"),
        ProviderError::Parse(e) => format!("Unexpected response from the subtitle service: {e}"),
        ProviderError::InvalidUrl(e) => format!("Invalid subtitle service URL: {e}"),
    }
}

fn describe_workspace_error(err: &WorkspaceError) -> String {
    match err {
        WorkspaceError::InvalidFormat(format) => {
            format!("'{format}' is not a valid subtitle format")
        }
        other => format!("Could not use the profile directory: {other}"),
    }
}
