//! Fingerprint error types

use crate::volume::VolumeError;
use thiserror::Error;

/// Errors raised while fingerprinting a file or archive member
#[derive(Debug, Error)]
pub enum FingerprintError {
    /// Input is shorter than the two hash windows
    #[error("file too small to fingerprint: {size} bytes (minimum 131072)")]
    FileTooSmall {
        /// Size of the file or member in bytes
        size: u64,
    },

    /// First volume does not start with the RAR signature
    #[error("not a RAR archive: missing 'Rar!' signature")]
    NotAnArchive,

    /// No file block was found among the leading blocks
    #[error("no file body found in the first blocks of the archive")]
    NoFileBodyFound,

    /// Member is compressed, so its bytes cannot be read in place
    #[error("unsupported compression method: 0x{method:02X} (only stored members are supported)")]
    UnsupportedCompression {
        /// Method byte from the file block
        method: u8,
    },

    /// Split archive volume names could not be derived
    #[error(transparent)]
    UnsupportedVolumeNaming(#[from] VolumeError),

    /// Member exceeds the sizes the hash was verified against
    #[error("member of {size} bytes exceeds the tested size range")]
    LargeFileUntested {
        /// Unpacked size of the member
        size: u64,
    },

    /// Block header is inconsistent
    #[error("malformed RAR block at offset {offset}")]
    MalformedBlock {
        /// Offset of the offending block within the volume
        offset: u64,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary parsing error
    #[error("binary parsing error: {0}")]
    Binary(#[from] binrw::Error),
}

/// Result type for fingerprint operations
pub type Result<T> = std::result::Result<T, FingerprintError>;
