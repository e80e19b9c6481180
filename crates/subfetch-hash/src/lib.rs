//! Movie-hash fingerprinting for subtitle lookup
//!
#![allow(clippy::cast_possible_truncation)] // Sizes are bounded by the hash windows
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::doc_markdown)] // Format names don't need backticks
//! Subtitle providers identify a video by a 64-bit hash of its size and of
//! its first and last 64 KiB. This crate computes that hash for:
//!
//! - **Plain files** on disk
//! - **Stored RAR members**, read in place across every volume of a split set
//!
//! # Example
//!
//! ```no_run
//! use subfetch_hash::{FingerprintConfig, Fingerprinter};
//! use std::path::Path;
//!
//! let hasher = Fingerprinter::new(FingerprintConfig::default());
//!
//! let movie = hasher.fingerprint(Path::new("/media/movie.mkv"), false)?;
//! println!("{} ({} bytes)", movie.hex(), movie.size);
//!
//! let packed = hasher.fingerprint(Path::new("/media/show.part01.rar"), true)?;
//! println!("{packed}");
//! # Ok::<(), subfetch_hash::FingerprintError>(())
//! ```
//!
//! # Modules
//!
//! - [`volume`]: names of the volumes of a split archive
//! - [`rar`]: RAR block headers and stored-member lookup
//! - [`fingerprint`]: the hash itself

#![warn(missing_docs)]

/// Fingerprint errors
pub mod error;

/// Two-window movie hash over files and archive members
pub mod fingerprint;

/// RAR block structure
pub mod rar;

/// Split-archive volume naming
pub mod volume;

pub use error::{FingerprintError, Result};
pub use fingerprint::{
    Fingerprint, FingerprintConfig, Fingerprinter, FsVolumes, LargeMemberPolicy, MIN_FILE_SIZE,
    VolumeSource, WINDOW_SIZE, fingerprint,
};
pub use volume::{VolumeError, VolumeNaming, locate};
