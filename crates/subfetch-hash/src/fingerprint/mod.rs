//! Two-window movie hash
//!
//! The fingerprint of a video is its size plus the wrapping sum of the
//! 64-bit little-endian cells in its first and last 64 KiB:
//!
//! ```text
//! hash = size + Σ cells(content[0 .. 65536]) + Σ cells(content[size - 65536 .. size])   (mod 2^64)
//! ```
//!
//! For a member stored inside a RAR set, `content` is the member's logical
//! byte stream. Offset `o` of that stream lives in volume `o / packed_size`
//! at `body_start + o % packed_size`, so a window may be assembled from two
//! volumes without extracting anything.

mod accumulator;
mod source;

pub use accumulator::{CELL_SIZE, HashAccumulator};
pub use source::{FsVolumes, VolumeSource};

use crate::error::{FingerprintError, Result};
use crate::rar::{ArchiveMember, find_stored_member, verify_magic};
use crate::volume;
use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, warn};

/// Size of each hash window in bytes
pub const WINDOW_SIZE: u64 = 65536;

/// Smallest content that can be fingerprinted
pub const MIN_FILE_SIZE: u64 = 2 * WINDOW_SIZE;

/// Largest split-member size the archive path was verified against
pub const MAX_TESTED_MEMBER_SIZE: u64 = 1 << 32;

/// Result of a fingerprint computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// 64-bit movie hash
    pub hash: u64,

    /// Size the hash was seeded with (file size or member unpacked size)
    pub size: u64,
}

impl Fingerprint {
    /// Hash as 16 lowercase hex digits, the form providers expect
    pub fn hex(&self) -> String {
        format!("{:016x}", self.hash)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.hash)
    }
}

/// What to do with split archive members larger than [`MAX_TESTED_MEMBER_SIZE`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LargeMemberPolicy {
    /// Log a warning and hash anyway
    #[default]
    Warn,
    /// Fail with [`FingerprintError::LargeFileUntested`]
    Reject,
}

/// Options for a [`Fingerprinter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerprintConfig {
    /// Handling of members beyond the tested size range
    pub large_member_policy: LargeMemberPolicy,
}

/// Computes fingerprints over files opened through a [`VolumeSource`]
#[derive(Debug, Clone, Default)]
pub struct Fingerprinter<S: VolumeSource = FsVolumes> {
    source: S,
    config: FingerprintConfig,
}

impl Fingerprinter<FsVolumes> {
    /// Fingerprinter reading from the local filesystem
    pub const fn new(config: FingerprintConfig) -> Self {
        Self {
            source: FsVolumes,
            config,
        }
    }
}

impl<S: VolumeSource> Fingerprinter<S> {
    /// Fingerprinter reading through a custom source
    pub const fn with_source(source: S, config: FingerprintConfig) -> Self {
        Self { source, config }
    }

    /// Active configuration
    pub const fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    /// Fingerprint `path` as a plain file or as the first volume of a RAR set
    pub fn fingerprint(&self, path: &Path, is_archive_member: bool) -> Result<Fingerprint> {
        if is_archive_member {
            self.fingerprint_archive_member(path)
        } else {
            self.fingerprint_file(path)
        }
    }

    /// Fingerprint a plain file
    pub fn fingerprint_file(&self, path: &Path) -> Result<Fingerprint> {
        let mut file = self.source.open(path)?;
        let size = file.seek(SeekFrom::End(0))?;

        if size < MIN_FILE_SIZE {
            return Err(FingerprintError::FileTooSmall { size });
        }

        let mut acc = HashAccumulator::new(size);
        let mut window = vec![0u8; WINDOW_SIZE as usize];

        for offset in [0, size - WINDOW_SIZE] {
            file.seek(SeekFrom::Start(offset))?;
            file.read_exact(&mut window)?;
            acc.add_window(&window);
        }

        Ok(Fingerprint {
            hash: acc.value(),
            size,
        })
    }

    /// Fingerprint the first stored member of a RAR set
    ///
    /// `first_volume` is the set's first volume. Further volumes are located
    /// from its name only when a window reaches into them.
    pub fn fingerprint_archive_member(&self, first_volume: &Path) -> Result<Fingerprint> {
        let mut first = self.source.open(first_volume)?;
        verify_magic(&mut first)?;

        let member = find_stored_member(&mut first)?;
        let size = member.unpacked_size;
        debug!(
            "Stored member: body_start={} packed={} unpacked={} volumes={}",
            member.body_start,
            member.packed_size,
            size,
            member.last_volume_index() + 1
        );

        if size < MIN_FILE_SIZE {
            return Err(FingerprintError::FileTooSmall { size });
        }

        if size > MAX_TESTED_MEMBER_SIZE && member.is_split() {
            match self.config.large_member_policy {
                LargeMemberPolicy::Warn => {
                    warn!(
                        "Member of {} bytes in {} exceeds the tested size range, hashing anyway",
                        size,
                        first_volume.display()
                    );
                }
                LargeMemberPolicy::Reject => {
                    return Err(FingerprintError::LargeFileUntested { size });
                }
            }
        }

        let mut reader = MemberReader {
            source: &self.source,
            first_path: first_volume,
            member,
            first,
            other: None,
        };

        let mut acc = HashAccumulator::new(size);
        let mut window = vec![0u8; WINDOW_SIZE as usize];

        for offset in [0, size - WINDOW_SIZE] {
            reader.read_at(offset, &mut window)?;
            acc.add_window(&window);
        }

        Ok(Fingerprint {
            hash: acc.value(),
            size,
        })
    }
}

/// Fingerprint `path` from the local filesystem with default options
pub fn fingerprint(path: impl AsRef<Path>, is_archive_member: bool) -> Result<Fingerprint> {
    Fingerprinter::new(FingerprintConfig::default()).fingerprint(path.as_ref(), is_archive_member)
}

/// Random access to a stored member's logical bytes
///
/// Keeps the first volume open plus at most one other.
struct MemberReader<'a, S: VolumeSource> {
    source: &'a S,
    first_path: &'a Path,
    member: ArchiveMember,
    first: S::Handle,
    other: Option<(u64, S::Handle)>,
}

impl<S: VolumeSource> MemberReader<'_, S> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let packed = self.member.packed_size;
        let body_start = self.member.body_start;
        let mut filled = 0usize;

        while filled < buf.len() {
            let logical = offset + filled as u64;
            let index = logical / packed;
            let within = logical % packed;
            let remaining = (buf.len() - filled) as u64;
            let take = (packed - within).min(remaining) as usize;

            let handle = self.volume(index)?;
            handle.seek(SeekFrom::Start(body_start + within))?;
            handle.read_exact(&mut buf[filled..filled + take])?;

            filled += take;
        }

        Ok(())
    }

    fn volume(&mut self, index: u64) -> Result<&mut S::Handle> {
        if index == 0 {
            return Ok(&mut self.first);
        }

        let reused = match self.other.take() {
            Some((open, handle)) if open == index => Some(handle),
            _ => None,
        };

        let handle = match reused {
            Some(handle) => handle,
            None => {
                let path = volume::locate(self.first_path, index)?;
                debug!("Opening volume {index}: {}", path.display());
                self.source.open(&path)?
            }
        };

        Ok(&mut self.other.insert((index, handle)).1)
    }
}
