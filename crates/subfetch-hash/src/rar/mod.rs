//! RAR 1.5-4.x block structure
//!
//! Only the parts of the format needed to locate a stored member are
//! understood: the 4-byte signature, the generic block header, and the
//! fixed fields of a file block. Member data is never decompressed.
//!
//! # Block scanning
//!
//! A volume is a sequence of blocks, each starting with a [`BlockHeader`]. The
//! marker block and the archive header come first, so the first member's file
//! block is normally the third block. Scanning stops after
//! [`MAX_SCANNED_BLOCKS`] headers.
//!
//! ```no_run
//! use subfetch_hash::rar::{find_stored_member, verify_magic};
//! use std::fs::File;
//!
//! let mut volume = File::open("/media/movie.part01.rar")?;
//! verify_magic(&mut volume)?;
//!
//! let member = find_stored_member(&mut volume)?;
//! println!("{} bytes stored from offset {}", member.unpacked_size, member.body_start);
//! # Ok::<(), subfetch_hash::FingerprintError>(())
//! ```
//!
//! [`StoredArchiveBuilder`] writes stored volume sets for tests; it is
//! compiled only with the `test-utils` feature.

#[cfg(any(test, feature = "test-utils"))]
mod builder;
mod header;

#[cfg(any(test, feature = "test-utils"))]
pub use builder::StoredArchiveBuilder;
pub use header::{
    ARCHIVE_BLOCK, BASE_HEADER_SIZE, BlockHeader, FILE_BLOCK, FILE_HEADER_SIZE, FileHeader,
    LHD_LARGE, MARKER_BLOCK, METHOD_STORE, RAR_MAGIC,
};

use crate::error::{FingerprintError, Result};
use binrw::{BinRead, Endian};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use tracing::debug;

/// Number of block headers inspected before giving up on finding a file block
pub const MAX_SCANNED_BLOCKS: usize = 4;

/// Location and sizes of a stored member inside the first volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Absolute offset of the member's first data byte in each volume
    pub body_start: u64,

    /// Bytes of member data held by each full volume
    pub packed_size: u64,

    /// Size of the member once all volumes are joined
    pub unpacked_size: u64,
}

impl ArchiveMember {
    /// 0-based index of the volume holding the member's last byte
    pub const fn last_volume_index(&self) -> u64 {
        self.unpacked_size.saturating_sub(1) / self.packed_size
    }

    /// Check whether the member spans more than one volume
    pub const fn is_split(&self) -> bool {
        self.last_volume_index() > 0
    }
}

/// Check the 4-byte signature at the start of a volume
///
/// A volume shorter than the signature is reported the same way as one
/// with the wrong bytes.
pub fn verify_magic<R: Read + Seek>(reader: &mut R) -> Result<()> {
    let mut magic = [0u8; 4];
    reader.seek(SeekFrom::Start(0))?;

    match reader.read_exact(&mut magic) {
        Ok(()) if magic == RAR_MAGIC => Ok(()),
        Ok(()) => Err(FingerprintError::NotAnArchive),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(FingerprintError::NotAnArchive),
        Err(e) => Err(e.into()),
    }
}

/// Walk the leading blocks of a volume and return the first stored member
///
/// The signature is assumed to be verified already. Non-file blocks are
/// skipped by their declared header size.
pub fn find_stored_member<R: Read + Seek>(reader: &mut R) -> Result<ArchiveMember> {
    let mut offset = 0u64;

    for _ in 0..MAX_SCANNED_BLOCKS {
        reader.seek(SeekFrom::Start(offset))?;
        let block = BlockHeader::read(reader)?;

        debug!(
            "RAR block at {offset}: type={:#04x} flags={:#06x} size={}",
            block.block_type, block.flags, block.size
        );

        if block.size == 0 {
            return Err(FingerprintError::MalformedBlock { offset });
        }

        if block.is_file() {
            let file = FileHeader::read_options(reader, Endian::Little, (block.flags,))?;

            if !file.is_stored() {
                return Err(FingerprintError::UnsupportedCompression {
                    method: file.method,
                });
            }

            let packed_size = file.packed_size();
            if packed_size == 0 {
                return Err(FingerprintError::MalformedBlock { offset });
            }

            return Ok(ArchiveMember {
                body_start: offset + u64::from(block.size),
                packed_size,
                unpacked_size: file.unpacked_size(),
            });
        }

        offset += u64::from(block.size);
    }

    Err(FingerprintError::NoFileBodyFound)
}
