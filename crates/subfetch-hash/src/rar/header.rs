//! RAR 1.5-4.x block header structures
//!
//! Every block starts with a 7-byte base header. File blocks (`0x74`) extend
//! it with the member's sizes and attributes; the high 32 bits of both sizes
//! follow only when [`LHD_LARGE`] is set.
//!
//! ```text
//! +0  u16 head_crc      +7  u32 pack_size     +24 u8  unp_ver
//! +2  u8  head_type     +11 u32 unp_size      +25 u8  method
//! +3  u16 head_flags    +15 u8  host_os       +26 u16 name_size
//! +5  u16 head_size     +16 u32 file_crc      +28 u32 attr
//!                       +20 u32 ftime         +32 u32 high_pack_size  (LHD_LARGE)
//!                                             +36 u32 high_unp_size   (LHD_LARGE)
//! ```

use binrw::{BinRead, BinWrite};

/// First four bytes of every RAR 1.5-4.x volume
pub const RAR_MAGIC: [u8; 4] = *b"Rar!";

/// Marker block type (`Rar!\x1a\x07\x00` read as a header)
pub const MARKER_BLOCK: u8 = 0x72;

/// Archive (main) header block type
pub const ARCHIVE_BLOCK: u8 = 0x73;

/// File header block type, followed by the member's packed data
pub const FILE_BLOCK: u8 = 0x74;

/// File flag: 64-bit sizes present
pub const LHD_LARGE: u16 = 0x0100;

/// Compression method byte for members stored without compression
pub const METHOD_STORE: u8 = 0x30;

/// Size of the base block header in bytes
pub const BASE_HEADER_SIZE: u16 = 7;

/// Size of a file block header without name and without 64-bit sizes
pub const FILE_HEADER_SIZE: u16 = 32;

/// Common 7-byte header at the start of every block
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct BlockHeader {
    /// CRC16 of the header (not verified)
    pub crc: u16,

    /// Block type
    pub block_type: u8,

    /// Block flags
    pub flags: u16,

    /// Size of the whole header, including type-specific fields
    pub size: u16,
}

impl BlockHeader {
    /// Check whether this block describes an archive member
    pub const fn is_file(&self) -> bool {
        self.block_type == FILE_BLOCK
    }

    /// Check whether the member uses 64-bit sizes
    pub const fn is_large(&self) -> bool {
        self.flags & LHD_LARGE != 0
    }
}

/// Type-specific fields of a file block, directly after [`BlockHeader`]
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
#[br(import(flags: u16))]
#[bw(import(flags: u16))]
pub struct FileHeader {
    /// Low 32 bits of the packed size stored in this volume
    pub packed_size_low: u32,

    /// Low 32 bits of the member's unpacked size
    pub unpacked_size_low: u32,

    /// Operating system the member was archived on
    pub host_os: u8,

    /// CRC32 of the member
    pub file_crc: u32,

    /// Modification time in DOS format
    pub ftime: u32,

    /// Minimum unpacker version
    pub unpack_version: u8,

    /// Compression method (`0x30` stored ... `0x35` best)
    pub method: u8,

    /// Length of the member name that follows the fixed fields
    pub name_size: u16,

    /// File attributes
    pub attributes: u32,

    /// High 32 bits of the packed size
    #[br(if(flags & LHD_LARGE != 0))]
    #[bw(if(flags & LHD_LARGE != 0))]
    pub high_packed_size: Option<u32>,

    /// High 32 bits of the unpacked size
    #[br(if(flags & LHD_LARGE != 0))]
    #[bw(if(flags & LHD_LARGE != 0))]
    pub high_unpacked_size: Option<u32>,
}

impl FileHeader {
    /// Packed size in this volume, combining both halves when present
    pub fn packed_size(&self) -> u64 {
        combine(self.high_packed_size, self.packed_size_low)
    }

    /// Unpacked size of the whole member, combining both halves when present
    pub fn unpacked_size(&self) -> u64 {
        combine(self.high_unpacked_size, self.unpacked_size_low)
    }

    /// Check whether the member is stored without compression
    pub const fn is_stored(&self) -> bool {
        self.method == METHOD_STORE
    }
}

fn combine(high: Option<u32>, low: u32) -> u64 {
    (u64::from(high.unwrap_or(0)) << 32) | u64::from(low)
}
