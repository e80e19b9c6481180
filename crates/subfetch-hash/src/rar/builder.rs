//! Builder for stored (uncompressed) RAR volume sets

use crate::rar::header::{
    ARCHIVE_BLOCK, BASE_HEADER_SIZE, BlockHeader, FILE_BLOCK, FILE_HEADER_SIZE, FileHeader,
    LHD_LARGE, MARKER_BLOCK, METHOD_STORE,
};
use binrw::io::Cursor;
use binrw::{BinResult, BinWrite, Endian};

/// Archive flag: this is one volume of a multi-volume set
const MHD_VOLUME: u16 = 0x0001;

/// Archive flag: new volume naming (`.partNN.rar`)
const MHD_NEWNUMBERING: u16 = 0x0010;

/// File flag: member continues from the previous volume
const LHD_SPLIT_BEFORE: u16 = 0x0001;

/// File flag: member continues in the next volume
const LHD_SPLIT_AFTER: u16 = 0x0002;

/// Size of the archive header block (7-byte base + 6 reserved bytes)
const ARCHIVE_HEADER_SIZE: u16 = 13;

/// Builds the volumes of a RAR set holding a single stored member
///
/// Every volume repeats the same block layout, so the member data starts at
/// the same offset in each one. CRC fields are left as zero.
#[derive(Debug, Clone)]
pub struct StoredArchiveBuilder {
    name: String,
    volume_size: Option<usize>,
    large_sizes: bool,
}

impl StoredArchiveBuilder {
    /// Create a builder for a member called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            volume_size: None,
            large_sizes: false,
        }
    }

    /// Split member data into volumes holding at most `bytes` each
    #[must_use]
    pub fn volume_size(mut self, bytes: usize) -> Self {
        self.volume_size = Some(bytes.max(1));
        self
    }

    /// Always emit the 64-bit size fields
    #[must_use]
    pub fn large_sizes(mut self, enabled: bool) -> Self {
        self.large_sizes = enabled;
        self
    }

    /// Build one byte vector per volume
    pub fn build(&self, content: &[u8]) -> BinResult<Vec<Vec<u8>>> {
        let chunks: Vec<&[u8]> = match self.volume_size {
            Some(size) if !content.is_empty() => content.chunks(size).collect(),
            _ => vec![content],
        };

        let split = chunks.len() > 1;
        let last = chunks.len() - 1;

        chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| {
                let mut file_flags = 0;
                if index > 0 {
                    file_flags |= LHD_SPLIT_BEFORE;
                }
                if index < last {
                    file_flags |= LHD_SPLIT_AFTER;
                }
                self.build_volume(chunk, content.len() as u64, split, file_flags)
            })
            .collect()
    }

    fn build_volume(
        &self,
        chunk: &[u8],
        unpacked_size: u64,
        split: bool,
        mut file_flags: u16,
    ) -> BinResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        let endian = Endian::Little;

        BlockHeader {
            crc: 0x6152,
            block_type: MARKER_BLOCK,
            flags: 0x1A21,
            size: BASE_HEADER_SIZE,
        }
        .write_options(&mut cursor, endian, ())?;

        let archive_flags = if split {
            MHD_VOLUME | MHD_NEWNUMBERING
        } else {
            0
        };
        BlockHeader {
            crc: 0,
            block_type: ARCHIVE_BLOCK,
            flags: archive_flags,
            size: ARCHIVE_HEADER_SIZE,
        }
        .write_options(&mut cursor, endian, ())?;
        [0u8; 6].write_options(&mut cursor, endian, ())?;

        let packed_size = chunk.len() as u64;
        let large = self.large_sizes || unpacked_size > u64::from(u32::MAX);
        if large {
            file_flags |= LHD_LARGE;
        }

        let name = self.name.as_bytes();
        let mut header_size = FILE_HEADER_SIZE + name.len() as u16;
        if large {
            header_size += 8;
        }

        BlockHeader {
            crc: 0,
            block_type: FILE_BLOCK,
            flags: file_flags,
            size: header_size,
        }
        .write_options(&mut cursor, endian, ())?;

        FileHeader {
            packed_size_low: packed_size as u32,
            unpacked_size_low: unpacked_size as u32,
            host_os: 2,
            file_crc: 0,
            ftime: 0,
            unpack_version: 29,
            method: METHOD_STORE,
            name_size: name.len() as u16,
            attributes: 0x20,
            high_packed_size: large.then_some((packed_size >> 32) as u32),
            high_unpacked_size: large.then_some((unpacked_size >> 32) as u32),
        }
        .write_options(&mut cursor, endian, (file_flags,))?;

        name.write_options(&mut cursor, endian, ())?;
        chunk.write_options(&mut cursor, endian, ())?;

        Ok(cursor.into_inner())
    }
}
