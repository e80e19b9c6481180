//! Byte sources for volumes

use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

/// Opens the physical files a fingerprint reads from
///
/// Handles are plain owned values: dropping one releases it, so a
/// computation never outlives its handles regardless of how it exits.
pub trait VolumeSource {
    /// Seekable reader over one physical file
    type Handle: Read + Seek;

    /// Open the file at `path` for reading
    fn open(&self, path: &Path) -> io::Result<Self::Handle>;
}

/// Reads volumes from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsVolumes;

impl VolumeSource for FsVolumes {
    type Handle = BufReader<File>;

    fn open(&self, path: &Path) -> io::Result<Self::Handle> {
        File::open(path).map(BufReader::new)
    }
}
