//! Split-archive volume naming
//!
//! A multi-volume RAR set is addressed through its first volume only. The
//! names of the remaining volumes are derived from that first name using one
//! of the conventions produced by common archivers:
//!
//! ```text
//! Numbered   movie.001        movie.002        movie.003
//! Part       movie.part01.rar movie.part02.rar movie.part03.rar
//! Legacy     movie.rar        movie.r00        movie.r01
//! ```
//!
//! Classification is a pure string operation. No directory listing is
//! consulted, so a volume path returned here may not exist on disk.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while mapping a volume index to a file name
#[derive(Debug, Error)]
pub enum VolumeError {
    /// The first volume's name matches none of the known conventions
    #[error("unsupported volume naming: {}", path.display())]
    UnsupportedVolumeNaming {
        /// Path of the first volume as supplied by the caller
        path: PathBuf,
    },
}

/// Result type alias for volume naming operations
pub type Result<T> = std::result::Result<T, VolumeError>;

/// Naming convention of a split archive, derived from its first volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeNaming {
    /// `name.001`, `name.002`, ... (three-digit, 1-based)
    Numbered,
    /// `name.partNN.ext`, 1-based, padded to the width of the first volume's number
    Part {
        /// Number of digits in the first volume's part number
        width: usize,
    },
    /// `name.rar` followed by `name.r00`, `name.r01`, ...
    Legacy,
}

impl VolumeNaming {
    /// Classify the naming convention of `first_volume`
    ///
    /// Checks run in order: a trailing `001`, a `.part<digits>.<ext>` suffix,
    /// then a `.rar` extension. Anything else is rejected rather than guessed.
    pub fn classify(first_volume: &Path) -> Result<Self> {
        let name = file_name(first_volume)?;

        if name.ends_with("001") {
            return Ok(Self::Numbered);
        }

        if let Some((_, digits, _)) = split_part(name) {
            return Ok(Self::Part {
                width: digits.len(),
            });
        }

        if name.to_ascii_lowercase().ends_with(".rar") {
            return Ok(Self::Legacy);
        }

        Err(unsupported(first_volume))
    }

    /// File name of the volume at 0-based `index` for a set whose first
    /// volume is named `first_name`
    ///
    /// `first_name` must be the name this scheme was classified from.
    pub fn volume_name(self, first_name: &str, index: u64) -> String {
        match self {
            Self::Numbered => {
                let stem = &first_name[..first_name.len() - 3];
                format!("{stem}{:03}", index + 1)
            }
            Self::Part { width } => match split_part(first_name) {
                Some((stem, _, ext)) => format!("{stem}{:0width$}.{ext}", index + 1),
                None => first_name.to_string(),
            },
            Self::Legacy => {
                if index == 0 {
                    return first_name.to_string();
                }
                let stem = &first_name[..first_name.len() - 2];
                format!("{stem}{:02}", index - 1)
            }
        }
    }
}

/// Path of the physical volume holding 0-based volume `index`
///
/// The directory of `first_volume` is preserved. Index 0 always maps back to
/// `first_volume` itself.
pub fn locate(first_volume: &Path, index: u64) -> Result<PathBuf> {
    let naming = VolumeNaming::classify(first_volume)?;
    let name = file_name(first_volume)?;
    Ok(first_volume.with_file_name(naming.volume_name(name, index)))
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| unsupported(path))
}

fn unsupported(path: &Path) -> VolumeError {
    VolumeError::UnsupportedVolumeNaming {
        path: path.to_path_buf(),
    }
}

/// Split `stem.part<digits>.<ext>` into `("stem.part", digits, ext)`
fn split_part(name: &str) -> Option<(&str, &str, &str)> {
    const MARKER: &str = ".part";

    // ASCII lowercasing keeps byte offsets intact
    let start = name.to_ascii_lowercase().rfind(MARKER)?;
    let (stem, rest) = name.split_at(start + MARKER.len());
    let (digits, ext) = rest.split_once('.')?;

    let valid = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !ext.is_empty()
        && !ext.contains('.');

    valid.then_some((stem, digits, ext))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn locate_name(first: &str, index: u64) -> String {
        locate(Path::new(first), index)
            .expect("naming should be recognised")
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_part_two_digit() {
        assert_eq!(locate_name("movie.part02.rar", 4), "movie.part05.rar");
        assert_eq!(locate_name("movie.part01.rar", 0), "movie.part01.rar");
        assert_eq!(locate_name("movie.part01.rar", 10), "movie.part11.rar");
    }

    #[test]
    fn test_part_one_digit() {
        assert_eq!(locate_name("movie.part1.rar", 0), "movie.part1.rar");
        assert_eq!(locate_name("movie.part1.rar", 3), "movie.part4.rar");
        // Grows past the first volume's width like printf does
        assert_eq!(locate_name("movie.part1.rar", 11), "movie.part12.rar");
    }

    #[test]
    fn test_part_preserves_extension_and_case() {
        assert_eq!(locate_name("Show.S01E02.PART01.RAR", 2), "Show.S01E02.PART03.RAR");
        assert_eq!(locate_name("clip.part01.cbr", 1), "clip.part02.cbr");
    }

    #[test]
    fn test_numbered() {
        assert_eq!(locate_name("movie.001", 0), "movie.001");
        assert_eq!(locate_name("movie.001", 2), "movie.003");
        assert_eq!(locate_name("movie.rar.001", 11), "movie.rar.012");
    }

    #[test]
    fn test_numbered_takes_priority_over_part() {
        assert_eq!(
            VolumeNaming::classify(Path::new("movie.part01.001")).unwrap(),
            VolumeNaming::Numbered
        );
    }

    #[test]
    fn test_legacy() {
        assert_eq!(locate_name("movie.rar", 0), "movie.rar");
        assert_eq!(locate_name("movie.rar", 1), "movie.r00");
        assert_eq!(locate_name("movie.rar", 2), "movie.r01");
        assert_eq!(locate_name("movie.rar", 101), "movie.r100");
    }

    #[test]
    fn test_directory_is_preserved() {
        let path = locate(Path::new("/media/films/movie.part01.rar"), 2).unwrap();
        assert_eq!(path, PathBuf::from("/media/films/movie.part03.rar"));
    }

    #[test]
    fn test_classify_variants() {
        let cases = [
            ("a.001", VolumeNaming::Numbered),
            ("a.part1.rar", VolumeNaming::Part { width: 1 }),
            ("a.part01.rar", VolumeNaming::Part { width: 2 }),
            ("a.part001.rar", VolumeNaming::Part { width: 3 }),
            ("a.rar", VolumeNaming::Legacy),
            ("A.RAR", VolumeNaming::Legacy),
        ];

        for (name, expected) in cases {
            assert_eq!(
                VolumeNaming::classify(Path::new(name)).unwrap(),
                expected,
                "classifying {name}"
            );
        }
    }

    #[test]
    fn test_unrecognised_naming_is_rejected() {
        for name in ["movie.mkv", "movie.r00", "movie.part.zip", "movie.partXY.zip", "movie"] {
            let result = locate(Path::new(name), 1);
            assert!(
                matches!(result, Err(VolumeError::UnsupportedVolumeNaming { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_display_names_path() {
        let err = locate(Path::new("clip.avi"), 0).unwrap_err();
        assert!(err.to_string().contains("clip.avi"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Part numbers are always `index + 1`
            #[test]
            fn part_number_tracks_index(stem in "[a-z]{1,12}", index in 0u64..5000) {
                let first = format!("{stem}.part01.rar");
                let name = locate_name(&first, index);
                let number: u64 = name
                    .trim_start_matches(&format!("{stem}.part"))
                    .trim_end_matches(".rar")
                    .parse()
                    .unwrap();
                prop_assert_eq!(number, index + 1);
            }

            /// Index 0 never renames the first volume
            #[test]
            fn index_zero_is_identity(stem in "[a-z]{1,12}", scheme in 0usize..4) {
                let first = match scheme {
                    0 => format!("{stem}.001"),
                    1 => format!("{stem}.part1.rar"),
                    2 => format!("{stem}.part01.rar"),
                    _ => format!("{stem}.rar"),
                };
                prop_assert_eq!(locate_name(&first, 0), first);
            }
        }
    }
}
