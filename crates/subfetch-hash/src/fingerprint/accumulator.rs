//! 64-bit wrapping sum over little-endian cells

/// Size of one hash cell in bytes
pub const CELL_SIZE: usize = 8;

/// Running movie-hash value
///
/// Seeded with the content size, then every 8-byte little-endian cell of the
/// hash windows is added modulo 2^64. Overflow is part of the hash definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashAccumulator(u64);

impl HashAccumulator {
    /// Start a new sum at `seed`
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Add one signed cell, wrapping at 2^64
    pub const fn add_cell(&mut self, cell: i64) {
        self.0 = self.0.wrapping_add(cell as u64);
    }

    /// Add every complete cell of `window`
    ///
    /// Trailing bytes that do not fill a cell are ignored; hash windows are
    /// always a multiple of [`CELL_SIZE`].
    pub fn add_window(&mut self, window: &[u8]) {
        for chunk in window.chunks_exact(CELL_SIZE) {
            let mut cell = [0u8; CELL_SIZE];
            cell.copy_from_slice(chunk);
            self.add_cell(i64::from_le_bytes(cell));
        }
    }

    /// Current value of the sum
    pub const fn value(&self) -> u64 {
        self.0
    }
}
