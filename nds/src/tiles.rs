//! # Sprite Memory Slots
//!
//! Sprite graphics, sprite palettes and affine matrices are handed out by
//! small bump arenas. Each allocation returns a typed handle, so nothing
//! outside this module does offset arithmetic.
//!
//! ```ignore
//! let tiles = console.tiles.alloc(SHUTTLE_TILES.len())?;   // 64 tiles
//! let pal = console.palettes.alloc()?;                      // slot 0
//! let matrix = console.matrices.alloc()?;                   // slot 0
//! ```
//!
//! Tiles are 16-color 8×8 tiles (32 bytes each) in 1D mapping, so a handle's
//! index is exactly the value the sprite attribute wants.

use core::fmt;

use log::debug;

use crate::oam::MATRIX_COUNT;

pub const BYTES_PER_16_COLOR_TILE: usize = 32;
pub const COLORS_PER_PALETTE: usize = 16;
pub const PALETTE_COUNT: usize = 16;
/// 64KB of sprite memory (bank E) in 16-color tiles.
pub const BANK_E_TILES: u16 = (64 * 1024 / BYTES_PER_16_COLOR_TILE) as u16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// Not enough tiles left.
    TilesExhausted { requested: u16, available: u16 },
    /// Tile data whose length is not a whole number of tiles.
    PartialTile { len: usize },
    PalettesExhausted,
    MatricesExhausted,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::TilesExhausted { requested, available } => write!(
                f,
                "sprite memory exhausted: {requested} tiles requested, {available} available"
            ),
            AllocError::PartialTile { len } => write!(
                f,
                "tile data of {len} bytes is not a multiple of {BYTES_PER_16_COLOR_TILE}"
            ),
            AllocError::PalettesExhausted => {
                write!(f, "all {PALETTE_COUNT} sprite palettes are in use")
            }
            AllocError::MatricesExhausted => {
                write!(f, "all {MATRIX_COUNT} affine matrices are in use")
            }
        }
    }
}

impl core::error::Error for AllocError {}

/// A run of consecutive tiles in sprite memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileHandle {
    index: u16,
    count: u16,
}

impl TileHandle {
    /// First tile, as written into the sprite attributes.
    pub const fn index(self) -> u16 {
        self.index
    }

    pub const fn count(self) -> u16 {
        self.count
    }

    pub const fn byte_offset(self) -> usize {
        self.index as usize * BYTES_PER_16_COLOR_TILE
    }

    pub const fn byte_len(self) -> usize {
        self.count as usize * BYTES_PER_16_COLOR_TILE
    }
}

/// One 16-color sprite palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaletteHandle(u8);

impl PaletteHandle {
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Offset into sprite palette memory (two bytes per color).
    pub const fn byte_offset(self) -> usize {
        self.0 as usize * COLORS_PER_PALETTE * 2
    }
}

/// One affine matrix slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatrixHandle(u8);

impl MatrixHandle {
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// Bump allocator over sprite tile memory.
#[derive(Clone, Debug)]
pub struct TileArena {
    next: u16,
    capacity: u16,
}

impl TileArena {
    pub const fn new(capacity: u16) -> Self {
        Self { next: 0, capacity }
    }

    /// Reserve enough tiles for `len` bytes of 16-color tile data.
    pub fn alloc(&mut self, len: usize) -> Result<TileHandle, AllocError> {
        if len % BYTES_PER_16_COLOR_TILE != 0 {
            return Err(AllocError::PartialTile { len });
        }
        let available = self.remaining();
        let requested = len / BYTES_PER_16_COLOR_TILE;
        if requested > available as usize {
            return Err(AllocError::TilesExhausted {
                requested: requested.min(u16::MAX as usize) as u16,
                available,
            });
        }
        let handle = TileHandle {
            index: self.next,
            count: requested as u16,
        };
        self.next += handle.count;
        debug!("tiles {}..{} allocated", handle.index, self.next);
        Ok(handle)
    }

    pub const fn remaining(&self) -> u16 {
        self.capacity - self.next
    }

    /// Forget every allocation. Outstanding handles must not be used again.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl Default for TileArena {
    fn default() -> Self {
        Self::new(BANK_E_TILES)
    }
}

#[derive(Clone, Debug)]
struct Slots {
    next: u8,
    capacity: u8,
}

impl Slots {
    const fn new(capacity: u8) -> Self {
        Self { next: 0, capacity }
    }

    fn take(&mut self) -> Option<u8> {
        (self.next < self.capacity).then(|| {
            self.next += 1;
            self.next - 1
        })
    }
}

/// Hands out sprite palette slots in order.
#[derive(Clone, Debug)]
pub struct PaletteArena(Slots);

impl PaletteArena {
    pub const fn new() -> Self {
        Self(Slots::new(PALETTE_COUNT as u8))
    }

    pub fn alloc(&mut self) -> Result<PaletteHandle, AllocError> {
        let slot = self.0.take().ok_or(AllocError::PalettesExhausted)?;
        debug!("palette {slot} allocated");
        Ok(PaletteHandle(slot))
    }
}

impl Default for PaletteArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out affine matrix slots in order.
#[derive(Clone, Debug)]
pub struct MatrixArena(Slots);

impl MatrixArena {
    pub const fn new() -> Self {
        Self(Slots::new(MATRIX_COUNT as u8))
    }

    pub fn alloc(&mut self) -> Result<MatrixHandle, AllocError> {
        let slot = self.0.take().ok_or(AllocError::MatricesExhausted)?;
        debug!("affine matrix {slot} allocated");
        Ok(MatrixHandle(slot))
    }
}

impl Default for MatrixArena {
    fn default() -> Self {
        Self::new()
    }
}
