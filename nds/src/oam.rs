//! # Object Attribute Memory
//!
//! OAM holds 128 sprite entries of four half-words each. The first three are
//! the sprite's attributes; the fourth half-word of every entry is borrowed
//! by the affine matrices, one matrix coefficient per entry, so matrix `n`
//! lives in the spare half-words of entries `4n..4n+4`.
//!
//! ```text
//! attr0: [15:14 shape][13 256col][12 mosaic][11:10 mode][9 double/hidden][8 affine][7:0 y]
//! attr1: [15:14 size][13 vflip | 13:9 matrix][12 hflip][8:0 x]
//! attr2: [15:12 palette][11:10 priority][9:0 tile]
//! ```
//!
//! [`OamImage`] is a plain in-memory copy; nothing here touches hardware.

use bit_field::BitField;

use crate::{display::AffineMatrix, math::Vec2};

pub const SPRITE_COUNT: usize = 128;
pub const MATRIX_COUNT: usize = 32;

#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ObjPriority {
    /// Drawn in front of everything else.
    #[default]
    P0 = 0,
    P1 = 1,
    P2 = 2,
    P3 = 3,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObjShape {
    Square = 0,
    Wide = 1,
    Tall = 2,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObjSize {
    S8 = 0,
    S16 = 1,
    S32 = 2,
    S64 = 3,
}

/// Shape and size codes for a sprite of `width` × `height` pixels.
///
/// Returns `None` for dimensions the hardware cannot draw.
pub const fn shape_and_size(width: u8, height: u8) -> Option<(ObjShape, ObjSize)> {
    use ObjShape::*;
    use ObjSize::*;
    Some(match (width, height) {
        (8, 8) => (Square, S8),
        (16, 16) => (Square, S16),
        (32, 32) => (Square, S32),
        (64, 64) => (Square, S64),
        (16, 8) => (Wide, S8),
        (32, 8) => (Wide, S16),
        (32, 16) => (Wide, S32),
        (64, 32) => (Wide, S64),
        (8, 16) => (Tall, S8),
        (8, 32) => (Tall, S16),
        (16, 32) => (Tall, S32),
        (32, 64) => (Tall, S64),
        _ => return None,
    })
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Color16,
    Color256,
}

/// The three attribute half-words of one sprite.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OamEntry {
    pub attr: [u16; 3],
}

impl OamEntry {
    /// An entry the hardware skips.
    pub const HIDDEN: OamEntry = OamEntry { attr: [1 << 9, 0, 0] };

    /// Position wraps the way the hardware does: 8 bits of y, 9 bits of x.
    pub fn set_position(&mut self, pos: Vec2<i32>) {
        self.attr[0].set_bits(0..8, (pos.y & 0xFF) as u16);
        self.attr[1].set_bits(0..9, (pos.x & 0x1FF) as u16);
    }

    pub fn position(&self) -> Vec2<i32> {
        Vec2::new(
            self.attr[1].get_bits(0..9) as i32,
            self.attr[0].get_bits(0..8) as i32,
        )
    }

    /// Switch the entry to affine mode using matrix `matrix`.
    pub fn set_affine(&mut self, matrix: u8, double_size: bool) {
        assert!((matrix as usize) < MATRIX_COUNT);
        self.attr[0].set_bit(8, true);
        self.attr[0].set_bit(9, double_size);
        self.attr[1].set_bits(9..14, matrix as u16);
    }

    pub fn is_affine(&self) -> bool {
        self.attr[0].get_bit(8)
    }

    pub fn matrix(&self) -> Option<u8> {
        self.is_affine().then(|| self.attr[1].get_bits(9..14) as u8)
    }

    /// Regular sprites only; affine sprites cannot be hidden this way.
    pub fn set_hidden(&mut self, hidden: bool) {
        debug_assert!(!self.is_affine());
        self.attr[0].set_bit(9, hidden);
    }

    pub fn is_hidden(&self) -> bool {
        !self.is_affine() && self.attr[0].get_bit(9)
    }

    pub fn set_flip(&mut self, hflip: bool, vflip: bool) {
        debug_assert!(!self.is_affine());
        self.attr[1].set_bit(12, hflip);
        self.attr[1].set_bit(13, vflip);
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.attr[0].set_bit(13, mode == ColorMode::Color256);
    }

    pub fn set_shape_and_size(&mut self, shape: ObjShape, size: ObjSize) {
        self.attr[0].set_bits(14..16, shape as u16);
        self.attr[1].set_bits(14..16, size as u16);
    }

    pub fn set_tile(&mut self, tile: u16) {
        assert!(tile < 1024);
        self.attr[2].set_bits(0..10, tile);
    }

    pub fn tile(&self) -> u16 {
        self.attr[2].get_bits(0..10)
    }

    pub fn set_priority(&mut self, priority: ObjPriority) {
        self.attr[2].set_bits(10..12, priority as u16);
    }

    pub fn priority(&self) -> u8 {
        self.attr[2].get_bits(10..12) as u8
    }

    pub fn set_palette(&mut self, palette: u8) {
        assert!(palette < 16);
        self.attr[2].set_bits(12..16, palette as u16);
    }

    pub fn palette(&self) -> u8 {
        self.attr[2].get_bits(12..16) as u8
    }
}

/// A full copy of OAM, laid out exactly like the hardware table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OamImage {
    pub words: [[u16; 4]; SPRITE_COUNT],
}

impl OamImage {
    /// Every sprite hidden and every matrix the identity, like a freshly
    /// initialised OAM.
    pub fn new() -> Self {
        let mut image = Self {
            words: [[0; 4]; SPRITE_COUNT],
        };
        for i in 0..SPRITE_COUNT {
            image.set_entry(i, OamEntry::HIDDEN);
        }
        for m in 0..MATRIX_COUNT {
            image.set_matrix(m, &AffineMatrix::IDENTITY);
        }
        image
    }

    pub fn entry(&self, index: usize) -> OamEntry {
        let w = &self.words[index];
        OamEntry {
            attr: [w[0], w[1], w[2]],
        }
    }

    pub fn set_entry(&mut self, index: usize, entry: OamEntry) {
        assert!(index < SPRITE_COUNT, "sprite index {index} out of range");
        self.words[index][..3].copy_from_slice(&entry.attr);
    }

    pub fn matrix(&self, index: usize) -> AffineMatrix {
        let base = index * 4;
        AffineMatrix {
            pa: self.words[base][3] as i16,
            pb: self.words[base + 1][3] as i16,
            pc: self.words[base + 2][3] as i16,
            pd: self.words[base + 3][3] as i16,
        }
    }

    pub fn set_matrix(&mut self, index: usize, matrix: &AffineMatrix) {
        assert!(index < MATRIX_COUNT, "matrix index {index} out of range");
        let base = index * 4;
        self.words[base][3] = matrix.pa as u16;
        self.words[base + 1][3] = matrix.pb as u16;
        self.words[base + 2][3] = matrix.pc as u16;
        self.words[base + 3][3] = matrix.pd as u16;
    }

    /// The table as the 512 half-words the hardware expects.
    pub fn as_halfwords(&self) -> impl Iterator<Item = u16> + '_ {
        self.words.iter().flatten().copied()
    }
}

impl Default for OamImage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn affine_16_color_64x64() {
        let mut e = OamEntry::default();
        e.set_color_mode(ColorMode::Color16);
        e.set_affine(0, false);
        e.set_shape_and_size(ObjShape::Square, ObjSize::S64);
        e.set_position(Vec2::new(32, 32));
        e.set_tile(0);
        e.set_priority(ObjPriority::P0);
        e.set_palette(0);

        assert_eq!(e.attr, [0x0120, 0xC020, 0x0000]);
        assert_eq!(e.matrix(), Some(0));
        assert!(!e.is_hidden());
    }

    #[test]
    fn regular_sprite_fields() {
        let mut e = OamEntry::default();
        e.set_shape_and_size(ObjShape::Square, ObjSize::S32);
        e.set_position(Vec2::new(176, 144));
        e.set_tile(64);
        e.set_priority(ObjPriority::P2);
        e.set_palette(1);

        assert_eq!(e.position(), Vec2::new(176, 144));
        assert_eq!(e.tile(), 64);
        assert_eq!(e.priority(), 2);
        assert_eq!(e.palette(), 1);
        assert_eq!(e.matrix(), None);
        assert_eq!(e.attr[2], 0x1840);
    }

    #[test]
    fn negative_positions_wrap_like_hardware() {
        let mut e = OamEntry::default();
        e.set_position(Vec2::new(-8, -8));
        assert_eq!(e.position(), Vec2::new(512 - 8, 256 - 8));
    }

    #[test]
    fn matrices_share_the_fourth_halfword() {
        let mut image = OamImage::new();
        let m = AffineMatrix { pa: 1, pb: -2, pc: 3, pd: -4 };
        image.set_matrix(1, &m);

        assert_eq!(image.matrix(1), m);
        assert_eq!(image.words[4][3], 1);
        assert_eq!(image.words[5][3], (-2i16) as u16);
        // attributes of those entries are untouched
        assert_eq!(image.entry(4), OamEntry::HIDDEN);
    }

    #[test]
    fn fresh_image_hides_everything() {
        let image = OamImage::new();
        assert!((0..SPRITE_COUNT).all(|i| image.entry(i).is_hidden()));
        assert_eq!(image.matrix(31), AffineMatrix::IDENTITY);
        assert_eq!(image.as_halfwords().count(), 512);
    }

    #[test]
    fn shapes() {
        assert_eq!(shape_and_size(64, 64), Some((ObjShape::Square, ObjSize::S64)));
        assert_eq!(shape_and_size(32, 16), Some((ObjShape::Wide, ObjSize::S32)));
        assert_eq!(shape_and_size(8, 32), Some((ObjShape::Tall, ObjSize::S16)));
        assert_eq!(shape_and_size(24, 24), None);
    }
}
