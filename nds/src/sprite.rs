//! # Sprite Table
//!
//! A shadow copy of the sprites the demo owns. Game code mutates descriptors
//! freely at any point of the frame; [`SpriteTable::encode`] turns the whole
//! table into an [`OamImage`] and [`SpriteTable::commit`] hands it to the
//! device. Commit only right after a vertical blank (see
//! [`Console::present`](crate::console::Console::present)).
//!
//! ```ignore
//! let ship = SpriteId::new(0);
//! sprites.insert(SpriteDescriptor {
//!     id: ship,
//!     width: 64,
//!     height: 64,
//!     position: Vec2::new(32, 32),
//!     angle: Angle::new(462),
//!     priority: ObjPriority::P0,
//!     tile,
//!     palette,
//!     matrix: Some(matrix),
//!     double_size: false,
//!     hidden: false,
//! });
//!
//! sprites.set_angle(ship, Angle::new(0));
//! sprites.commit(&mut device, Screen::Main);
//! ```

use log::debug;

use crate::{
    device::Device,
    display::AffineMatrix,
    math::{Angle, Vec2},
    oam::{self, ColorMode, ObjPriority, OamEntry, OamImage, SPRITE_COUNT},
    scr::Screen,
    tiles::{MatrixHandle, PaletteHandle, TileHandle},
};

/// Index of a hardware sprite slot, `0..128`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteId(u8);

impl SpriteId {
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < SPRITE_COUNT, "sprite id out of range");
        Self(id)
    }

    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpriteDescriptor {
    pub id: SpriteId,
    pub width: u8,
    pub height: u8,
    /// Top-left corner in screen pixels.
    pub position: Vec2<i32>,
    /// Only used when `matrix` is set.
    pub angle: Angle,
    pub priority: ObjPriority,
    pub tile: TileHandle,
    pub palette: PaletteHandle,
    /// Affine sprites carry a rotation matrix; regular ones don't.
    pub matrix: Option<MatrixHandle>,
    /// Double the affine bounding box so rotated corners aren't clipped.
    pub double_size: bool,
    pub hidden: bool,
}

impl SpriteDescriptor {
    /// The OAM attributes for this sprite.
    pub fn entry(&self) -> OamEntry {
        let Some((shape, size)) = oam::shape_and_size(self.width, self.height) else {
            panic!("{}x{} is not a sprite size", self.width, self.height);
        };

        let mut e = OamEntry::default();
        e.set_color_mode(ColorMode::Color16);
        e.set_shape_and_size(shape, size);
        e.set_position(self.position);
        e.set_tile(self.tile.index());
        e.set_priority(self.priority);
        e.set_palette(self.palette.index());

        match self.matrix {
            // an affine sprite is hidden by dropping it back to regular mode
            Some(_) if self.hidden => e.set_hidden(true),
            Some(m) => e.set_affine(m.index(), self.double_size),
            None => e.set_hidden(self.hidden),
        }
        e
    }
}

/// The demo's sprites, indexed by hardware slot.
#[derive(Clone, Debug)]
pub struct SpriteTable {
    slots: [Option<SpriteDescriptor>; SPRITE_COUNT],
}

impl SpriteTable {
    pub const fn new() -> Self {
        Self {
            slots: [None; SPRITE_COUNT],
        }
    }

    /// Place a sprite in its slot, replacing whatever was there.
    pub fn insert(&mut self, sprite: SpriteDescriptor) {
        debug!(
            "sprite {}: {}x{} at {:?}, tile {}, palette {}, matrix {:?}",
            sprite.id.idx(),
            sprite.width,
            sprite.height,
            sprite.position,
            sprite.tile.index(),
            sprite.palette.index(),
            sprite.matrix.map(|m| m.index())
        );
        self.slots[sprite.id.idx()] = Some(sprite);
    }

    pub fn remove(&mut self, id: SpriteId) -> Option<SpriteDescriptor> {
        self.slots[id.idx()].take()
    }

    pub fn get(&self, id: SpriteId) -> Option<&SpriteDescriptor> {
        self.slots[id.idx()].as_ref()
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut SpriteDescriptor> {
        self.slots[id.idx()].as_mut()
    }

    /// Move a sprite. Unused slots are ignored.
    pub fn set_position(&mut self, id: SpriteId, position: Vec2<i32>) {
        if let Some(s) = self.get_mut(id) {
            s.position = position;
        }
    }

    /// Rotate an affine sprite. Unused slots are ignored.
    pub fn set_angle(&mut self, id: SpriteId, angle: Angle) {
        if let Some(s) = self.get_mut(id) {
            s.angle = angle;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpriteDescriptor> {
        self.slots.iter().flatten()
    }

    /// Build the hardware table. Empty slots come out hidden; every affine
    /// sprite writes its rotation into its own matrix.
    pub fn encode(&self) -> OamImage {
        let mut image = OamImage::new();
        for sprite in self.iter() {
            image.set_entry(sprite.id.idx(), sprite.entry());
            if let Some(m) = sprite.matrix {
                image.set_matrix(m.index() as usize, &AffineMatrix::rotation(sprite.angle));
            }
        }
        image
    }

    /// Encode and write the table to `screen`'s OAM.
    pub fn commit<D: Device>(&self, device: &mut D, screen: Screen) {
        device.write_oam(screen, &self.encode());
    }
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        sim::SimDevice,
        tiles::{MatrixArena, PaletteArena, TileArena},
    };
    use pretty_assertions::assert_eq;

    fn shuttle_and_moon() -> SpriteTable {
        let mut tiles = TileArena::default();
        let mut palettes = PaletteArena::new();
        let mut matrices = MatrixArena::new();
        let mut table = SpriteTable::new();

        table.insert(SpriteDescriptor {
            id: SpriteId::new(0),
            width: 64,
            height: 64,
            position: Vec2::new(32, 32),
            angle: Angle::new(462),
            priority: ObjPriority::P0,
            tile: tiles.alloc(2048).unwrap(),
            palette: palettes.alloc().unwrap(),
            matrix: Some(matrices.alloc().unwrap()),
            double_size: false,
            hidden: false,
        });
        table.insert(SpriteDescriptor {
            id: SpriteId::new(1),
            width: 32,
            height: 32,
            position: Vec2::new(176, 144),
            angle: Angle::ZERO,
            priority: ObjPriority::P2,
            tile: tiles.alloc(512).unwrap(),
            palette: palettes.alloc().unwrap(),
            matrix: None,
            double_size: false,
            hidden: false,
        });
        table
    }

    #[test]
    fn encodes_shuttle_and_moon() {
        let image = shuttle_and_moon().encode();

        let ship = image.entry(0);
        assert_eq!(ship.matrix(), Some(0));
        assert_eq!(ship.position(), Vec2::new(32, 32));
        assert_eq!(ship.tile(), 0);
        assert_eq!(image.matrix(0), AffineMatrix::rotation(Angle::new(462)));

        let moon = image.entry(1);
        assert_eq!(moon.matrix(), None);
        assert_eq!(moon.tile(), 64);
        assert_eq!(moon.palette(), 1);
        assert_eq!(moon.priority(), 2);

        assert!(image.entry(2).is_hidden());
    }

    #[test]
    fn mutations_show_up_on_next_encode() {
        let mut table = shuttle_and_moon();
        let moon = SpriteId::new(1);
        table.set_position(moon, Vec2::new(150, 150));
        table.set_angle(SpriteId::new(0), Angle::ZERO);

        let image = table.encode();
        assert_eq!(image.entry(1).position(), Vec2::new(150, 150));
        assert_eq!(image.matrix(0), AffineMatrix::IDENTITY);
    }

    #[test]
    fn hidden_affine_sprite_drops_its_matrix() {
        let mut table = shuttle_and_moon();
        if let Some(ship) = table.get_mut(SpriteId::new(0)) {
            ship.hidden = true;
        }
        let entry = table.encode().entry(0);
        assert!(entry.is_hidden());
        assert!(!entry.is_affine());
    }

    #[test]
    fn commit_writes_encoded_table() {
        let table = shuttle_and_moon();
        let mut dev = SimDevice::new();
        dev.wait_vblank();
        table.commit(&mut dev, Screen::Main);

        assert_eq!(dev.oam(Screen::Main), &table.encode());
        assert_eq!(dev.tearing_writes(), 0);
    }

    #[test]
    #[should_panic(expected = "sprite id out of range")]
    fn sprite_id_is_bounded() {
        let _ = SpriteId::new(128);
    }
}
