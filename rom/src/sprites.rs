use log::info;
use nds::{
    console::Console,
    device::Device,
    math::Angle,
    oam::ObjPriority,
    sprite::{SpriteDescriptor, SpriteId},
    tiles::AllocError,
};

use crate::{
    assets::Assets,
    config::{MOON_SIZE, Placement, SHUTTLE_SIZE},
};

pub const SHUTTLE: SpriteId = SpriteId::new(0);
pub const MOON: SpriteId = SpriteId::new(1);

/// Load the shuttle and moon graphics and add both sprites to the table.
///
/// The shuttle is an affine sprite so it can rotate; the moon is a plain
/// one. Each gets its own palette, in sprite order.
pub fn init_sprites<D: Device>(
    console: &mut Console<D>,
    assets: &Assets<'_>,
    placement: &Placement,
) -> Result<(), AllocError> {
    let shuttle_palette = console.load_sprite_palette(assets.shuttle_palette)?;
    let moon_palette = console.load_sprite_palette(assets.moon_palette)?;
    let shuttle_tiles = console.load_sprite_tiles(assets.shuttle_tiles)?;
    let moon_tiles = console.load_sprite_tiles(assets.moon_tiles)?;
    let shuttle_matrix = console.matrices.alloc()?;

    console.sprites.insert(SpriteDescriptor {
        id: SHUTTLE,
        width: SHUTTLE_SIZE as u8,
        height: SHUTTLE_SIZE as u8,
        position: placement.shuttle,
        angle: placement.shuttle_angle,
        priority: ObjPriority::P0,
        tile: shuttle_tiles,
        palette: shuttle_palette,
        matrix: Some(shuttle_matrix),
        double_size: false,
        hidden: false,
    });
    console.sprites.insert(SpriteDescriptor {
        id: MOON,
        width: MOON_SIZE as u8,
        height: MOON_SIZE as u8,
        position: placement.moon,
        angle: Angle::ZERO,
        priority: ObjPriority::P2,
        tile: moon_tiles,
        palette: moon_palette,
        matrix: None,
        double_size: false,
        hidden: false,
    });

    info!(
        "sprites built: {} tiles used, {} left",
        shuttle_tiles.count() + moon_tiles.count(),
        console.tiles.remaining()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assets::AssetBuffers, config::DemoConfig};
    use nds::{dma::Region, math::Vec2, sim::SimDevice};
    use pretty_assertions::assert_eq;

    #[test]
    fn shuttle_then_moon() {
        let mut buffers = Box::new(AssetBuffers::new());
        buffers.generate();
        let assets = buffers.assets();
        let cfg = DemoConfig::default();

        let mut console = Console::init(SimDevice::new(), &cfg.video());
        init_sprites(&mut console, &assets, &cfg.placement).unwrap();

        let image = console.sprites.encode();
        let shuttle = image.entry(SHUTTLE.idx());
        let moon = image.entry(MOON.idx());

        assert_eq!(shuttle.position(), Vec2::new(32, 32));
        assert_eq!((shuttle.tile(), shuttle.palette(), shuttle.priority()), (0, 0, 0));
        assert_eq!(shuttle.matrix(), Some(0));

        assert_eq!(moon.position(), Vec2::new(176, 144));
        assert_eq!((moon.tile(), moon.palette(), moon.priority()), (64, 1, 2));
        assert_eq!(moon.matrix(), None);

        let gfx = console.device.memory(Region::SpriteGfx);
        assert_eq!(&gfx[64 * 32..64 * 32 + 512], assets.moon_tiles);
        let pals = console.device.memory(Region::SpritePalette);
        assert_eq!(&pals[32..64], assets.moon_palette);
    }
}
