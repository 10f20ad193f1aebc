use crate::{
    device::Device,
    display::{self, VideoConfig},
    dma::{self, DmaChannel, Region},
    input::{KeyState, Keys, TouchPosition},
    scr::Screen,
    sprite::SpriteTable,
    tiles::{AllocError, MatrixArena, PaletteArena, PaletteHandle, TileArena, TileHandle},
};

/// The single device context the demo loop owns.
///
/// Holds the device plus every piece of shadow state that is written to it:
/// key history, the last touch reading, the sprite table and the sprite
/// memory arenas.
pub struct Console<D: Device> {
    pub device: D,
    /// Key mask for this frame and the previous one.
    pub keys: KeyState,
    /// Last touch reading; stale while the pen is up.
    pub touch: TouchPosition,
    /// Shadow copy of the main engine's OAM.
    pub sprites: SpriteTable,
    pub tiles: TileArena,
    pub palettes: PaletteArena,
    pub matrices: MatrixArena,
    /// DMA channel used for asset copies.
    pub dma: DmaChannel,
    frame: u32,
}

impl<D: Device> Console<D> {
    /// Power up and configure the video hardware.
    pub fn init(mut device: D, video: &VideoConfig) -> Console<D> {
        display::init_video(&mut device, video);
        Self {
            device,
            keys: KeyState::new(),
            touch: TouchPosition::default(),
            sprites: SpriteTable::new(),
            tiles: TileArena::default(),
            palettes: PaletteArena::new(),
            matrices: MatrixArena::new(),
            dma: DmaChannel::LOW_PRIORITY,
            frame: 0,
        }
    }

    /// Sample keys and touch once. Call at the start of every frame.
    pub fn scan_input(&mut self) {
        let now = self.device.read_keys();
        self.keys.update(now);
        if now.contains(Keys::TOUCH) {
            self.touch = self.device.read_touch();
        }
    }

    /// Copy a blob into video memory on the console's DMA channel.
    pub fn copy_asset(&mut self, src: &[u8], dst: Region, offset: usize) {
        dma::copy_halfwords(&mut self.device, self.dma, src, dst, offset);
    }

    /// Reserve sprite tiles for `gfx` and copy it in.
    pub fn load_sprite_tiles(&mut self, gfx: &[u8]) -> Result<TileHandle, AllocError> {
        let tiles = self.tiles.alloc(gfx.len())?;
        self.copy_asset(gfx, Region::SpriteGfx, tiles.byte_offset());
        Ok(tiles)
    }

    /// Reserve a 16-color sprite palette and copy `colors` into it.
    pub fn load_sprite_palette(&mut self, colors: &[u8]) -> Result<PaletteHandle, AllocError> {
        let palette = self.palettes.alloc()?;
        self.copy_asset(colors, Region::SpritePalette, palette.byte_offset());
        Ok(palette)
    }

    pub fn wait_vblank(&mut self) {
        self.device.wait_vblank();
        self.frame = self.frame.wrapping_add(1);
    }

    /// Write the sprite table to the main engine's OAM.
    pub fn commit_sprites(&mut self) {
        self.sprites.commit(&mut self.device, Screen::Main);
    }

    /// End the frame: wait for vertical blank, then commit the sprites.
    pub fn present(&mut self) {
        self.wait_vblank();
        self.commit_sprites();
    }

    /// Vertical blanks waited for so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        display::VramLayout,
        scr::{DisplayControl, PowerFlags, VideoMode, VramMapping},
        sim::SimDevice,
    };
    use pretty_assertions::assert_eq;

    fn console() -> Console<SimDevice> {
        let video = VideoConfig {
            power: PowerFlags::ALL_2D,
            main_on_bottom: true,
            banks: VramLayout {
                e: VramMapping::MainSprite { slot: 0 },
                ..VramLayout::default()
            },
            main: VideoMode::Mode5.control() | DisplayControl::SPRITES | DisplayControl::SPRITES_1D,
            sub: VideoMode::Mode5.control(),
        };
        Console::init(SimDevice::new(), &video)
    }

    #[test]
    fn sprite_assets_land_in_consecutive_slots() {
        let mut c = console();
        let shuttle = c.load_sprite_tiles(&[0x11; 2048]).unwrap();
        let moon = c.load_sprite_tiles(&[0x22; 512]).unwrap();
        let pal = c.load_sprite_palette(&[0x33; 32]).unwrap();
        let pal2 = c.load_sprite_palette(&[0x44; 32]).unwrap();

        assert_eq!((shuttle.index(), moon.index()), (0, 64));
        assert_eq!(c.device.memory(Region::SpriteGfx)[2047], 0x11);
        assert_eq!(c.device.memory(Region::SpriteGfx)[2048], 0x22);
        assert_eq!(pal2.index(), pal.index() + 1);
        assert_eq!(c.device.memory(Region::SpritePalette)[32], 0x44);
        assert!(c.device.dma_log().iter().all(|t| t.channel == DmaChannel::LOW_PRIORITY));
    }

    #[test]
    fn touch_is_only_sampled_while_pen_is_down() {
        let mut c = console();
        c.device.push_input(Keys::empty(), Some(TouchPosition::new(10, 20)), 1);
        c.device.push_input(Keys::empty(), None, 1);

        c.scan_input();
        assert!(c.keys.just_pressed(Keys::TOUCH));
        assert_eq!(c.touch, TouchPosition::new(10, 20));

        c.scan_input();
        assert!(c.keys.just_released(Keys::TOUCH));
        assert_eq!(c.touch, TouchPosition::new(10, 20));
    }

    #[test]
    fn present_commits_after_vblank() {
        let mut c = console();
        for _ in 0..3 {
            c.scan_input();
            c.present();
        }
        assert_eq!(c.frame(), 3);
        assert_eq!(c.device.oam_commits(), 3);
        assert_eq!(c.device.tearing_writes(), 0);
    }
}
