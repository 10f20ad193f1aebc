//! # Display Setup
//!
//! One-time configuration of the 2D engines: power, VRAM bank mapping,
//! video modes and background layers. Everything is described by plain
//! config structs and pushed to the [`Device`] once.
//!
//! ```ignore
//! let video = VideoConfig {
//!     power: PowerFlags::ALL_2D,
//!     main_on_bottom: true,
//!     banks: VramLayout {
//!         a: VramMapping::MainBg { slot: 0 },
//!         b: VramMapping::MainBg { slot: 1 },
//!         c: VramMapping::SubBg,
//!         d: VramMapping::Lcd,
//!         e: VramMapping::MainSprite { slot: 0 },
//!     },
//!     main: VideoMode::Mode5.control() | DisplayControl::BG3,
//!     sub: VideoMode::Mode5.control() | DisplayControl::BG3,
//! };
//! display::init_video(&mut device, &video);
//!
//! let stars = Background::init(&mut device, &STAR_FIELD);
//! stars.load_bitmap(&mut device, DmaChannel::LOW_PRIORITY, STAR_FIELD_BITMAP);
//! ```
//!
//! ## Affine backgrounds
//!
//! Layers 2 and 3 in mode 5 are affine: the hardware maps each screen pixel
//! through a 2×2 matrix (8.8 fixed point) plus a reference point (20.8 fixed
//! point). The bitmaps here are drawn unscaled, so the matrix is the
//! identity and scrolling only moves the reference point.

use log::{debug, info};

use crate::{
    device::Device,
    dma::{self, DmaChannel, Region},
    math::{Angle, Vec2},
    scr::{BgControl, DisplayControl, PowerFlags, Screen, VramBank, VramMapping},
};

/// 2×2 transform in 8.8 fixed point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AffineMatrix {
    pub pa: i16,
    pub pb: i16,
    pub pc: i16,
    pub pd: i16,
}

impl AffineMatrix {
    pub const IDENTITY: AffineMatrix = AffineMatrix {
        pa: 1 << 8,
        pb: 0,
        pc: 0,
        pd: 1 << 8,
    };

    /// Rotation by `angle`, as used for affine sprites.
    pub const fn rotation(angle: Angle) -> AffineMatrix {
        // 4.12 table values down to 8.8
        let s = (angle.sin_fixed() >> 4) as i16;
        let c = (angle.cos_fixed() >> 4) as i16;
        AffineMatrix {
            pa: c,
            pb: s,
            pc: -s,
            pd: c,
        }
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Matrix and reference point of an affine background.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BgAffine {
    pub matrix: AffineMatrix,
    /// Reference point x in 20.8 fixed point.
    pub x: i32,
    /// Reference point y in 20.8 fixed point.
    pub y: i32,
}

impl BgAffine {
    /// Identity transform scrolled by whole pixels.
    pub const fn scrolled(scroll: Vec2<i32>) -> Self {
        Self {
            matrix: AffineMatrix::IDENTITY,
            x: scroll.x << 8,
            y: scroll.y << 8,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BgLayer {
    Bg0,
    Bg1,
    Bg2,
    Bg3,
}

impl BgLayer {
    pub const fn idx(self) -> usize {
        self as usize
    }

    pub const fn is_affine_capable(self) -> bool {
        matches!(self, BgLayer::Bg2 | BgLayer::Bg3)
    }

    /// The `DISPCNT` enable bit for this layer.
    pub const fn display_flag(self) -> DisplayControl {
        match self {
            BgLayer::Bg0 => DisplayControl::BG0,
            BgLayer::Bg1 => DisplayControl::BG1,
            BgLayer::Bg2 => DisplayControl::BG2,
            BgLayer::Bg3 => DisplayControl::BG3,
        }
    }
}

/// Direct-color bitmap background sizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BgSize {
    Bmp16x128x128,
    Bmp16x256x256,
    Bmp16x512x256,
    Bmp16x512x512,
}

impl BgSize {
    pub const fn control(self) -> BgControl {
        let size = match self {
            BgSize::Bmp16x128x128 => 0,
            BgSize::Bmp16x256x256 => 1,
            BgSize::Bmp16x512x256 => 2,
            BgSize::Bmp16x512x512 => 3,
        };
        BgControl::from_bits_retain(
            BgControl::size(size).bits() | BgControl::COLOR_256.bits() | BgControl::BMP_DIRECT.bits(),
        )
    }

    pub const fn dimensions(self) -> (u16, u16) {
        match self {
            BgSize::Bmp16x128x128 => (128, 128),
            BgSize::Bmp16x256x256 => (256, 256),
            BgSize::Bmp16x512x256 => (512, 256),
            BgSize::Bmp16x512x512 => (512, 512),
        }
    }

    /// Bytes of bitmap data at two bytes per pixel.
    pub const fn byte_len(self) -> usize {
        let (w, h) = self.dimensions();
        w as usize * h as usize * 2
    }
}

/// VRAM bank A–E mapping, in the order `vramSetMainBanks` + bank E.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VramLayout {
    pub a: VramMapping,
    pub b: VramMapping,
    pub c: VramMapping,
    pub d: VramMapping,
    pub e: VramMapping,
}

impl VramLayout {
    pub fn entries(&self) -> [(VramBank, VramMapping); 5] {
        [
            (VramBank::A, self.a),
            (VramBank::B, self.b),
            (VramBank::C, self.c),
            (VramBank::D, self.d),
            (VramBank::E, self.e),
        ]
    }
}

/// Everything written once at startup before any layer is set up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VideoConfig {
    pub power: PowerFlags,
    /// Show the main engine on the bottom (touch) screen.
    pub main_on_bottom: bool,
    pub banks: VramLayout,
    pub main: DisplayControl,
    pub sub: DisplayControl,
}

impl VideoConfig {
    /// Power register value with the screen placement folded in.
    pub fn power_flags(&self) -> PowerFlags {
        let mut power = self.power;
        power.set(PowerFlags::SWAP_LCDS, !self.main_on_bottom);
        power
    }
}

/// Power the engines, map VRAM and set both display modes.
pub fn init_video<D: Device>(device: &mut D, config: &VideoConfig) {
    let power = config.power_flags();
    device.set_power(power);
    debug!("power control {:#06x}", power.bits());

    for (bank, mapping) in config.banks.entries() {
        let ctrl = bank.control(mapping);
        debug!("vram bank {bank:?} -> {mapping:?} ({ctrl:#04x})");
        device.set_vram_bank(bank, ctrl);
    }

    device.set_display_control(Screen::Main, config.main);
    device.set_display_control(Screen::Sub, config.sub);
    info!(
        "video configured: main {:#010x}, sub {:#010x}, main on {}",
        config.main.bits(),
        config.sub.bits(),
        if config.main_on_bottom { "bottom" } else { "top" }
    );
}

/// A bitmap background layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BackgroundConfig {
    pub screen: Screen,
    pub layer: BgLayer,
    pub size: BgSize,
    /// Bitmap base in 16KB steps.
    pub map_base: u8,
    /// 0 (front) to 3 (back).
    pub priority: u8,
    /// Whole-pixel scroll of the reference point.
    pub scroll: Vec2<i32>,
}

/// A configured background, ready to receive its bitmap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Background {
    pub config: BackgroundConfig,
}

impl Background {
    /// Write the layer's control and affine registers.
    pub fn init<D: Device>(device: &mut D, config: &BackgroundConfig) -> Background {
        assert!(
            config.layer.is_affine_capable(),
            "bitmap backgrounds need an affine layer, got {:?}",
            config.layer
        );
        let ctrl = config.size.control()
            | BgControl::map_base(config.map_base)
            | BgControl::priority(config.priority);
        device.set_bg_control(config.screen, config.layer, ctrl);
        device.set_bg_affine(config.screen, config.layer, &BgAffine::scrolled(config.scroll));
        debug!(
            "{:?} {:?}: control {:#06x}, scroll {:?}",
            config.screen,
            config.layer,
            ctrl.bits(),
            config.scroll
        );
        Background { config: *config }
    }

    /// Memory region and offset of this layer's bitmap.
    pub fn gfx(&self) -> (Region, usize) {
        let region = match self.config.screen {
            Screen::Main => Region::MainBg,
            Screen::Sub => Region::SubBg,
        };
        (region, dma::bmp_base_offset(self.config.map_base))
    }

    /// Copy a bitmap into the layer's memory.
    pub fn load_bitmap<D: Device>(&self, device: &mut D, channel: DmaChannel, bitmap: &[u8]) {
        debug_assert!(bitmap.len() <= self.config.size.byte_len());
        let (region, offset) = self.gfx();
        dma::copy_halfwords(device, channel, bitmap, region, offset);
    }
}
