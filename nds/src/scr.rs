//! # System Control Register Flags
//!
//! Bitflags and small enums for the registers touched while setting up the
//! 2D engines.
//!
//! ## DisplayControl (`DISPCNT`, `$0400_0000` main / `$0400_1000` sub)
//!
//! | Flag         | Effect                                         |
//! |--------------|------------------------------------------------|
//! | `BG0..BG3`   | Enable a background layer                      |
//! | `SPRITES`    | Enable the sprite (object) layer               |
//! | `SPRITES_1D` | 1D tile mapping for sprites                    |
//! | `GRAPHICS`   | Show the engine output (main engine only)      |
//!
//! The video mode lives in the low three bits; build it with
//! [`VideoMode::control`].
//!
//! ## PowerFlags (`POWCNT1`, `$0400_0304`)
//!
//! Powers the LCDs and the two 2D engines, and decides which physical
//! screen shows the main engine.
//!
//! ## BgControl (`BGxCNT`)
//!
//! Priority, map base and size/type bits for one background layer.

bitflags::bitflags! {
    /// Display control flags.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct DisplayControl: u32 {
        const MODE_MASK  = 0b0000_0111;
        /// 1D tile mapping for sprite graphics.
        const SPRITES_1D = 1 << 4;
        const BG0        = 1 << 8;
        const BG1        = 1 << 9;
        const BG2        = 1 << 10;
        const BG3        = 1 << 11;
        const SPRITES    = 1 << 12;
        /// Normal graphics display. Only meaningful on the main engine.
        const GRAPHICS   = 1 << 16;
    }

    /// Power control flags.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct PowerFlags: u16 {
        const LCD        = 1 << 0;
        const ENGINE_A   = 1 << 1;
        const RENDER_3D  = 1 << 2;
        const GEOMETRY   = 1 << 3;
        const ENGINE_B   = 1 << 9;
        /// Set: main engine on the top screen. Clear: main engine on the bottom.
        const SWAP_LCDS  = 1 << 15;

        const ALL_2D = Self::LCD.bits() | Self::ENGINE_A.bits() | Self::ENGINE_B.bits();
    }

    /// Background control flags.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct BgControl: u16 {
        const PRIORITY_MASK = 0b0000_0000_0000_0011;
        /// Direct-color bitmap (extended affine backgrounds).
        const BMP_DIRECT    = 1 << 2;
        const MOSAIC        = 1 << 6;
        const COLOR_256     = 1 << 7;
        const MAP_BASE_MASK = 0b0001_1111_0000_0000;
        const WRAP          = 1 << 13;
        const SIZE_MASK     = 0b1100_0000_0000_0000;
    }
}

impl BgControl {
    /// Priority 0 (front) to 3 (back).
    pub const fn priority(priority: u8) -> Self {
        assert!(priority < 4);
        Self::from_bits_retain(priority as u16)
    }

    /// Map base in 16KB steps (`BG_BMP_BASE`).
    pub const fn map_base(base: u8) -> Self {
        assert!(base < 32);
        Self::from_bits_retain((base as u16) << 8)
    }

    pub const fn size(size: u8) -> Self {
        assert!(size < 4);
        Self::from_bits_retain((size as u16) << 14)
    }

    pub fn priority_bits(self) -> u8 {
        (self & Self::PRIORITY_MASK).bits() as u8
    }

    pub fn map_base_bits(self) -> u8 {
        ((self & Self::MAP_BASE_MASK).bits() >> 8) as u8
    }
}

#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VideoMode {
    Mode0 = 0,
    Mode1 = 1,
    Mode2 = 2,
    Mode3 = 3,
    Mode4 = 4,
    /// Two text layers plus two extended affine layers (bitmaps).
    Mode5 = 5,
}

impl VideoMode {
    /// Display control value for a 2D mode with the graphics display on.
    pub const fn control(self) -> DisplayControl {
        DisplayControl::from_bits_retain(self as u32 | DisplayControl::GRAPHICS.bits())
    }
}

/// The two 2D engines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Main,
    Sub,
}

impl Screen {
    pub const fn idx(self) -> usize {
        match self {
            Screen::Main => 0,
            Screen::Sub => 1,
        }
    }
}

/// VRAM banks used by the 2D demos.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VramBank {
    A,
    B,
    C,
    D,
    E,
}

impl VramBank {
    pub const ALL: [VramBank; 5] = [VramBank::A, VramBank::B, VramBank::C, VramBank::D, VramBank::E];

    pub const fn idx(self) -> usize {
        self as usize
    }

    /// Control register value (`VRAMCNT_x`) for mapping this bank.
    ///
    /// Panics on a mapping the bank cannot take; that is a configuration
    /// defect, not a runtime condition.
    pub const fn control(self, mapping: VramMapping) -> u8 {
        const ENABLE: u8 = 0x80;
        let mst_ofs = match (self, mapping) {
            (_, VramMapping::Lcd) => 0,
            (VramBank::A | VramBank::B | VramBank::C | VramBank::D, VramMapping::MainBg { slot }) => {
                assert!(slot < 4);
                1 | (slot << 3)
            }
            (VramBank::E, VramMapping::MainBg { slot: 0 }) => 1,
            (VramBank::A | VramBank::B, VramMapping::MainSprite { slot }) => {
                assert!(slot < 2);
                2 | (slot << 3)
            }
            (VramBank::E, VramMapping::MainSprite { slot: 0 }) => 2,
            (VramBank::C, VramMapping::SubBg) => 4,
            _ => panic!("unsupported VRAM bank mapping"),
        };
        ENABLE | mst_ofs
    }
}

/// Where a VRAM bank shows up in the memory map.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VramMapping {
    /// Plain LCDC memory. Used for banks the program does not need.
    #[default]
    Lcd,
    /// Main background memory at `$0600_0000 + slot * 128KB`.
    MainBg { slot: u8 },
    /// Sub background memory at `$0620_0000`.
    SubBg,
    /// Main sprite memory at `$0640_0000 + slot * 128KB`.
    MainSprite { slot: u8 },
}
