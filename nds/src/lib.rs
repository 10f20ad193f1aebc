//! # nds
//!
//! A small hardware layer for the Nintendo DS 2D engines: video memory
//! banks, bitmap backgrounds, affine sprites, DMA asset copies, key and
//! touch input, and one-shot sound playback.
//!
//! ## Quick Start
//!
//! Every program owns one [`Console`](console::Console), built around a
//! [`Device`](device::Device):
//!
//! ```ignore
//! let mut console = Console::init(device, &video);
//!
//! let stars = Background::init(&mut console.device, &STAR_FIELD);
//! stars.load_bitmap(&mut console.device, console.dma, STAR_FIELD_BITMAP);
//!
//! loop {
//!     console.scan_input();
//!     // update sprites in console.sprites
//!     console.present(); // vblank, then commit OAM
//! }
//! ```
//!
//! ## The Frame
//!
//! 1. `scan_input` samples buttons and the touch pen once.
//! 2. Game logic mutates the shadow [`SpriteTable`](sprite::SpriteTable).
//! 3. `present` waits for vertical blank and then writes the whole table to
//!    OAM, so the hardware never shows a half-updated table.
//!
//! ## Devices
//!
//! | Device | Feature | Use |
//! |--------|---------|-----|
//! | [`sim::SimDevice`] | `sim` | tests, host runner |
//! | [`hw::Hardware`] | `hw` | the console |
//!
//! ## Hardware Notes
//!
//! | | |
//! |---|---|
//! | Screens | 2 × 256×192, main engine on either |
//! | Angles | 512 units per turn |
//! | OAM | 128 sprites, 32 affine matrices |
//! | Sprite memory | bank E, 64KB, 2048 16-color tiles |

#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "sim"))]
extern crate alloc;

pub mod console;
pub mod device;
pub mod display;
pub mod dma;
pub mod input;
pub mod math;
pub mod oam;
pub mod scr;
pub mod sound;
pub mod sprite;
pub mod tiles;
pub mod trig;

#[cfg(feature = "hw")]
pub mod hw;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub const SCREEN_WIDTH: i32 = 256;
pub const SCREEN_HEIGHT: i32 = 192;
