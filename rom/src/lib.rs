//! # Orange Shuttle
//!
//! The demos that accompany the manual, one per chapter:
//!
//! | Chapter | Shows |
//! |---------|-------|
//! | `backgrounds` | star field and planet on the main screen, splash on the sub screen |
//! | `sprites` | the same, plus the orange shuttle and the moon |
//! | `sounds` | fly the shuttle with the D-pad, drag the moon with the pen, thrusters roar on UP |
//!
//! Every chapter starts the same way and then loops forever:
//!
//! ```ignore
//! let mut demo = Demo::new(device, &DemoConfig::default(), &assets)?;
//! demo.run()
//! ```
//!
//! On a desktop the `orange-shuttle` binary (feature `host`) drives the same
//! loop on the simulated device for a fixed number of frames.

#![cfg_attr(not(any(test, feature = "host")), no_std)]

pub mod assets;
pub mod backgrounds;
pub mod chapter;
pub mod config;
pub mod game;
pub mod moon;
pub mod ship;
pub mod sprites;

pub use chapter::Chapter;
pub use config::DemoConfig;
pub use game::Demo;
