use log::info;
use nds::{console::Console, device::Device, display::Background};

use crate::{
    assets::Assets,
    config::{PLANET, SPLASH, STAR_FIELD},
};

/// The three bitmap layers every chapter shows.
#[derive(Copy, Clone, Debug)]
pub struct Backgrounds {
    /// Main BG3, furthest back.
    pub star_field: Background,
    /// Main BG2, in front of the stars.
    pub planet: Background,
    /// Sub BG3.
    pub splash: Background,
}

impl Backgrounds {
    /// Configure the layers' control and affine registers.
    pub fn init<D: Device>(console: &mut Console<D>) -> Self {
        Self {
            star_field: Background::init(&mut console.device, &STAR_FIELD),
            planet: Background::init(&mut console.device, &PLANET),
            splash: Background::init(&mut console.device, &SPLASH),
        }
    }

    /// Copy the bitmaps into background memory.
    pub fn display<D: Device>(&self, console: &mut Console<D>, assets: &Assets<'_>) {
        let channel = console.dma;
        self.star_field.load_bitmap(&mut console.device, channel, assets.star_field);
        self.planet.load_bitmap(&mut console.device, channel, assets.planet);
        self.splash.load_bitmap(&mut console.device, channel, assets.splash);
        info!("backgrounds loaded");
    }
}
