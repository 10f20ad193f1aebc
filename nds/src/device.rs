//! # Device
//!
//! The register-level seam between the demos and whatever runs them. The
//! real console implements it with memory-mapped registers
//! ([`hw::Hardware`](crate::hw), feature `hw`); tests and the host runner use
//! the in-memory [`SimDevice`](crate::sim::SimDevice) (feature `sim`).
//!
//! Methods map one-to-one to hardware operations. Sequencing (what to write
//! when) lives in [`display`](crate::display), [`dma`](crate::dma) and
//! [`Console`](crate::console::Console), not here.

use crate::{
    display::{BgAffine, BgLayer},
    dma::{DmaChannel, Region},
    input::{Keys, TouchPosition},
    oam::OamImage,
    scr::{BgControl, DisplayControl, PowerFlags, Screen, VramBank},
    sound::SoundRequest,
};

pub trait Device {
    /// Write the power control register.
    fn set_power(&mut self, flags: PowerFlags);

    /// Write one VRAM bank control register.
    fn set_vram_bank(&mut self, bank: VramBank, control: u8);

    fn set_display_control(&mut self, screen: Screen, control: DisplayControl);

    fn set_bg_control(&mut self, screen: Screen, layer: BgLayer, control: BgControl);

    /// Write matrix and reference point of an affine layer.
    fn set_bg_affine(&mut self, screen: Screen, layer: BgLayer, affine: &BgAffine);

    /// Copy `src` (even length) to `dst + offset` in half-words. Returns once
    /// the transfer is done.
    fn dma_copy(&mut self, channel: DmaChannel, src: &[u8], dst: Region, offset: usize);

    /// Overwrite the hardware sprite table. Only safe during vertical blank.
    fn write_oam(&mut self, screen: Screen, image: &OamImage);

    /// Block until the start of the next vertical blank.
    fn wait_vblank(&mut self);

    /// Sample every button, including the touch pen and lid.
    fn read_keys(&mut self) -> Keys;

    /// Current pen position. Only meaningful while [`Keys::TOUCH`] is held.
    fn read_touch(&mut self) -> TouchPosition;

    /// Fire-and-forget sample playback.
    fn play_sound(&mut self, sound: &SoundRequest<'_>);
}
