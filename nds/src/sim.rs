//! # Simulated Device
//!
//! An in-memory [`Device`] that records every register write, keeps byte
//! copies of the video memory regions and replays scripted input. Used by
//! the tests and the host runner.
//!
//! ```ignore
//! let mut dev = SimDevice::new();
//! dev.push_input(Keys::UP, None, 10);                          // hold UP for 10 frames
//! dev.push_input(Keys::empty(), Some(TouchPosition::new(100, 100)), 1);
//! dev.push_input(Keys::empty(), Some(TouchPosition::new(150, 150)), 1);
//! ```
//!
//! The frame model is simple: `wait_vblank` starts a vertical blank, and
//! reading the keys or starting a DMA copy ends it. Each blank has room for
//! one sprite table write per screen. A write outside a blank, or a second
//! write to the same screen in one blank, is counted as a tearing write.

use alloc::{collections::VecDeque, vec, vec::Vec};

use log::{trace, warn};

use crate::{
    device::Device,
    display::{BgAffine, BgLayer},
    dma::{DmaChannel, Region},
    input::{Keys, TouchPosition},
    oam::OamImage,
    scr::{BgControl, DisplayControl, PowerFlags, Screen, VramBank},
    sound::{SampleFormat, SoundRequest},
};

/// One completed DMA transfer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DmaTransfer {
    pub channel: DmaChannel,
    pub region: Region,
    pub offset: usize,
    pub len: usize,
}

/// A sound that was played, minus its sample data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SoundRecord {
    pub len: usize,
    pub rate: u32,
    pub volume: u8,
    pub pan: u8,
    pub format: SampleFormat,
    /// Frame (vertical blanks so far) the sound was started in.
    pub frame: u32,
}

#[derive(Copy, Clone, Debug)]
struct InputStep {
    keys: Keys,
    touch: Option<TouchPosition>,
    frames: u32,
}

#[derive(Clone, Debug)]
pub struct SimDevice {
    power: PowerFlags,
    vram_banks: [u8; 5],
    display: [DisplayControl; 2],
    bg_control: [[BgControl; 4]; 2],
    bg_affine: [[BgAffine; 4]; 2],

    main_bg: Vec<u8>,
    sub_bg: Vec<u8>,
    sprite_gfx: Vec<u8>,
    sprite_palette: Vec<u8>,
    bg_palette: Vec<u8>,
    oam: [OamImage; 2],

    dma_log: Vec<DmaTransfer>,
    sounds: Vec<SoundRecord>,

    script: VecDeque<InputStep>,
    touch: TouchPosition,

    vblanks: u32,
    in_vblank: bool,
    committed: [bool; 2],
    oam_commits: u32,
    tearing_writes: u32,
}

impl SimDevice {
    /// A powered-down device with zeroed memory and no scripted input.
    pub fn new() -> Self {
        Self {
            power: PowerFlags::empty(),
            vram_banks: [0; 5],
            display: [DisplayControl::empty(); 2],
            bg_control: [[BgControl::empty(); 4]; 2],
            bg_affine: [[BgAffine::default(); 4]; 2],
            main_bg: vec![0; Region::MainBg.size()],
            sub_bg: vec![0; Region::SubBg.size()],
            sprite_gfx: vec![0; Region::SpriteGfx.size()],
            sprite_palette: vec![0; Region::SpritePalette.size()],
            bg_palette: vec![0; Region::BgPalette.size()],
            oam: [OamImage::new(); 2],
            dma_log: Vec::new(),
            sounds: Vec::new(),
            script: VecDeque::new(),
            touch: TouchPosition::default(),
            vblanks: 0,
            in_vblank: false,
            committed: [false; 2],
            oam_commits: 0,
            tearing_writes: 0,
        }
    }

    /// Queue `frames` frames of input. A touch position implies the pen is
    /// down ([`Keys::TOUCH`]).
    pub fn push_input(&mut self, keys: Keys, touch: Option<TouchPosition>, frames: u32) {
        if frames == 0 {
            return;
        }
        self.script.push_back(InputStep { keys, touch, frames });
    }

    /// Frames of scripted input not yet read.
    pub fn input_pending(&self) -> u32 {
        self.script.iter().map(|s| s.frames).sum()
    }

    pub fn power(&self) -> PowerFlags {
        self.power
    }

    /// Control byte of banks A through E.
    pub fn vram_banks(&self) -> [u8; 5] {
        self.vram_banks
    }

    pub fn display_control(&self, screen: Screen) -> DisplayControl {
        self.display[screen.idx()]
    }

    pub fn bg_control(&self, screen: Screen, layer: BgLayer) -> BgControl {
        self.bg_control[screen.idx()][layer.idx()]
    }

    pub fn bg_affine(&self, screen: Screen, layer: BgLayer) -> BgAffine {
        self.bg_affine[screen.idx()][layer.idx()]
    }

    pub fn memory(&self, region: Region) -> &[u8] {
        match region {
            Region::MainBg => &self.main_bg,
            Region::SubBg => &self.sub_bg,
            Region::SpriteGfx => &self.sprite_gfx,
            Region::SpritePalette => &self.sprite_palette,
            Region::BgPalette => &self.bg_palette,
        }
    }

    fn memory_mut(&mut self, region: Region) -> &mut [u8] {
        match region {
            Region::MainBg => &mut self.main_bg,
            Region::SubBg => &mut self.sub_bg,
            Region::SpriteGfx => &mut self.sprite_gfx,
            Region::SpritePalette => &mut self.sprite_palette,
            Region::BgPalette => &mut self.bg_palette,
        }
    }

    pub fn oam(&self, screen: Screen) -> &OamImage {
        &self.oam[screen.idx()]
    }

    pub fn dma_log(&self) -> &[DmaTransfer] {
        &self.dma_log
    }

    pub fn sounds(&self) -> &[SoundRecord] {
        &self.sounds
    }

    pub fn vblanks(&self) -> u32 {
        self.vblanks
    }

    pub fn oam_commits(&self) -> u32 {
        self.oam_commits
    }

    /// OAM writes that happened outside of a vertical blank.
    pub fn tearing_writes(&self) -> u32 {
        self.tearing_writes
    }
}

impl Default for SimDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for SimDevice {
    fn set_power(&mut self, flags: PowerFlags) {
        self.power = flags;
    }

    fn set_vram_bank(&mut self, bank: VramBank, control: u8) {
        self.vram_banks[bank.idx()] = control;
    }

    fn set_display_control(&mut self, screen: Screen, control: DisplayControl) {
        self.display[screen.idx()] = control;
    }

    fn set_bg_control(&mut self, screen: Screen, layer: BgLayer, control: BgControl) {
        self.bg_control[screen.idx()][layer.idx()] = control;
    }

    fn set_bg_affine(&mut self, screen: Screen, layer: BgLayer, affine: &BgAffine) {
        self.bg_affine[screen.idx()][layer.idx()] = *affine;
    }

    fn dma_copy(&mut self, channel: DmaChannel, src: &[u8], dst: Region, offset: usize) {
        self.in_vblank = false;
        self.memory_mut(dst)[offset..offset + src.len()].copy_from_slice(src);
        self.dma_log.push(DmaTransfer {
            channel,
            region: dst,
            offset,
            len: src.len(),
        });
    }

    fn write_oam(&mut self, screen: Screen, image: &OamImage) {
        if !self.in_vblank || self.committed[screen.idx()] {
            self.tearing_writes += 1;
            warn!("{screen:?} OAM written outside vblank (frame {})", self.vblanks);
        }
        self.committed[screen.idx()] = true;
        self.oam[screen.idx()] = *image;
        self.oam_commits += 1;
    }

    fn wait_vblank(&mut self) {
        self.vblanks += 1;
        self.in_vblank = true;
        self.committed = [false; 2];
        trace!("vblank {}", self.vblanks);
    }

    fn read_keys(&mut self) -> Keys {
        self.in_vblank = false;

        let Some(step) = self.script.front_mut() else {
            return Keys::empty();
        };
        let mut keys = step.keys;
        if let Some(touch) = step.touch {
            keys |= Keys::TOUCH;
            self.touch = touch;
        } else {
            keys.remove(Keys::TOUCH);
        }
        step.frames -= 1;
        if step.frames == 0 {
            self.script.pop_front();
        }
        keys
    }

    fn read_touch(&mut self) -> TouchPosition {
        self.touch
    }

    fn play_sound(&mut self, sound: &SoundRequest<'_>) {
        self.sounds.push(SoundRecord {
            len: sound.len(),
            rate: sound.rate(),
            volume: sound.volume(),
            pan: sound.pan(),
            format: sound.format(),
            frame: self.vblanks,
        });
    }
}
