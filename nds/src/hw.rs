//! # Hardware Device
//!
//! [`Device`] over the ARM9's memory-mapped registers. Only valid when
//! running on the console itself.
//!
//! The X/Y buttons, the touch panel, the lid and the sound channels are
//! wired to the ARM7, so those go through an [`Arm7Link`] supplied by the
//! program (usually a FIFO or a shared-memory mailbox).
//!
//! ```ignore
//! let device = unsafe { Hardware::new(fifo) };
//! let mut console = Console::init(device, &video);
//! ```

use volatile_register::{RO, RW, WO};

use crate::{
    SCREEN_HEIGHT,
    device::Device,
    display::{BgAffine, BgLayer},
    dma::{DmaChannel, Region},
    input::{Keys, TouchPosition},
    oam::{OamImage, SPRITE_COUNT},
    scr::{BgControl, DisplayControl, PowerFlags, Screen, VramBank},
    sound::SoundRequest,
};

const MAIN_ENGINE: usize = 0x0400_0000;
const SUB_ENGINE: usize = 0x0400_1000;
const DMA_BASE: usize = 0x0400_00B0;
const KEYINPUT: usize = 0x0400_0130;
const VRAMCNT: usize = 0x0400_0240;
const POWCNT1: usize = 0x0400_0304;
const OAM_MAIN: usize = 0x0700_0000;
const OAM_SUB: usize = 0x0700_0400;

const DMA_ENABLE: u32 = 1 << 31;
const DMA_COUNT_MASK: u32 = 0x1F_FFFF;

/// Everything the ARM9 cannot read or drive itself.
pub trait Arm7Link {
    /// Raw active-low extended key bits (X, Y, pen-up, lid).
    fn ext_keys(&mut self) -> u16;
    fn touch(&mut self) -> TouchPosition;
    fn play_sound(&mut self, sound: &SoundRequest<'_>);
}

#[repr(C)]
pub struct AffineRegs {
    pub pa: WO<i16>,
    pub pb: WO<i16>,
    pub pc: WO<i16>,
    pub pd: WO<i16>,
    pub x: WO<i32>,
    pub y: WO<i32>,
}

/// 2D engine registers; the sub engine has the same layout at `$0400_1000`.
#[repr(C)]
pub struct Engine {
    pub dispcnt: RW<u32>,
    /// Main engine only.
    pub dispstat: RW<u16>,
    /// Main engine only.
    pub vcount: RO<u16>,
    pub bgcnt: [RW<u16>; 4],
    pub bgofs: [WO<u16>; 8],
    pub bg2: AffineRegs,
    pub bg3: AffineRegs,
}

#[repr(C)]
pub struct Dma {
    pub src: WO<u32>,
    pub dst: WO<u32>,
    pub cnt: RW<u32>,
}

pub struct Hardware<L: Arm7Link> {
    engines: [&'static mut Engine; 2],
    dma: &'static mut [Dma; 4],
    keyinput: &'static RO<u16>,
    vramcnt: &'static mut [WO<u8>; 5],
    powcnt: &'static mut RW<u16>,
    oam: [&'static mut [WO<u16>; SPRITE_COUNT * 4]; 2],
    link: L,
}

impl<L: Arm7Link> Hardware<L> {
    /// # Safety
    /// Must run on the ARM9 and be the only owner of these registers.
    pub unsafe fn new(link: L) -> Self {
        unsafe {
            Self {
                engines: [&mut *(MAIN_ENGINE as *mut Engine), &mut *(SUB_ENGINE as *mut Engine)],
                dma: &mut *(DMA_BASE as *mut [Dma; 4]),
                keyinput: &*(KEYINPUT as *const RO<u16>),
                vramcnt: &mut *(VRAMCNT as *mut [WO<u8>; 5]),
                powcnt: &mut *(POWCNT1 as *mut RW<u16>),
                oam: [
                    &mut *(OAM_MAIN as *mut [WO<u16>; SPRITE_COUNT * 4]),
                    &mut *(OAM_SUB as *mut [WO<u16>; SPRITE_COUNT * 4]),
                ],
                link,
            }
        }
    }

    fn affine(&mut self, screen: Screen, layer: BgLayer) -> &mut AffineRegs {
        let engine = &mut *self.engines[screen.idx()];
        match layer {
            BgLayer::Bg2 => &mut engine.bg2,
            BgLayer::Bg3 => &mut engine.bg3,
            _ => panic!("{layer:?} has no affine registers"),
        }
    }

    fn vcount(&self) -> u16 {
        self.engines[Screen::Main.idx()].vcount.read()
    }
}

impl<L: Arm7Link> Device for Hardware<L> {
    fn set_power(&mut self, flags: PowerFlags) {
        unsafe { self.powcnt.write(flags.bits()) };
    }

    fn set_vram_bank(&mut self, bank: VramBank, control: u8) {
        unsafe { self.vramcnt[bank.idx()].write(control) };
    }

    fn set_display_control(&mut self, screen: Screen, control: DisplayControl) {
        unsafe { self.engines[screen.idx()].dispcnt.write(control.bits()) };
    }

    fn set_bg_control(&mut self, screen: Screen, layer: BgLayer, control: BgControl) {
        unsafe { self.engines[screen.idx()].bgcnt[layer.idx()].write(control.bits()) };
    }

    fn set_bg_affine(&mut self, screen: Screen, layer: BgLayer, affine: &BgAffine) {
        let regs = self.affine(screen, layer);
        unsafe {
            regs.pa.write(affine.matrix.pa);
            regs.pb.write(affine.matrix.pb);
            regs.pc.write(affine.matrix.pc);
            regs.pd.write(affine.matrix.pd);
            regs.x.write(affine.x);
            regs.y.write(affine.y);
        }
    }

    fn dma_copy(&mut self, channel: DmaChannel, src: &[u8], dst: Region, offset: usize) {
        let count = (src.len() / 2) as u32;
        if count == 0 {
            return;
        }
        debug_assert!(count <= DMA_COUNT_MASK);

        let dma = &mut self.dma[channel.idx()];
        unsafe {
            dma.src.write(src.as_ptr() as u32);
            dma.dst.write((dst.address() + offset) as u32);
            // 16-bit units, both addresses incrementing
            dma.cnt.write(DMA_ENABLE | (count & DMA_COUNT_MASK));
        }
        while dma.cnt.read() & DMA_ENABLE != 0 {}
    }

    fn write_oam(&mut self, screen: Screen, image: &OamImage) {
        let oam = &mut *self.oam[screen.idx()];
        for (reg, half) in oam.iter_mut().zip(image.as_halfwords()) {
            unsafe { reg.write(half) };
        }
    }

    fn wait_vblank(&mut self) {
        let first_blank_line = SCREEN_HEIGHT as u16;
        // finish the blank we may be in, then wait for the next one
        while self.vcount() >= first_blank_line {}
        while self.vcount() < first_blank_line {}
    }

    fn read_keys(&mut self) -> Keys {
        Keys::from_keyinput(self.keyinput.read()) | Keys::from_ext_keys(self.link.ext_keys())
    }

    fn read_touch(&mut self) -> TouchPosition {
        self.link.touch()
    }

    fn play_sound(&mut self, sound: &SoundRequest<'_>) {
        self.link.play_sound(sound);
    }
}
