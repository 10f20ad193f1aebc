//! # DMA Asset Copies
//!
//! Every asset copy goes through [`copy_halfwords`]: a byte blob from program
//! storage lands at an offset inside one of the video memory [`Region`]s.
//! The hardware moves 16 bits at a time, so blobs must have even lengths.
//!
//! ```ignore
//! dma::copy_halfwords(
//!     &mut device,
//!     DmaChannel::LOW_PRIORITY,
//!     STAR_FIELD_BITMAP,
//!     Region::MainBg,
//!     dma::bmp_base_offset(0),
//! );
//! ```

use log::{debug, warn};

use crate::device::Device;

/// Bitmap backgrounds start on 16KB boundaries (`BG_BMP_BASE`).
pub const BMP_BASE_STRIDE: usize = 0x4000;

/// One of the four DMA channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DmaChannel(u8);

impl DmaChannel {
    /// Channel 3 has the lowest priority and is the usual pick for bulk copies.
    pub const LOW_PRIORITY: DmaChannel = DmaChannel(3);

    pub const fn new(channel: u8) -> Self {
        assert!(channel < 4);
        Self(channel)
    }

    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Video memory areas an asset can be copied into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Region {
    /// Main engine background memory, `$0600_0000`.
    MainBg,
    /// Sub engine background memory, `$0620_0000`.
    SubBg,
    /// Main engine sprite graphics, `$0640_0000`.
    SpriteGfx,
    /// Main engine sprite palettes, `$0500_0200`.
    SpritePalette,
    /// Main engine background palette, `$0500_0000`.
    BgPalette,
}

impl Region {
    pub const fn address(self) -> usize {
        match self {
            Region::MainBg => 0x0600_0000,
            Region::SubBg => 0x0620_0000,
            Region::SpriteGfx => 0x0640_0000,
            Region::SpritePalette => 0x0500_0200,
            Region::BgPalette => 0x0500_0000,
        }
    }

    /// Bytes addressable through this region with the demos' bank layout.
    pub const fn size(self) -> usize {
        match self {
            Region::MainBg => 0x4_0000,
            Region::SubBg => 0x2_0000,
            Region::SpriteGfx => 0x1_0000,
            Region::SpritePalette | Region::BgPalette => 0x200,
        }
    }
}

/// Byte offset of bitmap base `base` inside a background region.
pub const fn bmp_base_offset(base: u8) -> usize {
    base as usize * BMP_BASE_STRIDE
}

/// Copy `src` into `dst` at byte `offset`, 16 bits at a time.
///
/// Panics if the copy would run past the end of the region; that is a
/// layout mistake, not something to recover from.
pub fn copy_halfwords<D: Device>(
    device: &mut D,
    channel: DmaChannel,
    src: &[u8],
    dst: Region,
    offset: usize,
) {
    assert!(
        offset + src.len() <= dst.size(),
        "copy of {} bytes at {offset:#x} overruns {dst:?}",
        src.len()
    );
    assert!(offset % 2 == 0, "unaligned DMA destination {offset:#x}");
    if src.len() % 2 != 0 {
        warn!("odd-length copy into {dst:?}: last byte dropped");
    }

    let len = src.len() & !1;
    debug!(
        "dma{}: {len} bytes -> {dst:?}+{offset:#x} ({:#010x})",
        channel.idx(),
        dst.address() + offset
    );
    device.dma_copy(channel, &src[..len], dst, offset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimDevice;
    use pretty_assertions::assert_eq;

    #[test]
    fn copy_lands_at_bitmap_base() {
        let mut dev = SimDevice::new();
        let blob = [1u8, 2, 3, 4];
        copy_halfwords(&mut dev, DmaChannel::LOW_PRIORITY, &blob, Region::MainBg, bmp_base_offset(8));

        assert_eq!(&dev.memory(Region::MainBg)[0x2_0000..0x2_0004], &blob);
        assert_eq!(dev.dma_log().len(), 1);
        assert_eq!(dev.dma_log()[0].channel, DmaChannel::LOW_PRIORITY);
    }

    #[test]
    fn odd_length_drops_last_byte() {
        let mut dev = SimDevice::new();
        copy_halfwords(&mut dev, DmaChannel::new(0), &[9, 9, 9], Region::SpritePalette, 0);
        assert_eq!(&dev.memory(Region::SpritePalette)[..4], &[9, 9, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "overruns")]
    fn overrun_is_fatal() {
        let mut dev = SimDevice::new();
        copy_halfwords(&mut dev, DmaChannel::LOW_PRIORITY, &[0; 4], Region::SpritePalette, 0x1FE);
    }
}
