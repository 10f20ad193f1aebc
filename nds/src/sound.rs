//! # Sound
//!
//! Sample playback is handled by the ARM7; the ARM9 side only hands over a
//! description of the sample. [`SoundRequest`] is that description, built
//! once and fired as often as needed.
//!
//! ```ignore
//! let thrust = SoundRequest::new(THRUST_RAW, 22050, SampleFormat::Bits8)
//!     .with_volume(127)
//!     .with_pan(64);
//!
//! let mut trigger = SoundTrigger::new(Keys::UP, thrust);
//! loop {
//!     console.scan_input();
//!     trigger.poll(&console.keys, &mut console.device);
//!     // ...
//! }
//! ```

use log::debug;

use crate::{
    device::Device,
    input::{KeyState, Keys},
};

pub const MAX_VOLUME: u8 = 127;
pub const MAX_PAN: u8 = 127;
pub const PAN_CENTER: u8 = 64;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    Bits16 = 0,
    Bits8 = 1,
}

impl SampleFormat {
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::Bits16 => 2,
            SampleFormat::Bits8 => 1,
        }
    }
}

/// An immutable one-shot playback description.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SoundRequest<'a> {
    data: &'a [u8],
    rate: u32,
    volume: u8,
    pan: u8,
    format: SampleFormat,
}

impl<'a> SoundRequest<'a> {
    /// Full volume, centered.
    pub const fn new(data: &'a [u8], rate: u32, format: SampleFormat) -> Self {
        Self {
            data,
            rate,
            volume: MAX_VOLUME,
            pan: PAN_CENTER,
            format,
        }
    }

    /// 0 (silent) to 127.
    pub const fn with_volume(self, volume: u8) -> Self {
        assert!(volume <= MAX_VOLUME);
        Self { volume, ..self }
    }

    /// 0 (left) to 127 (right).
    pub const fn with_pan(self, pan: u8) -> Self {
        assert!(pan <= MAX_PAN);
        Self { pan, ..self }
    }

    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Length in bytes.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub const fn rate(&self) -> u32 {
        self.rate
    }

    pub const fn volume(&self) -> u8 {
        self.volume
    }

    pub const fn pan(&self) -> u8 {
        self.pan
    }

    pub const fn format(&self) -> SampleFormat {
        self.format
    }

    /// Playback length in milliseconds.
    pub const fn duration_ms(&self) -> u32 {
        if self.rate == 0 {
            return 0;
        }
        let samples = self.data.len() / self.format.bytes_per_sample();
        (samples as u64 * 1000 / self.rate as u64) as u32
    }
}

/// Plays a sound once per press of a key, never while it is merely held.
#[derive(Copy, Clone, Debug)]
pub struct SoundTrigger<'a> {
    key: Keys,
    sound: SoundRequest<'a>,
    fired: u32,
}

impl<'a> SoundTrigger<'a> {
    pub const fn new(key: Keys, sound: SoundRequest<'a>) -> Self {
        Self { key, sound, fired: 0 }
    }

    /// Fire if `key` went down this frame. Returns whether it fired.
    pub fn poll<D: Device>(&mut self, keys: &KeyState, device: &mut D) -> bool {
        if !keys.just_pressed(self.key) {
            return false;
        }
        device.play_sound(&self.sound);
        self.fired += 1;
        debug!("sound fired ({} total)", self.fired);
        true
    }

    /// How many times the sound has been fired.
    pub const fn fired(&self) -> u32 {
        self.fired
    }

    pub const fn sound(&self) -> &SoundRequest<'a> {
        &self.sound
    }
}
