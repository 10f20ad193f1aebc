//! # Input
//!
//! Buttons come in as one 16-bit mask per frame. [`KeyState`] keeps this
//! frame's mask and last frame's, which is all it takes to tell a press edge
//! from a held key.
//!
//! ```ignore
//! console.scan_input();
//! if console.keys.just_pressed(Keys::UP) {
//!     // fires once per press
//! }
//! if console.keys.is_held(Keys::UP) {
//!     // fires every frame the key stays down
//! }
//! ```
//!
//! The touch panel reports a position only while the pen is down, which
//! shows up as [`Keys::TOUCH`] being held.

use bit_field::BitField;

use crate::math::Vec2;

bitflags::bitflags! {
    /// Button mask, in the same bit order as the hardware key registers
    /// with the ARM7-only keys folded in above bit 9.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Keys: u16 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const RIGHT  = 1 << 4;
        const LEFT   = 1 << 5;
        const UP     = 1 << 6;
        const DOWN   = 1 << 7;
        const R      = 1 << 8;
        const L      = 1 << 9;
        const X      = 1 << 10;
        const Y      = 1 << 11;
        /// Pen on the touch panel.
        const TOUCH  = 1 << 12;
        /// Lid closed.
        const LID    = 1 << 13;
    }
}

impl Keys {
    /// Decode the active-low `KEYINPUT` register (A..L in bits 0-9).
    pub fn from_keyinput(raw: u16) -> Keys {
        Keys::from_bits_truncate(!raw & 0x03FF)
    }

    /// Decode the active-low extended key byte the ARM7 sees
    /// (X, Y, debug, pen-up, lid).
    pub fn from_ext_keys(raw: u16) -> Keys {
        let mut keys = Keys::empty();
        keys.set(Keys::X, !raw.get_bit(0));
        keys.set(Keys::Y, !raw.get_bit(1));
        keys.set(Keys::TOUCH, !raw.get_bit(6));
        keys.set(Keys::LID, raw.get_bit(7));
        keys
    }
}

/// Key mask for this frame and the one before.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub keys: Keys,
    pub keys_last: Keys,
}

impl KeyState {
    pub const fn new() -> Self {
        Self {
            keys: Keys::empty(),
            keys_last: Keys::empty(),
        }
    }

    /// Shift in a freshly sampled mask.
    pub fn update(&mut self, now: Keys) {
        self.keys_last = self.keys;
        self.keys = now;
    }

    /// Keys down this frame.
    #[inline]
    pub fn held(&self) -> Keys {
        self.keys
    }

    /// Keys that went down this frame.
    #[inline]
    pub fn down(&self) -> Keys {
        self.keys & !self.keys_last
    }

    /// Keys that went up this frame.
    #[inline]
    pub fn up(&self) -> Keys {
        self.keys_last & !self.keys
    }

    #[inline]
    pub fn is_held(&self, key: Keys) -> bool {
        self.keys.intersects(key)
    }

    /// Returns true only on the frame the key was first pressed (edge-trigger).
    #[inline]
    pub fn just_pressed(&self, key: Keys) -> bool {
        self.down().intersects(key)
    }

    /// Returns true only on the frame the key was released (edge-trigger).
    #[inline]
    pub fn just_released(&self, key: Keys) -> bool {
        self.up().intersects(key)
    }
}

/// Touch panel reading in screen pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TouchPosition {
    pub px: u16,
    pub py: u16,
}

impl TouchPosition {
    pub const fn new(px: u16, py: u16) -> Self {
        Self { px, py }
    }

    pub fn point(self) -> Vec2<i32> {
        Vec2::new(self.px as i32, self.py as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn press_hold_release_edges() {
        let mut ks = KeyState::new();

        ks.update(Keys::UP);
        assert!(ks.just_pressed(Keys::UP));
        assert!(ks.is_held(Keys::UP));

        ks.update(Keys::UP | Keys::LEFT);
        assert!(!ks.just_pressed(Keys::UP));
        assert!(ks.just_pressed(Keys::LEFT));
        assert_eq!(ks.down(), Keys::LEFT);

        ks.update(Keys::LEFT);
        assert!(ks.just_released(Keys::UP));
        assert_eq!(ks.up(), Keys::UP);
        assert_eq!(ks.held(), Keys::LEFT);
    }

    #[test]
    fn keyinput_is_active_low() {
        // all released
        assert_eq!(Keys::from_keyinput(0x03FF), Keys::empty());
        // A and UP pressed
        assert_eq!(Keys::from_keyinput(0x03FF & !(1 | 1 << 6)), Keys::A | Keys::UP);
    }

    #[test]
    fn ext_keys_decode() {
        // X pressed, pen down, lid open
        let raw = 0b0000_0010;
        assert_eq!(Keys::from_ext_keys(raw), Keys::X | Keys::TOUCH);
        // nothing pressed, pen up, lid closed
        assert_eq!(Keys::from_ext_keys(0b1100_0011), Keys::LID);
    }
}
