use nds::{
    SCREEN_HEIGHT, SCREEN_WIDTH,
    display::{BackgroundConfig, BgLayer, BgSize, VideoConfig, VramLayout},
    math::{Angle, Vec2},
    scr::{DisplayControl, PowerFlags, Screen, VideoMode, VramMapping},
    sound::{PAN_CENTER, SampleFormat},
};

use crate::chapter::Chapter;

/// How the ship handles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShipTuning {
    /// Speed gained per frame of thrust, in pixels per frame.
    pub thrust: f32,
    /// Speed cap, in pixels per frame.
    pub max_speed: f32,
    /// Heading change per frame of turning, in 1/512ths of a turn.
    pub turn_step: i32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            thrust: 0.05,
            max_speed: 2.0,
            // about four degrees
            turn_step: 6,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SoundConfig {
    pub rate: u32,
    pub volume: u8,
    pub pan: u8,
    pub format: SampleFormat,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            rate: 22050,
            volume: 127,
            pan: PAN_CENTER,
            format: SampleFormat::Bits8,
        }
    }
}

/// Where the sprites start out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub shuttle: Vec2<i32>,
    pub shuttle_angle: Angle,
    pub moon: Vec2<i32>,
}

pub const SHUTTLE_SIZE: i32 = 64;
pub const MOON_SIZE: i32 = 32;

impl Default for Placement {
    fn default() -> Self {
        Self {
            shuttle: Vec2::new(
                SCREEN_WIDTH / 2 - SHUTTLE_SIZE * 2 + SHUTTLE_SIZE / 2,
                SCREEN_HEIGHT / 2 - SHUTTLE_SIZE,
            ),
            shuttle_angle: Angle::new(462),
            // measured against the screen width on both axes
            moon: Vec2::new(
                SCREEN_WIDTH / 2 + MOON_SIZE + MOON_SIZE / 2,
                SCREEN_WIDTH / 2 + MOON_SIZE / 2,
            ),
        }
    }
}

/// Everything a demo run can be tuned with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub chapter: Chapter,
    pub ship: ShipTuning,
    pub sound: SoundConfig,
    pub placement: Placement,
    /// Put the main engine (and its sprites) on the touch screen.
    pub main_on_bottom: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            chapter: Chapter::Sounds,
            ship: ShipTuning::default(),
            sound: SoundConfig::default(),
            placement: Placement::default(),
            main_on_bottom: true,
        }
    }
}

impl DemoConfig {
    pub fn video(&self) -> VideoConfig {
        let mut main = VideoMode::Mode5.control() | BgLayer::Bg2.display_flag() | BgLayer::Bg3.display_flag();
        if self.chapter.has_sprites() {
            main |= DisplayControl::SPRITES | DisplayControl::SPRITES_1D;
        }

        VideoConfig {
            power: PowerFlags::ALL_2D,
            main_on_bottom: self.main_on_bottom,
            banks: VramLayout {
                a: VramMapping::MainBg { slot: 0 },
                b: VramMapping::MainBg { slot: 1 },
                c: VramMapping::SubBg,
                d: VramMapping::Lcd,
                e: if self.chapter.has_sprites() {
                    VramMapping::MainSprite { slot: 0 }
                } else {
                    VramMapping::Lcd
                },
            },
            main,
            sub: VideoMode::Mode5.control() | BgLayer::Bg3.display_flag(),
        }
    }
}

pub const STAR_FIELD: BackgroundConfig = BackgroundConfig {
    screen: Screen::Main,
    layer: BgLayer::Bg3,
    size: BgSize::Bmp16x256x256,
    map_base: 0,
    priority: 3,
    scroll: Vec2::new(0, 0),
};

pub const PLANET: BackgroundConfig = BackgroundConfig {
    screen: Screen::Main,
    layer: BgLayer::Bg2,
    size: BgSize::Bmp16x128x128,
    map_base: 8,
    priority: 2,
    scroll: Vec2::new(-(SCREEN_WIDTH / 2 - 32), -32),
};

pub const SPLASH: BackgroundConfig = BackgroundConfig {
    screen: Screen::Sub,
    layer: BgLayer::Bg3,
    size: BgSize::Bmp16x256x256,
    map_base: 0,
    priority: 3,
    scroll: Vec2::new(0, 0),
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_placement() {
        let p = Placement::default();
        assert_eq!(p.shuttle, Vec2::new(32, 32));
        assert_eq!(p.moon, Vec2::new(176, 144));
        assert_eq!(p.shuttle_angle.units(), 462);
    }

    #[test]
    fn sprite_chapters_enable_objects() {
        let cfg = DemoConfig::default();
        assert_eq!(cfg.video().main.bits(), 0x11C15);
        assert_eq!(cfg.video().sub.bits(), 0x10805);

        let bare = DemoConfig {
            chapter: Chapter::Backgrounds,
            ..DemoConfig::default()
        };
        assert!(!bare.video().main.contains(DisplayControl::SPRITES));
        assert_eq!(bare.video().banks.e, VramMapping::Lcd);
    }
}
