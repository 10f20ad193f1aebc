//! Whole-frame runs of the demos on the simulated device.

use nds::{
    input::{Keys, TouchPosition},
    math::Vec2,
    scr::Screen,
    sim::SimDevice,
};
use orange_shuttle::{
    Chapter, Demo, DemoConfig,
    assets::AssetBuffers,
    config::ShipTuning,
    sprites::{MOON, SHUTTLE},
};
use pretty_assertions::assert_eq;

fn assets() -> Box<AssetBuffers> {
    let mut buffers = Box::new(AssetBuffers::new());
    buffers.generate();
    buffers
}

fn sounds_demo(buffers: &AssetBuffers, config: DemoConfig) -> Demo<'_, SimDevice> {
    Demo::new(SimDevice::new(), &config, &buffers.assets()).unwrap()
}

fn run(demo: &mut Demo<'_, SimDevice>, frames: u32) {
    for _ in 0..frames {
        demo.frame();
    }
}

#[test]
fn speed_stays_under_the_cap_for_any_key_pattern() {
    let buffers = assets();
    let mut demo = sounds_demo(&buffers, DemoConfig::default());
    let max = demo.ship.tuning().max_speed;

    // every combination of thrust / reverse / turn, held for a while each
    for pattern in 0u16..16 {
        let mut keys = Keys::empty();
        keys.set(Keys::UP, pattern & 1 != 0);
        keys.set(Keys::DOWN, pattern & 2 != 0);
        keys.set(Keys::LEFT, pattern & 4 != 0);
        keys.set(Keys::RIGHT, pattern & 8 != 0);
        demo.console.device.push_input(keys, None, 37);
    }
    for _ in 0..16 * 37 {
        demo.frame();
        assert!(demo.ship.speed() <= max, "speed {}", demo.ship.speed());
    }
}

#[test]
fn holding_up_flies_up_the_screen_from_heading_zero() {
    let buffers = assets();
    let mut config = DemoConfig::default();
    config.placement.shuttle = Vec2::new(0, 0);
    config.placement.shuttle_angle = nds::math::Angle::ZERO;
    config.ship = ShipTuning {
        thrust: 0.1,
        ..ShipTuning::default()
    };
    let mut demo = sounds_demo(&buffers, config);

    demo.console.device.push_input(Keys::UP, None, 30);
    let mut last = demo.ship.position.y;
    for _ in 0..30 {
        demo.frame();
        assert!(demo.ship.position.y < last);
        last = demo.ship.position.y;
    }
    assert!((demo.ship.speed() - config.ship.max_speed).abs() < 1e-4);
}

#[test]
fn a_full_circle_of_turning_returns_the_heading() {
    let buffers = assets();
    let mut demo = sounds_demo(&buffers, DemoConfig::default());
    let start = demo.ship.heading;

    demo.console.device.push_input(Keys::RIGHT, None, 512);
    run(&mut demo, 512);
    assert_eq!(demo.ship.heading, start);

    demo.console.device.push_input(Keys::LEFT, None, 512);
    run(&mut demo, 512);
    assert_eq!(demo.ship.heading, start);
}

#[test]
fn dragging_the_moon() {
    let buffers = assets();
    let mut config = DemoConfig::default();
    config.placement.moon = Vec2::new(100, 100);
    let mut demo = sounds_demo(&buffers, config);
    let dev = &mut demo.console.device;

    dev.push_input(Keys::empty(), Some(TouchPosition::new(20, 20)), 1);
    dev.push_input(Keys::empty(), Some(TouchPosition::new(45, 45)), 1);
    dev.push_input(Keys::empty(), Some(TouchPosition::new(70, 70)), 1);
    dev.push_input(Keys::empty(), None, 1);
    run(&mut demo, 4);
    assert_eq!(demo.moon.position, Vec2::new(150, 150));

    // a fresh touch re-grips instead of jumping
    let dev = &mut demo.console.device;
    dev.push_input(Keys::empty(), Some(TouchPosition::new(0, 150)), 1);
    dev.push_input(Keys::empty(), Some(TouchPosition::new(200, 150)), 1);
    run(&mut demo, 2);
    assert_eq!(demo.moon.position, Vec2::new(224, 150));

    let oam = demo.console.device.oam(Screen::Main);
    assert_eq!(oam.entry(MOON.idx()).position(), Vec2::new(224, 150));
}

#[test]
fn dragging_off_screen_stops_on_the_edge() {
    let buffers = assets();
    let mut config = DemoConfig::default();
    config.placement.moon = Vec2::new(100, 100);
    let mut demo = sounds_demo(&buffers, config);

    demo.console.device.push_input(Keys::empty(), Some(TouchPosition::new(100, 100)), 1);
    demo.console.device.push_input(Keys::empty(), Some(TouchPosition::new(255, 191)), 1);
    run(&mut demo, 2);
    assert_eq!(demo.moon.position, Vec2::new(224, 160));

    demo.console.device.push_input(Keys::empty(), Some(TouchPosition::new(0, 0)), 1);
    run(&mut demo, 1);
    assert_eq!(demo.moon.position, Vec2::new(0, 0));
}

#[test]
fn thrust_sound_once_per_press() {
    let buffers = assets();
    let mut demo = sounds_demo(&buffers, DemoConfig::default());
    let dev = &mut demo.console.device;
    dev.push_input(Keys::UP, None, 20);
    dev.push_input(Keys::empty(), None, 3);
    dev.push_input(Keys::UP | Keys::RIGHT, None, 5);
    dev.push_input(Keys::RIGHT, None, 5);
    dev.push_input(Keys::UP, None, 1);
    run(&mut demo, 34);

    let sounds = demo.console.device.sounds();
    assert_eq!(sounds.len(), 3);
    assert_eq!(sounds.iter().map(|s| s.frame).collect::<Vec<_>>(), vec![0, 23, 33]);
    assert!(sounds.iter().all(|s| s.rate == 22050 && s.volume == 127 && s.pan == 64));
}

#[test]
fn sprite_table_is_only_committed_in_vblank() {
    let buffers = assets();
    for chapter in Chapter::ALL {
        let config = DemoConfig {
            chapter,
            ..DemoConfig::default()
        };
        let mut demo = sounds_demo(&buffers, config);
        demo.console.device.push_input(Keys::UP | Keys::LEFT, Some(TouchPosition::new(5, 5)), 60);
        run(&mut demo, 120);

        let dev = &demo.console.device;
        assert_eq!(dev.tearing_writes(), 0, "{chapter}");
        assert_eq!(dev.vblanks(), 120, "{chapter}");
        let commits = if chapter.has_sprites() { 120 } else { 0 };
        assert_eq!(dev.oam_commits(), commits, "{chapter}");
    }
}

#[test]
fn a_second_commit_without_a_new_vblank_is_caught() {
    let buffers = assets();
    for chapter in [Chapter::Sprites, Chapter::Sounds] {
        let config = DemoConfig {
            chapter,
            ..DemoConfig::default()
        };
        let mut demo = sounds_demo(&buffers, config);
        run(&mut demo, 10);
        assert_eq!(demo.console.device.tearing_writes(), 0, "{chapter}");

        demo.console.commit_sprites();
        assert_eq!(demo.console.device.tearing_writes(), 1, "{chapter}");
    }
}

#[test]
fn ship_sprite_tracks_position_and_heading() {
    let buffers = assets();
    let mut demo = sounds_demo(&buffers, DemoConfig::default());
    demo.console.device.push_input(Keys::UP, None, 10);
    run(&mut demo, 10);

    let oam = demo.console.device.oam(Screen::Main);
    let ship = oam.entry(SHUTTLE.idx());
    assert_eq!(ship.position(), demo.ship.sprite_position());
    assert_eq!(
        oam.matrix(0),
        nds::display::AffineMatrix::rotation(demo.ship.heading)
    );
}
