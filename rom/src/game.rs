use log::{info, trace};
use nds::{
    console::Console,
    device::Device,
    input::Keys,
    sound::{SoundRequest, SoundTrigger},
    tiles::AllocError,
};

use crate::{
    assets::Assets,
    backgrounds::Backgrounds,
    chapter::Chapter,
    config::{DemoConfig, MOON_SIZE},
    moon::Moon,
    ship::Ship,
    sprites::{self, MOON, SHUTTLE},
};

/// A running chapter: the console plus all game state.
pub struct Demo<'a, D: Device> {
    pub console: Console<D>,
    pub chapter: Chapter,
    pub ship: Ship,
    pub moon: Moon,
    pub thrust: SoundTrigger<'a>,
}

impl<'a, D: Device> Demo<'a, D> {
    /// Configure the hardware and load everything the chapter shows.
    pub fn new(device: D, config: &DemoConfig, assets: &Assets<'a>) -> Result<Self, AllocError> {
        let chapter = config.chapter;
        let mut console = Console::init(device, &config.video());

        let backgrounds = Backgrounds::init(&mut console);
        if chapter.has_sprites() {
            sprites::init_sprites(&mut console, assets, &config.placement)?;
        }
        backgrounds.display(&mut console, assets);

        let sound = SoundRequest::new(assets.thrust, config.sound.rate, config.sound.format)
            .with_volume(config.sound.volume)
            .with_pan(config.sound.pan);

        info!("{chapter} ready");

        Ok(Self {
            console,
            chapter,
            ship: Ship::new(
                config.placement.shuttle.to_f32(),
                config.placement.shuttle_angle,
                config.ship,
            ),
            moon: Moon::new(config.placement.moon, MOON_SIZE, MOON_SIZE),
            thrust: SoundTrigger::new(Keys::UP, sound),
        })
    }

    /// React to this frame's keys and touch.
    ///
    /// Up beats Down and Left beats Right when both are held.
    pub fn handle_input(&mut self) {
        let keys = self.console.keys;

        self.thrust.poll(&keys, &mut self.console.device);
        if keys.is_held(Keys::UP) {
            self.ship.accelerate();
        } else if keys.is_held(Keys::DOWN) {
            self.ship.reverse_turn();
        }

        if keys.is_held(Keys::LEFT) {
            self.ship.turn_counter_clockwise();
        } else if keys.is_held(Keys::RIGHT) {
            self.ship.turn_clockwise();
        }

        self.moon.drag(&keys, self.console.touch);
    }

    /// Copy game state into the shadow sprite table.
    fn update_sprites(&mut self) {
        let sprites = &mut self.console.sprites;
        sprites.set_position(SHUTTLE, self.ship.sprite_position());
        sprites.set_angle(SHUTTLE, self.ship.heading);
        sprites.set_position(MOON, self.moon.position);
    }

    /// Run one frame, ending on the vertical blank.
    pub fn frame(&mut self) {
        match self.chapter {
            Chapter::Backgrounds => self.console.wait_vblank(),
            Chapter::Sprites => self.console.present(),
            Chapter::Sounds => {
                self.console.scan_input();
                self.handle_input();
                self.ship.move_ship();
                self.update_sprites();
                trace!(
                    "ship {:?} v {:?} heading {}, moon {:?}",
                    self.ship.position,
                    self.ship.velocity,
                    self.ship.heading.units(),
                    self.moon.position
                );
                self.console.present();
            }
        }
    }

    /// The demo never ends on hardware.
    pub fn run(mut self) -> ! {
        loop {
            self.frame();
        }
    }
}
