use nds::math::{self, Angle, Vec2};

use crate::config::ShipTuning;

/// The player's shuttle: a point with momentum and a heading.
///
/// Heading 0 points up the screen and grows clockwise, in the same
/// 512-unit circle the sprite hardware uses, so the heading can be handed
/// straight to the rotation matrix.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ship {
    pub position: Vec2<f32>,
    pub velocity: Vec2<f32>,
    pub heading: Angle,
    tuning: ShipTuning,
}

impl Ship {
    /// A ship at rest.
    pub fn new(position: Vec2<f32>, heading: Angle, tuning: ShipTuning) -> Self {
        Self {
            position,
            velocity: Vec2::new(0.0, 0.0),
            heading,
            tuning,
        }
    }

    pub fn tuning(&self) -> &ShipTuning {
        &self.tuning
    }

    /// Thrust along the heading, then cap the speed.
    pub fn accelerate(&mut self) {
        self.velocity += self.heading.direction() * self.tuning.thrust;

        let max = self.tuning.max_speed;
        let speed = self.speed();
        if !(speed > max) {
            return;
        }
        if max <= 0.0 {
            self.velocity = Vec2::new(0.0, 0.0);
            return;
        }

        // the rescaled length can round a few ulps over; step the scale down
        let unscaled = self.velocity;
        let mut scale = max / speed;
        loop {
            self.velocity = unscaled * scale;
            if self.speed() <= max || scale == 0.0 {
                break;
            }
            scale = f32::from_bits(scale.to_bits() - 1);
        }
    }

    /// Point the nose against the direction of travel, so that thrusting
    /// slows the ship down. A ship at rest keeps its heading.
    pub fn reverse_turn(&mut self) {
        let Vec2 { x, y } = self.velocity;
        if x == 0.0 && y == 0.0 {
            return;
        }
        // direction() is (sin, -cos): travel points at atan2(vx, -vy)
        let travel = math::atan2(x, -y);
        self.heading = Angle::from_radians(travel).turn(Angle::FULL_CIRCLE as i32 / 2);
    }

    pub fn turn_clockwise(&mut self) {
        self.heading = self.heading.turn(self.tuning.turn_step);
    }

    pub fn turn_counter_clockwise(&mut self) {
        self.heading = self.heading.turn(self.tuning.turn_step.wrapping_neg());
    }

    /// One frame of motion. The ship may fly off screen.
    pub fn move_ship(&mut self) {
        self.position += self.velocity;
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Sprite position; fractional pixels are truncated.
    pub fn sprite_position(&self) -> Vec2<i32> {
        self.position.to_i32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ship(thrust: f32) -> Ship {
        let tuning = ShipTuning {
            thrust,
            ..ShipTuning::default()
        };
        Ship::new(Vec2::new(0.0, 0.0), Angle::ZERO, tuning)
    }

    #[test]
    fn thrust_at_heading_zero_moves_up() {
        let mut s = ship(0.1);
        let mut last_y = s.position.y;
        for _ in 0..10 {
            s.accelerate();
            s.move_ship();
            assert!(s.position.y < last_y);
            assert!(s.position.x.abs() < 1e-6);
            last_y = s.position.y;
        }
    }

    #[test]
    fn speed_is_capped() {
        let mut s = ship(0.5);
        for n in 0..100 {
            if n % 7 == 0 {
                s.turn_clockwise();
            }
            s.accelerate();
            assert!(s.speed() <= s.tuning().max_speed, "speed {}", s.speed());
        }
    }

    #[test]
    fn cap_holds_exactly_for_every_turn_step_and_thrust() {
        for turn_step in 1..40 {
            for thrust in [0.05, 0.1, 0.3, 0.7, 1.0, 1.3] {
                let tuning = ShipTuning {
                    thrust,
                    max_speed: 2.0,
                    turn_step,
                };
                let mut s = Ship::new(Vec2::new(0.0, 0.0), Angle::ZERO, tuning);
                for _ in 0..600 {
                    s.turn_clockwise();
                    s.accelerate();
                    assert!(s.speed() <= 2.0, "speed {} at step {turn_step}", s.speed());
                }
            }
        }
    }

    #[test]
    fn huge_turn_steps_wrap() {
        let tuning = ShipTuning {
            turn_step: i32::MAX,
            ..ShipTuning::default()
        };
        let mut s = Ship::new(Vec2::new(0.0, 0.0), Angle::new(10), tuning);
        s.turn_clockwise();
        assert_eq!(s.heading, Angle::new(10 + i32::MAX % 512));
        s.turn_counter_clockwise();
        assert_eq!(s.heading, Angle::new(10));
    }

    #[test]
    fn capped_ship_keeps_its_top_speed() {
        let mut s = ship(0.3);
        for _ in 0..50 {
            s.accelerate();
        }
        assert!(s.speed() <= 2.0);
        assert!(s.speed() > 2.0 - 1e-5);
    }

    #[test]
    fn full_circle_of_turns_restores_heading() {
        let mut s = ship(0.1);
        s.heading = Angle::new(462);
        for _ in 0..512 {
            s.turn_clockwise();
        }
        assert_eq!(s.heading, Angle::new(462));
        for _ in 0..512 {
            s.turn_counter_clockwise();
        }
        assert_eq!(s.heading, Angle::new(462));
    }

    #[test]
    fn reverse_turn_points_against_travel() {
        let mut s = ship(0.1);
        // heading right (128 = a quarter turn clockwise from up)
        s.heading = Angle::new(128);
        s.accelerate();
        s.reverse_turn();
        assert_eq!(s.heading, Angle::new(384));

        // thrusting now brakes
        let before = s.speed();
        s.accelerate();
        assert!(s.speed() < before);
    }

    #[test]
    fn reverse_turn_at_rest_keeps_heading() {
        let mut s = ship(0.1);
        s.heading = Angle::new(40);
        s.reverse_turn();
        assert_eq!(s.heading, Angle::new(40));
    }
}
