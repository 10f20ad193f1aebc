//! # Math
//!
//! 2D vectors, device angles and the handful of float helpers the kinematics
//! need without `std`.
//!
//! Angles use the hardware convention: a full turn is 512 units, so
//! `Angle::new(128)` is a quarter turn clockwise on screen.

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::trig::{FULL_CIRCLE, cos_lut, sin_lut};

const TAU: f32 = core::f32::consts::TAU;
const FIXED_ONE: f32 = 4096.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vec2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Vec2<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: AddAssign> AddAssign for Vec2<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: SubAssign> SubAssign for Vec2<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: Neg<Output = T>> Neg for Vec2<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for Vec2<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Vec2<f32> {
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        sqrt(self.length_squared())
    }

    /// Truncates toward zero, like the C cast the sprite attributes get.
    pub fn to_i32(self) -> Vec2<i32> {
        Vec2::new(self.x as i32, self.y as i32)
    }
}

impl Vec2<i32> {
    pub fn to_f32(self) -> Vec2<f32> {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// An angle in device units, always kept in `0..512`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Angle(u16);

impl Angle {
    pub const FULL_CIRCLE: u16 = FULL_CIRCLE as u16;
    pub const ZERO: Angle = Angle(0);

    pub const fn new(units: i32) -> Self {
        Self(units.rem_euclid(FULL_CIRCLE) as u16)
    }

    pub const fn units(self) -> u16 {
        self.0
    }

    /// Rotate by `delta` units, wrapping around the circle. Any `delta`
    /// is accepted; 2^32 is a whole number of turns.
    #[must_use]
    pub const fn turn(self, delta: i32) -> Self {
        Self::new((self.0 as i32).wrapping_add(delta))
    }

    /// Nearest device angle to `radians`.
    pub fn from_radians(radians: f32) -> Self {
        let units = radians * (FULL_CIRCLE as f32 / TAU);
        Self::new(round(units))
    }

    pub fn to_radians(self) -> f32 {
        self.0 as f32 * (TAU / FULL_CIRCLE as f32)
    }

    /// Sine in 4.12 fixed point.
    pub const fn sin_fixed(self) -> i32 {
        sin_lut(self.0 as i32)
    }

    /// Cosine in 4.12 fixed point.
    pub const fn cos_fixed(self) -> i32 {
        cos_lut(self.0 as i32)
    }

    pub fn sin(self) -> f32 {
        self.sin_fixed() as f32 / FIXED_ONE
    }

    pub fn cos(self) -> f32 {
        self.cos_fixed() as f32 / FIXED_ONE
    }

    /// Unit vector pointing along this heading. Heading 0 points up the
    /// screen and angles grow clockwise.
    pub fn direction(self) -> Vec2<f32> {
        Vec2::new(self.sin(), -self.cos())
    }
}

/// Round half away from zero.
pub fn round(x: f32) -> i32 {
    if x < 0.0 {
        (x - 0.5) as i32
    } else {
        (x + 0.5) as i32
    }
}

/// Square root by Newton iteration.
pub fn sqrt(x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    // exponent halving gives a guess within a factor of two
    let mut guess = f32::from_bits((x.to_bits() >> 1) + 0x1FC0_0000);
    for _ in 0..4 {
        guess = 0.5 * (guess + x / guess);
    }
    guess
}

/// Four-quadrant arctangent, accurate to about a thousandth of a radian.
pub fn atan2(y: f32, x: f32) -> f32 {
    use core::f32::consts::{FRAC_PI_2, PI};

    if x == 0.0 {
        return if y > 0.0 {
            FRAC_PI_2
        } else if y < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        };
    }

    let abs = |v: f32| if v < 0.0 { -v } else { v };
    let (ay, ax) = (abs(y), abs(x));
    let r = if ay <= ax {
        atan_unit(ay / ax)
    } else {
        FRAC_PI_2 - atan_unit(ax / ay)
    };
    let r = if x < 0.0 { PI - r } else { r };
    if y < 0.0 { -r } else { r }
}

// atan on [0, 1]
fn atan_unit(z: f32) -> f32 {
    use core::f32::consts::FRAC_PI_4;
    FRAC_PI_4 * z - z * (z - 1.0) * (0.2447 + 0.0663 * z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn angle_wraps_both_ways() {
        assert_eq!(Angle::new(512).units(), 0);
        assert_eq!(Angle::new(-1).units(), 511);
        assert_eq!(Angle::new(10).turn(-20).units(), 502);
        assert_eq!(Angle::new(500).turn(20).units(), 8);
        assert_eq!(Angle::new(10).turn(i32::MAX).units(), 9);
        assert_eq!(Angle::new(9).turn(i32::MIN).units(), 9);
        assert_eq!(Angle::new(511).turn(i32::MAX).turn(-i32::MAX).units(), 511);
    }

    #[test]
    fn direction_of_cardinal_headings() {
        assert_eq!(Angle::ZERO.direction(), Vec2::new(0.0, -1.0));
        assert_eq!(Angle::new(128).direction(), Vec2::new(1.0, 0.0));
        assert_eq!(Angle::new(256).direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn radians_round_trip_to_nearest_unit() {
        for units in [0, 1, 63, 128, 255, 300, 462, 511] {
            let a = Angle::new(units);
            assert_eq!(Angle::from_radians(a.to_radians()), a);
        }
        assert_eq!(Angle::from_radians(core::f32::consts::TAU), Angle::ZERO);
        assert_eq!(Angle::from_radians(-core::f32::consts::FRAC_PI_2).units(), 384);
    }

    #[test]
    fn sqrt_matches_std() {
        for x in [0.0001f32, 0.25, 1.0, 2.0, 9.0, 1234.5, 1.0e6] {
            assert!(close(sqrt(x), x.sqrt(), x.sqrt() * 1.0e-5), "sqrt({x})");
        }
        assert_eq!(sqrt(0.0), 0.0);
        assert_eq!(sqrt(-4.0), 0.0);
    }

    #[test]
    fn atan2_matches_std() {
        let samples = [
            (0.0f32, 1.0f32),
            (1.0, 1.0),
            (1.0, 0.0),
            (1.0, -1.0),
            (0.0, -1.0),
            (-1.0, -1.0),
            (-1.0, 0.0),
            (-1.0, 1.0),
            (0.3, 2.5),
            (-2.0, 0.1),
        ];
        for (y, x) in samples {
            assert!(close(atan2(y, x), y.atan2(x), 0.002), "atan2({y}, {x})");
        }
    }

    #[test]
    fn vector_ops() {
        let a = Vec2::new(3, 4);
        let b = Vec2::new(1, -2);
        assert_eq!(a + b, Vec2::new(4, 2));
        assert_eq!(a - b, Vec2::new(2, 6));
        assert_eq!(-a, Vec2::new(-3, -4));
        assert!(close(Vec2::new(3.0f32, 4.0).length(), 5.0, 1.0e-5));
        assert_eq!(Vec2::new(-1.7f32, 2.9).to_i32(), Vec2::new(-1, 2));
    }
}
