use nds::{
    SCREEN_HEIGHT, SCREEN_WIDTH,
    input::{KeyState, Keys, TouchPosition},
    math::Vec2,
};

/// The moon sprite, dragged around with the touch pen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Moon {
    pub position: Vec2<i32>,
    size: Vec2<i32>,
    /// Pen position last frame, while a drag is in progress.
    grip: Option<Vec2<i32>>,
}

impl Moon {
    pub fn new(position: Vec2<i32>, width: i32, height: i32) -> Self {
        let mut moon = Self {
            position,
            size: Vec2::new(width, height),
            grip: None,
        };
        moon.position = moon.clamp(position);
        moon
    }

    pub fn is_dragging(&self) -> bool {
        self.grip.is_some()
    }

    /// Follow the pen for one frame.
    ///
    /// The frame the pen touches down only records where it landed. While
    /// it stays down the moon moves by however far the pen moved since last
    /// frame, kept fully on screen. Lifting the pen leaves the moon where it
    /// is.
    pub fn drag(&mut self, keys: &KeyState, touch: TouchPosition) {
        let pen = touch.point();
        if keys.just_pressed(Keys::TOUCH) {
            self.grip = Some(pen);
        } else if keys.is_held(Keys::TOUCH) {
            let grip = self.grip.unwrap_or(pen);
            self.position = self.clamp(self.position + (pen - grip));
            self.grip = Some(pen);
        } else {
            self.grip = None;
        }
    }

    fn clamp(&self, p: Vec2<i32>) -> Vec2<i32> {
        Vec2::new(
            p.x.clamp(0, SCREEN_WIDTH - self.size.x),
            p.y.clamp(0, SCREEN_HEIGHT - self.size.y),
        )
    }
}
