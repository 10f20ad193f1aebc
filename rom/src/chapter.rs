/// The demos, in the order the manual builds them up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "host", derive(clap::ValueEnum))]
pub enum Chapter {
    /// Star field, planet and splash screen. Nothing moves.
    Backgrounds,
    /// The backgrounds plus a still shuttle and moon.
    Sprites,
    /// The full demo: fly the shuttle, drag the moon, hear the thrusters.
    Sounds,
}

impl Chapter {
    pub const ALL: [Chapter; 3] = [Chapter::Backgrounds, Chapter::Sprites, Chapter::Sounds];

    pub const fn has_sprites(self) -> bool {
        !matches!(self, Chapter::Backgrounds)
    }

    /// Whether the loop reads input and moves things.
    pub const fn is_interactive(self) -> bool {
        matches!(self, Chapter::Sounds)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Chapter::Backgrounds => "backgrounds",
            Chapter::Sprites => "sprites",
            Chapter::Sounds => "sounds",
        }
    }
}

impl core::fmt::Display for Chapter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
